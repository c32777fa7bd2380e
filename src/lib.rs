//! Dexnav - DEX interface core
//! Network switching, URL reconciliation and pool-list ranking

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use domain::network::catalog::{ChainId, NetworkCatalog};
pub use domain::network::pending::PendingChainStore;
pub use domain::network::switcher::{NetworkSwitchController, SwitchOutcome};
pub use domain::pool::ranking::{PoolListView, PoolRecord, PoolSorter, SortColumn};
pub use infrastructure::navigation::location::AppLocation;
pub use infrastructure::wallet::provider::{WalletProvider, WalletSession};
