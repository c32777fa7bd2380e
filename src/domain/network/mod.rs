//! Chain catalog, pending-chain state and the switch controller

pub mod catalog;
pub mod pending;
pub mod switcher;

pub use catalog::{AddNetworkParams, ChainId, NetworkCatalog, SwitchNetworkParams};
pub use pending::{PendingChainAction, PendingChainRequest, PendingChainStore};
pub use switcher::{NetworkSwitchController, SwitchOutcome, NOT_CONNECTED_NAVIGATION_DELAY};
