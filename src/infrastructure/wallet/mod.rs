//! Wallet integration layer

pub mod bridge;
pub mod provider;

pub use bridge::HttpWalletBridge;
pub use provider::{
    Disconnectable, WalletProvider, WalletSession, METHOD_ADD_CHAIN, METHOD_SWITCH_CHAIN,
};
