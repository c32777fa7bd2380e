//! Wallet provider abstraction
//!
//! Mirrors the surface of an injected browser wallet: raw JSON-RPC
//! `request`, an injected-implementation flag, and an optional
//! disconnect capability on the connector.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::network::catalog::ChainId;
use crate::shared::errors::WalletError;
use crate::shared::types::Account;

/// RPC method asking the wallet to change its active chain
pub const METHOD_SWITCH_CHAIN: &str = "wallet_switchEthereumChain";
/// RPC method registering a new chain's parameters with the wallet
pub const METHOD_ADD_CHAIN: &str = "wallet_addEthereumChain";

/// Unified interface over wallet providers
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Send a raw RPC request to the wallet
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;

    /// Whether this is the injected-wallet implementation the switch
    /// flow can drive programmatically
    fn is_injected(&self) -> bool;
}

/// Connectors that can tear down their wallet session
#[async_trait]
pub trait Disconnectable: Send + Sync {
    async fn disconnect(&self) -> Result<(), WalletError>;
}

/// Active wallet context: who is connected, on which chain, through
/// which provider/connector.
pub struct WalletSession {
    chain: Option<ChainId>,
    account: Option<Account>,
    provider: Option<Arc<dyn WalletProvider>>,
    connector: Option<Arc<dyn Disconnectable>>,
}

impl WalletSession {
    pub fn new(
        chain: Option<ChainId>,
        account: Option<Account>,
        provider: Option<Arc<dyn WalletProvider>>,
        connector: Option<Arc<dyn Disconnectable>>,
    ) -> Self {
        Self { chain, account, provider, connector }
    }

    /// Session with no wallet attached at all
    pub fn disconnected() -> Self {
        Self { chain: None, account: None, provider: None, connector: None }
    }

    pub fn chain(&self) -> Option<ChainId> {
        self.chain
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Provider, if one is attached and injected-wallet-like. A session
    /// without this is treated as not connected by the switch flow.
    pub fn injected_provider(&self) -> Option<&Arc<dyn WalletProvider>> {
        self.provider.as_ref().filter(|p| p.is_injected())
    }

    /// Capability query for the connector's disconnect support
    pub fn disconnectable(&self) -> Option<&Arc<dyn Disconnectable>> {
        self.connector.as_ref()
    }
}
