//! Common types used across the application

use serde::{Deserialize, Serialize};

/// Device class the interface is running on. Mobile wallets cannot be
/// driven through injected-provider RPC, so the switch flow differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn is_mobile(&self) -> bool {
        matches!(self, DeviceClass::Mobile)
    }
}

/// Wallet account address (checksummed hex string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account(pub String);

impl Account {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where a network-switch request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchOrigin {
    /// The `networkId` query parameter named a chain
    UrlParam,
    /// The user picked a network in the UI
    UserAction,
}
