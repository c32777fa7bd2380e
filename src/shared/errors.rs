//! Error handling for the application

use thiserror::Error;

/// Network/chain-related errors
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Chain not supported: {0}")]
    UnsupportedChain(String),
}

/// Wallet-related errors
#[derive(Error, Debug, Clone)]
pub enum WalletError {
    #[error("Wallet RPC rejected request (code {code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("Wallet transport failed: {0}")]
    Transport(String),

    #[error("Wallet disconnect failed: {0}")]
    DisconnectFailed(String),
}

impl WalletError {
    /// Error codes the wallet returns when the requested chain has not
    /// been added to it yet; they trigger the add-then-switch fallback.
    pub fn is_unrecognized_chain(&self) -> bool {
        matches!(self, WalletError::Rpc { code, .. } if *code == 4902 || *code == -32603)
    }
}

/// Pool-list errors
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Invalid pool data: {0}")]
    InvalidPoolData(String),

    #[error("Unknown sort column: {0}")]
    UnknownSortColumn(String),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Wallet error: {0}")]
    WalletError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<NetworkError> for AppError {
    fn from(err: NetworkError) -> Self {
        AppError::NetworkError(err.to_string())
    }
}

impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        AppError::WalletError(err.to_string())
    }
}

impl From<PoolError> for AppError {
    fn from(err: PoolError) -> Self {
        AppError::Unknown(err.to_string())
    }
}
