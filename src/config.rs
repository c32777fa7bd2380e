//! Configuration loading (Config.toml)

use std::fs;

use serde::{Deserialize, Serialize};

use crate::domain::pool::ranking::DEFAULT_PAGE_SIZE;
use crate::shared::errors::AppError;

/// Wallet bridge settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    pub bridge_url: String,
    pub account: Option<String>,
}

/// Switch-flow settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Delay before the not-connected redirect fires
    pub not_connected_delay_ms: u64,
}

/// Pool-list settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolListConfig {
    pub page_size: usize,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub wallet: WalletConfig,
    pub switch: SwitchConfig,
    pub pools: PoolListConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wallet: WalletConfig {
                bridge_url: "http://127.0.0.1:8545".to_string(),
                account: None,
            },
            switch: SwitchConfig { not_connected_delay_ms: 3000 },
            pools: PoolListConfig { page_size: DEFAULT_PAGE_SIZE },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}
