//! HTTP JSON-RPC bridge to a wallet
//!
//! Lets the CLI drive the same switch flow the interface drives against
//! an injected provider, by posting JSON-RPC 2.0 requests to a local
//! wallet bridge endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::infrastructure::wallet::provider::WalletProvider;
use crate::shared::errors::WalletError;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC client for a wallet bridge endpoint
pub struct HttpWalletBridge {
    client: Client,
    endpoint: String,
    injected: bool,
}

impl HttpWalletBridge {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            injected: true,
        }
    }

    /// Bridge that reports itself as a non-injected provider, for
    /// exercising the not-connected path
    pub fn non_injected(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            injected: false,
        }
    }
}

#[async_trait]
impl WalletProvider for HttpWalletBridge {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let body = RpcRequest { jsonrpc: "2.0", id: 1, method, params };
        debug!("wallet bridge request: {} -> {}", method, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        let rpc: RpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        if let Some(err) = rpc.error {
            return Err(WalletError::Rpc { code: err.code, message: err.message });
        }

        Ok(rpc.result.unwrap_or(Value::Null))
    }

    fn is_injected(&self) -> bool {
        self.injected
    }
}
