//! Network catalog: chain identifiers and the wallet payloads needed to
//! switch to (or first register) each supported chain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chains the interface can be pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainId {
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
    Kovan,
    Matic,
    Mumbai,
    BscTestnet,
    BscMainnet,
    AvaxTestnet,
    AvaxMainnet,
}

impl ChainId {
    /// All supported chains, in display order
    pub fn all() -> &'static [ChainId] {
        &[
            ChainId::Mainnet,
            ChainId::Ropsten,
            ChainId::Rinkeby,
            ChainId::Goerli,
            ChainId::Kovan,
            ChainId::Matic,
            ChainId::Mumbai,
            ChainId::BscTestnet,
            ChainId::BscMainnet,
            ChainId::AvaxTestnet,
            ChainId::AvaxMainnet,
        ]
    }

    /// Numeric chain id as used on-chain and in wallet payloads
    pub fn id(&self) -> u64 {
        match self {
            ChainId::Mainnet => 1,
            ChainId::Ropsten => 3,
            ChainId::Rinkeby => 4,
            ChainId::Goerli => 5,
            ChainId::Kovan => 42,
            ChainId::Matic => 137,
            ChainId::Mumbai => 80001,
            ChainId::BscTestnet => 97,
            ChainId::BscMainnet => 56,
            ChainId::AvaxTestnet => 43113,
            ChainId::AvaxMainnet => 43114,
        }
    }

    /// Human-readable network name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Mainnet => "Ethereum",
            ChainId::Ropsten => "Ropsten",
            ChainId::Rinkeby => "Rinkeby",
            ChainId::Goerli => "Goerli",
            ChainId::Kovan => "Kovan",
            ChainId::Matic => "Polygon",
            ChainId::Mumbai => "Mumbai",
            ChainId::BscTestnet => "BSC Testnet",
            ChainId::BscMainnet => "BSC",
            ChainId::AvaxTestnet => "Avalanche Testnet",
            ChainId::AvaxMainnet => "AVAX",
        }
    }

    /// Canonical query-string form. URL values are matched against this
    /// string case-sensitively.
    pub fn to_query_value(&self) -> String {
        self.id().to_string()
    }

    /// Resolve a raw query value against the supported-network set.
    /// First match wins; unresolvable values yield `None`.
    pub fn from_query_value(raw: &str) -> Option<ChainId> {
        ChainId::all()
            .iter()
            .copied()
            .find(|chain| chain.to_query_value() == raw)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload for `wallet_switchEthereumChain`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchNetworkParams {
    #[serde(rename = "chainId")]
    pub chain_id: String,
}

/// Native currency block of an add-chain payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Payload for `wallet_addEthereumChain`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNetworkParams {
    #[serde(rename = "chainId")]
    pub chain_id: String,
    #[serde(rename = "chainName")]
    pub chain_name: String,
    #[serde(rename = "nativeCurrency")]
    pub native_currency: NativeCurrency,
    #[serde(rename = "rpcUrls")]
    pub rpc_urls: Vec<String>,
    #[serde(rename = "blockExplorerUrls")]
    pub block_explorer_urls: Vec<String>,
}

/// Static registry of wallet switch/add payloads.
///
/// Only chains that can be reached by a programmatic wallet switch have
/// entries; a lookup miss means the caller must skip the RPC attempt,
/// it is not a failure.
pub struct NetworkCatalog;

impl NetworkCatalog {
    /// Wallet-switch payload for a chain, if the chain is switchable
    pub fn switch_params(chain: ChainId) -> Option<SwitchNetworkParams> {
        let chain_id = match chain {
            ChainId::Mainnet => "0x1",
            ChainId::Matic => "0x89",
            ChainId::BscMainnet => "0x38",
            ChainId::AvaxMainnet => "0xA86A",
            _ => return None,
        };

        Some(SwitchNetworkParams { chain_id: chain_id.to_string() })
    }

    /// Wallet-add payload for a chain, if registration parameters are known
    pub fn add_params(chain: ChainId) -> Option<AddNetworkParams> {
        let params = match chain {
            ChainId::Mainnet => AddNetworkParams {
                chain_id: "0x1".to_string(),
                chain_name: "Ethereum".to_string(),
                native_currency: NativeCurrency {
                    name: "Ethereum".to_string(),
                    symbol: "ETH".to_string(),
                    decimals: 18,
                },
                rpc_urls: vec!["https://mainnet.infura.io/v3".to_string()],
                block_explorer_urls: vec!["https://etherscan.com".to_string()],
            },
            ChainId::Matic => AddNetworkParams {
                chain_id: "0x89".to_string(),
                chain_name: "Polygon".to_string(),
                native_currency: NativeCurrency {
                    name: "Matic".to_string(),
                    symbol: "MATIC".to_string(),
                    decimals: 18,
                },
                rpc_urls: vec![
                    "https://polygon.dmm.exchange/v1/mainnet/geth?appId=prod-dmm".to_string(),
                ],
                block_explorer_urls: vec!["https://polygonscan.com/".to_string()],
            },
            ChainId::BscMainnet => AddNetworkParams {
                chain_id: "0x38".to_string(),
                chain_name: "BSC".to_string(),
                native_currency: NativeCurrency {
                    name: "BNB".to_string(),
                    symbol: "BNB".to_string(),
                    decimals: 18,
                },
                rpc_urls: vec!["https://bsc-dataseed.binance.org/".to_string()],
                block_explorer_urls: vec!["https://bscscan.com/".to_string()],
            },
            ChainId::AvaxMainnet => AddNetworkParams {
                chain_id: "0xA86A".to_string(),
                chain_name: "AVAX".to_string(),
                native_currency: NativeCurrency {
                    name: "AVAX".to_string(),
                    symbol: "AVAX".to_string(),
                    decimals: 18,
                },
                rpc_urls: vec!["https://api.avax.network/ext/bc/C/rpc".to_string()],
                block_explorer_urls: vec![
                    "https://cchain.explorer.avax.network/".to_string(),
                ],
            },
            _ => return None,
        };

        Some(params)
    }

    /// Whether a chain is reachable via a programmatic switch
    pub fn is_switchable(chain: ChainId) -> bool {
        Self::switch_params(chain).is_some()
    }
}
