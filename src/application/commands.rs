//! CLI commands and handlers

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::config::Config;
use crate::domain::network::catalog::{ChainId, NetworkCatalog};
use crate::domain::network::pending::PendingChainStore;
use crate::domain::network::switcher::{NetworkSwitchController, SwitchOutcome};
use crate::domain::pool::ranking::{PoolListView, PoolRecord, SortColumn};
use crate::infrastructure::navigation::history::TracingNavigator;
use crate::infrastructure::navigation::location::AppLocation;
use crate::infrastructure::wallet::bridge::HttpWalletBridge;
use crate::infrastructure::wallet::provider::{WalletProvider, WalletSession};
use crate::shared::errors::{AppError, NetworkError, PoolError};
use crate::shared::types::{Account, DeviceClass, SwitchOrigin};

#[derive(Parser)]
#[command(name = "dexnav")]
#[command(version, about = "DEX interface core - network switching and pool ranking")]
pub struct Cli {
    /// Path to config file (optional)
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported networks and their wallet payloads
    Networks {
        /// Show full add-chain payloads
        #[arg(long)]
        detailed: bool,
    },

    /// Drive a wallet network switch through the JSON-RPC bridge
    Switch {
        /// Target chain, canonical query form (e.g. 137 for Polygon)
        #[arg(long)]
        chain: String,

        /// Chain the wallet currently reports
        #[arg(long)]
        current_chain: Option<String>,

        /// Wallet account address
        #[arg(long)]
        account: Option<String>,

        /// Wallet bridge endpoint (overrides config)
        #[arg(long)]
        bridge_url: Option<String>,

        /// Treat the wallet as not connected (exercises the deferred
        /// redirect path)
        #[arg(long)]
        not_connected: bool,

        /// Query string of the current location
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Rank pools from a JSON file the way the pool list displays them
    Rank {
        /// Path to a JSON array of pool records
        #[arg(long)]
        file: String,

        /// Sort column: liquidity, volume, fees, apr (default ranking
        /// when omitted)
        #[arg(long)]
        sort: Option<String>,

        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,

        /// Number of pages to show
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, config: Config) -> Result<(), AppError> {
        match command {
            Commands::Networks { detailed } => Self::execute_networks(detailed),
            Commands::Switch {
                chain,
                current_chain,
                account,
                bridge_url,
                not_connected,
                search,
            } => {
                Self::execute_switch(
                    chain,
                    current_chain,
                    account,
                    bridge_url,
                    not_connected,
                    search,
                    config,
                )
                .await
            }
            Commands::Rank { file, sort, ascending, pages } => {
                Self::execute_rank(file, sort, ascending, pages, config)
            }
        }
    }

    fn execute_networks(detailed: bool) -> Result<(), AppError> {
        info!("Supported networks:");

        for chain in ChainId::all() {
            let switchable = if NetworkCatalog::is_switchable(*chain) {
                "switchable"
            } else {
                "manual only"
            };
            info!("  {} (chainId {}): {}", chain, chain.id(), switchable);

            if detailed {
                if let Some(params) = NetworkCatalog::add_params(*chain) {
                    info!(
                        "    add payload: {} / {} rpc, {} explorer",
                        params.chain_id,
                        params.rpc_urls.len(),
                        params.block_explorer_urls.len()
                    );
                    for url in &params.rpc_urls {
                        info!("      rpc: {}", url);
                    }
                }
            }
        }

        Ok(())
    }

    async fn execute_switch(
        chain: String,
        current_chain: Option<String>,
        account: Option<String>,
        bridge_url: Option<String>,
        not_connected: bool,
        search: String,
        config: Config,
    ) -> Result<(), AppError> {
        let requested = ChainId::from_query_value(&chain)
            .ok_or(NetworkError::UnsupportedChain(chain))?;

        let wallet_chain = match current_chain {
            Some(raw) => Some(
                ChainId::from_query_value(&raw).ok_or(NetworkError::UnsupportedChain(raw))?,
            ),
            None => None,
        };

        let endpoint = bridge_url.unwrap_or_else(|| config.wallet.bridge_url.clone());
        let provider: Arc<dyn WalletProvider> = if not_connected {
            Arc::new(HttpWalletBridge::non_injected(&endpoint))
        } else {
            Arc::new(HttpWalletBridge::new(&endpoint))
        };

        let account = account.or(config.wallet.account).map(Account::new);
        let session = WalletSession::new(wallet_chain, account, Some(provider), None);

        let controller = NetworkSwitchController::new(
            PendingChainStore::new(),
            Arc::new(TracingNavigator),
            DeviceClass::Desktop,
        )
        .with_not_connected_delay(Duration::from_millis(config.switch.not_connected_delay_ms));

        let location = AppLocation::new("/", search);
        let outcome = controller
            .change_network(&session, requested, SwitchOrigin::UserAction, &location)
            .await;

        match outcome {
            SwitchOutcome::Switched => info!("Wallet switched to {}", requested),
            SwitchOutcome::ChainAdded => info!("Wallet added and moved to {}", requested),
            SwitchOutcome::SkippedUnsupported => {
                info!("{} has no wallet payload registered; nothing attempted", requested)
            }
            SwitchOutcome::PendingReconnect { navigation } => {
                info!("Wallet not connected; {} parked as pending chain", requested);
                navigation.join().await;
            }
            SwitchOutcome::Disconnected => {
                info!("Wallet disconnected; {} parked as pending chain", requested)
            }
            SwitchOutcome::SwitchRejected(e) => error!("Switch rejected: {}", e),
            SwitchOutcome::AddRejected(e) => error!("Add rejected: {}", e),
            SwitchOutcome::Busy => error!("Another switch is already in flight"),
        }

        Ok(())
    }

    fn execute_rank(
        file: String,
        sort: Option<String>,
        ascending: bool,
        pages: usize,
        config: Config,
    ) -> Result<(), AppError> {
        let content = fs::read_to_string(&file)
            .map_err(|e| AppError::ConfigError(format!("Failed to read {}: {}", file, e)))?;
        let pools: Vec<PoolRecord> = serde_json::from_str(&content)
            .map_err(|e| PoolError::InvalidPoolData(format!("{}: {}", file, e)))?;

        let mut view = PoolListView::new(config.pools.page_size);
        view.set_pools(pools.into_iter().map(Some).collect());

        if let Some(raw) = sort {
            let column = match raw.as_str() {
                "liquidity" => SortColumn::Liquidity,
                "volume" => SortColumn::Volume,
                "fees" => SortColumn::Fees,
                "apr" => SortColumn::OneYearFeeLiquidity,
                other => return Err(PoolError::UnknownSortColumn(other.to_string()).into()),
            };
            view.toggle_column(column);
            if ascending {
                // second click on the same column flips the direction
                view.toggle_column(column);
            }
        }

        for _ in 1..pages {
            view.load_more();
        }

        for (i, pool) in view.visible().iter().enumerate() {
            info!(
                "{:3}. {} amp={} health={:.2} liq=${:.0} vol=${:.0} fees=${:.2} 1y-fl={:.2}%",
                i + 1,
                pool.address,
                pool.amp,
                pool.health_factor,
                pool.stats.reserve_usd,
                pool.stats.one_day_volume(),
                pool.stats.one_day_fee().unwrap_or(0.0),
                pool.one_year_fee_liquidity(),
            );
        }

        if view.has_more() {
            info!("... more pools available (use --pages to show them)");
        }

        Ok(())
    }
}
