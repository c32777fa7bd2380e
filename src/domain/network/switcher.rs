//! Network switch controller
//!
//! Reconciles a requested chain with the wallet's actual chain. Three
//! paths, tried in order: disconnect on mobile, defer when no injected
//! provider is connected, otherwise drive the wallet's switch RPC with
//! an add-chain fallback for wallets that do not know the chain yet.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::network::catalog::{ChainId, NetworkCatalog};
use crate::domain::network::pending::{PendingChainAction, PendingChainStore};
use crate::infrastructure::navigation::history::{Navigator, ScheduledNavigation};
use crate::infrastructure::navigation::location::{strip_network_param, AppLocation};
use crate::infrastructure::wallet::provider::{
    WalletSession, METHOD_ADD_CHAIN, METHOD_SWITCH_CHAIN,
};
use crate::shared::errors::WalletError;
use crate::shared::types::{DeviceClass, SwitchOrigin};

/// Default delay before redirecting when no wallet is connected
pub const NOT_CONNECTED_NAVIGATION_DELAY: Duration = Duration::from_millis(3000);

/// Terminal state of one switch attempt. Wallet failures never escape
/// the controller; they are folded into these outcomes.
#[derive(Debug)]
pub enum SwitchOutcome {
    /// Mobile fast path: wallet disconnected, chain parked as pending
    Disconnected,
    /// Not connected: chain parked as pending, redirect scheduled.
    /// Dropping the guard cancels the redirect.
    PendingReconnect { navigation: ScheduledNavigation },
    /// The wallet accepted the switch request
    Switched,
    /// The wallet did not know the chain and accepted the add request
    ChainAdded,
    /// No switch/add payload registered for the chain; nothing attempted
    SkippedUnsupported,
    /// The wallet rejected the switch for a non-recoverable reason
    SwitchRejected(WalletError),
    /// The add fallback was rejected as well
    AddRejected(WalletError),
    /// Another switch request is still in flight
    Busy,
}

/// Orchestrates wallet interaction for network switches
pub struct NetworkSwitchController {
    pending: PendingChainStore,
    navigator: Arc<dyn Navigator>,
    device: DeviceClass,
    not_connected_delay: Duration,
    // one switch per wallet session at a time
    in_flight: Mutex<()>,
}

impl NetworkSwitchController {
    pub fn new(
        pending: PendingChainStore,
        navigator: Arc<dyn Navigator>,
        device: DeviceClass,
    ) -> Self {
        Self {
            pending,
            navigator,
            device,
            not_connected_delay: NOT_CONNECTED_NAVIGATION_DELAY,
            in_flight: Mutex::new(()),
        }
    }

    pub fn with_not_connected_delay(mut self, delay: Duration) -> Self {
        self.not_connected_delay = delay;
        self
    }

    pub fn pending(&self) -> &PendingChainStore {
        &self.pending
    }

    /// Ask the wallet to move to `requested`. The network parameter is
    /// stripped from `location` before any navigation so the request is
    /// not re-processed.
    pub async fn change_network(
        &self,
        session: &WalletSession,
        requested: ChainId,
        origin: SwitchOrigin,
        location: &AppLocation,
    ) -> SwitchOutcome {
        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("switch to {} rejected: another switch in flight", requested);
                return SwitchOutcome::Busy;
            }
        };

        let target = strip_network_param(location);

        // Mobile wallets drop the session instead of switching in place;
        // the pending chain is picked up when the user reconnects.
        if self.device.is_mobile() {
            if let Some(connector) = session.disconnectable() {
                if let Err(e) = connector.disconnect().await {
                    warn!("wallet disconnect failed: {}", e);
                }
                self.pending.dispatch(PendingChainAction::UpdateWhenNotConnected {
                    chain: requested,
                    origin,
                });
                return SwitchOutcome::Disconnected;
            }
        }

        let provider = match session.injected_provider() {
            Some(provider) => provider.clone(),
            None => {
                self.pending.dispatch(PendingChainAction::UpdateWhenNotConnected {
                    chain: requested,
                    origin,
                });
                let navigation = ScheduledNavigation::after(
                    self.not_connected_delay,
                    self.navigator.clone(),
                    target,
                );
                info!("no injected wallet; parked chain {} as pending", requested);
                return SwitchOutcome::PendingReconnect { navigation };
            }
        };

        let switch_params = match NetworkCatalog::switch_params(requested) {
            Some(params) => params,
            None => {
                debug!("chain {} has no switch payload; skipping RPC", requested);
                return SwitchOutcome::SkippedUnsupported;
            }
        };

        let account = session.account().map(|a| a.as_str().to_string());
        let params = json!([switch_params, account]);

        match provider.request(METHOD_SWITCH_CHAIN, params).await {
            Ok(_) => {
                info!("wallet switched to {}", requested);
                self.pending.dispatch(PendingChainAction::Clear);
                self.navigator.push(&target);
                SwitchOutcome::Switched
            }
            Err(switch_error) if switch_error.is_unrecognized_chain() => {
                // The wallet does not know this chain yet; register it.
                let add_params = match NetworkCatalog::add_params(requested) {
                    Some(params) => params,
                    None => {
                        debug!("chain {} has no add payload; skipping RPC", requested);
                        return SwitchOutcome::SkippedUnsupported;
                    }
                };

                let params = json!([add_params, account]);
                match provider.request(METHOD_ADD_CHAIN, params).await {
                    Ok(_) => {
                        info!("wallet added chain {}", requested);
                        self.pending.dispatch(PendingChainAction::Clear);
                        self.navigator.push(&target);
                        SwitchOutcome::ChainAdded
                    }
                    Err(add_error) => {
                        error!("wallet rejected add of {}: {}", requested, add_error);
                        SwitchOutcome::AddRejected(add_error)
                    }
                }
            }
            Err(switch_error) => {
                error!("wallet rejected switch to {}: {}", requested, switch_error);
                SwitchOutcome::SwitchRejected(switch_error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::wallet::provider::{Disconnectable, WalletProvider};
    use crate::shared::types::Account;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex as StdMutex;

    struct RecordingNavigator {
        pushes: StdMutex<Vec<AppLocation>>,
    }

    impl RecordingNavigator {
        fn new() -> Arc<Self> {
            Arc::new(Self { pushes: StdMutex::new(Vec::new()) })
        }

        fn pushes(&self) -> Vec<AppLocation> {
            self.pushes.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn push(&self, target: &AppLocation) {
            self.pushes.lock().unwrap().push(target.clone());
        }
    }

    /// Wallet double: records calls, answers from a script
    struct MockWallet {
        calls: StdMutex<Vec<(String, Value)>>,
        switch_response: Result<Value, WalletError>,
        add_response: Result<Value, WalletError>,
    }

    impl MockWallet {
        fn accepting() -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                switch_response: Ok(Value::Null),
                add_response: Ok(Value::Null),
            }
        }

        fn rejecting_switch(code: i64) -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                switch_response: Err(WalletError::Rpc {
                    code,
                    message: "rejected".to_string(),
                }),
                add_response: Ok(Value::Null),
            }
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WalletProvider for MockWallet {
        async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
            self.calls.lock().unwrap().push((method.to_string(), params));
            match method {
                METHOD_SWITCH_CHAIN => self.switch_response.clone(),
                METHOD_ADD_CHAIN => self.add_response.clone(),
                other => panic!("unexpected wallet method: {}", other),
            }
        }

        fn is_injected(&self) -> bool {
            true
        }
    }

    struct MockConnector {
        disconnects: StdMutex<u32>,
    }

    impl MockConnector {
        fn new() -> Arc<Self> {
            Arc::new(Self { disconnects: StdMutex::new(0) })
        }
    }

    #[async_trait]
    impl Disconnectable for MockConnector {
        async fn disconnect(&self) -> Result<(), WalletError> {
            *self.disconnects.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn desktop_controller(navigator: Arc<RecordingNavigator>) -> NetworkSwitchController {
        NetworkSwitchController::new(PendingChainStore::new(), navigator, DeviceClass::Desktop)
    }

    fn connected_session(wallet: Arc<MockWallet>) -> WalletSession {
        WalletSession::new(
            Some(ChainId::Mainnet),
            Some(Account::new("0xabc")),
            Some(wallet),
            None,
        )
    }

    fn location() -> AppLocation {
        AppLocation::new("/pools", "?tab=all&networkId=137")
    }

    #[tokio::test]
    async fn test_switch_path_makes_exactly_one_rpc_call() {
        let navigator = RecordingNavigator::new();
        let wallet = Arc::new(MockWallet::accepting());
        let controller = desktop_controller(navigator.clone());

        let outcome = controller
            .change_network(
                &connected_session(wallet.clone()),
                ChainId::Matic,
                SwitchOrigin::UrlParam,
                &location(),
            )
            .await;

        assert!(matches!(outcome, SwitchOutcome::Switched));

        let calls = wallet.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, METHOD_SWITCH_CHAIN);
        assert_eq!(calls[0].1[0]["chainId"], "0x89");
        assert_eq!(calls[0].1[1], "0xabc");

        // navigated to the stripped target
        let pushes = navigator.pushes();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].query_pairs(), vec![("tab".to_string(), "all".to_string())]);
    }

    #[tokio::test]
    async fn test_unknown_chain_triggers_add_fallback_once() {
        let navigator = RecordingNavigator::new();
        let wallet = Arc::new(MockWallet::rejecting_switch(4902));
        let controller = desktop_controller(navigator.clone());

        let outcome = controller
            .change_network(
                &connected_session(wallet.clone()),
                ChainId::Matic,
                SwitchOrigin::UrlParam,
                &location(),
            )
            .await;

        assert!(matches!(outcome, SwitchOutcome::ChainAdded));

        let calls = wallet.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, METHOD_SWITCH_CHAIN);
        assert_eq!(calls[1].0, METHOD_ADD_CHAIN);
        assert_eq!(calls[1].1[0]["chainId"], "0x89");
        assert_eq!(calls[1].1[0]["chainName"], "Polygon");
        assert_eq!(navigator.pushes().len(), 1);
    }

    #[tokio::test]
    async fn test_internal_error_code_also_triggers_add_fallback() {
        let navigator = RecordingNavigator::new();
        let wallet = Arc::new(MockWallet::rejecting_switch(-32603));
        let controller = desktop_controller(navigator.clone());

        let outcome = controller
            .change_network(
                &connected_session(wallet.clone()),
                ChainId::AvaxMainnet,
                SwitchOrigin::UserAction,
                &location(),
            )
            .await;

        assert!(matches!(outcome, SwitchOutcome::ChainAdded));
        assert_eq!(wallet.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_user_rejection_is_terminal_without_retry() {
        let navigator = RecordingNavigator::new();
        let wallet = Arc::new(MockWallet::rejecting_switch(4001));
        let controller = desktop_controller(navigator.clone());

        let outcome = controller
            .change_network(
                &connected_session(wallet.clone()),
                ChainId::Matic,
                SwitchOrigin::UserAction,
                &location(),
            )
            .await;

        assert!(matches!(outcome, SwitchOutcome::SwitchRejected(_)));
        assert_eq!(wallet.calls().len(), 1);
        assert!(navigator.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejection_is_terminal() {
        let navigator = RecordingNavigator::new();
        let wallet = Arc::new(MockWallet {
            calls: StdMutex::new(Vec::new()),
            switch_response: Err(WalletError::Rpc { code: 4902, message: "unknown".to_string() }),
            add_response: Err(WalletError::Rpc { code: 4001, message: "declined".to_string() }),
        });
        let controller = desktop_controller(navigator.clone());

        let outcome = controller
            .change_network(
                &connected_session(wallet.clone()),
                ChainId::BscMainnet,
                SwitchOrigin::UrlParam,
                &location(),
            )
            .await;

        assert!(matches!(outcome, SwitchOutcome::AddRejected(_)));
        assert_eq!(wallet.calls().len(), 2);
        assert!(navigator.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_unswitchable_chain_makes_no_rpc_call() {
        let navigator = RecordingNavigator::new();
        let wallet = Arc::new(MockWallet::accepting());
        let controller = desktop_controller(navigator.clone());

        // Ropsten has no switch payload registered
        let outcome = controller
            .change_network(
                &connected_session(wallet.clone()),
                ChainId::Ropsten,
                SwitchOrigin::UrlParam,
                &location(),
            )
            .await;

        assert!(matches!(outcome, SwitchOutcome::SkippedUnsupported));
        assert!(wallet.calls().is_empty());
        assert!(navigator.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_mobile_disconnect_path_skips_rpc() {
        let navigator = RecordingNavigator::new();
        let wallet = Arc::new(MockWallet::accepting());
        let connector = MockConnector::new();
        let controller = NetworkSwitchController::new(
            PendingChainStore::new(),
            navigator.clone(),
            DeviceClass::Mobile,
        );

        let session = WalletSession::new(
            Some(ChainId::Mainnet),
            Some(Account::new("0xabc")),
            Some(wallet.clone()),
            Some(connector.clone()),
        );

        let outcome = controller
            .change_network(&session, ChainId::Matic, SwitchOrigin::UserAction, &location())
            .await;

        assert!(matches!(outcome, SwitchOutcome::Disconnected));
        assert_eq!(*connector.disconnects.lock().unwrap(), 1);
        assert!(wallet.calls().is_empty());

        let pending = controller.pending().current().unwrap();
        assert_eq!(pending.requested, ChainId::Matic);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_connected_path_defers_navigation() {
        let navigator = RecordingNavigator::new();
        let controller = desktop_controller(navigator.clone());

        let outcome = controller
            .change_network(
                &WalletSession::disconnected(),
                ChainId::Matic,
                SwitchOrigin::UrlParam,
                &location(),
            )
            .await;

        let navigation = match outcome {
            SwitchOutcome::PendingReconnect { navigation } => navigation,
            other => panic!("expected PendingReconnect, got {:?}", other),
        };

        let pending = controller.pending().current().unwrap();
        assert_eq!(pending.requested, ChainId::Matic);
        assert_eq!(pending.origin, SwitchOrigin::UrlParam);

        // nothing pushed before the delay elapses
        assert!(navigator.pushes().is_empty());

        tokio::time::sleep(Duration::from_millis(3001)).await;
        tokio::task::yield_now().await;

        assert!(navigation.is_done());
        let pushes = navigator.pushes();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].query_pairs(), vec![("tab".to_string(), "all".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_connected_navigation_is_cancellable() {
        let navigator = RecordingNavigator::new();
        let controller = desktop_controller(navigator.clone());

        let outcome = controller
            .change_network(
                &WalletSession::disconnected(),
                ChainId::Matic,
                SwitchOrigin::UrlParam,
                &location(),
            )
            .await;

        match outcome {
            SwitchOutcome::PendingReconnect { navigation } => navigation.cancel(),
            other => panic!("expected PendingReconnect, got {:?}", other),
        }

        tokio::time::sleep(Duration::from_millis(5000)).await;
        tokio::task::yield_now().await;
        assert!(navigator.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_non_injected_provider_counts_as_not_connected() {
        struct NotInjected;

        #[async_trait]
        impl WalletProvider for NotInjected {
            async fn request(&self, _: &str, _: Value) -> Result<Value, WalletError> {
                panic!("not-connected path must not issue RPC calls");
            }

            fn is_injected(&self) -> bool {
                false
            }
        }

        let navigator = RecordingNavigator::new();
        let controller = desktop_controller(navigator.clone());
        let session = WalletSession::new(
            Some(ChainId::Mainnet),
            Some(Account::new("0xabc")),
            Some(Arc::new(NotInjected)),
            None,
        );

        let outcome = controller
            .change_network(&session, ChainId::Matic, SwitchOrigin::UrlParam, &location())
            .await;

        assert!(matches!(outcome, SwitchOutcome::PendingReconnect { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_switch_is_rejected_as_busy() {
        struct SlowWallet;

        #[async_trait]
        impl WalletProvider for SlowWallet {
            async fn request(&self, _: &str, _: Value) -> Result<Value, WalletError> {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(Value::Null)
            }

            fn is_injected(&self) -> bool {
                true
            }
        }

        let navigator = RecordingNavigator::new();
        let controller = Arc::new(desktop_controller(navigator));

        let first_controller = controller.clone();
        let first = tokio::spawn(async move {
            let session = WalletSession::new(
                Some(ChainId::Mainnet),
                Some(Account::new("0xabc")),
                Some(Arc::new(SlowWallet)),
                None,
            );
            first_controller
                .change_network(&session, ChainId::Matic, SwitchOrigin::UserAction, &location())
                .await
        });

        // let the first request take the in-flight lock
        tokio::task::yield_now().await;

        let session = WalletSession::new(
            Some(ChainId::Mainnet),
            Some(Account::new("0xabc")),
            Some(Arc::new(SlowWallet)),
            None,
        );
        let second = controller
            .change_network(&session, ChainId::BscMainnet, SwitchOrigin::UserAction, &location())
            .await;

        assert!(matches!(second, SwitchOutcome::Busy));
        assert!(matches!(first.await.unwrap(), SwitchOutcome::Switched));
    }

    #[tokio::test]
    async fn test_successful_switch_clears_pending() {
        let navigator = RecordingNavigator::new();
        let wallet = Arc::new(MockWallet::accepting());
        let controller = desktop_controller(navigator.clone());

        controller.pending().dispatch(PendingChainAction::UpdateWhenNotConnected {
            chain: ChainId::Matic,
            origin: SwitchOrigin::UrlParam,
        });

        controller
            .change_network(
                &connected_session(wallet),
                ChainId::Matic,
                SwitchOrigin::UrlParam,
                &location(),
            )
            .await;

        assert!(controller.pending().current().is_none());
    }
}
