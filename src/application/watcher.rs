//! URL-driven switch trigger
//!
//! Watches the resolved `networkId` query value across location changes
//! and invokes the switch controller once per observed value. Dedup is
//! value-based: re-observing the same resolved id does not re-trigger,
//! only a change of the value itself does.

use std::sync::Arc;

use tracing::debug;

use crate::domain::network::catalog::ChainId;
use crate::domain::network::switcher::{NetworkSwitchController, SwitchOutcome};
use crate::infrastructure::navigation::location::{resolve_network_param, AppLocation};
use crate::infrastructure::wallet::provider::WalletSession;
use crate::shared::types::SwitchOrigin;

pub struct NetworkWatcher {
    controller: Arc<NetworkSwitchController>,
    last_resolved: Option<ChainId>,
}

impl NetworkWatcher {
    pub fn new(controller: Arc<NetworkSwitchController>) -> Self {
        Self { controller, last_resolved: None }
    }

    /// Feed one observed location. Returns the switch outcome when the
    /// observation triggered a switch, `None` otherwise.
    pub async fn on_location_change(
        &mut self,
        session: &WalletSession,
        location: &AppLocation,
    ) -> Option<SwitchOutcome> {
        let resolved = resolve_network_param(location);

        if resolved == self.last_resolved {
            return None;
        }
        self.last_resolved = resolved;

        let requested = resolved?;
        if session.chain() == Some(requested) {
            debug!("url names {}, wallet already there", requested);
            return None;
        }

        Some(
            self.controller
                .change_network(session, requested, SwitchOrigin::UrlParam, location)
                .await,
        )
    }
}
