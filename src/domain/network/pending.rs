//! Pending-chain state: the user asked to be on chain X but the wallet
//! has not confirmed the switch yet.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::domain::network::catalog::ChainId;
use crate::shared::types::SwitchOrigin;

/// A requested-but-unconfirmed network switch
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChainRequest {
    pub id: Uuid,
    pub requested: ChainId,
    pub origin: SwitchOrigin,
    pub created_at: DateTime<Utc>,
}

impl PendingChainRequest {
    fn new(requested: ChainId, origin: SwitchOrigin) -> Self {
        Self {
            id: Uuid::new_v4(),
            requested,
            origin,
            created_at: Utc::now(),
        }
    }
}

/// Mutations the store accepts. All writes go through `dispatch`.
#[derive(Debug, Clone)]
pub enum PendingChainAction {
    /// Remember the chain to activate once the wallet (re)connects
    UpdateWhenNotConnected { chain: ChainId, origin: SwitchOrigin },
    /// The wallet confirmed the switch or the user navigated away
    Clear,
}

/// Single owner of the pending-chain state. Observers subscribe to a
/// watch channel; the switch controller is the sole writer.
#[derive(Debug, Clone)]
pub struct PendingChainStore {
    tx: watch::Sender<Option<PendingChainRequest>>,
}

impl PendingChainStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Apply an action to the store
    pub fn dispatch(&self, action: PendingChainAction) {
        match action {
            PendingChainAction::UpdateWhenNotConnected { chain, origin } => {
                let request = PendingChainRequest::new(chain, origin);
                debug!("pending chain set to {} ({:?})", chain, origin);
                self.tx.send_replace(Some(request));
            }
            PendingChainAction::Clear => {
                debug!("pending chain cleared");
                self.tx.send_replace(None);
            }
        }
    }

    /// Current pending request, if any
    pub fn current(&self) -> Option<PendingChainRequest> {
        self.tx.borrow().clone()
    }

    /// Subscribe to pending-chain changes
    pub fn subscribe(&self) -> watch::Receiver<Option<PendingChainRequest>> {
        self.tx.subscribe()
    }
}

impl Default for PendingChainStore {
    fn default() -> Self {
        Self::new()
    }
}
