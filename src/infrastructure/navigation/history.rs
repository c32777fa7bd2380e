//! Navigation: history pushes and the delayed not-connected redirect

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::infrastructure::navigation::location::AppLocation;

/// History sink the switch flow pushes target locations into
pub trait Navigator: Send + Sync {
    fn push(&self, target: &AppLocation);
}

/// Navigator for the CLI: logs pushes instead of mutating a browser
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn push(&self, target: &AppLocation) {
        info!("navigate -> {}?{}", target.pathname, target.search);
    }
}

/// A navigation scheduled for later, cancellable while still pending.
///
/// The not-connected path defers its redirect; dropping the guard (for
/// example on view teardown) aborts the timer so no stale push fires.
#[derive(Debug)]
pub struct ScheduledNavigation {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledNavigation {
    /// Push `target` into `navigator` after `delay`
    pub fn after(delay: Duration, navigator: Arc<dyn Navigator>, target: AppLocation) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.push(&target);
        });
        Self { handle: Some(handle) }
    }

    /// Cancel the pending navigation
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Wait for the navigation to fire
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    /// Whether the navigation already fired
    pub fn is_done(&self) -> bool {
        self.handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }
}

impl Drop for ScheduledNavigation {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
