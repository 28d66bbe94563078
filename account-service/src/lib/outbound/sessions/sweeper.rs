use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::authentication::ports::SessionRegistry;

/// Periodically drop expired refresh tokens from `registry`.
///
/// Failures are logged and the sweep is retried on the next tick. The
/// task runs until the returned handle is aborted.
pub fn spawn_sweeper<SR>(registry: Arc<SR>, every: Duration) -> JoinHandle<()>
where
    SR: SessionRegistry,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match registry.purge_expired(Utc::now()).await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "Expired refresh sessions purged"),
                Err(e) => tracing::error!(error = %e, "Failed to purge expired refresh sessions"),
            }
        }
    })
}
