//! Background purge loop: a `tokio::time::interval` ticking at a fixed
//! period, skipping missed ticks rather than bursting, for as long as the
//! caller holds the returned `JoinHandle`.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::task::JoinHandle;
use tracing::debug;

use sage_stores::SessionStore;

use crate::manager::SessionManager;

/// Spawns a task that calls [`SessionManager::run_cleanup`] on
/// `manager.config().cleanup_interval`, forever. Dropping the returned
/// handle does not stop the task — callers that need graceful shutdown
/// should `abort()` it explicitly.
pub fn spawn_cleanup_task<S>(manager: Arc<SessionManager<S>>) -> JoinHandle<()>
where
    S: SessionStore + 'static,
{
    let period = manager.config().cleanup_interval;
    let std_period = StdDuration::from_secs(period.whole_seconds().max(1) as u64);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std_period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let now = time::OffsetDateTime::now_utc();
            let removed = manager.run_cleanup(now).await;
            debug!(removed, "session cleanup tick");
        }
    })
}
