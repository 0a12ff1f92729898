//! Background sweeping of expired session records.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::store::StoreInner;

/// Spawn the reaper loop onto the current Tokio runtime.
///
/// The loop sweeps on every tick until `cancel` fires, then exits and drops
/// its timer. The first sweep happens one full `interval` after spawning.
pub(crate) fn spawn(
    inner: Arc<StoreInner>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + interval;
        let mut ticker = tokio::time::interval_at(start, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Session reaper stopping");
                    break;
                }
                _ = ticker.tick() => {
                    if inner.sweep().is_none() {
                        debug!("Session store closed, reaper exiting");
                        break;
                    }
                }
            }
        }
    })
}
