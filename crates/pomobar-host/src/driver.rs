//! Periodic tick driver.
//!
//! One tokio task per running countdown; the `JoinHandle` held by the
//! session is the single periodic-callback handle.

use std::sync::Arc;
use std::time::Duration;

use pomobar_core::now_ms;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::session::Inner;

/// Nominal tick period. The engine derives elapsed time from the wall
/// clock, so this only bounds display latency.
pub const TICK_PERIOD_MS: u64 = 250;

/// Spawn the driver for a running countdown. The task exits on its own
/// once the engine stops counting (interval expiry); the session aborts
/// it on stop, reset, and teardown.
pub(crate) fn spawn(inner: Arc<Inner>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(Duration::from_millis(TICK_PERIOD_MS));
        ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            if !inner.advance(now_ms()) {
                debug!("countdown no longer running, driver exiting");
                break;
            }
        }
    })
}
