//! Periodic poller: calls a driver's `poll` on a fixed period.
//!
//! Each poll is awaited before the next tick is taken, so two polls of the
//! same driver never overlap. A tick that would have fired while a slow poll
//! was still running is delayed rather than bunched up.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use sensorkit_domain::time::now;

use crate::ports::{Driver, Host};

/// Shortest period accepted; `tokio::time::interval` panics on zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a running poll loop. Dropping it stops the loop.
pub struct PeriodicPoller {
    driver: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicPoller {
    /// Spawn the poll loop for `driver` on the current tokio runtime.
    ///
    /// The first poll runs immediately.
    pub fn start<D, H>(driver: Arc<D>, host: Arc<H>, period: Duration) -> Self
    where
        D: Driver + 'static,
        H: Host + 'static,
    {
        let name = driver.name();
        let period = period.max(MIN_PERIOD);
        let handle = tokio::spawn(run(driver, host, period));

        tracing::info!(
            driver = name,
            period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
            "poller started"
        );

        Self {
            driver: name,
            handle: Some(handle),
        }
    }

    /// Whether the loop is still scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the loop. A poll in flight is cancelled at its next await point.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(driver = self.driver, "poller stopped");
        }
    }
}

impl Drop for PeriodicPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run<D: Driver, H: Host>(driver: Arc<D>, host: Arc<H>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match driver.poll(host.as_ref(), now()).await {
            Ok(count) => tracing::trace!(driver = driver.name(), count, "poll complete"),
            Err(err) => {
                tracing::warn!(driver = driver.name(), %err, "poll failed, retrying next interval");
            }
        }
    }
}
