//! Driver port: lifecycle and polling for device drivers.
//!
//! A driver bridges one device (real or simulated) into the host. It
//! registers its streams and actuators once, then reports readings every
//! time it is polled.

use std::future::Future;
use std::time::Duration;

use sensorkit_domain::error::DriverError;
use sensorkit_domain::time::Timestamp;

use super::Host;

/// A pluggable device driver.
///
/// Implementations live in adapter crates (e.g. `adapter_virtual_light`).
/// The composition root calls the lifecycle methods in order:
///
/// 1. [`setup`](Self::setup): register streams, actuators and metadata
/// 2. [`poll`](Self::poll): every [`poll_interval`](Self::poll_interval),
///    driven by [`PeriodicPoller`](crate::poller::PeriodicPoller)
///
/// # Serialisation
///
/// Callers must not run two `poll`s of the same driver concurrently;
/// `PeriodicPoller` guarantees this. A poll may run while an actuator
/// writes. Drivers keep shared state behind a mutex so each single write
/// stays consistent, and ordering between writes is left to callers.
pub trait Driver: Send + Sync {
    /// Unique name identifying this driver (e.g. `"virtual_light"`).
    fn name(&self) -> &'static str;

    /// Period between two polls.
    fn poll_interval(&self) -> Duration;

    /// Register streams, actuators and metadata with `host`.
    fn setup(
        &mut self,
        host: &impl Host,
    ) -> impl Future<Output = Result<(), DriverError>> + Send;

    /// Run one poll cycle, stamping every reading with `at`.
    ///
    /// Returns the number of readings emitted.
    fn poll(
        &self,
        host: &impl Host,
        at: Timestamp,
    ) -> impl Future<Output = Result<usize, DriverError>> + Send;
}
