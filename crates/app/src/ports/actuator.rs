//! Actuator port: the one read/write capability every actuator implements.
//!
//! Actuators are stored by the host as trait objects, so this trait uses
//! `async_trait` rather than `impl Future` returns.

use async_trait::async_trait;

use sensorkit_domain::error::DriverError;
use sensorkit_domain::value::StateValue;

/// A controllable property exposed by a driver.
///
/// Capability checks (binary, bounded, enumerated) are applied by the host
/// before [`write`](Self::write) is called; implementations store what they
/// receive.
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Current value, or `None` when the device cannot report one.
    async fn read(&self) -> Result<Option<StateValue>, DriverError>;

    /// Apply `state`, returning the value now in effect when it is known.
    async fn write(&self, state: StateValue) -> Result<Option<StateValue>, DriverError>;
}
