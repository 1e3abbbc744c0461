//! Host port: what a driver may ask of the framework that loads it.
//!
//! The host owns timeseries storage, actuator life-cycle and metadata. A
//! driver only registers descriptors during setup and emits readings while
//! polling.

use std::future::Future;

use sensorkit_domain::actuator::ActuatorSpec;
use sensorkit_domain::error::DriverError;
use sensorkit_domain::path::StreamPath;
use sensorkit_domain::reading::Reading;
use sensorkit_domain::stream::{Metadata, TimeseriesSpec};

use super::Actuator;

/// Framework services available to drivers.
pub trait Host: Send + Sync {
    /// Register a timeseries.
    fn add_timeseries(
        &self,
        spec: TimeseriesSpec,
    ) -> impl Future<Output = Result<(), DriverError>> + Send;

    /// Register an actuator. The host checks every incoming value against
    /// `spec.kind` before calling [`Actuator::write`].
    fn add_actuator(
        &self,
        spec: ActuatorSpec,
        actuator: Box<dyn Actuator>,
    ) -> impl Future<Output = Result<(), DriverError>> + Send;

    /// Merge `metadata` into whatever is already attached to `path`.
    fn set_metadata(
        &self,
        path: &StreamPath,
        metadata: Metadata,
    ) -> impl Future<Output = Result<(), DriverError>> + Send;

    /// Emit a reading on a registered stream.
    fn add(
        &self,
        path: &StreamPath,
        reading: Reading,
    ) -> impl Future<Output = Result<(), DriverError>> + Send;
}
