//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DriverError`]
//! at port boundaries.

use crate::path::StreamPath;
use crate::stream::DataType;
use crate::value::StateValue;

/// Error returned across driver and host ports.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("invalid actuator input")]
    Coercion(#[from] CoercionError),

    /// Failure talking to the physical (or simulated) device.
    #[error("device error")]
    Device(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A registration, reading or actuator value broke an invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{path} is already registered")]
    AlreadyRegistered { path: StreamPath },

    #[error("{path} carries {expected} readings, got {actual}")]
    DataTypeMismatch {
        path: StreamPath,
        expected: DataType,
        actual: DataType,
    },

    #[error("{value} is not a binary state")]
    NotBinary { value: i64 },

    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("{value} is not an allowed state")]
    UnknownState { value: i64 },
}

/// Lookup of a registered stream or actuator failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{entity} {path} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub path: StreamPath,
}

/// An actuator input could not be coerced to the stored type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot coerce {value} to {target}")]
pub struct CoercionError {
    pub value: StateValue,
    pub target: &'static str,
}
