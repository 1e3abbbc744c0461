//! Actuator descriptors and capability checks.
//!
//! A driver declares what *kind* of control it offers; the host checks each
//! incoming value against that kind before the driver's `write` runs. Drivers
//! therefore never re-validate ranges themselves.

use crate::error::{DriverError, ValidationError};
use crate::path::StreamPath;
use crate::stream::DataType;
use crate::value::StateValue;

/// Capability set of an actuator.
#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorKind {
    /// On/off, accepts `0` or `1`.
    Binary,
    /// Bounded (or unbounded) numeric value.
    Continuous { bounds: Option<(f64, f64)> },
    /// Enumerated numeric code. An empty list accepts any integer.
    Discrete { states: Vec<i64> },
}

impl ActuatorKind {
    /// Continuous capability limited to `min..=max`.
    #[must_use]
    pub fn bounded(min: f64, max: f64) -> Self {
        Self::Continuous {
            bounds: Some((min, max)),
        }
    }

    /// Check that `state` is acceptable for this capability.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Coercion`] when the value has the wrong shape,
    /// or [`DriverError::Validation`] when it falls outside the capability.
    pub fn check(&self, state: &StateValue) -> Result<(), DriverError> {
        match self {
            Self::Binary => {
                let value = state.coerce_int()?;
                if value == 0 || value == 1 {
                    Ok(())
                } else {
                    Err(ValidationError::NotBinary { value }.into())
                }
            }
            Self::Continuous { bounds } => {
                let value = state.coerce_float()?;
                match bounds {
                    Some((min, max)) if !(*min..=*max).contains(&value) => {
                        Err(ValidationError::OutOfRange {
                            value,
                            min: *min,
                            max: *max,
                        }
                        .into())
                    }
                    _ => Ok(()),
                }
            }
            Self::Discrete { states } => {
                let value = state.coerce_int()?;
                if states.is_empty() || states.contains(&value) {
                    Ok(())
                } else {
                    Err(ValidationError::UnknownState { value }.into())
                }
            }
        }
    }
}

/// Registration request for an actuator.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorSpec {
    pub path: StreamPath,
    pub unit: String,
    pub data_type: DataType,
    pub kind: ActuatorKind,
    /// Stream whose readings reflect this actuator, when there is one.
    pub stream: Option<StreamPath>,
}

impl ActuatorSpec {
    /// Describe an actuator that is not attached to any stream.
    #[must_use]
    pub fn new(
        path: impl Into<StreamPath>,
        unit: impl Into<String>,
        data_type: DataType,
        kind: ActuatorKind,
    ) -> Self {
        Self {
            path: path.into(),
            unit: unit.into(),
            data_type,
            kind,
            stream: None,
        }
    }

    /// Attach the actuator to the stream it controls.
    #[must_use]
    pub fn attached_to(mut self, stream: impl Into<StreamPath>) -> Self {
        self.stream = Some(stream.into());
        self
    }
}
