//! Readings: timestamped scalar values emitted on a stream.

use serde::{Deserialize, Serialize};

use crate::stream::DataType;
use crate::time::Timestamp;

/// The scalar carried by a [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Long(i64),
    Double(f64),
}

impl ReadingValue {
    /// The stream data type this value belongs to.
    #[must_use]
    pub fn data_type(self) -> DataType {
        match self {
            Self::Long(_) => DataType::Long,
            Self::Double(_) => DataType::Double,
        }
    }

    /// Widen to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Long(value) => value as f64,
            Self::Double(value) => value,
        }
    }
}

impl From<i64> for ReadingValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for ReadingValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

/// A single timestamped value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: Timestamp,
    pub value: ReadingValue,
}

impl Reading {
    /// Create a reading at `timestamp`.
    #[must_use]
    pub fn new(timestamp: Timestamp, value: impl Into<ReadingValue>) -> Self {
        Self {
            timestamp,
            value: value.into(),
        }
    }
}
