//! Stream descriptors registered with the host.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::StreamPath;

/// Key/value metadata attached to a path (e.g. `Location/Uri`).
pub type Metadata = BTreeMap<String, String>;

/// Scalar type of every reading on a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Long,
    Double,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => f.write_str("long"),
            Self::Double => f.write_str("double"),
        }
    }
}

/// Registration request for a timeseries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeseriesSpec {
    pub path: StreamPath,
    /// Human-readable unit (`"C"`, `"rh"`, `"Brightness"`, …).
    pub unit: String,
    pub data_type: DataType,
    /// IANA timezone the readings should be rendered in, if any.
    pub timezone: Option<String>,
}

impl TimeseriesSpec {
    /// Describe a stream without a timezone.
    #[must_use]
    pub fn new(path: impl Into<StreamPath>, unit: impl Into<String>, data_type: DataType) -> Self {
        Self {
            path: path.into(),
            unit: unit.into(),
            data_type,
            timezone: None,
        }
    }

    /// Attach a timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}
