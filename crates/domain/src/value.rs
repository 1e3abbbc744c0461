//! Loosely typed values written to actuators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoercionError;

/// A single value handed to an actuator `write`.
///
/// Callers send whatever they have (a JSON number, a form string, a
/// checkbox); drivers coerce it to the type they store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl StateValue {
    /// Coerce to an integer.
    ///
    /// Booleans map to `0`/`1`, finite floats are truncated toward zero and
    /// strings are parsed after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] for non-finite floats and strings that are
    /// not integer literals.
    #[allow(clippy::cast_possible_truncation)]
    pub fn coerce_int(&self) -> Result<i64, CoercionError> {
        match self {
            Self::Bool(flag) => Ok(i64::from(*flag)),
            Self::Int(value) => Ok(*value),
            Self::Float(value) if value.is_finite() => Ok(value.trunc() as i64),
            Self::String(text) => text
                .trim()
                .parse()
                .map_err(|_| self.coercion_error("integer")),
            Self::Float(_) => Err(self.coercion_error("integer")),
        }
    }

    /// Coerce to a float.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError`] for non-finite floats and strings that are
    /// not numeric literals.
    #[allow(clippy::cast_precision_loss)]
    pub fn coerce_float(&self) -> Result<f64, CoercionError> {
        match self {
            Self::Bool(flag) => Ok(f64::from(u8::from(*flag))),
            Self::Int(value) => Ok(*value as f64),
            Self::Float(value) if value.is_finite() => Ok(*value),
            Self::String(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| self.coercion_error("float")),
            Self::Float(_) => Err(self.coercion_error("float")),
        }
    }

    fn coercion_error(&self, target: &'static str) -> CoercionError {
        CoercionError {
            value: self.clone(),
            target,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(text) => write!(f, "{text:?}"),
        }
    }
}

impl From<bool> for StateValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i32> for StateValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for StateValue {
    fn from(text: &str) -> Self {
        Self::String(text.to_string())
    }
}

impl From<String> for StateValue {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}
