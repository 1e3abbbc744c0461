//! # sensorkit-domain
//!
//! Pure domain model shared by the sensorkit drivers and the host ports.
//!
//! ## Responsibilities
//! - Foundational types: stream paths, error conventions, timestamps
//! - Define **Readings** (timestamped scalar values emitted on a stream)
//! - Define **Stream descriptors** (unit, data type, timezone, metadata)
//! - Define **Actuator descriptors** and the capability checks the host
//!   applies before a write reaches a driver
//! - Define **State values** (loosely typed actuator input) and their coercion
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod path;
pub mod time;

pub mod actuator;
pub mod reading;
pub mod stream;
pub mod value;
