//! # sensorkit-app
//!
//! Application layer: **port definitions** (traits) plus the small amount of
//! in-process infrastructure needed to run drivers.
//!
//! ## Responsibilities
//! - Define the **driven port** drivers call into:
//!   - `Host`: register streams and actuators, attach metadata, emit readings
//! - Define the **driver-side ports** a host calls:
//!   - `Driver`: setup and periodic poll
//!   - `Actuator`: read/write a single controllable property
//! - Provide **in-process infrastructure** that doesn't need IO:
//!   - `InProcessHost`: registration bookkeeping and reading fan-out
//!   - `PeriodicPoller`: serialised fixed-period poll loop
//!
//! ## Dependency rule
//! Depends on `sensorkit-domain` only (plus `tokio` for tasks and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod host;
pub mod poller;
pub mod ports;
