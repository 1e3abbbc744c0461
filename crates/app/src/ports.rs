//! Port definitions: traits at the seam between drivers and their host.
//!
//! They are defined here (in `app`) so that both the host side and the
//! adapter crates can depend on them without creating circular dependencies.

pub mod actuator;
pub mod driver;
pub mod host;

pub use actuator::Actuator;
pub use driver::Driver;
pub use host::Host;
