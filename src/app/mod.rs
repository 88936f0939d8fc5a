//! Application core. Pure domain logic, no I/O.
//!
//! The control loop, alarm ringing, menu and environmental monitor all
//! reach hardware through the **port traits** in [`ports`], so this layer
//! is fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
