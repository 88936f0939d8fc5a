//! Actuator and input drivers over `embedded-hal` 1.0 traits.

pub mod buttons;
pub mod indicator;
pub mod servo;

pub use buttons::ButtonPad;
pub use indicator::Indicator;
pub use servo::ServoDriver;
