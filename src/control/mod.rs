//! Closed-loop actuation.

pub mod servo_law;
