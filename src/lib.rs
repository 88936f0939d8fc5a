//! Medibox controller library.
//!
//! Exposes the pure-logic core (alarms, menu, environmental monitor,
//! shade control law, remote parameters) behind port traits, plus the
//! `embedded-hal` drivers and the host adapters used by the simulator.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarm;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod menu;
pub mod monitor;
pub mod remote;
pub mod scheduler;
pub mod sensors;
pub mod timezone;

pub use error::Error;
