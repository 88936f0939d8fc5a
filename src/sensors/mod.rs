//! Sensor value types and the normalisation applied by the core.
//!
//! The adapters deliver raw values; everything here is pure arithmetic so
//! it can be tested on the host.

pub mod light;

pub use light::{IntensityAccumulator, intensity_from_raw};

use crate::error::SensorError;

/// One DHT22 sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvReading {
    /// Air temperature (°C).
    pub temperature_c: f32,
    /// Relative humidity (%).
    pub humidity_pct: f32,
}

impl EnvReading {
    pub const fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            temperature_c,
            humidity_pct,
        }
    }

    /// Reject the NaN pair the DHT driver returns after a checksum or
    /// timing failure, and values outside the DHT22's rated range.
    pub fn validated(self) -> Result<Self, SensorError> {
        if self.temperature_c.is_nan() || self.humidity_pct.is_nan() {
            return Err(SensorError::ReadFailed);
        }
        if !(-40.0..=80.0).contains(&self.temperature_c)
            || !(0.0..=100.0).contains(&self.humidity_pct)
        {
            return Err(SensorError::OutOfRange);
        }
        Ok(self)
    }
}
