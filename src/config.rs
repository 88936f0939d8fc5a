//! System configuration parameters
//!
//! Two groups of tunables live here:
//!
//! - [`MediboxConfig`]: static behaviour (safety bands, cadences, tones).
//!   Loaded once at boot from JSON or taken from [`Default`].
//! - [`ControlParams`]: the light-control parameters that the remote
//!   dashboard may rewrite at runtime (see [`crate::remote`]).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive safe band for one environmental metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f32,
    pub high: f32,
}

impl Band {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }
}

/// Remote-tunable control parameters.
///
/// Field types mirror what each remote topic accepts: integers for the
/// timing, offset and reference-temperature topics, a float for the gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlParams {
    /// Light sampling interval in seconds (always > 0).
    pub sampling_interval_s: u32,
    /// Light averaging / reporting period in seconds.
    pub reporting_period_s: i32,
    /// Servo angle at zero light (degrees).
    pub servo_offset_deg: i32,
    /// Controlling factor applied to the light term.
    pub gain: f32,
    /// Ideal storage temperature (°C) used to scale the light term.
    pub reference_temperature_c: i32,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            sampling_interval_s: 5,
            reporting_period_s: 120,
            servo_offset_deg: 30,
            gain: 0.75,
            reference_temperature_c: 30,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediboxConfig {
    // --- Environment ---
    /// Safe storage temperature band (°C)
    pub temperature_band: Band,
    /// Safe storage humidity band (% RH)
    pub humidity_band: Band,
    /// Warning blink half-period (milliseconds)
    pub warning_blink_ms: u32,
    /// Warning buzzer frequency (Hz)
    pub warning_tone_hz: u16,
    /// Readings publish cadence while in band (milliseconds)
    pub env_publish_interval_ms: u32,

    // --- Actuation ---
    /// Servo recompute cadence (milliseconds)
    pub servo_period_ms: u32,

    // --- Alarms ---
    /// Minutes added by a snooze
    pub snooze_minutes: u8,
    /// Ascending ring melody (Hz)
    pub ring_tones_hz: [u16; 8],
    /// How long each ring tone sounds (milliseconds)
    pub ring_tone_ms: u32,
    /// Silent gap after each ring tone (milliseconds)
    pub ring_gap_ms: u32,

    // --- Input ---
    /// Post-press debounce delay (milliseconds)
    pub debounce_ms: u32,
    /// Button scan period while waiting for input (milliseconds)
    pub button_poll_ms: u32,
    /// How long confirmation screens stay up (milliseconds)
    pub feedback_hold_ms: u32,

    // --- Link ---
    /// Fixed backoff between broker connection attempts (milliseconds)
    pub link_retry_ms: u32,
    /// Prefix prepended to every parameter topic suffix
    pub param_topic_prefix: heapless::String<32>,

    // --- Time ---
    /// Label of the UTC offset selected at boot (must be in the table)
    pub default_utc_offset: heapless::String<12>,

    // --- Control ---
    /// Control parameters in force until the dashboard overrides them
    pub control: ControlParams,
}

impl Default for MediboxConfig {
    fn default() -> Self {
        let mut param_topic_prefix = heapless::String::new();
        let _ = param_topic_prefix.push_str("medibox/nodeRed/");
        let mut default_utc_offset = heapless::String::new();
        let _ = default_utc_offset.push_str("UTC+05:30");

        Self {
            // Environment
            temperature_band: Band::new(24.0, 32.0),
            humidity_band: Band::new(65.0, 80.0),
            warning_blink_ms: 500,
            warning_tone_hz: 262,
            env_publish_interval_ms: 5_000,

            // Actuation
            servo_period_ms: 500,

            // Alarms
            snooze_minutes: 5,
            ring_tones_hz: [262, 294, 330, 349, 392, 440, 494, 523],
            ring_tone_ms: 500,
            ring_gap_ms: 200,

            // Input
            debounce_ms: 200,
            button_poll_ms: 10,
            feedback_hold_ms: 1_000,

            // Link
            link_retry_ms: 500,
            param_topic_prefix,

            // Time
            default_utc_offset,

            // Control
            control: ControlParams::default(),
        }
    }
}

impl MediboxConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep their
    /// defaults. The result is validated before it is returned.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|e| {
            log::warn!("Config parse error: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field that the control loop divides by, waits on
    /// or compares against.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature_band.low >= self.temperature_band.high {
            return Err(ConfigError::ValidationFailed(
                "temperature_band.low must be below temperature_band.high",
            ));
        }
        if self.humidity_band.low >= self.humidity_band.high {
            return Err(ConfigError::ValidationFailed(
                "humidity_band.low must be below humidity_band.high",
            ));
        }
        if self.servo_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("servo_period_ms must be > 0"));
        }
        if self.button_poll_ms == 0 {
            return Err(ConfigError::ValidationFailed("button_poll_ms must be > 0"));
        }
        if self.warning_blink_ms == 0 {
            return Err(ConfigError::ValidationFailed("warning_blink_ms must be > 0"));
        }
        if self.link_retry_ms == 0 {
            return Err(ConfigError::ValidationFailed("link_retry_ms must be > 0"));
        }
        if self.snooze_minutes == 0 || self.snooze_minutes >= 60 {
            return Err(ConfigError::ValidationFailed("snooze_minutes must be in 1..60"));
        }
        if self.control.sampling_interval_s == 0 {
            return Err(ConfigError::ValidationFailed(
                "control.sampling_interval_s must be > 0",
            ));
        }
        if crate::timezone::find(&self.default_utc_offset).is_none() {
            return Err(ConfigError::ValidationFailed(
                "default_utc_offset is not a known UTC offset label",
            ));
        }
        Ok(())
    }
}
