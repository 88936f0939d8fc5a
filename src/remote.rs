//! Remote parameter channel.
//!
//! The dashboard pushes control parameters as plain-text payloads on one
//! topic per parameter. Each topic is resolved to a [`ParamKind`] once, at
//! subscription time; from then on the core only deals in typed updates.
//!
//! Validation is thin. `ts` must parse as a positive integer; everything
//! else is applied on any successful numeric parse, with decimal payloads
//! truncated toward zero for the integer parameters. A rejected payload
//! leaves the previous value in place.

use core::fmt::{self, Write};

use crate::config::ControlParams;

/// Capacity of a full topic string (prefix + suffix).
pub const TOPIC_CAPACITY: usize = 48;
/// Capacity of a parameter payload.
pub const PAYLOAD_CAPACITY: usize = 32;

pub type Topic = heapless::String<TOPIC_CAPACITY>;
pub type Payload = heapless::String<PAYLOAD_CAPACITY>;

// ───────────────────────────────────────────────────────────────
// Inbound
// ───────────────────────────────────────────────────────────────

/// The five remotely tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    SamplingInterval,
    ReportingPeriod,
    ServoOffset,
    Gain,
    ReferenceTemperature,
}

impl ParamKind {
    /// Subscription order.
    pub const ALL: [Self; 5] = [
        Self::SamplingInterval,
        Self::ReportingPeriod,
        Self::ServoOffset,
        Self::Gain,
        Self::ReferenceTemperature,
    ];

    /// Last path segment of the parameter's topic.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::SamplingInterval => "ts",
            Self::ReportingPeriod => "tu",
            Self::ServoOffset => "theta",
            Self::Gain => "y",
            Self::ReferenceTemperature => "itemp",
        }
    }

    /// `prefix` + suffix. `None` if it does not fit.
    pub fn topic(self, prefix: &str) -> Option<Topic> {
        let mut topic = Topic::new();
        topic.push_str(prefix).ok()?;
        topic.push_str(self.suffix()).ok()?;
        Some(topic)
    }
}

/// A payload received on a parameter topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUpdate {
    pub kind: ParamKind,
    pub payload: Payload,
}

impl RemoteUpdate {
    /// Build an update from raw bytes. Payloads that are not UTF-8 or do
    /// not fit are replaced by an empty string, which never parses.
    pub fn from_bytes(kind: ParamKind, bytes: &[u8]) -> Self {
        let mut payload = Payload::new();
        if let Ok(text) = core::str::from_utf8(bytes) {
            if payload.push_str(text).is_err() {
                log::warn!("{:?} payload longer than {} bytes", kind, PAYLOAD_CAPACITY);
                payload.clear();
            }
        }
        Self { kind, payload }
    }
}

/// Value of one parameter before or after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Int(i32),
    Float(f32),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Successful update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    pub kind: ParamKind,
    pub old: ParamValue,
    pub new: ParamValue,
}

/// The payload did not pass validation; nothing was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamRejected {
    pub kind: ParamKind,
}

/// Current value of `kind` in `params`.
pub fn current(params: &ControlParams, kind: ParamKind) -> ParamValue {
    match kind {
        ParamKind::SamplingInterval => {
            ParamValue::Int(i32::try_from(params.sampling_interval_s).unwrap_or(i32::MAX))
        }
        ParamKind::ReportingPeriod => ParamValue::Int(params.reporting_period_s),
        ParamKind::ServoOffset => ParamValue::Int(params.servo_offset_deg),
        ParamKind::Gain => ParamValue::Float(params.gain),
        ParamKind::ReferenceTemperature => ParamValue::Int(params.reference_temperature_c),
    }
}

/// Parse `payload` for `kind` and write it into `params`.
pub fn apply(
    params: &mut ControlParams,
    kind: ParamKind,
    payload: &str,
) -> Result<ParamChange, ParamRejected> {
    let text = payload.trim();
    let rejected = ParamRejected { kind };
    let old = current(params, kind);

    match kind {
        ParamKind::SamplingInterval => {
            let v: u32 = text.parse().map_err(|_| rejected)?;
            if v == 0 {
                return Err(rejected);
            }
            params.sampling_interval_s = v;
        }
        ParamKind::ReportingPeriod => {
            params.reporting_period_s = parse_truncated(text).ok_or(rejected)?;
        }
        ParamKind::ServoOffset => {
            params.servo_offset_deg = parse_truncated(text).ok_or(rejected)?;
        }
        ParamKind::Gain => {
            let v: f32 = text.parse().map_err(|_| rejected)?;
            if v.is_nan() {
                return Err(rejected);
            }
            params.gain = v;
        }
        ParamKind::ReferenceTemperature => {
            params.reference_temperature_c = parse_truncated(text).ok_or(rejected)?;
        }
    }

    Ok(ParamChange {
        kind,
        old,
        new: current(params, kind),
    })
}

/// Integer payload, or a decimal one truncated toward zero (`"27.5"` → 27).
/// Out-of-range values saturate.
fn parse_truncated(text: &str) -> Option<i32> {
    if let Ok(v) = text.parse::<i32>() {
        return Some(v);
    }
    let v: f32 = text.parse().ok()?;
    if v.is_nan() {
        return None;
    }
    Some(v as i32)
}

// ───────────────────────────────────────────────────────────────
// Outbound
// ───────────────────────────────────────────────────────────────

/// Topics the device publishes readings on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundTopic {
    Ldr,
    Temperature,
    Humidity,
}

impl OutboundTopic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ldr => "medibox/ldr",
            Self::Temperature => "medibox/temperature",
            Self::Humidity => "medibox/humidity",
        }
    }
}

/// Fixed-point text for a published reading.
pub fn format_reading(value: f32, decimals: usize) -> Payload {
    let mut out = Payload::new();
    // A finite f32 with ≤ 2 decimals always fits in 32 bytes.
    let _ = write!(out, "{:.*}", decimals, value);
    out
}
