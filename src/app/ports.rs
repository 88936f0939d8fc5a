//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Medibox (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, display, buttons, clock, link,
//! event sinks) implement these traits. The [`Medibox`](super::service::Medibox)
//! service, the menu and the alarm ring sequence consume them via
//! generics, so the domain core never touches hardware directly.
//!
//! Every port is synchronous. Anything that waits (debounce, tone
//! timing, reconnect backoff) goes through [`ClockPort::delay_ms`], which
//! lets tests run blocking flows against simulated time.

use core::fmt;

use crate::error::{LinkError, SensorError, TimeError};
use crate::remote::{OutboundTopic, ParamKind, RemoteUpdate};
use crate::sensors::EnvReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Temperature (°C) and relative humidity (%) from the DHT22.
    fn read_temperature_humidity(&mut self) -> Result<EnvReading, SensorError>;

    /// Raw 12-bit LDR divider reading (0–4095).
    fn read_light_raw(&mut self) -> Result<u16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Move the shade servo. Fire-and-forget.
    fn set_servo_angle(&mut self, degrees: u8);

    /// Environmental warning LED.
    fn set_warning_led(&mut self, on: bool);

    /// Medicine alarm LED.
    fn set_alarm_led(&mut self, on: bool);

    /// Start a square-wave tone on the buzzer.
    fn tone(&mut self, freq_hz: u16);

    /// Silence the buzzer.
    fn no_tone(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Where and how a line of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clear the whole screen before drawing.
    pub clear: bool,
    pub size: u8,
    pub column: u8,
    pub row: u8,
}

impl Placement {
    /// Top-left, size 1, drawn over the current contents.
    pub const TOP: Self = Self::at(0, 0);

    pub const fn at(column: u8, row: u8) -> Self {
        Self {
            clear: false,
            size: 1,
            column,
            row,
        }
    }

    /// Same position, but wipe the screen first.
    pub const fn cleared(self) -> Self {
        Self {
            clear: true,
            ..self
        }
    }
}

/// Synchronous, unbuffered text sink (SSD1306 on the real board).
pub trait DisplayPort {
    fn print_line(&mut self, text: &str, placement: Placement);

    fn clear(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Input port
// ───────────────────────────────────────────────────────────────

/// The four front-panel buttons, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Ok,
    Cancel,
}

impl Button {
    /// Scan order used by the blocking wait primitive.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Ok, Self::Cancel];
}

/// Instantaneous button level, already translated from active-low.
pub trait InputPort {
    fn is_pressed(&mut self, button: Button) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Monotonic time, blocking delay and NTP-backed wall clock.
pub trait ClockPort {
    /// Milliseconds since boot.
    fn uptime_ms(&self) -> u64;

    /// Block the (single) control thread.
    fn delay_ms(&mut self, ms: u32);

    /// Current local time for the configured UTC offset.
    fn local_time(&mut self) -> Result<TimeOfDay, TimeError>;

    /// Reconfigure the wall clock to a new offset (minutes east of UTC).
    fn set_utc_offset(&mut self, minutes: i16);
}

// ───────────────────────────────────────────────────────────────
// Board bundle
// ───────────────────────────────────────────────────────────────

/// Everything wired to the controller board itself.
///
/// Blanket-implemented, so any adapter that satisfies the individual
/// ports is a `Board`. Blocking flows take `&mut impl Board` to avoid
/// juggling five mutable borrows.
pub trait Board: SensorPort + ActuatorPort + DisplayPort + InputPort + ClockPort {}

impl<T: SensorPort + ActuatorPort + DisplayPort + InputPort + ClockPort> Board for T {}

// ───────────────────────────────────────────────────────────────
// Link port (publish/subscribe transport)
// ───────────────────────────────────────────────────────────────

/// The MQTT-style link to the dashboard.
///
/// Implementations resolve incoming topic strings to a [`ParamKind`]
/// when the subscription is made, so the domain only ever sees typed
/// [`RemoteUpdate`]s.
pub trait LinkPort {
    fn is_connected(&self) -> bool;

    fn connect(&mut self) -> Result<(), LinkError>;

    /// Subscribe to `topic` and tag everything arriving on it with `kind`.
    fn subscribe(&mut self, topic: &str, kind: ParamKind) -> Result<(), LinkError>;

    /// Next pending inbound update, if any. Never blocks.
    fn poll(&mut self) -> Option<RemoteUpdate>;

    fn publish(&mut self, topic: OutboundTopic, payload: &str) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
