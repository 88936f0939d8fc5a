//! Outbound application events.
//!
//! The [`Medibox`](super::service::Medibox) service, the menu and the ring
//! sequence emit these through the [`EventSink`](super::ports::EventSink)
//! port. Adapters on the other side decide what to do with them.

use crate::remote::{ParamChange, ParamKind};
use crate::sensors::EnvReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started.
    Started,

    /// A reporting period closed with this average light intensity.
    LightAverage(f32),

    /// A reporting period closed without any samples.
    LightReportSkipped,

    /// The shade servo was commanded to a new angle.
    ServoAngle(i32),

    /// Alarm slot `index` started ringing.
    AlarmRinging { index: usize },

    /// The user snoozed the alarm; it will ring again at `hour:minute`.
    AlarmSnoozed { index: usize, hour: u8, minute: u8 },

    /// The user stopped the alarm.
    AlarmStopped { index: usize },

    /// Temperature or humidity left its safe band.
    EnvironmentAlert(EnvReading),

    /// Both metrics are back in band.
    EnvironmentNormal(EnvReading),

    /// A remote parameter update was applied.
    ParamApplied(ParamChange),

    /// A remote parameter update was ignored.
    ParamRejected(ParamKind),

    /// A new UTC offset was committed from the menu.
    TimezoneChanged { label: &'static str, minutes: i16 },

    /// An alarm slot was (re)configured from the menu.
    AlarmSet { index: usize, hour: u8, minute: u8 },

    /// An alarm slot was cleared from the menu.
    AlarmDeleted { index: usize },

    /// The link came back after an outage.
    LinkReconnected,

    /// The wall clock could not be read this tick.
    TimeUnavailable,
}
