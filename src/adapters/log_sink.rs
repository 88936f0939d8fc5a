//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade. A dashboard or display adapter would implement the
//! same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | medibox running"),
            AppEvent::LightAverage(avg) => info!("LIGHT | avg={:.2}", avg),
            AppEvent::LightReportSkipped => warn!("LIGHT | no samples this period"),
            AppEvent::ServoAngle(angle) => info!("SERVO | angle={}", angle),
            AppEvent::AlarmRinging { index } => info!("ALARM | {} ringing", index + 1),
            AppEvent::AlarmSnoozed { index, hour, minute } => {
                info!("ALARM | {} snoozed until {:02}:{:02}", index + 1, hour, minute);
            }
            AppEvent::AlarmStopped { index } => info!("ALARM | {} stopped", index + 1),
            AppEvent::EnvironmentAlert(r) => {
                warn!(
                    "ENV   | out of band T={:.1}\u{00b0}C H={:.1}%",
                    r.temperature_c, r.humidity_pct
                );
            }
            AppEvent::EnvironmentNormal(r) => {
                info!(
                    "ENV   | back in band T={:.1}\u{00b0}C H={:.1}%",
                    r.temperature_c, r.humidity_pct
                );
            }
            AppEvent::ParamApplied(change) => {
                info!("PARAM | {:?} {} -> {}", change.kind, change.old, change.new);
            }
            AppEvent::ParamRejected(kind) => warn!("PARAM | {:?} rejected", kind),
            AppEvent::TimezoneChanged { label, minutes } => {
                info!("TIME  | zone {} ({} min)", label, minutes);
            }
            AppEvent::AlarmSet { index, hour, minute } => {
                info!("ALARM | {} set to {:02}:{:02}", index + 1, hour, minute);
            }
            AppEvent::AlarmDeleted { index } => info!("ALARM | {} deleted", index + 1),
            AppEvent::LinkReconnected => info!("LINK  | reconnected"),
            AppEvent::TimeUnavailable => warn!("TIME  | clock unavailable"),
        }
    }
}
