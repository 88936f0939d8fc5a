//! Environmental monitor.
//!
//! Keeps the medicine inside its safe storage band. While temperature or
//! humidity is out of band the monitor owns the control thread. It shows
//! which metric is off, blinks the warning LED with the buzzer and keeps
//! the dashboard fed until both values return.

use core::fmt::Write;

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{Board, EventSink, LinkPort, Placement};
use crate::config::{Band, MediboxConfig};
use crate::remote::{OutboundTopic, format_reading};
use crate::sensors::EnvReading;

/// Position of a value relative to its safe band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Normal,
    Low,
    High,
}

impl Level {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Low => "LOW",
            Self::High => "HIGH",
        }
    }
}

/// Compare `value` against `[low, high]`. The edges are in band.
pub fn classify(value: f32, low: f32, high: f32) -> Level {
    if value < low {
        Level::Low
    } else if value > high {
        Level::High
    } else {
        Level::Normal
    }
}

fn classify_band(value: f32, band: Band) -> Level {
    classify(value, band.low, band.high)
}

fn show_level(board: &mut impl Board, metric: &str, level: Level, row: u8) {
    let mut line: heapless::String<16> = heapless::String::new();
    let _ = write!(line, "{} {}", metric, level.label());
    board.print_line(&line, Placement::at(0, row));
}

/// Publish both readings. Failures are dropped; the link reconnects on
/// its own schedule.
pub fn publish_readings(link: &mut impl LinkPort, reading: EnvReading) {
    let pairs = [
        (OutboundTopic::Temperature, reading.temperature_c),
        (OutboundTopic::Humidity, reading.humidity_pct),
    ];
    for (topic, value) in pairs {
        if let Err(e) = link.publish(topic, &format_reading(value, 1)) {
            debug!("{} not published: {}", topic.as_str(), e);
        }
    }
}

/// Sensor read path plus the blocking alert loop.
#[derive(Debug, Default)]
pub struct EnvironmentalMonitor {
    last: Option<EnvReading>,
}

impl EnvironmentalMonitor {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Most recent good reading.
    pub fn last_reading(&self) -> Option<EnvReading> {
        self.last
    }

    /// Read the DHT22. A failed read falls back to the last good value.
    pub fn sample(&mut self, board: &mut impl Board) -> Option<EnvReading> {
        match board.read_temperature_humidity().and_then(EnvReading::validated) {
            Ok(reading) => {
                self.last = Some(reading);
            }
            Err(e) => warn!("DHT22 read failed: {}", e),
        }
        self.last
    }

    /// Whether `reading` is inside both bands.
    pub fn in_band(config: &MediboxConfig, reading: EnvReading) -> bool {
        classify_band(reading.temperature_c, config.temperature_band) == Level::Normal
            && classify_band(reading.humidity_pct, config.humidity_band) == Level::Normal
    }

    /// Read the sensors; if out of band, block until both metrics recover.
    ///
    /// Returns the reading that ended the check, or `None` if the sensor
    /// has never produced a valid sample.
    pub fn check(
        &mut self,
        board: &mut impl Board,
        link: &mut impl LinkPort,
        config: &MediboxConfig,
        sink: &mut impl EventSink,
    ) -> Option<EnvReading> {
        let mut reading = self.sample(board)?;
        if Self::in_band(config, reading) {
            return Some(reading);
        }

        warn!(
            "Storage out of band: {:.1}\u{00b0}C {:.1}%",
            reading.temperature_c, reading.humidity_pct
        );
        sink.emit(&AppEvent::EnvironmentAlert(reading));

        let mut blink_counter: u32 = 0;
        loop {
            board.clear();
            let temp = classify_band(reading.temperature_c, config.temperature_band);
            if temp != Level::Normal {
                show_level(board, "TEMP", temp, 10);
            }
            let humid = classify_band(reading.humidity_pct, config.humidity_band);
            if humid != Level::Normal {
                show_level(board, "HUMID", humid, 30);
            }

            blink_counter = blink_counter.wrapping_add(1);
            if blink_counter % 2 == 0 {
                board.set_warning_led(true);
                board.tone(config.warning_tone_hz);
            } else {
                board.set_warning_led(false);
                board.no_tone();
            }

            board.delay_ms(config.warning_blink_ms);

            // sample() only returns None before the first good read
            reading = self.sample(board).unwrap_or(reading);
            publish_readings(link, reading);
            if Self::in_band(config, reading) {
                break;
            }
        }

        board.set_warning_led(false);
        board.no_tone();
        board.clear();
        info!(
            "Storage back in band: {:.1}\u{00b0}C {:.1}%",
            reading.temperature_c, reading.humidity_pct
        );
        sink.emit(&AppEvent::EnvironmentNormal(reading));
        Some(reading)
    }
}
