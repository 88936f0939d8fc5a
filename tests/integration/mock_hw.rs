//! Mock adapters for integration tests.
//!
//! [`MockBoard`] records every actuator and display call and runs on a
//! simulated millisecond clock that only moves when the code under test
//! calls `delay_ms` (or the test calls [`MockBoard::advance`]). Button
//! presses are queued with a due time and consumed in order.

use std::collections::VecDeque;

use medibox::app::events::AppEvent;
use medibox::app::ports::{
    ActuatorPort, Button, ClockPort, DisplayPort, EventSink, InputPort, LinkPort, Placement,
    SensorPort, TimeOfDay,
};
use medibox::error::{LinkError, SensorError, TimeError};
use medibox::remote::{OutboundTopic, ParamKind, RemoteUpdate};
use medibox::sensors::EnvReading;

// ── Board call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum BoardCall {
    Servo(u8),
    WarningLed(bool),
    AlarmLed(bool),
    Tone(u16),
    NoTone,
    Print { text: String, placement: Placement },
    Clear,
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub now_ms: u64,
    /// Simulated time past which the test is considered hung.
    pub horizon_ms: u64,
    pub calls: Vec<BoardCall>,
    /// `(from_ms, result)`; the latest entry due applies.
    pub env_schedule: Vec<(u64, Result<EnvReading, SensorError>)>,
    pub light_raw: u16,
    pub light_reads: u32,
    /// Local seconds-of-day at `now_ms == 0`; `None` = clock not synced.
    pub wall_start_secs: Option<u32>,
    pub utc_offset: Option<i16>,
    presses: VecDeque<(u64, Button)>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            horizon_ms: 60 * 60 * 1_000,
            calls: Vec::new(),
            env_schedule: vec![(0, Ok(EnvReading::new(28.0, 70.0)))],
            light_raw: 2_000,
            light_reads: 0,
            wall_start_secs: Some(12 * 3_600),
            utc_offset: None,
            presses: VecDeque::new(),
        }
    }

    pub fn with_wall_clock(mut self, hour: u32, minute: u32, second: u32) -> Self {
        self.wall_start_secs = Some(hour * 3_600 + minute * 60 + second);
        self
    }

    /// Queue presses that are due immediately, consumed in order.
    pub fn queue(&mut self, buttons: &[Button]) {
        for &b in buttons {
            self.presses.push_back((0, b));
        }
    }

    /// Queue a press that becomes visible at `at_ms`.
    pub fn press_at(&mut self, at_ms: u64, button: Button) {
        self.presses.push_back((at_ms, button));
    }

    pub fn pending_presses(&self) -> usize {
        self.presses.len()
    }

    pub fn env_from(&mut self, at_ms: u64, reading: Result<EnvReading, SensorError>) {
        self.env_schedule.push((at_ms, reading));
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        assert!(
            self.now_ms <= self.horizon_ms,
            "simulated time ran past the horizon ({} ms)",
            self.horizon_ms
        );
    }

    pub fn printed(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BoardCall::Print { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn printed_at(&self, text: &str) -> Option<Placement> {
        self.calls.iter().find_map(|c| match c {
            BoardCall::Print { text: t, placement } if t == text => Some(*placement),
            _ => None,
        })
    }

    pub fn tones(&self) -> Vec<u16> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BoardCall::Tone(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn servo_angles(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BoardCall::Servo(a) => Some(*a),
                _ => None,
            })
            .collect()
    }

    pub fn last_warning_led(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            BoardCall::WarningLed(on) => Some(*on),
            _ => None,
        })
    }

    pub fn last_alarm_led(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            BoardCall::AlarmLed(on) => Some(*on),
            _ => None,
        })
    }

    /// Whether the buzzer is sounding after the recorded calls.
    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                BoardCall::Tone(_) => Some(true),
                BoardCall::NoTone => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockBoard {
    fn read_temperature_humidity(&mut self) -> Result<EnvReading, SensorError> {
        self.env_schedule
            .iter()
            .rev()
            .find(|(at, _)| *at <= self.now_ms)
            .map_or(Err(SensorError::ReadFailed), |(_, r)| *r)
    }

    fn read_light_raw(&mut self) -> Result<u16, SensorError> {
        self.light_reads += 1;
        Ok(self.light_raw)
    }
}

impl ActuatorPort for MockBoard {
    fn set_servo_angle(&mut self, degrees: u8) {
        self.calls.push(BoardCall::Servo(degrees));
    }

    fn set_warning_led(&mut self, on: bool) {
        self.calls.push(BoardCall::WarningLed(on));
    }

    fn set_alarm_led(&mut self, on: bool) {
        self.calls.push(BoardCall::AlarmLed(on));
    }

    fn tone(&mut self, freq_hz: u16) {
        self.calls.push(BoardCall::Tone(freq_hz));
    }

    fn no_tone(&mut self) {
        self.calls.push(BoardCall::NoTone);
    }
}

impl DisplayPort for MockBoard {
    fn print_line(&mut self, text: &str, placement: Placement) {
        self.calls.push(BoardCall::Print {
            text: text.to_owned(),
            placement,
        });
    }

    fn clear(&mut self) {
        self.calls.push(BoardCall::Clear);
    }
}

impl InputPort for MockBoard {
    fn is_pressed(&mut self, button: Button) -> bool {
        match self.presses.front() {
            Some(&(at, b)) if at <= self.now_ms && b == button => {
                self.presses.pop_front();
                true
            }
            _ => false,
        }
    }
}

impl ClockPort for MockBoard {
    fn uptime_ms(&self) -> u64 {
        self.now_ms
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }

    fn local_time(&mut self) -> Result<TimeOfDay, TimeError> {
        let start = self.wall_start_secs.ok_or(TimeError::NotSynced)?;
        let secs = (u64::from(start) + self.now_ms / 1_000) % 86_400;
        Ok(TimeOfDay::new(
            (secs / 3_600) as u8,
            (secs % 3_600 / 60) as u8,
            (secs % 60) as u8,
        ))
    }

    fn set_utc_offset(&mut self, minutes: i16) {
        self.utc_offset = Some(minutes);
    }
}

// ── MockLink ──────────────────────────────────────────────────

pub struct MockLink {
    pub connected: bool,
    /// Connection attempts that fail before one succeeds.
    pub connect_failures: u32,
    pub connect_attempts: u32,
    pub subscriptions: Vec<(String, ParamKind)>,
    pub inbound: VecDeque<RemoteUpdate>,
    pub published: Vec<(OutboundTopic, String)>,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self {
            connected: false,
            connect_failures: 0,
            connect_attempts: 0,
            subscriptions: Vec::new(),
            inbound: VecDeque::new(),
            published: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: ParamKind, payload: &str) {
        self.inbound.push_back(RemoteUpdate::from_bytes(kind, payload.as_bytes()));
    }

    pub fn drop_connection(&mut self) {
        self.connected = false;
    }

    pub fn published_on(&self, topic: OutboundTopic) -> Vec<&str> {
        self.published
            .iter()
            .filter(|(t, _)| *t == topic)
            .map(|(_, p)| p.as_str())
            .collect()
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkPort for MockLink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self) -> Result<(), LinkError> {
        self.connect_attempts += 1;
        if self.connect_failures > 0 {
            self.connect_failures -= 1;
            return Err(LinkError::ConnectFailed);
        }
        self.subscriptions.clear();
        self.connected = true;
        Ok(())
    }

    fn subscribe(&mut self, topic: &str, kind: ParamKind) -> Result<(), LinkError> {
        if !self.connected {
            return Err(LinkError::Disconnected);
        }
        self.subscriptions.push((topic.to_owned(), kind));
        Ok(())
    }

    fn poll(&mut self) -> Option<RemoteUpdate> {
        if !self.connected {
            return None;
        }
        self.inbound.pop_front()
    }

    fn publish(&mut self, topic: OutboundTopic, payload: &str) -> Result<(), LinkError> {
        if !self.connected {
            return Err(LinkError::Disconnected);
        }
        self.published.push((topic, payload.to_owned()));
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
