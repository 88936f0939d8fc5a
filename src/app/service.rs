//! Application service, the hexagonal core.
//!
//! [`Medibox`] owns the control parameters, the alarm store, the menu and
//! the monitor state. All I/O flows through port traits injected at call
//! sites, so the whole service runs against mock adapters in tests.
//!
//! ```text
//!   Board ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!             │          Medibox          │
//!  LinkPort ◀▶│ light · servo · alarms    │
//!             │ monitor · menu            │
//!             └───────────────────────────┘
//! ```

use core::fmt::Write;

use log::{debug, info, warn};

use crate::alarm::AlarmStore;
use crate::alarm::ring::ring;
use crate::config::{ControlParams, MediboxConfig};
use crate::control::servo_law::{MAX_ANGLE, compute_angle};
use crate::menu::Menu;
use crate::monitor::{EnvironmentalMonitor, publish_readings};
use crate::remote::{self, OutboundTopic, ParamKind, format_reading};
use crate::scheduler::{Interval, secs_to_ms};
use crate::sensors::{IntensityAccumulator, intensity_from_raw};

use super::events::AppEvent;
use super::ports::{Board, Button, EventSink, LinkPort, Placement};

/// Where the clock is drawn on the idle screen.
const CLOCK_PLACEMENT: Placement = Placement {
    clear: true,
    size: 2,
    column: 20,
    row: 0,
};

// ───────────────────────────────────────────────────────────────
// Medibox
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct Medibox {
    config: MediboxConfig,
    params: ControlParams,
    alarms: AlarmStore,
    menu: Menu,
    monitor: EnvironmentalMonitor,
    light: IntensityAccumulator,
    /// Average of the last closed reporting period; drives the servo.
    latest_intensity: f32,
    last_angle: Option<i32>,

    sample_timer: Interval,
    report_timer: Interval,
    servo_timer: Interval,
    publish_timer: Interval,

    /// The link has been up at least once.
    link_established: bool,
    clock_ok: bool,
}

impl Medibox {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: MediboxConfig) -> Self {
        let params = config.control;
        let alarms = AlarmStore::new(config.snooze_minutes);
        let menu = Menu::new(&config);
        Self {
            config,
            params,
            alarms,
            menu,
            monitor: EnvironmentalMonitor::new(),
            light: IntensityAccumulator::new(),
            latest_intensity: 0.0,
            last_angle: None,
            sample_timer: Interval::default(),
            report_timer: Interval::default(),
            servo_timer: Interval::default(),
            publish_timer: Interval::default(),
            link_established: false,
            clock_ok: true,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Park the servo, greet, bring up the link and start the cadences.
    pub fn start(
        &mut self,
        board: &mut impl Board,
        link: &mut impl LinkPort,
        sink: &mut impl EventSink,
    ) {
        let offset = self.menu.utc_offset();
        board.set_utc_offset(offset.minutes);
        board.set_servo_angle(0);

        board.print_line("Welcome to Medibox!", Placement::at(10, 20).cleared());
        board.delay_ms(self.config.feedback_hold_ms);
        board.clear();

        self.ensure_link(board, link, sink);

        let now = board.uptime_ms();
        self.sample_timer.reset(now);
        self.report_timer.reset(now);
        self.servo_timer.reset(now);
        self.publish_timer.reset(now);

        sink.emit(&AppEvent::Started);
        info!("Medibox started, time zone {}", offset.label);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one pass of the control loop.
    ///
    /// May block for a long time: reconnecting the link, ringing an
    /// alarm, waiting out an environmental alert and running the menu all
    /// hold the thread until they finish.
    pub fn tick(
        &mut self,
        board: &mut impl Board,
        link: &mut impl LinkPort,
        sink: &mut impl EventSink,
    ) {
        // 1. Remote parameters
        self.ensure_link(board, link, sink);
        self.service_remote(link, sink);

        // 2. Light sampling
        let now = board.uptime_ms();
        let sampling_ms = secs_to_ms(i64::from(self.params.sampling_interval_s));
        if self.sample_timer.due(now, sampling_ms) {
            match board.read_light_raw() {
                Ok(raw) => self.light.add(intensity_from_raw(raw)),
                Err(e) => warn!("LDR read failed: {}", e),
            }
        }

        // 3. Light report
        let reporting_ms = secs_to_ms(i64::from(self.params.reporting_period_s));
        if self.report_timer.due(now, reporting_ms) {
            self.report_light(link, sink);
        }

        // 4. Shade actuation
        if self.servo_timer.due(now, i64::from(self.config.servo_period_ms)) {
            self.actuate(board, sink);
        }

        // 5. Clock and alarms
        self.update_clock(board, sink);

        // 6. Environment
        if let Some(reading) = self.monitor.check(board, link, &self.config, sink) {
            let now = board.uptime_ms();
            let period = i64::from(self.config.env_publish_interval_ms);
            if self.publish_timer.due(now, period) {
                publish_readings(link, reading);
            }
        }

        // 7. Menu
        if board.is_pressed(Button::Ok) {
            board.delay_ms(self.config.debounce_ms);
            self.menu.run(board, &mut self.alarms, &self.config, sink);
        }
    }

    // ── Steps ─────────────────────────────────────────────────

    /// Connect with a fixed backoff until the broker accepts, then
    /// subscribe to every parameter topic. No-op while connected.
    fn ensure_link(
        &mut self,
        board: &mut impl Board,
        link: &mut impl LinkPort,
        sink: &mut impl EventSink,
    ) {
        if link.is_connected() {
            return;
        }

        let mut attempts: u32 = 0;
        while let Err(e) = link.connect() {
            attempts += 1;
            warn!("Link connect failed ({}), attempt {}", e, attempts);
            board.delay_ms(self.config.link_retry_ms);
        }

        for kind in ParamKind::ALL {
            let Some(topic) = kind.topic(&self.config.param_topic_prefix) else {
                warn!("Topic for {:?} does not fit, not subscribing", kind);
                continue;
            };
            if let Err(e) = link.subscribe(&topic, kind) {
                warn!("Subscribe to {} failed: {}", topic, e);
            }
        }

        if self.link_established {
            sink.emit(&AppEvent::LinkReconnected);
        }
        self.link_established = true;
        info!("Link up after {} failed attempt(s)", attempts);
    }

    fn service_remote(&mut self, link: &mut impl LinkPort, sink: &mut impl EventSink) {
        while let Some(update) = link.poll() {
            match remote::apply(&mut self.params, update.kind, &update.payload) {
                Ok(change) => {
                    info!("{:?}: {} -> {}", change.kind, change.old, change.new);
                    sink.emit(&AppEvent::ParamApplied(change));
                }
                Err(rejected) => {
                    warn!("{:?}: ignoring payload {:?}", rejected.kind, update.payload.as_str());
                    sink.emit(&AppEvent::ParamRejected(rejected.kind));
                }
            }
        }
    }

    fn report_light(&mut self, link: &mut impl LinkPort, sink: &mut impl EventSink) {
        let Some(avg) = self.light.take_average() else {
            warn!("No light samples in this reporting period");
            sink.emit(&AppEvent::LightReportSkipped);
            return;
        };

        self.latest_intensity = avg;
        if let Err(e) = link.publish(OutboundTopic::Ldr, &format_reading(avg, 2)) {
            debug!("{} not published: {}", OutboundTopic::Ldr.as_str(), e);
        }
        sink.emit(&AppEvent::LightAverage(avg));
    }

    fn actuate(&mut self, board: &mut impl Board, sink: &mut impl EventSink) {
        let reference = self.params.reference_temperature_c as f32;
        // Before the first DHT22 sample the temperature term is neutral.
        let temperature = self
            .monitor
            .last_reading()
            .map_or(reference, |r| r.temperature_c);

        let angle = compute_angle(
            self.latest_intensity,
            self.params.sampling_interval_s as f32,
            self.params.reporting_period_s as f32,
            temperature,
            self.params.servo_offset_deg as f32,
            self.params.gain,
            reference,
        );
        board.set_servo_angle(angle.clamp(0, MAX_ANGLE as i32) as u8);

        if self.last_angle != Some(angle) {
            self.last_angle = Some(angle);
            sink.emit(&AppEvent::ServoAngle(angle));
        }
    }

    fn update_clock(&mut self, board: &mut impl Board, sink: &mut impl EventSink) {
        let now = match board.local_time() {
            Ok(t) => t,
            Err(e) => {
                board.print_line("Failed to obtain time", Placement::TOP.cleared());
                if self.clock_ok {
                    warn!("Clock unavailable: {}", e);
                    sink.emit(&AppEvent::TimeUnavailable);
                }
                self.clock_ok = false;
                return;
            }
        };
        self.clock_ok = true;

        let mut text: heapless::String<8> = heapless::String::new();
        let _ = write!(text, "{now}");
        board.print_line(&text, CLOCK_PLACEMENT);

        for index in self.alarms.evaluate(now.hour, now.minute) {
            ring(board, &mut self.alarms, index, &self.config, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn params(&self) -> &ControlParams {
        &self.params
    }

    pub fn alarms(&self) -> &AlarmStore {
        &self.alarms
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn latest_intensity(&self) -> f32 {
        self.latest_intensity
    }
}
