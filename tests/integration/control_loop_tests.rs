//! The periodic control loop: start-up, remote parameters, light
//! averaging, shade actuation, environmental alerts and link recovery.

use crate::mock_hw::{BoardCall, MockBoard, MockLink, RecordingSink};

use medibox::app::events::AppEvent;
use medibox::app::service::Medibox;
use medibox::config::MediboxConfig;
use medibox::error::SensorError;
use medibox::remote::{OutboundTopic, ParamKind};
use medibox::sensors::EnvReading;

struct Rig {
    medibox: Medibox,
    board: MockBoard,
    link: MockLink,
    sink: RecordingSink,
}

impl Rig {
    fn started(config: MediboxConfig) -> Self {
        let mut rig = Self {
            medibox: Medibox::new(config),
            board: MockBoard::new(),
            link: MockLink::new(),
            sink: RecordingSink::new(),
        };
        rig.medibox.start(&mut rig.board, &mut rig.link, &mut rig.sink);
        rig
    }

    fn tick(&mut self) {
        self.medibox.tick(&mut self.board, &mut self.link, &mut self.sink);
    }

    /// Tick every 100 ms of simulated time for `ms`.
    fn run_for(&mut self, ms: u64) {
        let until = self.board.now_ms + ms;
        while self.board.now_ms < until {
            self.tick();
            self.board.advance(100);
        }
    }
}

fn config_with_periods(sampling_s: u32, reporting_s: i32) -> MediboxConfig {
    let mut config = MediboxConfig::default();
    config.control.sampling_interval_s = sampling_s;
    config.control.reporting_period_s = reporting_s;
    config
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_parks_servo_and_subscribes() {
    let rig = Rig::started(MediboxConfig::default());

    assert_eq!(rig.board.calls.first(), Some(&BoardCall::Servo(0)));
    assert_eq!(rig.board.utc_offset, Some(330));
    assert!(rig.board.printed().contains(&"Welcome to Medibox!"));

    let topics: Vec<&str> = rig.link.subscriptions.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(
        topics,
        vec![
            "medibox/nodeRed/ts",
            "medibox/nodeRed/tu",
            "medibox/nodeRed/theta",
            "medibox/nodeRed/y",
            "medibox/nodeRed/itemp",
        ]
    );
    assert_eq!(rig.sink.events, vec![AppEvent::Started]);
}

// ── Remote parameters ─────────────────────────────────────────

#[test]
fn remote_updates_apply_or_are_ignored() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.link.push(ParamKind::SamplingInterval, "-5");
    rig.link.push(ParamKind::SamplingInterval, "abc");
    rig.link.push(ParamKind::SamplingInterval, "10");
    rig.link.push(ParamKind::Gain, "0.5");
    rig.link.push(ParamKind::ServoOffset, "200");

    rig.tick();

    let params = rig.medibox.params();
    assert_eq!(params.sampling_interval_s, 10);
    assert!((params.gain - 0.5).abs() < f32::EPSILON);
    assert_eq!(params.servo_offset_deg, 200);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::ParamRejected(ParamKind::SamplingInterval))),
        2
    );
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::ParamApplied(_))), 3);
}

// ── Light averaging and actuation ─────────────────────────────

#[test]
fn light_average_is_published_every_reporting_period() {
    let mut rig = Rig::started(config_with_periods(5, 20));
    rig.board.light_raw = 0; // full brightness

    rig.run_for(20_100);

    assert_eq!(rig.board.light_reads, 4);
    assert_eq!(rig.link.published_on(OutboundTopic::Ldr), vec!["1.00"]);
    assert!(rig.sink.contains(&AppEvent::LightAverage(1.0)));
    assert!((rig.medibox.latest_intensity() - 1.0).abs() < f32::EPSILON);
}

#[test]
fn empty_reporting_period_is_only_a_warning() {
    let mut rig = Rig::started(config_with_periods(100, 10));
    rig.run_for(10_100);

    assert!(rig.sink.contains(&AppEvent::LightReportSkipped));
    assert!(rig.link.published_on(OutboundTopic::Ldr).is_empty());
    assert!(rig.medibox.latest_intensity().abs() < f32::EPSILON);
}

#[test]
fn servo_follows_the_reported_average() {
    let mut rig = Rig::started(config_with_periods(5, 20));
    rig.board.light_raw = 0;

    rig.run_for(1_000);
    // No report yet: intensity 0 holds the shade at the offset.
    assert_eq!(rig.board.servo_angles().last(), Some(&30));

    rig.run_for(20_000);
    // ln(5/20) < 0 with full light drives the shade closed.
    assert_eq!(rig.board.servo_angles().last(), Some(&0));
    assert!(rig.sink.contains(&AppEvent::ServoAngle(30)));
    assert!(rig.sink.contains(&AppEvent::ServoAngle(0)));
}

#[test]
fn out_of_range_remote_offset_is_clamped_at_the_servo() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.link.push(ParamKind::ServoOffset, "250");
    rig.link.push(ParamKind::ReportingPeriod, "0");
    rig.run_for(600);

    // Degenerate period: the law hands the offset back untouched.
    assert!(rig.sink.contains(&AppEvent::ServoAngle(250)));
    assert_eq!(rig.board.servo_angles().last(), Some(&180));
}

// ── Environment ───────────────────────────────────────────────

#[test]
fn readings_are_published_on_a_cadence() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.run_for(10_100);

    assert_eq!(rig.link.published_on(OutboundTopic::Temperature), vec!["28.0", "28.0"]);
    assert_eq!(rig.link.published_on(OutboundTopic::Humidity), vec!["70.0", "70.0"]);
}

#[test]
fn high_temperature_blocks_until_back_in_band() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.board.env_from(3_000, Ok(EnvReading::new(35.0, 70.0)));
    rig.board.env_from(6_000, Ok(EnvReading::new(28.0, 70.0)));

    rig.run_for(2_000);
    rig.tick(); // at 3000: enters the alert loop, returns once 6000 is reached

    assert!(rig.board.now_ms >= 6_000);
    assert!(rig.sink.contains(&AppEvent::EnvironmentAlert(EnvReading::new(35.0, 70.0))));
    assert!(rig.sink.contains(&AppEvent::EnvironmentNormal(EnvReading::new(28.0, 70.0))));

    assert!(rig.board.printed().contains(&"TEMP HIGH"));
    assert!(!rig.board.printed().iter().any(|l| l.starts_with("HUMID")));
    assert!(rig.board.calls.contains(&BoardCall::WarningLed(true)));
    assert!(rig.board.tones().iter().all(|&f| f == 262));
    assert_eq!(rig.board.last_warning_led(), Some(false));
    assert!(!rig.board.buzzer_on());

    let temps = rig.link.published_on(OutboundTopic::Temperature);
    assert!(temps.iter().filter(|&&t| t == "35.0").count() >= 5);
}

#[test]
fn reading_that_ends_an_alert_is_published() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.board.env_from(3_000, Ok(EnvReading::new(35.0, 70.0)));
    rig.board.env_from(4_500, Ok(EnvReading::new(28.0, 70.0)));

    rig.run_for(2_000);
    rig.tick();

    // The 5 s cadence has not come round yet, so only the alert loop published.
    assert!(rig.board.now_ms < 5_000);
    let temps = rig.link.published_on(OutboundTopic::Temperature);
    assert_eq!(temps, vec!["35.0", "35.0", "28.0"]);
}

#[test]
fn low_humidity_is_shown_on_the_second_row() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.board.env_from(0, Ok(EnvReading::new(28.0, 40.0)));
    rig.board.env_from(2_500, Ok(EnvReading::new(28.0, 70.0)));

    rig.tick();

    let row = rig.board.printed_at("HUMID LOW").map(|p| p.row);
    assert_eq!(row, Some(30));
    assert!(rig.board.printed_at("TEMP LOW").is_none());
}

#[test]
fn failed_read_keeps_the_last_good_value() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.board.env_from(2_000, Err(SensorError::ReadFailed));

    rig.run_for(8_000);

    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::EnvironmentAlert(_))), 0);
    assert!(rig.link.published_on(OutboundTopic::Temperature).contains(&"28.0"));
}

// ── Link and clock faults ─────────────────────────────────────

#[test]
fn dropped_link_is_retried_and_resubscribed() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.link.drop_connection();
    rig.link.connect_failures = 3;
    let before = rig.board.now_ms;

    rig.tick();

    assert_eq!(rig.link.connect_attempts, 1 + 4);
    assert_eq!(rig.board.now_ms - before, 3 * 500);
    assert_eq!(rig.link.subscriptions.len(), 5);
    assert!(rig.sink.contains(&AppEvent::LinkReconnected));
}

#[test]
fn clock_failure_is_shown_and_reported_once() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.board.wall_start_secs = None;

    rig.tick();
    rig.tick();

    assert_eq!(
        rig.board.printed().iter().filter(|&&l| l == "Failed to obtain time").count(),
        2
    );
    assert_eq!(rig.sink.count(|e| *e == AppEvent::TimeUnavailable), 1);
}

#[test]
fn clock_is_drawn_every_tick() {
    let mut rig = Rig::started(MediboxConfig::default());
    rig.tick();
    // 12:00:00 at boot, start() spends one second on the welcome screen.
    assert!(rig.board.printed().contains(&"12:00:01"));
}
