//! Medibox host simulator entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  SimBoard            InboxLink          LogEventSink         │
//! │  (Sensor+Actuator+   (LinkPort)         (EventSink)          │
//! │   Display+Input+Clock)                                       │
//! │                                                              │
//! │  ───────────────── Port Trait Boundary ─────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                 Medibox (pure logic)                   │  │
//! │  │  light · servo law · alarms · monitor · menu           │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  console thread: stdin → SimInputs / INBOX                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `medibox [config.json]`. Log level via `RUST_LOG`.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use log::{info, warn};

use medibox::adapters::console::{self, ConsoleTargets};
use medibox::adapters::link::{INBOX, InboxLink};
use medibox::adapters::log_sink::LogEventSink;
use medibox::adapters::sim_board::{SimBoard, SimInputs};
use medibox::app::ports::ClockPort;
use medibox::app::service::Medibox;
use medibox::config::MediboxConfig;
use medibox::sensors::EnvReading;

/// Load the JSON config at `path`, or defaults if there is none or it is bad.
fn load_config(path: Option<&Path>) -> MediboxConfig {
    let Some(path) = path else {
        info!("No config file given, using defaults");
        return MediboxConfig::default();
    };
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Cannot read {}: {}. Using defaults", path.display(), e);
            return MediboxConfig::default();
        }
    };
    match MediboxConfig::from_json(&text) {
        Ok(config) => {
            info!("Config loaded from {}", path.display());
            config
        }
        Err(e) => {
            let e = medibox::Error::from(e);
            warn!("{} rejected ({}). Using defaults", path.display(), e);
            MediboxConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .context("installing logger")?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Medibox v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config_path = std::env::args_os().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new));

    // Comfortable room, moderate light.
    let inputs = Arc::new(SimInputs::new(EnvReading::new(28.0, 70.0), 2_000));
    let broker_up = Arc::new(AtomicBool::new(true));

    console::spawn(ConsoleTargets {
        inputs: Arc::clone(&inputs),
        broker_up: Arc::clone(&broker_up),
        inbox: &INBOX,
    })
    .context("spawning console thread")?;

    let mut board = SimBoard::new(inputs);
    let mut link = InboxLink::new(&INBOX, broker_up);
    let mut sink = LogEventSink::new();

    let idle_ms = config.button_poll_ms;
    let mut medibox = Medibox::new(config);
    medibox.start(&mut board, &mut link, &mut sink);
    info!("System ready. Type `help` for console commands.");

    loop {
        medibox.tick(&mut board, &mut link, &mut sink);
        board.delay_ms(idle_ms);
    }
}
