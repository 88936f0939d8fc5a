//! Stdin console for the host simulator.
//!
//! A reader thread turns text lines into [`ConsoleCommand`]s and applies
//! them to the shared simulator state. It stands in for the buttons,
//! the sensors and the network, and never touches the core directly.
//!
//! ```text
//! up | down | ok | cancel       press a button
//! temp <°C> | hum <%> | ldr <0-4095>
//! dht ok|fail   clock ok|fail   link up|down
//! pub <topic> <payload>         inject a broker message
//! ```

use std::io::{self, BufRead};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use log::{info, warn};

use crate::app::ports::Button;

use super::link::{InboundMessage, Inbox, deliver};
use super::sim_board::SimInputs;

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Press(Button),
    Temperature(f32),
    Humidity(f32),
    LightRaw(u16),
    DhtOk(bool),
    ClockSynced(bool),
    BrokerUp(bool),
    Publish { topic: String, payload: String },
    Help,
}

const HELP: &str = "up|down|ok|cancel, temp <C>, hum <%>, ldr <raw>, \
                    dht ok|fail, clock ok|fail, link up|down, pub <topic> <payload>";

fn parse_switch(word: Option<&str>, on: &str, off: &str) -> Result<bool, &'static str> {
    match word {
        Some(w) if w == on => Ok(true),
        Some(w) if w == off => Ok(false),
        _ => Err("expected a state word"),
    }
}

/// Parse a console line. Blank lines are an error so they can be ignored.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, &'static str> {
    let line = line.trim();
    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let arg = rest.split_whitespace().next();

    match head.to_ascii_lowercase().as_str() {
        "up" => Ok(ConsoleCommand::Press(Button::Up)),
        "down" => Ok(ConsoleCommand::Press(Button::Down)),
        "ok" => Ok(ConsoleCommand::Press(Button::Ok)),
        "cancel" => Ok(ConsoleCommand::Press(Button::Cancel)),
        "temp" => arg
            .and_then(|a| a.parse().ok())
            .map(ConsoleCommand::Temperature)
            .ok_or("temp needs a number"),
        "hum" => arg
            .and_then(|a| a.parse().ok())
            .map(ConsoleCommand::Humidity)
            .ok_or("hum needs a number"),
        "ldr" => arg
            .and_then(|a| a.parse().ok())
            .map(ConsoleCommand::LightRaw)
            .ok_or("ldr needs a raw count"),
        "dht" => parse_switch(arg, "ok", "fail").map(ConsoleCommand::DhtOk),
        "clock" => parse_switch(arg, "ok", "fail").map(ConsoleCommand::ClockSynced),
        "link" => parse_switch(arg, "up", "down").map(ConsoleCommand::BrokerUp),
        "pub" => {
            let (topic, payload) = rest.split_once(' ').ok_or("pub needs a topic and a payload")?;
            Ok(ConsoleCommand::Publish {
                topic: topic.to_owned(),
                payload: payload.trim().to_owned(),
            })
        }
        "help" | "?" => Ok(ConsoleCommand::Help),
        "" => Err("empty line"),
        _ => Err("unknown command"),
    }
}

/// Shared handles the console writes to.
#[derive(Clone)]
pub struct ConsoleTargets {
    pub inputs: Arc<SimInputs>,
    pub broker_up: Arc<AtomicBool>,
    pub inbox: &'static Inbox,
}

impl ConsoleTargets {
    pub fn apply(&self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Press(button) => self.inputs.press(button),
            ConsoleCommand::Temperature(t) => self.inputs.set_temperature(t),
            ConsoleCommand::Humidity(h) => self.inputs.set_humidity(h),
            ConsoleCommand::LightRaw(raw) => self.inputs.set_light_raw(raw),
            ConsoleCommand::DhtOk(ok) => self.inputs.set_dht_ok(ok),
            ConsoleCommand::ClockSynced(ok) => self.inputs.set_clock_synced(ok),
            ConsoleCommand::BrokerUp(up) => self.broker_up.store(up, Ordering::Release),
            ConsoleCommand::Publish { topic, payload } => {
                match InboundMessage::new(&topic, payload.as_bytes()) {
                    Some(message) => {
                        if !deliver(self.inbox, message) {
                            warn!("Inbox full, dropped message on {}", topic);
                        }
                    }
                    None => warn!("Message on {} too long", topic),
                }
            }
            ConsoleCommand::Help => info!("{}", HELP),
        }
    }
}

/// Spawn the stdin reader thread.
pub fn spawn(targets: ConsoleTargets) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Ok(command) => targets.apply(command),
                    Err("empty line") => {}
                    Err(e) => warn!("{}: {:?} (try `help`)", e, line),
                }
            }
            info!("Console closed");
        })
}
