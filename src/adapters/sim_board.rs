//! Simulated controller board for running the core on a host.
//!
//! Actuators go through the real drivers, wired to in-memory pins. The
//! sensor values and button presses live in [`SimInputs`], which the
//! console thread writes to while the control loop reads from it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use log::{debug, info, warn};

use crate::app::ports::{
    ActuatorPort, Button, ClockPort, DisplayPort, InputPort, Placement, SensorPort, TimeOfDay,
};
use crate::drivers::servo::PERIOD_US;
use crate::drivers::{ButtonPad, Indicator, ServoDriver};
use crate::error::{SensorError, TimeError};
use crate::sensors::EnvReading;

// ───────────────────────────────────────────────────────────────
// Shared inputs
// ───────────────────────────────────────────────────────────────

/// Everything the outside world can change on the simulated board.
#[derive(Debug)]
pub struct SimInputs {
    /// Latched presses; a read consumes the press.
    presses: [AtomicBool; 4],
    temperature_bits: AtomicU32,
    humidity_bits: AtomicU32,
    light_raw: AtomicU16,
    dht_ok: AtomicBool,
    clock_synced: AtomicBool,
}

impl SimInputs {
    pub fn new(reading: EnvReading, light_raw: u16) -> Self {
        Self {
            presses: Default::default(),
            temperature_bits: AtomicU32::new(reading.temperature_c.to_bits()),
            humidity_bits: AtomicU32::new(reading.humidity_pct.to_bits()),
            light_raw: AtomicU16::new(light_raw),
            dht_ok: AtomicBool::new(true),
            clock_synced: AtomicBool::new(true),
        }
    }

    pub fn press(&self, button: Button) {
        self.presses[button as usize].store(true, Ordering::Release);
    }

    fn take_press(&self, button: Button) -> bool {
        self.presses[button as usize].swap(false, Ordering::AcqRel)
    }

    pub fn set_temperature(&self, celsius: f32) {
        self.temperature_bits.store(celsius.to_bits(), Ordering::Relaxed);
    }

    pub fn set_humidity(&self, percent: f32) {
        self.humidity_bits.store(percent.to_bits(), Ordering::Relaxed);
    }

    pub fn set_light_raw(&self, raw: u16) {
        self.light_raw.store(raw, Ordering::Relaxed);
    }

    pub fn set_dht_ok(&self, ok: bool) {
        self.dht_ok.store(ok, Ordering::Relaxed);
    }

    pub fn set_clock_synced(&self, synced: bool) {
        self.clock_synced.store(synced, Ordering::Relaxed);
    }

    fn reading(&self) -> EnvReading {
        EnvReading::new(
            f32::from_bits(self.temperature_bits.load(Ordering::Relaxed)),
            f32::from_bits(self.humidity_bits.load(Ordering::Relaxed)),
        )
    }
}

// ───────────────────────────────────────────────────────────────
// In-memory pins
// ───────────────────────────────────────────────────────────────

pub struct SimButtonPin {
    inputs: Arc<SimInputs>,
    button: Button,
}

impl ErrorType for SimButtonPin {
    type Error = Infallible;
}

impl InputPin for SimButtonPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.inputs.take_press(self.button))
    }
}

#[derive(Default)]
pub struct SimOutputPin {
    high: bool,
}

impl SimOutputPin {
    pub fn is_set_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for SimOutputPin {
    type Error = Infallible;
}

impl OutputPin for SimOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

/// PWM channel whose duty counts microseconds of a 20 ms period.
#[derive(Default)]
pub struct SimPwm {
    duty: u16,
}

impl SimPwm {
    pub fn pulse_us(&self) -> u16 {
        self.duty
    }
}

impl pwm::ErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        PERIOD_US
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// SimBoard
// ───────────────────────────────────────────────────────────────

/// Host adapter implementing every board port.
pub struct SimBoard {
    inputs: Arc<SimInputs>,
    servo: ServoDriver<SimPwm>,
    warning_led: Indicator<SimOutputPin>,
    alarm_led: Indicator<SimOutputPin>,
    buttons: ButtonPad<SimButtonPin>,
    tone_hz: Option<u16>,
    boot: Instant,
    utc_offset_min: i16,
}

impl SimBoard {
    pub fn new(inputs: Arc<SimInputs>) -> Self {
        let pin = |button| SimButtonPin {
            inputs: Arc::clone(&inputs),
            button,
        };
        let buttons = ButtonPad::new(Button::ALL.map(pin));
        Self {
            inputs,
            servo: ServoDriver::new(SimPwm::default()),
            warning_led: Indicator::new(SimOutputPin::default()),
            alarm_led: Indicator::new(SimOutputPin::default()),
            buttons,
            tone_hz: None,
            boot: Instant::now(),
            utc_offset_min: 0,
        }
    }

    pub fn servo_angle(&self) -> u8 {
        self.servo.angle()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for SimBoard {
    fn read_temperature_humidity(&mut self) -> Result<EnvReading, SensorError> {
        if !self.inputs.dht_ok.load(Ordering::Relaxed) {
            return Err(SensorError::ReadFailed);
        }
        Ok(self.inputs.reading())
    }

    fn read_light_raw(&mut self) -> Result<u16, SensorError> {
        Ok(self.inputs.light_raw.load(Ordering::Relaxed))
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for SimBoard {
    fn set_servo_angle(&mut self, degrees: u8) {
        let before = self.servo.angle();
        if let Err(e) = self.servo.set_angle(degrees) {
            warn!("Servo write failed: {:?}", e);
        } else if before != self.servo.angle() {
            info!("Servo -> {}\u{00b0}", self.servo.angle());
        }
    }

    fn set_warning_led(&mut self, on: bool) {
        if let Err(e) = self.warning_led.set(on) {
            warn!("Warning LED write failed: {:?}", e);
        }
    }

    fn set_alarm_led(&mut self, on: bool) {
        if let Err(e) = self.alarm_led.set(on) {
            warn!("Alarm LED write failed: {:?}", e);
        }
    }

    fn tone(&mut self, freq_hz: u16) {
        if self.tone_hz != Some(freq_hz) {
            debug!("Buzzer {} Hz", freq_hz);
        }
        self.tone_hz = Some(freq_hz);
    }

    fn no_tone(&mut self) {
        self.tone_hz = None;
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for SimBoard {
    fn print_line(&mut self, text: &str, placement: Placement) {
        debug!(
            "OLED{} @({},{}) x{}: {}",
            if placement.clear { " [clr]" } else { "" },
            placement.column,
            placement.row,
            placement.size,
            text
        );
    }

    fn clear(&mut self) {
        debug!("OLED [clr]");
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for SimBoard {
    fn is_pressed(&mut self, button: Button) -> bool {
        self.buttons.is_pressed(button)
    }
}

// ── ClockPort implementation ──────────────────────────────────

impl ClockPort for SimBoard {
    fn uptime_ms(&self) -> u64 {
        u64::try_from(self.boot.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }

    fn local_time(&mut self) -> Result<TimeOfDay, TimeError> {
        if !self.inputs.clock_synced.load(Ordering::Relaxed) {
            return Err(TimeError::NotSynced);
        }
        let utc = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TimeError::NotSynced)?
            .as_secs();
        Ok(time_of_day(utc, self.utc_offset_min))
    }

    fn set_utc_offset(&mut self, minutes: i16) {
        self.utc_offset_min = minutes;
    }
}

/// Local time of day for a Unix timestamp and an offset east of UTC.
pub fn time_of_day(unix_secs: u64, offset_min: i16) -> TimeOfDay {
    const DAY: i64 = 86_400;
    let utc_of_day = (unix_secs % DAY as u64) as i64;
    let local = (utc_of_day + i64::from(offset_min) * 60).rem_euclid(DAY);
    TimeOfDay::new(
        (local / 3_600) as u8,
        (local % 3_600 / 60) as u8,
        (local % 60) as u8,
    )
}
