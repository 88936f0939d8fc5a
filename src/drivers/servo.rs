//! Hobby servo on a 50 Hz PWM channel.
//!
//! 500 µs pulse = 0°, 2500 µs = 180°, linear in between. Any
//! `embedded-hal` [`SetDutyCycle`] channel configured for a 20 ms period
//! works. The driver is a dumb actuator: the angle comes from the
//! control law, this only maps it to a pulse width.

use embedded_hal::pwm::SetDutyCycle;

/// PWM period at 50 Hz.
pub const PERIOD_US: u16 = 20_000;
pub const MIN_PULSE_US: u16 = 500;
pub const MAX_PULSE_US: u16 = 2_500;
pub const MAX_DEGREES: u8 = 180;

/// Pulse width for `degrees`, clamped to the mechanical range.
pub const fn pulse_width_us(degrees: u8) -> u16 {
    let degrees = if degrees > MAX_DEGREES { MAX_DEGREES } else { degrees };
    let span = (MAX_PULSE_US - MIN_PULSE_US) as u32;
    MIN_PULSE_US + (span * degrees as u32 / MAX_DEGREES as u32) as u16
}

pub struct ServoDriver<P> {
    pwm: P,
    angle: u8,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    /// Wrap a channel. Nothing is written until the first
    /// [`set_angle`](Self::set_angle).
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: 0 }
    }

    pub fn set_angle(&mut self, degrees: u8) -> Result<(), P::Error> {
        let degrees = degrees.min(MAX_DEGREES);
        self.pwm
            .set_duty_cycle_fraction(pulse_width_us(degrees), PERIOD_US)?;
        self.angle = degrees;
        Ok(())
    }

    /// Last angle successfully written.
    pub fn angle(&self) -> u8 {
        self.angle
    }

    pub fn release(self) -> P {
        self.pwm
    }
}
