//! Single-colour indicator LED.

use embedded_hal::digital::{OutputPin, PinState};

/// Binary LED that remembers what it was last told.
pub struct Indicator<O> {
    pin: O,
    on: bool,
}

impl<O: OutputPin> Indicator<O> {
    pub fn new(pin: O) -> Self {
        Self { pin, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), O::Error> {
        self.pin.set_state(PinState::from(on))?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
