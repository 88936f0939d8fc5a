//! Front-panel buttons.
//!
//! Four momentary switches to ground with pull-ups, so a pressed button
//! reads low. Debouncing is done by the menu's wait loop, not here.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::Button;

/// The four button lines, indexed in [`Button::ALL`] order.
pub struct ButtonPad<I> {
    pins: [I; 4],
}

impl<I: InputPin> ButtonPad<I> {
    /// `pins` must be ordered UP, DOWN, OK, CANCEL.
    pub fn new(pins: [I; 4]) -> Self {
        Self { pins }
    }

    /// A pin read error reads as "not pressed".
    pub fn is_pressed(&mut self, button: Button) -> bool {
        match self.pins[button as usize].is_low() {
            Ok(low) => low,
            Err(e) => {
                warn!("{:?} button read failed: {:?}", button, e);
                false
            }
        }
    }
}
