//! Blocking button input.

use crate::app::ports::{Board, Button};
use crate::config::MediboxConfig;

/// Poll the four buttons until one is down, debounce it, and return it.
///
/// Buttons are scanned in [`Button::ALL`] order, so simultaneous presses
/// resolve to the earliest one in that list. There is no timeout.
pub fn wait_for_button(board: &mut impl Board, config: &MediboxConfig) -> Button {
    loop {
        if let Some(button) = Button::ALL.into_iter().find(|&b| board.is_pressed(b)) {
            board.delay_ms(config.debounce_ms);
            return button;
        }
        board.delay_ms(config.button_poll_ms);
    }
}
