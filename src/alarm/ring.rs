//! Ringing an alarm until the user answers it.
//!
//! ```text
//!            ┌─── OK ────▶ SNOOZED  (store.snooze)
//!  RINGING ──┤
//!            └─ CANCEL ──▶ STOPPED  (store.mark_triggered)
//! ```
//!
//! Buttons are sampled once before each tone, so the response latency is
//! one tone plus one gap (~700 ms).

use core::fmt::Write;

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::{Board, Button, EventSink, Placement};
use crate::config::MediboxConfig;

use super::AlarmStore;

/// How a ring sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingOutcome {
    Snoozed,
    Stopped,
}

/// Ring alarm `index` until OK or CANCEL, then apply the outcome to `store`.
///
/// Blocks the control thread. The LED and buzzer are off on return.
pub fn ring(
    board: &mut impl Board,
    store: &mut AlarmStore,
    index: usize,
    config: &MediboxConfig,
    sink: &mut impl EventSink,
) -> RingOutcome {
    sink.emit(&AppEvent::AlarmRinging { index });
    info!("Alarm {} ringing", index + 1);

    board.clear();
    board.print_line("MEDICINE TIME", Placement::at(0, 10));
    board.print_line("OK-Snooze/CANCEL-Stop", Placement::at(0, 50));

    let outcome = 'ringing: loop {
        for &freq in &config.ring_tones_hz {
            if board.is_pressed(Button::Ok) {
                break 'ringing RingOutcome::Snoozed;
            }
            if board.is_pressed(Button::Cancel) {
                break 'ringing RingOutcome::Stopped;
            }
            board.tone(freq);
            board.set_alarm_led(true);
            board.delay_ms(config.ring_tone_ms);
            board.no_tone();
            board.set_alarm_led(false);
            board.delay_ms(config.ring_gap_ms);
        }
    };

    board.no_tone();
    board.set_alarm_led(false);
    board.delay_ms(config.debounce_ms);

    match outcome {
        RingOutcome::Snoozed => {
            store.snooze(index);
            let alarm = store.get(index);
            sink.emit(&AppEvent::AlarmSnoozed {
                index,
                hour: alarm.hour,
                minute: alarm.minute,
            });

            let mut line: heapless::String<32> = heapless::String::new();
            let _ = write!(line, "Alarm snoozed for {} mins", store.snooze_minutes());
            board.print_line(&line, Placement::TOP.cleared());
            board.delay_ms(config.feedback_hold_ms);
        }
        RingOutcome::Stopped => {
            store.mark_triggered(index, true);
            sink.emit(&AppEvent::AlarmStopped { index });
        }
    }
    board.clear();

    outcome
}
