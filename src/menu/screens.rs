//! Per-screen sub-machines.
//!
//! Each function runs one screen to completion and returns to the browse
//! state. Changes are committed only on the final OK; CANCEL anywhere
//! discards the edit.

use core::fmt::Write;

use log::info;

use crate::alarm::{AlarmStore, NUM_ALARMS};
use crate::app::events::AppEvent;
use crate::app::ports::{Board, Button, EventSink, Placement};
use crate::config::MediboxConfig;
use crate::timezone::{UTC_OFFSETS, next_index, prev_index};

use super::input::wait_for_button;

type Line = heapless::String<32>;

fn line(args: core::fmt::Arguments<'_>) -> Line {
    let mut out = Line::new();
    // Longest line is well under capacity.
    let _ = out.write_fmt(args);
    out
}

/// Show a confirmation and hold it.
fn acknowledge(board: &mut impl Board, text: &str, config: &MediboxConfig) {
    board.print_line(text, Placement::TOP.cleared());
    board.delay_ms(config.feedback_hold_ms);
}

// ── Set Time Zone ─────────────────────────────────────────────

/// Walk the offset table starting from the committed entry.
pub fn set_timezone(
    board: &mut impl Board,
    committed: &mut usize,
    config: &MediboxConfig,
    sink: &mut impl EventSink,
) {
    let mut candidate = *committed;
    loop {
        board.print_line("Time zone:", Placement::TOP.cleared());
        board.print_line(UTC_OFFSETS[candidate].label, Placement::at(0, 20));

        match wait_for_button(board, config) {
            Button::Up => candidate = next_index(candidate),
            Button::Down => candidate = prev_index(candidate),
            Button::Ok => {
                *committed = candidate;
                let offset = UTC_OFFSETS[candidate];
                board.set_utc_offset(offset.minutes);
                info!("Time zone set to {}", offset.label);
                sink.emit(&AppEvent::TimezoneChanged {
                    label: offset.label,
                    minutes: offset.minutes,
                });
                acknowledge(board, "Time zone is set", config);
                return;
            }
            Button::Cancel => return,
        }
    }
}

// ── Set Alarm N ───────────────────────────────────────────────

/// Edit one wrapping field. `None` on CANCEL.
fn edit_field(
    board: &mut impl Board,
    prompt: &str,
    start: u8,
    modulus: u8,
    config: &MediboxConfig,
) -> Option<u8> {
    let mut value = start % modulus;
    loop {
        board.print_line(&line(format_args!("{prompt}: {value:02}")), Placement::TOP.cleared());

        match wait_for_button(board, config) {
            Button::Up => value = (value + 1) % modulus,
            Button::Down => value = (value + modulus - 1) % modulus,
            Button::Ok => return Some(value),
            Button::Cancel => return None,
        }
    }
}

/// Hour, then minute, then a confirmation prompt.
pub fn set_alarm(
    board: &mut impl Board,
    alarms: &mut AlarmStore,
    index: usize,
    config: &MediboxConfig,
    sink: &mut impl EventSink,
) {
    let stored = *alarms.get(index);
    let Some(hour) = edit_field(board, "Enter hour", stored.hour, 24, config) else {
        return;
    };
    let Some(minute) = edit_field(board, "Enter minute", stored.minute, 60, config) else {
        return;
    };

    loop {
        board.print_line(
            &line(format_args!("Set alarm {} to {hour:02}:{minute:02}?", index + 1)),
            Placement::TOP.cleared(),
        );
        board.print_line("OK-Set CANCEL-Discard", Placement::at(0, 50));

        match wait_for_button(board, config) {
            Button::Ok => {
                alarms.set_alarm(index, hour, minute);
                info!("Alarm {} set to {:02}:{:02}", index + 1, hour, minute);
                sink.emit(&AppEvent::AlarmSet { index, hour, minute });
                acknowledge(board, "Alarm set", config);
                return;
            }
            Button::Cancel => return,
            Button::Up | Button::Down => {}
        }
    }
}

// ── View Alarms ───────────────────────────────────────────────

/// List armed alarms until CANCEL.
pub fn view_alarms(board: &mut impl Board, alarms: &AlarmStore, config: &MediboxConfig) {
    board.clear();
    let mut shown = 0u8;
    for (i, alarm) in alarms.armed() {
        board.print_line(
            &line(format_args!("Alarm {}: {:02}:{:02}", i + 1, alarm.hour, alarm.minute)),
            Placement::at(0, 10 + 20 * shown),
        );
        shown += 1;
    }
    if shown == 0 {
        board.print_line("No alarms set", Placement::at(0, 10));
    }
    board.print_line("Press CANCEL to exit", Placement::at(0, 50));

    while wait_for_button(board, config) != Button::Cancel {}
}

// ── Delete Alarm ──────────────────────────────────────────────

/// Pick a slot with UP/DOWN, clear it on OK.
pub fn delete_alarm(
    board: &mut impl Board,
    alarms: &mut AlarmStore,
    config: &MediboxConfig,
    sink: &mut impl EventSink,
) {
    let mut selected = 0usize;
    loop {
        board.print_line(
            &line(format_args!("Delete alarm {}?", selected + 1)),
            Placement::TOP.cleared(),
        );
        let alarm = alarms.get(selected);
        let slot = if alarm.armed {
            line(format_args!("{}: {:02}:{:02}", selected + 1, alarm.hour, alarm.minute))
        } else {
            line(format_args!("{}: --:--", selected + 1))
        };
        board.print_line(&slot, Placement::at(0, 30));

        match wait_for_button(board, config) {
            Button::Up => selected = (selected + 1) % NUM_ALARMS,
            Button::Down => selected = (selected + NUM_ALARMS - 1) % NUM_ALARMS,
            Button::Ok => {
                alarms.delete_alarm(selected);
                info!("Alarm {} deleted", selected + 1);
                sink.emit(&AppEvent::AlarmDeleted { index: selected });
                acknowledge(board, "Alarm deleted", config);
                return;
            }
            Button::Cancel => return,
        }
    }
}
