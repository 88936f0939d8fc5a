//! Menu navigation and the per-screen sub-machines.

use crate::mock_hw::{MockBoard, RecordingSink};

use medibox::alarm::AlarmStore;
use medibox::app::events::AppEvent;
use medibox::app::ports::{Button, Placement};
use medibox::config::MediboxConfig;
use medibox::menu::{Menu, Screen};

use Button::{Cancel, Down, Ok, Up};

struct Rig {
    config: MediboxConfig,
    menu: Menu,
    store: AlarmStore,
    board: MockBoard,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        let config = MediboxConfig::default();
        Self {
            menu: Menu::new(&config),
            store: AlarmStore::new(config.snooze_minutes),
            board: MockBoard::new(),
            sink: RecordingSink::new(),
            config,
        }
    }

    /// Run one menu visit with `presses` queued.
    fn visit(&mut self, presses: &[Button]) {
        self.board.queue(presses);
        self.menu
            .run(&mut self.board, &mut self.store, &self.config, &mut self.sink);
        assert_eq!(self.board.pending_presses(), 0, "every press should be consumed");
    }
}

// ── Browsing ──────────────────────────────────────────────────

#[test]
fn cancel_leaves_immediately() {
    let mut rig = Rig::new();
    rig.visit(&[Cancel]);
    assert_eq!(rig.board.printed(), vec!["1 - Set Time Zone"]);
    assert!(rig.sink.events.is_empty());
}

#[test]
fn browse_position_survives_leaving() {
    let mut rig = Rig::new();
    rig.visit(&[Down, Cancel]);
    assert_eq!(rig.menu.state().screen(), Screen::DeleteAlarm);

    rig.board.calls.clear();
    rig.visit(&[Cancel]);
    assert_eq!(rig.board.printed(), vec!["5 - Delete Alarm"]);
}

#[test]
fn each_press_is_debounced() {
    let mut rig = Rig::new();
    rig.visit(&[Up, Up, Cancel]);
    assert_eq!(rig.board.now_ms, 3 * u64::from(rig.config.debounce_ms));
}

// ── Set Time Zone ─────────────────────────────────────────────

#[test]
fn timezone_commit_reconfigures_the_clock() {
    let mut rig = Rig::new();
    rig.visit(&[Ok, Up, Ok, Cancel]);

    assert_eq!(rig.board.utc_offset, Some(345));
    assert_eq!(rig.menu.utc_offset().label, "UTC+05:45");
    assert!(rig.sink.contains(&AppEvent::TimezoneChanged {
        label: "UTC+05:45",
        minutes: 345,
    }));
    assert!(rig.board.printed().contains(&"Time zone is set"));
}

#[test]
fn timezone_edit_starts_from_committed_value() {
    let mut rig = Rig::new();
    rig.visit(&[Ok, Down, Down, Ok, Cancel]);
    assert_eq!(rig.menu.utc_offset().label, "UTC+04:30");

    rig.visit(&[Ok, Ok, Cancel]);
    assert_eq!(rig.board.utc_offset, Some(270));
}

#[test]
fn timezone_cancel_discards() {
    let mut rig = Rig::new();
    rig.visit(&[Ok, Up, Up, Cancel, Cancel]);
    assert_eq!(rig.menu.utc_offset().label, "UTC+05:30");
    assert_eq!(rig.board.utc_offset, None);
    assert!(rig.sink.events.is_empty());
}

// ── Set Alarm ─────────────────────────────────────────────────

#[test]
fn set_alarm_two_with_wrapping_fields() {
    let mut rig = Rig::new();
    // Screen 3, hour 0 → 23, minute 0 → 58, confirm.
    rig.visit(&[Up, Up, Ok, Down, Ok, Down, Down, Ok, Ok, Cancel]);

    let alarm = rig.store.get(1);
    assert_eq!((alarm.hour, alarm.minute), (23, 58));
    assert!(alarm.armed);
    assert!(rig.store.is_enabled());
    assert!(rig.sink.contains(&AppEvent::AlarmSet { index: 1, hour: 23, minute: 58 }));
    assert!(!rig.store.get(0).armed);
}

#[test]
fn set_alarm_starts_from_the_stored_time() {
    let mut rig = Rig::new();
    rig.store.set_alarm(0, 6, 30);
    rig.visit(&[Up, Ok, Up, Ok, Up, Ok, Ok, Cancel]);
    let alarm = rig.store.get(0);
    assert_eq!((alarm.hour, alarm.minute), (7, 31));
    assert!(rig.board.printed().contains(&"Enter hour: 06"));
}

#[test]
fn cancel_during_hour_entry_aborts() {
    let mut rig = Rig::new();
    rig.visit(&[Up, Ok, Up, Up, Cancel, Cancel]);
    assert!(!rig.store.get(0).armed);
    assert!(!rig.store.is_enabled());
    assert!(rig.sink.events.is_empty());
}

#[test]
fn confirm_prompt_ignores_up_down_and_cancel_discards() {
    let mut rig = Rig::new();
    rig.visit(&[Up, Ok, Up, Ok, Up, Ok, Up, Down, Cancel, Cancel]);
    assert!(!rig.store.get(0).armed);
    assert!(rig.board.printed().contains(&"Set alarm 1 to 01:01?"));
    assert!(rig.sink.events.is_empty());
}

// ── View Alarms ───────────────────────────────────────────────

#[test]
fn view_lists_only_armed_alarms() {
    let mut rig = Rig::new();
    rig.store.set_alarm(1, 6, 15);
    // OK is ignored; only CANCEL leaves the list.
    rig.visit(&[Down, Down, Ok, Ok, Cancel, Cancel]);

    assert_eq!(rig.board.printed_at("Alarm 2: 06:15"), Some(Placement::at(0, 10)));
    assert!(!rig.board.printed().iter().any(|l| l.starts_with("Alarm 1")));
}

#[test]
fn view_shows_exit_hint() {
    let mut rig = Rig::new();
    rig.store.set_alarm(0, 7, 30);
    rig.visit(&[Down, Down, Ok, Cancel, Cancel]);
    assert_eq!(rig.board.printed_at("Press CANCEL to exit"), Some(Placement::at(0, 50)));
}

#[test]
fn view_with_no_alarms_shows_placeholder() {
    let mut rig = Rig::new();
    rig.visit(&[Down, Down, Ok, Cancel, Cancel]);
    assert!(rig.board.printed().contains(&"No alarms set"));
}

#[test]
fn midnight_alarm_is_listed() {
    let mut rig = Rig::new();
    rig.store.set_alarm(0, 0, 0);
    rig.store.set_alarm(1, 21, 0);
    rig.visit(&[Down, Down, Ok, Cancel, Cancel]);
    assert_eq!(rig.board.printed_at("Alarm 1: 00:00"), Some(Placement::at(0, 10)));
    assert_eq!(rig.board.printed_at("Alarm 2: 21:00"), Some(Placement::at(0, 30)));
}

// ── Delete Alarm ──────────────────────────────────────────────

#[test]
fn delete_selected_slot() {
    let mut rig = Rig::new();
    rig.store.set_alarm(0, 7, 0);
    rig.store.set_alarm(1, 8, 0);
    rig.visit(&[Down, Ok, Up, Ok, Cancel]);

    assert!(rig.store.get(0).armed);
    assert_eq!(*rig.store.get(1), Default::default());
    assert!(rig.sink.contains(&AppEvent::AlarmDeleted { index: 1 }));
    assert!(rig.board.printed().contains(&"Alarm deleted"));
    assert!(rig.store.evaluate(8, 0).is_empty());
}

#[test]
fn delete_screen_shows_the_selected_slot() {
    let mut rig = Rig::new();
    rig.store.set_alarm(0, 7, 0);
    rig.visit(&[Down, Ok, Up, Cancel, Cancel]);

    assert_eq!(rig.board.printed_at("1: 07:00"), Some(Placement::at(0, 30)));
    assert_eq!(rig.board.printed_at("2: --:--"), Some(Placement::at(0, 30)));
}

#[test]
fn delete_selection_wraps_and_cancel_aborts() {
    let mut rig = Rig::new();
    rig.store.set_alarm(0, 7, 0);
    rig.visit(&[Down, Ok, Down, Cancel, Cancel]);
    assert!(rig.store.get(0).armed);
    assert!(rig.board.printed().contains(&"Delete alarm 2?"));
}
