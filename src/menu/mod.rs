//! Four-button configuration menu.
//!
//! ```text
//!  IDLE ──OK──▶ MENU_BROWSE ──OK──▶ screen sub-machine ──▶ MENU_BROWSE
//!   ▲              │  ▲ UP/DOWN
//!   └───CANCEL─────┘  └──────┘
//! ```
//!
//! Every state blocks on [`input::wait_for_button`], so the menu owns the
//! control thread from entry until CANCEL in the browse state.

pub mod input;
pub mod screens;

use log::{debug, info};

use crate::alarm::AlarmStore;
use crate::app::ports::{Board, Button, EventSink, Placement};
use crate::config::MediboxConfig;
use crate::timezone::{self, UTC_OFFSETS, UtcOffset};

use input::wait_for_button;

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

/// Top-level menu entries, in browse order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Screen {
    SetTimezone = 0,
    SetAlarm1 = 1,
    SetAlarm2 = 2,
    ViewAlarms = 3,
    DeleteAlarm = 4,
}

impl Screen {
    pub const COUNT: usize = 5;

    /// Map a browse index back to its screen. Out-of-range indices are a
    /// programming error; release builds fall back to the first screen.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::SetTimezone,
            1 => Self::SetAlarm1,
            2 => Self::SetAlarm2,
            3 => Self::ViewAlarms,
            4 => Self::DeleteAlarm,
            _ => {
                debug_assert!(false, "invalid screen index: {idx}");
                Self::SetTimezone
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SetTimezone => "1 - Set Time Zone",
            Self::SetAlarm1 => "2 - Set Alarm 1",
            Self::SetAlarm2 => "3 - Set Alarm 2",
            Self::ViewAlarms => "4 - View Alarms",
            Self::DeleteAlarm => "5 - Delete Alarm",
        }
    }
}

/// Browse position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    current: usize,
}

impl MenuState {
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn screen(&self) -> Screen {
        Screen::from_index(self.current)
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % Screen::COUNT;
    }

    pub fn prev(&mut self) {
        self.current = (self.current + Screen::COUNT - 1) % Screen::COUNT;
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// Menu state that outlives a single visit: the browse position and the
/// committed timezone.
#[derive(Debug)]
pub struct Menu {
    state: MenuState,
    timezone_index: usize,
}

impl Menu {
    /// Start on the first screen with the configured default timezone.
    pub fn new(config: &MediboxConfig) -> Self {
        let timezone_index = timezone::find(&config.default_utc_offset).unwrap_or_else(|| {
            log::warn!(
                "Unknown UTC offset {:?}, falling back to UTC+00:00",
                config.default_utc_offset.as_str()
            );
            timezone::find("UTC+00:00").unwrap_or(0)
        });
        Self {
            state: MenuState::new(),
            timezone_index,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Currently committed UTC offset.
    pub fn utc_offset(&self) -> UtcOffset {
        UTC_OFFSETS[self.timezone_index]
    }

    /// Browse and dispatch until CANCEL.
    pub fn run(
        &mut self,
        board: &mut impl Board,
        alarms: &mut AlarmStore,
        config: &MediboxConfig,
        sink: &mut impl EventSink,
    ) {
        info!("Menu opened");
        loop {
            let screen = self.state.screen();
            board.print_line(screen.label(), Placement::TOP.cleared());

            match wait_for_button(board, config) {
                Button::Up => self.state.next(),
                Button::Down => self.state.prev(),
                Button::Ok => {
                    debug!("Entering {:?}", screen);
                    self.dispatch(screen, board, alarms, config, sink);
                }
                Button::Cancel => break,
            }
        }
        board.clear();
        info!("Menu closed");
    }

    fn dispatch(
        &mut self,
        screen: Screen,
        board: &mut impl Board,
        alarms: &mut AlarmStore,
        config: &MediboxConfig,
        sink: &mut impl EventSink,
    ) {
        match screen {
            Screen::SetTimezone => {
                screens::set_timezone(board, &mut self.timezone_index, config, sink);
            }
            Screen::SetAlarm1 => screens::set_alarm(board, alarms, 0, config, sink),
            Screen::SetAlarm2 => screens::set_alarm(board, alarms, 1, config, sink),
            Screen::ViewAlarms => screens::view_alarms(board, alarms, config),
            Screen::DeleteAlarm => screens::delete_alarm(board, alarms, config, sink),
        }
    }
}
