//! Alarm schedule state and the snooze rule.
//!
//! Two fixed slots, identified by position. A slot is either *armed*
//! (configured by the user or by a snooze) or not; a deleted slot and a
//! midnight alarm both read 00:00, and `armed` is what tells them apart.

pub mod ring;

/// Number of alarm slots.
pub const NUM_ALARMS: usize = 2;

/// Indices of alarms due in the current minute.
pub type DueAlarms = heapless::Vec<usize, NUM_ALARMS>;

/// One alarm slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alarm {
    pub hour: u8,
    pub minute: u8,
    /// Already rung (or stopped) for the current occurrence.
    pub triggered: bool,
    /// Configured; only armed alarms are evaluated.
    pub armed: bool,
}

impl Alarm {
    fn matches(&self, hour: u8, minute: u8) -> bool {
        self.hour == hour && self.minute == minute
    }
}

/// Owner of every alarm slot.
#[derive(Debug, Clone)]
pub struct AlarmStore {
    alarms: [Alarm; NUM_ALARMS],
    enabled: bool,
    snooze_minutes: u8,
}

impl AlarmStore {
    pub fn new(snooze_minutes: u8) -> Self {
        Self {
            alarms: [Alarm::default(); NUM_ALARMS],
            enabled: false,
            snooze_minutes,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn get(&self, index: usize) -> &Alarm {
        &self.alarms[index]
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn snooze_minutes(&self) -> u8 {
        self.snooze_minutes
    }

    /// Armed slots with their index, in slot order.
    pub fn armed(&self) -> impl Iterator<Item = (usize, &Alarm)> {
        self.alarms.iter().enumerate().filter(|(_, a)| a.armed)
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Overwrite a slot's schedule and arm it.
    pub fn set_alarm(&mut self, index: usize, hour: u8, minute: u8) {
        debug_assert!(hour < 24 && minute < 60, "alarm time {hour}:{minute}");
        self.alarms[index] = Alarm {
            hour: hour % 24,
            minute: minute % 60,
            triggered: false,
            armed: true,
        };
        self.enabled = true;
    }

    /// Push a slot forward by the snooze length, carrying into the hour.
    pub fn snooze(&mut self, index: usize) {
        let alarm = &mut self.alarms[index];
        let total = u16::from(alarm.minute) + u16::from(self.snooze_minutes);
        alarm.minute = (total % 60) as u8;
        alarm.hour = ((u16::from(alarm.hour) + total / 60) % 24) as u8;
        alarm.triggered = false;
        alarm.armed = true;
        self.enabled = true;
    }

    /// Reset a slot to its unconfigured state.
    pub fn delete_alarm(&mut self, index: usize) {
        self.alarms[index] = Alarm::default();
    }

    pub fn mark_triggered(&mut self, index: usize, value: bool) {
        self.alarms[index].triggered = value;
    }

    /// Indices of armed, untriggered alarms scheduled for `hour:minute`.
    ///
    /// Armed alarms that do not match have their `triggered` flag cleared,
    /// so a stopped alarm fires again at its next occurrence.
    pub fn evaluate(&mut self, hour: u8, minute: u8) -> DueAlarms {
        let mut due = DueAlarms::new();
        if !self.enabled {
            return due;
        }
        for (i, alarm) in self.alarms.iter_mut().enumerate() {
            if !alarm.armed {
                continue;
            }
            if !alarm.matches(hour, minute) {
                alarm.triggered = false;
            } else if !alarm.triggered {
                // Capacity equals the slot count.
                let _ = due.push(i);
            }
        }
        due
    }
}
