//! Cadence timers for the control loop.
//!
//! ```text
//!  now ──▶ Interval::due(now, period) ──▶ run step, restart
//! ```
//!
//! Periods are signed because the reporting period is remote-tunable and
//! unbounded. A period ≤ 0 is due on every check.

/// Elapsed-time check against a monotonic millisecond counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interval {
    last_ms: u64,
}

impl Interval {
    /// Start counting from `now_ms`.
    pub const fn starting_at(now_ms: u64) -> Self {
        Self { last_ms: now_ms }
    }

    /// Restart the interval at `now_ms` without firing.
    pub fn reset(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
    }

    /// `true` (and restart) once `period_ms` has elapsed since the last fire.
    pub fn due(&mut self, now_ms: u64, period_ms: i64) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_ms);
        let fire = match u64::try_from(period_ms) {
            Ok(0) | Err(_) => true,
            Ok(period) => elapsed >= period,
        };
        if fire {
            self.last_ms = now_ms;
        }
        fire
    }
}

/// Seconds to milliseconds, saturating.
pub fn secs_to_ms(secs: i64) -> i64 {
    secs.saturating_mul(1_000)
}
