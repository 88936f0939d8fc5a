//! Fixed table of selectable UTC offsets.
//!
//! The menu walks this table in order; the index of the committed entry
//! lives only in RAM.

/// One selectable offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset {
    pub label: &'static str,
    /// Minutes east of UTC.
    pub minutes: i16,
}

const fn offset(label: &'static str, minutes: i16) -> UtcOffset {
    UtcOffset { label, minutes }
}

pub const UTC_OFFSETS: [UtcOffset; 39] = [
    offset("UTC-12:00", -720),
    offset("UTC-11:00", -660),
    offset("UTC-10:00", -600),
    offset("UTC-09:30", -570),
    offset("UTC-09:00", -540),
    offset("UTC-08:00", -480),
    offset("UTC-07:00", -420),
    offset("UTC-06:00", -360),
    offset("UTC-05:30", -330),
    offset("UTC-04:30", -270),
    offset("UTC-04:00", -240),
    offset("UTC-03:30", -210),
    offset("UTC-03:00", -180),
    offset("UTC-02:00", -120),
    offset("UTC-01:00", -60),
    offset("UTC+00:00", 0),
    offset("UTC+01:00", 60),
    offset("UTC+02:00", 120),
    offset("UTC+03:00", 180),
    offset("UTC+03:30", 210),
    offset("UTC+04:00", 240),
    offset("UTC+04:30", 270),
    offset("UTC+05:00", 300),
    offset("UTC+05:30", 330),
    offset("UTC+05:45", 345),
    offset("UTC+06:00", 360),
    offset("UTC+06:30", 390),
    offset("UTC+07:00", 420),
    offset("UTC+08:00", 480),
    offset("UTC+08:45", 525),
    offset("UTC+09:00", 540),
    offset("UTC+09:30", 570),
    offset("UTC+10:00", 600),
    offset("UTC+10:30", 630),
    offset("UTC+11:00", 660),
    offset("UTC+12:00", 720),
    offset("UTC+12:45", 765),
    offset("UTC+13:00", 780),
    offset("UTC+14:00", 840),
];

/// Index of the entry with the given label.
pub fn find(label: &str) -> Option<usize> {
    UTC_OFFSETS.iter().position(|o| o.label == label)
}

/// Step forward through the table, wrapping at the end.
pub const fn next_index(index: usize) -> usize {
    (index + 1) % UTC_OFFSETS.len()
}

/// Step backward through the table, wrapping at the start.
pub const fn prev_index(index: usize) -> usize {
    (index + UTC_OFFSETS.len() - 1) % UTC_OFFSETS.len()
}
