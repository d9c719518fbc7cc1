//! Period table and busy intervals.
//!
//! Maps wall-clock times onto numbered teaching periods and converts
//! user-declared busy intervals into [`TimeSlot`]s the search can block on.
//!
//! # Time Model
//! Clock times are minutes since midnight. Each period is a half-open
//! window `[start, end)` for start times; an interval *ending* exactly on a
//! period's end minute still belongs to that period.
//!
//! # Snapping
//! A time outside every named window has no period. In
//! [`SnapMode::Strict`] such an interval is dropped; in
//! [`SnapMode::Lenient`] it snaps to the period with the smallest minute
//! distance (earlier period wins ties).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TimeSlot;

/// A wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
}

impl ClockTime {
    /// Creates a clock time.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Minutes since midnight.
    #[inline]
    pub fn total_minutes(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A named teaching period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Period number (1-based).
    pub number: u8,
    /// Window start, minutes since midnight (inclusive).
    pub start_min: u16,
    /// Window end, minutes since midnight (exclusive).
    pub end_min: u16,
}

impl Period {
    /// Creates a period from wall-clock bounds.
    pub fn new(number: u8, start: ClockTime, end: ClockTime) -> Self {
        Self {
            number,
            start_min: start.total_minutes(),
            end_min: end.total_minutes(),
        }
    }

    fn contains_start(&self, minute: u16) -> bool {
        minute >= self.start_min && minute < self.end_min
    }

    fn contains_end(&self, minute: u16) -> bool {
        minute > self.start_min && minute <= self.end_min
    }

    fn distance(&self, minute: u16) -> u16 {
        if minute < self.start_min {
            self.start_min - minute
        } else if minute > self.end_min {
            minute - self.end_min
        } else {
            0
        }
    }
}

/// How busy-interval times that miss every period window are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapMode {
    /// Drop the interval.
    Strict,
    /// Snap to the nearest period by minute distance.
    #[default]
    Lenient,
}

/// Ordered table of teaching periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTable {
    periods: Vec<Period>,
}

impl PeriodTable {
    /// Creates a table from explicit periods (kept in the given order).
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    /// The standard 13-period day: six morning, five afternoon, two evening.
    pub fn standard() -> Self {
        let windows = [
            ((7, 0), (7, 50)),
            ((7, 55), (8, 45)),
            ((8, 50), (9, 40)),
            ((9, 50), (10, 40)),
            ((10, 45), (11, 35)),
            ((11, 40), (12, 30)),
            ((13, 30), (14, 20)),
            ((14, 25), (15, 15)),
            ((15, 20), (16, 10)),
            ((16, 20), (17, 10)),
            ((17, 15), (18, 5)),
            ((18, 20), (19, 10)),
            ((19, 15), (20, 5)),
        ];
        let periods = windows
            .iter()
            .enumerate()
            .map(|(i, &((sh, sm), (eh, em)))| {
                Period::new(i as u8 + 1, ClockTime::new(sh, sm), ClockTime::new(eh, em))
            })
            .collect();
        Self { periods }
    }

    /// All periods in table order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the table has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Period whose window contains `time` as a start time.
    pub fn period_at(&self, time: ClockTime) -> Option<u8> {
        let m = time.total_minutes();
        self.periods
            .iter()
            .find(|p| p.contains_start(m))
            .map(|p| p.number)
    }

    /// Period whose window contains `time` as an end time.
    pub fn period_ending_at(&self, time: ClockTime) -> Option<u8> {
        let m = time.total_minutes();
        self.periods
            .iter()
            .find(|p| p.contains_end(m))
            .map(|p| p.number)
    }

    /// Period with the smallest minute distance to `time`.
    ///
    /// Returns `None` only for an empty table.
    pub fn nearest_period(&self, time: ClockTime) -> Option<u8> {
        let m = time.total_minutes();
        let mut best: Option<(u16, u8)> = None;
        for p in &self.periods {
            let d = p.distance(m);
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, p.number));
            }
        }
        best.map(|(_, n)| n)
    }
}

impl Default for PeriodTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// A user-declared unavailable window on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    /// Caller-assigned identifier.
    pub id: u64,
    /// Weekday (2 = Monday .. 8 = Sunday).
    pub weekday: u8,
    /// Start of the unavailable window.
    pub start_time: ClockTime,
    /// End of the unavailable window.
    pub end_time: ClockTime,
    /// Free-text reason shown to the user.
    pub reason: String,
}

impl BusyInterval {
    /// Creates a busy interval with an empty reason.
    pub fn new(id: u64, weekday: u8, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            id,
            weekday,
            start_time,
            end_time,
            reason: String::new(),
        }
    }

    /// Sets the reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Converts to a period-based slot.
    ///
    /// Returns `None` when the window is empty, when strict conversion
    /// misses a period, or when snapping inverts the range.
    pub fn to_time_slot(&self, table: &PeriodTable, mode: SnapMode) -> Option<TimeSlot> {
        if self.start_time >= self.end_time {
            return None;
        }

        let exact_start = table.period_at(self.start_time);
        let exact_end = table.period_ending_at(self.end_time);

        let (start, end) = match mode {
            SnapMode::Strict => (exact_start?, exact_end?),
            SnapMode::Lenient => (
                exact_start.or_else(|| table.nearest_period(self.start_time))?,
                exact_end.or_else(|| table.nearest_period(self.end_time))?,
            ),
        };

        if start > end {
            return None;
        }
        Some(TimeSlot::new(self.weekday, start, end))
    }
}

impl fmt::Display for BusyInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = super::weekday_name(self.weekday).unwrap_or("?");
        write!(f, "{day} ({}-{})", self.start_time, self.end_time)?;
        if !self.reason.is_empty() {
            write!(f, " - {}", self.reason)?;
        }
        Ok(())
    }
}
