//! Weekly time slots.
//!
//! A slot is a weekday plus an inclusive range of teaching periods.
//!
//! # Weekday Numbering
//! Weekdays follow the local convention: 2 = Monday through 8 = Sunday.
//! Periods are numbered from 1.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monday.
pub const MONDAY: u8 = 2;
/// Tuesday.
pub const TUESDAY: u8 = 3;
/// Wednesday.
pub const WEDNESDAY: u8 = 4;
/// Thursday.
pub const THURSDAY: u8 = 5;
/// Friday.
pub const FRIDAY: u8 = 6;
/// Saturday.
pub const SATURDAY: u8 = 7;
/// Sunday.
pub const SUNDAY: u8 = 8;

/// Short English name of a weekday, or `None` outside `2..=8`.
pub fn weekday_name(weekday: u8) -> Option<&'static str> {
    match weekday {
        MONDAY => Some("Mon"),
        TUESDAY => Some("Tue"),
        WEDNESDAY => Some("Wed"),
        THURSDAY => Some("Thu"),
        FRIDAY => Some("Fri"),
        SATURDAY => Some("Sat"),
        SUNDAY => Some("Sun"),
        _ => None,
    }
}

/// A weekday and an inclusive period range `[period_start, period_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Weekday (2 = Monday .. 8 = Sunday).
    pub weekday: u8,
    /// First occupied period (inclusive).
    pub period_start: u8,
    /// Last occupied period (inclusive).
    pub period_end: u8,
}

impl TimeSlot {
    /// Creates a new slot. See [`is_valid`](Self::is_valid) for the range rules.
    pub const fn new(weekday: u8, period_start: u8, period_end: u8) -> Self {
        Self {
            weekday,
            period_start,
            period_end,
        }
    }

    /// Whether the weekday is in `2..=8`, periods start at 1 or later, and
    /// the range is not inverted.
    ///
    /// The catalog refuses sections carrying an invalid slot.
    pub fn is_valid(&self) -> bool {
        (MONDAY..=SUNDAY).contains(&self.weekday)
            && self.period_start >= 1
            && self.period_end >= self.period_start
    }

    /// Whether two slots share at least one period on the same weekday.
    ///
    /// Touching ranges (`end = 3`, `start = 4`) do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(self, other)
    }

    /// Periods covered by this slot. Empty when `period_end < period_start`.
    pub fn periods(&self) -> impl Iterator<Item = u8> {
        self.period_start..=self.period_end
    }

    /// Number of periods covered.
    pub fn len(&self) -> usize {
        if self.period_end < self.period_start {
            0
        } else {
            (self.period_end - self.period_start) as usize + 1
        }
    }

    /// Whether the slot covers no period at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Overlap predicate over inclusive period ranges.
#[inline]
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    if a.weekday != b.weekday {
        return false;
    }
    !(a.period_end < b.period_start || a.period_start > b.period_end)
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match weekday_name(self.weekday) {
            Some(name) => write!(f, "{name} {}-{}", self.period_start, self.period_end),
            None => write!(
                f,
                "day{} {}-{}",
                self.weekday, self.period_start, self.period_end
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(TimeSlot::new(MONDAY, 1, 1).is_valid());
        assert!(TimeSlot::new(SUNDAY, 4, 13).is_valid());
        assert!(!TimeSlot::new(MONDAY, 5, 4).is_valid());
        assert!(!TimeSlot::new(MONDAY, 0, 2).is_valid());
        assert!(!TimeSlot::new(1, 1, 2).is_valid());
        assert!(!TimeSlot::new(9, 1, 2).is_valid());
    }

    #[test]
    fn test_overlap_same_day() {
        let a = TimeSlot::new(MONDAY, 1, 3);
        let b = TimeSlot::new(MONDAY, 3, 5);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = TimeSlot::new(MONDAY, 1, 3);
        let b = TimeSlot::new(MONDAY, 4, 6);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_different_days_never_overlap() {
        let a = TimeSlot::new(MONDAY, 1, 6);
        let b = TimeSlot::new(TUESDAY, 1, 6);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = TimeSlot::new(FRIDAY, 1, 10);
        let inner = TimeSlot::new(FRIDAY, 4, 5);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_periods_and_len() {
        let s = TimeSlot::new(WEDNESDAY, 7, 9);
        assert_eq!(s.periods().collect::<Vec<_>>(), vec![7, 8, 9]);
        assert_eq!(s.len(), 3);

        let inverted = TimeSlot::new(WEDNESDAY, 5, 4);
        assert!(inverted.is_empty());
        assert_eq!(inverted.periods().count(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeSlot::new(MONDAY, 1, 3).to_string(), "Mon 1-3");
        assert_eq!(TimeSlot::new(SUNDAY, 12, 13).to_string(), "Sun 12-13");
        assert_eq!(TimeSlot::new(1, 2, 2).to_string(), "day1 2-2");
    }
}
