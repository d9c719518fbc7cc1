//! Weekday/period conflict index.
//!
//! Buckets every occupied `(weekday, period)` cell to the items occupying
//! it, so an overlap query for a slot costs one lookup per period instead
//! of a scan over every placed item.
//!
//! # Incremental Use
//! The search places and removes sections in strict stack order.
//! [`ConflictIndex::insert`] appends to each touched bucket and
//! [`ConflictIndex::retract`] pops the same entries, so the index always
//! mirrors the current partial assignment without being rebuilt.
//!
//! # Complexity
//! Build: O(sum of occupied periods). Query: O(periods in the slot).

use std::collections::{BTreeSet, HashMap};

use crate::models::{SectionId, TimeSlot};

/// An item that can occupy periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// A catalog section.
    Section(SectionId),
    /// A busy interval, by its caller-assigned id.
    Busy(u64),
}

/// Per-weekday, per-period bucket index.
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    buckets: HashMap<(u8, u8), Vec<Occupant>>,
}

impl ConflictIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from `(occupant, slots)` pairs.
    pub fn build<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = (Occupant, &'a [TimeSlot])>,
    {
        let mut index = Self::new();
        for (occupant, slots) in items {
            index.insert(occupant, slots);
        }
        index
    }

    /// Records `occupant` in every cell covered by `slots`.
    pub fn insert(&mut self, occupant: Occupant, slots: &[TimeSlot]) {
        for slot in slots {
            for period in slot.periods() {
                self.buckets
                    .entry((slot.weekday, period))
                    .or_default()
                    .push(occupant);
            }
        }
    }

    /// Undoes the most recent [`insert`](Self::insert) of `occupant`.
    ///
    /// Must be called in reverse insertion order.
    pub fn retract(&mut self, occupant: Occupant, slots: &[TimeSlot]) {
        for slot in slots.iter().rev() {
            for period in slot.periods() {
                let key = (slot.weekday, period);
                if let Some(bucket) = self.buckets.get_mut(&key) {
                    let popped = bucket.pop();
                    debug_assert_eq!(popped, Some(occupant), "retract out of stack order");
                    if bucket.is_empty() {
                        self.buckets.remove(&key);
                    }
                }
            }
        }
    }

    /// Items occupying one cell.
    pub fn lookup(&self, weekday: u8, period: u8) -> &[Occupant] {
        self.buckets
            .get(&(weekday, period))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any cell covered by `slots` is occupied.
    pub fn conflicts(&self, slots: &[TimeSlot]) -> bool {
        self.first_conflict(slots).is_some()
    }

    /// First occupant found in a cell covered by `slots`.
    pub fn first_conflict(&self, slots: &[TimeSlot]) -> Option<Occupant> {
        slots.iter().find_map(|slot| {
            slot.periods()
                .find_map(|p| self.lookup(slot.weekday, p).first().copied())
        })
    }

    /// Weekdays on which `slots` hit an occupied cell, ascending.
    pub fn conflicting_weekdays(&self, slots: &[TimeSlot]) -> BTreeSet<u8> {
        slots
            .iter()
            .filter(|slot| slot.periods().any(|p| !self.lookup(slot.weekday, p).is_empty()))
            .map(|slot| slot.weekday)
            .collect()
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.buckets.len()
    }

    /// Whether nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
