//! Section (course offering) model.
//!
//! A section is one concrete offering of a course: a room code, an
//! instructor, a kind, and a fixed set of weekly time slots.
//!
//! # Identity
//! Two sections may carry identical fields, so identity is the
//! catalog-assigned [`SectionId`] handle, never structural equality.
//! [`SectionKey`] is the natural `(course, code)` key used by data entry
//! and persisted references.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::TimeSlot;

/// Stable arena handle of a section inside a [`Catalog`](super::Catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(pub(crate) u32);

impl SectionId {
    /// Raw arena index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Natural key of a section: owning course plus section code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionKey {
    /// Owning course identifier.
    pub course_id: String,
    /// Section code (doubles as the room identifier).
    pub section_code: String,
}

impl SectionKey {
    /// Creates a key.
    pub fn new(course_id: impl Into<String>, section_code: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            section_code: section_code.into(),
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.course_id, self.section_code)
    }
}

/// Section kind.
///
/// A student holds at most one `Lecture` and one `Lab` per course unless
/// the sections are explicitly paired as co-requisites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// Theory lecture.
    Lecture,
    /// Lab or exercise session.
    Lab,
    /// Plain section with no per-kind exclusivity.
    #[default]
    Generic,
}

impl SectionKind {
    /// Whether the kind is subject to one-per-course exclusivity.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Self::Lecture | Self::Lab)
    }
}

/// A schedulable offering of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    #[serde(skip)]
    pub(crate) id: Option<SectionId>,
    /// Owning course identifier.
    pub course_id: String,
    /// Section code, also used as the literal room identifier.
    pub section_code: String,
    /// Instructor display name.
    pub instructor: String,
    /// Section kind.
    pub kind: SectionKind,
    /// Weekly slots in insertion order.
    pub time_slots: Vec<TimeSlot>,
    #[serde(skip)]
    pub(crate) corequisites: BTreeSet<SectionId>,
}

impl Section {
    /// Creates a detached `Generic` section with no slots and no links.
    pub fn new(
        course_id: impl Into<String>,
        section_code: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            course_id: course_id.into(),
            section_code: section_code.into(),
            instructor: instructor.into(),
            kind: SectionKind::Generic,
            time_slots: Vec::new(),
            corequisites: BTreeSet::new(),
        }
    }

    /// Sets the kind.
    pub fn with_kind(mut self, kind: SectionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends a weekly slot.
    pub fn with_slot(mut self, weekday: u8, period_start: u8, period_end: u8) -> Self {
        self.time_slots
            .push(TimeSlot::new(weekday, period_start, period_end));
        self
    }

    /// Replaces all slots.
    pub fn with_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.time_slots = slots;
        self
    }

    /// Catalog handle, `None` until the section is added to a catalog.
    pub fn id(&self) -> Option<SectionId> {
        self.id
    }

    /// Natural key.
    pub fn key(&self) -> SectionKey {
        SectionKey::new(&self.course_id, &self.section_code)
    }

    /// Whether `key` names this section.
    pub fn matches_key(&self, key: &SectionKey) -> bool {
        self.course_id == key.course_id && self.section_code == key.section_code
    }

    /// Co-requisite partners.
    pub fn corequisites(&self) -> &BTreeSet<SectionId> {
        &self.corequisites
    }

    /// Whether this section lists `other` as a co-requisite.
    pub fn lists(&self, other: SectionId) -> bool {
        self.corequisites.contains(&other)
    }

    /// Instructor name trimmed and lowercased, for reuse comparisons.
    pub fn normalized_instructor(&self) -> String {
        self.instructor.trim().to_lowercase()
    }

    /// Whether any slot of this section overlaps `slot`.
    pub fn overlaps_slot(&self, slot: &TimeSlot) -> bool {
        self.time_slots.iter().any(|s| s.overlaps(slot))
    }

    /// Whether any pair of slots overlaps.
    pub fn overlaps(&self, other: &Section) -> bool {
        other.time_slots.iter().any(|s| self.overlaps_slot(s))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.section_code, self.instructor)?;
        for (i, slot) in self.time_slots.iter().enumerate() {
            let sep = if i == 0 { " - " } else { ", " };
            write!(f, "{sep}[{slot}]")?;
        }
        Ok(())
    }
}
