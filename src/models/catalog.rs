//! Catalog repository.
//!
//! Owns every course and section. Sections live in an arena addressed by
//! [`SectionId`]; removal leaves a hole so handles are never reused.
//!
//! # Ordering
//! Catalog order is course insertion order, then section insertion order
//! within each course. The search and the co-requisite resolver both rely
//! on it for determinism.
//!
//! # Mutation
//! The catalog is a plain value: callers hold it behind whatever
//! single-writer discipline they need and lend `&Catalog` to a search.

use std::collections::HashMap;

use super::{Course, Section, SectionId, SectionKey, SectionKind, TimeSlot};
use crate::corequisite::{self, RebindReport};

/// Replacement field values for [`Catalog::update_section`].
#[derive(Debug, Clone)]
pub struct SectionEdit {
    /// New section code.
    pub section_code: String,
    /// New instructor name.
    pub instructor: String,
    /// New kind.
    pub kind: SectionKind,
    /// New slot list.
    pub time_slots: Vec<TimeSlot>,
    /// Co-requisite targets that replace the current link set.
    pub corequisites: Vec<SectionKey>,
}

impl SectionEdit {
    /// Starts an edit with the given code and instructor.
    pub fn new(section_code: impl Into<String>, instructor: impl Into<String>) -> Self {
        Self {
            section_code: section_code.into(),
            instructor: instructor.into(),
            kind: SectionKind::Generic,
            time_slots: Vec::new(),
            corequisites: Vec::new(),
        }
    }

    /// Sets the kind.
    pub fn with_kind(mut self, kind: SectionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends a slot.
    pub fn with_slot(mut self, weekday: u8, period_start: u8, period_end: u8) -> Self {
        self.time_slots
            .push(TimeSlot::new(weekday, period_start, period_end));
        self
    }

    /// Adds a co-requisite target.
    pub fn with_corequisite(mut self, key: SectionKey) -> Self {
        self.corequisites.push(key);
        self
    }
}

/// Course and section repository.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    course_index: HashMap<String, usize>,
    arena: Vec<Option<Section>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course. Returns `false` if the id is already taken.
    pub fn add_course(&mut self, mut course: Course) -> bool {
        if self.course_index.contains_key(&course.id) {
            return false;
        }
        course.sections.clear();
        self.course_index
            .insert(course.id.clone(), self.courses.len());
        self.courses.push(course);
        true
    }

    /// Builder: adds a course and returns self.
    pub fn with_course(mut self, course: Course) -> Self {
        self.add_course(course);
        self
    }

    /// Looks up a course.
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.course_index.get(course_id).map(|&i| &self.courses[i])
    }

    /// Mutable course lookup for name, prerequisite and color edits.
    pub fn course_mut(&mut self, course_id: &str) -> Option<&mut Course> {
        let idx = *self.course_index.get(course_id)?;
        self.courses.get_mut(idx)
    }

    /// Courses in insertion order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Number of courses.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of live sections.
    pub fn section_count(&self) -> usize {
        self.arena.iter().filter(|s| s.is_some()).count()
    }

    /// Adds a section to its course.
    ///
    /// Returns `None` when the course is unknown, when a slot is invalid
    /// (see [`TimeSlot::is_valid`]), or when the course already holds a
    /// section with the same [`SectionKey`] (idempotent insert).
    /// Any links on the incoming value are discarded; use
    /// [`corequisite::link`] afterwards.
    pub fn add_section(&mut self, section: Section) -> Option<SectionId> {
        let key = section.key();
        let duplicate = self.sections_of(&key.course_id).any(|s| s.matches_key(&key));
        if duplicate {
            return None;
        }
        self.insert_section(section)
    }

    /// Inserts without the duplicate-key check.
    ///
    /// Used when loading a saved catalog, where repeated keys created by
    /// earlier edits must come back as distinct sections.
    pub(crate) fn insert_section(&mut self, mut section: Section) -> Option<SectionId> {
        let Some(&course_idx) = self.course_index.get(&section.course_id) else {
            log::debug!(
                "section {} references unknown course; ignored",
                section.key()
            );
            return None;
        };
        if let Some(slot) = section.time_slots.iter().find(|t| !t.is_valid()) {
            log::debug!("section {} has invalid slot {slot:?}; ignored", section.key());
            return None;
        }

        let id = SectionId(self.arena.len() as u32);
        section.id = Some(id);
        section.corequisites.clear();
        self.arena.push(Some(section));
        self.courses[course_idx].sections.push(id);
        Some(id)
    }

    /// Looks up a live section.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.arena.get(id.index()).and_then(|s| s.as_ref())
    }

    pub(crate) fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.arena.get_mut(id.index()).and_then(|s| s.as_mut())
    }

    /// All live sections in catalog order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.courses
            .iter()
            .flat_map(|c| c.sections.iter())
            .filter_map(|&id| self.section(id))
    }

    /// Sections of one course in insertion order.
    pub fn sections_of<'a>(&'a self, course_id: &str) -> impl Iterator<Item = &'a Section> + 'a {
        self.course(course_id)
            .into_iter()
            .flat_map(|c| c.sections.iter())
            .filter_map(|&id| self.section(id))
    }

    /// Handles of every section matching `key`, in catalog order.
    pub fn find_by_key(&self, key: &SectionKey) -> Vec<SectionId> {
        self.sections_of(&key.course_id)
            .filter(|s| s.matches_key(key))
            .filter_map(|s| s.id)
            .collect()
    }

    /// Edits a section in place and rebinds its co-requisite links.
    ///
    /// The section keeps its handle and course. Returns `None`, leaving the
    /// section untouched, if `id` is not live or a new slot is invalid.
    pub fn update_section(&mut self, id: SectionId, edit: SectionEdit) -> Option<RebindReport> {
        if let Some(slot) = edit.time_slots.iter().find(|t| !t.is_valid()) {
            log::debug!("edit of {id} has invalid slot {slot:?}; refused");
            return None;
        }
        let section = self.section_mut(id)?;
        section.section_code = edit.section_code;
        section.instructor = edit.instructor;
        section.kind = edit.kind;
        section.time_slots = edit.time_slots;
        Some(corequisite::rebind(self, id, &edit.corequisites))
    }

    /// Removes a section after scrubbing every link that points at it.
    pub fn remove_section(&mut self, id: SectionId) -> Option<Section> {
        self.section(id)?;
        corequisite::unlink_all(self, id);

        let mut section = self.arena.get_mut(id.index())?.take()?;
        section.corequisites.clear();
        if let Some(&ci) = self.course_index.get(&section.course_id) {
            self.courses[ci].sections.retain(|&s| s != id);
        }
        Some(section)
    }

    /// Removes a course and all of its sections.
    pub fn remove_course(&mut self, course_id: &str) -> Option<Course> {
        let idx = *self.course_index.get(course_id)?;
        let ids = self.courses[idx].sections.clone();
        for id in ids {
            self.remove_section(id);
        }

        let course = self.courses.remove(idx);
        self.course_index = self
            .courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Some(course)
    }
}
