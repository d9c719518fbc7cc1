//! Schedule assignment (search result) model.
//!
//! An assignment is one clash-free choice of sections. It is a value
//! snapshot taken when the search reaches a leaf; later catalog edits do not
//! touch it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Section, SectionId, TimeSlot};

/// One complete timetable produced by the search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    sections: Vec<Section>,
}

impl ScheduleAssignment {
    /// Wraps a list of chosen sections, in placement order.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Chosen sections in placement order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Handles of the chosen sections.
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().filter_map(Section::id).collect()
    }

    /// Distinct course ids present.
    pub fn course_ids(&self) -> BTreeSet<&str> {
        self.sections.iter().map(|s| s.course_id.as_str()).collect()
    }

    /// Whether a section of `course_id` is present.
    pub fn contains_course(&self, course_id: &str) -> bool {
        self.sections.iter().any(|s| s.course_id == course_id)
    }

    /// Whether the section with handle `id` is present.
    pub fn contains_section(&self, id: SectionId) -> bool {
        self.sections.iter().any(|s| s.id() == Some(id))
    }

    /// Sections of one course.
    pub fn sections_for_course(&self, course_id: &str) -> Vec<&Section> {
        self.sections
            .iter()
            .filter(|s| s.course_id == course_id)
            .collect()
    }

    /// Every occupied slot with its section.
    pub fn occupied_slots(&self) -> impl Iterator<Item = (&Section, &TimeSlot)> {
        self.sections
            .iter()
            .flat_map(|s| s.time_slots.iter().map(move |t| (s, t)))
    }

    /// Sections ordered by their earliest weekday, then earliest period.
    ///
    /// Sections without slots sort last.
    pub fn sorted_by_first_slot(&self) -> Vec<&Section> {
        let mut sorted: Vec<&Section> = self.sections.iter().collect();
        sorted.sort_by_key(|s| {
            let day = s.time_slots.iter().map(|t| t.weekday).min().unwrap_or(u8::MAX);
            let period = s
                .time_slots
                .iter()
                .map(|t| t.period_start)
                .min()
                .unwrap_or(u8::MAX);
            (day, period)
        });
        sorted
    }

    /// Number of chosen sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether nothing was chosen.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MONDAY, TUESDAY, WEDNESDAY};

    fn sample() -> ScheduleAssignment {
        ScheduleAssignment::new(vec![
            Section::new("IT1110", "L02", "B").with_slot(WEDNESDAY, 7, 9),
            Section::new("MI1111", "L05", "C").with_slot(MONDAY, 3, 5),
            Section::new("MI1111", "BT1", "D").with_slot(TUESDAY, 1, 2),
        ])
    }

    #[test]
    fn test_course_queries() {
        let a = sample();
        assert_eq!(a.len(), 3);
        assert_eq!(a.course_ids().into_iter().collect::<Vec<_>>(), vec!["IT1110", "MI1111"]);
        assert!(a.contains_course("MI1111"));
        assert!(!a.contains_course("PH1110"));
        assert_eq!(a.sections_for_course("MI1111").len(), 2);
    }

    #[test]
    fn test_detached_sections_have_no_ids() {
        assert!(sample().section_ids().is_empty());
    }

    #[test]
    fn test_occupied_slots() {
        let a = sample();
        assert_eq!(a.occupied_slots().count(), 3);
    }

    #[test]
    fn test_sorted_by_first_slot() {
        let a = sample();
        let codes: Vec<_> = a
            .sorted_by_first_slot()
            .iter()
            .map(|s| s.section_code.as_str())
            .collect();
        assert_eq!(codes, vec!["L05", "BT1", "L02"]);
    }

    #[test]
    fn test_empty() {
        let a = ScheduleAssignment::default();
        assert!(a.is_empty());
        assert!(a.course_ids().is_empty());
    }
}
