//! Room and instructor reuse checks.
//!
//! A candidate section may not share a room (its section code) or an
//! instructor with another section at an overlapping time. Both checks
//! index the relevant sections by weekday/period and report every clashing
//! weekday, not just the first.

use std::collections::BTreeSet;

use crate::conflict::{ConflictIndex, Occupant};
use crate::error::{RoomConflict, TeacherConflict};
use crate::models::{Catalog, Section, SectionId};

/// Which sections a reuse check compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReuseScope<'a> {
    /// Every section in the catalog.
    Catalog,
    /// Only sections of the named course.
    Course(&'a str),
}

/// Rejects `candidate` if another section uses its room at an overlapping time.
///
/// `exclude` skips the section being edited in place.
pub fn check_room_conflict(
    candidate: &Section,
    catalog: &Catalog,
    scope: ReuseScope<'_>,
    exclude: Option<SectionId>,
) -> Result<(), RoomConflict> {
    let room = candidate.section_code.as_str();
    let weekdays = clashing_weekdays(candidate, catalog, scope, exclude, |s| {
        s.section_code == room
    });
    if weekdays.is_empty() {
        Ok(())
    } else {
        Err(RoomConflict {
            room: room.to_string(),
            weekdays,
        })
    }
}

/// Rejects `candidate` if its instructor already teaches at an overlapping time.
///
/// Names compare trimmed and case-insensitively; a blank name never clashes.
pub fn check_teacher_conflict(
    candidate: &Section,
    catalog: &Catalog,
    scope: ReuseScope<'_>,
    exclude: Option<SectionId>,
) -> Result<(), TeacherConflict> {
    let name = candidate.normalized_instructor();
    if name.is_empty() {
        return Ok(());
    }
    let weekdays = clashing_weekdays(candidate, catalog, scope, exclude, |s| {
        s.normalized_instructor() == name
    });
    if weekdays.is_empty() {
        Ok(())
    } else {
        Err(TeacherConflict {
            name: candidate.instructor.trim().to_string(),
            weekdays,
        })
    }
}

fn clashing_weekdays<F>(
    candidate: &Section,
    catalog: &Catalog,
    scope: ReuseScope<'_>,
    exclude: Option<SectionId>,
    same_resource: F,
) -> BTreeSet<u8>
where
    F: Fn(&Section) -> bool,
{
    let pool: Vec<&Section> = match scope {
        ReuseScope::Catalog => catalog.sections().collect(),
        ReuseScope::Course(course_id) => catalog.sections_of(course_id).collect(),
    };

    let index = ConflictIndex::build(pool.into_iter().filter_map(|s| {
        let id = s.id()?;
        let skip = Some(id) == exclude || Some(id) == candidate.id() || !same_resource(s);
        (!skip).then(|| (Occupant::Section(id), s.time_slots.as_slice()))
    }));
    index.conflicting_weekdays(&candidate.time_slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, FRIDAY, MONDAY, TUESDAY, WEDNESDAY};

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new()
            .with_course(Course::new("MI1111", "Calculus 1"))
            .with_course(Course::new("IT1110", "Intro to Computing"));
        catalog.add_section(
            Section::new("MI1111", "D9-101", "Le Van C")
                .with_slot(MONDAY, 1, 3)
                .with_slot(WEDNESDAY, 1, 2),
        );
        catalog.add_section(Section::new("IT1110", "D9-101", "Tran Thi B").with_slot(FRIDAY, 7, 9));
        catalog.add_section(Section::new("IT1110", "TC-205", "Le Van C").with_slot(TUESDAY, 4, 6));
        catalog
    }

    #[test]
    fn test_room_free() {
        let catalog = sample_catalog();
        let candidate = Section::new("IT1110", "D9-101", "X").with_slot(MONDAY, 4, 6);
        assert!(check_room_conflict(&candidate, &catalog, ReuseScope::Catalog, None).is_ok());
    }

    #[test]
    fn test_room_conflict_collects_all_weekdays() {
        let catalog = sample_catalog();
        let candidate = Section::new("PH1110", "D9-101", "X")
            .with_slot(FRIDAY, 9, 10)
            .with_slot(MONDAY, 3, 3)
            .with_slot(WEDNESDAY, 2, 4)
            .with_slot(MONDAY, 1, 1);
        let err = check_room_conflict(&candidate, &catalog, ReuseScope::Catalog, None).unwrap_err();
        assert_eq!(err.room, "D9-101");
        assert_eq!(
            err.weekdays.into_iter().collect::<Vec<_>>(),
            vec![MONDAY, WEDNESDAY, FRIDAY]
        );
    }

    #[test]
    fn test_room_course_scope() {
        let catalog = sample_catalog();
        let candidate = Section::new("IT1110", "D9-101", "X").with_slot(MONDAY, 1, 1);
        // Only MI1111 uses D9-101 on Monday, so the IT1110 scope is clear.
        assert!(check_room_conflict(&candidate, &catalog, ReuseScope::Course("IT1110"), None).is_ok());
        assert!(check_room_conflict(&candidate, &catalog, ReuseScope::Catalog, None).is_err());
    }

    #[test]
    fn test_room_exclude_self_when_editing() {
        let catalog = sample_catalog();
        let id = catalog.sections_of("IT1110").next().unwrap().id().unwrap();
        let mut edited = catalog.section(id).unwrap().clone();
        edited.time_slots[0].period_end = 10;
        assert!(check_room_conflict(&edited, &catalog, ReuseScope::Catalog, Some(id)).is_ok());
    }

    #[test]
    fn test_teacher_conflict_normalized() {
        let catalog = sample_catalog();
        let candidate = Section::new("PH1110", "X1", "  le van c ").with_slot(TUESDAY, 6, 7);
        let err =
            check_teacher_conflict(&candidate, &catalog, ReuseScope::Catalog, None).unwrap_err();
        assert_eq!(err.name, "le van c");
        assert_eq!(err.weekdays.into_iter().collect::<Vec<_>>(), vec![TUESDAY]);
    }

    #[test]
    fn test_teacher_touching_is_free() {
        let catalog = sample_catalog();
        let candidate = Section::new("PH1110", "X1", "Le Van C").with_slot(TUESDAY, 7, 8);
        assert!(check_teacher_conflict(&candidate, &catalog, ReuseScope::Catalog, None).is_ok());
    }

    #[test]
    fn test_blank_teacher_never_clashes() {
        let mut catalog = sample_catalog();
        catalog.add_section(Section::new("MI1111", "Z1", " ").with_slot(MONDAY, 1, 1));
        let candidate = Section::new("PH1110", "X1", "").with_slot(MONDAY, 1, 1);
        assert!(check_teacher_conflict(&candidate, &catalog, ReuseScope::Catalog, None).is_ok());
    }
}
