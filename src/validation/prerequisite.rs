//! Prerequisite satisfaction.

use std::collections::BTreeSet;

use crate::error::MissingPrerequisite;
use crate::models::Course;

/// Checks that every prerequisite of every selected course is completed.
///
/// Courses are checked in the given order and prerequisites in sorted
/// order; the first gap found is reported.
pub fn check_prerequisites<'a, I>(
    selected: I,
    completed: &BTreeSet<String>,
) -> Result<(), MissingPrerequisite>
where
    I: IntoIterator<Item = &'a Course>,
{
    for course in selected {
        if let Some(missing) = course
            .prerequisites
            .iter()
            .find(|p| !completed.contains(p.as_str()))
        {
            return Err(MissingPrerequisite {
                course: course.id.clone(),
                missing: missing.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_satisfied() {
        let courses = [
            Course::new("IT1110", "Intro").with_prerequisite("MI1111"),
            Course::new("MI1111", "Calculus"),
        ];
        assert!(check_prerequisites(&courses, &completed(&["MI1111"])).is_ok());
    }

    #[test]
    fn test_first_violation_reported() {
        let courses = [
            Course::new("IT1110", "Intro").with_prerequisite("MI1111"),
            Course::new("IT3011", "Data Structures")
                .with_prerequisite("IT1110")
                .with_prerequisite("IT1010"),
        ];
        let err = check_prerequisites(&courses, &completed(&[])).unwrap_err();
        assert_eq!(err.course, "IT1110");
        assert_eq!(err.missing, "MI1111");

        let err = check_prerequisites(&courses, &completed(&["MI1111"])).unwrap_err();
        assert_eq!(err.course, "IT3011");
        // Sorted order: IT1010 before IT1110.
        assert_eq!(err.missing, "IT1010");
    }

    #[test]
    fn test_selected_course_does_not_count_as_completed() {
        let courses = [
            Course::new("MI1111", "Calculus"),
            Course::new("IT1110", "Intro").with_prerequisite("MI1111"),
        ];
        assert!(check_prerequisites(&courses, &completed(&[])).is_err());
    }

    #[test]
    fn test_empty_selection() {
        let courses: [Course; 0] = [];
        assert!(check_prerequisites(&courses, &completed(&[])).is_ok());
    }
}
