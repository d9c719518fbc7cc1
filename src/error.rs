//! Error and warning types.
//!
//! Business-rule outcomes are typed values: the search returns
//! [`SearchError`] for fatal input problems and attaches a
//! [`SearchWarning`] to successful-but-truncated runs; the reuse validators
//! return [`RoomConflict`] / [`TeacherConflict`].

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// Formats a weekday set as `"2, 4, 6"`.
fn join_weekdays(weekdays: &BTreeSet<u8>) -> String {
    weekdays
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A selected course lists a prerequisite the student has not completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("course '{course}' requires prerequisite '{missing}' to be completed first")]
pub struct MissingPrerequisite {
    /// The selected course.
    pub course: String,
    /// The prerequisite course id not found among completed courses.
    pub missing: String,
}

/// Another section uses the same room at an overlapping time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("room '{room}' is already in use on weekday(s) {}", join_weekdays(.weekdays))]
pub struct RoomConflict {
    /// Room (section code) in conflict.
    pub room: String,
    /// Conflicting weekdays, ascending.
    pub weekdays: BTreeSet<u8>,
}

/// The same instructor already teaches at an overlapping time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("instructor '{name}' is already teaching on weekday(s) {}", join_weekdays(.weekdays))]
pub struct TeacherConflict {
    /// Instructor name as entered on the candidate section.
    pub name: String,
    /// Conflicting weekdays, ascending.
    pub weekdays: BTreeSet<u8>,
}

/// Fatal search errors. No results accompany these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// More courses were selected than the engine accepts.
    #[error("too many courses selected: {selected} (maximum {max})")]
    TooManyCourses { selected: usize, max: usize },

    /// A selected course has an unmet prerequisite.
    #[error(transparent)]
    MissingPrerequisite(#[from] MissingPrerequisite),

    /// A selected course id is not in the catalog.
    #[error("unknown course '{0}'")]
    UnknownCourse(String),
}

/// Why a search stopped before exhausting the space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchWarning {
    /// The result cap was hit; more schedules may exist.
    CapReached,
    /// The wall-clock budget elapsed; results are partial.
    DeadlineExceeded,
}

impl fmt::Display for SearchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapReached => write!(f, "result cap reached; more schedules may exist"),
            Self::DeadlineExceeded => write!(f, "search deadline exceeded; results are partial"),
        }
    }
}
