//! Course timetable builder.
//!
//! Given a catalog of courses and their weekly sections, a student's course
//! selection, busy times, and completed courses, enumerates every clash-free
//! timetable. Co-requisite sections (a lecture and its lab) are always placed
//! together, and room/instructor reuse checks guard catalog edits.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `PeriodTable`, `BusyInterval`,
//!   `Course`, `Section`, `Catalog`, `ScheduleAssignment`, persistence records
//! - **`conflict`**: Weekday/period bucket index for overlap queries
//! - **`corequisite`**: Maintainer of the symmetric co-requisite graph
//! - **`validation`**: Structural catalog checks plus prerequisite and
//!   room/instructor reuse rules
//! - **`scheduler`**: Backtracking search and result navigation
//! - **`error`**: Typed errors and search warnings
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Catalog, Course, Section, MONDAY, TUESDAY};
//! use u_timetable::scheduler::{search_schedules, SearchRequest};
//!
//! let mut catalog = Catalog::new()
//!     .with_course(Course::new("MI1111", "Calculus 1"))
//!     .with_course(Course::new("IT1110", "Intro to Computing"));
//! catalog.add_section(Section::new("MI1111", "L05", "Le Van C").with_slot(MONDAY, 1, 3));
//! catalog.add_section(Section::new("IT1110", "L01", "Nguyen Van A").with_slot(MONDAY, 2, 4));
//! catalog.add_section(Section::new("IT1110", "L02", "Tran Thi B").with_slot(TUESDAY, 1, 2));
//!
//! let outcome = search_schedules(&catalog, &SearchRequest::new(["MI1111", "IT1110"])).unwrap();
//! assert_eq!(outcome.results.len(), 1);
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod conflict;
pub mod corequisite;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{MissingPrerequisite, RoomConflict, SearchError, SearchWarning, TeacherConflict};
pub use scheduler::{search_schedules, SearchOutcome, SearchRequest, TimetableSearcher};
