//! Timetable domain models.
//!
//! Provides the data types the search and validators operate on: weekly
//! time slots, the period table used to convert wall-clock busy intervals,
//! courses and their sections, the catalog repository, persistence records,
//! and the schedule assignments the search produces.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Training Center |
//! |-------------|-----------|-----------------|
//! | Course | Subject | Program |
//! | Section | Class / Lab group | Session group |
//! | TimeSlot | Weekday + periods | Weekday + blocks |
//! | BusyInterval | Part-time job | Personal commitment |
//! | ScheduleAssignment | Timetable | Enrollment plan |

mod calendar;
mod catalog;
mod course;
mod record;
mod schedule;
mod section;
mod time_slot;

pub use calendar::{BusyInterval, ClockTime, Period, PeriodTable, SnapMode};
pub use catalog::{Catalog, SectionEdit};
pub use course::{Course, DEFAULT_COURSE_COLOR};
pub use record::{CatalogRecord, CourseRecord, SectionRecord, SectionRef};
pub use schedule::ScheduleAssignment;
pub use section::{Section, SectionId, SectionKey, SectionKind};
pub use time_slot::{
    overlaps, weekday_name, TimeSlot, FRIDAY, MONDAY, SATURDAY, SUNDAY, THURSDAY, TUESDAY,
    WEDNESDAY,
};
