//! Timetable search and result navigation.
//!
//! # Algorithm
//!
//! `TimetableSearcher` enumerates every clash-free combination of one
//! section per selected course by depth-first backtracking. Co-requisite
//! partners are placed together with the section that requires them, and
//! sections that collide with the student's busy intervals are pruned.
//! A result cap and a wall-clock deadline bound the exponential worst case.
//!
//! # Navigation
//!
//! `ResultCursor` steps through the results with wrap-around so a viewer
//! can page through them in a stable order.
//!
//! # References
//!
//! - Knuth (2000), "Dancing Links", for exact-cover style backtracking
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod navigator;
mod search;

pub use navigator::ResultCursor;
pub use search::{
    search_schedules, SearchConfig, SearchOutcome, SearchRequest, SearchStats, TimetableSearcher,
    DEFAULT_DEADLINE, DEFAULT_MAX_RESULTS, MAX_COURSES,
};
