//! Backtracking timetable search.
//!
//! # Algorithm
//!
//! One recursive frame per selected course, in selection order:
//! 1. Past the last course, snapshot the current assignment as a result.
//! 2. Stop if the deadline elapsed or the result cap is reached.
//! 3. Skip courses with no sections, and courses already placed as
//!    someone else's co-requisite.
//! 4. Otherwise try each section in catalog order: reject same-kind
//!    duplicates and overlaps, push it, pull in its co-requisite closure
//!    (aborting the branch if any partner clashes), recurse, then pop
//!    everything the step pushed.
//!
//! After enumeration, results missing a mandatory course are discarded.
//!
//! Overlap tests go through an incremental [`ConflictIndex`] seeded with
//! the busy intervals, so each test costs one lookup per occupied period.
//!
//! # Complexity
//! Exponential in sections per course in the worst case; the result cap
//! and the deadline bound it.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::conflict::{ConflictIndex, Occupant};
use crate::error::{SearchError, SearchWarning};
use crate::models::{
    BusyInterval, Catalog, Course, PeriodTable, ScheduleAssignment, Section, SectionId, SnapMode,
};
use crate::validation::check_prerequisites;

/// Maximum number of selected courses a search accepts.
pub const MAX_COURSES: usize = 15;

/// Result cap used when the request does not set one.
pub const DEFAULT_MAX_RESULTS: usize = 10_000;

/// Wall-clock budget used when the request does not set one.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

/// Engine-wide search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result cap.
    pub max_results: usize,
    /// Wall-clock budget per search.
    pub deadline: Duration,
    /// How busy intervals snap to periods.
    pub snap_mode: SnapMode,
    /// Period table for busy-interval conversion.
    pub period_table: PeriodTable,
    /// Maximum selected courses.
    pub max_courses: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            deadline: DEFAULT_DEADLINE,
            snap_mode: SnapMode::default(),
            period_table: PeriodTable::standard(),
            max_courses: MAX_COURSES,
        }
    }
}

impl SearchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the busy-interval snap mode.
    pub fn with_snap_mode(mut self, snap_mode: SnapMode) -> Self {
        self.snap_mode = snap_mode;
        self
    }

    /// Sets the period table.
    pub fn with_period_table(mut self, period_table: PeriodTable) -> Self {
        self.period_table = period_table;
        self
    }

    /// Sets the maximum number of selected courses.
    pub fn with_max_courses(mut self, max_courses: usize) -> Self {
        self.max_courses = max_courses;
        self
    }
}

/// Input container for one search.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Selected course ids, in branching order.
    pub course_ids: Vec<String>,
    /// Times the student is unavailable.
    pub busy_intervals: Vec<BusyInterval>,
    /// Courses every result must contain.
    pub mandatory: BTreeSet<String>,
    /// Courses already completed, for prerequisite checks.
    pub completed: BTreeSet<String>,
    /// Per-call result cap; `None` uses the searcher's configuration.
    pub max_results: Option<usize>,
    /// Per-call budget; `None` uses the searcher's configuration.
    pub deadline: Option<Duration>,
}

impl SearchRequest {
    /// Creates a request for the given courses.
    pub fn new<I, S>(course_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            course_ids: course_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Adds one busy interval.
    pub fn with_busy(mut self, interval: BusyInterval) -> Self {
        self.busy_intervals.push(interval);
        self
    }

    /// Replaces the busy intervals.
    pub fn with_busy_intervals(mut self, intervals: Vec<BusyInterval>) -> Self {
        self.busy_intervals = intervals;
        self
    }

    /// Sets the mandatory course ids.
    pub fn with_mandatory<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the completed course ids.
    pub fn with_completed<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completed = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the result cap for this call.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Overrides the wall-clock budget for this call.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursive frames entered.
    pub frames_visited: u64,
    /// Results emitted before the mandatory filter.
    pub results_before_filter: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Completed search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Clash-free assignments in enumeration order.
    pub results: Vec<ScheduleAssignment>,
    /// Set when the search stopped before exhausting the space.
    pub warning: Option<SearchWarning>,
    /// Run counters.
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Whether the search explored the whole space.
    pub fn is_complete(&self) -> bool {
        self.warning.is_none()
    }
}

/// Enumerates clash-free timetables for a course selection.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Catalog, Course, Section, MONDAY};
/// use u_timetable::scheduler::{SearchRequest, TimetableSearcher};
///
/// let mut catalog = Catalog::new()
///     .with_course(Course::new("X", "Course X"))
///     .with_course(Course::new("Y", "Course Y"));
/// catalog.add_section(Section::new("X", "X1", "A").with_slot(MONDAY, 1, 2));
/// catalog.add_section(Section::new("X", "X2", "A").with_slot(MONDAY, 3, 4));
/// catalog.add_section(Section::new("Y", "Y1", "B").with_slot(MONDAY, 1, 2));
///
/// let outcome = TimetableSearcher::new()
///     .search(&catalog, &SearchRequest::new(["X", "Y"]))
///     .unwrap();
/// assert_eq!(outcome.results.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableSearcher {
    config: SearchConfig,
}

impl TimetableSearcher {
    /// Creates a searcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a searcher with the given configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs one search against a read-only catalog.
    ///
    /// Fails without partial results when the selection is too large, names
    /// an unknown course, or has an unmet prerequisite.
    pub fn search(
        &self,
        catalog: &Catalog,
        request: &SearchRequest,
    ) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();

        let selected = request.course_ids.len();
        if selected > self.config.max_courses {
            return Err(SearchError::TooManyCourses {
                selected,
                max: self.config.max_courses,
            });
        }

        let courses = request
            .course_ids
            .iter()
            .map(|id| {
                catalog
                    .course(id)
                    .ok_or_else(|| SearchError::UnknownCourse(id.clone()))
            })
            .collect::<Result<Vec<&Course>, _>>()?;
        check_prerequisites(courses.iter().copied(), &request.completed)?;

        let max_results = request.max_results.unwrap_or(self.config.max_results);
        let budget = request.deadline.unwrap_or(self.config.deadline);
        debug!(
            "searching {selected} courses, {} busy intervals, cap {max_results}, budget {budget:?}",
            request.busy_intervals.len()
        );

        let mut walk = Walk {
            catalog,
            courses,
            index: self.busy_index(&request.busy_intervals),
            stack: Vec::new(),
            placed: HashSet::new(),
            course_counts: HashMap::new(),
            results: Vec::new(),
            max_results,
            deadline: started.checked_add(budget),
            warning: None,
            frames_visited: 0,
        };
        walk.explore(0);

        let results_before_filter = walk.results.len();
        let mut results = walk.results;
        if !request.mandatory.is_empty() {
            results.retain(|r| request.mandatory.iter().all(|id| r.contains_course(id)));
        }

        let stats = SearchStats {
            frames_visited: walk.frames_visited,
            results_before_filter,
            elapsed: started.elapsed(),
        };
        match walk.warning {
            Some(warning) => warn!("{warning}: {} results kept", results.len()),
            None => info!(
                "search finished: {} results ({} before mandatory filter), {} frames in {:?}",
                results.len(),
                results_before_filter,
                stats.frames_visited,
                stats.elapsed
            ),
        }

        Ok(SearchOutcome {
            results,
            warning: walk.warning,
            stats,
        })
    }

    fn busy_index(&self, intervals: &[BusyInterval]) -> ConflictIndex {
        let mut index = ConflictIndex::new();
        for busy in intervals {
            match busy.to_time_slot(&self.config.period_table, self.config.snap_mode) {
                Some(slot) => index.insert(Occupant::Busy(busy.id), std::slice::from_ref(&slot)),
                None => debug!("busy interval {busy} maps to no period; ignored"),
            }
        }
        index
    }
}

/// Runs a search with the default configuration.
pub fn search_schedules(
    catalog: &Catalog,
    request: &SearchRequest,
) -> Result<SearchOutcome, SearchError> {
    TimetableSearcher::new().search(catalog, request)
}

/// Mutable state of one in-flight search.
struct Walk<'c> {
    catalog: &'c Catalog,
    courses: Vec<&'c Course>,
    index: ConflictIndex,
    stack: Vec<(SectionId, &'c Section)>,
    placed: HashSet<SectionId>,
    course_counts: HashMap<&'c str, usize>,
    results: Vec<ScheduleAssignment>,
    max_results: usize,
    deadline: Option<Instant>,
    warning: Option<SearchWarning>,
    frames_visited: u64,
}

impl<'c> Walk<'c> {
    fn explore(&mut self, i: usize) {
        self.frames_visited += 1;

        if i == self.courses.len() {
            self.emit();
            return;
        }
        if self.should_stop() {
            return;
        }

        let course = self.courses[i];
        if !course.has_sections() || self.course_counts.contains_key(course.id.as_str()) {
            self.explore(i + 1);
            return;
        }

        let catalog = self.catalog;
        for &id in course.section_ids() {
            let Some(section) = catalog.section(id) else {
                continue;
            };
            if self.course_clash(id, section, false) || self.index.conflicts(&section.time_slots) {
                continue;
            }

            let mark = self.stack.len();
            self.push(id, section);
            if self.close_corequisites(id, section) {
                self.explore(i + 1);
            } else {
                trace!("co-requisite closure of {} failed", section.key());
            }
            self.unwind(mark);
        }
    }

    /// Pushes every section reachable through co-requisite links.
    ///
    /// Returns `false` as soon as one partner cannot be placed; the caller
    /// unwinds whatever was pushed.
    fn close_corequisites(&mut self, root_id: SectionId, root: &'c Section) -> bool {
        let catalog = self.catalog;
        let mut pending = vec![(root_id, root)];
        while let Some((current_id, current)) = pending.pop() {
            for &partner_id in current.corequisites() {
                if self.placed.contains(&partner_id) {
                    continue;
                }
                let Some(partner) = catalog.section(partner_id) else {
                    debug!("{} links to missing section {partner_id}", current.key());
                    continue;
                };
                debug_assert!(
                    partner.lists(current_id),
                    "asymmetric co-requisite link {} -> {}",
                    current.key(),
                    partner.key()
                );
                if self.course_clash(partner_id, partner, true)
                    || self.index.conflicts(&partner.time_slots)
                {
                    return false;
                }
                self.push(partner_id, partner);
                pending.push((partner_id, partner));
            }
        }
        true
    }

    /// Whether a placed section of the same course rules `section` out.
    ///
    /// Mutually linked sections never clash. Otherwise a branch candidate
    /// clashes only with a placed section of the same exclusive kind, while
    /// a co-requisite partner (`closure`) clashes with any placed section of
    /// its course.
    fn course_clash(&self, id: SectionId, section: &Section, closure: bool) -> bool {
        self.stack.iter().any(|&(placed_id, placed)| {
            placed.course_id == section.course_id
                && !(placed.lists(id) && section.lists(placed_id))
                && (closure || (section.kind.is_exclusive() && placed.kind == section.kind))
        })
    }

    fn should_stop(&mut self) -> bool {
        if self.results.len() >= self.max_results {
            self.warning.get_or_insert(SearchWarning::CapReached);
            return true;
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.warning.get_or_insert(SearchWarning::DeadlineExceeded);
            return true;
        }
        false
    }

    fn emit(&mut self) {
        if self.results.len() >= self.max_results {
            self.warning.get_or_insert(SearchWarning::CapReached);
            return;
        }
        let sections = self.stack.iter().map(|&(_, s)| s.clone()).collect();
        self.results.push(ScheduleAssignment::new(sections));
    }

    fn push(&mut self, id: SectionId, section: &'c Section) {
        self.index.insert(Occupant::Section(id), &section.time_slots);
        self.placed.insert(id);
        *self.course_counts.entry(section.course_id.as_str()).or_default() += 1;
        self.stack.push((id, section));
    }

    fn unwind(&mut self, mark: usize) {
        while self.stack.len() > mark {
            let Some((id, section)) = self.stack.pop() else {
                break;
            };
            self.index.retract(Occupant::Section(id), &section.time_slots);
            self.placed.remove(&id);
            if let Some(count) = self.course_counts.get_mut(section.course_id.as_str()) {
                *count -= 1;
                if *count == 0 {
                    self.course_counts.remove(section.course_id.as_str());
                }
            }
        }
    }
}
