//! Input validation for timetable data.
//!
//! Two layers:
//! - **Structural checks** (this module): malformed slots, blank fields,
//!   duplicate section keys, broken co-requisite links, and prerequisite
//!   cycles. All problems are accumulated.
//! - **Business rules** ([`check_prerequisites`], [`check_room_conflict`],
//!   [`check_teacher_conflict`]): typed, fail-on-rule outcomes consulted by
//!   the search and by data-entry layers before committing a section.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

mod prerequisite;
mod reuse;

pub use prerequisite::check_prerequisites;
pub use reuse::{check_room_conflict, check_teacher_conflict, ReuseScope};

use crate::models::{Catalog, Section, SectionKey, MONDAY, SUNDAY};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Weekday out of range, period below 1, or end before start.
    InvalidTimeSlot,
    /// A required text field is blank.
    EmptyField,
    /// Two live sections of one course share a key.
    DuplicateSectionKey,
    /// A co-requisite handle points at no live section.
    DanglingCorequisite,
    /// A co-requisite link is present on one side only.
    AsymmetricCorequisite,
    /// Prerequisite graph contains a cycle.
    CyclicPrerequisite,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a single section as a data-entry form would.
///
/// Checks:
/// 1. Section code and instructor are not blank
/// 2. Every slot has a weekday in `2..=8`
/// 3. Every slot starts at period 1 or later and does not end before it starts
pub fn validate_section(section: &Section) -> ValidationResult {
    let mut errors = Vec::new();
    section_errors(section, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn section_errors(section: &Section, errors: &mut Vec<ValidationError>) {
    let key = section.key();
    if section.section_code.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyField,
            format!("Section of course '{}' has a blank code", section.course_id),
        ));
    }
    if section.instructor.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyField,
            format!("Section '{key}' has a blank instructor"),
        ));
    }

    for slot in &section.time_slots {
        if !(MONDAY..=SUNDAY).contains(&slot.weekday) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeSlot,
                format!("Section '{key}' uses invalid weekday {}", slot.weekday),
            ));
        }
        if slot.period_start < 1 || slot.period_end < slot.period_start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeSlot,
                format!(
                    "Section '{key}' has invalid period range {}-{}",
                    slot.period_start, slot.period_end
                ),
            ));
        }
    }
}

/// Validates the whole catalog.
///
/// Checks:
/// 1. Every section passes [`validate_section`]
/// 2. No two live sections of a course share a [`SectionKey`]
/// 3. Every co-requisite handle points at a live section
/// 4. Every co-requisite link is listed on both sides
/// 5. No circular prerequisite dependencies among catalog courses
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    for course in catalog.courses() {
        let mut keys: HashSet<SectionKey> = HashSet::new();
        for section in catalog.sections_of(&course.id) {
            section_errors(section, &mut errors);
            let key = section.key();
            if !keys.insert(key.clone()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateSectionKey,
                    format!("Duplicate section key: {key}"),
                ));
            }
        }
    }

    // Co-requisite links
    for section in catalog.sections() {
        let Some(id) = section.id() else { continue };
        for &partner in section.corequisites() {
            match catalog.section(partner) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingCorequisite,
                    format!("Section '{}' links to missing section {partner}", section.key()),
                )),
                Some(other) if !other.lists(id) => errors.push(ValidationError::new(
                    ValidationErrorKind::AsymmetricCorequisite,
                    format!(
                        "Section '{}' lists '{}' but not the reverse",
                        section.key(),
                        other.key()
                    ),
                )),
                Some(_) => {}
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(catalog) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the prerequisite graph using DFS.
///
/// Only edges between catalog courses are considered; prerequisites taken
/// in earlier terms need not be in the catalog.
fn detect_cycles(catalog: &Catalog) -> Option<ValidationError> {
    // prerequisite -> dependents
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for course in catalog.courses() {
        for pre in &course.prerequisites {
            if catalog.course(pre).is_some() {
                adj.entry(pre.as_str()).or_default().push(course.id.as_str());
            }
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for course in catalog.courses() {
        let node = course.id.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicPrerequisite,
                format!("Circular prerequisite detected involving course '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}
