//! Course model.
//!
//! A course groups interchangeable sections and declares which courses
//! must be completed before it can be taken.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::SectionId;

/// Fallback display color for courses without an explicit one.
pub const DEFAULT_COURSE_COLOR: &str = "#ADD8E6";

/// A course offered in the catalog.
///
/// Sections are owned by the [`Catalog`](super::Catalog) arena; the course
/// keeps their handles in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier (e.g. "IT1110").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Course ids that must be completed first.
    pub prerequisites: BTreeSet<String>,
    /// Display color used by presentation layers.
    pub default_color: String,
    pub(crate) sections: Vec<SectionId>,
}

impl Course {
    /// Creates a course with no prerequisites and no sections.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prerequisites: BTreeSet::new(),
            default_color: DEFAULT_COURSE_COLOR.to_string(),
            sections: Vec::new(),
        }
    }

    /// Adds a prerequisite course id.
    pub fn with_prerequisite(mut self, course_id: impl Into<String>) -> Self {
        self.prerequisites.insert(course_id.into());
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    /// Section handles in insertion order.
    pub fn section_ids(&self) -> &[SectionId] {
        &self.sections
    }

    /// Whether this course has any sections.
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}
