//! Stable next/previous navigation over search results.

use crate::models::ScheduleAssignment;

/// Cursor over a result list with wrap-around stepping.
///
/// The cursor owns the results so a caller can keep it alongside its view
/// state between searches.
#[derive(Debug, Clone, Default)]
pub struct ResultCursor {
    results: Vec<ScheduleAssignment>,
    index: usize,
}

impl ResultCursor {
    /// Creates a cursor positioned on the first result.
    pub fn new(results: Vec<ScheduleAssignment>) -> Self {
        Self { results, index: 0 }
    }

    /// Result under the cursor, `None` when there are no results.
    pub fn current(&self) -> Option<&ScheduleAssignment> {
        self.results.get(self.index)
    }

    /// Steps forward, wrapping from the last result to the first.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&ScheduleAssignment> {
        if !self.results.is_empty() {
            self.index = (self.index + 1) % self.results.len();
        }
        self.current()
    }

    /// Steps backward, wrapping from the first result to the last.
    pub fn prev(&mut self) -> Option<&ScheduleAssignment> {
        if !self.results.is_empty() {
            self.index = self
                .index
                .checked_sub(1)
                .unwrap_or(self.results.len() - 1);
        }
        self.current()
    }

    /// Jumps to a 1-based position; out-of-range positions are ignored.
    pub fn go_to(&mut self, position: usize) -> Option<&ScheduleAssignment> {
        if (1..=self.results.len()).contains(&position) {
            self.index = position - 1;
        }
        self.current()
    }

    /// 1-based position of the current result, `None` when empty.
    pub fn position(&self) -> Option<usize> {
        (!self.results.is_empty()).then_some(self.index + 1)
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether there are no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All results in enumeration order.
    pub fn results(&self) -> &[ScheduleAssignment] {
        &self.results
    }
}

impl From<super::SearchOutcome> for ResultCursor {
    fn from(outcome: super::SearchOutcome) -> Self {
        Self::new(outcome.results)
    }
}
