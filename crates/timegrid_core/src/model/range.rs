//! Inclusive date range.

use serde::{Deserialize, Serialize};

/// Inclusive, unit-agnostic span.
///
/// `start <= end` is expected; an inverted range is not an error and builds
/// an empty grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range<D> {
    pub start: D,
    pub end: D,
}

impl<D: Copy + Ord> Range<D> {
    pub fn new(start: D, end: D) -> Self {
        Self { start, end }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: D) -> bool {
        self.start <= date && date <= self.end
    }
}
