//! Year-by-year corpus snapshots between current age and retirement

use serde::{Deserialize, Serialize};

use super::growth;
use crate::request::AgeSpan;

/// Corpus position at one attained age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub age: u32,

    /// Calendar year in which `age` is reached
    pub year: i32,

    pub corpus: f64,
    pub contributed: f64,
    pub gains: f64,
}

/// Spacing between timeline points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineStep {
    /// One point per year
    Yearly,
    /// One point every `n` years, starting at the current age. The final age is
    /// included only when it falls on the stride.
    EveryYears(u32),
}

impl TimelineStep {
    /// Stride used for scenario comparisons
    pub const COARSE: TimelineStep = TimelineStep::EveryYears(5);

    fn stride(&self) -> u32 {
        match self {
            TimelineStep::Yearly => 1,
            TimelineStep::EveryYears(n) => (*n).max(1),
        }
    }
}

impl Default for TimelineStep {
    fn default() -> Self {
        TimelineStep::Yearly
    }
}

/// Lazy, finite sequence of timeline points.
///
/// Each point is evaluated independently from its age, so cloning the
/// iterator restarts it without recomputing anything already yielded.
#[derive(Debug, Clone)]
pub struct Timeline {
    contribution: f64,
    monthly_rate: f64,
    span: AgeSpan,
    base_year: i32,
    stride: u32,
    next_offset: u32,
}

impl Timeline {
    pub fn new(
        contribution: f64,
        monthly_rate: f64,
        span: AgeSpan,
        base_year: i32,
        step: TimelineStep,
    ) -> Self {
        Self {
            contribution,
            monthly_rate,
            span,
            base_year,
            stride: step.stride(),
            next_offset: 0,
        }
    }

    /// Point at `years_elapsed` years after the current age
    pub fn point_at(&self, years_elapsed: u32) -> TimelinePoint {
        let months = years_elapsed * 12;
        let corpus = growth::future_value(self.contribution, self.monthly_rate, months);
        let contributed = self.contribution * months as f64;

        TimelinePoint {
            age: self.span.current_age() + years_elapsed,
            year: self.base_year + years_elapsed as i32,
            corpus,
            contributed,
            gains: corpus - contributed,
        }
    }
}

impl Iterator for Timeline {
    type Item = TimelinePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_offset > self.span.years() {
            return None;
        }
        let point = self.point_at(self.next_offset);
        self.next_offset += self.stride;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next_offset > self.span.years() {
            0
        } else {
            ((self.span.years() - self.next_offset) / self.stride + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Timeline {}
