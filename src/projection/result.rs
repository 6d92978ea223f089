//! Output structures for forward and inverse projections

use serde::Serialize;

use super::timeline::TimelinePoint;
use crate::request::{ValidatedRequest, ValidatedTarget};
use crate::rules::RiskProfile;

/// Complete forward projection at full precision.
///
/// Amounts are not rounded here; rounding happens where results leave the
/// library (JSON responses, CSV rows, console output).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    /// Request the projection was computed for
    pub request: ValidatedRequest,

    /// Expected annual return of the request's profile
    pub annual_return_rate: f64,

    pub total_corpus: f64,
    pub total_contributed: f64,
    pub wealth_gained: f64,

    /// Corpus in today's money; `None` when inflation adjustment was not requested
    pub real_corpus: Option<f64>,

    /// Corpus / total contributed
    pub growth_multiplier: f64,

    /// Part of the corpus that must buy an annuity
    pub annuity_corpus: f64,

    /// Part of the corpus withdrawable at retirement
    pub lump_sum: f64,

    pub monthly_pension: f64,

    pub timeline: Vec<TimelinePoint>,
}

impl ProjectionResult {
    pub fn risk_profile(&self) -> RiskProfile {
        self.request.risk_profile()
    }

    pub fn years(&self) -> u32 {
        self.request.span().years()
    }

    /// Real corpus as reported to callers: the nominal corpus stands in when
    /// no inflation adjustment was requested
    pub fn reported_real_corpus(&self) -> f64 {
        self.real_corpus.unwrap_or(self.total_corpus)
    }
}

/// Required contribution for one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    /// Request echoed back for traceability
    pub request: ValidatedTarget,

    pub annual_return_rate: f64,
    pub equity: f64,
    pub debt: f64,

    /// Monthly contribution, rounded up to the next whole currency unit
    pub required_monthly_contribution: f64,
}

impl OptimizationResult {
    pub fn risk_profile(&self) -> RiskProfile {
        self.request.risk_profile()
    }

    pub fn years(&self) -> u32 {
        self.request.span().years()
    }
}
