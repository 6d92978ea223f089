//! Request value objects, before and after validation

use serde::{Deserialize, Serialize};

use crate::rules::RiskProfile;

/// Forward projection request as supplied by a caller.
///
/// Optional fields fall back to the scheme defaults during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub monthly_contribution: Option<f64>,
    pub current_age: u32,
    pub retirement_age: Option<u32>,
    pub risk_profile: Option<String>,
    pub inflation_adjusted: bool,
}

impl ProjectionRequest {
    /// Request using the default retirement age and profile
    pub fn new(monthly_contribution: f64, current_age: u32) -> Self {
        Self {
            monthly_contribution: Some(monthly_contribution),
            current_age,
            retirement_age: None,
            risk_profile: None,
            inflation_adjusted: false,
        }
    }

    pub fn retiring_at(mut self, retirement_age: u32) -> Self {
        self.retirement_age = Some(retirement_age);
        self
    }

    pub fn with_profile(mut self, risk_profile: impl Into<String>) -> Self {
        self.risk_profile = Some(risk_profile.into());
        self
    }

    pub fn inflation_adjusted(mut self, adjusted: bool) -> Self {
        self.inflation_adjusted = adjusted;
        self
    }
}

/// Inverse request: how much to contribute to reach `target_corpus`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRequest {
    pub target_corpus: f64,
    pub current_age: u32,
    pub retirement_age: Option<u32>,
    pub risk_profile: Option<String>,
}

impl TargetRequest {
    pub fn new(target_corpus: f64, current_age: u32) -> Self {
        Self {
            target_corpus,
            current_age,
            retirement_age: None,
            risk_profile: None,
        }
    }

    pub fn retiring_at(mut self, retirement_age: u32) -> Self {
        self.retirement_age = Some(retirement_age);
        self
    }

    pub fn with_profile(mut self, risk_profile: impl Into<String>) -> Self {
        self.risk_profile = Some(risk_profile.into());
        self
    }
}

/// Accumulation window shared by both request kinds.
/// Only built by the validator, so `retirement_age > current_age` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeSpan {
    current_age: u32,
    retirement_age: u32,
}

impl AgeSpan {
    pub(crate) fn new(current_age: u32, retirement_age: u32) -> Self {
        debug_assert!(retirement_age > current_age);
        Self { current_age, retirement_age }
    }

    pub fn current_age(&self) -> u32 {
        self.current_age
    }

    pub fn retirement_age(&self) -> u32 {
        self.retirement_age
    }

    /// Whole years until retirement (always >= 1)
    pub fn years(&self) -> u32 {
        self.retirement_age - self.current_age
    }

    /// Monthly contribution periods until retirement
    pub fn months(&self) -> u32 {
        self.years() * 12
    }
}

/// Forward request that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedRequest {
    monthly_contribution: f64,
    span: AgeSpan,
    risk_profile: RiskProfile,
    inflation_adjusted: bool,
}

impl ValidatedRequest {
    pub(crate) fn new(
        monthly_contribution: f64,
        span: AgeSpan,
        risk_profile: RiskProfile,
        inflation_adjusted: bool,
    ) -> Self {
        Self {
            monthly_contribution,
            span,
            risk_profile,
            inflation_adjusted,
        }
    }

    pub fn monthly_contribution(&self) -> f64 {
        self.monthly_contribution
    }

    pub fn span(&self) -> AgeSpan {
        self.span
    }

    pub fn risk_profile(&self) -> RiskProfile {
        self.risk_profile
    }

    pub fn is_inflation_adjusted(&self) -> bool {
        self.inflation_adjusted
    }

    /// Same request under another profile. Every variant is valid, so this
    /// cannot break any checked precondition.
    pub fn for_profile(mut self, risk_profile: RiskProfile) -> Self {
        self.risk_profile = risk_profile;
        self
    }
}

/// Inverse request that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedTarget {
    target_corpus: f64,
    span: AgeSpan,
    risk_profile: RiskProfile,
}

impl ValidatedTarget {
    pub(crate) fn new(target_corpus: f64, span: AgeSpan, risk_profile: RiskProfile) -> Self {
        Self {
            target_corpus,
            span,
            risk_profile,
        }
    }

    pub fn target_corpus(&self) -> f64 {
        self.target_corpus
    }

    pub fn span(&self) -> AgeSpan {
        self.span
    }

    pub fn risk_profile(&self) -> RiskProfile {
        self.risk_profile
    }

    pub fn for_profile(mut self, risk_profile: RiskProfile) -> Self {
        self.risk_profile = risk_profile;
        self
    }
}
