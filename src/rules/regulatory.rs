//! Scheme-wide regulatory constants and fixed economic assumptions

use serde::{Deserialize, Serialize};

/// Regulatory rules applied to every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryRules {
    /// Minimum monthly contribution
    pub min_contribution_monthly: f64,

    /// Youngest age at which a subscriber may join
    pub min_join_age: u32,

    /// Oldest age at which a subscriber may join
    pub max_join_age: u32,

    /// Retirement age used when the caller gives none
    pub default_retirement_age: u32,

    /// Latest age at which contributions may stop
    pub max_retirement_age: u32,

    /// Minimum fraction of the corpus that must buy an annuity
    pub annuity_purchase_fraction: f64,

    /// Assumed annual yield of the purchased annuity
    pub annuity_rate: f64,

    /// Assumed annual inflation
    pub inflation_rate: f64,

    /// Deduction cap under the primary tax section (80C)
    pub primary_deduction_cap: f64,

    /// Additional deduction cap under the supplementary section (80CCD(1B))
    pub supplementary_deduction_cap: f64,
}

impl Default for RegulatoryRules {
    fn default() -> Self {
        Self {
            min_contribution_monthly: 500.0,
            min_join_age: 18,
            max_join_age: 70,
            default_retirement_age: 60,
            max_retirement_age: 75,
            annuity_purchase_fraction: 0.40, // PFRDA minimum
            annuity_rate: 0.055,
            inflation_rate: 0.06,
            primary_deduction_cap: 150_000.0,
            supplementary_deduction_cap: 50_000.0,
        }
    }
}

impl RegulatoryRules {
    /// Fraction of the corpus available as a lump sum
    pub fn lump_sum_fraction(&self) -> f64 {
        1.0 - self.annuity_purchase_fraction
    }

    /// Whether `age` is inside the join-age window (inclusive)
    pub fn age_in_join_window(&self, age: u32) -> bool {
        age >= self.min_join_age && age <= self.max_join_age
    }

    /// Whether contributions may run until `age`
    pub fn retirement_age_allowed(&self, age: u32) -> bool {
        age <= self.max_retirement_age
    }
}
