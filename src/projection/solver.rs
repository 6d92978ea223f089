//! Inverse projection: monthly contribution needed for a target corpus
//!
//! The forward formula is linear in the contribution, so the payment is solved
//! in closed form rather than by iteration.

use log::debug;

use super::growth;
use super::result::OptimizationResult;
use crate::error::{ensure_finite, EngineError};
use crate::request::ValidatedTarget;
use crate::rules::RuleSet;

#[derive(Debug, Clone, Copy)]
pub struct ContributionSolver<'a> {
    rules: &'a RuleSet,
}

impl<'a> ContributionSolver<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Required monthly contribution, rounded up so the target is never missed
    pub fn solve(&self, request: &ValidatedTarget) -> Result<OptimizationResult, EngineError> {
        let profile = self.rules.profile(request.risk_profile());
        let months = request.span().months();

        let exact = ensure_finite(
            "required contribution",
            growth::required_payment(request.target_corpus(), profile.monthly_rate(), months),
        )?;

        debug!(
            "Solved {} target over {} months ({}): {:.4} /month",
            request.target_corpus(),
            months,
            request.risk_profile(),
            exact
        );

        Ok(OptimizationResult {
            request: *request,
            annual_return_rate: profile.expected_return,
            equity: profile.equity,
            debt: profile.debt,
            required_monthly_contribution: exact.ceil(),
        })
    }
}
