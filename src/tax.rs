//! Income-tax deduction benefit of pension contributions

use serde::Serialize;

use crate::rules::RegulatoryRules;

/// Deductions and tax saved for one year of contributions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxBenefitResult {
    pub annual_contribution: f64,

    /// Deductible under the primary section (80C)
    pub primary_deduction: f64,

    /// Deductible under the supplementary section (80CCD(1B)), on top of primary
    pub supplementary_deduction: f64,

    /// Combined deduction, never more than the contribution itself
    pub total_deduction: f64,

    pub tax_saved: f64,

    /// Contribution net of tax relief
    pub effective_cost: f64,
}

/// Deduction benefit of `annual_contribution` at marginal rate `tax_bracket`.
///
/// `tax_bracket` is expected in [0, 1]; it is not checked here.
pub fn calculate_tax_benefit(
    rules: &RegulatoryRules,
    annual_contribution: f64,
    tax_bracket: f64,
) -> TaxBenefitResult {
    let primary_deduction = annual_contribution.min(rules.primary_deduction_cap);
    let total_deduction =
        annual_contribution.min(primary_deduction + rules.supplementary_deduction_cap);
    let tax_saved = total_deduction * tax_bracket;

    TaxBenefitResult {
        annual_contribution,
        primary_deduction,
        supplementary_deduction: total_deduction - primary_deduction,
        total_deduction,
        tax_saved,
        effective_cost: annual_contribution - tax_saved,
    }
}
