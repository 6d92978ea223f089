//! JSON request/response contract for service front-ends
//!
//! Field names are camelCase on the wire. Amounts are rounded to whole rupees
//! here and nowhere else.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ValidationError};
use crate::format::{format_percent, round2, round_amount};
use crate::projection::{
    ContributionSolver, CorpusProjector, OptimizationResult, ProjectionConfig, ProjectionResult,
    TimelinePoint, TimelineStep,
};
use crate::request::{whole_years, ProjectionRequest, TargetRequest, Validator};
use crate::rules::{RiskProfile, RuleSet};
use crate::scenario::ScenarioComparator;
use crate::tax::calculate_tax_benefit;

pub const DISCLAIMER: &str =
    "Projections are estimates based on assumed returns. Not guaranteed. Verify with PFRDA.";
pub const TAX_NOTE: &str = "Consult a tax advisor for precise calculations";
pub const SERVICE_NAME: &str = "NPS IntelliPension AI";

/// Marginal tax rate assumed when the caller gives none
pub const DEFAULT_TAX_BRACKET: f64 = 0.30;

// ─── Request bodies ───────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusRequestBody {
    #[serde(default)]
    pub monthly_contribution: Option<f64>,
    /// Any JSON number; fractional or negative ages are refused by the validator
    pub current_age: f64,
    #[serde(default)]
    pub retirement_age: Option<f64>,
    #[serde(default)]
    pub risk_profile: Option<String>,
    #[serde(default)]
    pub inflation_adjusted: bool,
}

impl TryFrom<CorpusRequestBody> for ProjectionRequest {
    type Error = ValidationError;

    fn try_from(body: CorpusRequestBody) -> Result<Self, Self::Error> {
        Ok(ProjectionRequest {
            monthly_contribution: body.monthly_contribution,
            current_age: whole_years(body.current_age)?,
            retirement_age: body.retirement_age.map(whole_years).transpose()?,
            risk_profile: body.risk_profile,
            inflation_adjusted: body.inflation_adjusted,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequestBody {
    pub target_corpus: f64,
    pub current_age: f64,
    #[serde(default)]
    pub retirement_age: Option<f64>,
    #[serde(default)]
    pub risk_profile: Option<String>,
}

impl TryFrom<OptimizeRequestBody> for TargetRequest {
    type Error = ValidationError;

    fn try_from(body: OptimizeRequestBody) -> Result<Self, Self::Error> {
        Ok(TargetRequest {
            target_corpus: body.target_corpus,
            current_age: whole_years(body.current_age)?,
            retirement_age: body.retirement_age.map(whole_years).transpose()?,
            risk_profile: body.risk_profile,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRequestBody {
    pub annual_contribution: f64,
    #[serde(default = "default_tax_bracket")]
    pub tax_bracket: f64,
}

fn default_tax_bracket() -> f64 {
    DEFAULT_TAX_BRACKET
}

// ─── Responses ────────────────────────────────────────────────────

/// Envelope around every response. The disclaimer travels with errors too.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub disclaimer: &'static str,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            disclaimer: DISCLAIMER,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            disclaimer: DISCLAIMER,
        }
    }
}

/// HTTP status and envelope for an engine outcome: validation failures are
/// the caller's fault (400), computation failures are ours (500)
pub fn respond<T>(result: Result<T, EngineError>) -> (u16, ApiResponse<T>) {
    match result {
        Ok(data) => (200, ApiResponse::ok(data)),
        Err(e @ EngineError::Validation(_)) => (400, ApiResponse::error(e.to_string())),
        Err(e @ EngineError::Computation { .. }) => {
            log::error!("Internal computation failure: {}", e);
            (500, ApiResponse::error(e.to_string()))
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusInputs {
    pub monthly_contribution: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    pub risk_profile: RiskProfile,
    pub inflation_adjusted: bool,
    pub years: u32,
    pub annual_return_rate: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSummary {
    pub total_corpus: f64,
    pub total_contributed: f64,
    pub wealth_gained: f64,
    pub real_corpus: f64,
    pub growth_multiplier: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalSummary {
    pub annuity_corpus: f64,
    pub lump_sum_withdrawal: f64,
    pub estimated_monthly_pension: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRow {
    pub age: u32,
    pub year: i32,
    pub corpus: f64,
    pub contributed: f64,
    pub gains: f64,
}

impl From<&TimelinePoint> for TimelineRow {
    fn from(point: &TimelinePoint) -> Self {
        Self {
            age: point.age,
            year: point.year,
            corpus: round_amount(point.corpus),
            contributed: round_amount(point.contributed),
            gains: round_amount(point.gains),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssumptionSummary {
    pub annual_return: String,
    pub annuity_rate: String,
    pub annuity_corpus_percent: String,
    pub inflation_rate: String,
    pub disclaimer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusResponse {
    pub inputs: CorpusInputs,
    pub corpus: CorpusSummary,
    pub withdrawal: WithdrawalSummary,
    pub timeline: Vec<TimelineRow>,
    pub assumptions: AssumptionSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionScenario {
    pub risk_profile: RiskProfile,
    pub annual_return: String,
    pub required_monthly_contribution: f64,
    pub equity_percent: String,
    pub debt_percent: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub target_corpus: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    pub years: u32,
    pub scenarios: Vec<ContributionScenario>,
    pub recommendation: ContributionScenario,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRow {
    pub scenario: &'static str,
    pub risk_profile: RiskProfile,
    pub return_rate: String,
    pub equity_percent: String,
    pub debt_percent: String,
    pub total_corpus: f64,
    pub total_contributed: f64,
    pub wealth_gained: f64,
    pub growth_multiplier: f64,
    pub monthly_pension: f64,
    pub lump_sum: f64,
    pub timeline: Vec<TimelineRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenariosResponse {
    pub scenarios: Vec<ScenarioRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResponse {
    pub annual_contribution: f64,
    #[serde(rename = "deductionUnder80C")]
    pub deduction_under_80c: f64,
    #[serde(rename = "additionalDeductionUnder80CCD")]
    pub additional_deduction_under_80ccd: f64,
    pub total_deduction: f64,
    pub estimated_tax_saved: f64,
    pub effective_cost: f64,
    pub note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub fn service_info() -> ServiceInfo {
    ServiceInfo {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    }
}

// ─── Handlers ─────────────────────────────────────────────────────

/// Maps request bodies onto the engine and engine results onto responses
#[derive(Debug, Clone, Copy)]
pub struct PensionApi<'a> {
    rules: &'a RuleSet,
    config: ProjectionConfig,
}

impl<'a> PensionApi<'a> {
    pub fn new(rules: &'a RuleSet, config: ProjectionConfig) -> Self {
        Self { rules, config }
    }

    fn validator(&self) -> Validator<'a> {
        Validator::new(&self.rules.regulatory)
    }

    pub fn simulate_corpus(&self, body: CorpusRequestBody) -> Result<CorpusResponse, EngineError> {
        let request = self.validator().validate(&ProjectionRequest::try_from(body)?)?;
        let result = CorpusProjector::new(self.rules, self.config).project(&request)?;
        Ok(self.corpus_response(&result))
    }

    pub fn optimize_contribution(&self, body: OptimizeRequestBody) -> Result<OptimizeResponse, EngineError> {
        let target = self.validator().validate_target(&TargetRequest::try_from(body)?)?;
        let entries = ScenarioComparator::new(self.rules, self.config).compare_contributions(&target)?;
        let recommendation = ContributionSolver::new(self.rules).solve(&target)?;

        Ok(OptimizeResponse {
            target_corpus: target.target_corpus(),
            current_age: target.span().current_age(),
            retirement_age: target.span().retirement_age(),
            years: target.span().years(),
            scenarios: entries.iter().map(|e| contribution_scenario(&e.outcome)).collect(),
            recommendation: contribution_scenario(&recommendation),
        })
    }

    /// Forward comparison across all profiles, with the coarse timeline
    pub fn compare_scenarios(&self, body: CorpusRequestBody) -> Result<ScenariosResponse, EngineError> {
        let base = self.validator().validate(&ProjectionRequest::try_from(body)?)?;
        let config = self.config.with_step(TimelineStep::COARSE);
        let entries = ScenarioComparator::new(self.rules, config).compare_projections(&base)?;

        let scenarios = entries
            .iter()
            .map(|entry| {
                let r = &entry.outcome;
                ScenarioRow {
                    scenario: entry.label,
                    risk_profile: entry.risk_profile,
                    return_rate: format_percent(entry.annual_return_rate),
                    equity_percent: whole_percent(entry.equity),
                    debt_percent: whole_percent(entry.debt),
                    total_corpus: round_amount(r.total_corpus),
                    total_contributed: round_amount(r.total_contributed),
                    wealth_gained: round_amount(r.wealth_gained),
                    growth_multiplier: round2(r.growth_multiplier),
                    monthly_pension: round_amount(r.monthly_pension),
                    lump_sum: round_amount(r.lump_sum),
                    timeline: r.timeline.iter().map(TimelineRow::from).collect(),
                }
            })
            .collect();

        Ok(ScenariosResponse { scenarios })
    }

    pub fn tax_benefit(&self, body: TaxRequestBody) -> TaxResponse {
        let result = calculate_tax_benefit(&self.rules.regulatory, body.annual_contribution, body.tax_bracket);
        TaxResponse {
            annual_contribution: result.annual_contribution,
            deduction_under_80c: result.primary_deduction,
            additional_deduction_under_80ccd: result.supplementary_deduction,
            total_deduction: result.total_deduction,
            estimated_tax_saved: round_amount(result.tax_saved),
            effective_cost: round_amount(result.effective_cost),
            note: TAX_NOTE,
        }
    }

    fn corpus_response(&self, result: &ProjectionResult) -> CorpusResponse {
        let regulatory = &self.rules.regulatory;
        let span = result.request.span();

        CorpusResponse {
            inputs: CorpusInputs {
                monthly_contribution: result.request.monthly_contribution(),
                current_age: span.current_age(),
                retirement_age: span.retirement_age(),
                risk_profile: result.risk_profile(),
                inflation_adjusted: result.request.is_inflation_adjusted(),
                years: span.years(),
                annual_return_rate: format_percent(result.annual_return_rate),
            },
            corpus: CorpusSummary {
                total_corpus: round_amount(result.total_corpus),
                total_contributed: round_amount(result.total_contributed),
                wealth_gained: round_amount(result.wealth_gained),
                real_corpus: round_amount(result.reported_real_corpus()),
                growth_multiplier: round2(result.growth_multiplier),
            },
            withdrawal: WithdrawalSummary {
                annuity_corpus: round_amount(result.annuity_corpus),
                lump_sum_withdrawal: round_amount(result.lump_sum),
                estimated_monthly_pension: round_amount(result.monthly_pension),
            },
            timeline: result.timeline.iter().map(TimelineRow::from).collect(),
            assumptions: AssumptionSummary {
                annual_return: format!("{} p.a.", format_percent(result.annual_return_rate)),
                annuity_rate: format!("{} p.a.", format_percent(regulatory.annuity_rate)),
                annuity_corpus_percent: format!(
                    "{} (PFRDA minimum rule)",
                    whole_percent(regulatory.annuity_purchase_fraction)
                ),
                inflation_rate: format!("{} p.a.", format_percent(regulatory.inflation_rate)),
                disclaimer: DISCLAIMER,
            },
        }
    }
}

fn contribution_scenario(result: &OptimizationResult) -> ContributionScenario {
    ContributionScenario {
        risk_profile: result.risk_profile(),
        annual_return: whole_percent(result.annual_return_rate),
        required_monthly_contribution: result.required_monthly_contribution,
        equity_percent: whole_percent(result.equity),
        debt_percent: whole_percent(result.debt),
    }
}

fn whole_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
