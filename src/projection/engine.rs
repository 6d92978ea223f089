//! Forward projection: contribution stream to retirement corpus

use chrono::Datelike;
use log::debug;

use super::growth;
use super::result::ProjectionResult;
use super::timeline::{Timeline, TimelineStep};
use crate::error::{ensure_finite, EngineError};
use crate::request::ValidatedRequest;
use crate::rules::RuleSet;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Spacing of timeline points
    pub timeline_step: TimelineStep,

    /// Calendar year of the current age (first timeline point)
    pub base_year: i32,
}

impl ProjectionConfig {
    pub fn new(base_year: i32) -> Self {
        Self {
            timeline_step: TimelineStep::Yearly,
            base_year,
        }
    }

    /// Yearly timeline stamped from the local calendar year
    pub fn starting_this_year() -> Self {
        Self::new(chrono::Local::now().year())
    }

    pub fn with_step(mut self, timeline_step: TimelineStep) -> Self {
        self.timeline_step = timeline_step;
        self
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::starting_this_year()
    }
}

/// Projects a validated request to retirement
#[derive(Debug, Clone, Copy)]
pub struct CorpusProjector<'a> {
    rules: &'a RuleSet,
    config: ProjectionConfig,
}

impl<'a> CorpusProjector<'a> {
    pub fn new(rules: &'a RuleSet, config: ProjectionConfig) -> Self {
        Self { rules, config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the projection for a single request
    pub fn project(&self, request: &ValidatedRequest) -> Result<ProjectionResult, EngineError> {
        let regulatory = &self.rules.regulatory;
        let profile = self.rules.profile(request.risk_profile());
        let span = request.span();
        let monthly_rate = profile.monthly_rate();
        let contribution = request.monthly_contribution();

        let total_corpus = ensure_finite(
            "total corpus",
            growth::future_value(contribution, monthly_rate, span.months()),
        )?;
        let total_contributed = contribution * span.months() as f64;
        let wealth_gained = total_corpus - total_contributed;
        let growth_multiplier = ensure_finite("growth multiplier", total_corpus / total_contributed)?;

        // Annuitisation split and pension (simple yield on the annuity corpus)
        let annuity_corpus = total_corpus * regulatory.annuity_purchase_fraction;
        let lump_sum = total_corpus * regulatory.lump_sum_fraction();
        let monthly_pension = annuity_corpus * regulatory.annuity_rate / 12.0;

        let real_corpus = if request.is_inflation_adjusted() {
            let real = growth::deflate(total_corpus, regulatory.inflation_rate, span.years());
            Some(ensure_finite("real corpus", real)?)
        } else {
            None
        };

        let timeline = self.timeline(request).collect();

        debug!(
            "Projected {} /month over {} months at {:.4} monthly ({}): corpus {:.2}",
            contribution,
            span.months(),
            monthly_rate,
            request.risk_profile(),
            total_corpus
        );

        Ok(ProjectionResult {
            request: *request,
            annual_return_rate: profile.expected_return,
            total_corpus,
            total_contributed,
            wealth_gained,
            real_corpus,
            growth_multiplier,
            annuity_corpus,
            lump_sum,
            monthly_pension,
            timeline,
        })
    }

    /// Lazy growth timeline for a request, using the configured spacing
    pub fn timeline(&self, request: &ValidatedRequest) -> Timeline {
        let profile = self.rules.profile(request.risk_profile());
        Timeline::new(
            request.monthly_contribution(),
            profile.monthly_rate(),
            request.span(),
            self.config.base_year,
            self.config.timeline_step,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ProjectionRequest, Validator};
    use crate::rules::RiskProfile;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn project_with(rules: &RuleSet, request: ProjectionRequest) -> Result<ProjectionResult, EngineError> {
        let validated = Validator::new(&rules.regulatory).validate(&request)?;
        CorpusProjector::new(rules, ProjectionConfig::new(2026)).project(&validated)
    }

    fn project(request: ProjectionRequest) -> ProjectionResult {
        project_with(&RuleSet::default_rules(), request).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let result = project(ProjectionRequest::new(5000.0, 30).retiring_at(60).with_profile("moderate"));

        let r: f64 = 0.10 / 12.0;
        let expected = 5000.0 * ((1.0 + r).powi(360) - 1.0) / r * (1.0 + r);

        assert_eq!(result.years(), 30);
        assert_eq!(result.request.span().months(), 360);
        assert_relative_eq!(result.total_corpus, expected, max_relative = 1e-12);
        // ~1.14 crore
        assert!(result.total_corpus > 11_000_000.0 && result.total_corpus < 11_500_000.0);
        assert_eq!(result.total_contributed, 1_800_000.0);
        assert_relative_eq!(result.wealth_gained, expected - 1_800_000.0, max_relative = 1e-12);
        assert_eq!(result.annual_return_rate, 0.10);
    }

    #[test]
    fn test_annuity_split() {
        let result = project(ProjectionRequest::new(3200.0, 27).retiring_at(58).with_profile("aggressive"));

        assert_eq!(result.annuity_corpus, 0.40 * result.total_corpus);
        assert_relative_eq!(
            result.annuity_corpus + result.lump_sum,
            result.total_corpus,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            result.monthly_pension,
            result.annuity_corpus * 0.055 / 12.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_growth_multiplier() {
        let result = project(ProjectionRequest::new(1000.0, 50).retiring_at(51));
        assert!(result.growth_multiplier >= 1.0);
        assert_relative_eq!(
            result.growth_multiplier,
            result.total_corpus / result.total_contributed,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_inflation_adjustment() {
        let nominal = project(ProjectionRequest::new(5000.0, 30));
        assert_eq!(nominal.real_corpus, None);
        assert_eq!(nominal.reported_real_corpus(), nominal.total_corpus);

        let real = project(ProjectionRequest::new(5000.0, 30).inflation_adjusted(true));
        let deflated = real.total_corpus / 1.06_f64.powi(30);
        assert_relative_eq!(real.real_corpus.unwrap(), deflated, max_relative = 1e-12);
        assert!(real.reported_real_corpus() < real.total_corpus);
    }

    #[test]
    fn test_monotonic_in_contribution() {
        let mut previous = 0.0;
        for contribution in [500.0, 501.0, 1000.0, 2500.5, 10_000.0, 100_000.0] {
            let result = project(ProjectionRequest::new(contribution, 35).retiring_at(60));
            assert!(result.total_corpus > previous, "contribution {}", contribution);
            previous = result.total_corpus;
        }
    }

    #[test]
    fn test_rate_ordering() {
        for (age, retire) in [(18, 60), (45, 46), (59, 70)] {
            let corpus = |profile: RiskProfile| {
                project(ProjectionRequest::new(2000.0, age).retiring_at(retire).with_profile(profile.key()))
                    .total_corpus
            };
            assert!(corpus(RiskProfile::Aggressive) >= corpus(RiskProfile::Moderate));
            assert!(corpus(RiskProfile::Moderate) >= corpus(RiskProfile::Conservative));
        }
    }

    #[test]
    fn test_timeline_boundaries() {
        let result = project(ProjectionRequest::new(5000.0, 30).retiring_at(60));

        assert_eq!(result.timeline.len(), 31);
        let first = result.timeline.first().unwrap();
        assert_eq!((first.age, first.year), (30, 2026));
        assert_eq!(first.corpus, 0.0);
        assert_eq!(first.contributed, 0.0);

        let last = result.timeline.last().unwrap();
        assert_eq!(last.age, 60);
        assert_abs_diff_eq!(last.corpus, result.total_corpus, epsilon = 1e-6);
        assert_eq!(last.contributed, result.total_contributed);
    }

    #[test]
    fn test_coarse_timeline() {
        let rules = RuleSet::default_rules();
        let validated = Validator::new(&rules.regulatory)
            .validate(&ProjectionRequest::new(5000.0, 30))
            .unwrap();
        let config = ProjectionConfig::new(2026).with_step(TimelineStep::COARSE);
        let result = CorpusProjector::new(&rules, config).project(&validated).unwrap();

        let ages: Vec<_> = result.timeline.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![30, 35, 40, 45, 50, 55, 60]);
    }

    #[test]
    fn test_zero_contribution_is_a_computation_error() {
        // A rule file allowing zero contributions makes the multiplier 0/0
        let mut rules = RuleSet::default_rules();
        rules.regulatory.min_contribution_monthly = 0.0;

        let err = project_with(&rules, ProjectionRequest::new(0.0, 30)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Computation { quantity: "growth multiplier", .. }
        ));
    }

    #[test]
    fn test_same_age_is_refused() {
        let err = project_with(&RuleSet::default_rules(), ProjectionRequest::new(5000.0, 60).retiring_at(60))
            .unwrap_err();
        assert!(err.is_validation());
    }
}
