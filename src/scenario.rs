//! Side-by-side comparison of every risk profile
//!
//! Runs the projector (or the solver) once per profile with otherwise
//! identical inputs. Output order is always conservative, moderate,
//! aggressive.

use serde::Serialize;

use crate::error::EngineError;
use crate::projection::{
    ContributionSolver, CorpusProjector, OptimizationResult, ProjectionConfig, ProjectionResult,
};
use crate::request::{ValidatedRequest, ValidatedTarget};
use crate::rules::{RiskProfile, RuleSet};

/// One profile's row in a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioEntry<T> {
    pub risk_profile: RiskProfile,
    pub label: &'static str,
    pub equity: f64,
    pub debt: f64,
    pub annual_return_rate: f64,
    pub outcome: T,
}

/// Runs a base request across all profiles
#[derive(Debug, Clone, Copy)]
pub struct ScenarioComparator<'a> {
    rules: &'a RuleSet,
    config: ProjectionConfig,
}

impl<'a> ScenarioComparator<'a> {
    pub fn new(rules: &'a RuleSet, config: ProjectionConfig) -> Self {
        Self { rules, config }
    }

    /// Forward mode: project the base request under every profile.
    /// The base request's own profile is ignored.
    pub fn compare_projections(
        &self,
        base: &ValidatedRequest,
    ) -> Result<Vec<ScenarioEntry<ProjectionResult>>, EngineError> {
        let projector = CorpusProjector::new(self.rules, self.config);
        self.run_each(|profile| projector.project(&base.for_profile(profile)))
    }

    /// Inverse mode: required contribution for the base target under every profile
    pub fn compare_contributions(
        &self,
        base: &ValidatedTarget,
    ) -> Result<Vec<ScenarioEntry<OptimizationResult>>, EngineError> {
        let solver = ContributionSolver::new(self.rules);
        self.run_each(|profile| solver.solve(&base.for_profile(profile)))
    }

    fn run_each<T, F>(&self, mut run: F) -> Result<Vec<ScenarioEntry<T>>, EngineError>
    where
        F: FnMut(RiskProfile) -> Result<T, EngineError>,
    {
        self.rules
            .profiles
            .iter()
            .map(|(profile, assumptions)| -> Result<ScenarioEntry<T>, EngineError> {
                Ok(ScenarioEntry {
                    risk_profile: profile,
                    label: profile.label(),
                    equity: assumptions.equity,
                    debt: assumptions.debt,
                    annual_return_rate: assumptions.expected_return,
                    outcome: run(profile)?,
                })
            })
            .collect()
    }
}
