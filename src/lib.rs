//! Pension Projection - retirement outcome engine for defined-contribution pension schemes
//!
//! This library provides:
//! - Scheme rules (contribution and age limits, annuity split, risk profiles)
//! - Request validation against those rules
//! - Corpus projection with annuity/lump-sum split, pension and growth timeline
//! - Required-contribution solving for a target corpus
//! - Side-by-side comparison across risk profiles
//! - Tax-deduction benefit of contributions
//!
//! Every operation is a pure function of its inputs and an immutable [`RuleSet`].

pub mod api;
pub mod error;
pub mod format;
pub mod projection;
pub mod request;
pub mod rules;
pub mod scenario;
pub mod tax;

// Re-export commonly used types
pub use error::{EngineError, ValidationError};
pub use projection::{
    ContributionSolver, CorpusProjector, OptimizationResult, ProjectionConfig, ProjectionResult,
    TimelinePoint, TimelineStep,
};
pub use request::{ProjectionRequest, TargetRequest, ValidatedRequest, ValidatedTarget, Validator};
pub use rules::{RegulatoryRules, RiskProfile, RuleSet};
pub use scenario::{ScenarioComparator, ScenarioEntry};
pub use tax::{calculate_tax_benefit, TaxBenefitResult};
