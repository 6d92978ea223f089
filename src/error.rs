//! Error types for request validation and projection math

use thiserror::Error;

/// A request parameter violated one of the scheme rules.
///
/// Checked before any projection runs; every variant is a caller mistake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Minimum contribution is ₹{minimum}/month (got {contribution})")]
    BelowMinimumContribution { contribution: f64, minimum: f64 },

    #[error("Age must be between {min} and {max} (got {age})")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },

    #[error("Retirement age must be at most {max} (got {retirement_age})")]
    RetirementAgeTooHigh { retirement_age: u32, max: u32 },

    #[error("Age must be a whole number of years (got {0})")]
    NonWholeAge(f64),

    #[error("Retirement age must be greater than current age ({retirement_age} <= {current_age})")]
    InvalidAgeOrder { current_age: u32, retirement_age: u32 },

    #[error("Invalid risk profile '{0}'. Choose: conservative, moderate, or aggressive")]
    UnknownRiskProfile(String),

    #[error("Target corpus must be a positive amount (got {0})")]
    NonPositiveTarget(f64),
}

/// Failure of an engine operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A non-finite number came out of the closed-form math. Cannot happen for
    /// validated input, so this always indicates a broken invariant.
    #[error("Computation produced a non-finite {quantity}: {value}")]
    Computation { quantity: &'static str, value: f64 },
}

impl EngineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}

/// Return `value` unchanged if finite, otherwise a `Computation` error naming it
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::Computation { quantity, value })
    }
}
