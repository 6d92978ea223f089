//! Rule checks that every request passes before any projection math runs

use log::debug;

use super::data::{AgeSpan, ProjectionRequest, TargetRequest, ValidatedRequest, ValidatedTarget};
use crate::error::ValidationError;
use crate::rules::{RegulatoryRules, RiskProfile};

/// Checks requests against the regulatory rules.
///
/// Checks run in a fixed order and stop at the first failure:
/// contribution (or target), join-age window, age ordering, retirement-age
/// cap, risk profile.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    rules: &'a RegulatoryRules,
}

impl<'a> Validator<'a> {
    pub fn new(rules: &'a RegulatoryRules) -> Self {
        Self { rules }
    }

    pub fn validate(&self, request: &ProjectionRequest) -> Result<ValidatedRequest, ValidationError> {
        let minimum = self.rules.min_contribution_monthly;
        let contribution = match request.monthly_contribution {
            // NaN fails the comparison and lands here too
            Some(c) if c >= minimum && c.is_finite() => c,
            other => {
                return Err(ValidationError::BelowMinimumContribution {
                    contribution: other.unwrap_or(0.0),
                    minimum,
                })
            }
        };

        let span = self.check_span(request.current_age, request.retirement_age)?;
        let profile = parse_profile(request.risk_profile.as_deref())?;

        debug!(
            "Validated projection request: {} /month, ages {}-{}, {}",
            contribution,
            span.current_age(),
            span.retirement_age(),
            profile
        );

        Ok(ValidatedRequest::new(contribution, span, profile, request.inflation_adjusted))
    }

    pub fn validate_target(&self, request: &TargetRequest) -> Result<ValidatedTarget, ValidationError> {
        let target = request.target_corpus;
        if !(target > 0.0 && target.is_finite()) {
            return Err(ValidationError::NonPositiveTarget(target));
        }

        let span = self.check_span(request.current_age, request.retirement_age)?;
        let profile = parse_profile(request.risk_profile.as_deref())?;

        Ok(ValidatedTarget::new(target, span, profile))
    }

    fn check_span(&self, current_age: u32, retirement_age: Option<u32>) -> Result<AgeSpan, ValidationError> {
        if !self.rules.age_in_join_window(current_age) {
            return Err(ValidationError::AgeOutOfRange {
                age: current_age,
                min: self.rules.min_join_age,
                max: self.rules.max_join_age,
            });
        }

        let retirement_age = retirement_age.unwrap_or(self.rules.default_retirement_age);
        if retirement_age <= current_age {
            return Err(ValidationError::InvalidAgeOrder {
                current_age,
                retirement_age,
            });
        }

        if !self.rules.retirement_age_allowed(retirement_age) {
            return Err(ValidationError::RetirementAgeTooHigh {
                retirement_age,
                max: self.rules.max_retirement_age,
            });
        }

        Ok(AgeSpan::new(current_age, retirement_age))
    }
}

/// Convert an age given as a JSON number into whole years.
/// Range checks are left to the validator.
pub fn whole_years(age: f64) -> Result<u32, ValidationError> {
    if age.is_finite() && age.fract() == 0.0 && age >= 0.0 && age <= u32::MAX as f64 {
        Ok(age as u32)
    } else {
        Err(ValidationError::NonWholeAge(age))
    }
}

fn parse_profile(key: Option<&str>) -> Result<RiskProfile, ValidationError> {
    key.map_or(Ok(RiskProfile::default()), |k| k.parse::<RiskProfile>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(request: &ProjectionRequest) -> Result<ValidatedRequest, ValidationError> {
        Validator::new(&RegulatoryRules::default()).validate(request)
    }

    #[test]
    fn test_defaults_are_applied() {
        let validated = validate(&ProjectionRequest::new(5000.0, 30)).unwrap();

        assert_eq!(validated.span().retirement_age(), 60);
        assert_eq!(validated.span().years(), 30);
        assert_eq!(validated.span().months(), 360);
        assert_eq!(validated.risk_profile(), RiskProfile::Moderate);
        assert!(!validated.is_inflation_adjusted());
    }

    #[test]
    fn test_contribution_boundary() {
        assert!(validate(&ProjectionRequest::new(500.0, 30)).is_ok());

        let err = validate(&ProjectionRequest::new(499.0, 30)).unwrap_err();
        assert!(matches!(err, ValidationError::BelowMinimumContribution { .. }));

        let mut missing = ProjectionRequest::new(5000.0, 30);
        missing.monthly_contribution = None;
        assert!(matches!(
            validate(&missing),
            Err(ValidationError::BelowMinimumContribution { .. })
        ));

        assert!(validate(&ProjectionRequest::new(f64::NAN, 30)).is_err());
        assert!(validate(&ProjectionRequest::new(f64::INFINITY, 30)).is_err());
    }

    #[test]
    fn test_age_boundaries() {
        assert!(validate(&ProjectionRequest::new(1000.0, 18)).is_ok());
        assert!(validate(&ProjectionRequest::new(1000.0, 70).retiring_at(75)).is_ok());

        for age in [17, 71] {
            let err = validate(&ProjectionRequest::new(1000.0, age).retiring_at(80)).unwrap_err();
            assert!(matches!(err, ValidationError::AgeOutOfRange { .. }), "age {}", age);
        }
    }

    #[test]
    fn test_age_order() {
        let err = validate(&ProjectionRequest::new(1000.0, 40).retiring_at(40)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidAgeOrder { current_age: 40, retirement_age: 40 }
        );

        // Default retirement age of 60 is already passed at 65
        let err = validate(&ProjectionRequest::new(1000.0, 65)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAgeOrder { .. }));
    }

    #[test]
    fn test_retirement_age_cap() {
        assert!(validate(&ProjectionRequest::new(1000.0, 30).retiring_at(75)).is_ok());

        let err = validate(&ProjectionRequest::new(1000.0, 30).retiring_at(76)).unwrap_err();
        assert_eq!(err, ValidationError::RetirementAgeTooHigh { retirement_age: 76, max: 75 });

        // Spans long enough to overflow month counts never reach the engine
        for retirement_age in [200_000_030, 400_000_000, u32::MAX] {
            let err = validate(&ProjectionRequest::new(1000.0, 30).retiring_at(retirement_age))
                .unwrap_err();
            assert!(matches!(err, ValidationError::RetirementAgeTooHigh { .. }));
        }
    }

    #[test]
    fn test_whole_years() {
        assert_eq!(whole_years(30.0), Ok(30));
        assert_eq!(whole_years(0.0), Ok(0));
        assert_eq!(whole_years(30.5), Err(ValidationError::NonWholeAge(30.5)));
        assert_eq!(whole_years(-1.0), Err(ValidationError::NonWholeAge(-1.0)));
        assert!(whole_years(f64::NAN).is_err());
        assert!(whole_years(1e12).is_err());
    }

    #[test]
    fn test_unknown_profile() {
        let err = validate(&ProjectionRequest::new(1000.0, 30).with_profile("yolo")).unwrap_err();
        assert_eq!(err, ValidationError::UnknownRiskProfile("yolo".to_string()));
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        // Every rule is broken; the contribution check reports first
        let request = ProjectionRequest::new(10.0, 5).retiring_at(1).with_profile("yolo");
        assert!(matches!(
            validate(&request),
            Err(ValidationError::BelowMinimumContribution { .. })
        ));

        let request = ProjectionRequest::new(1000.0, 5).retiring_at(1).with_profile("yolo");
        assert!(matches!(validate(&request), Err(ValidationError::AgeOutOfRange { .. })));

        let request = ProjectionRequest::new(1000.0, 30).retiring_at(1).with_profile("yolo");
        assert!(matches!(validate(&request), Err(ValidationError::InvalidAgeOrder { .. })));
    }

    #[test]
    fn test_target_validation() {
        let rules = RegulatoryRules::default();
        let validator = Validator::new(&rules);

        let ok = validator
            .validate_target(&TargetRequest::new(1e7, 30).with_profile("aggressive"))
            .unwrap();
        assert_eq!(ok.risk_profile(), RiskProfile::Aggressive);
        assert_eq!(ok.span().years(), 30);

        assert_eq!(
            validator.validate_target(&TargetRequest::new(0.0, 30)),
            Err(ValidationError::NonPositiveTarget(0.0))
        );
        assert!(matches!(
            validator.validate_target(&TargetRequest::new(1e7, 30).retiring_at(30)),
            Err(ValidationError::InvalidAgeOrder { .. })
        ));
        assert!(matches!(
            validator.validate_target(&TargetRequest::new(1e7, 30).retiring_at(200_000_030)),
            Err(ValidationError::RetirementAgeTooHigh { .. })
        ));
    }
}
