//! Closed-form growth of a level monthly contribution stream
//!
//! Both directions (future value and required payment) use the same factor,
//! so the projector, the timeline and the solver cannot drift apart.

/// Future value per unit of monthly contribution after `months` periods.
///
/// Ordinary-annuity factor `((1+r)^n - 1) / r` multiplied by `(1+r)`, i.e.
/// contributions are credited at the start of each month.
/// Callers must not pass `months == 0`; see [`future_value`].
pub fn annuity_due_factor(monthly_rate: f64, months: u32) -> f64 {
    (compound(monthly_rate, months) - 1.0) / monthly_rate * (1.0 + monthly_rate)
}

/// `(1+r)^n`, with the exponent taken in floating point so that no period
/// count can wrap to a negative power
fn compound(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powf(f64::from(periods))
}

/// Corpus accumulated by contributing `contribution` every month for `months`
/// months. Zero elapsed time is defined as exactly zero.
pub fn future_value(contribution: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    contribution * annuity_due_factor(monthly_rate, months)
}

/// Monthly contribution needed to accumulate `target` over `months` months
pub fn required_payment(target: f64, monthly_rate: f64, months: u32) -> f64 {
    target * monthly_rate / ((compound(monthly_rate, months) - 1.0) * (1.0 + monthly_rate))
}

/// Divide a nominal amount by compounded annual inflation over `years`
pub fn deflate(amount: f64, inflation_rate: f64, years: u32) -> f64 {
    amount / compound(inflation_rate, years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_period() {
        // One month: contribution credited once, grows one period
        assert_relative_eq!(future_value(1000.0, 0.01, 1), 1010.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_months_is_zero() {
        assert_eq!(future_value(5000.0, 0.10 / 12.0, 0), 0.0);
    }

    #[test]
    fn test_matches_month_by_month_accumulation() {
        let r = 0.08 / 12.0;
        let mut balance = 0.0;
        for _ in 0..120 {
            balance = (balance + 2500.0) * (1.0 + r);
        }
        assert_relative_eq!(future_value(2500.0, r, 120), balance, max_relative = 1e-12);
    }

    #[test]
    fn test_required_payment_inverts_future_value() {
        let r = 0.12 / 12.0;
        let fv = future_value(7321.0, r, 300);
        assert_relative_eq!(required_payment(fv, r, 300), 7321.0, max_relative = 1e-12);
    }

    #[test]
    fn test_long_horizons_stay_positive() {
        // Period counts past i32::MAX must not turn into negative exponents
        let r = 0.10 / 12.0;
        let months = 2_400_000_360;
        assert!(annuity_due_factor(r, months) > 0.0);
        assert!(required_payment(1e7, r, months) >= 0.0);
        assert!(required_payment(1e7, r, 1_800) > 0.0);
    }

    #[test]
    fn test_deflate() {
        assert_relative_eq!(deflate(1_060.0, 0.06, 1), 1_000.0, epsilon = 1e-9);
        assert_eq!(deflate(500.0, 0.06, 0), 500.0);
    }
}
