//! CSV-based rule loader
//!
//! Loads rule overrides from CSV files in data/rules/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::warn;

use super::profile::{ProfileAssumptions, ProfileTable, RiskProfile};
use super::regulatory::RegulatoryRules;

/// Default path to the rules directory
pub const DEFAULT_RULES_PATH: &str = "data/rules";

pub const REGULATORY_FILE: &str = "regulatory.csv";
pub const RISK_PROFILES_FILE: &str = "risk_profiles.csv";

/// Upper bound for any age rule, in years
const MAX_RULE_AGE: f64 = 150.0;

/// Tolerance for the equity + debt = 1 check
const ALLOCATION_TOLERANCE: f64 = 1e-9;

#[derive(Debug, serde::Deserialize)]
struct ProfileRow {
    profile: String,
    equity: f64,
    debt: f64,
    expected_return: f64,
}

/// Apply `key,value` overrides to the default regulatory rules.
/// Keys missing from the file keep their default; unknown keys are ignored.
pub fn load_regulatory_from_reader<R: Read>(reader: R) -> Result<RegulatoryRules> {
    let mut rules = RegulatoryRules::default();
    let mut csv_reader = csv::Reader::from_reader(reader);

    for result in csv_reader.records() {
        let record = result?;
        let key = record.get(0).unwrap_or_default().trim();
        let raw = record.get(1).unwrap_or_default().trim();
        let value: f64 = raw
            .parse()
            .with_context(|| format!("invalid value '{}' for rule '{}'", raw, key))?;

        match key {
            "min_contribution_monthly" => rules.min_contribution_monthly = value,
            "min_join_age" => rules.min_join_age = as_age(key, value)?,
            "max_join_age" => rules.max_join_age = as_age(key, value)?,
            "default_retirement_age" => rules.default_retirement_age = as_age(key, value)?,
            "max_retirement_age" => rules.max_retirement_age = as_age(key, value)?,
            "annuity_purchase_fraction" => rules.annuity_purchase_fraction = value,
            "annuity_rate" => rules.annuity_rate = value,
            "inflation_rate" => rules.inflation_rate = value,
            "primary_deduction_cap" => rules.primary_deduction_cap = value,
            "supplementary_deduction_cap" => rules.supplementary_deduction_cap = value,
            other => warn!("Ignoring unknown regulatory rule '{}'", other),
        }
    }

    if rules.min_join_age > rules.max_join_age {
        bail!(
            "min_join_age {} exceeds max_join_age {}",
            rules.min_join_age,
            rules.max_join_age
        );
    }
    if rules.default_retirement_age > rules.max_retirement_age {
        bail!(
            "default_retirement_age {} exceeds max_retirement_age {}",
            rules.default_retirement_age,
            rules.max_retirement_age
        );
    }
    if !(0.0..=1.0).contains(&rules.annuity_purchase_fraction) {
        bail!(
            "annuity_purchase_fraction must be within [0, 1], got {}",
            rules.annuity_purchase_fraction
        );
    }

    Ok(rules)
}

fn as_age(key: &str, value: f64) -> Result<u32> {
    if value < 0.0 || value.fract() != 0.0 {
        bail!("rule '{}' must be a whole number of years, got {}", key, value);
    }
    if value > MAX_RULE_AGE {
        bail!("rule '{}' must be at most {} years, got {}", key, MAX_RULE_AGE, value);
    }
    Ok(value as u32)
}

/// Load profile assumptions. Profiles absent from the file keep their defaults.
pub fn load_profiles_from_reader<R: Read>(reader: R) -> Result<ProfileTable> {
    let mut table = ProfileTable::default();
    let mut csv_reader = csv::Reader::from_reader(reader);

    for result in csv_reader.deserialize() {
        let row: ProfileRow = result?;
        let profile: RiskProfile = row.profile.trim().parse()?;

        if (row.equity + row.debt - 1.0).abs() > ALLOCATION_TOLERANCE {
            bail!(
                "profile '{}': equity {} + debt {} must sum to 1",
                profile,
                row.equity,
                row.debt
            );
        }
        if !(row.expected_return > 0.0) {
            bail!(
                "profile '{}': expected return must be positive, got {}",
                profile,
                row.expected_return
            );
        }

        *table.get_mut(profile) = ProfileAssumptions {
            equity: row.equity,
            debt: row.debt,
            expected_return: row.expected_return,
        };
    }

    Ok(table)
}

pub fn load_regulatory(path: &Path) -> Result<RegulatoryRules> {
    let file_path = path.join(REGULATORY_FILE);
    let file = File::open(&file_path)
        .with_context(|| format!("failed to open {}", file_path.display()))?;
    load_regulatory_from_reader(file)
        .with_context(|| format!("failed to load {}", file_path.display()))
}

pub fn load_profiles(path: &Path) -> Result<ProfileTable> {
    let file_path = path.join(RISK_PROFILES_FILE);
    let file = File::open(&file_path)
        .with_context(|| format!("failed to open {}", file_path.display()))?;
    load_profiles_from_reader(file)
        .with_context(|| format!("failed to load {}", file_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regulatory_overrides() {
        let csv = "key,value\ninflation_rate,0.05\nmax_join_age,65\nsurcharge,1.0\n";
        let rules = load_regulatory_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(rules.inflation_rate, 0.05);
        assert_eq!(rules.max_join_age, 65);
        // Untouched keys keep their defaults
        assert_eq!(rules.min_contribution_monthly, 500.0);
        assert_eq!(rules.annuity_rate, 0.055);
    }

    #[test]
    fn test_regulatory_rejects_bad_values() {
        assert!(load_regulatory_from_reader("key,value\nannuity_rate,abc\n".as_bytes()).is_err());
        assert!(load_regulatory_from_reader("key,value\nmin_join_age,18.5\n".as_bytes()).is_err());
        assert!(load_regulatory_from_reader("key,value\nmin_join_age,80\n".as_bytes()).is_err());
        assert!(load_regulatory_from_reader("key,value\nmax_retirement_age,55\n".as_bytes()).is_err());
        assert!(
            load_regulatory_from_reader("key,value\nmax_retirement_age,400000000\n".as_bytes()).is_err()
        );
    }

    #[test]
    fn test_profiles_override() {
        let csv = "profile,equity,debt,expected_return\naggressive,0.8,0.2,0.13\n";
        let table = load_profiles_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.aggressive.expected_return, 0.13);
        assert_eq!(table.aggressive.equity, 0.8);
        assert_eq!(table.moderate.expected_return, 0.10);
    }

    #[test]
    fn test_profiles_reject_invalid_rows() {
        let unknown = "profile,equity,debt,expected_return\nbalanced,0.5,0.5,0.1\n";
        assert!(load_profiles_from_reader(unknown.as_bytes()).is_err());

        let split = "profile,equity,debt,expected_return\nmoderate,0.6,0.5,0.1\n";
        assert!(load_profiles_from_reader(split.as_bytes()).is_err());

        let zero_rate = "profile,equity,debt,expected_return\nmoderate,0.5,0.5,0.0\n";
        assert!(load_profiles_from_reader(zero_rate.as_bytes()).is_err());
    }

    #[test]
    fn test_load_shipped_rules() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_RULES_PATH);
        assert_eq!(load_regulatory(&dir).unwrap(), RegulatoryRules::default());
        assert_eq!(load_profiles(&dir).unwrap(), ProfileTable::default());
    }
}
