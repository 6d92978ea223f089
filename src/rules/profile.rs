//! Risk profiles and their asset-allocation / return assumptions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Asset-allocation bundle chosen by the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    /// Every profile, in the order comparisons are reported
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];

    /// Lowercase key used on the wire and in rule files
    pub fn key(&self) -> &'static str {
        match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Moderate => "moderate",
            RiskProfile::Aggressive => "aggressive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Aggressive => "Aggressive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Lower risk, stable returns",
            RiskProfile::Moderate => "Balanced risk-return profile",
            RiskProfile::Aggressive => "Higher risk, higher potential returns",
        }
    }
}

impl Default for RiskProfile {
    fn default() -> Self {
        RiskProfile::Moderate
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RiskProfile {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(RiskProfile::Conservative),
            "moderate" => Ok(RiskProfile::Moderate),
            "aggressive" => Ok(RiskProfile::Aggressive),
            other => Err(ValidationError::UnknownRiskProfile(other.to_string())),
        }
    }
}

/// Return and allocation assumptions for one profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileAssumptions {
    /// Fraction of contributions invested in equity
    pub equity: f64,

    /// Fraction invested in debt (equity + debt = 1)
    pub debt: f64,

    /// Expected annual return, as a decimal
    pub expected_return: f64,
}

impl ProfileAssumptions {
    /// Monthly compounding rate
    pub fn monthly_rate(&self) -> f64 {
        self.expected_return / 12.0
    }
}

/// Assumptions for every profile. One field per variant so that lookups are
/// an exhaustive match rather than a keyed map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileTable {
    pub conservative: ProfileAssumptions,
    pub moderate: ProfileAssumptions,
    pub aggressive: ProfileAssumptions,
}

impl ProfileTable {
    pub fn get(&self, profile: RiskProfile) -> &ProfileAssumptions {
        match profile {
            RiskProfile::Conservative => &self.conservative,
            RiskProfile::Moderate => &self.moderate,
            RiskProfile::Aggressive => &self.aggressive,
        }
    }

    pub fn get_mut(&mut self, profile: RiskProfile) -> &mut ProfileAssumptions {
        match profile {
            RiskProfile::Conservative => &mut self.conservative,
            RiskProfile::Moderate => &mut self.moderate,
            RiskProfile::Aggressive => &mut self.aggressive,
        }
    }

    /// Profiles with their assumptions in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (RiskProfile, &ProfileAssumptions)> + '_ {
        RiskProfile::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self {
            conservative: ProfileAssumptions {
                equity: 0.25,
                debt: 0.75,
                expected_return: 0.08, // 8% p.a.
            },
            moderate: ProfileAssumptions {
                equity: 0.50,
                debt: 0.50,
                expected_return: 0.10, // 10% p.a.
            },
            aggressive: ProfileAssumptions {
                equity: 0.75,
                debt: 0.25,
                expected_return: 0.12, // 12% p.a.
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let table = ProfileTable::default();

        assert_eq!(table.get(RiskProfile::Conservative).expected_return, 0.08);
        assert_eq!(table.get(RiskProfile::Moderate).expected_return, 0.10);
        assert_eq!(table.get(RiskProfile::Aggressive).expected_return, 0.12);

        for (_, a) in table.iter() {
            assert!((a.equity + a.debt - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_iteration_order_is_stable() {
        let table = ProfileTable::default();
        let keys: Vec<_> = table.iter().map(|(p, _)| p.key()).collect();
        assert_eq!(keys, vec!["conservative", "moderate", "aggressive"]);
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!("aggressive".parse::<RiskProfile>(), Ok(RiskProfile::Aggressive));
        assert_eq!(
            "balanced".parse::<RiskProfile>(),
            Err(ValidationError::UnknownRiskProfile("balanced".to_string()))
        );
        // Keys are case-sensitive on the wire
        assert!("Moderate".parse::<RiskProfile>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&RiskProfile::Conservative).unwrap();
        assert_eq!(json, "\"conservative\"");
        let parsed: RiskProfile = serde_json::from_str("\"moderate\"").unwrap();
        assert_eq!(parsed, RiskProfile::Moderate);
    }
}
