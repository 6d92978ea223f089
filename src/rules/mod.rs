//! Scheme rules: regulatory constants and per-profile return assumptions

mod profile;
mod regulatory;
pub mod loader;

pub use profile::{ProfileAssumptions, ProfileTable, RiskProfile};
pub use regulatory::RegulatoryRules;

use std::path::Path;

/// Container for every rule the engine consults
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub regulatory: RegulatoryRules,
    pub profiles: ProfileTable,
}

impl RuleSet {
    /// Rules as published by the scheme regulator
    pub fn default_rules() -> Self {
        Self {
            regulatory: RegulatoryRules::default(),
            profiles: ProfileTable::default(),
        }
    }

    /// Load rules from CSV files in the default location (data/rules/)
    pub fn from_csv() -> anyhow::Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RULES_PATH))
    }

    /// Load rules from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            regulatory: loader::load_regulatory(path)?,
            profiles: loader::load_profiles(path)?,
        })
    }

    /// Assumptions for one profile
    pub fn profile(&self, profile: RiskProfile) -> &ProfileAssumptions {
        self.profiles.get(profile)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_rules()
    }
}
