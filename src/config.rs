//! The `Config` record (§6): module tier/quality selections, the tier cap, cost
//! coefficients, allow/deny lists, and the declared supplies and demands.
//!
//! Mirrors `linear_solver.py`'s config handling: one JSON document, loaded once,
//! validated once (`validate`) before anything else touches the catalog.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::quality::tier_from_name;
use crate::tables::ModuleStats;

fn default_building_quality() -> f64 {
    1.0
}

/// A declared supply: a free `>= 0` input with an associated per-unit cost.
#[derive(Clone, Debug, Deserialize)]
pub struct InputSpec {
    pub key: String,
    pub quality: String,
    #[serde(default)]
    pub resource: bool,
    pub cost: f64,
}

/// A declared demand: a constant draw on one (item, tier) node.
#[derive(Clone, Debug, Deserialize)]
pub struct OutputSpec {
    pub key: String,
    pub quality: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Path to the catalog JSON data file, resolved relative to the config file.
    #[serde(default)]
    pub data: String,

    pub quality_module_tier: u8,
    pub quality_module_quality: String,
    pub prod_module_tier: u8,
    pub prod_module_quality: String,
    pub speed_module_tier: u8,
    pub speed_module_quality: String,
    #[serde(default)]
    pub check_speed_modules: bool,

    pub max_quality_unlocked: String,
    #[serde(default = "default_building_quality")]
    pub building_quality: f64,

    #[serde(default)]
    pub allow_byproducts: bool,

    #[serde(default)]
    pub allowed_recipes: Option<BTreeSet<String>>,
    #[serde(default)]
    pub disallowed_recipes: Option<BTreeSet<String>>,
    #[serde(default)]
    pub allowed_crafting_machines: Option<BTreeSet<String>>,
    #[serde(default)]
    pub disallowed_crafting_machines: Option<BTreeSet<String>>,

    #[serde(default)]
    pub module_cost: f64,
    #[serde(default)]
    pub building_cost: f64,

    #[serde(default)]
    pub inputs: Vec<InputSpec>,
    #[serde(default)]
    pub outputs: Vec<OutputSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: String::new(),
            quality_module_tier: 3,
            quality_module_quality: "legendary".to_owned(),
            prod_module_tier: 3,
            prod_module_quality: "legendary".to_owned(),
            speed_module_tier: 3,
            speed_module_quality: "legendary".to_owned(),
            check_speed_modules: false,
            max_quality_unlocked: "legendary".to_owned(),
            building_quality: 1.0,
            allow_byproducts: false,
            allowed_recipes: None,
            disallowed_recipes: None,
            allowed_crafting_machines: None,
            disallowed_crafting_machines: None,
            module_cost: 0.0,
            building_cost: 0.0,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }
}

impl Config {
    /// Rejects configurations that set both halves of an allow/deny pair. Checked once,
    /// before the catalog is even loaded, so an illegal config never reaches the solver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_recipes.is_some() && self.disallowed_recipes.is_some() {
            return Err(ConfigError::MutuallyExclusive {
                allowed: "allowed_recipes",
                disallowed: "disallowed_recipes",
            });
        }
        if self.allowed_crafting_machines.is_some() && self.disallowed_crafting_machines.is_some() {
            return Err(ConfigError::MutuallyExclusive {
                allowed: "allowed_crafting_machines",
                disallowed: "disallowed_crafting_machines",
            });
        }
        Ok(())
    }

    pub fn recipe_is_allowed(&self, recipe_key: &str) -> bool {
        if let Some(allowed) = &self.allowed_recipes {
            allowed.contains(recipe_key)
        } else if let Some(disallowed) = &self.disallowed_recipes {
            !disallowed.contains(recipe_key)
        } else {
            true
        }
    }

    pub fn machine_is_allowed(&self, machine_key: &str) -> bool {
        if let Some(allowed) = &self.allowed_crafting_machines {
            allowed.contains(machine_key)
        } else if let Some(disallowed) = &self.disallowed_crafting_machines {
            !disallowed.contains(machine_key)
        } else {
            true
        }
    }

    pub fn max_tier_unlocked(&self) -> Result<u8, ConfigError> {
        tier_from_name(&self.max_quality_unlocked)
    }

    pub fn module_stats(&self) -> Result<ModuleStats, ConfigError> {
        ModuleStats::new(
            self.quality_module_tier,
            tier_from_name(&self.quality_module_quality)?,
            self.prod_module_tier,
            tier_from_name(&self.prod_module_quality)?,
            self.speed_module_tier,
            tier_from_name(&self.speed_module_quality)?,
        )
    }

    /// Beacon-supplied speed module counts to enumerate: just `{0}` unless
    /// `check_speed_modules` is set, in which case `0..=16`.
    pub fn beacon_counts(&self) -> Vec<u32> {
        if self.check_speed_modules {
            (0..=16).collect()
        } else {
            vec![0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_allow_and_deny_recipes_is_an_error() {
        let config = Config {
            allowed_recipes: Some(BTreeSet::from(["a".to_owned()])),
            disallowed_recipes: Some(BTreeSet::from(["b".to_owned()])),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MutuallyExclusive { .. })
        ));
    }

    #[test]
    fn both_allow_and_deny_machines_is_an_error() {
        let config = Config {
            allowed_crafting_machines: Some(BTreeSet::from(["a".to_owned()])),
            disallowed_crafting_machines: Some(BTreeSet::from(["b".to_owned()])),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MutuallyExclusive { .. })
        ));
    }

    #[test]
    fn one_sided_lists_are_fine() {
        let config = Config {
            allowed_recipes: Some(BTreeSet::from(["a".to_owned()])),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_beacon_counts_is_just_zero() {
        assert_eq!(Config::default().beacon_counts(), vec![0]);
    }

    #[test]
    fn check_speed_modules_enumerates_zero_through_sixteen() {
        let config = Config {
            check_speed_modules: true,
            ..Config::default()
        };
        assert_eq!(config.beacon_counts().len(), 17);
        assert_eq!(config.beacon_counts()[16], 16);
    }

    #[test]
    fn allowlist_recipes_restricts_to_named_set() {
        let config = Config {
            allowed_recipes: Some(BTreeSet::from(["keep".to_owned()])),
            ..Config::default()
        };
        assert!(config.recipe_is_allowed("keep"));
        assert!(!config.recipe_is_allowed("drop"));
    }

    #[test]
    fn denylist_machines_excludes_named_set() {
        let config = Config {
            disallowed_crafting_machines: Some(BTreeSet::from(["bad".to_owned()])),
            ..Config::default()
        };
        assert!(!config.machine_is_allowed("bad"));
        assert!(config.machine_is_allowed("good"));
    }

    #[test]
    fn unset_lists_allow_everything() {
        let config = Config::default();
        assert!(config.recipe_is_allowed("anything"));
        assert!(config.machine_is_allowed("anything"));
    }
}
