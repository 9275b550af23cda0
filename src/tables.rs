//! The module-tier/module-quality constant tables and beacon math.
//!
//! Modeled as process-wide immutable data, indexed `[tier - 1][quality]`, matching
//! `linear_solver.py`'s `QUALITY_PROBABILITIES`/`PROD_BONUSES`/`SPEED_BONUSES` tables.

use crate::error::ConfigError;

pub const QUALITY_PROBABILITIES: [[f64; 5]; 3] = [
    [0.01, 0.013, 0.016, 0.019, 0.025],
    [0.02, 0.026, 0.032, 0.038, 0.05],
    [0.025, 0.032, 0.04, 0.047, 0.062],
];

pub const PROD_BONUSES: [[f64; 5]; 3] = [
    [0.04, 0.05, 0.06, 0.07, 0.1],
    [0.06, 0.07, 0.09, 0.11, 0.15],
    [0.1, 0.13, 0.16, 0.19, 0.25],
];

pub const SPEED_BONUSES: [[f64; 5]; 3] = [
    [0.2, 0.26, 0.32, 0.38, 0.5],
    [0.3, 0.39, 0.48, 0.57, 0.75],
    [0.5, 0.65, 0.8, 0.95, 1.25],
];

pub const SPEED_PENALTY_PER_QUALITY_MODULE: [f64; 3] = [0.05, 0.05, 0.05];
pub const SPEED_PENALTY_PER_PROD_MODULE: [f64; 3] = [0.05, 0.1, 0.15];
pub const QUALITY_PENALTY_PER_SPEED_MODULE: [f64; 3] = [0.01, 0.015, 0.025];

/// Diminishing-returns factor applied to beacon-supplied speed modules.
pub const BEACON_EFFICIENCY: f64 = 1.5;

fn tier_index(tier: u8) -> Result<usize, ConfigError> {
    match tier {
        1..=3 => Ok(tier as usize - 1),
        other => Err(ConfigError::InvalidModuleTier(other)),
    }
}

/// The rolled-up per-module bonuses and penalties for one choice of module tier/quality,
/// for each of the three module kinds (quality, productivity, speed).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModuleStats {
    pub quality_probability_per_module: f64,
    pub prod_bonus_per_module: f64,
    pub speed_bonus_per_module: f64,
    pub speed_penalty_per_quality_module: f64,
    pub speed_penalty_per_prod_module: f64,
    pub quality_penalty_per_speed_module: f64,
}

impl ModuleStats {
    pub fn new(
        quality_module_tier: u8,
        quality_module_quality: u8,
        prod_module_tier: u8,
        prod_module_quality: u8,
        speed_module_tier: u8,
        speed_module_quality: u8,
    ) -> Result<Self, ConfigError> {
        let qt = tier_index(quality_module_tier)?;
        let pt = tier_index(prod_module_tier)?;
        let st = tier_index(speed_module_tier)?;

        Ok(Self {
            quality_probability_per_module: QUALITY_PROBABILITIES[qt]
                [quality_module_quality as usize],
            prod_bonus_per_module: PROD_BONUSES[pt][prod_module_quality as usize],
            speed_bonus_per_module: SPEED_BONUSES[st][speed_module_quality as usize],
            speed_penalty_per_quality_module: SPEED_PENALTY_PER_QUALITY_MODULE[qt],
            speed_penalty_per_prod_module: SPEED_PENALTY_PER_PROD_MODULE[pt],
            quality_penalty_per_speed_module: QUALITY_PENALTY_PER_SPEED_MODULE[st],
        })
    }
}

/// The effective number of speed modules contributed by `n_beacon` beacon-supplied
/// speed modules, after the diminishing-returns penalty for sharing beacons.
///
/// Beacon count for `n` modules is `ceil(n / 2)`.
pub fn effective_beacon_modules(n_beacon: u32) -> f64 {
    if n_beacon == 0 {
        return 0.0;
    }
    let beacons = (f64::from(n_beacon) / 2.0).ceil();
    f64::from(n_beacon) * BEACON_EFFICIENCY * beacons.powf(-0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_beacons_means_no_effective_modules() {
        assert_eq!(effective_beacon_modules(0), 0.0);
    }

    #[test]
    fn beacon_efficiency_diminishes_with_more_modules() {
        let one = effective_beacon_modules(1);
        let two = effective_beacon_modules(2);
        let four = effective_beacon_modules(4);
        // Per-module contribution should shrink as more modules share beacons.
        assert!(two / 2.0 < one);
        assert!(four / 4.0 < two / 2.0);
    }

    #[test]
    fn rejects_out_of_range_tier() {
        assert_eq!(
            ModuleStats::new(0, 0, 2, 0, 2, 0),
            Err(ConfigError::InvalidModuleTier(0))
        );
        assert_eq!(
            ModuleStats::new(2, 0, 4, 0, 2, 0),
            Err(ConfigError::InvalidModuleTier(4))
        );
    }

    #[test]
    fn legendary_tier_three_quality_module_matches_reference() {
        let stats = ModuleStats::new(3, 4, 3, 4, 3, 4).unwrap();
        assert_eq!(stats.quality_probability_per_module, 0.062);
        assert_eq!(stats.prod_bonus_per_module, 0.25);
        assert_eq!(stats.speed_bonus_per_module, 1.25);
    }
}
