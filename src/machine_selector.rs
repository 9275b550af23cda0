//! Dominant-machine selection: for a recipe's crafting category, pick the one
//! machine that simultaneously maximizes module slots, productivity bonus, and
//! crafting speed among the allowed candidates.

use crate::catalog::{Catalog, Machine};
use crate::config::Config;
use crate::error::ConfigError;

/// Returns the key of the dominant machine for `recipe_category`, or `Ok(None)` if no
/// allowed machine can run that category at all.
///
/// # Errors
///
/// Returns [`ConfigError::AmbiguousDominantMachine`] when the candidates that tie for
/// best on all three axes number anything other than exactly one — including zero,
/// which means no single machine dominates every axis at once.
pub fn select_dominant_machine(
    recipe_key: &str,
    recipe_category: &str,
    catalog: &Catalog,
    config: &Config,
) -> Result<Option<String>, ConfigError> {
    let candidates: Vec<&Machine> = catalog
        .machines
        .values()
        .filter(|machine| machine.crafting_categories.contains(recipe_category))
        .filter(|machine| config.machine_is_allowed(&machine.key))
        .collect();

    if candidates.is_empty() {
        return Ok(None);
    }

    let max_slots = candidates.iter().map(|m| m.module_slots).max().unwrap();
    let max_prod = candidates
        .iter()
        .map(|m| m.prod_bonus)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_speed = candidates
        .iter()
        .map(|m| m.crafting_speed)
        .fold(f64::NEG_INFINITY, f64::max);

    let dominant: Vec<&Machine> = candidates
        .iter()
        .copied()
        .filter(|m| m.module_slots == max_slots && m.prod_bonus == max_prod && m.crafting_speed == max_speed)
        .collect();

    if dominant.len() != 1 {
        return Err(ConfigError::AmbiguousDominantMachine {
            recipe: recipe_key.to_owned(),
            candidates: dominant.iter().map(|m| m.key.clone()).collect(),
        });
    }

    Ok(Some(dominant[0].key.clone()))
}
