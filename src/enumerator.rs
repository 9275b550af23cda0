//! Activity Enumerator (§4.3): for each surviving recipe and its dominant machine,
//! enumerates every (tier, module-assignment, beacon-count) tuple permitted by the
//! configuration and derives that activity's per-second ingredient/result coefficients.

use log::warn;

use crate::activity::Activity;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::ConfigError;
use crate::machine_selector::select_dominant_machine;
use crate::quality;
use crate::tables::{effective_beacon_modules, ModuleStats};

/// One coefficient an activity contributes to a single (item, tier) balance node.
/// Negative for ingredients (consumed), positive for results (produced).
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub item: String,
    pub tier: u8,
    pub amount_per_second: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumeratedActivity {
    pub activity: Activity,
    pub terms: Vec<Term>,
}

/// Enumerates every activity the configuration permits, with its coefficients.
///
/// Recipes with no allowed dominant machine are skipped with a warning (not an error):
/// this mirrors the reference solver's handling of rocket-parts-style recipes that have
/// no matching crafting machine in a given data file.
pub fn enumerate(
    catalog: &Catalog,
    config: &Config,
    module_stats: &ModuleStats,
    max_tier: u8,
) -> Result<Vec<EnumeratedActivity>, ConfigError> {
    let beacon_counts = config.beacon_counts();
    let mut out = Vec::new();

    for recipe in catalog.recipes.values() {
        if !config.recipe_is_allowed(&recipe.key) {
            continue;
        }

        let machine_key = match select_dominant_machine(&recipe.key, &recipe.category, catalog, config)? {
            Some(machine_key) => machine_key,
            None => {
                warn!(
                    "skipping recipe `{}`: no allowed crafting machine supports category `{}`",
                    recipe.key, recipe.category
                );
                continue;
            }
        };
        let machine = &catalog.machines[&machine_key];
        let crafting_speed = machine.crafting_speed * config.building_quality;

        for (&tier, n_qual, &n_beacon) in
            itertools::iproduct!(&recipe.qualities, 0..=machine.module_slots, &beacon_counts)
        {
            let n_prod = if recipe.allow_productivity {
                machine.module_slots - n_qual
            } else {
                0
            };

            out.push(build_activity(
                catalog,
                module_stats,
                max_tier,
                recipe,
                &machine_key,
                crafting_speed,
                machine.prod_bonus,
                tier,
                n_qual,
                n_prod,
                n_beacon,
            ));
        }
    }

    Ok(out)
}

#[allow(clippy::too_many_arguments)]
fn build_activity(
    catalog: &Catalog,
    module_stats: &ModuleStats,
    max_tier: u8,
    recipe: &crate::catalog::Recipe,
    machine_key: &str,
    crafting_speed: f64,
    machine_prod_bonus: f64,
    tier: u8,
    n_qual: u32,
    n_prod: u32,
    n_beacon: u32,
) -> EnumeratedActivity {
    let eff_beacon = effective_beacon_modules(n_beacon);

    let speed_factor = crafting_speed
        * (1.0 + eff_beacon * module_stats.speed_bonus_per_module
            - f64::from(n_qual) * module_stats.speed_penalty_per_quality_module
            - f64::from(n_prod) * module_stats.speed_penalty_per_prod_module);

    let prod = f64::from(n_prod) * module_stats.prod_bonus_per_module + machine_prod_bonus;

    let quality_percent = (f64::from(n_qual) * module_stats.quality_probability_per_module
        - eff_beacon * module_stats.quality_penalty_per_speed_module)
        .clamp(0.0, 1.0);

    let activity = Activity {
        recipe_key: recipe.key.clone(),
        tier,
        machine_key: machine_key.to_owned(),
        n_qual,
        n_prod,
        n_beacon,
    };

    let mut terms = Vec::with_capacity(recipe.ingredients.len() + recipe.results.len());

    for ingredient in &recipe.ingredients {
        let item = &catalog.items[&ingredient.item];
        let ingredient_tier = if item.allows_quality { tier } else { 0 };
        let per_second = ingredient.amount * speed_factor / recipe.energy_required;
        terms.push(Term {
            item: ingredient.item.clone(),
            tier: ingredient_tier,
            amount_per_second: -per_second,
        });
    }

    for result in &recipe.results {
        let item = &catalog.items[&result.name];
        let expected = result.expected_amount(prod);

        if item.allows_quality {
            for end_tier in tier..=max_tier {
                let factor = quality::factor(tier, end_tier, max_tier, quality_percent);
                if factor == 0.0 {
                    continue;
                }
                let per_second = expected * speed_factor * factor / recipe.energy_required;
                terms.push(Term {
                    item: result.name.clone(),
                    tier: end_tier,
                    amount_per_second: per_second,
                });
            }
        } else {
            let per_second = expected * speed_factor / recipe.energy_required;
            terms.push(Term {
                item: result.name.clone(),
                tier: 0,
                amount_per_second: per_second,
            });
        }
    }

    EnumeratedActivity { activity, terms }
}
