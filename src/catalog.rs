//! Normalized view of items, recipes, machines, mining drills, and resources
//! loaded from the external JSON data file.
//!
//! Ingestion runs once during setup and never mutates afterwards: the `Catalog`
//! this module produces is an immutable result carrier for the rest of the crate.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;
use serde::Deserialize;

use crate::error::CatalogError;

const DEFAULT_RESOURCE_CATEGORY: &str = "basic-solid";

pub fn resource_item_key(key: &str) -> String {
    format!("{key}-resource")
}

fn resource_recipe_key(key: &str) -> String {
    format!("{key}-mining")
}

/// The raw top-level JSON document, as shipped by the surrounding game-data export.
#[derive(Debug, Deserialize)]
pub struct RawCatalog {
    pub items: Vec<RawItem>,
    pub recipes: Vec<RawRecipe>,
    pub crafting_machines: Vec<RawMachine>,
    #[serde(default)]
    pub mining_drills: Vec<RawMiningDrill>,
    #[serde(default)]
    pub resources: Vec<RawResource>,
    #[serde(default)]
    pub planets: Vec<RawPlanet>,
}

impl RawCatalog {
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawItem {
    pub key: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct RawIngredient {
    pub name: String,
    pub amount: f64,
}

fn default_probability() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawResult {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub amount_min: Option<f64>,
    #[serde(default)]
    pub amount_max: Option<f64>,
    #[serde(default = "default_probability")]
    pub probability: f64,
    #[serde(default)]
    pub ignored_by_productivity: f64,
    #[serde(default)]
    pub extra_count_fraction: f64,
}

impl RawResult {
    fn base_amount(&self) -> f64 {
        match (self.amount, self.amount_min, self.amount_max) {
            (Some(amount), ..) => amount,
            (None, Some(min), Some(max)) => 0.5 * (min + max),
            _ => 0.0,
        }
    }

    /// Expected per-craft amount given a productivity bonus, per §4.3/§9: `prod` is a
    /// single additive bonus, multiplied through as `(1 + prod)` exactly once.
    pub fn expected_amount(&self, prod: f64) -> f64 {
        let ignored = self.ignored_by_productivity;
        let after_prod = ignored + (self.base_amount() - ignored) * (1.0 + prod);
        after_prod * self.probability * (1.0 + self.extra_count_fraction)
    }
}

#[derive(Debug, Deserialize)]
pub struct RawRecipe {
    pub key: String,
    pub category: String,
    #[serde(default)]
    pub allow_productivity: bool,
    pub energy_required: f64,
    #[serde(default)]
    pub ingredients: Vec<RawIngredient>,
    #[serde(default)]
    pub results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
pub struct RawMachine {
    pub key: String,
    pub crafting_speed: f64,
    pub module_slots: u32,
    pub crafting_categories: Vec<String>,
    #[serde(default)]
    pub prod_bonus: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawMiningDrill {
    pub key: String,
    pub module_slots: u32,
    pub mining_speed: f64,
    pub resource_categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawResource {
    pub key: String,
    pub mining_time: f64,
    pub results: Vec<RawResult>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub required_fluid: Option<String>,
    #[serde(default)]
    pub fluid_amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawPlanetResources {
    #[serde(default)]
    pub offshore: Vec<String>,
    #[serde(default)]
    pub resource: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPlanet {
    pub resources: RawPlanetResources,
}

/// A normalized item, tagged with the set of tiers it can legally appear at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Item {
    pub key: String,
    pub allows_quality: bool,
    pub qualities: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub item: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub key: String,
    pub category: String,
    pub allow_productivity: bool,
    pub energy_required: f64,
    pub ingredients: Vec<Ingredient>,
    pub results: Vec<RawResult>,
    pub allows_quality: bool,
    pub qualities: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    pub key: String,
    pub crafting_speed: f64,
    pub module_slots: u32,
    pub crafting_categories: BTreeSet<String>,
    pub prod_bonus: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub items: BTreeMap<String, Item>,
    pub recipes: BTreeMap<String, Recipe>,
    pub machines: BTreeMap<String, Machine>,
}

impl Catalog {
    pub fn from_json(text: &str, max_tier_unlocked: u8) -> Result<Self, CatalogError> {
        Ok(Self::load(&RawCatalog::from_json(text)?, max_tier_unlocked))
    }

    /// Normalizes a raw document into a [`Catalog`]. Running this twice on the same
    /// input yields identical structures (ingestion is a pure function of the input).
    pub fn load(raw: &RawCatalog, max_tier_unlocked: u8) -> Self {
        let mut items: BTreeMap<String, Item> = raw
            .items
            .iter()
            .map(|item| {
                let allows_quality = item.kind != "fluid";
                let qualities = Self::qualities_for(allows_quality, max_tier_unlocked);
                (
                    item.key.clone(),
                    Item {
                        key: item.key.clone(),
                        allows_quality,
                        qualities,
                    },
                )
            })
            .collect();

        let mut machines: BTreeMap<String, Machine> = raw
            .crafting_machines
            .iter()
            .map(|machine| {
                (
                    machine.key.clone(),
                    Machine {
                        key: machine.key.clone(),
                        crafting_speed: machine.crafting_speed,
                        module_slots: machine.module_slots,
                        crafting_categories: machine.crafting_categories.iter().cloned().collect(),
                        prod_bonus: machine.prod_bonus,
                    },
                )
            })
            .collect();

        for drill in &raw.mining_drills {
            machines.insert(
                drill.key.clone(),
                Machine {
                    key: drill.key.clone(),
                    crafting_speed: drill.mining_speed,
                    module_slots: drill.module_slots,
                    crafting_categories: drill.resource_categories.iter().cloned().collect(),
                    prod_bonus: 0.0,
                },
            );
        }

        let mut raw_recipes: Vec<RawRecipe> = Vec::with_capacity(raw.recipes.len() + raw.resources.len());
        for resource in &raw.resources {
            let resource_item = resource_item_key(&resource.key);
            items.insert(
                resource_item.clone(),
                Item {
                    key: resource_item.clone(),
                    allows_quality: false,
                    qualities: vec![0],
                },
            );

            let mut ingredients = vec![RawIngredient {
                name: resource_item,
                amount: 1.0,
            }];
            if let Some(fluid) = &resource.required_fluid {
                ingredients.push(RawIngredient {
                    name: fluid.clone(),
                    amount: resource.fluid_amount,
                });
            }

            raw_recipes.push(RawRecipe {
                key: resource_recipe_key(&resource.key),
                category: resource
                    .category
                    .clone()
                    .unwrap_or_else(|| DEFAULT_RESOURCE_CATEGORY.to_owned()),
                allow_productivity: false,
                energy_required: resource.mining_time,
                ingredients,
                results: resource.results.clone(),
            });
        }
        raw_recipes.extend(raw.recipes.iter().map(|recipe| RawRecipe {
            key: recipe.key.clone(),
            category: recipe.category.clone(),
            allow_productivity: recipe.allow_productivity,
            energy_required: recipe.energy_required,
            ingredients: recipe
                .ingredients
                .iter()
                .map(|ingredient| RawIngredient {
                    name: ingredient.name.clone(),
                    amount: ingredient.amount,
                })
                .collect(),
            results: recipe.results.clone(),
        }));

        let mut recipes = BTreeMap::new();
        for recipe in raw_recipes {
            let missing = recipe
                .ingredients
                .iter()
                .map(|ingredient| ingredient.name.as_str())
                .chain(recipe.results.iter().map(|result| result.name.as_str()))
                .find(|key| !items.contains_key(*key));

            if let Some(missing_key) = missing {
                warn!(
                    "ignoring recipe `{}`: `{missing_key}` not found in items list",
                    recipe.key
                );
                continue;
            }

            let allows_quality = recipe
                .ingredients
                .iter()
                .any(|ingredient| items[&ingredient.name].allows_quality);
            let qualities = Self::qualities_for(allows_quality, max_tier_unlocked);

            recipes.insert(
                recipe.key.clone(),
                Recipe {
                    key: recipe.key,
                    category: recipe.category,
                    allow_productivity: recipe.allow_productivity,
                    energy_required: recipe.energy_required,
                    ingredients: recipe
                        .ingredients
                        .into_iter()
                        .map(|ingredient| Ingredient {
                            item: ingredient.name,
                            amount: ingredient.amount,
                        })
                        .collect(),
                    results: recipe.results,
                    allows_quality,
                    qualities,
                },
            );
        }

        Catalog {
            items,
            recipes,
            machines,
        }
    }

    fn qualities_for(allows_quality: bool, max_tier_unlocked: u8) -> Vec<u8> {
        if allows_quality {
            (0..=max_tier_unlocked).collect()
        } else {
            vec![0]
        }
    }
}
