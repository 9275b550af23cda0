//! The QRLP builder: the single entry point that wires Catalog → Activity Enumerator →
//! Mass-Balance Assembler → Objective Builder → Solver Driver → Reporter together.

use std::collections::BTreeSet;

use good_lp::{variable, ProblemVariables, Solution, Variable};
use log::info;

use crate::activity::Activity;
use crate::balance::MassBalance;
use crate::catalog::{resource_item_key, Catalog};
use crate::config::Config;
use crate::enumerator::{self, EnumeratedActivity};
use crate::error::QrlpError;
use crate::objective;
use crate::quality::{tier_from_name, tier_name};
use crate::reporter::{SolveReport, EPSILON};
use crate::solver;

/// Builds the LP from `catalog`/`config` and solves it, returning a finished report.
pub fn build_and_solve(catalog: &Catalog, config: &Config) -> Result<SolveReport, QrlpError> {
    config.validate()?;
    let max_tier = config.max_tier_unlocked()?;
    let module_stats = config.module_stats()?;

    let enumerated = enumerator::enumerate(catalog, config, &module_stats, max_tier)?;
    info!("enumerated {} activities", enumerated.len());

    let mut vars = ProblemVariables::new();
    let mut balance = MassBalance::new();

    let mut activity_vars: Vec<(Activity, Variable)> = Vec::with_capacity(enumerated.len());
    for EnumeratedActivity { activity, terms } in enumerated {
        let var = vars.add(variable().min(0.0).name(activity.to_string()));
        for term in &terms {
            balance.add_term(&term.item, term.tier, term.amount_per_second, var);
        }
        activity_vars.push((activity, var));
    }

    let mut supply_vars: Vec<(String, u8, Variable, f64)> = Vec::with_capacity(config.inputs.len());
    for input in &config.inputs {
        let tier = tier_from_name(&input.quality)?;
        let item = if input.resource {
            resource_item_key(&input.key)
        } else {
            input.key.clone()
        };
        let var = vars.add(
            variable()
                .min(0.0)
                .name(format!("input__{}__{item}", tier_name(tier))),
        );
        balance.declare_supply(&item, tier, var);
        supply_vars.push((item, tier, var, input.cost));
    }

    let mut output_keys: BTreeSet<(String, u8)> = BTreeSet::new();
    for output in &config.outputs {
        let tier = tier_from_name(&output.quality)?;
        balance.declare_demand(&output.key, tier, output.amount);
        output_keys.insert((output.key.clone(), tier));
    }

    let mut sink_vars: Vec<(String, u8, Variable)> = Vec::new();
    if config.allow_byproducts {
        let supply_keys: BTreeSet<(String, u8)> = supply_vars
            .iter()
            .map(|(item, tier, ..)| (item.clone(), *tier))
            .collect();

        let touched: Vec<(String, u8)> = balance.touched_nodes().cloned().collect();
        for (item, tier) in touched {
            if supply_keys.contains(&(item.clone(), tier)) || output_keys.contains(&(item.clone(), tier)) {
                continue;
            }
            let var = vars.add(
                variable()
                    .min(0.0)
                    .name(format!("byproduct__{}__{item}", tier_name(tier))),
            );
            balance.declare_sink(&item, tier, var);
            sink_vars.push((item, tier, var));
        }
    }

    let supply_costs: Vec<(Variable, f64)> = supply_vars.iter().map(|(_, _, var, cost)| (*var, *cost)).collect();
    let objective_expr = objective::build(&supply_costs, &activity_vars, config.building_cost, config.module_cost);

    let constraints = balance.into_constraints();
    let solution = solver::solve(vars, objective_expr.clone(), constraints)?;

    let objective_value = solution.eval(objective_expr);

    let supplies = supply_vars
        .into_iter()
        .filter_map(|(item, tier, var, _)| {
            let value = solution.value(var);
            (value > EPSILON).then_some((item, tier, value))
        })
        .collect();

    let sinks = sink_vars
        .into_iter()
        .filter_map(|(item, tier, var)| {
            let value = solution.value(var);
            (value > EPSILON).then_some((item, tier, value))
        })
        .collect();

    let mut total_buildings = 0.0;
    let mut total_modules = 0.0;
    let mut activities = Vec::new();
    for (activity, var) in activity_vars {
        let value = solution.value(var);
        if value > EPSILON {
            total_buildings += value;
            total_modules += f64::from(activity.module_count()) * value;
            activities.push((activity, value));
        }
    }

    Ok(SolveReport {
        objective_value,
        supplies,
        sinks,
        activities,
        total_buildings,
        total_modules,
        allow_byproducts: config.allow_byproducts,
    })
}
