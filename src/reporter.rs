//! Reporter (§4.7): a human-readable stdout dump and an optional CSV export with a
//! fixed column order, built off the same [`Activity`] `Display` impl so the two
//! outputs can't drift apart.

use std::fmt::Write as _;

use crate::activity::Activity;
use crate::quality::tier_name;

/// Positive-valued activities, supplies, and sinks are the only ones worth reporting;
/// anything at or below this is LP solver noise, per §4.6.
pub const EPSILON: f64 = 1e-9;

#[derive(Clone, Debug)]
pub struct SolveReport {
    pub objective_value: f64,
    pub supplies: Vec<(String, u8, f64)>,
    pub sinks: Vec<(String, u8, f64)>,
    pub activities: Vec<(Activity, f64)>,
    pub total_buildings: f64,
    pub total_modules: f64,
    pub allow_byproducts: bool,
}

impl SolveReport {
    /// Renders the human-readable dump `linear_solver.py`'s CLI prints to stdout.
    pub fn render(&self) -> String {
        let mut out = String::new();

        writeln!(out, "Objective value = {}", self.objective_value).unwrap();
        writeln!(out).unwrap();

        writeln!(out, "Inputs used:").unwrap();
        for (item, tier, value) in &self.supplies {
            writeln!(out, "{}__{item}: {value}", tier_name(*tier)).unwrap();
        }
        writeln!(out).unwrap();

        if self.allow_byproducts {
            writeln!(out, "Byproducts:").unwrap();
            for (item, tier, value) in &self.sinks {
                writeln!(out, "{}__{item}: {value}", tier_name(*tier)).unwrap();
            }
            writeln!(out).unwrap();
        }

        writeln!(out, "Buildings used: {}", self.total_buildings).unwrap();
        writeln!(out).unwrap();
        writeln!(out, "Modules used: {}", self.total_modules).unwrap();
        writeln!(out).unwrap();

        writeln!(out, "Recipes used:").unwrap();
        for (activity, value) in &self.activities {
            writeln!(out, "{activity}: {value}").unwrap();
        }

        out
    }

    /// Tabular export: fixed column order
    /// `(recipe_name, recipe_quality, machine, num_qual_modules, num_prod_modules, num_buildings)`.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(
            "recipe_name,recipe_quality,machine,num_qual_modules,num_prod_modules,num_buildings\n",
        );
        for (activity, value) in &self.activities {
            writeln!(
                out,
                "{},{},{},{},{},{value}",
                activity.recipe_key,
                tier_name(activity.tier),
                activity.machine_key,
                activity.n_qual,
                activity.n_prod,
            )
            .unwrap();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SolveReport {
        SolveReport {
            objective_value: 899.0,
            supplies: vec![("iron-plate".to_owned(), 0, 899.0)],
            sinks: vec![],
            activities: vec![(
                Activity {
                    recipe_key: "iron-gear-wheel".to_owned(),
                    tier: 0,
                    machine_key: "assembler".to_owned(),
                    n_qual: 4,
                    n_prod: 0,
                    n_beacon: 0,
                },
                12.5,
            )],
            total_buildings: 12.5,
            total_modules: 50.0,
            allow_byproducts: false,
        }
    }

    #[test]
    fn render_includes_objective_and_activity_lines() {
        let rendered = sample_report().render();
        assert!(rendered.contains("Objective value = 899"));
        assert!(rendered.contains("normal__iron-plate: 899"));
        assert!(rendered.contains("normal__iron-gear-wheel__assembler__4-qual__0-prod__0-beaconed-speed: 12.5"));
        assert!(!rendered.contains("Byproducts"));
    }

    #[test]
    fn csv_has_fixed_column_order_and_one_row_per_activity() {
        let csv = sample_report().to_csv();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "recipe_name,recipe_quality,machine,num_qual_modules,num_prod_modules,num_buildings"
        );
        assert_eq!(lines.next().unwrap(), "iron-gear-wheel,normal,assembler,4,0,12.5");
        assert!(lines.next().is_none());
    }

    #[test]
    fn byproducts_section_only_appears_when_enabled() {
        let mut report = sample_report();
        report.allow_byproducts = true;
        report.sinks.push(("slag".to_owned(), 0, 3.0));
        let rendered = report.render();
        assert!(rendered.contains("Byproducts:"));
        assert!(rendered.contains("normal__slag: 3"));
    }
}
