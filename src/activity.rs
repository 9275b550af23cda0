//! One LP column: a (recipe, machine, tier, module-assignment, beacon-count) tuple,
//! representing "one building running continuously" at that configuration.

use std::fmt;

use crate::quality::tier_name;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Activity {
    pub recipe_key: String,
    pub tier: u8,
    pub machine_key: String,
    pub n_qual: u32,
    pub n_prod: u32,
    pub n_beacon: u32,
}

impl Activity {
    pub fn module_count(&self) -> u32 {
        self.n_qual + self.n_prod + self.n_beacon
    }
}

impl fmt::Display for Activity {
    /// The activity identifier grammar from §6, used verbatim for both report output
    /// and CSV export so they can't drift apart.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}__{}__{}__{}-qual__{}-prod__{}-beaconed-speed",
            tier_name(self.tier),
            self.recipe_key,
            self.machine_key,
            self.n_qual,
            self.n_prod,
            self.n_beacon,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_activity_identifier_grammar() {
        let activity = Activity {
            recipe_key: "iron-gear-wheel".to_owned(),
            tier: 4,
            machine_key: "assembling-machine-3".to_owned(),
            n_qual: 2,
            n_prod: 2,
            n_beacon: 4,
        };
        assert_eq!(
            activity.to_string(),
            "legendary__iron-gear-wheel__assembling-machine-3__2-qual__2-prod__4-beaconed-speed"
        );
    }

    #[test]
    fn module_count_sums_all_three_kinds() {
        let activity = Activity {
            recipe_key: "x".into(),
            tier: 0,
            machine_key: "m".into(),
            n_qual: 1,
            n_prod: 2,
            n_beacon: 3,
        };
        assert_eq!(activity.module_count(), 6);
    }
}
