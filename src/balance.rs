//! Mass-Balance Assembler (§4.4): maintains one row per (item, tier) node and
//! accumulates signed contributions from activities, supplies, demands, and
//! byproduct sinks. Emits one `Σ terms = 0` equality constraint per touched node;
//! nodes with no terms are omitted entirely.

use std::collections::BTreeMap;

use good_lp::{constraint, Constraint, Expression, Variable};

#[derive(Default)]
pub struct MassBalance {
    nodes: BTreeMap<(String, u8), Vec<Expression>>,
}

impl MassBalance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `coefficient * var` term to the (item, tier) node, creating the row
    /// if this is its first appearance.
    pub fn add_term(&mut self, item: &str, tier: u8, coefficient: f64, var: Variable) {
        self.nodes
            .entry((item.to_owned(), tier))
            .or_default()
            .push(coefficient * var);
    }

    /// A supply variable contributes with coefficient `+1`.
    pub fn declare_supply(&mut self, item: &str, tier: u8, var: Variable) {
        self.add_term(item, tier, 1.0, var);
    }

    /// A byproduct sink variable contributes with coefficient `-1`.
    pub fn declare_sink(&mut self, item: &str, tier: u8, var: Variable) {
        self.add_term(item, tier, -1.0, var);
    }

    /// A demand is a negative constant added to the node, not a variable.
    pub fn declare_demand(&mut self, item: &str, tier: u8, amount: f64) {
        self.nodes
            .entry((item.to_owned(), tier))
            .or_default()
            .push(Expression::from_other_affine(-amount));
    }

    /// The (item, tier) keys that currently have at least one term — used to decide
    /// byproduct-sink eligibility without creating sinks for nodes nothing ever touches.
    pub fn touched_nodes(&self) -> impl Iterator<Item = &(String, u8)> {
        self.nodes.keys()
    }

    /// Consumes the assembler, returning one `Σ terms = 0` constraint per touched node.
    pub fn into_constraints(self) -> Vec<Constraint> {
        self.nodes
            .into_values()
            .map(|terms| {
                let expr: Expression = terms.into_iter().sum();
                constraint!(expr == 0.0)
            })
            .collect()
    }
}
