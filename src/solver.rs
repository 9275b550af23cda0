//! Solver Driver (§4.6): wraps the `good_lp` backend. Builds the problem from a
//! variable set, objective, and constraint list; solves; and translates the backend's
//! status into the crate's own [`SolveError`].
//!
//! The LP is always continuous — activity values are fractional, interpreted as the
//! average number of buildings running.

use good_lp::{Constraint, Expression, ProblemVariables, ResolutionError, Solution, SolverModel};

use crate::error::SolveError;

/// Builds and solves the problem, returning the backend's solution on success.
pub fn solve(
    vars: ProblemVariables,
    objective: Expression,
    constraints: Vec<Constraint>,
) -> Result<impl Solution, SolveError> {
    let mut problem = vars.minimise(objective).using(good_lp::default_solver);
    for constraint in constraints {
        problem.add_constraint(constraint);
    }

    problem.solve().map_err(|err| match err {
        ResolutionError::Infeasible => SolveError::Infeasible,
        ResolutionError::Unbounded => SolveError::Unbounded,
        other => SolveError::NumericalFailure(other.to_string()),
    })
}
