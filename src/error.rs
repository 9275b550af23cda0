//! Error kinds per the error-handling design: setup-time validation errors abort
//! immediately, catalog data-quality issues are logged and the offending recipe is
//! dropped, and solver non-optimal statuses are reported once with no automatic
//! relaxation.

use thiserror::Error;

/// Setup-time configuration mistakes. These always abort before a solver is invoked.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{allowed}` and `{disallowed}` may not both be set; pick a whitelist or a blacklist")]
    MutuallyExclusive {
        allowed: &'static str,
        disallowed: &'static str,
    },

    #[error("unknown quality tier name `{0}`; expected one of {1:?}")]
    UnknownTier(String, &'static [&'static str]),

    #[error("module tier {0} is out of range; expected 1, 2, or 3")]
    InvalidModuleTier(u8),

    #[error(
        "ambiguous dominant machine for recipe `{recipe}`: {candidates:?} are all equally \
         dominant on module slots, productivity bonus, and crafting speed"
    )]
    AmbiguousDominantMachine {
        recipe: String,
        candidates: Vec<String>,
    },
}

/// Failure to parse or otherwise make sense of the catalog JSON document itself.
///
/// Individual malformed recipes are not represented here; those are logged and
/// dropped during ingestion rather than treated as fatal.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The linear program did not resolve to a usable solution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    #[error("infeasible: demand cannot be met from the declared supplies and allowed recipes")]
    Infeasible,

    #[error("unbounded: check for missing byproduct sinks or negative-cost cycles")]
    Unbounded,

    #[error("solver reported a numerical failure: {0}")]
    NumericalFailure(String),
}

/// Top-level error type returned by the builder/solver driver.
#[derive(Debug, Error)]
pub enum QrlpError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}
