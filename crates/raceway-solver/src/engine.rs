//! The branch-and-cut engine seam.

use crate::oracle::SeparationOracle;
use crate::system::ConstraintSystem;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Search budget and tolerances handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Wall-clock budget in seconds.
    pub time_limit_seconds: f64,
    /// Relative optimality gap at which the search may stop.
    pub relative_gap: f64,
    /// Engine-internal thread count; `None` leaves the engine default.
    pub threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: 600.0,
            relative_gap: 1e-6,
            threads: None,
        }
    }
}

/// Outcome of a successful search: an incumbent is always present.
#[derive(Debug, Clone)]
pub struct EngineSolution {
    /// Value of every variable in the incumbent, indexed by `VarId`.
    pub values: Vec<f64>,
    /// Objective value of the incumbent.
    pub objective: f64,
    /// Best proven lower bound on the optimum.
    pub best_bound: f64,
    /// Relative gap between incumbent and bound.
    pub gap: f64,
    /// Whether optimality was proven within the gap tolerance.
    pub proven_optimal: bool,
    /// Search nodes processed.
    pub nodes_explored: u64,
    /// Lazy cuts accumulated from the separation oracle.
    pub cuts_added: usize,
}

/// Terminal search failures. Budget exhaustion WITH an incumbent is not an
/// error; it surfaces as an [`EngineSolution`] with `proven_optimal = false`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine proved that no feasible solution exists.
    #[error("problem is infeasible")]
    Infeasible,

    #[error("problem is unbounded")]
    Unbounded,

    /// The budget ran out before any incumbent was found. Unproven
    /// impossibility: distinct from [`EngineError::Infeasible`].
    #[error("time limit of {seconds}s reached without an incumbent")]
    TimeLimit { seconds: f64 },

    /// The relaxation backend failed numerically.
    #[error("linear relaxation failed: {0}")]
    Relaxation(String),
}

/// A branch-and-cut search engine.
///
/// One `solve` call is one synchronous circuit solve; the engine may
/// parallelize internally per `EngineConfig::threads`. The oracle must be
/// consulted on every integer-feasible candidate before it is accepted as an
/// incumbent, and every returned inequality must be enforced for the rest of
/// the search.
pub trait BranchCutEngine: Send + Sync {
    /// Stable identifier, e.g. `"bnb"`.
    fn id(&self) -> &str;

    fn solve(
        &self,
        system: &ConstraintSystem,
        oracle: &dyn SeparationOracle,
        config: &EngineConfig,
    ) -> Result<EngineSolution, EngineError>;
}
