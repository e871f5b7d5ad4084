//! The solve driver: formulation, engine invocation, result extraction.

use super::formulation::RouteFormulation;
use super::problem::{RouteConfig, RouteProblem};
use super::reconstruct::{reconstruct_path, ReconstructionInconsistency};
use super::separation::ConnectivityOracle;
use super::solution::{RouteSolution, RouteStatus};
use raceway_core::{RoutingGraph, TerminalSet};
use raceway_solver::{
    BranchAndBound, BranchCutEngine, EngineConfig, EngineError, SolutionValues,
};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Pair activity threshold at extraction. Deliberate slack over the naive
/// 0.5 to absorb engine rounding.
const PAIR_TOL: f64 = 0.7;
/// Bend indicator threshold when totalling bends.
const BEND_TOL: f64 = 0.5;

/// Per-circuit routing failures.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The instance is malformed (fewer than 2 terminals, empty graph, bad
    /// terminal indices).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The engine proved that no spanning structure exists, e.g. a terminal
    /// sits in a component disconnected from the rest.
    #[error("routing is infeasible: {0}")]
    Infeasible(String),

    /// The incumbent's flow values do not trace simple paths. A defect
    /// signal, kept distinct from infeasibility.
    #[error(transparent)]
    Reconstruction(#[from] ReconstructionInconsistency),

    /// Engine failure other than proven infeasibility.
    #[error("engine failure: {0}")]
    Engine(EngineError),
}

/// Solve one circuit against the given engine.
///
/// Blocks for up to the configured time limit and returns the best incumbent
/// found, not necessarily optimal (bounded by the gap tolerance). A budget
/// exhausted without any incumbent yields an empty best-effort result, not
/// an error: the caller decides between retrying with a relaxed budget and
/// reporting the circuit unroutable.
pub fn solve_routes(
    graph: &RoutingGraph,
    terminals: &TerminalSet,
    config: &RouteConfig,
    engine_config: &EngineConfig,
    engine: &dyn BranchCutEngine,
) -> Result<RouteSolution, RouteError> {
    let start = Instant::now();
    let problem = RouteProblem::new(graph, terminals, config.clone())?;
    let formulation = RouteFormulation::build(&problem)?;
    info!(
        engine = engine.id(),
        terminals = terminals.len(),
        pairs = formulation.pair_count(),
        variables = formulation.system.num_variables(),
        constraints = formulation.system.num_constraints(),
        "circuit formulation built"
    );

    let oracle = ConnectivityOracle::new(&formulation);
    let outcome = engine.solve(&formulation.system, &oracle, engine_config);
    let wall_clock_seconds = start.elapsed().as_secs_f64();

    let engine_solution = match outcome {
        Ok(solution) => solution,
        Err(EngineError::Infeasible) => {
            return Err(RouteError::Infeasible(
                "no spanning structure over the terminals exists".into(),
            ));
        }
        Err(EngineError::TimeLimit { seconds }) => {
            // Unproven impossibility: logged distinctly from infeasible.
            warn!(
                time_limit_seconds = seconds,
                "budget exhausted without an incumbent; circuit left unrouted"
            );
            return Ok(RouteSolution::no_incumbent(wall_clock_seconds));
        }
        Err(other) => return Err(RouteError::Engine(other)),
    };

    let values = SolutionValues::new(&engine_solution.values);
    let mut paths = Vec::new();
    let mut total_cost = 0.0;
    let mut total_bend_count = 0usize;
    for p in 0..formulation.pair_count() {
        if values.value(formulation.y_var(p)) <= PAIR_TOL {
            continue;
        }
        let path = reconstruct_path(graph, &formulation, p, &values)?;
        let mut pair_cost = 0.0;
        let mut pair_bends = 0usize;
        for a in 0..formulation.arc_count() {
            if values.value(formulation.x_var(a, p)) > PAIR_TOL {
                pair_cost += formulation.arc(a).weight;
            }
            if values.value(formulation.beta_var(a, p)) > BEND_TOL {
                pair_bends += 1;
            }
        }
        let (s, t) = formulation.pair(p);
        debug!(s, t, cost = pair_cost, bends = pair_bends, "pair routed");
        paths.push(path);
        total_cost += pair_cost;
        total_bend_count += pair_bends;
    }

    let status = if engine_solution.proven_optimal {
        RouteStatus::Optimal
    } else {
        RouteStatus::FeasibleTimeLimit
    };
    info!(
        objective = engine_solution.objective,
        total_cost,
        total_bend_count,
        paths = paths.len(),
        wall_clock_seconds,
        "circuit routed"
    );
    Ok(RouteSolution {
        status,
        paths,
        total_cost: Some(total_cost),
        total_bend_count: Some(total_bend_count),
        objective: Some(engine_solution.objective),
        gap: Some(engine_solution.gap),
        wall_clock_seconds,
        nodes_explored: engine_solution.nodes_explored,
        cuts_added: engine_solution.cuts_added,
    })
}

/// Solve with default configuration and the always-available fallback
/// engine.
pub fn solve_routes_default(
    graph: &RoutingGraph,
    terminals: &TerminalSet,
) -> Result<RouteSolution, RouteError> {
    solve_routes(
        graph,
        terminals,
        &RouteConfig::default(),
        &EngineConfig::default(),
        &BranchAndBound::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use raceway_core::Point;

    #[test]
    fn test_invalid_input_short_circuits() {
        let mut g = RoutingGraph::new();
        g.add_vertex(Point::new(0.0, 0.0, 0.0));
        g.add_vertex(Point::new(1.0, 0.0, 0.0));
        g.add_edge(0, 1, 1.0).unwrap();
        let t = TerminalSet::new(vec![0]);
        let err = solve_routes_default(&g, &t).unwrap_err();
        assert!(matches!(err, RouteError::InvalidInput(_)));
    }

    #[test]
    fn test_two_terminal_edge() {
        let mut g = RoutingGraph::new();
        g.add_vertex(Point::new(0.0, 0.0, 0.0));
        g.add_vertex(Point::new(1.0, 0.0, 0.0));
        g.add_edge(0, 1, 2.0).unwrap();
        let t = TerminalSet::new(vec![0, 1]);
        let solution = solve_routes_default(&g, &t).unwrap();
        assert_eq!(solution.status, RouteStatus::Optimal);
        assert_eq!(solution.paths, vec![vec![0, 1]]);
        assert_eq!(solution.total_bend_count, Some(0));
        assert!((solution.total_cost.unwrap() - 2.0).abs() < 1e-6);
    }
}
