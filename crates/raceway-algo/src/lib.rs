//! # raceway-algo: Wiring Route Optimization
//!
//! Routing algorithms for in-building electrical wiring over a candidate
//! graph of admissible wire segments.
//!
//! | Method | Description | Guarantees |
//! |--------|-------------|------------|
//! | [`milp::solve_routes`] | Multi-commodity-flow MILP with lazy connectivity cuts | Optimal within gap tolerance |
//! | [`heuristic::DecompositionRouter`] | Minimum-bend shortest paths + terminal spanning tree | Fast, no engine required |
//!
//! ## The exact core
//!
//! One circuit solve builds a fresh [`raceway_solver::ConstraintSystem`] from
//! the graph and terminal set, registers a connectivity
//! [`raceway_solver::SeparationOracle`], and hands both to a
//! [`raceway_solver::BranchCutEngine`]. Spanning-structure connectivity is
//! enforced lazily: only the bipartitions the search actually visits become
//! constraints.
//!
//! ## Example
//!
//! ```rust
//! use raceway_algo::milp::{solve_routes, RouteConfig};
//! use raceway_core::{Point, RoutingGraph, TerminalSet};
//! use raceway_solver::{BranchAndBound, EngineConfig};
//!
//! let mut graph = RoutingGraph::new();
//! for i in 0..3 {
//!     graph.add_vertex(Point::new(i as f64, 0.0, 0.0));
//! }
//! graph.add_edge(0, 1, 1.0).unwrap();
//! graph.add_edge(1, 2, 1.0).unwrap();
//!
//! let terminals = TerminalSet::new(vec![0, 2]);
//! let solution = solve_routes(
//!     &graph,
//!     &terminals,
//!     &RouteConfig::default(),
//!     &EngineConfig::default(),
//!     &BranchAndBound::new(),
//! )
//! .unwrap();
//! assert_eq!(solution.paths, vec![vec![0, 1, 2]]);
//! ```

pub mod heuristic;
pub mod io;
pub mod milp;

pub use heuristic::{CostBend, DecompositionError, DecompositionRouter, HeuristicRoute, MinBendShortestPath};
pub use io::{load_case, CaseError};
pub use milp::{
    solve_routes, solve_routes_default, ReconstructionInconsistency, RouteConfig, RouteError,
    RouteFormulation, RouteSolution, RouteStatus,
};
