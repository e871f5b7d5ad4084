//! Exact wiring routing as a mixed-integer linear program.
//!
//! ## Problem Overview
//!
//! Given the candidate-routing graph and a set of terminals (one power
//! source plus devices), pick a minimum-cost spanning structure over the
//! terminals in which every chosen terminal pair is realized by one simple
//! path, and direction changes along those paths are penalized.
//!
//! ```text
//! minimize    Σ_{arc,pair} w_arc · x[arc,pair]  +  λ · Σ_{arc,pair} β[arc,pair]
//!             └──────────────────────────────┘     └────────────────────────┘
//!                     wire length cost                    bend penalty
//!
//! subject to:
//!   net outflow of pair (s,t) at v = +y[s,t] (v=s), −y[s,t] (v=t), 0 else
//!                                                 per-pair flow conservation
//!   β[i,j,p] ≥ x[i,j,p] + Σ_{(j,k) non-collinear} x[j,k,p] − 1
//!                                                 bend linkage
//!   Σ_{t≠s} y[s,t] ≥ 1  for every terminal s      terminal coverage
//!   Σ y[s,t] = |T| − 1                            spanning-tree edge count
//!   x, y, β ∈ {0,1}
//! ```
//!
//! Each unordered terminal pair is one commodity; its flow variables trace
//! the pair's path arc by arc, and the mirrored β variables flag every
//! vertex where the path continues through a non-collinear arc.
//!
//! ## Lazy connectivity
//!
//! The static constraints admit spanning structures that split into
//! disconnected clusters (each cluster locally tree-like). Rather than
//! enumerate the exponential family of cutset inequalities upfront, a
//! [`ConnectivityOracle`] inspects every integer-feasible candidate the
//! engine finds and emits the one bipartition inequality that candidate
//! violates. Each bipartition, once cut, stays forbidden, so finitely many
//! rejections remain.
//!
//! ## References
//!
//! - **Koch & Martin (1998)**: "Solving Steiner tree problems in graphs to
//!   optimality" - cutset separation for Steiner structures
//! - **Magnanti & Wolsey (1995)**: "Optimal Trees" - multi-commodity flow
//!   formulations of spanning structures

mod formulation;
mod problem;
mod reconstruct;
mod separation;
mod solution;
mod solver;

pub use formulation::{Arc, RouteFormulation};
pub use problem::{RouteConfig, RouteProblem};
pub use reconstruct::{reconstruct_path, ReconstructionInconsistency};
pub use separation::ConnectivityOracle;
pub use solution::{RouteSolution, RouteStatus};
pub use solver::{solve_routes, solve_routes_default, RouteError};
