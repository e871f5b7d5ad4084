//! Solver-free decomposition routing.
//!
//! A fast alternative to the exact MILP core: route the home-run from the
//! power source to its nearest terminal, then span the remaining devices
//! with a tree over their pairwise minimum-bend shortest-path distances,
//! realizing every tree edge by its path. Costs and bends are compared
//! lexicographically, so among equally cheap routes the straighter one wins.
//!
//! No optimality guarantee; useful for warm starts, sanity checks against
//! the exact core, and instances too large for a MILP budget.

mod cost;
mod router;
mod shortest_path;
mod spanning;

pub use cost::CostBend;
pub use router::{DecompositionError, DecompositionRouter, HeuristicRoute};
pub use shortest_path::MinBendShortestPath;
pub use spanning::prim_spanning_tree;
