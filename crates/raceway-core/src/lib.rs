//! # raceway-core: Wiring-Route Modeling Core
//!
//! Provides the fundamental data structures for in-building electrical
//! routing: 3-D geometry, the candidate-routing graph, and terminal sets.
//!
//! ## Design Philosophy
//!
//! The candidate-routing graph is an **undirected weighted graph** whose
//! vertices carry 3-D coordinates (admissible wire-segment endpoints along
//! walls and ceilings) and whose edge weights are segment costs. The graph is
//! read-only input to every routing algorithm: the solvers never mutate it.
//!
//! Direction changes ("bends") are detected geometrically, so the graph
//! carries the tolerances of its weak-parallel predicate alongside the
//! topology.
//!
//! ## Quick Start
//!
//! ```rust
//! use raceway_core::{Point, RoutingGraph, TerminalSet};
//!
//! let mut graph = RoutingGraph::new();
//! let a = graph.add_vertex(Point::new(0.0, 0.0, 0.0));
//! let b = graph.add_vertex(Point::new(1.0, 0.0, 0.0));
//! let c = graph.add_vertex(Point::new(1.0, 1.0, 0.0));
//! graph.add_edge(a, b, 1.0).unwrap();
//! graph.add_edge(b, c, 1.0).unwrap();
//!
//! let terminals = TerminalSet::with_source(a, vec![c]);
//! assert_eq!(terminals.len(), 2);
//! ```
//!
//! ## Core Data Structures
//!
//! - [`Point`] - 3-D coordinate/vector with the parallelism predicates the
//!   bend model needs
//! - [`RoutingGraph`] - the candidate-routing graph (petgraph `UnGraph`)
//! - [`TerminalSet`] - the must-connect vertices, one optionally marked as
//!   the power source
//! - [`CoreError`] - unified error type for API boundaries

pub mod error;
pub mod graph;
pub mod point;
pub mod terminals;

pub use error::{CoreError, CoreResult, GraphError};
pub use graph::{GeometryTolerances, RoutingGraph};
pub use point::Point;
pub use terminals::TerminalSet;
