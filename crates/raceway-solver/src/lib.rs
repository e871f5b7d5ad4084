//! Engine-agnostic MILP plumbing for raceway.
//!
//! This crate defines the formulation representation handed to whichever
//! branch-and-cut engine performs the search, and the two seams between the
//! routing core and that engine:
//!
//! - [`ConstraintSystem`] - variables, bounds, objective, and static linear
//!   constraints, with no reference to any concrete solver API
//! - [`SeparationOracle`] - the lazy-constraint callback: inspects an
//!   integer-feasible candidate and returns violated inequalities
//! - [`BranchCutEngine`] - the search engine capability; commercial engines
//!   integrate by implementing this trait as a thin adapter
//!
//! # Architecture
//!
//! ```text
//! raceway-algo ──builds──> ConstraintSystem ──┐
//!              ──supplies─> SeparationOracle ──┤──> BranchCutEngine::solve
//!                                              │        (adapter per engine)
//!              <─extracts── EngineSolution <───┘
//! ```
//!
//! The split is strategy/adapter, not inheritance: the algorithms crate
//! never names a concrete engine type.
//!
//! # Fallback engine
//!
//! [`BranchAndBound`] is a pure-Rust engine that is always available: an
//! LP-relaxation branch-and-bound over `good_lp`'s `microlp` backend with
//! lazy-cut support. It is deterministic and single-threaded; native engines
//! bring their own parallel search.

pub mod bnb;
pub mod engine;
pub mod oracle;
pub mod system;

pub use bnb::BranchAndBound;
pub use engine::{BranchCutEngine, EngineConfig, EngineError, EngineSolution};
pub use oracle::{SeparationOracle, SolutionValues};
pub use system::{ConstraintSystem, LinearConstraint, Sense, VarId};
