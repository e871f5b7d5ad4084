//! Routing problem data: inputs plus per-circuit configuration.

use super::solver::RouteError;
use raceway_core::{RoutingGraph, TerminalSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-circuit tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Objective weight of one bend relative to one unit of wire length.
    pub bend_weight: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self { bend_weight: 1.0 }
    }
}

/// A validated circuit-routing instance.
///
/// The graph and terminal set are borrowed read-only; every solve builds its
/// own fresh formulation from them.
#[derive(Debug, Clone)]
pub struct RouteProblem<'g> {
    pub graph: &'g RoutingGraph,
    pub terminals: &'g TerminalSet,
    pub config: RouteConfig,
}

impl<'g> RouteProblem<'g> {
    pub fn new(
        graph: &'g RoutingGraph,
        terminals: &'g TerminalSet,
        config: RouteConfig,
    ) -> Result<Self, RouteError> {
        if graph.vertex_count() == 0 {
            return Err(RouteError::InvalidInput("graph has no vertices".into()));
        }
        if graph.edge_count() == 0 {
            return Err(RouteError::InvalidInput("graph has no edges".into()));
        }
        if terminals.len() < 2 {
            return Err(RouteError::InvalidInput(format!(
                "need at least 2 terminals, got {}",
                terminals.len()
            )));
        }
        let mut seen = HashSet::new();
        for t in terminals.iter() {
            if t >= graph.vertex_count() {
                return Err(RouteError::InvalidInput(format!(
                    "terminal {} out of range (graph has {} vertices)",
                    t,
                    graph.vertex_count()
                )));
            }
            if !seen.insert(t) {
                return Err(RouteError::InvalidInput(format!("duplicate terminal {t}")));
            }
        }
        Ok(Self {
            graph,
            terminals,
            config,
        })
    }
}
