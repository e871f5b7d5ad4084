//! The decomposition router.

use super::cost::CostBend;
use super::shortest_path::MinBendShortestPath;
use super::spanning::prim_spanning_tree;
use raceway_core::{RoutingGraph, TerminalSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DecompositionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("vertex {vertex} is unreachable from the source")]
    Unreachable { vertex: usize },
}

/// Routes plus the combined (cost, bends) objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicRoute {
    pub paths: Vec<Vec<usize>>,
    pub cost: f64,
    pub bends: i32,
}

/// Decomposes the routing task into shortest-path subproblems: a home-run
/// from the source to its nearest terminal, plus a spanning tree of the
/// devices over their pairwise minimum-bend shortest-path metric.
pub struct DecompositionRouter<'g> {
    graph: &'g RoutingGraph,
}

impl<'g> DecompositionRouter<'g> {
    pub fn new(graph: &'g RoutingGraph) -> Self {
        Self { graph }
    }

    /// Route all terminals. With `use_spanning_tree` false, every device is
    /// instead connected to the source directly (a star of home-runs).
    pub fn route(
        &self,
        terminals: &TerminalSet,
        use_spanning_tree: bool,
    ) -> Result<HeuristicRoute, DecompositionError> {
        let source = terminals.source().ok_or_else(|| {
            DecompositionError::InvalidInput("a source terminal is required".into())
        })?;
        let devices: Vec<usize> = terminals.devices().collect();
        if devices.is_empty() {
            return Err(DecompositionError::InvalidInput(
                "at least one device terminal is required".into(),
            ));
        }
        if terminals.iter().any(|t| t >= self.graph.vertex_count()) {
            return Err(DecompositionError::InvalidInput(
                "terminal index out of range".into(),
            ));
        }

        let mut mbsp = MinBendShortestPath::new(self.graph);
        mbsp.solve(source);
        let from_source: Vec<CostBend> = devices.iter().map(|&d| mbsp.distance(d)).collect();
        for (i, d) in from_source.iter().enumerate() {
            if !d.is_finite() {
                return Err(DecompositionError::Unreachable {
                    vertex: devices[i],
                });
            }
        }

        let mut paths = Vec::new();
        let mut objective;

        if use_spanning_tree {
            // Pairwise device metric, one label solve per device.
            let mut metric = Vec::with_capacity(devices.len());
            for &d in &devices {
                mbsp.solve(d);
                metric.push(
                    devices
                        .iter()
                        .map(|&other| mbsp.distance(other))
                        .collect::<Vec<CostBend>>(),
                );
            }

            let mut nearest = 0;
            for i in 1..devices.len() {
                if from_source[i] < from_source[nearest] {
                    nearest = i;
                }
            }

            mbsp.solve(source);
            paths.push(self.path_or_err(&mbsp, devices[nearest])?);
            objective = from_source[nearest];
            debug!(
                source,
                home_run = devices[nearest],
                cost = objective.cost,
                "home-run selected"
            );

            for (i, j) in prim_spanning_tree(&metric) {
                mbsp.solve(devices[i]);
                paths.push(self.path_or_err(&mbsp, devices[j])?);
                objective += metric[i][j];
            }
        } else {
            objective = CostBend::with_tol(0.0, 0, self.graph.tolerances().abs_err);
            for (i, &d) in devices.iter().enumerate() {
                paths.push(self.path_or_err(&mbsp, d)?);
                objective += from_source[i];
            }
        }

        info!(
            terminals = terminals.len(),
            paths = paths.len(),
            cost = objective.cost,
            bends = objective.bends,
            "decomposition routing finished"
        );
        Ok(HeuristicRoute {
            paths,
            cost: objective.cost,
            bends: objective.bends,
        })
    }

    fn path_or_err(
        &self,
        mbsp: &MinBendShortestPath,
        target: usize,
    ) -> Result<Vec<usize>, DecompositionError> {
        mbsp.path_to(target)
            .ok_or(DecompositionError::Unreachable { vertex: target })
    }
}
