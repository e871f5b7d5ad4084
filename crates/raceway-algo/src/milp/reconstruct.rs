//! Turning flow values back into explicit vertex sequences.

use super::formulation::RouteFormulation;
use raceway_core::RoutingGraph;
use raceway_solver::SolutionValues;
use thiserror::Error;

/// Arc activity threshold at extraction: deliberate slack over the oracle's
/// 0.5 to absorb engine rounding.
const ARC_TOL: f64 = 0.7;

/// The flow values of a pair do not trace one simple path.
///
/// Under a correct feasible integer solution this cannot happen; an
/// occurrence indicates a numerical or formulation defect and must surface,
/// never be swallowed into an "infeasible" verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructionInconsistency {
    #[error("no active arc enters vertex {vertex} while walking pair ({s}, {t})")]
    MissingPredecessor { s: usize, t: usize, vertex: usize },

    #[error("walk for pair ({s}, {t}) exceeded {cap} steps without reaching {s}")]
    WalkTooLong { s: usize, t: usize, cap: usize },
}

/// Walk the pair's flow backwards from `t` to `s` and return the vertex
/// sequence `s..t`.
///
/// Iterations are capped at the vertex count; the cap bounds the walk even
/// against cyclic flow values.
pub fn reconstruct_path(
    graph: &RoutingGraph,
    formulation: &RouteFormulation,
    pair: usize,
    values: &SolutionValues,
) -> Result<Vec<usize>, ReconstructionInconsistency> {
    let (s, t) = formulation.pair(pair);
    let cap = graph.vertex_count();
    let mut path = vec![t];
    let mut u = t;
    let mut steps = 0;
    while u != s {
        if steps >= cap {
            return Err(ReconstructionInconsistency::WalkTooLong { s, t, cap });
        }
        steps += 1;
        let mut predecessor = None;
        for (v, _) in graph.neighbors(u) {
            if values.value(formulation.x_var(formulation.arc_id(v, u), pair)) > ARC_TOL {
                predecessor = Some(v);
                break;
            }
        }
        match predecessor {
            Some(v) => {
                path.push(v);
                u = v;
            }
            None => {
                return Err(ReconstructionInconsistency::MissingPredecessor { s, t, vertex: u })
            }
        }
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::super::problem::{RouteConfig, RouteProblem};
    use super::*;
    use raceway_core::{Point, RoutingGraph, TerminalSet};

    fn l_corridor() -> RoutingGraph {
        let mut g = RoutingGraph::new();
        g.add_vertex(Point::new(0.0, 0.0, 0.0));
        g.add_vertex(Point::new(1.0, 0.0, 0.0));
        g.add_vertex(Point::new(1.0, 1.0, 0.0));
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g
    }

    #[test]
    fn test_walks_and_reverses() {
        let g = l_corridor();
        let t = TerminalSet::new(vec![0, 2]);
        let problem = RouteProblem::new(&g, &t, RouteConfig::default()).unwrap();
        let f = RouteFormulation::build(&problem).unwrap();
        let mut values = vec![0.0; f.system.num_variables()];
        values[f.x_var(f.arc_id(0, 1), 0).index()] = 1.0;
        values[f.x_var(f.arc_id(1, 2), 0).index()] = 1.0;
        let path = reconstruct_path(&g, &f, 0, &SolutionValues::new(&values)).unwrap();
        assert_eq!(path, vec![0, 1, 2]);
    }

    #[test]
    fn test_missing_predecessor_surfaces() {
        let g = l_corridor();
        let t = TerminalSet::new(vec![0, 2]);
        let problem = RouteProblem::new(&g, &t, RouteConfig::default()).unwrap();
        let f = RouteFormulation::build(&problem).unwrap();
        let mut values = vec![0.0; f.system.num_variables()];
        values[f.x_var(f.arc_id(1, 2), 0).index()] = 1.0;
        let err = reconstruct_path(&g, &f, 0, &SolutionValues::new(&values)).unwrap_err();
        assert_eq!(
            err,
            ReconstructionInconsistency::MissingPredecessor { s: 0, t: 2, vertex: 1 }
        );
    }

    #[test]
    fn test_cyclic_flow_hits_the_cap() {
        // A square with flow circling 2 <-> 3, never reaching terminal 0.
        let mut g = RoutingGraph::new();
        g.add_vertex(Point::new(0.0, 0.0, 0.0));
        g.add_vertex(Point::new(1.0, 0.0, 0.0));
        g.add_vertex(Point::new(1.0, 1.0, 0.0));
        g.add_vertex(Point::new(0.0, 1.0, 0.0));
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(2, 3, 1.0).unwrap();
        g.add_edge(3, 0, 1.0).unwrap();
        let t = TerminalSet::new(vec![0, 2]);
        let problem = RouteProblem::new(&g, &t, RouteConfig::default()).unwrap();
        let f = RouteFormulation::build(&problem).unwrap();
        let mut values = vec![0.0; f.system.num_variables()];
        values[f.x_var(f.arc_id(3, 2), 0).index()] = 1.0;
        values[f.x_var(f.arc_id(2, 3), 0).index()] = 1.0;
        let err = reconstruct_path(&g, &f, 0, &SolutionValues::new(&values)).unwrap_err();
        assert!(matches!(
            err,
            ReconstructionInconsistency::WalkTooLong { cap: 4, .. }
        ));
    }
}
