//! Building the constraint system for one circuit solve.

use super::problem::RouteProblem;
use super::solver::RouteError;
use raceway_solver::{ConstraintSystem, LinearConstraint, VarId};
use std::collections::HashMap;

/// A directed arc of the formulation. Every undirected graph edge
/// contributes both orientations with the same weight.
#[derive(Debug, Clone, Copy)]
pub struct Arc {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// The decision variables, objective, and static constraints of one circuit
/// solve, together with the index maps the driver and oracle navigate by.
///
/// Variable families:
/// - `y[s,t]` per unordered terminal pair (s < t): the pair is a direct link
///   of the chosen spanning structure
/// - `x[i,j,s,t]` per (arc, pair): arc (i,j) carries the pair's commodity
/// - `beta[i,j,s,t]` mirroring `x`: the pair's path uses (i,j) and continues
///   through j via a non-collinear arc
pub struct RouteFormulation {
    pub system: ConstraintSystem,
    pairs: Vec<(usize, usize)>,
    arcs: Vec<Arc>,
    arc_ids: HashMap<(usize, usize), usize>,
    y: Vec<VarId>,
    x: Vec<VarId>,
    beta: Vec<VarId>,
}

impl RouteFormulation {
    /// Enumerate variables, set the objective, and emit every static
    /// constraint. Connectivity is left to the separation oracle.
    pub fn build(problem: &RouteProblem) -> Result<Self, RouteError> {
        let graph = problem.graph;
        let terminals = problem.terminals.indices();

        let mut pairs = Vec::new();
        for &s in terminals {
            for &t in terminals {
                if s < t {
                    pairs.push((s, t));
                }
            }
        }

        let mut arcs = Vec::with_capacity(2 * graph.edge_count());
        let mut arc_ids = HashMap::with_capacity(2 * graph.edge_count());
        for k in 0..graph.edge_count() {
            let (a, b, w) = graph.edge(k);
            arc_ids.insert((a, b), arcs.len());
            arcs.push(Arc {
                from: a,
                to: b,
                weight: w,
            });
            arc_ids.insert((b, a), arcs.len());
            arcs.push(Arc {
                from: b,
                to: a,
                weight: w,
            });
        }

        let n_pairs = pairs.len();
        let mut system = ConstraintSystem::new();

        let y: Vec<VarId> = pairs.iter().map(|_| system.add_binary()).collect();
        let mut x = Vec::with_capacity(arcs.len() * n_pairs);
        let mut beta = Vec::with_capacity(arcs.len() * n_pairs);
        for arc in &arcs {
            for _ in 0..n_pairs {
                let xv = system.add_binary();
                system.add_objective(xv, arc.weight);
                x.push(xv);
            }
        }
        for _ in &arcs {
            for _ in 0..n_pairs {
                let bv = system.add_binary();
                system.add_objective(bv, problem.config.bend_weight);
                beta.push(bv);
            }
        }

        let mut formulation = Self {
            system,
            pairs,
            arcs,
            arc_ids,
            y,
            x,
            beta,
        };

        // Flow conservation: per pair, net outflow is +y at the pair's first
        // terminal, -y at its second, zero elsewhere. An inactive pair
        // carries no flow at all.
        for p in 0..n_pairs {
            let (s, t) = formulation.pairs[p];
            for v in 0..graph.vertex_count() {
                let mut terms: Vec<(VarId, f64)> = Vec::new();
                for (u, _) in graph.neighbors(v) {
                    terms.push((formulation.x_var(formulation.arc_id(v, u), p), 1.0));
                    terms.push((formulation.x_var(formulation.arc_id(u, v), p), -1.0));
                }
                if v == s {
                    terms.push((formulation.y[p], -1.0));
                } else if v == t {
                    terms.push((formulation.y[p], 1.0));
                }
                // Vertices without incident arcs contribute no row; a
                // terminal among them still gets its +-y row, which pins the
                // pair inactive.
                if terms.is_empty() {
                    continue;
                }
                formulation
                    .system
                    .add_constraint(LinearConstraint::eq(terms, 0.0));
            }
        }

        // Bend linkage: beta[i,j,p] >= x[i,j,p] + sum of non-collinear
        // continuations through j, minus one. Collinear means the direction
        // vectors are weakly parallel (same or opposite sense).
        for a in 0..formulation.arcs.len() {
            let arc = formulation.arcs[a];
            let entering = graph.direction(arc.to, arc.from);
            for p in 0..n_pairs {
                let mut terms = vec![
                    (formulation.beta_var(a, p), -1.0),
                    (formulation.x_var(a, p), 1.0),
                ];
                for (k, _) in graph.neighbors(arc.to) {
                    let continuing = graph.direction(arc.to, k);
                    if !graph.is_weak_parallel(&continuing, &entering) {
                        terms.push((formulation.x_var(formulation.arc_id(arc.to, k), p), 1.0));
                    }
                }
                formulation
                    .system
                    .add_constraint(LinearConstraint::le(terms, 1.0));
            }
        }

        // Every terminal touches at least one active pair.
        for &s in terminals {
            let terms: Vec<(VarId, f64)> = formulation
                .pairs
                .iter()
                .enumerate()
                .filter(|(_, &(a, b))| a == s || b == s)
                .map(|(p, _)| (formulation.y[p], 1.0))
                .collect();
            formulation
                .system
                .add_constraint(LinearConstraint::ge(terms, 1.0));
        }

        // Spanning-tree edge count over the terminals.
        let tree_terms: Vec<(VarId, f64)> =
            formulation.y.iter().map(|&v| (v, 1.0)).collect();
        formulation.system.add_constraint(LinearConstraint::eq(
            tree_terms,
            (terminals.len() - 1) as f64,
        ));

        Ok(formulation)
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn pair(&self, p: usize) -> (usize, usize) {
        self.pairs[p]
    }

    pub fn arc(&self, a: usize) -> Arc {
        self.arcs[a]
    }

    /// Arc index of the directed arc `from -> to`. Panics if the arc does
    /// not exist; every neighbor relation of the graph has both arcs.
    pub fn arc_id(&self, from: usize, to: usize) -> usize {
        self.arc_ids[&(from, to)]
    }

    pub fn y_var(&self, p: usize) -> VarId {
        self.y[p]
    }

    pub fn x_var(&self, a: usize, p: usize) -> VarId {
        self.x[a * self.pairs.len() + p]
    }

    pub fn beta_var(&self, a: usize, p: usize) -> VarId {
        self.beta[a * self.pairs.len() + p]
    }
}

#[cfg(test)]
mod tests {
    use super::super::problem::{RouteConfig, RouteProblem};
    use super::*;
    use raceway_core::{Point, RoutingGraph, TerminalSet};
    use raceway_solver::Sense;

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
    fn test_variable_and_constraint_counts() {
        let g = l_corridor();
        let t = TerminalSet::new(vec![0, 2]);
        let problem = RouteProblem::new(&g, &t, RouteConfig::default()).unwrap();
        let f = RouteFormulation::build(&problem).unwrap();

        assert_eq!(f.pair_count(), 1);
        assert_eq!(f.arc_count(), 4);
        // 1 y + 4 x + 4 beta
        assert_eq!(f.system.num_variables(), 9);
        // 3 flow + 4 bend + 2 coverage + 1 tree size
        assert_eq!(f.system.num_constraints(), 10);
    }

    #[test]
    fn test_objective_uses_weights_and_bend_coefficient() {
        let g = l_corridor();
        let t = TerminalSet::new(vec![0, 2]);
        let config = RouteConfig { bend_weight: 2.5 };
        let problem = RouteProblem::new(&g, &t, config).unwrap();
        let f = RouteFormulation::build(&problem).unwrap();

        let coeffs = f.system.objective_coefficients();
        assert_eq!(coeffs[f.y_var(0).index()], 0.0);
        assert_eq!(coeffs[f.x_var(0, 0).index()], 1.0);
        assert_eq!(coeffs[f.beta_var(0, 0).index()], 2.5);
    }

    #[test]
    fn test_bend_constraints_exclude_collinear_continuations() {
        let g = l_corridor();
        let t = TerminalSet::new(vec![0, 2]);
        let problem = RouteProblem::new(&g, &t, RouteConfig::default()).unwrap();
        let f = RouteFormulation::build(&problem).unwrap();

        // Bend constraints are the Le rows with rhs 1. Turning through the
        // corner vertex shows up as a third term; the reverse arc never does.
        let term_counts: Vec<usize> = f
            .system
            .constraints()
            .iter()
            .filter(|c| c.sense == Sense::Le && c.rhs == 1.0)
            .map(|c| c.terms.len())
            .collect();
        assert_eq!(term_counts.len(), 4);
        assert_eq!(term_counts.iter().filter(|&&n| n == 3).count(), 2);
        assert_eq!(term_counts.iter().filter(|&&n| n == 2).count(), 2);
    }

    #[test]
    fn test_straight_line_has_no_bend_terms() {
        let mut g = RoutingGraph::new();
        for i in 0..3 {
            g.add_vertex(Point::new(i as f64, 0.0, 0.0));
        }
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        let t = TerminalSet::new(vec![0, 2]);
        let problem = RouteProblem::new(&g, &t, RouteConfig::default()).unwrap();
        let f = RouteFormulation::build(&problem).unwrap();

        for c in f
            .system
            .constraints()
            .iter()
            .filter(|c| c.sense == Sense::Le && c.rhs == 1.0)
        {
            assert_eq!(c.terms.len(), 2);
        }
    }

    #[test]
    fn test_arc_lookup_is_directional() {
        let g = l_corridor();
        let t = TerminalSet::new(vec![0, 2]);
        let problem = RouteProblem::new(&g, &t, RouteConfig::default()).unwrap();
        let f = RouteFormulation::build(&problem).unwrap();

        let forward = f.arc_id(0, 1);
        let backward = f.arc_id(1, 0);
        assert_ne!(forward, backward);
        assert_eq!(f.arc(forward).from, 0);
        assert_eq!(f.arc(backward).from, 1);
        assert_eq!(f.arc(forward).weight, f.arc(backward).weight);
    }
}
