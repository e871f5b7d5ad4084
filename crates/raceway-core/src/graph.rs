//! The candidate-routing graph.
//!
//! [`RoutingGraph`] holds admissible wire-segment endpoints (vertices with
//! 3-D coordinates) and admissible segments (weighted undirected edges).
//! Vertex and edge indices are dense and stable: the graph supports no
//! removal, and the routing core treats it as read-only input.

use crate::error::GraphError;
use crate::point::Point;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::VecDeque;

/// Geometric tolerances carried by the graph and shared by every consumer
/// of its weak-parallel predicate.
#[derive(Debug, Clone, Copy)]
pub struct GeometryTolerances {
    /// Relative tolerance for direction comparisons.
    pub rel_err: f64,
    /// Absolute tolerance for cost comparisons.
    pub abs_err: f64,
    /// Weak-parallel tolerance, below 1/sqrt(2).
    pub weak_parallel_err: f64,
}

impl Default for GeometryTolerances {
    fn default() -> Self {
        Self {
            rel_err: crate::point::REL_ERR,
            abs_err: 1e-3,
            weak_parallel_err: crate::point::WEAK_PARALLEL_ERR,
        }
    }
}

/// Weighted undirected candidate-routing graph with 3-D vertex coordinates.
#[derive(Debug, Clone)]
pub struct RoutingGraph {
    graph: UnGraph<Point, f64>,
    tol: GeometryTolerances,
}

impl Default for RoutingGraph {
    fn default() -> Self {
        Self::with_tolerances(GeometryTolerances::default())
    }
}

impl RoutingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(tol: GeometryTolerances) -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            tol,
        }
    }

    pub fn tolerances(&self) -> &GeometryTolerances {
        &self.tol
    }

    /// Add a vertex and return its dense index.
    pub fn add_vertex(&mut self, point: Point) -> usize {
        self.graph.add_node(point).index()
    }

    /// Add an undirected weighted edge between existing vertices.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<usize, GraphError> {
        let n = self.vertex_count();
        if a >= n {
            return Err(GraphError::VertexOutOfRange { vertex: a, count: n });
        }
        if b >= n {
            return Err(GraphError::VertexOutOfRange { vertex: b, count: n });
        }
        if a == b {
            return Err(GraphError::SelfLoop { vertex: a });
        }
        if weight < 0.0 {
            return Err(GraphError::NegativeWeight { weight });
        }
        Ok(self
            .graph
            .add_edge(NodeIndex::new(a), NodeIndex::new(b), weight)
            .index())
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Coordinate of vertex `i`. Panics if `i` is out of range.
    pub fn vertex(&self, i: usize) -> Point {
        self.graph[NodeIndex::new(i)]
    }

    /// Endpoints and weight of edge `k`. The weight is the same in both
    /// directions. Panics if `k` is out of range.
    pub fn edge(&self, k: usize) -> (usize, usize, f64) {
        let e = EdgeIndex::new(k);
        let (a, b) = self
            .graph
            .edge_endpoints(e)
            .expect("edge index out of range");
        (a.index(), b.index(), self.graph[e])
    }

    /// Neighboring vertices of `i` with the connecting edge weight.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.graph
            .edges(NodeIndex::new(i))
            .map(|e| (e.target().index(), *e.weight()))
    }

    /// Direction vector of the arc from `i` to `j`.
    pub fn direction(&self, i: usize, j: usize) -> Point {
        self.vertex(j) - self.vertex(i)
    }

    /// Weak-parallel test under this graph's tolerances.
    pub fn is_weak_parallel(&self, d1: &Point, d2: &Point) -> bool {
        d1.is_weak_parallel(d2, self.tol.rel_err, self.tol.weak_parallel_err)
    }

    /// Whether every vertex in `subset` lies in one connected component.
    pub fn is_connected_subset(&self, subset: &[usize]) -> bool {
        let Some(&start) = subset.first() else {
            return true;
        };
        if subset.iter().any(|&v| v >= self.vertex_count()) {
            return false;
        }
        let mut visited = vec![false; self.vertex_count()];
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            for (u, _) in self.neighbors(v) {
                if !visited[u] {
                    visited[u] = true;
                    queue.push_back(u);
                }
            }
        }
        subset.iter().all(|&v| visited[v])
    }
}
