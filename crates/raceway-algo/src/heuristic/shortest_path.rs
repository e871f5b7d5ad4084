//! Minimum-bend shortest paths.
//!
//! Dijkstra-style label search minimizing (cost, bends) lexicographically.
//! A step whose direction is weakly parallel to some predecessor direction
//! continues straight and costs no bend; every tied predecessor is kept so
//! that path extraction can prefer the straight one.

use super::cost::CostBend;
use raceway_core::RoutingGraph;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    cost: f64,
    bends: i32,
    vertex: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.bends.cmp(&other.bends))
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// Single-source minimum-bend shortest-path labels over a routing graph.
pub struct MinBendShortestPath<'g> {
    graph: &'g RoutingGraph,
    root: Option<usize>,
    labels: Vec<CostBend>,
    predecessors: Vec<Vec<usize>>,
}

impl<'g> MinBendShortestPath<'g> {
    pub fn new(graph: &'g RoutingGraph) -> Self {
        Self {
            graph,
            root: None,
            labels: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    /// Run the label search from `root`, replacing any previous state.
    ///
    /// The root starts at bend count -1 so the first arc out of it costs
    /// zero bends.
    pub fn solve(&mut self, root: usize) {
        let n = self.graph.vertex_count();
        let tol = *self.graph.tolerances();
        self.root = Some(root);
        self.labels = vec![CostBend::unreachable(tol.abs_err); n];
        self.predecessors = vec![Vec::new(); n];
        let mut visited = vec![false; n];
        let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::new();

        self.labels[root] = CostBend::with_tol(0.0, -1, tol.abs_err);
        heap.push(Reverse(HeapEntry {
            cost: 0.0,
            bends: -1,
            vertex: root,
        }));

        while let Some(Reverse(entry)) = heap.pop() {
            let v = entry.vertex;
            if visited[v] {
                continue;
            }
            visited[v] = true;
            let here = self.graph.vertex(v);
            for (u, weight) in self.graph.neighbors(v) {
                if visited[u] {
                    continue;
                }
                let direction = self.graph.vertex(u) - here;
                let mut label = CostBend::with_tol(
                    self.labels[v].cost + weight,
                    self.labels[v].bends.saturating_add(1),
                    tol.abs_err,
                );
                for &x in &self.predecessors[v] {
                    let incoming = here - self.graph.vertex(x);
                    if direction.is_weak_parallel(&incoming, tol.rel_err, tol.weak_parallel_err) {
                        label.bends -= 1;
                        break;
                    }
                }
                if label < self.labels[u] {
                    self.labels[u] = label;
                    self.predecessors[u] = vec![v];
                    heap.push(Reverse(HeapEntry {
                        cost: label.cost,
                        bends: label.bends,
                        vertex: u,
                    }));
                } else if !(self.labels[u] < label) {
                    self.predecessors[u].push(v);
                }
            }
        }
    }

    /// Label of vertex `v`; unreachable vertices stay at infinity.
    pub fn distance(&self, v: usize) -> CostBend {
        self.labels[v]
    }

    pub fn predecessors(&self, v: usize) -> &[usize] {
        &self.predecessors[v]
    }

    /// The root-to-`v` path, preferring the straight predecessor wherever
    /// several are tied. `None` if `v` is unreachable or no solve ran.
    pub fn path_to(&self, v: usize) -> Option<Vec<usize>> {
        let root = self.root?;
        if v == root {
            return Some(vec![root]);
        }
        let first = *self.predecessors.get(v)?.first()?;
        let tol = self.graph.tolerances();
        let mut path = vec![v, first];
        let mut direction = (self.graph.vertex(v) - self.graph.vertex(first)).normalized();
        let mut u = first;
        while !self.predecessors[u].is_empty() {
            let preds = &self.predecessors[u];
            let here = self.graph.vertex(u);
            let mut chosen = 0;
            for i in 1..preds.len() {
                let current = here - self.graph.vertex(preds[chosen]);
                let candidate = here - self.graph.vertex(preds[i]);
                if !direction.is_weak_parallel(&current, tol.rel_err, tol.weak_parallel_err)
                    && direction.is_weak_parallel(&candidate, tol.rel_err, tol.weak_parallel_err)
                {
                    chosen = i;
                }
            }
            let next = preds[chosen];
            direction = (here - self.graph.vertex(next)).normalized();
            path.push(next);
            u = next;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raceway_core::Point;

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
    fn test_straight_line_counts_no_bends() {
        let mut g = RoutingGraph::new();
        for i in 0..4 {
            g.add_vertex(Point::new(i as f64, 0.0, 0.0));
        }
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(2, 3, 1.0).unwrap();
        let mut mbsp = MinBendShortestPath::new(&g);
        mbsp.solve(0);
        let d = mbsp.distance(3);
        assert!((d.cost - 3.0).abs() < 1e-9);
        assert_eq!(d.bends, 0);
        assert_eq!(mbsp.path_to(3), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_corner_counts_one_bend() {
        let g = l_corridor();
        let mut mbsp = MinBendShortestPath::new(&g);
        mbsp.solve(0);
        let d = mbsp.distance(2);
        assert!((d.cost - 2.0).abs() < 1e-9);
        assert_eq!(d.bends, 1);
        assert_eq!(mbsp.path_to(2), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_prefers_fewer_bends_at_equal_cost() {
        // Two equal-cost routes from 0 to 4: straight along the x axis, or
        // a detour with two corners. The straight one must win.
        let mut g = RoutingGraph::new();
        let a = g.add_vertex(Point::new(0.0, 0.0, 0.0));
        let b = g.add_vertex(Point::new(1.0, 0.0, 0.0));
        let c = g.add_vertex(Point::new(2.0, 0.0, 0.0));
        let detour = g.add_vertex(Point::new(1.0, 1.0, 0.0));
        g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(b, c, 1.0).unwrap();
        g.add_edge(a, detour, 1.0).unwrap();
        g.add_edge(detour, c, 1.0).unwrap();
        let mut mbsp = MinBendShortestPath::new(&g);
        mbsp.solve(a);
        assert_eq!(mbsp.distance(c).bends, 0);
        assert_eq!(mbsp.path_to(c), Some(vec![a, b, c]));
    }

    #[test]
    fn test_unreachable_vertex() {
        let mut g = l_corridor();
        let lone = g.add_vertex(Point::new(9.0, 9.0, 9.0));
        let mut mbsp = MinBendShortestPath::new(&g);
        mbsp.solve(0);
        assert!(!mbsp.distance(lone).is_finite());
        assert_eq!(mbsp.path_to(lone), None);
    }

    #[test]
    fn test_root_path_is_trivial() {
        let g = l_corridor();
        let mut mbsp = MinBendShortestPath::new(&g);
        mbsp.solve(1);
        assert_eq!(mbsp.path_to(1), Some(vec![1]));
        assert_eq!(mbsp.distance(1).cost, 0.0);
    }
}
