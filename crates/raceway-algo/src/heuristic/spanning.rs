//! Spanning trees over (cost, bends) metrics.

use super::cost::CostBend;

/// Prim minimum spanning tree over a dense symmetric metric.
///
/// Returns tree edges as index pairs into the metric, each pair parent
/// first. The metric closure of a terminal set is small, so the dense
/// O(n^2) scan is the right tool. Deterministic: ties keep the lowest
/// index.
pub fn prim_spanning_tree(metric: &[Vec<CostBend>]) -> Vec<(usize, usize)> {
    let n = metric.len();
    if n <= 1 {
        return Vec::new();
    }
    let mut in_tree = vec![false; n];
    let mut best: Vec<CostBend> = metric[0].clone();
    let mut parent = vec![0usize; n];
    in_tree[0] = true;
    let mut edges = Vec::with_capacity(n - 1);

    for _ in 1..n {
        let mut next: Option<usize> = None;
        for j in 0..n {
            if in_tree[j] {
                continue;
            }
            match next {
                Some(current) if !(best[j] < best[current]) => {}
                _ => next = Some(j),
            }
        }
        let Some(j) = next else { break };
        in_tree[j] = true;
        edges.push((parent[j], j));
        for k in 0..n {
            if !in_tree[k] && metric[j][k] < best[k] {
                best[k] = metric[j][k];
                parent[k] = j;
            }
        }
    }
    edges
}
