//! Cross-checks between the exact core, the decomposition heuristic, and
//! the case loader.

use raceway_algo::heuristic::DecompositionRouter;
use raceway_algo::io::load_case;
use raceway_algo::milp::solve_routes_default;
use raceway_core::{Point, RoutingGraph, TerminalSet};
use std::fs;

fn line_graph() -> RoutingGraph {
    let mut g = RoutingGraph::new();
    for i in 0..4 {
        g.add_vertex(Point::new(i as f64, 0.0, 0.0));
    }
    g.add_edge(0, 1, 1.0).unwrap();
    g.add_edge(1, 2, 1.0).unwrap();
    g.add_edge(2, 3, 1.0).unwrap();
    g
}

#[test]
fn test_heuristic_matches_exact_on_corridor() {
    let graph = line_graph();
    let terminals = TerminalSet::with_source(0, vec![1, 2, 3]);

    let exact = solve_routes_default(&graph, &terminals).unwrap();
    let heuristic = DecompositionRouter::new(&graph)
        .route(&terminals, true)
        .unwrap();

    // On a corridor the decomposition is optimal: same cost, same bends.
    assert!((exact.total_cost.unwrap() - heuristic.cost).abs() < 1e-6);
    assert_eq!(exact.total_bend_count.unwrap() as i32, heuristic.bends);
    assert_eq!(exact.paths.len(), heuristic.paths.len());
}

#[test]
fn test_loaded_case_routes_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("vertices.txt"),
        "0 0 0\n1 0 0\n1 1 0\n",
    )
    .unwrap();
    fs::write(dir.path().join("edges.txt"), "0 1 1.0\n1 2 1.0\n").unwrap();
    fs::write(dir.path().join("devices.txt"), "0 2\n").unwrap();

    let (graph, terminals) = load_case(dir.path()).unwrap();
    let solution = solve_routes_default(&graph, &terminals).unwrap();
    assert_eq!(solution.paths, vec![vec![0, 1, 2]]);
    assert!((solution.total_cost.unwrap() - 2.0).abs() < 1e-6);
    assert_eq!(solution.total_bend_count, Some(1));

    let heuristic = DecompositionRouter::new(&graph)
        .route(&terminals, true)
        .unwrap();
    assert!((heuristic.cost - 2.0).abs() < 1e-6);
    assert_eq!(heuristic.bends, 1);
}
