//! Lazy connectivity separation over the pair variables.

use super::formulation::RouteFormulation;
use raceway_solver::{LinearConstraint, SeparationOracle, SolutionValues, VarId};
use std::collections::HashMap;
use tracing::debug;

/// Pair activity threshold: tolerance for engine numeric slack around 1.
const ACTIVE_TOL: f64 = 0.5;

/// Rejects integer-feasible candidates whose active pairs do not connect all
/// terminals.
///
/// Reads ONLY the `y` values of a candidate. When the active pairs leave
/// some terminals unreached from terminal 0, the bipartition into reached
/// set A and unreached set B yields the cutset inequality
/// `Σ_{u∈A, v∈B} y[u,v] ≥ 1`, the minimal inequality ruling out exactly this
/// candidate. It is valid globally: any connected spanning structure crosses
/// every bipartition of the terminals at least once.
pub struct ConnectivityOracle {
    terminals: Vec<usize>,
    pair_vars: HashMap<(usize, usize), VarId>,
}

impl ConnectivityOracle {
    pub fn new(formulation: &RouteFormulation) -> Self {
        let mut terminals = Vec::new();
        let mut pair_vars = HashMap::with_capacity(formulation.pair_count());
        for p in 0..formulation.pair_count() {
            let (s, t) = formulation.pair(p);
            pair_vars.insert((s, t), formulation.y_var(p));
            if !terminals.contains(&s) {
                terminals.push(s);
            }
            if !terminals.contains(&t) {
                terminals.push(t);
            }
        }
        Self {
            terminals,
            pair_vars,
        }
    }

    /// Value of the pair variable for terminals `a` and `b`, looked up in
    /// canonical lower-index-first order.
    fn pair_value(&self, values: &SolutionValues, a: usize, b: usize) -> f64 {
        let key = if a < b { (a, b) } else { (b, a) };
        values.value(self.pair_vars[&key])
    }
}

impl SeparationOracle for ConnectivityOracle {
    fn separate(&self, values: &SolutionValues) -> Vec<LinearConstraint> {
        let n = self.terminals.len();
        if n == 0 {
            return Vec::new();
        }

        // Iterative reachability: visited flags plus an explicit stack, no
        // recursion even at large terminal counts.
        let mut visited = vec![false; n];
        let mut stack = Vec::with_capacity(n);
        visited[0] = true;
        stack.push(0);
        let mut reached = 1;
        while let Some(i) = stack.pop() {
            for j in 0..n {
                if visited[j] {
                    continue;
                }
                let value = self.pair_value(values, self.terminals[i], self.terminals[j]);
                if value > ACTIVE_TOL {
                    visited[j] = true;
                    reached += 1;
                    stack.push(j);
                }
            }
        }

        if reached == n {
            return Vec::new();
        }

        let mut terms = Vec::with_capacity(reached * (n - reached));
        for i in 0..n {
            if !visited[i] {
                continue;
            }
            for j in 0..n {
                if visited[j] {
                    continue;
                }
                let (a, b) = (self.terminals[i], self.terminals[j]);
                let key = if a < b { (a, b) } else { (b, a) };
                terms.push((self.pair_vars[&key], 1.0));
            }
        }
        debug!(
            reached,
            unreached = n - reached,
            "disconnected candidate, emitting cutset inequality"
        );
        vec![LinearConstraint::ge(terms, 1.0)]
    }
}
