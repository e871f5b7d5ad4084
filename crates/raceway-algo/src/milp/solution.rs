//! Routing solve results.

use serde::{Deserialize, Serialize};

/// How the solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// Optimal within the gap tolerance.
    Optimal,
    /// Budget exhausted; the best incumbent is reported.
    FeasibleTimeLimit,
    /// Budget exhausted with no incumbent: unproven impossibility.
    NoIncumbent,
}

/// Result of one circuit solve.
///
/// With status [`RouteStatus::NoIncumbent`], `paths` is empty and the cost
/// and bend totals are absent; only the wall clock is meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSolution {
    pub status: RouteStatus,
    /// One vertex sequence per active terminal pair.
    pub paths: Vec<Vec<usize>>,
    /// Sum of arc weights along all paths.
    pub total_cost: Option<f64>,
    /// Direction changes across all paths.
    pub total_bend_count: Option<usize>,
    /// Objective value of the incumbent (cost plus weighted bends).
    pub objective: Option<f64>,
    /// Relative optimality gap of the incumbent.
    pub gap: Option<f64>,
    pub wall_clock_seconds: f64,
    pub nodes_explored: u64,
    pub cuts_added: usize,
}

impl RouteSolution {
    /// Best-effort empty result for a budget exhausted without incumbent.
    pub fn no_incumbent(wall_clock_seconds: f64) -> Self {
        Self {
            status: RouteStatus::NoIncumbent,
            paths: Vec::new(),
            total_cost: None,
            total_bend_count: None,
            objective: None,
            gap: None,
            wall_clock_seconds,
            nodes_explored: 0,
            cuts_added: 0,
        }
    }

    pub fn is_routed(&self) -> bool {
        !self.paths.is_empty()
    }

    /// Format a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Routing Solution\n{}\n", "=".repeat(40)));
        s.push_str(&format!(
            "Status: {}\n",
            match self.status {
                RouteStatus::Optimal => "Optimal",
                RouteStatus::FeasibleTimeLimit => "Feasible (time limit)",
                RouteStatus::NoIncumbent => "No incumbent",
            }
        ));
        s.push_str(&format!("Paths: {}\n", self.paths.len()));
        if let Some(cost) = self.total_cost {
            s.push_str(&format!("Total wire cost: {cost:.3}\n"));
        }
        if let Some(bends) = self.total_bend_count {
            s.push_str(&format!("Total bends: {bends}\n"));
        }
        if let Some(objective) = self.objective {
            s.push_str(&format!("Objective: {objective:.3}\n"));
        }
        if let Some(gap) = self.gap {
            s.push_str(&format!("Gap: {:.4}%\n", gap * 100.0));
        }
        s.push_str(&format!(
            "Wall clock: {:.2}s ({} nodes, {} cuts)\n",
            self.wall_clock_seconds, self.nodes_explored, self.cuts_added
        ));
        s
    }
}
