//! Lexicographic (cost, bends) labels.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign};

/// A route label ordered by wire cost first, bend count second.
///
/// Cost comparisons are tolerant: two costs within `tol` count as equal and
/// the comparison falls through to the bend counts.
#[derive(Debug, Clone, Copy)]
pub struct CostBend {
    pub cost: f64,
    pub bends: i32,
    pub tol: f64,
}

impl CostBend {
    pub const DEFAULT_TOL: f64 = 1e-6;

    pub fn new(cost: f64, bends: i32) -> Self {
        Self::with_tol(cost, bends, Self::DEFAULT_TOL)
    }

    pub fn with_tol(cost: f64, bends: i32, tol: f64) -> Self {
        Self { cost, bends, tol }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0)
    }

    /// Label of an unreached vertex.
    pub fn unreachable(tol: f64) -> Self {
        Self::with_tol(f64::INFINITY, i32::MAX, tol)
    }

    pub fn is_finite(&self) -> bool {
        self.cost.is_finite()
    }
}

impl PartialEq for CostBend {
    fn eq(&self, other: &Self) -> bool {
        (self.cost - other.cost).abs() <= self.tol && self.bends == other.bends
    }
}

impl PartialOrd for CostBend {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.cost + self.tol < other.cost {
            return Some(Ordering::Less);
        }
        if other.cost + self.tol < self.cost {
            return Some(Ordering::Greater);
        }
        Some(self.bends.cmp(&other.bends))
    }
}

impl Add for CostBend {
    type Output = CostBend;
    fn add(self, other: CostBend) -> CostBend {
        CostBend {
            cost: self.cost + other.cost,
            bends: self.bends.saturating_add(other.bends),
            tol: self.tol,
        }
    }
}

impl AddAssign for CostBend {
    fn add_assign(&mut self, other: CostBend) {
        *self = *self + other;
    }
}
