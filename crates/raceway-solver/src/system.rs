//! The engine-agnostic formulation representation.
//!
//! A [`ConstraintSystem`] is built fresh for every circuit solve and
//! discarded after result extraction; nothing persists across solves.

/// Dense handle for a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

impl VarId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Comparison sense of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Eq,
    Le,
    Ge,
}

/// A linear constraint `Σ coeff·var  (=|<=|>=)  rhs`.
///
/// Separation cuts are ordinary values of this type, emitted during search.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    pub terms: Vec<(VarId, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn eq(terms: Vec<(VarId, f64)>, rhs: f64) -> Self {
        Self {
            terms,
            sense: Sense::Eq,
            rhs,
        }
    }

    pub fn le(terms: Vec<(VarId, f64)>, rhs: f64) -> Self {
        Self {
            terms,
            sense: Sense::Le,
            rhs,
        }
    }

    pub fn ge(terms: Vec<(VarId, f64)>, rhs: f64) -> Self {
        Self {
            terms,
            sense: Sense::Ge,
            rhs,
        }
    }
}

/// Variables, bounds, minimization objective, and static constraints of one
/// mixed-integer program, independent of any engine API.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSystem {
    lower: Vec<f64>,
    upper: Vec<f64>,
    integer: Vec<bool>,
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl ConstraintSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binary decision variable.
    pub fn add_binary(&mut self) -> VarId {
        self.push_variable(0.0, 1.0, true)
    }

    /// Add a bounded continuous variable.
    pub fn add_continuous(&mut self, lower: f64, upper: f64) -> VarId {
        self.push_variable(lower, upper, false)
    }

    fn push_variable(&mut self, lower: f64, upper: f64, integer: bool) -> VarId {
        let id = VarId(self.lower.len());
        self.lower.push(lower);
        self.upper.push(upper);
        self.integer.push(integer);
        self.objective.push(0.0);
        id
    }

    /// Accumulate an objective coefficient onto a variable (minimization).
    pub fn add_objective(&mut self, var: VarId, coeff: f64) {
        self.objective[var.0] += coeff;
    }

    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    pub fn num_variables(&self) -> usize {
        self.lower.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_integer(&self, var: VarId) -> bool {
        self.integer[var.0]
    }

    pub fn lower_bounds(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper
    }

    pub fn objective_coefficients(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Objective value of a full variable assignment.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .map(|(c, x)| c * x)
            .sum()
    }
}
