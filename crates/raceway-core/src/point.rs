//! 3-D points and direction vectors.
//!
//! Routing treats coordinates and directions interchangeably, so [`Point`]
//! doubles as a vector type. The parallelism predicates implement the
//! "weakly parallel" notion the bend model is built on: two directions along
//! the same line, in the same or opposite sense, within a tolerance.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Default relative tolerance for direction comparisons.
pub const REL_ERR: f64 = 1e-2;
/// Default weak-parallel tolerance. Must stay below 1/sqrt(2) so that
/// perpendicular unit vectors can never be classified as parallel.
pub const WEAK_PARALLEL_ERR: f64 = 0.3;

/// A 3-D point, also used as a direction vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction. The zero vector is returned
    /// unchanged.
    pub fn normalized(&self) -> Point {
        let n = self.norm();
        if n == 0.0 {
            return *self;
        }
        Point::new(self.x / n, self.y / n, self.z / n)
    }

    pub fn dot(&self, v: &Point) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn cross(&self, v: &Point) -> Point {
        Point::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    pub fn distance(&self, v: &Point) -> f64 {
        (*self - *v).norm()
    }

    /// Exact-direction parallel test: the normalized vectors coincide in
    /// either sense within `rel_err`. Near-zero vectors count as parallel.
    pub fn is_parallel(&self, v: &Point, rel_err: f64) -> bool {
        if self.norm() < rel_err || v.norm() < rel_err {
            return true;
        }
        let a = self.normalized();
        let b = v.normalized();
        a.distance(&b) < rel_err || (a + b).norm() < rel_err
    }

    /// Tolerant parallel test: the normalized vectors lie within
    /// `weak_parallel_err` of each other in either the same or the opposite
    /// sense. Near-zero vectors (norm below `rel_err`) count as parallel.
    ///
    /// A path step whose direction is weakly parallel to the previous step
    /// is considered straight; anything else is a bend.
    pub fn is_weak_parallel(&self, v: &Point, rel_err: f64, weak_parallel_err: f64) -> bool {
        let n0 = self.norm();
        let nv = v.norm();
        if n0 < rel_err || nv < rel_err {
            return true;
        }
        let a = self.normalized();
        let b = v.normalized();
        a.distance(&b) < weak_parallel_err || (a + b).norm() < weak_parallel_err
    }

    /// Weakly parallel and pointing the same way.
    pub fn is_weak_same_direction(&self, v: &Point, rel_err: f64, weak_parallel_err: f64) -> bool {
        self.is_weak_parallel(v, rel_err, weak_parallel_err) && self.dot(v) > 0.0
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, v: Point) -> Point {
        Point::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, v: Point) -> Point {
        Point::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k, self.z * k)
    }
}
