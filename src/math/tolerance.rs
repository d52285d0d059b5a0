//! Epsilon-aware comparisons.
//!
//! Every function takes the epsilon explicitly. Callers obtain it from
//! [`crate::config::Config`].

use std::cmp::Ordering;

use super::Point2;

/// Sign of a value once values within epsilon of zero are treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Returns the sign as `-1`, `0` or `1`.
    #[must_use]
    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    /// Returns the sign as `-1.0`, `0.0` or `1.0`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.as_i8())
    }

    /// Returns the opposite sign.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// Returns true if `a` and `b` differ by at most `epsilon`, scaled by the
/// larger magnitude once that magnitude exceeds one.
#[must_use]
pub fn equal_to(a: f64, b: f64, epsilon: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= epsilon * scale
}

/// Returns true if `value` is within `epsilon` of zero.
#[must_use]
pub fn is_zero(value: f64, epsilon: f64) -> bool {
    value.abs() <= epsilon
}

/// Sign of `value`, treating `|value| <= epsilon` as zero.
#[must_use]
pub fn sign(value: f64, epsilon: f64) -> Sign {
    if value > epsilon {
        Sign::Positive
    } else if value < -epsilon {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

/// Epsilon-aware three-way comparison.
#[must_use]
pub fn compare(a: f64, b: f64, epsilon: f64) -> Ordering {
    if equal_to(a, b, epsilon) {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Returns true if `a < b` and the two are not epsilon-equal.
#[must_use]
pub fn less_than(a: f64, b: f64, epsilon: f64) -> bool {
    compare(a, b, epsilon) == Ordering::Less
}

/// Returns true if `a > b` and the two are not epsilon-equal.
#[must_use]
pub fn greater_than(a: f64, b: f64, epsilon: f64) -> bool {
    compare(a, b, epsilon) == Ordering::Greater
}

/// Coordinate-wise epsilon equality of two points.
#[must_use]
pub fn points_equal(a: &Point2, b: &Point2, epsilon: f64) -> bool {
    equal_to(a.x, b.x, epsilon) && equal_to(a.y, b.y, epsilon)
}

/// Removes epsilon-duplicate points, keeping the first occurrence.
#[must_use]
pub fn dedup_points(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    let mut unique: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|q| points_equal(p, q, epsilon)) {
            unique.push(*p);
        }
    }
    unique
}
