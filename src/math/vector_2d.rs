use std::f64::consts::{PI, TAU};

use super::{Rotation2, Vector2};

/// Z component of the 3D cross product of two planar vectors.
///
/// Positive when `b` is counter-clockwise from `a`.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Rotates `v` counter-clockwise by `angle` radians.
#[must_use]
pub fn rotate(v: &Vector2, angle: f64) -> Vector2 {
    Rotation2::new(angle) * v
}

/// Signed angle from `a` to `b` in `(-π, π]`.
#[must_use]
pub fn angle_between(a: &Vector2, b: &Vector2) -> f64 {
    cross(a, b).atan2(a.dot(b))
}

/// Normalizes an angle to `(-π, π]`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Returns the unit vector along `v`, or `None` when `v` is shorter than
/// `epsilon`.
#[must_use]
pub fn unit(v: &Vector2, epsilon: f64) -> Option<Vector2> {
    let len = v.norm();
    if len <= epsilon {
        None
    } else {
        Some(v / len)
    }
}
