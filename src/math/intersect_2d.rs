use super::polynomial::quadratic_roots;
use super::vector_2d::cross;
use super::{Point2, Vector2};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` unless the
/// sine of the angle between the directions is within `epsilon` of zero.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    epsilon: f64,
) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    let scale = d1.norm() * d2.norm();
    if scale == 0.0 || (denom / scale).abs() <= epsilon {
        return None;
    }
    let dp = p2 - p1;
    let t = cross(&dp, d2) / denom;
    let u = cross(&dp, d1) / denom;
    Some((t, u))
}

/// Intersection of the line `origin + t * dir` with a full circle.
///
/// Returns the line parameters of the (zero, one or two) hits in ascending
/// order. A tangent line yields one parameter.
#[must_use]
pub fn line_circle_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    center: &Point2,
    radius: f64,
    epsilon: f64,
) -> Vec<f64> {
    if radius <= epsilon || dir.norm_squared() == 0.0 {
        return Vec::new();
    }

    // Substitute the parametric line into |P - c|² = r².
    let f = origin - center;
    let a = dir.norm_squared();
    let b = 2.0 * f.dot(dir);
    let c = f.norm_squared() - radius * radius;
    quadratic_roots(a, b, c, epsilon)
}

/// Intersection points of two full circles.
///
/// Concentric circles yield no points (the coincident case is handled by
/// the caller). Tangent circles yield a single point.
#[must_use]
pub fn circle_circle_intersect_2d(
    c1: &Point2,
    r1: f64,
    c2: &Point2,
    r2: f64,
    epsilon: f64,
) -> Vec<Point2> {
    if r1 <= epsilon || r2 <= epsilon {
        return Vec::new();
    }

    let d = c2 - c1;
    let dist_sq = d.norm_squared();
    let dist = dist_sq.sqrt();
    if dist <= epsilon {
        return Vec::new();
    }

    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if dist > sum + epsilon || dist < diff - epsilon {
        return Vec::new();
    }

    // Distance from c1 along c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h_sq = r1 * r1 - a * a;
    let mid = c1 + d * (a / dist);
    if h_sq <= epsilon * r1.max(1.0) {
        return vec![mid];
    }

    let h = h_sq.sqrt();
    let perp = Vector2::new(-d.y, d.x) / dist;
    vec![mid + perp * h, mid - perp * h]
}
