//! 2D circular-arc math.
//!
//! An arc is parameterized by its polar angle. It starts at `start_angle` and
//! sweeps by `sweep` radians: positive sweeps run counter-clockwise, negative
//! sweeps clockwise.
//!
//! Bulge convention used by [`arc_from_bulge`]: `bulge = tan(sweep / 4)`.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Point2, Vector2};

/// Converts a bulge-defined arc between two points to center-radius-angle form.
///
/// Returns `None` for zero-length chords or a zero bulge (straight segment).
#[must_use]
pub fn arc_from_bulge(p0: &Point2, p1: &Point2, bulge: f64) -> Option<(Point2, f64, f64, f64)> {
    let d = p1 - p0;
    let chord_len = d.norm();
    if chord_len < 1e-12 || bulge.abs() < 1e-12 {
        return None;
    }

    // Distance from chord midpoint to center, signed toward the left normal.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mid = p0 + d * 0.5;
    let normal = Vector2::new(-d.y, d.x) / chord_len;
    let center = mid + normal * (sagitta_ratio * chord_len * 0.5);

    // r = d*(1+b²)/(4*|b|)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
    let start_angle = (p0.y - center.y).atan2(p0.x - center.x);
    let sweep = 4.0 * bulge.atan();

    Some((center, radius, start_angle, sweep))
}

/// Evaluates the point on a circle at polar `angle`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, angle: f64) -> Point2 {
    Point2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Unit tangent of an arc at polar `angle`, pointing in the direction of
/// travel given by the sign of `sweep`.
#[must_use]
pub fn arc_tangent_at(angle: f64, sweep: f64) -> Vector2 {
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    // Tangent to circle at angle θ is (-sin θ, cos θ) for CCW; negate for CW.
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Maps a polar angle to the arc's own angle parameter.
///
/// Returns the angle in `[start_angle, start_angle + sweep]` (or the reverse
/// interval for clockwise arcs) that is congruent to `angle`, or `None` if
/// the angle lies outside the swept range by more than `epsilon`.
#[must_use]
pub fn angle_to_arc_param(angle: f64, start_angle: f64, sweep: f64, epsilon: f64) -> Option<f64> {
    // Angular offset from start_angle to angle in the sweep direction.
    let mut delta = (angle - start_angle) % TAU;
    if sweep >= 0.0 {
        if delta < -epsilon {
            delta += TAU;
        }
        if delta > sweep + epsilon && delta - TAU >= -epsilon {
            delta -= TAU;
        }
        (delta >= -epsilon && delta <= sweep + epsilon)
            .then(|| start_angle + delta.clamp(0.0, sweep))
    } else {
        if delta > epsilon {
            delta -= TAU;
        }
        if delta < sweep - epsilon && delta + TAU <= epsilon {
            delta += TAU;
        }
        (delta <= epsilon && delta >= sweep - epsilon)
            .then(|| start_angle + delta.clamp(sweep, 0.0))
    }
}

/// Axis-aligned bounds `(min, max)` of the arc between two polar angles.
#[must_use]
pub fn arc_bounds(center: &Point2, radius: f64, from: f64, to: f64) -> (Point2, Point2) {
    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
    let p0 = arc_point_at(center, radius, lo);
    let p1 = arc_point_at(center, radius, hi);
    let mut min = Point2::new(p0.x.min(p1.x), p0.y.min(p1.y));
    let mut max = Point2::new(p0.x.max(p1.x), p0.y.max(p1.y));

    // Axis extrema sit at multiples of π/2.
    let mut k = (lo / FRAC_PI_2).ceil();
    while k * FRAC_PI_2 <= hi {
        let p = arc_point_at(center, radius, k * FRAC_PI_2);
        min = Point2::new(min.x.min(p.x), min.y.min(p.y));
        max = Point2::new(max.x.max(p.x), max.y.max(p.y));
        k += 1.0;
    }
    (min, max)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-10;

    #[test]
    fn semicircle_ccw_from_bulge() {
        // CCW semicircle from (0,0) to (2,0) runs through the bottom.
        let (c, r, sa, sw) =
            arc_from_bulge(&Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0), 1.0).unwrap();
        assert_abs_diff_eq!(c, Point2::new(1.0, 0.0), epsilon = TOL);
        assert_abs_diff_eq!(r, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(sw, PI, epsilon = TOL);
        let mid = arc_point_at(&c, r, sa + sw * 0.5);
        assert_abs_diff_eq!(mid, Point2::new(1.0, -1.0), epsilon = TOL);
    }

    #[test]
    fn zero_bulge_is_not_an_arc() {
        assert!(arc_from_bulge(&Point2::new(0.0, 0.0), &Point2::new(1.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn tangent_follows_sweep_direction() {
        let ccw = arc_tangent_at(0.0, 1.0);
        let cw = arc_tangent_at(0.0, -1.0);
        assert_abs_diff_eq!(ccw, Vector2::new(0.0, 1.0), epsilon = TOL);
        assert_abs_diff_eq!(cw, Vector2::new(0.0, -1.0), epsilon = TOL);
    }

    #[test]
    fn angle_param_in_and_out_of_range() {
        // Quarter arc from π/4 sweeping to π/2.
        assert!(angle_to_arc_param(0.0, PI / 4.0, PI / 4.0, TOL).is_none());
        let t = angle_to_arc_param(3.0 * PI / 8.0, PI / 4.0, PI / 4.0, TOL);
        assert!(t.is_some_and(|t| (t - 3.0 * PI / 8.0).abs() < TOL));
    }

    #[test]
    fn angle_param_wraps_past_pi() {
        // Arc from 3π/4 sweeping CCW by π/2 passes through ±π.
        let t = angle_to_arc_param(-PI + 0.1, 3.0 * PI / 4.0, PI / 2.0, TOL);
        assert!(t.is_some_and(|t| (t - (PI + 0.1)).abs() < TOL));
    }

    #[test]
    fn clockwise_angle_param() {
        // Arc from 0 sweeping clockwise to -π/2.
        let t = angle_to_arc_param(-PI / 4.0, 0.0, -PI / 2.0, TOL);
        assert!(t.is_some_and(|t| (t + PI / 4.0).abs() < TOL));
        assert!(angle_to_arc_param(PI / 4.0, 0.0, -PI / 2.0, TOL).is_none());
    }

    #[test]
    fn bounds_include_axis_extrema() {
        let (min, max) = arc_bounds(&Point2::origin(), 1.0, -PI / 4.0, PI / 4.0 + PI / 2.0);
        assert_abs_diff_eq!(max.y, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(max.x, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(min.y, -(PI / 4.0).sin(), epsilon = TOL);
    }
}
