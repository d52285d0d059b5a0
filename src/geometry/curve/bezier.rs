use crate::error::{GeometryError, Result};
use crate::geometry::Aabb;
use crate::math::polynomial::roots_in_range;
use crate::math::vector_2d::{cross, unit};
use crate::math::{Point2, Vector2};

use super::{Curve, CurveDomain, Segment};

/// Parameter nudge used when a derivative vanishes at an endpoint.
const NUDGE: f64 = 1e-7;

/// A cubic Bézier curve over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicBezier {
    pub points: [Point2; 4],
}

impl CubicBezier {
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    /// Power-basis coefficients `[c0, c1, c2, c3]` per axis.
    #[must_use]
    pub fn coefficients(&self) -> [Vector2; 4] {
        let [p0, p1, p2, p3] = self.points.map(|p| p.coords);
        [
            p0,
            (p1 - p0) * 3.0,
            (p2 - p1 * 2.0 + p0) * 3.0,
            p3 - p2 * 3.0 + p1 * 3.0 - p0,
        ]
    }

    /// Second derivative at `t`.
    #[must_use]
    pub fn second_derivative_at(&self, t: f64) -> Vector2 {
        let [p0, p1, p2, p3] = self.points;
        let a = (p2 - p1) - (p1 - p0);
        let b = (p3 - p2) - (p2 - p1);
        (a * (1.0 - t) + b * t) * 6.0
    }

    /// Third derivative (constant).
    #[must_use]
    pub fn third_derivative(&self) -> Vector2 {
        let [p0, p1, p2, p3] = self.points;
        ((p3 - p0) + (p1 - p2) * 3.0) * 6.0
    }

    /// Splits the curve at `t` with de Casteljau's algorithm.
    #[must_use]
    pub fn split(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let [p0, p1, p2, p3] = self.points;
        let p01 = p0 + (p1 - p0) * t;
        let p12 = p1 + (p2 - p1) * t;
        let p23 = p2 + (p3 - p2) * t;
        let p012 = p01 + (p12 - p01) * t;
        let p123 = p12 + (p23 - p12) * t;
        let mid = p012 + (p123 - p012) * t;
        (
            CubicBezier::new(p0, p01, p012, mid),
            CubicBezier::new(mid, p123, p23, p3),
        )
    }

    /// The control points of the piece between `t0` and `t1`, which keeps
    /// the direction from `t0` to `t1`.
    #[must_use]
    pub fn segment_between(&self, t0: f64, t1: f64) -> CubicBezier {
        let (lo, hi, flip) = if t0 <= t1 { (t0, t1, false) } else { (t1, t0, true) };
        let right = if lo <= 0.0 { self.clone() } else { self.split(lo).1 };
        let piece = if hi >= 1.0 || lo >= 1.0 {
            right
        } else {
            right.split((hi - lo) / (1.0 - lo)).0
        };
        if flip {
            let [a, b, c, d] = piece.points;
            CubicBezier::new(d, c, b, a)
        } else {
            piece
        }
    }

    /// Direction of travel when the first derivative vanishes at `t`.
    fn fallback_direction(&self, t: f64) -> Option<Vector2> {
        // Near t = 1 the curve arrives from the side of the even derivatives,
        // so their sign flips.
        let at_end = t > 0.5;
        let second = self.second_derivative_at(t);
        if second.norm() > f64::EPSILON {
            return Some(if at_end { -second } else { second });
        }
        let third = self.third_derivative();
        (third.norm() > f64::EPSILON).then_some(third)
    }
}

impl Curve for CubicBezier {
    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn point_at(&self, t: f64) -> Point2 {
        let mt = 1.0 - t;
        let [p0, p1, p2, p3] = self.points.map(|p| p.coords);
        Point2::from(
            p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t),
        )
    }

    fn derivative_at(&self, t: f64) -> Vector2 {
        let mt = 1.0 - t;
        let [p0, p1, p2, p3] = self.points;
        ((p1 - p0) * (mt * mt) + (p2 - p1) * (2.0 * mt * t) + (p3 - p2) * (t * t)) * 3.0
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        let d = self.derivative_at(t);
        let scale = self.bounding_box().extent().max(1.0);
        if d.norm() > f64::EPSILON * scale * 16.0 {
            return Ok(unit(&d, 0.0).ok_or(GeometryError::ZeroVector)?);
        }
        self.fallback_direction(t)
            .and_then(|v| unit(&v, 0.0))
            .ok_or_else(|| GeometryError::ZeroVector.into())
    }

    fn curvature_at(&self, t: f64) -> f64 {
        let d1 = self.derivative_at(t);
        let speed = d1.norm();
        if speed <= f64::EPSILON * 16.0 {
            // Cusp-like endpoint: the sign is taken just inside the domain.
            let inner = if t > 0.5 { t - NUDGE } else { t + NUDGE };
            let d1 = self.derivative_at(inner);
            return cross(&d1, &self.second_derivative_at(inner)) / d1.norm().powi(3);
        }
        cross(&d1, &self.second_derivative_at(t)) / speed.powi(3)
    }

    fn bounding_box_between(&self, t0: f64, t1: f64) -> Aabb {
        let piece = self.segment_between(t0, t1);
        // The convex hull property bounds the curve by its control points.
        Aabb::from_points(&piece.points).unwrap_or(Aabb::new(piece.points[0], piece.points[0]))
    }

    fn is_degenerate(&self, epsilon: f64) -> bool {
        let p0 = self.points[0];
        self.points.iter().all(|p| (p - p0).norm() <= epsilon)
    }

    fn is_linear(&self, epsilon: f64) -> bool {
        // Axis through the two control points farthest apart.
        let mut axis = (self.points[0], self.points[3]);
        let mut best = (axis.1 - axis.0).norm();
        for i in 0..4 {
            for j in i + 1..4 {
                let len = (self.points[j] - self.points[i]).norm();
                if len > best {
                    best = len;
                    axis = (self.points[i], self.points[j]);
                }
            }
        }
        if best <= epsilon {
            return true;
        }
        let dir = (axis.1 - axis.0) / best;
        self.points
            .iter()
            .all(|p| cross(&dir, &(p - axis.0)).abs() <= epsilon)
    }

    fn locate(&self, p: &Point2, epsilon: f64) -> Option<f64> {
        let c = self.coefficients();
        let mut best: Option<(f64, f64)> = None;
        for axis in 0..2 {
            let poly = [c[0][axis] - p[axis], c[1][axis], c[2][axis], c[3][axis]];
            if poly[1..].iter().all(|v| v.abs() <= f64::EPSILON) {
                continue;
            }
            for t in roots_in_range(&poly, 0.0, 1.0, epsilon) {
                let d = (self.point_at(t) - p).norm();
                if d <= epsilon && best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((t, d));
                }
            }
        }
        best.map(|(t, _)| t)
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Segment {
        self.segment_between(t0, t1).into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn arch() -> CubicBezier {
        CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        )
    }

    #[test]
    fn endpoints_and_midpoint() {
        let b = arch();
        assert_abs_diff_eq!(b.point_at(0.0), Point2::new(0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(b.point_at(1.0), Point2::new(1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(b.point_at(0.5), Point2::new(0.5, 0.75), epsilon = 1e-12);
    }

    #[test]
    fn arch_bends_clockwise() {
        let b = arch();
        assert!(b.curvature_at(0.5) < 0.0);
        let t = b.tangent_at(0.0).unwrap();
        assert_abs_diff_eq!(t, Vector2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn coincident_control_point_uses_second_derivative() {
        let b = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 0.0),
        );
        let t0 = b.tangent_at(0.0).unwrap();
        assert_abs_diff_eq!(t0, Vector2::new(1.0, 1.0).normalize(), epsilon = 1e-12);
    }

    #[test]
    fn collinear_controls_are_linear() {
        let b = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 3.0),
        );
        assert!(b.is_linear(1e-10));
        assert!(!arch().is_linear(1e-10));
        assert!(!b.is_degenerate(1e-10));
    }

    #[test]
    fn locate_recovers_parameter() {
        let b = arch();
        let p = b.point_at(0.3);
        let t = b.locate(&p, 1e-9).unwrap();
        assert_abs_diff_eq!(t, 0.3, epsilon = 1e-9);
        assert!(b.locate(&Point2::new(0.5, 0.0), 1e-9).is_none());
    }

    #[test]
    fn segment_between_preserves_shape() {
        let b = arch();
        let piece = b.segment_between(0.25, 0.75);
        assert_abs_diff_eq!(piece.point_at(0.0), b.point_at(0.25), epsilon = 1e-12);
        assert_abs_diff_eq!(piece.point_at(1.0), b.point_at(0.75), epsilon = 1e-12);
        assert_abs_diff_eq!(piece.point_at(0.5), b.point_at(0.5), epsilon = 1e-12);
        let reversed = b.segment_between(0.75, 0.25);
        assert_abs_diff_eq!(reversed.point_at(0.0), b.point_at(0.75), epsilon = 1e-12);
    }
}
