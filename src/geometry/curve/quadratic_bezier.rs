use crate::error::Result;
use crate::geometry::Aabb;
use crate::math::{Point2, Vector2};

use super::{CubicBezier, Curve, CurveDomain, Segment};

/// A quadratic Bézier curve over `[0, 1]`.
///
/// Geometric queries go through the exact cubic degree elevation, which
/// keeps the parameterization.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticBezier {
    pub points: [Point2; 3],
}

impl QuadraticBezier {
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }

    /// The same curve as a cubic.
    #[must_use]
    pub fn to_cubic(&self) -> CubicBezier {
        let [p0, p1, p2] = self.points;
        CubicBezier::new(
            p0,
            p0 + (p1 - p0) * (2.0 / 3.0),
            p2 + (p1 - p2) * (2.0 / 3.0),
            p2,
        )
    }

    /// Blossom `B(a, b)`; the control points of the piece over `[a, b]` are
    /// `B(a, a)`, `B(a, b)` and `B(b, b)`.
    fn blossom(&self, a: f64, b: f64) -> Point2 {
        let [p0, p1, p2] = self.points.map(|p| p.coords);
        Point2::from(
            p0 * ((1.0 - a) * (1.0 - b)) + p1 * ((1.0 - a) * b + a * (1.0 - b)) + p2 * (a * b),
        )
    }
}

impl Curve for QuadraticBezier {
    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn point_at(&self, t: f64) -> Point2 {
        self.blossom(t, t)
    }

    fn derivative_at(&self, t: f64) -> Vector2 {
        let [p0, p1, p2] = self.points;
        ((p1 - p0) * (1.0 - t) + (p2 - p1) * t) * 2.0
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        self.to_cubic().tangent_at(t)
    }

    fn curvature_at(&self, t: f64) -> f64 {
        self.to_cubic().curvature_at(t)
    }

    fn bounding_box_between(&self, t0: f64, t1: f64) -> Aabb {
        let piece = [self.blossom(t0, t0), self.blossom(t0, t1), self.blossom(t1, t1)];
        Aabb::from_points(&piece).unwrap_or(Aabb::new(piece[0], piece[0]))
    }

    fn is_degenerate(&self, epsilon: f64) -> bool {
        self.to_cubic().is_degenerate(epsilon)
    }

    fn is_linear(&self, epsilon: f64) -> bool {
        self.to_cubic().is_linear(epsilon)
    }

    fn locate(&self, p: &Point2, epsilon: f64) -> Option<f64> {
        self.to_cubic().locate(p, epsilon)
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Segment {
        QuadraticBezier::new(self.blossom(t0, t0), self.blossom(t0, t1), self.blossom(t1, t1)).into()
    }
}
