use crate::error::{GeometryError, Result};
use crate::geometry::Aabb;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::vector_2d::unit;
use crate::math::{Point2, Vector2};

use super::{Curve, CurveDomain, Segment};

/// A straight segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub start: Point2,
    pub end: Point2,
}

impl LineSegment {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Vector from start to end.
    #[must_use]
    pub fn delta(&self) -> Vector2 {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.delta().norm()
    }
}

impl Curve for LineSegment {
    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn point_at(&self, t: f64) -> Point2 {
        self.start + self.delta() * t
    }

    fn derivative_at(&self, _t: f64) -> Vector2 {
        self.delta()
    }

    fn tangent_at(&self, _t: f64) -> Result<Vector2> {
        Ok(unit(&self.delta(), 0.0).ok_or(GeometryError::ZeroVector)?)
    }

    fn curvature_at(&self, _t: f64) -> f64 {
        0.0
    }

    fn bounding_box_between(&self, t0: f64, t1: f64) -> Aabb {
        let a = self.point_at(t0);
        let b = self.point_at(t1);
        Aabb::new(
            Point2::new(a.x.min(b.x), a.y.min(b.y)),
            Point2::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }

    fn is_degenerate(&self, epsilon: f64) -> bool {
        self.length() <= epsilon
    }

    fn is_linear(&self, _epsilon: f64) -> bool {
        true
    }

    fn locate(&self, p: &Point2, epsilon: f64) -> Option<f64> {
        let (d, t) = point_to_segment_dist(p, &self.start, &self.end);
        (d <= epsilon).then_some(t)
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Segment {
        LineSegment::new(self.point_at(t0), self.point_at(t1)).into()
    }
}
