use crate::error::{GeometryError, Result};
use crate::geometry::Aabb;
use crate::math::vector_2d::{cross, unit};
use crate::math::{Point2, Vector2};

use super::{linear_bounds, Curve, CurveDomain, LineSegment, Segment};

/// A half-line starting at `origin`.
///
/// `P(t) = origin + t * direction` for `t >= 0`, with a unit direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    origin: Point2,
    direction: Vector2,
}

impl Ray {
    /// Creates a new ray.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point2, direction: Vector2) -> Result<Self> {
        let direction = unit(&direction, 0.0).ok_or(GeometryError::ZeroVector)?;
        Ok(Self { origin, direction })
    }

    /// Creates a ray from a direction already known to be of unit length.
    pub(crate) fn from_unit(origin: Point2, direction: Vector2) -> Self {
        Self { origin, direction }
    }

    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }
}

impl Curve for Ray {
    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, f64::INFINITY)
    }

    fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    fn derivative_at(&self, _t: f64) -> Vector2 {
        self.direction
    }

    fn tangent_at(&self, _t: f64) -> Result<Vector2> {
        Ok(self.direction)
    }

    fn curvature_at(&self, _t: f64) -> f64 {
        0.0
    }

    fn bounding_box_between(&self, t0: f64, t1: f64) -> Aabb {
        linear_bounds(&self.origin, &self.direction, t0, t1)
    }

    fn is_degenerate(&self, _epsilon: f64) -> bool {
        false
    }

    fn is_linear(&self, _epsilon: f64) -> bool {
        true
    }

    fn locate(&self, p: &Point2, epsilon: f64) -> Option<f64> {
        let v = p - self.origin;
        let t = v.dot(&self.direction);
        (t >= -epsilon && cross(&self.direction, &v).abs() <= epsilon).then(|| t.max(0.0))
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Segment {
        if t1.is_finite() {
            LineSegment::new(self.point_at(t0), self.point_at(t1)).into()
        } else {
            Ray::from_unit(self.point_at(t0), self.direction).into()
        }
    }
}
