use crate::error::{GeometryError, Result};
use crate::geometry::Aabb;
use crate::math::vector_2d::{cross, unit};
use crate::math::{Point2, Vector2};

use super::{linear_bounds, Curve, CurveDomain, Ray, Segment};

/// An infinite line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`, with a unit
/// direction so that `t` measures distance from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    origin: Point2,
    direction: Vector2,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point2, direction: Vector2) -> Result<Self> {
        let direction = unit(&direction, 0.0).ok_or(GeometryError::ZeroVector)?;
        Ok(Self { origin, direction })
    }

    /// Creates the line through two distinct points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn through(a: Point2, b: Point2) -> Result<Self> {
        Self::new(a, b - a)
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }
}

impl Curve for Line {
    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
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
        (cross(&self.direction, &v).abs() <= epsilon).then(|| v.dot(&self.direction))
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Segment {
        match (t0.is_finite(), t1.is_finite()) {
            (true, true) => super::LineSegment::new(self.point_at(t0), self.point_at(t1)).into(),
            (true, false) => ray_from(self.point_at(t0), self.direction * t1.signum()),
            (false, true) => ray_from(self.point_at(t1), self.direction * t0.signum()),
            (false, false) => self.clone().into(),
        }
    }
}

fn ray_from(origin: Point2, direction: Vector2) -> Segment {
    // The direction is a signed copy of a unit vector, never zero.
    Ray::from_unit(origin, direction).into()
}
