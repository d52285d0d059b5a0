use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::Aabb;
use crate::math::arc_2d::{angle_to_arc_param, arc_bounds, arc_from_bulge, arc_point_at, arc_tangent_at};
use crate::math::{Point2, Vector2};

use super::{Curve, CurveDomain, Segment};

/// A circular arc in the plane.
///
/// The parameter is the polar angle around `center`. Traversal runs from
/// `start_angle` to `end_angle`: counter-clockwise when `end_angle >
/// start_angle`, clockwise otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    center: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or the sweep exceeds a
    /// full turn.
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        let sweep = end_angle - start_angle;
        if sweep.abs() > TAU {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "sweep",
                value: sweep,
                min: -TAU,
                max: TAU,
            }
            .into());
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Creates the arc from `p0` to `p1` whose sweep is `4·atan(bulge)`.
    ///
    /// # Errors
    ///
    /// Returns an error for zero-length chords or a zero bulge.
    pub fn from_bulge(p0: Point2, p1: Point2, bulge: f64) -> Result<Self> {
        let (center, radius, start, sweep) = arc_from_bulge(&p0, &p1, bulge)
            .ok_or_else(|| GeometryError::Degenerate("bulge arc has no curvature".into()))?;
        Self::new(center, radius, start, start + sweep)
    }

    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Signed sweep; positive for counter-clockwise arcs.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Maps the polar angle of a point on the circle to this arc's parameter.
    #[must_use]
    pub fn angle_param(&self, angle: f64, epsilon: f64) -> Option<f64> {
        angle_to_arc_param(angle, self.start_angle, self.sweep(), epsilon)
    }
}

impl Curve for Arc {
    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }

    fn point_at(&self, t: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, t)
    }

    fn derivative_at(&self, t: f64) -> Vector2 {
        // The parameter is the polar angle, whichever way the arc runs.
        arc_tangent_at(t, 1.0) * self.radius
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        Ok(arc_tangent_at(t, self.sweep()))
    }

    fn curvature_at(&self, _t: f64) -> f64 {
        if self.sweep() >= 0.0 {
            1.0 / self.radius
        } else {
            -1.0 / self.radius
        }
    }

    fn bounding_box_between(&self, t0: f64, t1: f64) -> Aabb {
        let (min, max) = arc_bounds(&self.center, self.radius, t0, t1);
        Aabb::new(min, max)
    }

    fn is_degenerate(&self, epsilon: f64) -> bool {
        self.radius <= epsilon || (self.sweep() * self.radius).abs() <= epsilon
    }

    fn is_linear(&self, _epsilon: f64) -> bool {
        false
    }

    fn locate(&self, p: &Point2, epsilon: f64) -> Option<f64> {
        let v = p - self.center;
        if (v.norm() - self.radius).abs() > epsilon {
            return None;
        }
        // Angular slack that corresponds to `epsilon` along the circle.
        self.angle_param(v.y.atan2(v.x), epsilon / self.radius)
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Segment {
        Arc {
            center: self.center,
            radius: self.radius,
            start_angle: t0,
            end_angle: t1,
        }
        .into()
    }
}
