use crate::config;
use crate::error::{GeometryError, Result};
use crate::geometry::{Aabb, LineSegment, Segment};
use crate::math::polygon_2d::{locate_point_in_polygon, signed_area_2d, PointLocation};
use crate::math::tolerance::points_equal;
use crate::math::Point2;

use super::Composite;

/// A closed polygon with straight edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from its vertices in order.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two vertices are given or any
    /// coordinate is not finite.
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "polygon needs at least 2 vertices, got {}",
                vertices.len()
            ))
            .into());
        }
        if vertices.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::Degenerate("polygon vertex is not finite".into()).into());
        }
        Ok(Self { vertices })
    }

    /// Signed area; positive for counter-clockwise vertex order.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    /// Location of `p` relative to the polygon.
    #[must_use]
    pub fn locate(&self, p: &Point2, epsilon: f64) -> PointLocation {
        locate_point_in_polygon(p, &self.vertices, epsilon)
    }
}

impl Composite for Polygon {
    fn segments(&self, _force_closed: bool) -> Vec<Segment> {
        let eps = config::epsilon();
        let n = self.vertices.len();
        (0..n)
            .map(|i| (self.vertices[i], self.vertices[(i + 1) % n]))
            // Repeated vertices would produce zero-length edges.
            .filter(|(a, b)| !points_equal(a, b, eps))
            .map(|(a, b)| LineSegment::new(a, b).into())
            .collect()
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn vertices(&self) -> Vec<Point2> {
        self.vertices.clone()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.vertices)
    }

    fn dimensionally_degenerate(&self, epsilon: f64) -> bool {
        let first = self.vertices[0];
        if self.vertices.iter().all(|p| points_equal(p, &first, epsilon)) {
            return true;
        }
        let scale = self.bounding_box().map_or(1.0, |b| b.extent().max(1.0));
        self.signed_area().abs() <= epsilon * scale
    }

    fn is_point_inside(&self, p: &Point2, epsilon: f64) -> bool {
        self.locate(p, epsilon) == PointLocation::Inside
    }

    fn is_point_outside(&self, p: &Point2, epsilon: f64) -> bool {
        self.locate(p, epsilon) == PointLocation::Outside
    }
}
