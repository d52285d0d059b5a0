mod path;
mod polygon;

pub use path::{Path, PathVertex};
pub use polygon::Polygon;

use crate::geometry::{Aabb, Curve, Segment};
use crate::math::Point2;

/// Capability interface of a composite curve: an ordered, optionally closed
/// sequence of basic segments.
pub trait Composite {
    /// The ordered segment list. With `force_closed` an open shape gains a
    /// closing segment back to its first vertex.
    fn segments(&self, force_closed: bool) -> Vec<Segment>;

    /// Returns whether the last segment connects back to the first.
    fn is_closed(&self) -> bool;

    /// The shape's vertices in order.
    fn vertices(&self) -> Vec<Point2>;

    /// Bounding box, or `None` for an empty shape.
    fn bounding_box(&self) -> Option<Aabb> {
        self.segments(false)
            .iter()
            .map(Curve::bounding_box)
            .reduce(|a, b| a.union(&b))
    }

    /// Returns true if the shape collapses to something of lower dimension
    /// (a point, or a closed shape with no area).
    fn dimensionally_degenerate(&self, epsilon: f64) -> bool;

    /// Returns true if `p` lies strictly inside a closed shape.
    fn is_point_inside(&self, p: &Point2, epsilon: f64) -> bool;

    /// Returns true if `p` lies strictly outside a closed shape.
    fn is_point_outside(&self, p: &Point2, epsilon: f64) -> bool;
}

/// A lone basic segment is an open composite of length one.
impl Composite for Segment {
    fn segments(&self, _force_closed: bool) -> Vec<Segment> {
        vec![self.clone()]
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn vertices(&self) -> Vec<Point2> {
        self.start_point().into_iter().chain(self.end_point()).collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(Curve::bounding_box(self))
    }

    fn dimensionally_degenerate(&self, epsilon: f64) -> bool {
        self.is_degenerate(epsilon)
    }

    fn is_point_inside(&self, _p: &Point2, _epsilon: f64) -> bool {
        false
    }

    fn is_point_outside(&self, _p: &Point2, _epsilon: f64) -> bool {
        false
    }
}
