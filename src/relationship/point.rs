use crate::config::Config;
use crate::geometry::{Composite, Curve};
use crate::math::Point2;

/// The relationship between a single point and a composite shape.
pub struct PointRelationship<'a, S: ?Sized> {
    point: Point2,
    shape: &'a S,
    config: Config,
}

impl<'a, S: Composite + ?Sized> PointRelationship<'a, S> {
    #[must_use]
    pub fn new(point: Point2, shape: &'a S) -> Self {
        Self::with_config(point, shape, Config::global())
    }

    #[must_use]
    pub fn with_config(point: Point2, shape: &'a S, config: Config) -> Self {
        Self { point, shape, config }
    }

    /// Returns true if the point lies on one of the shape's segments.
    #[must_use]
    pub fn on(&self) -> bool {
        let eps = self.config.epsilon();
        self.shape
            .segments(false)
            .iter()
            .any(|s| s.locate(&self.point, eps).is_some())
    }

    /// Strictly inside the area of a closed shape. `None` for open or
    /// degenerate shapes.
    #[must_use]
    pub fn inside(&self) -> Option<bool> {
        self.has_area()
            .then(|| self.shape.is_point_inside(&self.point, self.config.epsilon()))
    }

    /// Strictly outside the area of a closed shape. `None` for open or
    /// degenerate shapes.
    #[must_use]
    pub fn outside(&self) -> Option<bool> {
        self.has_area()
            .then(|| self.shape.is_point_outside(&self.point, self.config.epsilon()))
    }

    /// Neither on the shape nor inside it. `None` for degenerate shapes.
    #[must_use]
    pub fn separate(&self) -> Option<bool> {
        if self.shape.dimensionally_degenerate(self.config.epsilon()) {
            return None;
        }
        Some(!self.on() && !self.inside().unwrap_or(false))
    }

    fn has_area(&self) -> bool {
        self.shape.is_closed() && !self.shape.dimensionally_degenerate(self.config.epsilon())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{LineSegment, Path, Polygon, Segment};

    fn square() -> Polygon {
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn point_against_square() {
        let shape = square();
        let center = PointRelationship::new(Point2::new(1.0, 1.0), &shape);
        assert_eq!(center.inside(), Some(true));
        assert_eq!(center.outside(), Some(false));
        assert!(!center.on());
        assert_eq!(center.separate(), Some(false));

        let edge = PointRelationship::new(Point2::new(2.0, 1.0), &shape);
        assert!(edge.on());
        assert_eq!(edge.inside(), Some(false));
        assert_eq!(edge.outside(), Some(false));

        let far = PointRelationship::new(Point2::new(5.0, 1.0), &shape);
        assert_eq!(far.outside(), Some(true));
        assert_eq!(far.separate(), Some(true));
    }

    #[test]
    fn open_shapes_have_no_inside() {
        let path = Path::from_points(&[Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(2.0, 2.0)], false)
            .unwrap();
        let rel = PointRelationship::new(Point2::new(1.5, 0.5), &path);
        assert_eq!(rel.inside(), None);
        assert_eq!(rel.outside(), None);
        assert_eq!(rel.separate(), Some(true));

        let corner = PointRelationship::new(Point2::new(2.0, 0.0), &path);
        assert!(corner.on());
        assert_eq!(corner.separate(), Some(false));
    }

    #[test]
    fn degenerate_shape_gives_no_answer() {
        let dot: Segment = LineSegment::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0)).into();
        let rel = PointRelationship::new(Point2::new(1.0, 1.0), &dot);
        assert_eq!(rel.separate(), None);
        assert_eq!(rel.inside(), None);
    }
}
