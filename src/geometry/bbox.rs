use crate::math::Point2;

/// An axis-aligned bounding box. Bounds may be infinite for unbounded curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl Aabb {
    #[must_use]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point; `None` for an empty iterator.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(*first, *first);
        for p in iter {
            bbox.include(p);
        }
        Some(bbox)
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: &Point2) {
        self.min = Point2::new(self.min.x.min(p.x), self.min.y.min(p.y));
        self.max = Point2::new(self.max.x.max(p.x), self.max.y.max(p.y));
    }

    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        out.include(&other.min);
        out.include(&other.max);
        out
    }

    /// Returns true if the two boxes overlap once each is grown by `epsilon`.
    #[must_use]
    pub fn intersects(&self, other: &Aabb, epsilon: f64) -> bool {
        self.min.x <= other.max.x + epsilon
            && other.min.x <= self.max.x + epsilon
            && self.min.y <= other.max.y + epsilon
            && other.min.y <= self.max.y + epsilon
    }

    /// Returns true if `p` lies in the box grown by `epsilon`.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, epsilon: f64) -> bool {
        p.x >= self.min.x - epsilon
            && p.x <= self.max.x + epsilon
            && p.y >= self.min.y - epsilon
            && p.y <= self.max.y + epsilon
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// The larger of width and height.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.width().max(self.height())
    }

    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.min.x.is_finite() && self.min.y.is_finite() && self.max.x.is_finite() && self.max.y.is_finite()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_points_spans_all() {
        let pts = [Point2::new(1.0, 5.0), Point2::new(-2.0, 0.0), Point2::new(3.0, 1.0)];
        let b = Aabb::from_points(&pts).unwrap();
        assert_eq!(b.min, Point2::new(-2.0, 0.0));
        assert_eq!(b.max, Point2::new(3.0, 5.0));
        assert!((b.extent() - 5.0).abs() < 1e-12);
        assert!(Aabb::from_points(&[] as &[Point2]).is_none());
    }

    #[test]
    fn touching_boxes_intersect() {
        let a = Aabb::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let b = Aabb::new(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0));
        let c = Aabb::new(Point2::new(1.5, 1.5), Point2::new(2.0, 2.0));
        assert!(a.intersects(&b, 1e-10));
        assert!(!a.intersects(&c, 1e-10));
    }

    #[test]
    fn infinite_box_is_unbounded() {
        let b = Aabb::new(Point2::new(0.0, f64::NEG_INFINITY), Point2::new(0.0, f64::INFINITY));
        assert!(!b.is_bounded());
        assert!(b.contains_point(&Point2::new(0.0, 1e9), 1e-10));
    }
}
