use tracing::debug;

use crate::config;
use crate::error::{GeometryError, Result};
use crate::geometry::{Arc, Curve, LineSegment, Ray, Segment};
use crate::math::polygon_2d::PointLocation;
use crate::math::tolerance::points_equal;
use crate::math::vector_2d::cross;
use crate::math::{Point2, Vector2};
use crate::relationship::solver::intersect;

use super::Composite;

/// Ray directions for point location, chosen away from the axes so that
/// axis-aligned vertices rarely sit on a ray.
const RAY_ANGLES: [f64; 3] = [0.317, 2.093, 4.411];

/// Bulge-encoded vertex of a path with mixed straight and arc segments.
///
/// `bulge = tan(sweep / 4)`:
/// - `0` = straight line to the next vertex
/// - `> 0` = counter-clockwise arc to the next vertex
/// - `< 0` = clockwise arc to the next vertex
/// - `|bulge| = 1` = semicircle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathVertex {
    pub point: Point2,
    pub bulge: f64,
}

impl PathVertex {
    #[must_use]
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self {
            point: Point2::new(x, y),
            bulge,
        }
    }

    /// A vertex followed by a straight segment.
    #[must_use]
    pub fn line(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }
}

/// An ordered chain of bounded basic segments, open or closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
    closed: bool,
}

impl Path {
    /// Creates a path from consecutive segments.
    ///
    /// A closed path whose last segment does not end at the first start point
    /// is closed with a straight segment.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is empty, contains an unbounded curve,
    /// or a segment does not start where the previous one ends.
    pub fn new(segments: Vec<Segment>, closed: bool) -> Result<Self> {
        if segments.is_empty() {
            return Err(GeometryError::Degenerate("path has no segments".into()).into());
        }
        if let Some(s) = segments.iter().find(|s| !s.domain().is_bounded()) {
            return Err(GeometryError::Degenerate(format!("path cannot contain an unbounded {}", s.kind())).into());
        }
        let eps = config::epsilon();
        for (i, pair) in segments.windows(2).enumerate() {
            let (Some(end), Some(start)) = (pair[0].end_point(), pair[1].start_point()) else {
                continue;
            };
            if !points_equal(&end, &start, eps) {
                return Err(GeometryError::Degenerate(format!(
                    "segment {} starts at ({}, {}) but segment {i} ends at ({}, {})",
                    i + 1,
                    start.x,
                    start.y,
                    end.x,
                    end.y
                ))
                .into());
            }
        }
        Ok(Self { segments, closed })
    }

    /// Builds a path of lines and arcs from bulge-encoded vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two vertices are given.
    pub fn from_bulge_vertices(vertices: &[PathVertex], closed: bool) -> Result<Self> {
        let n = vertices.len();
        if n < 2 {
            return Err(GeometryError::Degenerate(format!("path needs at least 2 vertices, got {n}")).into());
        }
        let eps = config::epsilon();
        let count = if closed { n } else { n - 1 };
        let mut segments = Vec::with_capacity(count);
        for i in 0..count {
            let v0 = &vertices[i];
            let v1 = &vertices[(i + 1) % n];
            if points_equal(&v0.point, &v1.point, eps) {
                continue;
            }
            let segment = if v0.bulge.abs() <= eps {
                LineSegment::new(v0.point, v1.point).into()
            } else {
                Arc::from_bulge(v0.point, v1.point, v0.bulge)?.into()
            };
            segments.push(segment);
        }
        Self::new(segments, closed)
    }

    /// Builds an open or closed polyline through `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points are given.
    pub fn from_points(points: &[Point2], closed: bool) -> Result<Self> {
        let vertices: Vec<PathVertex> = points.iter().map(|p| PathVertex::line(p.x, p.y)).collect();
        Self::from_bulge_vertices(&vertices, closed)
    }

    /// The same path traversed backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let segments = self
            .segments
            .iter()
            .rev()
            .map(|s| {
                let d = s.domain();
                s.subcurve(d.end, d.start)
            })
            .collect();
        Self {
            segments,
            closed: self.closed,
        }
    }

    /// Number of segments, excluding any implicit closing segment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Location of `p` relative to the area bounded by the closed path.
    #[must_use]
    pub fn locate(&self, p: &Point2, epsilon: f64) -> PointLocation {
        let segments = self.segments(true);
        if segments.iter().any(|s| s.locate(p, epsilon).is_some()) {
            return PointLocation::OnBoundary;
        }
        for angle in RAY_ANGLES {
            let dir = Vector2::new(angle.cos(), angle.sin());
            if let RayCastResult::Clear(location) = ray_cast_classify(p, &dir, &segments, epsilon) {
                return location;
            }
        }
        debug!(x = p.x, y = p.y, "every ray grazed the path; treating point as outside");
        PointLocation::Outside
    }

    fn first_point(&self) -> Option<Point2> {
        self.segments.first().and_then(Segment::start_point)
    }

    fn last_point(&self) -> Option<Point2> {
        self.segments.last().and_then(Segment::end_point)
    }
}

enum RayCastResult {
    Clear(PointLocation),
    Degenerate,
}

/// Counts transversal crossings of the ray with the path. Hits at a
/// segment end or along a tangent make the ray degenerate.
fn ray_cast_classify(p: &Point2, dir: &Vector2, segments: &[Segment], epsilon: f64) -> RayCastResult {
    let ray: Segment = Ray::from_unit(*p, *dir).into();
    let mut crossings = 0u32;
    for segment in segments {
        let domain = segment.domain();
        for hit in intersect(&ray, segment, epsilon) {
            if domain.is_start(hit.t_b, epsilon) || domain.is_end(hit.t_b, epsilon) {
                return RayCastResult::Degenerate;
            }
            let Ok(tangent) = segment.tangent_at(hit.t_b) else {
                return RayCastResult::Degenerate;
            };
            if cross(dir, &tangent).abs() < 1e-6 {
                return RayCastResult::Degenerate;
            }
            crossings += 1;
        }
    }
    RayCastResult::Clear(if crossings % 2 == 1 {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    })
}

impl Composite for Path {
    fn segments(&self, force_closed: bool) -> Vec<Segment> {
        let mut segments = self.segments.clone();
        if self.closed || force_closed {
            if let (Some(first), Some(last)) = (self.first_point(), self.last_point()) {
                if !points_equal(&first, &last, config::epsilon()) {
                    segments.push(LineSegment::new(last, first).into());
                }
            }
        }
        segments
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn vertices(&self) -> Vec<Point2> {
        let mut points: Vec<Point2> = self.segments.iter().filter_map(Segment::start_point).collect();
        if !self.closed {
            points.extend(self.last_point());
        }
        points
    }

    fn dimensionally_degenerate(&self, epsilon: f64) -> bool {
        if self.segments.iter().all(|s| s.is_degenerate(epsilon)) {
            return true;
        }
        if !self.closed {
            return false;
        }
        // A closed path with no enclosed area: all segments straight and
        // collinear, or a single arc that does not turn.
        let segments = self.segments(true);
        let Some(anchor) = self.first_point() else {
            return true;
        };
        let straight = segments.iter().all(|s| s.is_linear(epsilon));
        if !straight {
            return segments.iter().all(|s| match s {
                Segment::Arc(a) => (a.sweep() * a.radius()).abs() <= epsilon,
                _ => s.is_linear(epsilon),
            });
        }
        let Some(far) = self
            .vertices()
            .into_iter()
            .max_by(|a, b| (a - anchor).norm().total_cmp(&(b - anchor).norm()))
        else {
            return true;
        };
        let axis = far - anchor;
        let len = axis.norm();
        if len <= epsilon {
            return true;
        }
        let dir = axis / len;
        self.vertices()
            .iter()
            .all(|v| cross(&dir, &(v - anchor)).abs() <= epsilon * len.max(1.0))
    }

    fn is_point_inside(&self, p: &Point2, epsilon: f64) -> bool {
        self.closed && self.locate(p, epsilon) == PointLocation::Inside
    }

    fn is_point_outside(&self, p: &Point2, epsilon: f64) -> bool {
        self.closed && self.locate(p, epsilon) == PointLocation::Outside
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn d_shape() -> Path {
        // Straight edge along the x axis, closed by a counter-clockwise
        // semicircle through (1, 1).
        Path::from_bulge_vertices(&[PathVertex::new(0.0, 0.0, 0.0), PathVertex::new(2.0, 0.0, 1.0)], true)
            .unwrap()
    }

    #[test]
    fn bulge_vertices_build_lines_and_arcs() {
        let path = d_shape();
        assert_eq!(path.len(), 2);
        assert!(matches!(path.segments(false)[1], Segment::Arc(_)));
        let Segment::Arc(arc) = &path.segments(false)[1] else {
            unreachable!()
        };
        assert_abs_diff_eq!(arc.radius(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn discontinuous_segments_rejected() {
        let a = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let b = LineSegment::new(Point2::new(2.0, 0.0), Point2::new(3.0, 0.0));
        assert!(Path::new(vec![a.into(), b.into()], false).is_err());
    }

    #[test]
    fn unbounded_segment_rejected() {
        let ray = Ray::new(Point2::origin(), Vector2::new(1.0, 0.0)).unwrap();
        assert!(Path::new(vec![ray.into()], false).is_err());
    }

    #[test]
    fn closing_segment_added_on_demand() {
        let path = Path::from_points(
            &[Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(2.0, 2.0)],
            false,
        )
        .unwrap();
        assert_eq!(path.segments(false).len(), 2);
        assert_eq!(path.segments(true).len(), 3);
        assert_eq!(path.vertices().len(), 3);
    }

    #[test]
    fn point_inside_curved_path() {
        let path = d_shape();
        let arc = &path.segments(false)[1];
        let top = arc.point_at(arc.domain().lerp(0.5));
        let inside = Point2::new(1.0, top.y * 0.5);
        assert!(path.is_point_inside(&inside, 1e-10));
        assert!(path.is_point_outside(&Point2::new(1.0, -top.y), 1e-10));
        assert!(path.is_point_outside(&Point2::new(5.0, 0.0), 1e-10));
        assert_eq!(path.locate(&Point2::new(1.0, 0.0), 1e-10), PointLocation::OnBoundary);
    }

    #[test]
    fn open_path_has_no_inside() {
        let path = Path::from_points(
            &[Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(2.0, 2.0)],
            false,
        )
        .unwrap();
        let p = Point2::new(1.5, 0.5);
        assert!(!path.is_point_inside(&p, 1e-10));
        assert!(!path.is_point_outside(&p, 1e-10));
    }

    #[test]
    fn reversed_path_walks_backwards() {
        let path = d_shape();
        let rev = path.reversed();
        assert_eq!(rev.len(), 2);
        let first = rev.segments(false)[0].start_point().unwrap();
        assert_abs_diff_eq!(first, Point2::new(0.0, 0.0), epsilon = 1e-12);
        assert!(matches!(rev.segments(false)[0], Segment::Arc(_)));
    }

    #[test]
    fn collinear_closed_path_is_degenerate() {
        let path = Path::from_points(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(3.0, 0.0)],
            true,
        )
        .unwrap();
        assert!(path.dimensionally_degenerate(1e-10));
        assert!(!d_shape().dimensionally_degenerate(1e-10));
    }
}
