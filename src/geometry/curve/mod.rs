mod arc;
mod bezier;
mod line;
mod line_segment;
mod quadratic_bezier;
mod ray;

pub use arc::Arc;
pub use bezier::CubicBezier;
pub use line::Line;
pub use line_segment::LineSegment;
pub use quadratic_bezier::QuadraticBezier;
pub use ray::Ray;

use crate::error::Result;
use crate::geometry::Aabb;
use crate::math::{Point2, Vector2};

/// Parameter domain for a curve.
///
/// `start` is where traversal begins and `end` where it stops. For clockwise
/// arcs `end < start`; unbounded curves use infinite ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    pub start: f64,
    pub end: f64,
}

impl CurveDomain {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The `[0, 1]` domain of segments and Bézier curves.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    #[must_use]
    pub fn lo(&self) -> f64 {
        self.start.min(self.end)
    }

    #[must_use]
    pub fn hi(&self) -> f64 {
        self.start.max(self.end)
    }

    /// Returns true if `t` lies in the domain, with `epsilon` slack.
    #[must_use]
    pub fn contains(&self, t: f64, epsilon: f64) -> bool {
        t >= self.lo() - epsilon && t <= self.hi() + epsilon
    }

    #[must_use]
    pub fn clamp(&self, t: f64) -> f64 {
        t.clamp(self.lo(), self.hi())
    }

    /// Returns true if `t` is within `epsilon` of the (finite) start.
    #[must_use]
    pub fn is_start(&self, t: f64, epsilon: f64) -> bool {
        self.start.is_finite() && (t - self.start).abs() <= epsilon
    }

    /// Returns true if `t` is within `epsilon` of the (finite) end.
    #[must_use]
    pub fn is_end(&self, t: f64, epsilon: f64) -> bool {
        self.end.is_finite() && (t - self.end).abs() <= epsilon
    }

    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// Parameter at fraction `f` of the way from start to end.
    #[must_use]
    pub fn lerp(&self, f: f64) -> f64 {
        self.start + (self.end - self.start) * f
    }
}

/// Capability interface every basic curve exposes to the relationship engine.
pub trait Curve {
    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Evaluates the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point2;

    /// Derivative of `point_at` with respect to `t`.
    fn derivative_at(&self, t: f64) -> Vector2;

    /// Unit tangent at `t` in the direction of traversal.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has no defined direction at `t`.
    fn tangent_at(&self, t: f64) -> Result<Vector2>;

    /// Signed curvature at `t`: positive when the curve bends to the left of
    /// its direction of traversal.
    fn curvature_at(&self, t: f64) -> f64;

    /// Bounding box of the whole curve.
    fn bounding_box(&self) -> Aabb {
        let d = self.domain();
        self.bounding_box_between(d.start, d.end)
    }

    /// Bounding box of the piece between two parameters.
    fn bounding_box_between(&self, t0: f64, t1: f64) -> Aabb;

    /// Returns true if the curve collapses to a single point.
    fn is_degenerate(&self, epsilon: f64) -> bool;

    /// Returns true if the curve's trace is a straight line.
    fn is_linear(&self, epsilon: f64) -> bool;

    /// Parameter of `p` on the curve, if `p` lies on it within `epsilon`.
    fn locate(&self, p: &Point2, epsilon: f64) -> Option<f64>;

    /// The piece of the curve between two parameters, as a basic segment.
    fn subcurve(&self, t0: f64, t1: f64) -> Segment;
}

/// A basic curve: one of the closed set of curve kinds the engine knows.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    LineSegment(LineSegment),
    Ray(Ray),
    Line(Line),
    Bezier(CubicBezier),
    QuadraticBezier(QuadraticBezier),
    Arc(Arc),
}

macro_rules! dispatch {
    ($self:ident, $curve:ident => $body:expr) => {
        match $self {
            Segment::LineSegment($curve) => $body,
            Segment::Ray($curve) => $body,
            Segment::Line($curve) => $body,
            Segment::Bezier($curve) => $body,
            Segment::QuadraticBezier($curve) => $body,
            Segment::Arc($curve) => $body,
        }
    };
}

impl Curve for Segment {
    fn domain(&self) -> CurveDomain {
        dispatch!(self, c => c.domain())
    }

    fn point_at(&self, t: f64) -> Point2 {
        dispatch!(self, c => c.point_at(t))
    }

    fn derivative_at(&self, t: f64) -> Vector2 {
        dispatch!(self, c => c.derivative_at(t))
    }

    fn tangent_at(&self, t: f64) -> Result<Vector2> {
        dispatch!(self, c => c.tangent_at(t))
    }

    fn curvature_at(&self, t: f64) -> f64 {
        dispatch!(self, c => c.curvature_at(t))
    }

    fn bounding_box(&self) -> Aabb {
        dispatch!(self, c => c.bounding_box())
    }

    fn bounding_box_between(&self, t0: f64, t1: f64) -> Aabb {
        dispatch!(self, c => c.bounding_box_between(t0, t1))
    }

    fn is_degenerate(&self, epsilon: f64) -> bool {
        dispatch!(self, c => c.is_degenerate(epsilon))
    }

    fn is_linear(&self, epsilon: f64) -> bool {
        dispatch!(self, c => c.is_linear(epsilon))
    }

    fn locate(&self, p: &Point2, epsilon: f64) -> Option<f64> {
        dispatch!(self, c => c.locate(p, epsilon))
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Segment {
        dispatch!(self, c => c.subcurve(t0, t1))
    }
}

impl Segment {
    /// Second derivative of `point_at` with respect to `t`.
    #[must_use]
    pub fn second_derivative_at(&self, t: f64) -> Vector2 {
        match self {
            Segment::Bezier(c) => c.second_derivative_at(t),
            Segment::QuadraticBezier(q) => q.to_cubic().second_derivative_at(t),
            Segment::Arc(a) => a.center() - a.point_at(t),
            Segment::LineSegment(_) | Segment::Ray(_) | Segment::Line(_) => Vector2::zeros(),
        }
    }

    /// Point at the start of the domain, if the domain starts finitely.
    #[must_use]
    pub fn start_point(&self) -> Option<Point2> {
        let d = self.domain();
        d.start.is_finite().then(|| self.point_at(d.start))
    }

    /// Point at the end of the domain, if the domain ends finitely.
    #[must_use]
    pub fn end_point(&self) -> Option<Point2> {
        let d = self.domain();
        d.end.is_finite().then(|| self.point_at(d.end))
    }

    /// Returns true for segments, rays and lines.
    #[must_use]
    pub fn is_line_family(&self) -> bool {
        matches!(self, Segment::LineSegment(_) | Segment::Ray(_) | Segment::Line(_))
    }

    /// Short name of the curve kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Segment::LineSegment(_) => "line segment",
            Segment::Ray(_) => "ray",
            Segment::Line(_) => "line",
            Segment::Bezier(_) => "bezier",
            Segment::QuadraticBezier(_) => "quadratic bezier",
            Segment::Arc(_) => "arc",
        }
    }
}

impl From<LineSegment> for Segment {
    fn from(s: LineSegment) -> Self {
        Segment::LineSegment(s)
    }
}

impl From<Ray> for Segment {
    fn from(r: Ray) -> Self {
        Segment::Ray(r)
    }
}

impl From<Line> for Segment {
    fn from(l: Line) -> Self {
        Segment::Line(l)
    }
}

impl From<CubicBezier> for Segment {
    fn from(b: CubicBezier) -> Self {
        Segment::Bezier(b)
    }
}

impl From<QuadraticBezier> for Segment {
    fn from(q: QuadraticBezier) -> Self {
        Segment::QuadraticBezier(q)
    }
}

impl From<Arc> for Segment {
    fn from(a: Arc) -> Self {
        Segment::Arc(a)
    }
}

/// Box around a straight piece between two points, possibly at infinity.
pub(crate) fn linear_bounds(origin: &Point2, dir: &Vector2, t0: f64, t1: f64) -> Aabb {
    let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
    let coord = |o: f64, d: f64, t: f64| {
        if d == 0.0 {
            o
        } else {
            o + d * t
        }
    };
    let ax = coord(origin.x, dir.x, lo);
    let bx = coord(origin.x, dir.x, hi);
    let ay = coord(origin.y, dir.y, lo);
    let by = coord(origin.y, dir.y, hi);
    Aabb::new(
        Point2::new(ax.min(bx), ay.min(by)),
        Point2::new(ax.max(bx), ay.max(by)),
    )
}
