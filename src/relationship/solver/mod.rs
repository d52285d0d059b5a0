//! Pairwise intersection of basic segments.
//!
//! Each pair of curve kinds gets its own strategy: closed-form solves for
//! straight pieces, implicit substitution for a line against a Bézier curve,
//! circle equations for arcs, and bounding-box subdivision with Newton
//! refinement for everything curved on both sides. Overlapping (coincident)
//! pieces are detected first; when two curves coincide, their intersection
//! records are the ends of the shared pieces.

mod arc_arc;
mod coincide;
mod line_arc;
mod line_bezier;
mod line_line;
mod subdivision;

use crate::geometry::{Arc, CubicBezier, Curve, CurveDomain, LineSegment, Segment};
use crate::math::vector_2d::cross;
use crate::math::{Point2, Vector2};

/// A point shared by two curves, with its parameter on each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Point2,
    /// Parameter on the first curve, in that curve's own domain.
    pub t_a: f64,
    /// Parameter on the second curve, in that curve's own domain.
    pub t_b: f64,
}

impl Intersection {
    fn swapped(self) -> Self {
        Self {
            point: self.point,
            t_a: self.t_b,
            t_b: self.t_a,
        }
    }
}

/// A parameter range over which two curves share their trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Overlap {
    /// Range on the first curve, ascending.
    pub a: (f64, f64),
    /// Matching range on the second curve; `b.0` pairs with `a.0`.
    pub b: (f64, f64),
}

/// All intersection points of two basic segments.
///
/// Degenerate segments never intersect anything.
#[must_use]
pub fn intersect(a: &Segment, b: &Segment, epsilon: f64) -> Vec<Intersection> {
    if a.is_degenerate(epsilon) || b.is_degenerate(epsilon) {
        return Vec::new();
    }
    if !a.bounding_box().intersects(&b.bounding_box(), epsilon) {
        return Vec::new();
    }
    let shared = overlaps(a, b, epsilon);
    if !shared.is_empty() {
        return overlap_ends(a, &shared);
    }
    solve(a, b, epsilon)
}

/// The pieces of `a` whose trace `b` shares.
#[must_use]
pub fn coincide(a: &Segment, b: &Segment, epsilon: f64) -> Vec<Segment> {
    if a.is_degenerate(epsilon) || b.is_degenerate(epsilon) {
        return Vec::new();
    }
    if !a.bounding_box().intersects(&b.bounding_box(), epsilon) {
        return Vec::new();
    }
    overlaps(a, b, epsilon)
        .into_iter()
        .map(|o| a.subcurve(o.a.0, o.a.1))
        .collect()
}

/// Returns `Some(true)` if the two segments share no point, `None` if either
/// is degenerate.
#[must_use]
pub fn separate(a: &Segment, b: &Segment, epsilon: f64) -> Option<bool> {
    if a.is_degenerate(epsilon) || b.is_degenerate(epsilon) {
        return None;
    }
    Some(intersect(a, b, epsilon).is_empty() && coincide(a, b, epsilon).is_empty())
}

pub(crate) fn overlaps(a: &Segment, b: &Segment, epsilon: f64) -> Vec<Overlap> {
    match (Linear::of(a), Linear::of(b)) {
        (Some(la), Some(lb)) => line_line::overlap(&la, &lb, epsilon)
            .filter(|o| !is_point_range(a, o, epsilon))
            .into_iter()
            .collect(),
        _ => coincide::overlaps(a, b, epsilon),
    }
}

fn is_point_range(a: &Segment, o: &Overlap, epsilon: f64) -> bool {
    let (t0, t1) = o.a;
    t0.is_finite() && t1.is_finite() && (a.point_at(t1) - a.point_at(t0)).norm() <= epsilon
}

fn overlap_ends(a: &Segment, shared: &[Overlap]) -> Vec<Intersection> {
    shared
        .iter()
        .flat_map(|o| [(o.a.0, o.b.0), (o.a.1, o.b.1)])
        .filter(|(t, u)| t.is_finite() && u.is_finite())
        .map(|(t_a, t_b)| Intersection {
            point: a.point_at(t_a),
            t_a,
            t_b,
        })
        .collect()
}

/// A straight piece `origin + t * dir` over `domain`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Linear {
    pub origin: Point2,
    pub dir: Vector2,
    pub domain: CurveDomain,
}

impl Linear {
    /// The parametric form of a segment, ray or line. Its parameter is the
    /// curve's own parameter.
    pub fn of(s: &Segment) -> Option<Self> {
        match s {
            Segment::LineSegment(seg) => Some(Self {
                origin: seg.start,
                dir: seg.delta(),
                domain: CurveDomain::unit(),
            }),
            Segment::Ray(r) => Some(Self {
                origin: *r.origin(),
                dir: *r.direction(),
                domain: r.domain(),
            }),
            Segment::Line(l) => Some(Self {
                origin: *l.origin(),
                dir: *l.direction(),
                domain: l.domain(),
            }),
            _ => None,
        }
    }

    /// The straight span covering a Bézier curve whose control points are
    /// collinear. Its parameter is arc length along the span.
    fn support(curve: &CubicBezier) -> Option<Self> {
        let mut axis = (curve.points[0], curve.points[3]);
        let mut best = 0.0;
        for i in 0..4 {
            for j in i + 1..4 {
                let len = (curve.points[j] - curve.points[i]).norm();
                if len > best {
                    best = len;
                    axis = (curve.points[i], curve.points[j]);
                }
            }
        }
        if best == 0.0 {
            return None;
        }
        let dir = (axis.1 - axis.0) / best;
        let (lo, hi) = curve
            .points
            .iter()
            .map(|p| (p - axis.0).dot(&dir))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self {
            origin: axis.0,
            dir,
            domain: CurveDomain::new(lo, hi),
        })
    }

    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.dir * t
    }

    /// Parameter slack that corresponds to `epsilon` along the piece.
    pub fn slack(&self, epsilon: f64) -> f64 {
        epsilon / self.dir.norm()
    }

    /// Parameter of the foot of the perpendicular from `p`.
    pub fn project(&self, p: &Point2) -> f64 {
        (p - self.origin).dot(&self.dir) / self.dir.norm_squared()
    }

    /// Distance from `p` to the supporting line.
    pub fn distance(&self, p: &Point2) -> f64 {
        cross(&self.dir, &(p - self.origin)).abs() / self.dir.norm()
    }
}

/// How the solver sees a segment.
enum View<'a> {
    Linear(Linear),
    /// A Bézier curve that is straight; intersected through its support.
    Flat {
        curve: &'a Segment,
        support: Linear,
    },
    Bezier(CubicBezier),
    Arc(&'a Arc),
}

fn view(s: &Segment, epsilon: f64) -> Option<View<'_>> {
    let bezier = match s {
        Segment::Arc(arc) => return Some(View::Arc(arc)),
        Segment::Bezier(c) => c.clone(),
        Segment::QuadraticBezier(q) => q.to_cubic(),
        _ => return Linear::of(s).map(View::Linear),
    };
    if bezier.is_linear(epsilon) {
        let support = Linear::support(&bezier)?;
        return Some(View::Flat { curve: s, support });
    }
    Some(View::Bezier(bezier))
}

fn solve(a: &Segment, b: &Segment, epsilon: f64) -> Vec<Intersection> {
    let (Some(va), Some(vb)) = (view(a, epsilon), view(b, epsilon)) else {
        return Vec::new();
    };
    match (va, vb) {
        (View::Flat { curve, support }, _) => through_support(curve, &support, b, epsilon),
        (_, View::Flat { curve, support }) => through_support(curve, &support, a, epsilon)
            .into_iter()
            .map(Intersection::swapped)
            .collect(),
        (View::Linear(la), View::Linear(lb)) => line_line::intersect(&la, &lb, epsilon),
        (View::Linear(l), View::Bezier(c)) => line_bezier::intersect(&l, &c, epsilon),
        (View::Bezier(c), View::Linear(l)) => swap_all(line_bezier::intersect(&l, &c, epsilon)),
        (View::Linear(l), View::Arc(arc)) => line_arc::intersect(&l, arc, epsilon),
        (View::Arc(arc), View::Linear(l)) => swap_all(line_arc::intersect(&l, arc, epsilon)),
        (View::Arc(x), View::Arc(y)) => arc_arc::intersect(x, y, epsilon),
        (View::Bezier(_) | View::Arc(_), View::Bezier(_) | View::Arc(_)) => {
            subdivision::intersect(a, b, epsilon)
        }
    }
}

fn swap_all(records: Vec<Intersection>) -> Vec<Intersection> {
    records.into_iter().map(Intersection::swapped).collect()
}

/// Intersects `other` with the straight support of a flat Bézier curve, then
/// recovers the curve's own parameter of each hit.
fn through_support(curve: &Segment, support: &Linear, other: &Segment, epsilon: f64) -> Vec<Intersection> {
    let span: Segment = LineSegment::new(
        support.point_at(support.domain.start),
        support.point_at(support.domain.end),
    )
    .into();
    solve(&span, other, epsilon)
        .into_iter()
        .filter_map(|hit| {
            curve.locate(&hit.point, epsilon).map(|t_a| Intersection {
                point: hit.point,
                t_a,
                t_b: hit.t_b,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Line, QuadraticBezier, Ray};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-10;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        LineSegment::new(Point2::new(x0, y0), Point2::new(x1, y1)).into()
    }

    #[test]
    fn crossing_diagonals_meet_once() {
        let hits = intersect(&seg(0.0, 0.0, 2.0, 2.0), &seg(0.0, 2.0, 2.0, 0.0), EPS);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].point, Point2::new(1.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(hits[0].t_a, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(hits[0].t_b, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_segment_yields_nothing() {
        let dot = seg(1.0, 1.0, 1.0, 1.0);
        let other = seg(0.0, 0.0, 2.0, 2.0);
        assert!(intersect(&dot, &other, EPS).is_empty());
        assert!(coincide(&dot, &other, EPS).is_empty());
        assert_eq!(separate(&dot, &other, EPS), None);
    }

    #[test]
    fn collinear_overlap_reports_shared_piece() {
        let a = seg(0.0, 0.0, 4.0, 0.0);
        let b = seg(6.0, 0.0, 2.0, 0.0);
        let shared = coincide(&a, &b, EPS);
        assert_eq!(shared.len(), 1);
        let Segment::LineSegment(piece) = &shared[0] else {
            panic!("expected a line segment");
        };
        assert_abs_diff_eq!(piece.start, Point2::new(2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(piece.end, Point2::new(4.0, 0.0), epsilon = 1e-12);

        let hits = intersect(&a, &b, EPS);
        assert_eq!(hits.len(), 2);
        assert_eq!(separate(&a, &b, EPS), Some(false));
    }

    #[test]
    fn end_to_end_collinear_segments_touch_at_one_point() {
        let a = seg(0.0, 0.0, 1.0, 0.0);
        let b = seg(1.0, 0.0, 3.0, 0.0);
        assert!(coincide(&a, &b, EPS).is_empty());
        let hits = intersect(&a, &b, EPS);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].point, Point2::new(1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn parallel_segments_are_separate() {
        assert_eq!(separate(&seg(0.0, 0.0, 1.0, 0.0), &seg(0.0, 1.0, 1.0, 1.0), EPS), Some(true));
    }

    #[test]
    fn order_of_arguments_swaps_parameters() {
        let arc: Segment = Arc::new(Point2::origin(), 1.0, 0.0, PI).unwrap().into();
        let line = seg(-2.0, 0.5, 2.0, 0.5);
        let ab = intersect(&arc, &line, EPS);
        let ba = intersect(&line, &arc, EPS);
        assert_eq!(ab.len(), 2);
        assert_eq!(ba.len(), 2);
        for hit in &ab {
            let twin = ba
                .iter()
                .find(|h| (h.point - hit.point).norm() < 1e-9)
                .unwrap();
            assert_abs_diff_eq!(twin.t_a, hit.t_b, epsilon = 1e-9);
            assert_abs_diff_eq!(twin.t_b, hit.t_a, epsilon = 1e-9);
        }
    }

    #[test]
    fn flat_bezier_goes_through_its_support() {
        let flat: Segment = QuadraticBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        )
        .into();
        let line: Segment = Line::new(Point2::new(0.5, -1.0), Vector2::new(0.0, 1.0)).unwrap().into();
        let hits = intersect(&flat, &line, EPS);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].point, Point2::new(0.5, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(hits[0].t_a, 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(hits[0].t_b, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn ray_misses_what_lies_behind_it() {
        let ray: Segment = Ray::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0)).unwrap().into();
        assert!(intersect(&ray, &seg(-1.0, -1.0, -1.0, 1.0), EPS).is_empty());
        assert_eq!(intersect(&ray, &seg(5.0, -1.0, 5.0, 1.0), EPS).len(), 1);
    }
}
