use crate::geometry::{Curve, Segment};

use super::arc_arc::same_circle;
use super::Overlap;

/// Interior fractions of a candidate range that must lie on both curves.
const SAMPLES: [f64; 3] = [0.25, 0.5, 0.75];

/// Shared pieces of two curves, at least one of them bounded.
///
/// Every end of one curve that lies on the other is an anchor. Consecutive
/// anchors (ordered along `a`) bound a shared piece when sampled interior
/// points of `a` between them also lie on `b`.
pub(super) fn overlaps(a: &Segment, b: &Segment, epsilon: f64) -> Vec<Overlap> {
    if let (Segment::Arc(x), Segment::Arc(y)) = (a, b) {
        if !same_circle(x, y, epsilon) {
            return Vec::new();
        }
    }

    let mut anchors: Vec<(f64, f64)> = Vec::new();
    let da = a.domain();
    for t in [da.start, da.end].into_iter().filter(|t| t.is_finite()) {
        if let Some(u) = b.locate(&a.point_at(t), epsilon) {
            anchors.push((t, u));
        }
    }
    let db = b.domain();
    for u in [db.start, db.end].into_iter().filter(|u| u.is_finite()) {
        if let Some(t) = a.locate(&b.point_at(u), epsilon) {
            anchors.push((t, u));
        }
    }
    if anchors.len() < 2 {
        return Vec::new();
    }
    anchors.sort_by(|x, y| x.0.total_cmp(&y.0));
    // Anchors closer than `epsilon` along `a` are one anchor. The ends of a
    // closed arc coincide in space but not in parameter.
    anchors.dedup_by(|later, earlier| {
        (later.0 - earlier.0).abs() * a.derivative_at(earlier.0).norm() <= epsilon
    });

    anchors
        .windows(2)
        .filter_map(|pair| {
            let ((t0, u0), (t1, u1)) = (pair[0], pair[1]);
            if a.bounding_box_between(t0, t1).extent() <= epsilon {
                return None;
            }
            let shared = SAMPLES
                .iter()
                .all(|f| b.locate(&a.point_at(t0 + (t1 - t0) * f), epsilon).is_some());
            shared.then_some(Overlap {
                a: (t0, t1),
                b: (u0, u1),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Arc, CubicBezier, LineSegment};
    use crate::math::Point2;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn arcs_on_one_circle_share_two_pieces() {
        let a: Segment = Arc::new(Point2::origin(), 1.0, 0.0, 3.0 * FRAC_PI_2).unwrap().into();
        let b: Segment = Arc::new(Point2::origin(), 1.0, PI, 5.0 * FRAC_PI_2).unwrap().into();
        let shared = overlaps(&a, &b, 1e-10);
        assert_eq!(shared.len(), 2);
        assert_abs_diff_eq!(shared[0].a.0, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shared[0].a.1, FRAC_PI_2, epsilon = 1e-9);
        assert_abs_diff_eq!(shared[1].a.0, PI, epsilon = 1e-9);
        assert_abs_diff_eq!(shared[1].a.1, 3.0 * FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn bezier_shares_its_own_half() {
        let whole = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 2.0),
            Point2::new(4.0, 0.0),
        );
        let (left, _) = whole.split(0.5);
        let shared = overlaps(&whole.clone().into(), &left.into(), 1e-10);
        assert_eq!(shared.len(), 1);
        assert_abs_diff_eq!(shared[0].a.0, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shared[0].a.1, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn identical_full_circles_share_one_piece() {
        let a: Segment = Arc::new(Point2::new(3.0, 1.0), 2.0, 0.0, 2.0 * PI).unwrap().into();
        let shared = overlaps(&a, &a.clone(), 1e-10);
        assert_eq!(shared.len(), 1);
        assert_abs_diff_eq!(shared[0].a.0, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shared[0].a.1, 2.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn chord_does_not_coincide_with_arc() {
        let arc: Segment = Arc::new(Point2::origin(), 1.0, 0.0, PI).unwrap().into();
        let chord: Segment = LineSegment::new(Point2::new(1.0, 0.0), Point2::new(-1.0, 0.0)).into();
        assert!(overlaps(&arc, &chord, 1e-10).is_empty());
    }
}
