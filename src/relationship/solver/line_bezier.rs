use crate::geometry::{CubicBezier, Curve};
use crate::math::polynomial::roots_in_range;
use crate::math::vector_2d::left_normal;

use super::{Intersection, Linear};

/// Intersection of a straight piece with a cubic Bézier curve.
///
/// The curve is substituted into the implicit equation of the line, which
/// leaves a cubic in the curve parameter whose value is the signed distance
/// from the line.
pub(super) fn intersect(line: &Linear, curve: &CubicBezier, epsilon: f64) -> Vec<Intersection> {
    let n = left_normal(&line.dir) / line.dir.norm();
    let c = curve.coefficients();
    let poly = [
        n.dot(&(c[0] - line.origin.coords)),
        n.dot(&c[1]),
        n.dot(&c[2]),
        n.dot(&c[3]),
    ];

    let slack = line.slack(epsilon);
    roots_in_range(&poly, 0.0, 1.0, epsilon)
        .into_iter()
        .filter_map(|u| {
            let point = curve.point_at(u);
            let t = line.project(&point);
            line.domain.contains(t, slack).then(|| Intersection {
                point,
                t_a: line.domain.clamp(t),
                t_b: u,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CurveDomain;
    use crate::math::{Point2, Vector2};
    use approx::assert_abs_diff_eq;

    fn arch() -> CubicBezier {
        CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
        )
    }

    fn horizontal(y: f64) -> Linear {
        Linear {
            origin: Point2::new(-1.0, y),
            dir: Vector2::new(4.0, 0.0),
            domain: CurveDomain::unit(),
        }
    }

    #[test]
    fn secant_hits_twice() {
        let hits = intersect(&horizontal(1.0), &arch(), 1e-10);
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert_abs_diff_eq!(hit.point.y, 1.0, epsilon = 1e-9);
            assert_abs_diff_eq!(arch().point_at(hit.t_b), hit.point, epsilon = 1e-12);
        }
    }

    #[test]
    fn tangent_at_apex_hits_once() {
        // The apex of the symmetric arch is at t = 0.5, height 1.5.
        let hits = intersect(&horizontal(1.5), &arch(), 1e-10);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].t_b, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(hits[0].point, Point2::new(1.0, 1.5), epsilon = 1e-9);
    }

    #[test]
    fn line_above_apex_misses() {
        assert!(intersect(&horizontal(1.6), &arch(), 1e-10).is_empty());
    }
}
