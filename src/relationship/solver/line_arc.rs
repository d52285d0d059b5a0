use crate::geometry::Arc;
use crate::math::intersect_2d::line_circle_intersect_2d;

use super::{Intersection, Linear};

/// Intersection of a straight piece with a circular arc: the hits on the
/// full circle, filtered to both domains.
pub(super) fn intersect(line: &Linear, arc: &Arc, epsilon: f64) -> Vec<Intersection> {
    let center = arc.center();
    let slack = line.slack(epsilon);
    line_circle_intersect_2d(&line.origin, &line.dir, center, arc.radius(), epsilon)
        .into_iter()
        .filter(|t| line.domain.contains(*t, slack))
        .filter_map(|t| {
            let t = line.domain.clamp(t);
            let point = line.point_at(t);
            let v = point - center;
            let u = arc.angle_param(v.y.atan2(v.x), epsilon / arc.radius())?;
            Some(Intersection {
                point,
                t_a: t,
                t_b: u,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::CurveDomain;
    use crate::math::{Point2, Vector2};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn upper_half() -> Arc {
        Arc::new(Point2::origin(), 1.0, 0.0, PI).unwrap()
    }

    fn vertical(x: f64) -> Linear {
        Linear {
            origin: Point2::new(x, -2.0),
            dir: Vector2::new(0.0, 4.0),
            domain: CurveDomain::unit(),
        }
    }

    #[test]
    fn chord_hits_upper_half_once() {
        let hits = intersect(&vertical(0.0), &upper_half(), 1e-10);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].point, Point2::new(0.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(hits[0].t_b, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(hits[0].t_a, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn tangent_line_touches_once() {
        let hits = intersect(&vertical(1.0), &upper_half(), 1e-10);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].point, Point2::new(1.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn clockwise_arc_parameters_stay_in_range() {
        let arc = Arc::new(Point2::origin(), 1.0, PI, 0.0).unwrap();
        let hits = intersect(&vertical(0.5), &arc, 1e-10);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].t_b <= PI && hits[0].t_b >= 0.0);
        assert_abs_diff_eq!(hits[0].t_b, PI / 3.0, epsilon = 1e-12);
    }
}
