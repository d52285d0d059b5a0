use crate::geometry::{Arc, Curve};
use crate::math::intersect_2d::circle_circle_intersect_2d;
use crate::math::tolerance::{equal_to, points_equal};
use crate::math::Point2;

use super::Intersection;

/// Intersection of two circular arcs.
///
/// Distinct circles meet on their radical line. Arcs of one circle that
/// share no piece can still meet at their ends, which are checked directly.
pub(super) fn intersect(a: &Arc, b: &Arc, epsilon: f64) -> Vec<Intersection> {
    if same_circle(a, b, epsilon) {
        return end_contacts(a, b, epsilon);
    }
    circle_circle_intersect_2d(a.center(), a.radius(), b.center(), b.radius(), epsilon)
        .into_iter()
        .filter_map(|point| {
            let t_a = polar_param(a, &point, epsilon)?;
            let t_b = polar_param(b, &point, epsilon)?;
            Some(Intersection { point, t_a, t_b })
        })
        .collect()
}

pub(super) fn same_circle(a: &Arc, b: &Arc, epsilon: f64) -> bool {
    points_equal(a.center(), b.center(), epsilon) && equal_to(a.radius(), b.radius(), epsilon)
}

fn polar_param(arc: &Arc, point: &Point2, epsilon: f64) -> Option<f64> {
    let v = point - arc.center();
    arc.angle_param(v.y.atan2(v.x), epsilon / arc.radius())
}

fn end_contacts(a: &Arc, b: &Arc, epsilon: f64) -> Vec<Intersection> {
    let mut records: Vec<Intersection> = Vec::new();
    let da = a.domain();
    let db = b.domain();
    for t_a in [da.start, da.end] {
        let point = a.point_at(t_a);
        if let Some(t_b) = b.locate(&point, epsilon) {
            records.push(Intersection { point, t_a, t_b });
        }
    }
    for t_b in [db.start, db.end] {
        let point = b.point_at(t_b);
        if records.iter().any(|r| points_equal(&r.point, &point, epsilon)) {
            continue;
        }
        if let Some(t_a) = a.locate(&point, epsilon) {
            records.push(Intersection { point, t_a, t_b });
        }
    }
    records
}
