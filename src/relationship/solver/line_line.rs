use crate::math::intersect_2d::line_line_intersect_2d;

use super::{Intersection, Linear, Overlap};

/// Intersection of two straight pieces.
///
/// Non-parallel pieces meet in at most one point. Collinear pieces meet in
/// the ends of their shared range, or in a single point when they only touch
/// end to end.
pub(super) fn intersect(a: &Linear, b: &Linear, epsilon: f64) -> Vec<Intersection> {
    if let Some((t, u)) = line_line_intersect_2d(&a.origin, &a.dir, &b.origin, &b.dir, epsilon) {
        if !a.domain.contains(t, a.slack(epsilon)) || !b.domain.contains(u, b.slack(epsilon)) {
            return Vec::new();
        }
        let (t, u) = (a.domain.clamp(t), b.domain.clamp(u));
        return vec![Intersection {
            point: a.point_at(t),
            t_a: t,
            t_b: u,
        }];
    }

    let Some(shared) = overlap(a, b, epsilon) else {
        return Vec::new();
    };
    let mut records: Vec<Intersection> = [(shared.a.0, shared.b.0), (shared.a.1, shared.b.1)]
        .into_iter()
        .filter(|(t, u)| t.is_finite() && u.is_finite())
        .map(|(t_a, t_b)| Intersection {
            point: a.point_at(t_a),
            t_a,
            t_b,
        })
        .collect();
    if records.len() == 2 && (records[1].point - records[0].point).norm() <= epsilon {
        records.truncate(1);
    }
    records
}

/// Shared parameter range of two collinear pieces.
///
/// Returns `None` when the pieces are not collinear or their ranges are
/// disjoint. A range of zero length means the pieces touch end to end.
pub(super) fn overlap(a: &Linear, b: &Linear, epsilon: f64) -> Option<Overlap> {
    if a.distance(&b.origin) > epsilon || b.distance(&a.origin) > epsilon {
        return None;
    }
    let along = a.dir.dot(&b.dir);
    if along == 0.0 {
        return None;
    }

    // b's parameter s maps onto a's parameter as offset + s * scale.
    let norm_sq = a.dir.norm_squared();
    let offset = a.project(&b.origin);
    let scale = along / norm_sq;
    let to_a = |s: f64| offset + s * scale;
    let to_b = |t: f64| (t - offset) / scale;

    let (s0, s1) = (to_a(b.domain.lo()), to_a(b.domain.hi()));
    let lo = a.domain.lo().max(s0.min(s1));
    let hi = a.domain.hi().min(s0.max(s1));
    let slack = a.slack(epsilon);
    if hi < lo - slack {
        return None;
    }
    let (lo, hi) = if hi < lo { (hi, hi) } else { (lo, hi) };
    Some(Overlap {
        a: (lo, hi),
        b: (clamp_to(b, to_b(lo)), clamp_to(b, to_b(hi))),
    })
}

fn clamp_to(l: &Linear, s: f64) -> f64 {
    if s.is_finite() {
        l.domain.clamp(s)
    } else {
        s
    }
}
