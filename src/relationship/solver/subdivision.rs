use crate::geometry::{Curve, Segment};
use crate::math::tolerance::points_equal;
use crate::math::vector_2d::cross;

use super::Intersection;

/// Boxes smaller than this on both curves end the subdivision.
const LEAF_EXTENT: f64 = 1e-7;
const MAX_DEPTH: u32 = 48;
const NEWTON_ITERATIONS: usize = 40;

/// A pair of parameter ranges whose boxes still overlap at the finest level.
#[derive(Debug, Clone, Copy)]
struct Leaf {
    a: (f64, f64),
    b: (f64, f64),
}

impl Leaf {
    fn center(&self) -> (f64, f64) {
        (0.5 * (self.a.0 + self.a.1), 0.5 * (self.b.0 + self.b.1))
    }
}

/// Intersection of two bounded curves by recursive bounding-box subdivision.
///
/// Overlapping leaf boxes are clustered, and one seed per cluster is refined
/// with damped Newton iterations on `A(s) - B(t) = 0`. Where the curves meet
/// tangentially the result is polished on the tangency conditions instead.
pub(super) fn intersect(a: &Segment, b: &Segment, epsilon: f64) -> Vec<Intersection> {
    let da = a.domain();
    let db = b.domain();
    let mut leaves = Vec::new();
    subdivide(a, b, Leaf { a: (da.lo(), da.hi()), b: (db.lo(), db.hi()) }, 0, epsilon, &mut leaves);
    if leaves.is_empty() {
        return Vec::new();
    }

    let mut records: Vec<Intersection> = Vec::new();
    for cluster in cluster(leaves) {
        let seed = best_seed(a, b, &cluster);
        let Some(hit) = refine(a, b, seed, epsilon) else {
            continue;
        };
        if !records.iter().any(|r| points_equal(&r.point, &hit.point, epsilon)) {
            records.push(hit);
        }
    }
    records
}

fn subdivide(a: &Segment, b: &Segment, leaf: Leaf, depth: u32, epsilon: f64, out: &mut Vec<Leaf>) {
    let box_a = a.bounding_box_between(leaf.a.0, leaf.a.1);
    let box_b = b.bounding_box_between(leaf.b.0, leaf.b.1);
    if !box_a.intersects(&box_b, epsilon) {
        return;
    }
    if depth >= MAX_DEPTH || (box_a.extent() <= LEAF_EXTENT && box_b.extent() <= LEAF_EXTENT) {
        out.push(leaf);
        return;
    }
    let split_a = box_a.extent() > LEAF_EXTENT;
    let split_b = box_b.extent() > LEAF_EXTENT;
    let halves = |r: (f64, f64), split: bool| {
        if split {
            let mid = 0.5 * (r.0 + r.1);
            vec![(r.0, mid), (mid, r.1)]
        } else {
            vec![r]
        }
    };
    for ra in halves(leaf.a, split_a) {
        for rb in halves(leaf.b, split_b) {
            subdivide(a, b, Leaf { a: ra, b: rb }, depth + 1, epsilon, out);
        }
    }
}

/// Groups leaves whose parameter ranges touch on both curves.
fn cluster(mut leaves: Vec<Leaf>) -> Vec<Vec<Leaf>> {
    leaves.sort_by(|x, y| x.a.0.total_cmp(&y.a.0));
    let mut clusters: Vec<Vec<Leaf>> = Vec::new();
    for leaf in leaves {
        let home = clusters.iter_mut().find(|c| {
            c.iter()
                .any(|o| touches(o.a, leaf.a) && touches(o.b, leaf.b))
        });
        match home {
            Some(c) => c.push(leaf),
            None => clusters.push(vec![leaf]),
        }
    }
    clusters
}

/// Sibling ranges share their split value exactly, so no slack is needed.
fn touches(x: (f64, f64), y: (f64, f64)) -> bool {
    x.0 <= y.1 && y.0 <= x.1
}

/// The leaf center where the curves come closest.
fn best_seed(a: &Segment, b: &Segment, cluster: &[Leaf]) -> (f64, f64) {
    cluster
        .iter()
        .map(Leaf::center)
        .min_by(|x, y| gap(a, b, *x).total_cmp(&gap(a, b, *y)))
        .unwrap_or((0.0, 0.0))
}

fn gap(a: &Segment, b: &Segment, (s, t): (f64, f64)) -> f64 {
    (a.point_at(s) - b.point_at(t)).norm()
}

fn refine(a: &Segment, b: &Segment, seed: (f64, f64), epsilon: f64) -> Option<Intersection> {
    let mut best = newton(a, b, seed);
    if gap(a, b, best) > epsilon || tangential(a, b, best, epsilon) {
        let start = if gap(a, b, best) <= gap(a, b, seed) { best } else { seed };
        if let Some(touch) = polish_tangent(a, b, start) {
            if gap(a, b, touch) <= epsilon {
                best = touch;
            }
        }
    }
    let (s, t) = best;
    let pa = a.point_at(s);
    let pb = b.point_at(t);
    ((pa - pb).norm() <= epsilon).then(|| Intersection {
        point: nalgebra::center(&pa, &pb),
        t_a: s,
        t_b: t,
    })
}

/// Damped Newton on `F(s, t) = A(s) - B(t)`.
///
/// The damping keeps the step defined at tangential contacts, where the
/// Jacobian is singular and convergence drops to linear.
fn newton(a: &Segment, b: &Segment, seed: (f64, f64)) -> (f64, f64) {
    let da = a.domain();
    let db = b.domain();
    let (mut s, mut t) = seed;
    for _ in 0..NEWTON_ITERATIONS {
        let f = a.point_at(s) - b.point_at(t);
        let ja = a.derivative_at(s);
        let jb = -b.derivative_at(t);
        // Normal equations (JᵀJ + μI) δ = -Jᵀ F.
        let m00 = ja.dot(&ja);
        let m01 = ja.dot(&jb);
        let m11 = jb.dot(&jb);
        let mu = (m00 + m11) * f64::EPSILON;
        let (m00, m11) = (m00 + mu, m11 + mu);
        let g0 = -ja.dot(&f);
        let g1 = -jb.dot(&f);
        let det = m00 * m11 - m01 * m01;
        if det == 0.0 || !det.is_finite() {
            break;
        }
        let ds = (g0 * m11 - g1 * m01) / det;
        let dt = (m00 * g1 - m01 * g0) / det;
        let (next_s, next_t) = (da.clamp(s + ds), db.clamp(t + dt));
        let settled = negligible(next_s - s, s) && negligible(next_t - t, t);
        (s, t) = (next_s, next_t);
        if settled {
            break;
        }
    }
    (s, t)
}

/// Returns true if the curves run parallel at `(s, t)`.
fn tangential(a: &Segment, b: &Segment, (s, t): (f64, f64), epsilon: f64) -> bool {
    let da = a.derivative_at(s);
    let db = b.derivative_at(t);
    let scale = da.norm() * db.norm();
    scale > 0.0 && cross(&da, &db).abs() <= epsilon.sqrt() * scale
}

/// Newton on the tangency conditions
///
/// ```text
/// G1 = (A(s) - B(t)) · B'(t) = 0
/// G2 = A'(s) × B'(t)         = 0
/// ```
///
/// whose root is simple where two curves of different curvature touch, so
/// it converges to the contact point that `newton` only approaches linearly.
fn polish_tangent(a: &Segment, b: &Segment, seed: (f64, f64)) -> Option<(f64, f64)> {
    let da = a.domain();
    let db = b.domain();
    let (mut s, mut t) = seed;
    for _ in 0..NEWTON_ITERATIONS {
        let f = a.point_at(s) - b.point_at(t);
        let a1 = a.derivative_at(s);
        let b1 = b.derivative_at(t);
        let a2 = a.second_derivative_at(s);
        let b2 = b.second_derivative_at(t);
        let g1 = f.dot(&b1);
        let g2 = cross(&a1, &b1);
        let j00 = a1.dot(&b1);
        let j01 = f.dot(&b2) - b1.dot(&b1);
        let j10 = cross(&a2, &b1);
        let j11 = cross(&a1, &b2);
        let det = j00 * j11 - j01 * j10;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let ds = -(g1 * j11 - g2 * j01) / det;
        let dt = -(j00 * g2 - j10 * g1) / det;
        let (next_s, next_t) = (da.clamp(s + ds), db.clamp(t + dt));
        let settled = negligible(next_s - s, s) && negligible(next_t - t, t);
        (s, t) = (next_s, next_t);
        if settled {
            break;
        }
    }
    Some((s, t))
}

fn negligible(step: f64, at: f64) -> bool {
    step.abs() <= f64::EPSILON * (1.0 + at.abs())
}
