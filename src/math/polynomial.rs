//! Real roots of low-degree polynomials.
//!
//! Coefficients are stored lowest degree first: `c[0] + c[1]·t + c[2]·t² + c[3]·t³`.

/// Evaluates a cubic with Horner's scheme.
#[must_use]
pub fn eval_cubic(c: &[f64; 4], t: f64) -> f64 {
    ((c[3] * t + c[2]) * t + c[1]) * t + c[0]
}

/// Real roots of `a·x² + b·x + c = 0`.
///
/// Coefficients are normalized by their largest magnitude before the
/// discriminant is tested against `epsilon`, so a near-zero discriminant
/// yields a single (double) root. Falls back to the linear solution when `a`
/// vanishes. Roots are returned in ascending order.
#[must_use]
pub fn quadratic_roots(a: f64, b: f64, c: f64, epsilon: f64) -> Vec<f64> {
    let scale = a.abs().max(b.abs()).max(c.abs());
    if scale == 0.0 {
        return Vec::new();
    }
    let (a, b, c) = (a / scale, b / scale, c / scale);

    if a.abs() <= epsilon {
        if b.abs() <= epsilon {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < -epsilon {
        return Vec::new();
    }
    if discriminant <= epsilon {
        return vec![-b / (2.0 * a)];
    }

    // Citardauq form avoids cancellation when b² ≫ 4ac.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let mut roots = if q == 0.0 {
        vec![0.0]
    } else {
        vec![q / a, c / q]
    };
    roots.sort_by(f64::total_cmp);
    roots
}

/// Real roots of a polynomial of degree at most three inside `[lo, hi]`.
///
/// The range is split at the critical points into monotone pieces, each of
/// which is bisected on a sign change. Critical points and range ends whose
/// value is within `epsilon` of zero are reported as roots, which catches
/// tangential (double) roots that never change sign.
#[must_use]
pub fn roots_in_range(c: &[f64; 4], lo: f64, hi: f64, epsilon: f64) -> Vec<f64> {
    let mut knots = vec![lo];
    for crit in quadratic_roots(3.0 * c[3], 2.0 * c[2], c[1], 1e-14) {
        if crit > lo && crit < hi {
            knots.push(crit);
        }
    }
    knots.push(hi);
    knots.sort_by(f64::total_cmp);

    let values: Vec<f64> = knots
        .iter()
        .map(|&t| {
            let v = eval_cubic(c, t);
            if v.abs() <= epsilon {
                0.0
            } else {
                v
            }
        })
        .collect();

    let mut roots = Vec::new();
    for (i, &t) in knots.iter().enumerate() {
        if values[i] == 0.0 {
            roots.push(t);
        }
    }
    for i in 0..knots.len() - 1 {
        let (f0, f1) = (values[i], values[i + 1]);
        if f0 != 0.0 && f1 != 0.0 && f0.signum() != f1.signum() {
            roots.push(bisect(c, knots[i], knots[i + 1], f0));
        }
    }

    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|a, b| (*a - *b).abs() <= 1e-12);
    roots
}

fn bisect(c: &[f64; 4], mut lo: f64, mut hi: f64, f_lo: f64) -> f64 {
    let lo_sign = f_lo.signum();
    for _ in 0..80 {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = eval_cubic(c, mid);
        if f_mid == 0.0 {
            return mid;
        }
        if f_mid.signum() == lo_sign {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
