use super::Point2;

/// Returns the minimum distance from `p` to the line segment `a → b`, along
/// with the clamped parameter of the closest point.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> (f64, f64) {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return ((p - a).norm(), 0.0);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let closest = a + d * t;
    ((p - closest).norm(), t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn segment_dist_perpendicular_projection() {
        let (d, t) = point_to_segment_dist(
            &Point2::new(1.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!((d - 1.0).abs() < TOL, "d={d}");
        assert!((t - 0.5).abs() < TOL, "t={t}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let (d, t) = point_to_segment_dist(
            &Point2::new(-1.0, 0.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!((d - 1.0).abs() < TOL, "d={d}");
        assert!(t.abs() < TOL);
    }

    #[test]
    fn segment_dist_degenerate() {
        let (d, _) = point_to_segment_dist(&Point2::new(3.0, 4.0), &Point2::origin(), &Point2::origin());
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }
}
