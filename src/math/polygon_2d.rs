use super::distance_2d::point_to_segment_dist;
use super::Point2;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Location of a point relative to a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    Outside,
    OnBoundary,
}

/// Locates `p` relative to the closed polygon through `points`.
///
/// Points within `epsilon` of an edge are on the boundary. Otherwise the
/// even-odd rule is evaluated with a horizontal ray cast toward +x.
#[must_use]
pub fn locate_point_in_polygon(p: &Point2, points: &[Point2], epsilon: f64) -> PointLocation {
    let n = points.len();
    if n == 0 {
        return PointLocation::Outside;
    }

    for i in 0..n {
        let (d, _) = point_to_segment_dist(p, &points[i], &points[(i + 1) % n]);
        if d <= epsilon {
            return PointLocation::OnBoundary;
        }
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (&points[i], &points[j]);
        // Half-open rule on y avoids counting a vertex twice.
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }

    if inside {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}
