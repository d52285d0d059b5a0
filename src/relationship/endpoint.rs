//! Classification of two curves meeting at a shared point.
//!
//! At the point `P` each curve is represented by two pieces that leave `P`:
//! the incoming piece (traversed backwards) and the outgoing piece. The
//! classifier orders the four pieces by rotation around `P` and decides
//! whether the curves cross, touch or share a trajectory.
//!
//! Rotation between two pieces is decided in tiers. The vector tier compares
//! tangents. Pieces that leave along the same ray fall through to the
//! curvature tier, and pieces that bend to the same side fall through to the
//! ray tier, which casts a short ray across both pieces just past `P` and
//! compares where it hits them.

use std::f64::consts::{PI, TAU};

use tracing::{debug, trace};

use crate::config::RAY_OFFSET;
use crate::error::{RelationError, Result};
use crate::geometry::{Curve, Ray, Segment};
use crate::math::tolerance::{sign, Sign};
use crate::math::vector_2d::{cross, left_normal};
use crate::math::{Point2, Vector2};

use super::solver::{intersect, overlaps};

/// Which way a piece is traversed relative to the shared point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The curve arrives at the point; its piece is read backwards.
    Incoming,
    /// The curve leaves the point.
    Outgoing,
}

/// Rotational order of two pieces around the shared point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    /// The pieces share their trajectory near the point.
    Aligned,
    Counterclockwise,
}

impl Rotation {
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::Counterclockwise,
            Rotation::Aligned => Rotation::Aligned,
            Rotation::Counterclockwise => Rotation::Clockwise,
        }
    }

    fn from_sign(s: Sign) -> Self {
        match s {
            Sign::Negative => Rotation::Clockwise,
            Sign::Zero => Rotation::Aligned,
            Sign::Positive => Rotation::Counterclockwise,
        }
    }
}

/// Result of one rotation tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierOutcome {
    Resolved(Rotation),
    /// The tier has no information; the pieces are treated as aligned.
    Indeterminate,
    /// The next tier must decide.
    NeedsEscalation,
}

/// How two curves meet at one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The curves pass through each other.
    Cross,
    /// The curves meet and stay on their own sides.
    Touch,
    /// The curves share a trajectory through the point.
    Coincide,
}

/// A piece of a segment leaving the shared point.
///
/// Tangent and curvature are expressed for travel away from the point, so
/// they are negated for incoming pieces.
#[derive(Debug, Clone)]
pub struct EndpointSegment<'a> {
    segment: &'a Segment,
    parameter: f64,
    role: Role,
    tangent: Vector2,
    curvature: f64,
    linear: bool,
}

impl<'a> EndpointSegment<'a> {
    /// Reads the piece of `segment` at `parameter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has no direction at `parameter`.
    pub fn new(segment: &'a Segment, parameter: f64, role: Role, epsilon: f64) -> Result<Self> {
        let along = segment.tangent_at(parameter)?;
        let linear = segment.is_line_family() || segment.is_linear(epsilon);
        let curvature = if linear { 0.0 } else { segment.curvature_at(parameter) };
        let (tangent, curvature) = match role {
            Role::Incoming => (-along, -curvature),
            Role::Outgoing => (along, curvature),
        };
        Ok(Self {
            segment,
            parameter,
            role,
            tangent,
            curvature,
            linear,
        })
    }

    /// The piece of `segment` arriving at `parameter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has no direction at `parameter`.
    pub fn incoming(segment: &'a Segment, parameter: f64, epsilon: f64) -> Result<Self> {
        Self::new(segment, parameter, Role::Incoming, epsilon)
    }

    /// The piece of `segment` leaving `parameter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has no direction at `parameter`.
    pub fn outgoing(segment: &'a Segment, parameter: f64, epsilon: f64) -> Result<Self> {
        Self::new(segment, parameter, Role::Outgoing, epsilon)
    }

    #[must_use]
    pub fn segment(&self) -> &Segment {
        self.segment
    }

    #[must_use]
    pub fn parameter(&self) -> f64 {
        self.parameter
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Unit tangent pointing away from the shared point.
    #[must_use]
    pub fn tangent(&self) -> &Vector2 {
        &self.tangent
    }

    /// Signed curvature for travel away from the shared point.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.linear
    }

    /// Returns true if the shared range covers the side of `parameter` this
    /// piece runs into. `epsilon` is a distance, scaled to a parameter slack
    /// by the local speed of the segment.
    fn leaves_into(&self, lo: f64, hi: f64, epsilon: f64) -> bool {
        let speed = self.segment.derivative_at(self.parameter).norm();
        let slack = epsilon / speed.max(epsilon);
        let d = self.segment.domain();
        let forward = d.end >= d.start;
        let upward = forward == (self.role == Role::Outgoing);
        let t = self.parameter;
        if upward {
            t >= lo - slack && t < hi - slack
        } else {
            t > lo + slack && t <= hi + slack
        }
    }
}

/// Classifies meetings of two curves at a single point.
#[derive(Debug, Clone, Copy)]
pub struct EndpointClassifier {
    point: Point2,
    epsilon: f64,
}

impl EndpointClassifier {
    #[must_use]
    pub fn new(point: Point2, epsilon: f64) -> Self {
        Self { point, epsilon }
    }

    /// Decides how curve A (pieces `a_in`, `a_out`) meets curve B (pieces
    /// `b_in`, `b_out`) at the shared point.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::RayRotationMiss`] if the ray tier cannot
    /// find both pieces.
    pub fn classify(
        &self,
        a_in: &EndpointSegment<'_>,
        a_out: &EndpointSegment<'_>,
        b_in: &EndpointSegment<'_>,
        b_out: &EndpointSegment<'_>,
    ) -> Result<Classification> {
        let mut shared = false;
        for (p, q) in [(a_in, b_in), (a_in, b_out), (a_out, b_in), (a_out, b_out)] {
            if self.rotation(p, q)? == Rotation::Aligned {
                shared = true;
                break;
            }
        }
        let classification = if shared {
            Classification::Coincide
        } else if self.rotation(a_in, a_out)? == Rotation::Aligned
            || self.rotation(b_in, b_out)? == Rotation::Aligned
        {
            Classification::Touch
        } else {
            // B's pieces split the turn around the point into two sectors.
            // A crosses when its pieces fall into different ones.
            let entry = self.precedes(b_out, a_in, b_in)?;
            let exit = self.precedes(b_out, a_out, b_in)?;
            if entry == exit {
                Classification::Touch
            } else {
                Classification::Cross
            }
        };
        trace!(x = self.point.x, y = self.point.y, ?classification, "classified shared point");
        Ok(classification)
    }

    /// Returns true if `x` comes before `y` when sweeping counter-clockwise
    /// from `from`.
    fn precedes(
        &self,
        from: &EndpointSegment<'_>,
        x: &EndpointSegment<'_>,
        y: &EndpointSegment<'_>,
    ) -> Result<bool> {
        let kx = self.sweep(from, x)?;
        let ky = self.sweep(from, y)?;
        if (kx - ky).abs() < PI && vector_tier(x, y, self.epsilon) == TierOutcome::NeedsEscalation {
            return Ok(self.rotation(x, y)? == Rotation::Counterclockwise);
        }
        Ok(kx < ky)
    }

    /// Counter-clockwise angle from `from` to `x`, in `[0, 2π]`.
    ///
    /// A piece leaving along `from` sits at 0 if it turns counter-clockwise
    /// of it and at 2π otherwise.
    fn sweep(&self, from: &EndpointSegment<'_>, x: &EndpointSegment<'_>) -> Result<f64> {
        if vector_tier(from, x, self.epsilon) == TierOutcome::NeedsEscalation {
            let ahead = self.rotation(from, x)? == Rotation::Counterclockwise;
            return Ok(if ahead { 0.0 } else { TAU });
        }
        let angle = cross(&from.tangent, &x.tangent).atan2(from.tangent.dot(&x.tangent));
        Ok(if angle < 0.0 { angle + TAU } else { angle })
    }

    /// Rotation from piece `p1` to piece `p2` around the shared point.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::RayRotationMiss`] if the ray tier cannot
    /// find both pieces.
    pub fn rotation(&self, p1: &EndpointSegment<'_>, p2: &EndpointSegment<'_>) -> Result<Rotation> {
        match vector_tier(p1, p2, self.epsilon) {
            TierOutcome::Resolved(r) => return Ok(r),
            TierOutcome::Indeterminate => return Ok(Rotation::Aligned),
            TierOutcome::NeedsEscalation => {}
        }
        match curvature_tier(p1, p2, self.epsilon) {
            TierOutcome::Resolved(r) => Ok(r),
            TierOutcome::Indeterminate => Ok(Rotation::Aligned),
            TierOutcome::NeedsEscalation => {
                debug!(
                    x = self.point.x,
                    y = self.point.y,
                    first = p1.segment.kind(),
                    second = p2.segment.kind(),
                    "rotation escalated to ray tier"
                );
                self.ray_tier(p1, p2)
            }
        }
    }

    fn ray_tier(&self, p1: &EndpointSegment<'_>, p2: &EndpointSegment<'_>) -> Result<Rotation> {
        if coincide_near(p1, p2, self.epsilon) {
            return Ok(Rotation::Aligned);
        }
        let sigma = sign(p1.curvature, self.epsilon);
        if sigma == Sign::Zero {
            return Err(RelationError::UnresolvedRotation(format!(
                "ray tier reached with straight {} at ({}, {})",
                p1.segment.kind(),
                self.point.x,
                self.point.y
            ))
            .into());
        }
        let u = p1.tangent;
        let origin = self.point + u * RAY_OFFSET;
        let cast: Segment = Ray::from_unit(origin, left_normal(&u) * sigma.as_f64()).into();
        let (Some(h1), Some(h2)) = (
            nearest_hit(&cast, p1.segment, self.epsilon),
            nearest_hit(&cast, p2.segment, self.epsilon),
        ) else {
            return Err(RelationError::RayRotationMiss { point: self.point }.into());
        };
        let along = Rotation::from_sign(sigma);
        Ok(if h1 < h2 { along } else { along.flip() })
    }
}

/// Compares the tangents of two pieces.
#[must_use]
pub fn vector_tier(p1: &EndpointSegment<'_>, p2: &EndpointSegment<'_>, epsilon: f64) -> TierOutcome {
    let cp = cross(&p1.tangent, &p2.tangent);
    let dp = p1.tangent.dot(&p2.tangent);
    match sign(cp, epsilon) {
        Sign::Zero if dp > 0.0 => TierOutcome::NeedsEscalation,
        // Opposite rays count as a half turn counter-clockwise.
        Sign::Zero => TierOutcome::Resolved(Rotation::Counterclockwise),
        s => TierOutcome::Resolved(Rotation::from_sign(s)),
    }
}

/// Compares the curvature signs of two pieces leaving along one ray.
#[must_use]
pub fn curvature_tier(p1: &EndpointSegment<'_>, p2: &EndpointSegment<'_>, epsilon: f64) -> TierOutcome {
    let k1 = if p1.linear { Sign::Zero } else { sign(p1.curvature, epsilon) };
    let k2 = if p2.linear { Sign::Zero } else { sign(p2.curvature, epsilon) };
    match (k1, k2) {
        (Sign::Zero, Sign::Zero) => TierOutcome::Indeterminate,
        (Sign::Zero, Sign::Positive) | (Sign::Negative, Sign::Zero | Sign::Positive) => {
            TierOutcome::Resolved(Rotation::Counterclockwise)
        }
        (Sign::Zero, Sign::Negative) | (Sign::Positive, Sign::Zero | Sign::Negative) => {
            TierOutcome::Resolved(Rotation::Clockwise)
        }
        (Sign::Positive, Sign::Positive) | (Sign::Negative, Sign::Negative) => TierOutcome::NeedsEscalation,
    }
}

/// Returns true if the two pieces share a trajectory just past the point.
fn coincide_near(p1: &EndpointSegment<'_>, p2: &EndpointSegment<'_>, epsilon: f64) -> bool {
    overlaps(p1.segment, p2.segment, epsilon)
        .iter()
        .any(|o| p1.leaves_into(o.a.0.min(o.a.1), o.a.0.max(o.a.1), epsilon))
}

fn nearest_hit(cast: &Segment, segment: &Segment, epsilon: f64) -> Option<f64> {
    intersect(cast, segment, epsilon)
        .into_iter()
        .map(|hit| hit.t_a)
        .min_by(f64::total_cmp)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Arc, LineSegment};
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-10;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        LineSegment::new(Point2::new(x0, y0), Point2::new(x1, y1)).into()
    }

    fn classify_at(
        p: Point2,
        a: (&Segment, f64, &Segment, f64),
        b: (&Segment, f64, &Segment, f64),
    ) -> Classification {
        let a_in = EndpointSegment::incoming(a.0, a.1, EPS).unwrap();
        let a_out = EndpointSegment::outgoing(a.2, a.3, EPS).unwrap();
        let b_in = EndpointSegment::incoming(b.0, b.1, EPS).unwrap();
        let b_out = EndpointSegment::outgoing(b.2, b.3, EPS).unwrap();
        EndpointClassifier::new(p, EPS)
            .classify(&a_in, &a_out, &b_in, &b_out)
            .unwrap()
    }

    /// Both curves straight through P: self rotations are half turns, so the
    /// decision comes from the sector test.
    #[test]
    fn straight_curves_crossing_fall_through_to_sector_test() {
        let a = seg(-1.0, -1.0, 1.0, 1.0);
        let b = seg(-1.0, 1.0, 1.0, -1.0);
        let p = Point2::origin();
        assert_eq!(classify_at(p, (&a, 0.5, &a, 0.5), (&b, 0.5, &b, 0.5)), Classification::Cross);
    }

    #[test]
    fn shallow_crossing_is_cross() {
        let a = seg(-1.0, -0.001, 1.0, 0.001);
        let b = seg(-1.0, 0.0, 1.0, 0.0);
        let p = Point2::origin();
        assert_eq!(classify_at(p, (&a, 0.5, &a, 0.5), (&b, 0.5, &b, 0.5)), Classification::Cross);
    }

    #[test]
    fn vertex_resting_on_line_is_touch() {
        let a_in = seg(-1.0, -1.0, 0.0, 0.0);
        let a_out = seg(0.0, 0.0, 1.0, -1.0);
        let b = seg(-2.0, 0.0, 2.0, 0.0);
        let p = Point2::origin();
        assert_eq!(
            classify_at(p, (&a_in, 1.0, &a_out, 0.0), (&b, 0.5, &b, 0.5)),
            Classification::Touch
        );
    }

    #[test]
    fn vertex_passing_through_line_is_cross() {
        let a_in = seg(-1.0, -1.0, 0.0, 0.0);
        let a_out = seg(0.0, 0.0, 1.0, 1.0);
        let b = seg(-2.0, 0.0, 2.0, 0.0);
        let p = Point2::origin();
        assert_eq!(
            classify_at(p, (&a_in, 1.0, &a_out, 0.0), (&b, 0.5, &b, 0.5)),
            Classification::Cross
        );
    }

    #[test]
    fn shared_edge_is_coincide() {
        let a_in = seg(-1.0, -1.0, 0.0, 0.0);
        let a_out = seg(0.0, 0.0, 2.0, 0.0);
        let b = seg(-2.0, 0.0, 2.0, 0.0);
        let p = Point2::origin();
        assert_eq!(
            classify_at(p, (&a_in, 1.0, &a_out, 0.0), (&b, 0.5, &b, 0.5)),
            Classification::Coincide
        );
    }

    #[test]
    fn arc_tangent_to_line_is_touch() {
        // Circle of radius 1 resting on the x axis at the origin.
        let arc: Segment = Arc::new(Point2::new(0.0, 1.0), 1.0, -PI, 0.0).unwrap().into();
        let line = seg(-2.0, 0.0, 2.0, 0.0);
        let p = Point2::origin();
        let t = -FRAC_PI_2;
        assert_eq!(classify_at(p, (&arc, t, &arc, t), (&line, 0.5, &line, 0.5)), Classification::Touch);
    }

    #[test]
    fn tangent_arc_and_line_touch_in_every_orientation() {
        let arcs: [Segment; 2] = [
            Arc::new(Point2::new(0.0, 1.0), 1.0, -PI, 0.0).unwrap().into(),
            Arc::new(Point2::new(0.0, 1.0), 1.0, 0.0, -PI).unwrap().into(),
        ];
        let lines = [seg(-2.0, 0.0, 2.0, 0.0), seg(2.0, 0.0, -2.0, 0.0)];
        let p = Point2::origin();
        let t = -FRAC_PI_2;
        for arc in &arcs {
            for line in &lines {
                assert_eq!(classify_at(p, (arc, t, arc, t), (line, 0.5, line, 0.5)), Classification::Touch);
                assert_eq!(classify_at(p, (line, 0.5, line, 0.5), (arc, t, arc, t)), Classification::Touch);
            }
        }
    }

    #[test]
    fn externally_tangent_circles_touch_either_way_round() {
        // Unit circles above and below the origin.
        let upper: [Segment; 2] = [
            Arc::new(Point2::new(0.0, 1.0), 1.0, -PI, 0.0).unwrap().into(),
            Arc::new(Point2::new(0.0, 1.0), 1.0, 0.0, -PI).unwrap().into(),
        ];
        let lower: [Segment; 2] = [
            Arc::new(Point2::new(0.0, -1.0), 1.0, 0.0, PI).unwrap().into(),
            Arc::new(Point2::new(0.0, -1.0), 1.0, PI, 0.0).unwrap().into(),
        ];
        let p = Point2::origin();
        let (tu, tl) = (-FRAC_PI_2, FRAC_PI_2);
        for a in &upper {
            for b in &lower {
                assert_eq!(classify_at(p, (a, tu, a, tu), (b, tl, b, tl)), Classification::Touch);
                assert_eq!(classify_at(p, (b, tl, b, tl), (a, tu, a, tu)), Classification::Touch);
            }
        }
    }

    #[test]
    fn arc_crossing_line_is_cross_either_way_round() {
        // Unit circle centred on the x axis meets it square-on at (1, 0).
        let arcs: [Segment; 2] = [
            Arc::new(Point2::origin(), 1.0, -FRAC_PI_2, FRAC_PI_2).unwrap().into(),
            Arc::new(Point2::origin(), 1.0, FRAC_PI_2, -FRAC_PI_2).unwrap().into(),
        ];
        let lines = [seg(0.0, 0.0, 2.0, 0.0), seg(2.0, 0.0, 0.0, 0.0)];
        let p = Point2::new(1.0, 0.0);
        for arc in &arcs {
            for line in &lines {
                assert_eq!(classify_at(p, (arc, 0.0, arc, 0.0), (line, 0.5, line, 0.5)), Classification::Cross);
                assert_eq!(classify_at(p, (line, 0.5, line, 0.5), (arc, 0.0, arc, 0.0)), Classification::Cross);
            }
        }
    }

    #[test]
    fn nested_tangent_arcs_escalate_to_ray_tier() {
        // Circles of radius 1 and 2 both resting on the x axis at the origin.
        let small: Segment = Arc::new(Point2::new(0.0, 1.0), 1.0, -PI, 0.0).unwrap().into();
        let large: Segment = Arc::new(Point2::new(0.0, 2.0), 2.0, -PI, 0.0).unwrap().into();
        let t = -FRAC_PI_2;
        let small_out = EndpointSegment::outgoing(&small, t, EPS).unwrap();
        let large_out = EndpointSegment::outgoing(&large, t, EPS).unwrap();
        assert_eq!(vector_tier(&small_out, &large_out, EPS), TierOutcome::NeedsEscalation);
        assert_eq!(curvature_tier(&small_out, &large_out, EPS), TierOutcome::NeedsEscalation);

        let classifier = EndpointClassifier::new(Point2::origin(), EPS);
        // The small circle bends up more sharply, so the large one lies
        // clockwise of it when leaving along +x.
        assert_eq!(classifier.rotation(&small_out, &large_out).unwrap(), Rotation::Clockwise);
        assert_eq!(classifier.rotation(&large_out, &small_out).unwrap(), Rotation::Counterclockwise);

        let p = Point2::origin();
        assert_eq!(
            classify_at(p, (&small, t, &small, t), (&large, t, &large, t)),
            Classification::Touch
        );
    }

    #[test]
    fn same_circle_pieces_are_aligned() {
        let first: Segment = Arc::new(Point2::new(0.0, 1.0), 1.0, -PI, 0.0).unwrap().into();
        let second: Segment = Arc::new(Point2::new(0.0, 1.0), 1.0, -FRAC_PI_2, FRAC_PI_2).unwrap().into();
        let t = -FRAC_PI_2;
        let a = EndpointSegment::outgoing(&first, t, EPS).unwrap();
        let b = EndpointSegment::outgoing(&second, t, EPS).unwrap();
        let classifier = EndpointClassifier::new(Point2::origin(), EPS);
        assert_eq!(classifier.rotation(&a, &b).unwrap(), Rotation::Aligned);
    }

    #[test]
    fn curvature_tier_table() {
        let up: Segment = Arc::new(Point2::new(0.0, 1.0), 1.0, -PI, 0.0).unwrap().into();
        let down: Segment = Arc::new(Point2::new(0.0, -1.0), 1.0, PI, 0.0).unwrap().into();
        let flat = seg(0.0, 0.0, 1.0, 0.0);
        let t_up = -FRAC_PI_2;
        let t_down = FRAC_PI_2;
        let left = EndpointSegment::outgoing(&up, t_up, EPS).unwrap();
        let right = EndpointSegment::outgoing(&down, t_down, EPS).unwrap();
        let straight = EndpointSegment::outgoing(&flat, 0.0, EPS).unwrap();
        assert!(left.curvature() > 0.0 && right.curvature() < 0.0);

        let ccw = TierOutcome::Resolved(Rotation::Counterclockwise);
        let cw = TierOutcome::Resolved(Rotation::Clockwise);
        assert_eq!(curvature_tier(&straight, &straight, EPS), TierOutcome::Indeterminate);
        assert_eq!(curvature_tier(&straight, &left, EPS), ccw);
        assert_eq!(curvature_tier(&right, &straight, EPS), ccw);
        assert_eq!(curvature_tier(&right, &left, EPS), ccw);
        assert_eq!(curvature_tier(&straight, &right, EPS), cw);
        assert_eq!(curvature_tier(&left, &straight, EPS), cw);
        assert_eq!(curvature_tier(&left, &right, EPS), cw);
    }

    #[test]
    fn incoming_piece_reverses_tangent_and_curvature() {
        let arc: Segment = Arc::new(Point2::new(0.0, 1.0), 1.0, -PI, 0.0).unwrap().into();
        let t = -FRAC_PI_2;
        let inc = EndpointSegment::incoming(&arc, t, EPS).unwrap();
        let out = EndpointSegment::outgoing(&arc, t, EPS).unwrap();
        assert!((inc.tangent() + out.tangent()).norm() < 1e-12);
        assert!((inc.curvature() + out.curvature()).abs() < 1e-12);
        assert_eq!(inc.role(), Role::Incoming);
    }
}
