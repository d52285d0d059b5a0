//! Relationship predicates between two composite curves.

use std::cell::OnceCell;

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::Result;
use crate::geometry::{Aabb, Composite, Curve, Segment};
use crate::math::tolerance::{points_equal, sign, Sign};
use crate::math::vector_2d::cross;
use crate::math::Point2;

use super::adjacency::Adjacency;
use super::endpoint::{Classification, EndpointClassifier, EndpointSegment};
use super::solver::{self, Intersection};

/// How the two shapes meet at one shared point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Cross,
    Touch,
    Coincide,
    /// The point is an open end of at least one shape, so there is no
    /// vertex to classify.
    Common,
}

impl From<Classification> for Outcome {
    fn from(c: Classification) -> Self {
        match c {
            Classification::Cross => Outcome::Cross,
            Classification::Touch => Outcome::Touch,
            Classification::Coincide => Outcome::Coincide,
        }
    }
}

/// A distinct point shared by the two shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedPoint {
    pub point: Point2,
    pub outcome: Outcome,
    /// An open end of the first shape lies at the point.
    pub open_end_a: bool,
    /// An open end of the second shape lies at the point.
    pub open_end_b: bool,
}

#[derive(Debug, Default)]
struct Aggregate {
    points: Vec<SharedPoint>,
    coincident: Vec<Segment>,
}

/// Incoming and outgoing pieces of one shape at a shared point.
enum Pieces<'s> {
    /// The point is an open end of the shape.
    Open,
    /// The point joins two segments.
    Vertex(EndpointSegment<'s>, EndpointSegment<'s>),
    /// The point lies inside one segment.
    Interior(EndpointSegment<'s>, EndpointSegment<'s>),
}

impl<'s> Pieces<'s> {
    fn ends(self) -> Option<(EndpointSegment<'s>, EndpointSegment<'s>)> {
        match self {
            Pieces::Open => None,
            Pieces::Vertex(p, q) | Pieces::Interior(p, q) => Some((p, q)),
        }
    }
}

/// The spatial relationship between two composite shapes.
///
/// Segment lists, bounding boxes and the classified shared points are
/// computed on first use and kept for the lifetime of the relationship.
pub struct Relationship<'a, A: ?Sized, B: ?Sized> {
    a: &'a A,
    b: &'a B,
    config: Config,
    segments_a: OnceCell<Vec<Segment>>,
    segments_b: OnceCell<Vec<Segment>>,
    bbox_a: OnceCell<Option<Aabb>>,
    bbox_b: OnceCell<Option<Aabb>>,
    aggregate: OnceCell<Aggregate>,
}

impl<'a, A, B> Relationship<'a, A, B>
where
    A: Composite + ?Sized,
    B: Composite + ?Sized,
{
    /// Relates `a` to `b` with a snapshot of the process-wide configuration.
    #[must_use]
    pub fn new(a: &'a A, b: &'a B) -> Self {
        Self::with_config(a, b, Config::global())
    }

    #[must_use]
    pub fn with_config(a: &'a A, b: &'a B, config: Config) -> Self {
        Self {
            a,
            b,
            config,
            segments_a: OnceCell::new(),
            segments_b: OnceCell::new(),
            bbox_a: OnceCell::new(),
            bbox_b: OnceCell::new(),
            aggregate: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Every distinct shared point with its outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn shared_points(&self) -> Result<&[SharedPoint]> {
        Ok(&self.aggregate()?.points)
    }

    /// All distinct intersection points.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn intersect(&self) -> Result<Vec<Point2>> {
        self.select(|_| true)
    }

    /// Points where the shapes cross, touch or meet at an open end.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn strike(&self) -> Result<Vec<Point2>> {
        self.select(|p| matches!(p.outcome, Outcome::Cross | Outcome::Touch | Outcome::Common))
    }

    /// Points where the shapes meet without crossing.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn contact(&self) -> Result<Vec<Point2>> {
        self.select(|p| matches!(p.outcome, Outcome::Touch | Outcome::Common))
    }

    /// Points where the shapes pass through each other.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn cross(&self) -> Result<Vec<Point2>> {
        self.select(|p| p.outcome == Outcome::Cross)
    }

    /// Points where the shapes touch and stay on their own sides.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn touch(&self) -> Result<Vec<Point2>> {
        self.select(|p| p.outcome == Outcome::Touch)
    }

    /// Points where an open end of the second shape lies on the first.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn block(&self) -> Result<Vec<Point2>> {
        self.select(|p| p.open_end_b)
    }

    /// Points where an open end of the first shape lies on the second.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn blocked_by(&self) -> Result<Vec<Point2>> {
        self.select(|p| p.open_end_a)
    }

    /// Points where open ends of both shapes meet.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn connect(&self) -> Result<Vec<Point2>> {
        self.select(|p| p.open_end_a && p.open_end_b)
    }

    /// Pieces of the first shape that the second shape also traces.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn coincide(&self) -> Result<Vec<Segment>> {
        Ok(self.aggregate()?.coincident.clone())
    }

    /// Returns `Some(true)` if the shapes share no point and neither
    /// encloses the other; `None` if either shape is degenerate.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn separate(&self) -> Result<Option<bool>> {
        if self.degenerate() {
            return Ok(None);
        }
        let aggregate = self.aggregate()?;
        if !aggregate.points.is_empty() || !aggregate.coincident.is_empty() {
            return Ok(Some(false));
        }
        let eps = self.config.epsilon();
        Ok(Some(
            !encloses(self.a, self.b, self.bbox_b(), eps) && !encloses(self.b, self.a, self.bbox_a(), eps),
        ))
    }

    /// Returns `Some(true)` if the first shape is closed and the second lies
    /// strictly inside it; `None` if either shape is degenerate.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn contain(&self) -> Result<Option<bool>> {
        if self.degenerate() {
            return Ok(None);
        }
        let eps = self.config.epsilon();
        Ok(Some(self.untouched()? && encloses(self.a, self.b, self.bbox_b(), eps)))
    }

    /// Returns `Some(true)` if the second shape is closed and the first lies
    /// strictly inside it; `None` if either shape is degenerate.
    ///
    /// # Errors
    ///
    /// Returns an error if a shared point cannot be classified.
    pub fn contained_by(&self) -> Result<Option<bool>> {
        if self.degenerate() {
            return Ok(None);
        }
        let eps = self.config.epsilon();
        Ok(Some(self.untouched()? && encloses(self.b, self.a, self.bbox_a(), eps)))
    }

    fn untouched(&self) -> Result<bool> {
        let aggregate = self.aggregate()?;
        Ok(aggregate.points.is_empty() && aggregate.coincident.is_empty())
    }

    fn select(&self, keep: impl Fn(&SharedPoint) -> bool) -> Result<Vec<Point2>> {
        Ok(self
            .aggregate()?
            .points
            .iter()
            .filter(|p| keep(p))
            .map(|p| p.point)
            .collect())
    }

    fn segments_a(&self) -> &[Segment] {
        self.segments_a.get_or_init(|| self.a.segments(false))
    }

    fn segments_b(&self) -> &[Segment] {
        self.segments_b.get_or_init(|| self.b.segments(false))
    }

    fn bbox_a(&self) -> Option<Aabb> {
        *self.bbox_a.get_or_init(|| self.a.bounding_box())
    }

    fn bbox_b(&self) -> Option<Aabb> {
        *self.bbox_b.get_or_init(|| self.b.bounding_box())
    }

    fn degenerate(&self) -> bool {
        let eps = self.config.epsilon();
        self.a.dimensionally_degenerate(eps) || self.b.dimensionally_degenerate(eps)
    }

    fn aggregate(&self) -> Result<&Aggregate> {
        if let Some(aggregate) = self.aggregate.get() {
            return Ok(aggregate);
        }
        let aggregate = self.build()?;
        Ok(self.aggregate.get_or_init(|| aggregate))
    }

    fn build(&self) -> Result<Aggregate> {
        let eps = self.config.epsilon();
        if self.degenerate() {
            return Ok(Aggregate::default());
        }
        match (self.bbox_a(), self.bbox_b()) {
            (Some(x), Some(y)) if x.intersects(&y, eps) => {}
            _ => return Ok(Aggregate::default()),
        }

        let segments_a = self.segments_a();
        let segments_b = self.segments_b();
        let adjacency_a = Adjacency::new(segments_a.len(), self.a.is_closed());
        let adjacency_b = Adjacency::new(segments_b.len(), self.b.is_closed());

        let mut aggregate = Aggregate::default();
        for (i, sa) in segments_a.iter().enumerate() {
            let box_a = Curve::bounding_box(sa);
            for (j, sb) in segments_b.iter().enumerate() {
                if !box_a.intersects(&Curve::bounding_box(sb), eps) {
                    continue;
                }
                for piece in solver::coincide(sa, sb, eps) {
                    if !aggregate.coincident.iter().any(|c| same_piece(c, &piece, eps)) {
                        aggregate.coincident.push(piece);
                    }
                }
                for record in solver::intersect(sa, sb, eps) {
                    let a_pieces = pieces(segments_a, adjacency_a, i, record.t_a, &record.point, eps)?;
                    let b_pieces = pieces(segments_b, adjacency_b, j, record.t_b, &record.point, eps)?;
                    let shared = classify(&record, a_pieces, b_pieces, eps)?;
                    trace!(
                        x = shared.point.x,
                        y = shared.point.y,
                        segment_a = i,
                        segment_b = j,
                        outcome = ?shared.outcome,
                        "shared point"
                    );
                    merge(&mut aggregate.points, shared, eps);
                }
            }
        }
        debug!(
            points = aggregate.points.len(),
            coincident = aggregate.coincident.len(),
            segments_a = segments_a.len(),
            segments_b = segments_b.len(),
            "relationship aggregated"
        );
        Ok(aggregate)
    }
}

/// Looks up the pieces of segment `index` that meet at `point`.
///
/// Inside a segment the segment itself supplies both pieces. At a vertex the
/// nearest non-degenerate neighbour supplies the other piece; an open end
/// has none.
fn pieces<'s>(
    segments: &'s [Segment],
    adjacency: Adjacency,
    index: usize,
    t: f64,
    point: &Point2,
    epsilon: f64,
) -> Result<Pieces<'s>> {
    let segment = &segments[index];
    let d = segment.domain();
    let at = |param: f64, end: Option<Point2>| {
        end.is_some_and(|e| (t - param).abs() <= epsilon || points_equal(point, &e, epsilon))
    };

    if at(d.start, segment.start_point()) {
        let Some(prev) = neighbour(segments, index, epsilon, |k| adjacency.prev(k))? else {
            return Ok(Pieces::Open);
        };
        let before = &segments[prev];
        return Ok(Pieces::Vertex(
            EndpointSegment::incoming(before, before.domain().end, epsilon)?,
            EndpointSegment::outgoing(segment, d.start, epsilon)?,
        ));
    }
    if at(d.end, segment.end_point()) {
        let Some(next) = neighbour(segments, index, epsilon, |k| adjacency.next(k))? else {
            return Ok(Pieces::Open);
        };
        let after = &segments[next];
        return Ok(Pieces::Vertex(
            EndpointSegment::incoming(segment, d.end, epsilon)?,
            EndpointSegment::outgoing(after, after.domain().start, epsilon)?,
        ));
    }
    Ok(Pieces::Interior(
        EndpointSegment::incoming(segment, t, epsilon)?,
        EndpointSegment::outgoing(segment, t, epsilon)?,
    ))
}

/// Steps from `index` until a segment with a direction is found.
fn neighbour(
    segments: &[Segment],
    index: usize,
    epsilon: f64,
    step: impl Fn(usize) -> Result<Option<usize>>,
) -> Result<Option<usize>> {
    let mut current = index;
    for _ in 0..segments.len() {
        match step(current)? {
            Some(k) if segments[k].is_degenerate(epsilon) => current = k,
            found => return Ok(found),
        }
    }
    Ok(None)
}

fn classify(record: &Intersection, a: Pieces<'_>, b: Pieces<'_>, epsilon: f64) -> Result<SharedPoint> {
    let (outcome, open_end_a, open_end_b) = match (a, b) {
        // Two segments passing through each other at an angle.
        (Pieces::Interior(_, a_out), Pieces::Interior(_, b_out))
            if sign(cross(a_out.tangent(), b_out.tangent()), epsilon) != Sign::Zero =>
        {
            (Outcome::Cross, false, false)
        }
        (a, b) => match (a.ends(), b.ends()) {
            (Some((a_in, a_out)), Some((b_in, b_out))) => {
                let classifier = EndpointClassifier::new(record.point, epsilon);
                (classifier.classify(&a_in, &a_out, &b_in, &b_out)?.into(), false, false)
            }
            (a, b) => (Outcome::Common, a.is_none(), b.is_none()),
        },
    };
    Ok(SharedPoint {
        point: record.point,
        outcome,
        open_end_a,
        open_end_b,
    })
}

/// Adds `shared` unless its coordinate is already present. The first
/// outcome at a coordinate stands, except that `Coincide` replaces it.
fn merge(points: &mut Vec<SharedPoint>, shared: SharedPoint, epsilon: f64) {
    match points.iter_mut().find(|p| points_equal(&p.point, &shared.point, epsilon)) {
        Some(existing) => {
            if shared.outcome == Outcome::Coincide {
                existing.outcome = Outcome::Coincide;
            }
            existing.open_end_a |= shared.open_end_a;
            existing.open_end_b |= shared.open_end_b;
        }
        None => points.push(shared),
    }
}

fn same_piece(x: &Segment, y: &Segment, epsilon: f64) -> bool {
    let eq = |p: Option<Point2>, q: Option<Point2>| match (p, q) {
        (Some(p), Some(q)) => points_equal(&p, &q, epsilon),
        (None, None) => true,
        _ => false,
    };
    let mid = |s: &Segment| {
        let d = s.domain();
        d.is_bounded().then(|| s.point_at(d.lerp(0.5)))
    };
    let (xs, xe) = (x.start_point(), x.end_point());
    let (ys, ye) = (y.start_point(), y.end_point());
    ((eq(xs, ys) && eq(xe, ye)) || (eq(xs, ye) && eq(xe, ys))) && eq(mid(x), mid(y))
}

/// Returns true if `outer` is closed and every vertex of the bounded shape
/// `inner` lies strictly inside it.
fn encloses<X, Y>(outer: &X, inner: &Y, inner_box: Option<Aabb>, epsilon: f64) -> bool
where
    X: Composite + ?Sized,
    Y: Composite + ?Sized,
{
    if !outer.is_closed() || !inner_box.is_some_and(|b| b.is_bounded()) {
        return false;
    }
    let vertices = inner.vertices();
    !vertices.is_empty() && vertices.iter().all(|v| outer.is_point_inside(v, epsilon))
}
