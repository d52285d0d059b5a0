pub mod bbox;
pub mod curve;
pub mod shape;

pub use bbox::Aabb;
pub use curve::{Arc, CubicBezier, Curve, CurveDomain, Line, LineSegment, QuadraticBezier, Ray, Segment};
pub use shape::{Composite, Path, PathVertex, Polygon};
