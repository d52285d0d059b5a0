//! Spatial relationships between segments and composite shapes.
//!
//! [`solver`] finds where two segments meet, [`endpoint`] decides whether
//! the curves cross or only touch at a shared point, and [`composite`]
//! aggregates both over every segment pair of two shapes.

pub mod adjacency;
pub mod composite;
pub mod endpoint;
pub mod point;
pub mod solver;

pub use adjacency::Adjacency;
pub use composite::{Outcome, Relationship, SharedPoint};
pub use endpoint::{Classification, EndpointClassifier, EndpointSegment, Role, Rotation, TierOutcome};
pub use point::PointRelationship;
pub use solver::Intersection;
