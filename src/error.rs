use thiserror::Error;

use crate::math::Point2;

/// Top-level error type for the relationship engine.
#[derive(Debug, Error)]
pub enum GeorelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Relation(#[from] RelationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while constructing shapes.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Internal invariant and precondition violations of the relationship engine.
///
/// These are never recovered from locally: they signal mis-tiered dispatch or
/// an epsilon that is too coarse for the geometry at hand.
#[derive(Debug, Error)]
pub enum RelationError {
    #[error(
        "ray rotation found no intersection near ({}, {}); segment too short for epsilon",
        point.x,
        point.y
    )]
    RayRotationMiss { point: Point2 },

    #[error("segment index {index} does not belong to a curve of {len} segments")]
    ForeignIndex { index: usize, len: usize },

    #[error("rotation left unresolved: {0}")]
    UnresolvedRotation(String),
}

/// Errors related to the process-wide configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("epsilon must be finite, positive and below {max}, got {value}")]
    InvalidEpsilon { value: f64, max: f64 },
}

/// Convenience type alias for results using [`GeorelError`].
pub type Result<T> = std::result::Result<T, GeorelError>;
