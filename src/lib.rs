pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod relationship;

pub use config::Config;
pub use error::{GeorelError, Result};
pub use relationship::{Outcome, PointRelationship, Relationship};
