//! Core domain types for the course route engine.
//!
//! The engine turns three to six user-selected places into an ordered,
//! timed course. This crate holds everything the optimisation stages share:
//! the request and recommendation types, the immutable configuration, the
//! haversine [`DistanceModel`] and the error taxonomy. Validation happens once,
//! at the boundary; every later stage is total.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod category;
mod config;
mod distance;
mod error;
mod optimizer;
mod place;
mod recommendation;
mod request;
mod tour;
#[cfg(feature = "serde")]
pub mod wire;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use category::Category;
pub use config::{
    DEFAULT_DISTANCE_WEIGHT, DEFAULT_DIVERSITY_WEIGHT, DiversityPolicy, OptimizerConfig,
    ScoreWeights, WEIGHT_SUM_TOLERANCE,
};
pub use distance::{DistanceMatrix, DistanceModel, EARTH_RADIUS_KM, SpeedProfile};
pub use error::{GeometryError, InvalidInputError, OptimizeError};
pub use optimizer::CourseOptimizer;
pub use place::{PlaceInput, validate_coord};
pub use recommendation::{CourseRecommendation, Diagnostics, ScheduledStop};
pub use request::{CourseRequest, MAX_PLACES, MIN_PLACES};
pub use tour::Tour;
