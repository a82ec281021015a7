//! Facade crate for the course route engine.
//!
//! This crate re-exports the core domain types and, behind the default
//! `optimizer` feature, the heuristic optimiser that orders and schedules a
//! course.
//!
//! ```
//! # #[cfg(feature = "optimizer")]
//! # {
//! use course_engine::{Category, CourseRequest, OptimizerConfig, PlaceInput, optimize_course};
//! use geo::Coord;
//!
//! let places = vec![
//!     PlaceInput::new("a", "Bakery", Category::Cafe, Coord { x: 127.000, y: 37.500 }),
//!     PlaceInput::new("b", "Gallery", Category::Museum, Coord { x: 127.010, y: 37.500 }),
//!     PlaceInput::new("c", "Garden", Category::Park, Coord { x: 127.005, y: 37.505 }),
//! ];
//! let course = optimize_course(&CourseRequest::new(places), &OptimizerConfig::default())?;
//! assert_eq!(course.stops.len(), 3);
//! # }
//! # Ok::<(), course_engine::OptimizeError>(())
//! ```

#![forbid(unsafe_code)]

pub use course_core::{
    Category, CourseOptimizer, CourseRecommendation, CourseRequest, Diagnostics, DistanceMatrix,
    DistanceModel, DiversityPolicy, GeometryError, InvalidInputError, MAX_PLACES, MIN_PLACES,
    OptimizeError, OptimizerConfig, PlaceInput, ScheduledStop, ScoreWeights, SpeedProfile, Tour,
};

#[cfg(feature = "optimizer")]
pub use course_solver::{
    HeuristicOptimizer, OptimizationReport, Stage, optimize_course, optimize_course_at,
    optimize_course_with_diagnostics,
};
