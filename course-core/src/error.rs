//! Error taxonomy for course optimisation.
//!
//! Only request validation can fail. Every stage after validation is total, so
//! these are the only errors a caller will ever see.

use thiserror::Error;

/// A coordinate outside the valid WGS84 range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Latitude outside `-90.0..=90.0`.
    #[error("latitude {latitude} is outside -90..=90")]
    LatitudeOutOfRange {
        /// Offending latitude in decimal degrees.
        latitude: f64,
    },
    /// Longitude outside `-180.0..=180.0`.
    #[error("longitude {longitude} is outside -180..=180")]
    LongitudeOutOfRange {
        /// Offending longitude in decimal degrees.
        longitude: f64,
    },
    /// A coordinate component was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFiniteCoordinate,
}

/// Caller-fixable problems with a request or configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// The number of places is outside the supported range.
    #[error("a course needs between {min} and {max} places, got {count}")]
    PlaceCount {
        /// Number of places supplied.
        count: usize,
        /// Minimum accepted count.
        min: usize,
        /// Maximum accepted count.
        max: usize,
    },
    /// Two places share an id.
    #[error("place id {id:?} appears more than once")]
    DuplicatePlaceId {
        /// The repeated id.
        id: String,
    },
    /// A place id was empty.
    #[error("place at index {index} has an empty id")]
    EmptyPlaceId {
        /// Zero-based position of the place in the request.
        index: usize,
    },
    /// Score weights do not sum to one.
    #[error(
        "distance_weight ({distance_weight}) and diversity_weight ({diversity_weight}) must sum to 1.0"
    )]
    WeightSum {
        /// Requested distance weight.
        distance_weight: f64,
        /// Requested diversity weight.
        diversity_weight: f64,
    },
    /// A score weight was negative or not finite.
    #[error("{field} must be a finite, non-negative number, got {value}")]
    NegativeWeight {
        /// Name of the weight field.
        field: &'static str,
        /// Supplied value.
        value: f64,
    },
    /// An optimiser configuration value was unusable.
    #[error("configuration value {field} is invalid: {value}")]
    InvalidConfig {
        /// Name of the configuration field.
        field: &'static str,
        /// Supplied value.
        value: f64,
    },
}

/// Errors returned by [`CourseOptimizer::optimize`](crate::CourseOptimizer::optimize).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// The request or configuration failed validation.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    /// A coordinate was out of range.
    ///
    /// `place_id` is `None` when the offending coordinate is the request's
    /// start location.
    #[error("{}: {source}", describe_location(.place_id.as_deref()))]
    Geometry {
        /// Id of the place carrying the bad coordinate.
        place_id: Option<String>,
        /// Underlying range violation.
        #[source]
        source: GeometryError,
    },
}

fn describe_location(place_id: Option<&str>) -> String {
    place_id.map_or_else(
        || "start_location".to_owned(),
        |id| format!("place {id:?}"),
    )
}
