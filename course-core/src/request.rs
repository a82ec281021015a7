//! Course optimisation requests and their validation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use geo::Coord;

use crate::config::{DEFAULT_DISTANCE_WEIGHT, DEFAULT_DIVERSITY_WEIGHT, ScoreWeights};
use crate::error::{InvalidInputError, OptimizeError};
use crate::place::{PlaceInput, validate_coord};

/// Fewest places a course may contain.
pub const MIN_PLACES: usize = 3;

/// Most places a course may contain.
pub const MAX_PLACES: usize = 6;

/// Parameters for one optimisation call.
///
/// The request captures the chosen places, an optional anchor the walk starts
/// from, an optional start time and the score weights.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use course_core::{Category, CourseRequest, PlaceInput};
///
/// let places = vec![
///     PlaceInput::new("a", "Cafe", Category::Cafe, Coord { x: 127.00, y: 37.5 }),
///     PlaceInput::new("b", "Park", Category::Park, Coord { x: 127.01, y: 37.5 }),
///     PlaceInput::new("c", "Bar", Category::Bar, Coord { x: 127.02, y: 37.5 }),
/// ];
/// let request = CourseRequest::new(places);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseRequest {
    /// Places to order, between [`MIN_PLACES`] and [`MAX_PLACES`].
    pub places: Vec<PlaceInput>,
    /// Optional anchor that is not counted as a stop.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "crate::wire::optional_lat_lng")
    )]
    pub start_location: Option<Coord<f64>>,
    /// Arrival time at the first stop; defaults to the invocation time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_time: Option<DateTime<Utc>>,
    /// Weight of distance efficiency in the score.
    #[cfg_attr(feature = "serde", serde(default = "default_distance_weight"))]
    pub distance_weight: f64,
    /// Weight of category diversity in the score.
    #[cfg_attr(feature = "serde", serde(default = "default_diversity_weight"))]
    pub diversity_weight: f64,
}

#[cfg(feature = "serde")]
const fn default_distance_weight() -> f64 {
    DEFAULT_DISTANCE_WEIGHT
}

#[cfg(feature = "serde")]
const fn default_diversity_weight() -> f64 {
    DEFAULT_DIVERSITY_WEIGHT
}

impl CourseRequest {
    /// Build a request with default weights and no anchor or start time.
    #[must_use]
    pub const fn new(places: Vec<PlaceInput>) -> Self {
        Self {
            places,
            start_location: None,
            start_time: None,
            distance_weight: DEFAULT_DISTANCE_WEIGHT,
            diversity_weight: DEFAULT_DIVERSITY_WEIGHT,
        }
    }

    /// Set the anchor while returning `self` for chaining.
    #[must_use]
    pub fn with_start_location(mut self, start: Coord<f64>) -> Self {
        self.start_location = Some(start);
        self
    }

    /// Set the start time while returning `self` for chaining.
    #[must_use]
    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Override both score weights while returning `self` for chaining.
    #[must_use]
    pub fn with_weights(mut self, distance_weight: f64, diversity_weight: f64) -> Self {
        self.distance_weight = distance_weight;
        self.diversity_weight = diversity_weight;
        self
    }

    /// Validate the request, returning the checked score weights.
    ///
    /// Checks run in a fixed order: place count, ids, coordinates (places in
    /// input order, then the anchor) and finally the weights.
    ///
    /// # Errors
    /// Returns [`OptimizeError::InvalidInput`] or [`OptimizeError::Geometry`]
    /// describing the first problem found.
    pub fn validate(&self) -> Result<ScoreWeights, OptimizeError> {
        let count = self.places.len();
        if !(MIN_PLACES..=MAX_PLACES).contains(&count) {
            return Err(InvalidInputError::PlaceCount {
                count,
                min: MIN_PLACES,
                max: MAX_PLACES,
            }
            .into());
        }

        let mut seen = HashSet::with_capacity(count);
        for (index, place) in self.places.iter().enumerate() {
            if place.id.is_empty() {
                return Err(InvalidInputError::EmptyPlaceId { index }.into());
            }
            if !seen.insert(place.id.as_str()) {
                return Err(InvalidInputError::DuplicatePlaceId {
                    id: place.id.clone(),
                }
                .into());
            }
        }

        for place in &self.places {
            validate_coord(place.location).map_err(|source| OptimizeError::Geometry {
                place_id: Some(place.id.clone()),
                source,
            })?;
        }
        if let Some(start) = self.start_location {
            validate_coord(start).map_err(|source| OptimizeError::Geometry {
                place_id: None,
                source,
            })?;
        }

        Ok(ScoreWeights::new(self.distance_weight, self.diversity_weight)?)
    }
}
