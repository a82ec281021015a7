//! Places supplied by the caller and coordinate validation.

use geo::Coord;

use crate::Category;
use crate::error::GeometryError;

/// A place the user picked for their course.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. On the wire
/// the location is flattened into `lat`/`lng` fields.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use course_core::{Category, PlaceInput};
///
/// let place = PlaceInput::new("p1", "Blue Bottle", Category::Cafe, Coord { x: 127.0, y: 37.5 })
///     .with_visit_minutes(45);
///
/// assert_eq!(place.id, "p1");
/// assert_eq!(place.visit_minutes_or(60), 45);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "crate::wire::PlaceRecord", into = "crate::wire::PlaceRecord")
)]
pub struct PlaceInput {
    /// Opaque unique identifier supplied by the caller.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category tag used by the diversity check.
    pub category: Category,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Expected dwell time; the configured default applies when absent.
    pub estimated_visit_minutes: Option<u32>,
}

impl PlaceInput {
    /// Construct a place without a visit estimate.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            location,
            estimated_visit_minutes: None,
        }
    }

    /// Set the visit estimate while returning `self` for chaining.
    #[must_use]
    pub fn with_visit_minutes(mut self, minutes: u32) -> Self {
        self.estimated_visit_minutes = Some(minutes);
        self
    }

    /// Return the visit estimate, falling back to `default_minutes`.
    #[must_use]
    pub fn visit_minutes_or(&self, default_minutes: u32) -> u32 {
        self.estimated_visit_minutes.unwrap_or(default_minutes)
    }
}

/// Check that `coord` lies inside the WGS84 latitude/longitude range.
///
/// # Errors
/// Returns [`GeometryError`] for non-finite components, latitudes outside
/// `±90` or longitudes outside `±180`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use course_core::{GeometryError, validate_coord};
///
/// assert!(validate_coord(Coord { x: 180.0, y: -90.0 }).is_ok());
/// assert_eq!(
///     validate_coord(Coord { x: 0.0, y: 90.5 }),
///     Err(GeometryError::LatitudeOutOfRange { latitude: 90.5 }),
/// );
/// ```
pub fn validate_coord(coord: Coord<f64>) -> Result<(), GeometryError> {
    if !coord.x.is_finite() || !coord.y.is_finite() {
        return Err(GeometryError::NonFiniteCoordinate);
    }
    if !(-90.0..=90.0).contains(&coord.y) {
        return Err(GeometryError::LatitudeOutOfRange { latitude: coord.y });
    }
    if !(-180.0..=180.0).contains(&coord.x) {
        return Err(GeometryError::LongitudeOutOfRange { longitude: coord.x });
    }
    Ok(())
}
