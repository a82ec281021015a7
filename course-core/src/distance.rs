//! Great-circle distances and travel-time estimates.
//!
//! [`DistanceModel`] is the only geometry in the engine. It measures haversine
//! distances on a sphere of radius [`EARTH_RADIUS_KM`] and converts them into
//! minutes with a two-speed [`SpeedProfile`]: short hops are walked, longer
//! ones use transit.
//!
//! [`DistanceMatrix`] caches the pairwise distances for one request so the
//! construction, refinement and repair stages never recompute trigonometry.

use geo::Coord;

use crate::error::{GeometryError, InvalidInputError};
use crate::place::validate_coord;

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Average speeds used to turn distances into travel minutes.
///
/// Legs up to and including `walking_threshold_km` use the walking speed;
/// anything longer uses the transit speed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeedProfile {
    /// Walking speed in km/h.
    pub walking_speed_kmh: f64,
    /// Transit or driving speed in km/h.
    pub transit_speed_kmh: f64,
    /// Longest leg, in kilometres, that is still walked.
    pub walking_threshold_km: f64,
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self {
            walking_speed_kmh: 4.0,
            transit_speed_kmh: 20.0,
            walking_threshold_km: 2.0,
        }
    }
}

impl SpeedProfile {
    /// Check that speeds are positive and the threshold is non-negative.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::InvalidConfig`] naming the bad field.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        require_positive("walking_speed_kmh", self.walking_speed_kmh)?;
        require_positive("transit_speed_kmh", self.transit_speed_kmh)?;
        if !self.walking_threshold_km.is_finite() || self.walking_threshold_km < 0.0 {
            return Err(InvalidInputError::InvalidConfig {
                field: "walking_threshold_km",
                value: self.walking_threshold_km,
            });
        }
        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), InvalidInputError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InvalidInputError::InvalidConfig { field, value })
    }
}

/// Haversine distances plus a speed profile.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use course_core::{DistanceModel, SpeedProfile};
///
/// let model = DistanceModel::new(SpeedProfile::default());
/// let km = model.distance_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 })?;
/// assert!((km - 111.195).abs() < 0.01);
/// assert!((model.travel_minutes(1.0) - 15.0).abs() < 1e-9);
/// # Ok::<(), course_core::GeometryError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceModel {
    speed: SpeedProfile,
}

impl DistanceModel {
    /// Build a model around `speed`.
    #[must_use]
    pub const fn new(speed: SpeedProfile) -> Self {
        Self { speed }
    }

    /// The speed profile in use.
    #[must_use]
    pub const fn speed(&self) -> &SpeedProfile {
        &self.speed
    }

    /// Great-circle distance between `a` and `b` in kilometres.
    ///
    /// # Errors
    /// Returns [`GeometryError`] when either coordinate is out of range.
    pub fn distance_km(&self, a: Coord<f64>, b: Coord<f64>) -> Result<f64, GeometryError> {
        validate_coord(a)?;
        validate_coord(b)?;
        Ok(haversine_km(a, b))
    }

    /// Estimated travel time in minutes for a leg of `distance_km`.
    #[must_use]
    pub fn travel_minutes(&self, distance_km: f64) -> f64 {
        let speed_kmh = if distance_km <= self.speed.walking_threshold_km {
            self.speed.walking_speed_kmh
        } else {
            self.speed.transit_speed_kmh
        };
        distance_km / speed_kmh * 60.0
    }
}

/// Haversine distance for coordinates already known to be in range.
pub(crate) fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let delta_lat = (b.y - a.y).to_radians();
    let delta_lng = (b.x - a.x).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `h` a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}

/// Symmetric pairwise distances for one request, with an optional anchor.
///
/// Rows and columns follow the input order of the places. The anchor, when
/// present, is a start location that is not itself a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
    anchor: Option<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build the matrix for `coords` and an optional `anchor`.
    ///
    /// # Errors
    /// Returns [`GeometryError`] for the first out-of-range coordinate. The
    /// error carries no position; callers validate per place beforehand when
    /// they need to name the culprit.
    pub fn build(coords: &[Coord<f64>], anchor: Option<Coord<f64>>) -> Result<Self, GeometryError> {
        for coord in coords.iter().chain(anchor.iter()) {
            validate_coord(*coord)?;
        }
        let size = coords.len();
        let mut values = vec![0.0; size * size];
        for (i, a) in coords.iter().enumerate() {
            for (j, b) in coords.iter().enumerate().skip(i + 1) {
                let km = haversine_km(*a, *b);
                values[i * size + j] = km;
                values[j * size + i] = km;
            }
        }
        let anchor = anchor.map(|origin| coords.iter().map(|c| haversine_km(origin, *c)).collect());
        Ok(Self {
            size,
            values,
            anchor,
        })
    }

    /// Number of places covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Whether the matrix covers no places.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether an anchor row is present.
    #[must_use]
    pub const fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    /// Distance between places `i` and `j` in kilometres.
    ///
    /// Out-of-range indices yield `0.0`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i >= self.size || j >= self.size {
            return 0.0;
        }
        self.values.get(i * self.size + j).copied().unwrap_or(0.0)
    }

    /// Distance from the anchor to place `i`, if an anchor is present.
    #[must_use]
    pub fn from_anchor(&self, i: usize) -> Option<f64> {
        self.anchor.as_ref().and_then(|row| row.get(i).copied())
    }

    /// Sum of consecutive leg distances along `order`, stops only.
    #[must_use]
    pub fn path_km(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|leg| self.leg_km(leg)).sum()
    }

    /// Path distance including the leg from the anchor to the first stop.
    ///
    /// Equal to [`Self::path_km`] when no anchor is present.
    #[must_use]
    pub fn anchored_path_km(&self, order: &[usize]) -> f64 {
        let lead = order
            .first()
            .and_then(|&first| self.from_anchor(first))
            .unwrap_or(0.0);
        lead + self.path_km(order)
    }

    fn leg_km(&self, leg: &[usize]) -> f64 {
        match leg {
            [from, to] => self.get(*from, *to),
            _ => 0.0,
        }
    }
}
