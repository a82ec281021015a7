//! Scheduled courses handed back to the caller.
//!
//! Aggregates ordered, timestamped stops with totals and a quality score.

use chrono::{DateTime, Utc};

/// One stop of a scheduled course.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledStop {
    /// Id of the visited place.
    pub place_id: String,
    /// 1-based position in the course.
    pub order: u32,
    /// Distance from the previous stop; `0.0` for the first stop.
    pub travel_distance_km: f64,
    /// Travel time from the previous stop; `0.0` for the first stop.
    pub travel_duration_minutes: f64,
    /// Arrival at this stop.
    pub arrival_time: DateTime<Utc>,
    /// Departure from this stop, arrival plus the visit duration.
    pub departure_time: DateTime<Utc>,
}

/// An ordered, timed course with its quality score.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use course_core::{CourseRecommendation, ScheduledStop};
///
/// let at = Utc.with_ymd_and_hms(2026, 5, 2, 10, 0, 0).unwrap();
/// let stop = |id: &str, order| ScheduledStop {
///     place_id: id.to_owned(),
///     order,
///     travel_distance_km: 0.0,
///     travel_duration_minutes: 0.0,
///     arrival_time: at,
///     departure_time: at,
/// };
/// let course = CourseRecommendation {
///     stops: vec![stop("cafe", 1), stop("park", 2), stop("museum", 3)],
///     total_distance_km: 0.0,
///     total_duration_minutes: 0.0,
///     optimization_score: 1.0,
///     diversity_violations: 0,
/// };
/// assert_eq!(course.place_ids(), vec!["cafe", "park", "museum"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseRecommendation {
    /// Stops in visiting order.
    pub stops: Vec<ScheduledStop>,
    /// Sum of the stops' travel distances.
    pub total_distance_km: f64,
    /// Visit minutes plus travel minutes over all stops.
    pub total_duration_minutes: f64,
    /// Combined distance and diversity quality in `0.0..=1.0`.
    pub optimization_score: f64,
    /// Same-category runs that could not be broken up.
    pub diversity_violations: u32,
}

impl CourseRecommendation {
    /// Place ids in visiting order.
    #[must_use]
    pub fn place_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|stop| stop.place_id.as_str()).collect()
    }
}

/// Deterministic facts about how a recommendation was produced.
///
/// Contains no wall-clock measurements, so two runs over the same request
/// report identical diagnostics.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Nearest-neighbour walks evaluated during construction.
    pub candidates_evaluated: u32,
    /// Distance of the best nearest-neighbour walk.
    pub seed_distance_km: f64,
    /// Distance of the worst nearest-neighbour walk.
    pub baseline_distance_km: f64,
    /// Distance after 2-opt refinement.
    pub refined_distance_km: f64,
    /// Shortest distance over every visiting order.
    pub reference_distance_km: f64,
    /// 2-opt passes executed, including the final non-improving one.
    pub two_opt_passes: u32,
    /// Diversity repair swaps applied.
    pub diversity_swaps: u32,
}
