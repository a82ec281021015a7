//! Timestamps for a finished tour.
//!
//! The first stop is reached at the start time with no travel. Every later
//! stop is reached by the travel time from its predecessor and left after its
//! visit duration. Travel times are rounded to whole seconds so each arrival
//! equals the previous departure plus the reported travel minutes exactly.

use chrono::{DateTime, TimeDelta, Utc};
use course_core::{DistanceMatrix, DistanceModel, OptimizerConfig, PlaceInput, ScheduledStop, Tour};

const SECONDS_PER_MINUTE: i64 = 60;

/// Upper bound for a single leg, far beyond any real travel time.
const MAX_LEG_SECONDS: f64 = 1.0e12;

/// Scheduled stops with their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Stops in visiting order.
    pub stops: Vec<ScheduledStop>,
    /// Sum of the stops' travel distances.
    pub total_distance_km: f64,
    /// Sum of visit and travel minutes.
    pub total_duration_minutes: f64,
}

/// Walk `tour` from `start_time`, timing each stop.
///
/// `places` is indexed by the tour's place indices. Places without an
/// estimated visit duration use `config.default_visit_minutes`. Timestamps
/// saturate at the latest representable instant instead of overflowing.
#[must_use]
pub fn build_schedule(
    places: &[PlaceInput],
    tour: &Tour,
    matrix: &DistanceMatrix,
    config: &OptimizerConfig,
    start_time: DateTime<Utc>,
) -> Schedule {
    let model = DistanceModel::new(config.speed);
    let mut stops = Vec::with_capacity(tour.len());
    let mut total_distance_km = 0.0;
    let mut total_duration_minutes = 0.0;
    let mut previous: Option<(usize, DateTime<Utc>)> = None;

    for (position, &index) in tour.iter().enumerate() {
        let Some(place) = places.get(index) else {
            debug_assert!(false, "tour index {index} has no place");
            continue;
        };
        let (travel_distance_km, travel_seconds, arrival_time) = match previous {
            None => (0.0, 0, start_time),
            Some((from, departed)) => {
                let km = matrix.get(from, index);
                let seconds = whole_seconds(model.travel_minutes(km));
                (km, seconds, advance(departed, seconds))
            }
        };
        let visit_minutes = place.visit_minutes_or(config.default_visit_minutes);
        let departure_time = advance(
            arrival_time,
            i64::from(visit_minutes) * SECONDS_PER_MINUTE,
        );
        let travel_duration_minutes = seconds_to_minutes(travel_seconds);

        total_distance_km += travel_distance_km;
        total_duration_minutes += f64::from(visit_minutes) + travel_duration_minutes;
        stops.push(ScheduledStop {
            place_id: place.id.clone(),
            order: u32::try_from(position + 1).unwrap_or(u32::MAX),
            travel_distance_km,
            travel_duration_minutes,
            arrival_time,
            departure_time,
        });
        previous = Some((index, departure_time));
    }

    Schedule {
        stops,
        total_distance_km,
        total_duration_minutes,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "seconds are clamped to MAX_LEG_SECONDS first"
)]
fn whole_seconds(minutes: f64) -> i64 {
    let seconds = (minutes * 60.0).round();
    if seconds.is_finite() {
        seconds.clamp(0.0, MAX_LEG_SECONDS) as i64
    } else {
        0
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "leg durations are a few hours at most"
)]
fn seconds_to_minutes(seconds: i64) -> f64 {
    seconds as f64 / 60.0
}

fn advance(at: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
