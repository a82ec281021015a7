//! Test-only utilities for `course-solver`.
//!
//! Available to unit tests, integration tests and benchmarks through the
//! `test-support` feature (and `cfg(test)`).

use std::collections::HashSet;

use chrono::TimeDelta;
use course_core::{CourseRecommendation, CourseRequest};

/// Check the structural guarantees every recommendation must satisfy.
///
/// Verifies that the stops visit each requested place exactly once with
/// 1-based orders, that the first stop has no travel, that arrivals chain
/// from departures, that totals equal the per-stop sums and that the score
/// lies in `0.0..=1.0`.
///
/// # Panics
/// Panics with a descriptive message when any guarantee is broken.
///
/// # Examples
/// ```rust
/// use course_core::{CourseRequest, OptimizerConfig};
/// use course_core::test_support::{alternating_line, fixed_start};
/// use course_solver::optimize_course_at;
/// use course_solver::test_support::assert_course_invariants;
///
/// let request = CourseRequest::new(alternating_line());
/// let course = optimize_course_at(&request, &OptimizerConfig::default(), fixed_start())?;
/// assert_course_invariants(&request, &course);
/// # Ok::<(), course_core::OptimizeError>(())
/// ```
pub fn assert_course_invariants(request: &CourseRequest, course: &CourseRecommendation) {
    assert_eq!(
        course.stops.len(),
        request.places.len(),
        "every place must be scheduled once"
    );
    let requested: HashSet<&str> = request.places.iter().map(|p| p.id.as_str()).collect();
    let scheduled: HashSet<&str> = course.place_ids().into_iter().collect();
    assert_eq!(scheduled, requested, "stops must be a permutation of the input");

    for (position, stop) in course.stops.iter().enumerate() {
        assert_eq!(
            usize::try_from(stop.order).ok(),
            Some(position + 1),
            "orders must run from 1 without gaps"
        );
        assert!(stop.departure_time >= stop.arrival_time, "departure before arrival");
        let seconds = stop.travel_duration_minutes * 60.0;
        assert!(
            (seconds - seconds.round()).abs() < 1e-6,
            "travel time {} is not whole seconds",
            stop.travel_duration_minutes
        );
    }

    if let Some(first) = course.stops.first() {
        assert!(first.travel_distance_km.abs() < f64::EPSILON, "first stop has travel");
        assert!(first.travel_duration_minutes.abs() < f64::EPSILON, "first stop has travel");
        if let Some(start) = request.start_time {
            assert_eq!(first.arrival_time, start, "first arrival must be the start time");
        }
    }

    for pair in course.stops.windows(2) {
        let [previous, next] = pair else { continue };
        let travel = whole_seconds(next.travel_duration_minutes);
        assert_eq!(
            next.arrival_time,
            previous.departure_time + travel,
            "arrival of {} must follow the previous departure",
            next.place_id
        );
    }

    let distance: f64 = course.stops.iter().map(|s| s.travel_distance_km).sum();
    assert!(
        (course.total_distance_km - distance).abs() < 1e-9,
        "total distance {} differs from leg sum {distance}",
        course.total_distance_km
    );

    let visits: f64 = course
        .stops
        .iter()
        .map(|s| minutes(s.departure_time - s.arrival_time))
        .sum();
    let travel: f64 = course.stops.iter().map(|s| s.travel_duration_minutes).sum();
    assert!(
        (course.total_duration_minutes - visits - travel).abs() < 1e-6,
        "total duration {} differs from visits {visits} plus travel {travel}",
        course.total_duration_minutes
    );

    assert!(
        (0.0..=1.0).contains(&course.optimization_score),
        "score {} outside the unit interval",
        course.optimization_score
    );
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "test durations are small whole-second values"
)]
fn whole_seconds(minutes: f64) -> TimeDelta {
    TimeDelta::seconds((minutes * 60.0).round() as i64)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "test durations are small whole-second values"
)]
fn minutes(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 / 60.0
}
