//! The seam through which callers obtain courses.

use crate::{CourseRecommendation, CourseRequest, OptimizeError};

/// Order a small set of places into a timed course.
///
/// Implementations must return [`OptimizeError`] for invalid requests rather
/// than panicking, and must be pure: the same request and configuration always
/// produce the same recommendation.
/// Optimizers must be `Send + Sync` so one instance can serve concurrent
/// requests.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use course_core::{
///     Category, CourseOptimizer, CourseRecommendation, CourseRequest, DistanceModel,
///     OptimizeError, PlaceInput, ScheduledStop, SpeedProfile,
/// };
/// use geo::Coord;
///
/// /// Visits the places in the order they were requested.
/// struct InputOrder;
///
/// impl CourseOptimizer for InputOrder {
///     fn optimize(&self, request: &CourseRequest) -> Result<CourseRecommendation, OptimizeError> {
///         request.validate()?;
///         let model = DistanceModel::new(SpeedProfile::default());
///         let mut clock = request.start_time.unwrap_or_else(Utc::now);
///         let mut stops: Vec<ScheduledStop> = Vec::new();
///         let mut previous: Option<Coord<f64>> = None;
///         for (place, order) in request.places.iter().zip(1..) {
///             let km = match previous {
///                 Some(from) => model.distance_km(from, place.location).map_err(|source| {
///                     OptimizeError::Geometry { place_id: Some(place.id.clone()), source }
///                 })?,
///                 None => 0.0,
///             };
///             let travel = (model.travel_minutes(km) * 60.0).round() / 60.0;
///             let arrival = clock + TimeDelta::seconds((travel * 60.0) as i64);
///             let visit = TimeDelta::minutes(i64::from(place.visit_minutes_or(60)));
///             stops.push(ScheduledStop {
///                 place_id: place.id.clone(),
///                 order,
///                 travel_distance_km: km,
///                 travel_duration_minutes: travel,
///                 arrival_time: arrival,
///                 departure_time: arrival + visit,
///             });
///             clock = arrival + visit;
///             previous = Some(place.location);
///         }
///         let start = stops.first().map(|s| s.arrival_time).unwrap_or(clock);
///         Ok(CourseRecommendation {
///             total_distance_km: stops.iter().map(|s| s.travel_distance_km).sum(),
///             total_duration_minutes: (clock - start).num_seconds() as f64 / 60.0,
///             stops,
///             optimization_score: 0.0,
///             diversity_violations: 0,
///         })
///     }
/// }
///
/// let places = ["cafe", "park", "museum"]
///     .into_iter()
///     .zip([0.0, 0.01, 0.02])
///     .map(|(id, x)| PlaceInput::new(id, id, Category::Other, Coord { x, y: 0.0 }))
///     .collect();
/// let start = Utc.with_ymd_and_hms(2026, 5, 2, 10, 0, 0).unwrap();
/// let request = CourseRequest::new(places).with_start_time(start);
/// let course = InputOrder.optimize(&request)?;
/// assert_eq!(course.place_ids(), vec!["cafe", "park", "museum"]);
/// assert_eq!(course.stops[0].arrival_time, start);
/// assert!(InputOrder.optimize(&CourseRequest::new(Vec::new())).is_err());
/// # Ok::<(), OptimizeError>(())
/// ```
pub trait CourseOptimizer: Send + Sync {
    /// Optimise a request, producing a recommendation or an error.
    ///
    /// # Errors
    /// Returns [`OptimizeError`] when the request fails validation.
    fn optimize(&self, request: &CourseRequest) -> Result<CourseRecommendation, OptimizeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, PlaceInput, ScheduledStop};
    use chrono::{DateTime, Utc};
    use geo::Coord;
    use rstest::rstest;

    /// Schedules places in request order with no travel between them.
    struct ValidatingOptimizer;

    impl CourseOptimizer for ValidatingOptimizer {
        fn optimize(
            &self,
            request: &CourseRequest,
        ) -> Result<CourseRecommendation, OptimizeError> {
            request.validate()?;
            let at = request.start_time.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            let stops = request
                .places
                .iter()
                .zip(1..)
                .map(|(place, order)| ScheduledStop {
                    place_id: place.id.clone(),
                    order,
                    travel_distance_km: 0.0,
                    travel_duration_minutes: 0.0,
                    arrival_time: at,
                    departure_time: at,
                })
                .collect();
            Ok(CourseRecommendation {
                stops,
                total_distance_km: 0.0,
                total_duration_minutes: 0.0,
                optimization_score: 0.0,
                diversity_violations: 0,
            })
        }
    }

    fn request(count: usize) -> CourseRequest {
        let places = (0..count)
            .map(|i| {
                PlaceInput::new(
                    format!("p{i}"),
                    "place",
                    Category::Other,
                    Coord { x: 0.0, y: 0.0 },
                )
            })
            .collect();
        CourseRequest::new(places)
    }

    #[rstest]
    #[case(3, true)]
    #[case(6, true)]
    #[case(2, false)]
    #[case(7, false)]
    fn optimizer_validates_place_count(#[case] count: usize, #[case] should_succeed: bool) {
        let outcome = ValidatingOptimizer.optimize(&request(count));
        assert_eq!(outcome.is_ok(), should_succeed);
    }

    #[rstest]
    fn optimizer_is_usable_as_trait_object() {
        let optimizer: Box<dyn CourseOptimizer> = Box::new(ValidatingOptimizer);
        let course = optimizer.optimize(&request(4)).expect("valid request");
        assert_eq!(course.place_ids(), vec!["p0", "p1", "p2", "p3"]);
    }
}
