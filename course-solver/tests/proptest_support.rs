//! Strategies shared by the course optimizer property tests.

use course_core::test_support::{fixed_start, offset_km, place_at_km};
use course_core::{Category, CourseRequest, PlaceInput};
use proptest::prelude::*;

/// Kilometre offsets used to scatter places around the origin.
const SPREAD_KM: f64 = 4.0;

/// One generated place before it is given an id.
#[derive(Debug, Clone)]
pub struct PlaceSpec {
    /// Offset east of the origin, in kilometres.
    pub east_km: f64,
    /// Offset north of the origin, in kilometres.
    pub north_km: f64,
    /// Category assigned to the place.
    pub category: Category,
    /// Optional visit duration in minutes.
    pub visit_minutes: Option<u32>,
}

/// A small, mixed set of categories so runs occur regularly.
pub fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(vec![
        Category::Cafe,
        Category::Restaurant,
        Category::Museum,
        Category::Park,
    ])
}

/// A place somewhere within a few kilometres of the origin.
pub fn place_spec_strategy() -> impl Strategy<Value = PlaceSpec> {
    (
        -SPREAD_KM..SPREAD_KM,
        -SPREAD_KM..SPREAD_KM,
        category_strategy(),
        prop::option::of(0_u32..=240),
    )
        .prop_map(|(east_km, north_km, category, visit_minutes)| PlaceSpec {
            east_km,
            north_km,
            category,
            visit_minutes,
        })
}

/// Turn generated specs into places with unique ids.
#[must_use]
pub fn build_places(specs: &[PlaceSpec]) -> Vec<PlaceInput> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let place = place_at_km(&format!("p{i}"), spec.category, spec.east_km, spec.north_km);
            match spec.visit_minutes {
                Some(minutes) => place.with_visit_minutes(minutes),
                None => place,
            }
        })
        .collect()
}

/// A valid request of three to six places starting at a fixed instant.
pub fn request_strategy() -> impl Strategy<Value = CourseRequest> {
    (
        prop::collection::vec(place_spec_strategy(), 3..=6),
        prop::option::of((-SPREAD_KM..SPREAD_KM, -SPREAD_KM..SPREAD_KM)),
    )
        .prop_map(|(specs, anchor)| {
            let request = CourseRequest::new(build_places(&specs)).with_start_time(fixed_start());
            match anchor {
                Some((east, north)) => request.with_start_location(offset_km(east, north)),
                None => request,
            }
        })
}
