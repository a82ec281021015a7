//! Exhaustive comparison for four-place requests.
//!
//! Each fixture is checked against the shortest of all 24 visiting orders.

use course_core::test_support::{
    alternating_line, brute_force_min_km, fixed_start, offset_km, place_at_km,
};
use course_core::{Category, CourseRequest, DistanceMatrix, OptimizerConfig, PlaceInput};
use course_solver::optimize_course_with_diagnostics;
use rstest::rstest;

fn matrix_for(request: &CourseRequest) -> DistanceMatrix {
    let coords: Vec<_> = request.places.iter().map(|p| p.location).collect();
    DistanceMatrix::build(&coords, request.start_location).expect("valid coordinates")
}

fn square() -> Vec<PlaceInput> {
    vec![
        place_at_km("sw", Category::Cafe, 0.0, 0.0),
        place_at_km("ne", Category::Museum, 1.0, 1.0),
        place_at_km("se", Category::Park, 1.0, 0.0),
        place_at_km("nw", Category::Bar, 0.0, 1.0),
    ]
}

fn crossing_pairs() -> Vec<PlaceInput> {
    vec![
        place_at_km("a", Category::Attraction, 0.0, 0.0),
        place_at_km("b", Category::Shopping, 3.0, 0.2),
        place_at_km("c", Category::Restaurant, 0.4, 0.1),
        place_at_km("d", Category::Activity, 2.6, 0.0),
    ]
}

fn kite() -> Vec<PlaceInput> {
    vec![
        place_at_km("tail", Category::Park, 0.0, -2.0),
        place_at_km("left", Category::Museum, -0.8, 0.0),
        place_at_km("right", Category::Cafe, 0.8, 0.0),
        place_at_km("head", Category::Bar, 0.0, 0.6),
    ]
}

#[rstest]
#[case::square(CourseRequest::new(square()))]
#[case::crossing_pairs(CourseRequest::new(crossing_pairs()))]
#[case::kite(CourseRequest::new(kite()))]
#[case::alternating_line(CourseRequest::new(alternating_line()))]
#[case::anchored_square(CourseRequest::new(square()).with_start_location(offset_km(-0.5, -0.5)))]
fn four_places_reach_the_optimum(#[case] request: CourseRequest) {
    let report = optimize_course_with_diagnostics(&request, &OptimizerConfig::default(), fixed_start())
        .expect("valid request");
    let optimum = brute_force_min_km(&matrix_for(&request));

    assert!(
        (report.diagnostics.refined_distance_km - optimum).abs() < 1e-9,
        "refined {} km, optimum {optimum} km",
        report.diagnostics.refined_distance_km
    );
    assert!((report.diagnostics.reference_distance_km - optimum).abs() < 1e-9);
    assert_eq!(report.recommendation.diversity_violations, 0);
}
