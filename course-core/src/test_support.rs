//! Test-only helpers shared by unit, property and behaviour tests.
//!
//! Layouts here are built on the equator, where one degree of longitude and
//! one degree of latitude both span `EARTH_RADIUS_KM * π / 180` kilometres,
//! so planar sketches translate directly into haversine distances.

use chrono::{DateTime, TimeZone, Utc};
use geo::Coord;

use crate::distance::EARTH_RADIUS_KM;
use crate::{Category, DistanceMatrix, PlaceInput};

/// Kilometres spanned by one degree of arc on the model sphere.
#[must_use]
pub fn km_per_degree() -> f64 {
    EARTH_RADIUS_KM * std::f64::consts::PI / 180.0
}

/// Coordinate `east_km` east and `north_km` north of `(0, 0)`.
///
/// Accurate for the few-kilometre offsets used in tests.
#[must_use]
pub fn offset_km(east_km: f64, north_km: f64) -> Coord<f64> {
    Coord {
        x: east_km / km_per_degree(),
        y: north_km / km_per_degree(),
    }
}

/// Construct a place at a kilometre offset from the origin.
///
/// # Examples
/// ```rust
/// use course_core::Category;
/// use course_core::test_support::place_at_km;
///
/// let place = place_at_km("p1", Category::Cafe, 1.0, 0.0);
/// assert_eq!(place.id, "p1");
/// assert!(place.location.x > 0.0);
/// ```
#[must_use]
pub fn place_at_km(id: &str, category: Category, east_km: f64, north_km: f64) -> PlaceInput {
    PlaceInput::new(id, id, category, offset_km(east_km, north_km))
}

/// Three cafes forming a triangle with legs of 1.0, 1.0 and 1.5 km.
///
/// The apex `b` sits 1 km from both `a` and `c`, which are 1.5 km apart.
#[must_use]
pub fn cafe_triangle() -> Vec<PlaceInput> {
    // Half the base is 0.75 km; the apex height follows from a 1 km leg.
    let height = (1.0_f64 - 0.75 * 0.75).sqrt();
    vec![
        place_at_km("a", Category::Cafe, 0.0, 0.0),
        place_at_km("b", Category::Cafe, 0.75, height),
        place_at_km("c", Category::Cafe, 1.5, 0.0),
    ]
}

/// Four places along a line whose categories alternate in geographic order.
#[must_use]
pub fn alternating_line() -> Vec<PlaceInput> {
    vec![
        place_at_km("r2", Category::Restaurant, 1.8, 0.0),
        place_at_km("c1", Category::Cafe, 0.0, 0.0),
        place_at_km("c2", Category::Cafe, 1.2, 0.0),
        place_at_km("r1", Category::Restaurant, 0.6, 0.0),
    ]
}

/// A fixed, timezone-free start instant for deterministic schedules.
#[must_use]
pub fn fixed_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 2, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Shortest open-path length over every visiting order of `matrix`.
///
/// Exhaustive, so only suitable for the small inputs the engine accepts.
#[must_use]
pub fn brute_force_min_km(matrix: &DistanceMatrix) -> f64 {
    let mut order: Vec<usize> = (0..matrix.len()).collect();
    let mut best = f64::INFINITY;
    permute(&mut order, 0, &mut |candidate| {
        best = best.min(matrix.anchored_path_km(candidate));
    });
    best
}

fn permute(order: &mut [usize], k: usize, visit: &mut dyn FnMut(&[usize])) {
    if k >= order.len() {
        visit(order);
        return;
    }
    for i in k..order.len() {
        order.swap(k, i);
        permute(order, k + 1, visit);
        order.swap(k, i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_expected_legs() {
        let coords: Vec<_> = cafe_triangle().iter().map(|p| p.location).collect();
        let matrix = DistanceMatrix::build(&coords, None).expect("valid coordinates");
        assert!((matrix.get(0, 1) - 1.0).abs() < 1e-3);
        assert!((matrix.get(1, 2) - 1.0).abs() < 1e-3);
        assert!((matrix.get(0, 2) - 1.5).abs() < 1e-3);
    }

    #[test]
    fn brute_force_finds_sorted_line() {
        let coords: Vec<_> = alternating_line().iter().map(|p| p.location).collect();
        let matrix = DistanceMatrix::build(&coords, None).expect("valid coordinates");
        assert!((brute_force_min_km(&matrix) - 1.8).abs() < 1e-6);
    }
}
