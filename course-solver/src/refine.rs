//! 2-opt refinement of an open tour.
//!
//! # Algorithm
//!
//! A move reverses the stops at positions `i..=j`. On an open path only the
//! edges entering position `i` and leaving position `j` change:
//!
//! ```text
//! delta = d(prev, t[j]) + d(t[i], next) - d(prev, t[i]) - d(t[j], next)
//! ```
//!
//! `prev` is the stop before `i` (or the anchor, or nothing) and `next` the
//! stop after `j` (or nothing). Each pass scans every `(i, j)` with `i < j`
//! and applies the single most negative move; equal improvements keep the
//! lexicographically smallest pair. Passes repeat until none improves or the
//! cap of `n²` passes is reached.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use course_core::{DistanceMatrix, Tour};

/// Smallest distance reduction, in kilometres, accepted as an improvement.
const IMPROVEMENT_EPSILON_KM: f64 = 1e-9;

/// Result of the refinement stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    /// The refined tour.
    pub tour: Tour,
    /// Length of [`Self::tour`], anchor leg included.
    pub distance_km: f64,
    /// Passes executed, including the final non-improving one.
    pub passes: u32,
    /// Tour length before the first pass and after each accepted move.
    pub history_km: Vec<f64>,
}

/// Improve `tour` with best-improvement 2-opt.
///
/// The returned distance never exceeds the input tour's distance, and
/// [`Refinement::history_km`] is non-increasing.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use course_core::{DistanceMatrix, Tour};
/// use course_solver::refine_tour;
///
/// let coords = [
///     Coord { x: 0.00, y: 0.0 },
///     Coord { x: 0.01, y: 0.0 },
///     Coord { x: 0.02, y: 0.0 },
///     Coord { x: 0.03, y: 0.0 },
/// ];
/// let matrix = DistanceMatrix::build(&coords, None)?;
/// let crossed = Tour::from_order(vec![0, 2, 1, 3]).expect("permutation");
/// let refined = refine_tour(&crossed, &matrix);
/// assert_eq!(refined.tour.as_slice(), &[0, 1, 2, 3]);
/// # Ok::<(), course_core::GeometryError>(())
/// ```
#[must_use]
pub fn refine_tour(tour: &Tour, matrix: &DistanceMatrix) -> Refinement {
    let n = tour.len();
    let max_passes = n.saturating_mul(n).max(1);

    let mut current = tour.clone();
    let mut distance_km = matrix.anchored_path_km(current.as_slice());
    let mut history_km = vec![distance_km];
    let mut passes = 0_usize;

    while passes < max_passes {
        passes += 1;
        let Some(best) = best_move(&current, matrix) else {
            break;
        };
        let candidate = current.reversed(best.i, best.j);
        let candidate_km = matrix.anchored_path_km(candidate.as_slice());
        if candidate_km >= distance_km {
            // Rounding disagreed with the delta; treat as converged.
            break;
        }
        log::trace!(
            "2-opt reversed positions {}..={} saving {:.6} km",
            best.i,
            best.j,
            distance_km - candidate_km
        );
        current = candidate;
        distance_km = candidate_km;
        history_km.push(distance_km);
    }

    Refinement {
        tour: current,
        distance_km,
        passes: u32::try_from(passes).unwrap_or(u32::MAX),
        history_km,
    }
}

#[derive(Debug, Clone, Copy)]
struct Move {
    i: usize,
    j: usize,
    delta: f64,
}

/// The most improving reversal, if any beats [`IMPROVEMENT_EPSILON_KM`].
fn best_move(tour: &Tour, matrix: &DistanceMatrix) -> Option<Move> {
    let n = tour.len();
    let mut best: Option<Move> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            let delta = reversal_delta(tour.as_slice(), matrix, i, j);
            if delta >= -IMPROVEMENT_EPSILON_KM {
                continue;
            }
            // Strict comparison keeps the earliest pair on ties.
            if best.is_none_or(|current| delta < current.delta) {
                best = Some(Move { i, j, delta });
            }
        }
    }
    best
}

/// Change in anchored path length from reversing positions `i..=j`.
pub(crate) fn reversal_delta(order: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let (Some(&first), Some(&last)) = (order.get(i), order.get(j)) else {
        return 0.0;
    };
    let enter = |stop: usize| -> f64 {
        match i.checked_sub(1).and_then(|p| order.get(p)) {
            Some(&prev) => matrix.get(prev, stop),
            None => matrix.from_anchor(stop).unwrap_or(0.0),
        }
    };
    let leave = |stop: usize| -> f64 { order.get(j + 1).map_or(0.0, |&next| matrix.get(stop, next)) };

    let before = enter(first) + leave(last);
    let after = enter(last) + leave(first);
    after - before
}
