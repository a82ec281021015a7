//! Scalar quality score for a finished course.
//!
//! The distance term places the tour between the shortest possible order
//! (`reference`) and the worst nearest-neighbour walk (`baseline`):
//!
//! ```text
//! efficiency = 1 - (total - reference) / (baseline - reference)
//! compliance = 1 - violations / max(1, n - 2)
//! score      = clamp(w_distance * efficiency + w_diversity * compliance, 0, 1)
//! ```
//!
//! When baseline and reference coincide every order is equally good and the
//! efficiency is `1.0`.

use course_core::{DistanceMatrix, ScoreWeights};

/// Baseline and reference closer than this are treated as equal.
const DEGENERATE_SPAN_KM: f64 = 1e-9;

/// Everything the score depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    /// Final tour length, anchor leg included.
    pub total_km: f64,
    /// Longest nearest-neighbour walk.
    pub baseline_km: f64,
    /// Shortest length over every visiting order.
    pub reference_km: f64,
    /// Unresolved category runs.
    pub violations: u32,
    /// Number of stops.
    pub stops: usize,
}

/// Combine distance efficiency and diversity compliance into `0.0..=1.0`.
///
/// # Examples
/// ```
/// use course_core::ScoreWeights;
/// use course_solver::{ScoreInputs, optimization_score};
///
/// let inputs = ScoreInputs {
///     total_km: 2.0,
///     baseline_km: 3.0,
///     reference_km: 2.0,
///     violations: 1,
///     stops: 3,
/// };
/// let score = optimization_score(&inputs, &ScoreWeights::default());
/// assert!((score - 0.7).abs() < 1e-9);
/// ```
#[must_use]
pub fn optimization_score(inputs: &ScoreInputs, weights: &ScoreWeights) -> f64 {
    let span = inputs.baseline_km - inputs.reference_km;
    let efficiency = if span <= DEGENERATE_SPAN_KM {
        1.0
    } else {
        1.0 - (inputs.total_km - inputs.reference_km) / span
    };

    let allowance = u32::try_from(inputs.stops.saturating_sub(2).max(1)).unwrap_or(u32::MAX);
    let compliance = 1.0 - f64::from(inputs.violations) / f64::from(allowance);

    let score = weights.distance() * efficiency + weights.diversity() * compliance;
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Shortest anchored path length over every visiting order.
///
/// Enumerates all `n!` permutations in lexicographic order, which stays
/// cheap for the six places a request may carry.
#[must_use]
pub fn reference_distance_km(matrix: &DistanceMatrix) -> f64 {
    let mut order: Vec<usize> = (0..matrix.len()).collect();
    let mut best = matrix.anchored_path_km(&order);
    while next_permutation(&mut order) {
        best = best.min(matrix.anchored_path_km(&order));
    }
    best
}

/// Advance `order` to its lexicographic successor.
///
/// Returns `false`, leaving `order` untouched, once the last permutation
/// has been reached.
fn next_permutation(order: &mut [usize]) -> bool {
    let Some(pivot) = order.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    let Some(successor) = order.iter().rposition(|&value| value > order[pivot]) else {
        return false;
    };
    order.swap(pivot, successor);
    order[pivot + 1..].reverse();
    true
}
