//! Multi-start nearest-neighbour construction.
//!
//! Every place is tried as the first stop. Each walk greedily moves to the
//! closest unvisited place, breaking ties by the lowest input index. The
//! shortest walk seeds refinement and the longest becomes the scoring
//! baseline.
//!
//! When the request carries an anchor, every walk would start there anyway,
//! so a single walk from the anchor is performed.
//!
//! # Complexity
//!
//! O(n²) per walk, O(n³) overall. The engine caps `n` at six.

use course_core::{DistanceMatrix, Tour};

/// Result of the construction stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    /// Shortest walk found.
    pub seed: Tour,
    /// Length of [`Self::seed`], anchor leg included.
    pub seed_km: f64,
    /// Length of the longest walk, anchor leg included.
    pub baseline_km: f64,
    /// Number of walks evaluated.
    pub candidates: u32,
}

/// Build the seed tour for `matrix`.
///
/// Ties between equally short walks keep the one with the lowest start index.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use course_core::DistanceMatrix;
/// use course_solver::construct_tour;
///
/// let coords = [
///     Coord { x: 0.00, y: 0.0 },
///     Coord { x: 0.02, y: 0.0 },
///     Coord { x: 0.01, y: 0.0 },
/// ];
/// let matrix = DistanceMatrix::build(&coords, None)?;
/// let construction = construct_tour(&matrix);
/// assert_eq!(construction.seed.as_slice(), &[0, 2, 1]);
/// assert_eq!(construction.candidates, 3);
/// # Ok::<(), course_core::GeometryError>(())
/// ```
#[must_use]
pub fn construct_tour(matrix: &DistanceMatrix) -> Construction {
    let walks: Vec<Tour> = if matrix.has_anchor() {
        vec![nearest_neighbour_walk(matrix, None)]
    } else {
        (0..matrix.len())
            .map(|start| nearest_neighbour_walk(matrix, Some(start)))
            .collect()
    };

    let mut seed: Option<(Tour, f64)> = None;
    let mut baseline_km = 0.0_f64;
    for walk in &walks {
        let km = matrix.anchored_path_km(walk.as_slice());
        baseline_km = baseline_km.max(km);
        if seed.as_ref().is_none_or(|(_, best)| km < *best) {
            seed = Some((walk.clone(), km));
        }
    }

    let (seed, seed_km) = seed.unwrap_or_else(|| (Tour::identity(matrix.len()), 0.0));
    Construction {
        seed,
        seed_km,
        baseline_km,
        candidates: u32::try_from(walks.len()).unwrap_or(u32::MAX),
    }
}

/// Greedy walk from `start`, or from the anchor when `start` is `None`.
fn nearest_neighbour_walk(matrix: &DistanceMatrix, start: Option<usize>) -> Tour {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = start;
    if let Some(first) = start {
        mark(&mut visited, first);
        order.push(first);
    }

    while order.len() < n {
        let next = (0..n)
            .filter(|&candidate| !visited.get(candidate).copied().unwrap_or(true))
            .map(|candidate| (candidate, step_km(matrix, current, candidate)))
            // `min_by` keeps the first minimum, i.e. the lowest index on ties.
            .min_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs));
        let Some((chosen, _)) = next else {
            break;
        };
        mark(&mut visited, chosen);
        order.push(chosen);
        current = Some(chosen);
    }

    Tour::from_order(order).unwrap_or_else(|| {
        debug_assert!(false, "nearest-neighbour walk produced a non-permutation");
        Tour::identity(n)
    })
}

fn step_km(matrix: &DistanceMatrix, from: Option<usize>, to: usize) -> f64 {
    from.map_or_else(
        || matrix.from_anchor(to).unwrap_or(0.0),
        |origin| matrix.get(origin, to),
    )
}

fn mark(visited: &mut [bool], index: usize) {
    if let Some(slot) = visited.get_mut(index) {
        *slot = true;
    }
}
