//! Soft repair of same-category runs.
//!
//! A run is a maximal stretch of consecutive stops sharing a category. Runs
//! longer than [`DiversityPolicy::max_run`] are violations. Repair swaps one
//! stop inside a run with a stop of another category outside it, provided
//! the swap removes at least one violation and lengthens the tour by no more
//! than [`DiversityPolicy::distance_tolerance`] of the current total.
//! Whatever cannot be repaired is reported, never rejected.

use std::cmp::Ordering;

use course_core::{Category, DistanceMatrix, DiversityPolicy, Tour};

/// A maximal stretch of same-category stops, in tour positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRun {
    /// Position of the first stop in the run.
    pub start: usize,
    /// Number of stops in the run.
    pub len: usize,
    /// Category shared by the run.
    pub category: Category,
}

impl CategoryRun {
    fn contains(&self, position: usize) -> bool {
        (self.start..self.start + self.len).contains(&position)
    }
}

/// Result of the diversity stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DiversityOutcome {
    /// The adjusted tour.
    pub tour: Tour,
    /// Length of [`Self::tour`], anchor leg included.
    pub distance_km: f64,
    /// Runs longer than the policy allows that survived repair.
    pub violations: u32,
    /// Swaps applied.
    pub swaps: u32,
}

/// Runs in `order` longer than `max_run` stops.
///
/// `categories` is indexed by place, not by tour position.
///
/// # Examples
/// ```
/// use course_core::Category::{Cafe, Park};
/// use course_solver::category_runs;
///
/// let categories = [Cafe, Cafe, Park, Cafe];
/// assert!(category_runs(&[0, 1, 2, 3], &categories, 2).is_empty());
/// let runs = category_runs(&[0, 1, 3, 2], &categories, 2);
/// assert_eq!(runs.len(), 1);
/// assert_eq!((runs[0].start, runs[0].len), (0, 3));
/// ```
#[must_use]
pub fn category_runs(order: &[usize], categories: &[Category], max_run: usize) -> Vec<CategoryRun> {
    let mut runs = Vec::new();
    let mut current: Option<CategoryRun> = None;
    for (position, &place) in order.iter().enumerate() {
        let category = categories.get(place).copied();
        current = match (current, category) {
            (Some(mut run), Some(next)) if run.category == next => {
                run.len += 1;
                Some(run)
            }
            (previous, next) => {
                runs.extend(previous.filter(|run| run.len > max_run));
                next.map(|category| CategoryRun {
                    start: position,
                    len: 1,
                    category,
                })
            }
        };
    }
    runs.extend(current.filter(|run| run.len > max_run));
    runs
}

/// Repair category runs in `tour` within the distance budget of `policy`.
///
/// Each round evaluates every swap between a stop inside a run and a stop
/// of a different category outside it. Qualifying swaps are ranked by the
/// gap between the two positions, then by distance increase, then by the
/// positions themselves; the best is applied and the tour re-scanned.
#[must_use]
pub fn adjust_diversity(
    tour: &Tour,
    categories: &[Category],
    matrix: &DistanceMatrix,
    policy: &DiversityPolicy,
) -> DiversityOutcome {
    let mut current = tour.clone();
    let mut distance_km = matrix.anchored_path_km(current.as_slice());
    let mut runs = category_runs(current.as_slice(), categories, policy.max_run);
    let mut swaps = 0_u32;

    // Every applied swap removes at least one run, so this terminates.
    while !runs.is_empty() {
        let Some(best) = best_swap(&current, categories, matrix, policy, &runs, distance_km)
        else {
            break;
        };
        log::trace!(
            "diversity swap of positions {} and {} adds {:.6} km",
            best.run_pos,
            best.other_pos,
            best.increase_km
        );
        current = best.tour;
        distance_km = matrix.anchored_path_km(current.as_slice());
        runs = best.runs;
        swaps = swaps.saturating_add(1);
    }

    DiversityOutcome {
        tour: current,
        distance_km,
        violations: u32::try_from(runs.len()).unwrap_or(u32::MAX),
        swaps,
    }
}

struct Swap {
    run_pos: usize,
    other_pos: usize,
    increase_km: f64,
    tour: Tour,
    runs: Vec<CategoryRun>,
}

impl Swap {
    fn gap(&self) -> usize {
        self.run_pos.abs_diff(self.other_pos)
    }

    fn rank(&self, other: &Self) -> Ordering {
        self.gap()
            .cmp(&other.gap())
            .then(self.increase_km.total_cmp(&other.increase_km))
            .then((self.run_pos, self.other_pos).cmp(&(other.run_pos, other.other_pos)))
    }
}

/// Best-ranked swap that reduces the run count within the budget.
fn best_swap(
    tour: &Tour,
    categories: &[Category],
    matrix: &DistanceMatrix,
    policy: &DiversityPolicy,
    runs: &[CategoryRun],
    distance_km: f64,
) -> Option<Swap> {
    let budget_km = policy.distance_tolerance * distance_km;
    let order = tour.as_slice();
    let mut best: Option<Swap> = None;

    for run in runs {
        for run_pos in run.start..run.start + run.len {
            for (other_pos, &place) in order.iter().enumerate() {
                if run.contains(other_pos) {
                    continue;
                }
                if categories.get(place).is_none_or(|&c| c == run.category) {
                    continue;
                }
                let candidate = tour.swapped(run_pos, other_pos);
                let increase_km = matrix.anchored_path_km(candidate.as_slice()) - distance_km;
                if increase_km > budget_km {
                    continue;
                }
                let candidate_runs =
                    category_runs(candidate.as_slice(), categories, policy.max_run);
                if candidate_runs.len() >= runs.len() {
                    continue;
                }
                let swap = Swap {
                    run_pos,
                    other_pos,
                    increase_km,
                    tour: candidate,
                    runs: candidate_runs,
                };
                if best
                    .as_ref()
                    .is_none_or(|current| swap.rank(current) == Ordering::Less)
                {
                    best = Some(swap);
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::Category::{Bar, Cafe, Park, Restaurant};
    use course_core::test_support::offset_km;
    use geo::Coord;
    use rstest::rstest;

    fn matrix_km(points: &[(f64, f64)]) -> DistanceMatrix {
        let coords: Vec<Coord<f64>> = points.iter().map(|&(e, n)| offset_km(e, n)).collect();
        DistanceMatrix::build(&coords, None).expect("valid coordinates")
    }

    fn tour(order: &[usize]) -> Tour {
        Tour::from_order(order.to_vec()).expect("permutation")
    }

    #[rstest]
    #[case(&[Cafe, Cafe, Cafe, Restaurant], vec![(0, 3)])]
    #[case(&[Cafe, Cafe, Restaurant, Cafe, Cafe], vec![])]
    #[case(&[Park, Cafe, Cafe, Cafe, Cafe, Bar], vec![(1, 4)])]
    #[case(&[Cafe, Cafe, Cafe, Park, Park, Park], vec![(0, 3), (3, 3)])]
    fn detects_runs_longer_than_two(
        #[case] categories: &[Category],
        #[case] expected: Vec<(usize, usize)>,
    ) {
        let order: Vec<usize> = (0..categories.len()).collect();
        let runs: Vec<(usize, usize)> = category_runs(&order, categories, 2)
            .iter()
            .map(|run| (run.start, run.len))
            .collect();
        assert_eq!(runs, expected);
    }

    #[rstest]
    fn single_category_cannot_be_repaired() {
        let matrix = matrix_km(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let outcome = adjust_diversity(
            &tour(&[0, 1, 2]),
            &[Cafe, Cafe, Cafe],
            &matrix,
            &DiversityPolicy::default(),
        );
        assert_eq!(outcome.violations, 1);
        assert_eq!(outcome.swaps, 0);
        assert_eq!(outcome.tour.as_slice(), &[0, 1, 2]);
    }

    #[rstest]
    fn cheap_swap_breaks_the_run() {
        // The restaurant sits just beside the last cafe.
        let matrix = matrix_km(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 0.05)]);
        let categories = [Cafe, Cafe, Cafe, Restaurant];
        let outcome = adjust_diversity(
            &tour(&[0, 1, 2, 3]),
            &categories,
            &matrix,
            &DiversityPolicy::default(),
        );
        assert_eq!(outcome.tour.as_slice(), &[0, 1, 3, 2]);
        assert_eq!(outcome.violations, 0);
        assert_eq!(outcome.swaps, 1);
        let before = matrix.anchored_path_km(&[0, 1, 2, 3]);
        assert!(outcome.distance_km <= before * 1.10);
    }

    #[rstest]
    fn zero_tolerance_only_accepts_free_swaps() {
        let matrix = matrix_km(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 0.05)]);
        let policy = DiversityPolicy {
            distance_tolerance: 0.0,
            ..DiversityPolicy::default()
        };
        let outcome = adjust_diversity(
            &tour(&[0, 1, 2, 3]),
            &[Cafe, Cafe, Cafe, Restaurant],
            &matrix,
            &policy,
        );
        assert_eq!(outcome.violations, 1);
        assert_eq!(outcome.swaps, 0);
    }

    #[rstest]
    fn distant_alternative_is_rejected() {
        // The only restaurant is far away from every cafe.
        let matrix = matrix_km(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (10.0, 0.0)]);
        let outcome = adjust_diversity(
            &tour(&[0, 1, 2, 3]),
            &[Cafe, Cafe, Cafe, Restaurant],
            &matrix,
            &DiversityPolicy::default(),
        );
        assert_eq!(outcome.violations, 1);
        assert_eq!(outcome.tour.as_slice(), &[0, 1, 2, 3]);
    }

    #[rstest]
    fn tour_without_runs_is_untouched() {
        let matrix = matrix_km(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let outcome = adjust_diversity(
            &tour(&[0, 1, 2, 3]),
            &[Cafe, Restaurant, Cafe, Restaurant],
            &matrix,
            &DiversityPolicy::default(),
        );
        assert_eq!(outcome.tour.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(outcome.violations, 0);
        assert_eq!(outcome.swaps, 0);
        assert!((outcome.distance_km - 3.0).abs() < 1e-6);
    }
}
