//! Orchestration of the optimisation stages.
//!
//! A request moves through a fixed sequence of [`Stage`]s. Only
//! [`Stage::Validating`] can fail; once a request has been validated every
//! later stage is total and a complete [`CourseRecommendation`] is returned.

use std::fmt;

use chrono::{DateTime, Utc};
use course_core::{
    Category, CourseOptimizer, CourseRecommendation, CourseRequest, Diagnostics, DistanceMatrix,
    OptimizeError, OptimizerConfig, ScoreWeights,
};
use log::debug;

use crate::construct::construct_tour;
use crate::diversity::adjust_diversity;
use crate::refine::refine_tour;
use crate::schedule::build_schedule;
use crate::score::{ScoreInputs, optimization_score, reference_distance_km};

/// States of the optimisation pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Checking the request and configuration.
    Validating,
    /// Building nearest-neighbour walks.
    Constructing,
    /// Running 2-opt.
    Refining,
    /// Repairing same-category runs.
    AdjustingDiversity,
    /// Assigning timestamps.
    Scheduling,
    /// Computing the quality score.
    Scoring,
    /// Recommendation complete.
    Done,
}

impl Stage {
    /// Lower-case label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Constructing => "constructing",
            Self::Refining => "refining",
            Self::AdjustingDiversity => "adjusting_diversity",
            Self::Scheduling => "scheduling",
            Self::Scoring => "scoring",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommendation together with how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationReport {
    /// The course returned to callers.
    pub recommendation: CourseRecommendation,
    /// Deterministic statistics about the run.
    pub diagnostics: Diagnostics,
}

/// Optimise `request`, using the current time when it has no start time.
///
/// # Errors
/// Returns [`OptimizeError`] when the request or configuration is invalid.
pub fn optimize_course(
    request: &CourseRequest,
    config: &OptimizerConfig,
) -> Result<CourseRecommendation, OptimizeError> {
    optimize_course_at(request, config, Utc::now())
}

/// Optimise `request`, using `now` when it has no start time.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use geo::Coord;
/// use course_core::{Category, CourseRequest, OptimizerConfig, PlaceInput};
/// use course_solver::optimize_course_at;
///
/// let place = |id: &str, category, x| {
///     PlaceInput::new(id, id, category, Coord { x, y: 0.0 })
/// };
/// let request = CourseRequest::new(vec![
///     place("museum", Category::Museum, 0.02),
///     place("cafe", Category::Cafe, 0.0),
///     place("park", Category::Park, 0.01),
/// ]);
/// let now = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap();
/// let course = optimize_course_at(&request, &OptimizerConfig::default(), now)?;
/// assert_eq!(course.place_ids(), vec!["museum", "park", "cafe"]);
/// assert_eq!(course.stops[0].arrival_time, now);
/// assert_eq!(course.diversity_violations, 0);
/// # Ok::<(), course_core::OptimizeError>(())
/// ```
///
/// # Errors
/// Returns [`OptimizeError`] when the request or configuration is invalid.
pub fn optimize_course_at(
    request: &CourseRequest,
    config: &OptimizerConfig,
    now: DateTime<Utc>,
) -> Result<CourseRecommendation, OptimizeError> {
    optimize_course_with_diagnostics(request, config, now).map(|report| report.recommendation)
}

/// Optimise `request` and report [`Diagnostics`] alongside the course.
///
/// # Errors
/// Returns [`OptimizeError`] when the request or configuration is invalid.
pub fn optimize_course_with_diagnostics(
    request: &CourseRequest,
    config: &OptimizerConfig,
    now: DateTime<Utc>,
) -> Result<OptimizationReport, OptimizeError> {
    enter(Stage::Validating);
    let (weights, matrix) = validate(request, config)?;
    let categories: Vec<Category> = request.places.iter().map(|p| p.category).collect();

    enter(Stage::Constructing);
    let construction = construct_tour(&matrix);

    enter(Stage::Refining);
    let refinement = refine_tour(&construction.seed, &matrix);

    enter(Stage::AdjustingDiversity);
    let diversity = adjust_diversity(&refinement.tour, &categories, &matrix, &config.diversity);

    enter(Stage::Scheduling);
    let start_time = request.start_time.unwrap_or(now);
    let schedule = build_schedule(&request.places, &diversity.tour, &matrix, config, start_time);

    enter(Stage::Scoring);
    let reference_km = reference_distance_km(&matrix);
    let score = optimization_score(
        &ScoreInputs {
            total_km: diversity.distance_km,
            baseline_km: construction.baseline_km,
            reference_km,
            violations: diversity.violations,
            stops: request.places.len(),
        },
        &weights,
    );

    enter(Stage::Done);
    Ok(OptimizationReport {
        recommendation: CourseRecommendation {
            stops: schedule.stops,
            total_distance_km: schedule.total_distance_km,
            total_duration_minutes: schedule.total_duration_minutes,
            optimization_score: score,
            diversity_violations: diversity.violations,
        },
        diagnostics: Diagnostics {
            candidates_evaluated: construction.candidates,
            seed_distance_km: construction.seed_km,
            baseline_distance_km: construction.baseline_km,
            refined_distance_km: refinement.distance_km,
            reference_distance_km: reference_km,
            two_opt_passes: refinement.passes,
            diversity_swaps: diversity.swaps,
        },
    })
}

fn enter(stage: Stage) {
    debug!("course optimizer stage: {stage}");
}

fn validate(
    request: &CourseRequest,
    config: &OptimizerConfig,
) -> Result<(ScoreWeights, DistanceMatrix), OptimizeError> {
    let weights = request.validate()?;
    config.validate()?;
    let coords: Vec<_> = request.places.iter().map(|p| p.location).collect();
    let matrix = DistanceMatrix::build(&coords, request.start_location).map_err(|source| {
        OptimizeError::Geometry {
            place_id: None,
            source,
        }
    })?;
    Ok((weights, matrix))
}

/// The default [`CourseOptimizer`]: nearest-neighbour construction, 2-opt
/// refinement and diversity repair.
///
/// Holds only an immutable [`OptimizerConfig`], so one instance can serve
/// concurrent requests.
///
/// # Examples
/// ```
/// use course_core::{CourseOptimizer, CourseRequest};
/// use course_solver::HeuristicOptimizer;
///
/// let optimizer = HeuristicOptimizer::new();
/// assert!(optimizer.optimize(&CourseRequest::new(Vec::new())).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeuristicOptimizer {
    config: OptimizerConfig,
}

impl HeuristicOptimizer {
    /// Construct an optimizer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an optimizer with explicit configuration.
    #[must_use]
    pub const fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimise `request`, using `now` when it has no start time.
    ///
    /// # Errors
    /// Returns [`OptimizeError`] when the request or configuration is invalid.
    pub fn optimize_at(
        &self,
        request: &CourseRequest,
        now: DateTime<Utc>,
    ) -> Result<CourseRecommendation, OptimizeError> {
        optimize_course_at(request, &self.config, now)
    }
}

impl CourseOptimizer for HeuristicOptimizer {
    fn optimize(&self, request: &CourseRequest) -> Result<CourseRecommendation, OptimizeError> {
        optimize_course(request, &self.config)
    }
}
