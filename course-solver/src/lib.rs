//! Heuristic course optimiser.
//!
//! This crate provides [`HeuristicOptimizer`], the default implementation of
//! the [`CourseOptimizer`](course_core::CourseOptimizer) trait, plus the
//! stages it chains together:
//!
//! 1. [`construct_tour`]: multi-start nearest-neighbour seed.
//! 2. [`refine_tour`]: best-improvement 2-opt on the open path.
//! 3. [`adjust_diversity`]: bounded swaps that break same-category runs.
//! 4. [`build_schedule`]: arrival and departure timestamps.
//! 5. [`optimization_score`]: distance efficiency blended with diversity.
//!
//! Every stage is a pure function of its inputs and an immutable
//! [`OptimizerConfig`](course_core::OptimizerConfig); nothing is cached
//! between calls.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod construct;
mod diversity;
mod optimizer;
mod refine;
mod schedule;
mod score;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use construct::{Construction, construct_tour};
pub use diversity::{CategoryRun, DiversityOutcome, adjust_diversity, category_runs};
pub use optimizer::{
    HeuristicOptimizer, OptimizationReport, Stage, optimize_course, optimize_course_at,
    optimize_course_with_diagnostics,
};
pub use refine::{Refinement, refine_tour};
pub use schedule::{Schedule, build_schedule};
pub use score::{ScoreInputs, optimization_score, reference_distance_km};
