//! Immutable optimiser configuration.
//!
//! A configuration is passed by reference to every optimisation call. Nothing
//! here is mutated during a run, so one value can serve any number of
//! concurrent requests.

use crate::distance::SpeedProfile;
use crate::error::InvalidInputError;

/// Tolerance used when checking that score weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Default distance weight in the optimisation score.
pub const DEFAULT_DISTANCE_WEIGHT: f64 = 0.7;

/// Default diversity weight in the optimisation score.
pub const DEFAULT_DIVERSITY_WEIGHT: f64 = 0.3;

/// How strictly consecutive same-category stops are repaired.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiversityPolicy {
    /// Longest allowed run of consecutive stops sharing a category.
    pub max_run: usize,
    /// Largest accepted distance increase per repair swap, as a fraction of
    /// the current total distance.
    pub distance_tolerance: f64,
}

impl Default for DiversityPolicy {
    fn default() -> Self {
        Self {
            max_run: 2,
            distance_tolerance: 0.10,
        }
    }
}

/// Settings shared by every stage of the optimiser.
///
/// # Examples
/// ```
/// use course_core::OptimizerConfig;
///
/// let config = OptimizerConfig::default();
/// assert_eq!(config.default_visit_minutes, 60);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerConfig {
    /// Speeds used to turn distances into minutes.
    pub speed: SpeedProfile,
    /// Visit duration applied to places without an estimate.
    pub default_visit_minutes: u32,
    /// Category-run repair policy.
    pub diversity: DiversityPolicy,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            speed: SpeedProfile::default(),
            default_visit_minutes: 60,
            diversity: DiversityPolicy::default(),
        }
    }
}

impl OptimizerConfig {
    /// Validate every numeric setting.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        self.speed.validate()?;
        if self.diversity.max_run == 0 {
            return Err(InvalidInputError::InvalidConfig {
                field: "max_run",
                value: 0.0,
            });
        }
        let tolerance = self.diversity.distance_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(InvalidInputError::InvalidConfig {
                field: "distance_tolerance",
                value: tolerance,
            });
        }
        Ok(())
    }
}

/// Validated weights of the optimisation score.
///
/// Construction guarantees both weights are finite, non-negative and sum to
/// one within [`WEIGHT_SUM_TOLERANCE`].
///
/// # Examples
/// ```
/// use course_core::{InvalidInputError, ScoreWeights};
///
/// let weights = ScoreWeights::new(0.5, 0.5)?;
/// assert_eq!(weights.distance(), 0.5);
/// assert!(ScoreWeights::new(0.6, 0.3).is_err());
/// # Ok::<(), InvalidInputError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    distance: f64,
    diversity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE_WEIGHT,
            diversity: DEFAULT_DIVERSITY_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Validate and construct a weight pair.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::NegativeWeight`] for negative or
    /// non-finite weights and [`InvalidInputError::WeightSum`] when the pair
    /// does not sum to one.
    pub fn new(distance: f64, diversity: f64) -> Result<Self, InvalidInputError> {
        for (field, value) in [("distance_weight", distance), ("diversity_weight", diversity)] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidInputError::NegativeWeight { field, value });
            }
        }
        if ((distance + diversity) - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(InvalidInputError::WeightSum {
                distance_weight: distance,
                diversity_weight: diversity,
            });
        }
        Ok(Self {
            distance,
            diversity,
        })
    }

    /// Weight of the distance-efficiency term.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Weight of the diversity-compliance term.
    #[must_use]
    pub const fn diversity(&self) -> f64 {
        self.diversity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.7, 0.3)]
    #[case(1.0, 0.0)]
    #[case(0.0, 1.0)]
    #[case(0.1 + 0.2, 0.7)]
    fn accepts_weights_summing_to_one(#[case] distance: f64, #[case] diversity: f64) {
        assert!(ScoreWeights::new(distance, diversity).is_ok());
    }

    #[rstest]
    fn rejects_weights_not_summing_to_one() {
        let err = ScoreWeights::new(0.6, 0.3).expect_err("sum is 0.9");
        assert_eq!(
            err,
            InvalidInputError::WeightSum {
                distance_weight: 0.6,
                diversity_weight: 0.3,
            }
        );
    }

    #[rstest]
    #[case(-0.5, 1.5, "distance_weight")]
    #[case(1.0, f64::NAN, "diversity_weight")]
    fn rejects_negative_or_nan_weights(
        #[case] distance: f64,
        #[case] diversity: f64,
        #[case] expected: &str,
    ) {
        match ScoreWeights::new(distance, diversity) {
            Err(InvalidInputError::NegativeWeight { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected NegativeWeight, found {other:?}"),
        }
    }

    #[rstest]
    fn default_config_is_valid() {
        assert!(OptimizerConfig::default().validate().is_ok());
    }

    #[rstest]
    fn zero_max_run_is_rejected() {
        let mut config = OptimizerConfig::default();
        config.diversity.max_run = 0;
        assert!(matches!(
            config.validate(),
            Err(InvalidInputError::InvalidConfig { field: "max_run", .. })
        ));
    }

    #[rstest]
    fn negative_tolerance_is_rejected() {
        let mut config = OptimizerConfig::default();
        config.diversity.distance_tolerance = -0.1;
        assert!(matches!(
            config.validate(),
            Err(InvalidInputError::InvalidConfig {
                field: "distance_tolerance",
                ..
            })
        ));
    }
}
