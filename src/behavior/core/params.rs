//! behavior::core::params — typed parameter sets and the point mapping.
//!
//! Purpose
//! -------
//! Hold the parameters of each model family in its own struct and convert
//! them to and from the flat optimization point the local solver works on.
//! [`ModelParams`] is the closed union over the four families; every
//! family-dependent routine matches on it instead of inspecting names.
//!
//! Key behaviors
//! -------------
//! - [`ModelParams::from_point`] checks only the point length. Values are
//!   copied as given, so the optimizer may visit out-of-domain points; the
//!   constraint margins in [`crate::behavior::core::constraints`] push it back.
//! - [`ModelParams::to_point`] is the exact inverse: `to_point(from_point(x)) == x`.
//! - The validated constructors (`StrategyWeights::new`, `*Params::new`)
//!   are for callers building parameters by hand, e.g. for simulation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Weights are ordered Truthful, MatchFirstLabel, MatchSecondLabel,
//!   Opposite. The residual category gets `1 - Σ weights` (minus the
//!   fixed-custom weight in s2), clamped to 0 on overflow.
//!
//! Conventions
//! -----------
//! - Point layouts:
//!   - s1:   `[TR, MM, GB, OP, eps]`
//!   - s1-1: `[TR, MMcu, GB, OP, eps, mix_mm|mm, mix_mm|gb, mmcu_mm|mm, mmcu_mm|gb]`
//!   - s3:   `[TR, MM, GB, OP, eps, delta]`
//!   - s2:   `[TR, MM, GB, OP, eps, delta, w_fixed_cu, cu_mm|mm, cu_mm|gb]`
use crate::{
    behavior::{
        core::{
            bounds::{MAX_ERROR_RATE, MIN_MATCH_FIRST_CUSTOM},
            family::ModelFamily,
            strategy::ConditionalReport,
            switching::{SwitchMode, SwitchRule},
        },
        errors::{ModelError, ModelResult},
    },
    optimization::{loglik_optimizer::Theta, numerical_stability::residual_weight},
};
use ndarray::{Array1, ArrayView1};

/// Mixture weights of the four explicit pure-strategy categories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyWeights {
    pub truthful: f64,
    pub match_first: f64,
    pub match_second: f64,
    pub opposite: f64,
}

impl StrategyWeights {
    /// # Errors
    /// - [`ModelError::InvalidParams`] if a weight is negative or non-finite,
    ///   or the weights sum above 1.
    pub fn new(
        truthful: f64, match_first: f64, match_second: f64, opposite: f64,
    ) -> ModelResult<Self> {
        let weights = Self { truthful, match_first, match_second, opposite };
        if weights.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ModelError::InvalidParams {
                reason: "Mixture weights must be finite and non-negative.",
            });
        }
        if weights.total() > 1.0 + 1e-12 {
            return Err(ModelError::InvalidParams {
                reason: "Mixture weights must sum to at most 1.",
            });
        }
        Ok(weights)
    }

    fn from_slice(x: &[f64]) -> Self {
        Self { truthful: x[0], match_first: x[1], match_second: x[2], opposite: x[3] }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.truthful, self.match_first, self.match_second, self.opposite]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Weight of the implicit fifth category.
    pub fn residual(&self) -> f64 {
        residual_weight(self.total())
    }
}

fn check_error_rate(error_rate: f64) -> ModelResult<()> {
    if !error_rate.is_finite() || !(0.0..=MAX_ERROR_RATE).contains(&error_rate) {
        return Err(ModelError::InvalidParams { reason: "Error rate must lie in [0, 0.5]." });
    }
    Ok(())
}

fn check_threshold(threshold: f64) -> ModelResult<()> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(ModelError::InvalidParams { reason: "Switch threshold must be non-negative." });
    }
    Ok(())
}

/// s1: pure strategies for the whole game; Random takes the residual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleStrategyParams {
    pub weights: StrategyWeights,
    pub error_rate: f64,
}

impl SingleStrategyParams {
    pub fn new(weights: StrategyWeights, error_rate: f64) -> ModelResult<Self> {
        check_error_rate(error_rate)?;
        Ok(Self { weights, error_rate })
    }
}

/// s1-1: the MatchFirstLabel category plays `match_first_custom`, the
/// residual category plays `mixed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleCustomParams {
    pub weights: StrategyWeights,
    pub error_rate: f64,
    pub mixed: ConditionalReport,
    pub match_first_custom: ConditionalReport,
}

impl SingleCustomParams {
    /// # Errors
    /// - [`ModelError::InvalidParams`] for an out-of-range error rate, or when
    ///   `match_first_custom` is below 0.5 or below `mixed` for either signal.
    pub fn new(
        weights: StrategyWeights, error_rate: f64, mixed: ConditionalReport,
        match_first_custom: ConditionalReport,
    ) -> ModelResult<Self> {
        check_error_rate(error_rate)?;
        let mm = [match_first_custom.first_given_first, match_first_custom.first_given_second];
        let mix = [mixed.first_given_first, mixed.first_given_second];
        if mm.iter().any(|p| *p < MIN_MATCH_FIRST_CUSTOM) {
            return Err(ModelError::InvalidParams {
                reason: "MatchFirstLabel-custom probabilities must be at least 0.5.",
            });
        }
        if mm.iter().zip(&mix).any(|(a, b)| a < b) {
            return Err(ModelError::InvalidParams {
                reason: "MatchFirstLabel-custom probabilities must dominate the mixed ones.",
            });
        }
        Ok(Self { weights, error_rate, mixed, match_first_custom })
    }
}

/// s3: initial pure strategy with Random as the residual, one switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchOnceParams {
    pub mode: SwitchMode,
    pub weights: StrategyWeights,
    pub error_rate: f64,
    pub threshold: f64,
}

impl SwitchOnceParams {
    pub fn new(
        mode: SwitchMode, weights: StrategyWeights, error_rate: f64, threshold: f64,
    ) -> ModelResult<Self> {
        check_error_rate(error_rate)?;
        check_threshold(threshold)?;
        Ok(Self { mode, weights, error_rate, threshold })
    }
}

/// s2: four fixed pure strategies, a fixed CustomMixed category, and a
/// switching CustomMixed category (the residual). Both CustomMixed
/// categories share `custom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchMixedParams {
    pub mode: SwitchMode,
    pub weights: StrategyWeights,
    pub error_rate: f64,
    pub threshold: f64,
    pub fixed_custom_weight: f64,
    pub custom: ConditionalReport,
}

impl SwitchMixedParams {
    pub fn new(
        mode: SwitchMode, weights: StrategyWeights, error_rate: f64, threshold: f64,
        fixed_custom_weight: f64, custom: ConditionalReport,
    ) -> ModelResult<Self> {
        check_error_rate(error_rate)?;
        check_threshold(threshold)?;
        if !fixed_custom_weight.is_finite()
            || fixed_custom_weight < 0.0
            || weights.total() + fixed_custom_weight > 1.0 + 1e-12
        {
            return Err(ModelError::InvalidParams {
                reason: "Fixed-custom weight must be non-negative and keep the total at most 1.",
            });
        }
        Ok(Self { mode, weights, error_rate, threshold, fixed_custom_weight, custom })
    }

    /// Weight of the switching CustomMixed category.
    pub fn switching_weight(&self) -> f64 {
        residual_weight(self.weights.total() + self.fixed_custom_weight)
    }
}

/// Parameter set of any model family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelParams {
    SingleStrategy(SingleStrategyParams),
    SingleCustom(SingleCustomParams),
    SwitchOnce(SwitchOnceParams),
    SwitchMixed(SwitchMixedParams),
}

impl ModelParams {
    pub fn family(&self) -> ModelFamily {
        match self {
            ModelParams::SingleStrategy(_) => ModelFamily::SingleStrategy,
            ModelParams::SingleCustom(_) => ModelFamily::SingleCustom,
            ModelParams::SwitchOnce(p) => ModelFamily::SwitchOnce(p.mode),
            ModelParams::SwitchMixed(p) => ModelFamily::SwitchMixed(p.mode),
        }
    }

    /// Read a point in `family`'s layout.
    ///
    /// # Errors
    /// - [`ModelError::PointLengthMismatch`] if the length does not match.
    pub fn from_point(family: ModelFamily, point: ArrayView1<f64>) -> ModelResult<Self> {
        let spec = family.spec();
        if point.len() != spec.num_vars {
            return Err(ModelError::PointLengthMismatch {
                family: spec.name,
                expected: spec.num_vars,
                actual: point.len(),
            });
        }
        let x: Vec<f64> = point.iter().copied().collect();
        let weights = StrategyWeights::from_slice(&x[..4]);
        let error_rate = x[4];
        let params = match family {
            ModelFamily::SingleStrategy => {
                ModelParams::SingleStrategy(SingleStrategyParams { weights, error_rate })
            }
            ModelFamily::SingleCustom => ModelParams::SingleCustom(SingleCustomParams {
                weights,
                error_rate,
                mixed: ConditionalReport { first_given_first: x[5], first_given_second: x[6] },
                match_first_custom: ConditionalReport {
                    first_given_first: x[7],
                    first_given_second: x[8],
                },
            }),
            ModelFamily::SwitchOnce(mode) => ModelParams::SwitchOnce(SwitchOnceParams {
                mode,
                weights,
                error_rate,
                threshold: x[5],
            }),
            ModelFamily::SwitchMixed(mode) => ModelParams::SwitchMixed(SwitchMixedParams {
                mode,
                weights,
                error_rate,
                threshold: x[5],
                fixed_custom_weight: x[6],
                custom: ConditionalReport { first_given_first: x[7], first_given_second: x[8] },
            }),
        };
        Ok(params)
    }

    /// Flatten into the family's point layout.
    pub fn to_point(&self) -> Theta {
        let mut x = self.weights().as_array().to_vec();
        x.push(self.error_rate());
        match self {
            ModelParams::SingleStrategy(_) => {}
            ModelParams::SingleCustom(p) => x.extend([
                p.mixed.first_given_first,
                p.mixed.first_given_second,
                p.match_first_custom.first_given_first,
                p.match_first_custom.first_given_second,
            ]),
            ModelParams::SwitchOnce(p) => x.push(p.threshold),
            ModelParams::SwitchMixed(p) => x.extend([
                p.threshold,
                p.fixed_custom_weight,
                p.custom.first_given_first,
                p.custom.first_given_second,
            ]),
        }
        Array1::from_vec(x)
    }

    pub fn weights(&self) -> StrategyWeights {
        match self {
            ModelParams::SingleStrategy(p) => p.weights,
            ModelParams::SingleCustom(p) => p.weights,
            ModelParams::SwitchOnce(p) => p.weights,
            ModelParams::SwitchMixed(p) => p.weights,
        }
    }

    pub fn error_rate(&self) -> f64 {
        match self {
            ModelParams::SingleStrategy(p) => p.error_rate,
            ModelParams::SingleCustom(p) => p.error_rate,
            ModelParams::SwitchOnce(p) => p.error_rate,
            ModelParams::SwitchMixed(p) => p.error_rate,
        }
    }

    /// Switch rule of the switching families.
    pub fn switch_rule(&self) -> Option<SwitchRule> {
        match self {
            ModelParams::SwitchOnce(p) => Some(SwitchRule::new(p.mode, p.threshold)),
            ModelParams::SwitchMixed(p) => Some(SwitchRule::new(p.mode, p.threshold)),
            ModelParams::SingleStrategy(_) | ModelParams::SingleCustom(_) => None,
        }
    }

    /// `(name, value)` pairs in point order, for reporting.
    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        let names = self.family().spec().param_names;
        let point = self.to_point();
        names.iter().copied().zip(point.iter().copied()).collect()
    }
}

impl std::fmt::Display for ModelParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {{", self.family())?;
        for (i, (name, value)) in self.named_values().into_iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{name}: {value:.4}")?;
        }
        write!(f, " }}")
    }
}
