//! behavior — behavioral strategy models for repeated reporting games.
//!
//! Purpose
//! -------
//! Describe how players choose reports from private signals, compute the
//! likelihood of observed play under each model family, and estimate the
//! family's parameters by constrained maximum likelihood.
//!
//! Key behaviors
//! -------------
//! - [`core`]: strategies, per-interval likelihood kernels, the payoff-driven
//!   switch detector, family layouts, parameter sets, bounds and constraint
//!   margins.
//! - [`models`]: training sets, log-likelihood aggregators, the
//!   [`StrategyModel`] estimator and held-out scoring.
//! - [`simulate`]: synthetic games generated from any family's parameters.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every call receives its experiment settings as an explicit
//!   [`ExperimentContext`](crate::experiment::core::context::ExperimentContext);
//!   nothing here reads global state.
//! - Errors surface as [`ModelError`]; the optimization layer wraps them in
//!   `OptError::Model`.

pub mod core;
pub mod errors;
pub mod models;
pub mod simulate;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::core::{
    family::ModelFamily,
    options::EstimationOptions,
    params::ModelParams,
    strategy::{ConditionalReport, PureStrategy, Strategy},
    switching::{SwitchMode, SwitchPoint, SwitchRule},
};
pub use self::errors::{ModelError, ModelResult};
pub use self::models::{HeldOutScore, StrategyModel, TrainingSet};
pub use self::simulate::{SimOpts, simulate_games};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use strategy_mle::behavior::prelude::*;
//
// to import the estimation surface in a single line.

pub mod prelude {
    pub use super::{
        ConditionalReport, EstimationOptions, HeldOutScore, ModelError, ModelFamily, ModelParams,
        ModelResult, PureStrategy, SimOpts, Strategy, StrategyModel, SwitchMode, SwitchRule,
        TrainingSet, simulate_games,
    };
}
