//! models — estimable behavioral-model families over experiment datasets.
//!
//! Purpose
//! -------
//! Turn the building blocks of [`crate::behavior::core`] into models that
//! can be evaluated, fitted and scored: a pre-processed [`TrainingSet`], the
//! per-family log-likelihood aggregator, and the [`StrategyModel`] estimator
//! that hands the aggregator to the multistart driver.
//!
//! Key behaviors
//! -------------
//! - [`training`]: games reduced once to prefix-count traces and payoff paths.
//! - [`loglik`]: `Σ_players ln L_player(θ)` for s1, s1-1, s3 and s2.
//! - [`estimator`]: [`StrategyModel`] implements the optimizer traits and
//!   caches the fitted parameters and the restart report.
//! - [`scoring`]: held-out log-likelihood next to the random-reporting
//!   baseline.
//!
//! Invariants & assumptions
//! ------------------------
//! - Switching families are only evaluated on training sets with payoff
//!   paths; every entry point checks this and fails with
//!   `ModelError::MissingPayoffPaths` rather than guessing.
//! - The aggregator is a pure function of `(params, data)`; the estimator
//!   owns no dataset.
//!
//! Downstream usage
//! ----------------
//! - Build a [`TrainingSet`] with [`TrainingSet::for_family`], create a
//!   [`StrategyModel`] with [`EstimationOptions`], call `fit`, then read
//!   `fitted_params()` / `results()` or `score(&held_out)`.
//!
//! Testing notes
//! -------------
//! - Aggregators are checked against hand-computed mixtures of the
//!   round-by-round reference kernel.
//! - End-to-end recovery on simulated data lives in the crate's integration
//!   tests.
//!
//! [`EstimationOptions`]: crate::behavior::core::options::EstimationOptions

pub mod estimator;
pub mod loglik;
pub mod scoring;
pub mod training;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::estimator::{StrategyModel, draw_start_point};
pub use self::loglik::{dataset_log_likelihood, log_likelihood, player_likelihood};
pub use self::scoring::{HeldOutScore, random_baseline};
pub use self::training::{PlayerRecord, TrainingSet};
