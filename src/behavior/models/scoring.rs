//! Held-out evaluation against a uniformly random reporter.
use crate::behavior::{
    core::params::ModelParams,
    errors::ModelResult,
    models::{loglik::log_likelihood, training::TrainingSet},
};
use std::f64::consts::LN_2;

/// Log-likelihood of a player who reports uniformly at random in every
/// round: `ln(0.5) · Σ players × rounds`.
pub fn random_baseline(data: &TrainingSet) -> f64 {
    -LN_2 * data.num_player_rounds() as f64
}

/// Model fit on a held-out set, next to the random baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldOutScore {
    pub loglik: f64,
    pub baseline: f64,
    /// `loglik - baseline`; positive when the model beats random reporting.
    pub improvement: f64,
    /// `loglik` per observed (player, round).
    pub per_round: f64,
}

impl HeldOutScore {
    /// # Errors
    /// As [`log_likelihood`].
    pub fn evaluate(params: &ModelParams, data: &TrainingSet) -> ModelResult<Self> {
        let loglik = log_likelihood(params, data)?;
        let baseline = random_baseline(data);
        let per_round = loglik / data.num_player_rounds() as f64;
        Ok(Self { loglik, baseline, improvement: loglik - baseline, per_round })
    }
}
