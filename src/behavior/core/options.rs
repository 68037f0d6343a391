//! Estimation options for a strategy model.
use crate::optimization::{
    errors::OptResult, loglik_optimizer::MLEOptions, multistart::MultiStartOptions,
};

/// Local-solver and multistart settings used by
/// [`StrategyModel::fit`](crate::behavior::models::estimator::StrategyModel::fit).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimationOptions {
    pub mle_opts: MLEOptions,
    pub multistart: MultiStartOptions,
}

impl EstimationOptions {
    /// Both parts are validated by their own constructors.
    pub fn new(mle_opts: MLEOptions, multistart: MultiStartOptions) -> Self {
        Self { mle_opts, multistart }
    }

    /// Defaults with a fixed seed and, optionally, a fixed restart count.
    ///
    /// # Errors
    /// As [`MultiStartOptions::seeded`].
    pub fn seeded(restarts: Option<usize>, seed: u64) -> OptResult<Self> {
        let multistart = MultiStartOptions::seeded(restarts, seed)?;
        Ok(Self { mle_opts: MLEOptions::default(), multistart })
    }
}
