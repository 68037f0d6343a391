//! Problem-side hooks used by the multistart driver.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{ConstrainedLogLikelihood, Theta},
};
use rand::rngs::StdRng;

/// A constrained problem that can propose its own random starting points.
pub trait RestartProblem: ConstrainedLogLikelihood {
    /// Restart count used when the options leave it unset.
    fn default_restarts(&self, data: &Self::Data) -> usize;

    /// Draw the start point of restart `restart` out of `num_restarts`.
    ///
    /// The index lets a problem spread one coordinate deterministically
    /// across restarts; the remaining coordinates come from `rng`.
    fn draw_start(
        &self, restart: usize, num_restarts: usize, rng: &mut StdRng, data: &Self::Data,
    ) -> OptResult<Theta>;
}
