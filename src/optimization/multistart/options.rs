//! Configuration of the multistart driver.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::validation::verify_penalty,
    numerical_stability::FEASIBILITY_TOL,
};

/// Quadratic penalty coefficient of the first restart.
pub const DEFAULT_INITIAL_PENALTY: f64 = 2.0;

/// Number of penalty escalations allowed on a single restart before it is
/// abandoned.
pub const DEFAULT_MAX_ESCALATIONS: usize = 10;

/// Multistart configuration.
///
/// Fields:
/// - `restarts: Option<usize>` — number of accepted-or-abandoned restarts;
///   `None` defers to the problem's own default.
/// - `seed: Option<u64>` — seed of the start-point generator; `None` seeds
///   from the operating system.
/// - `initial_penalty: f64` — quadratic penalty coefficient at the first
///   restart. The coefficient is squared on every escalation and carries
///   over to later restarts.
/// - `max_escalations: usize` — escalations allowed per restart.
/// - `feasibility_tol: f64` — margins above `-feasibility_tol` count as
///   satisfied.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStartOptions {
    pub restarts: Option<usize>,
    pub seed: Option<u64>,
    pub initial_penalty: f64,
    pub max_escalations: usize,
    pub feasibility_tol: f64,
}

impl MultiStartOptions {
    /// # Errors
    /// - [`OptError::InvalidRestarts`] if `restarts == Some(0)`.
    /// - [`OptError::InvalidPenalty`] unless `initial_penalty` is finite and
    ///   above 1 (squaring must grow it).
    /// - [`OptError::InvalidFeasibilityTol`] for a negative or non-finite
    ///   tolerance.
    pub fn new(
        restarts: Option<usize>, seed: Option<u64>, initial_penalty: f64, max_escalations: usize,
        feasibility_tol: f64,
    ) -> OptResult<Self> {
        if restarts == Some(0) {
            return Err(OptError::InvalidRestarts {
                restarts: 0,
                reason: "At least one restart is required.",
            });
        }
        verify_penalty(initial_penalty)?;
        if !feasibility_tol.is_finite() || feasibility_tol < 0.0 {
            return Err(OptError::InvalidFeasibilityTol {
                tol: feasibility_tol,
                reason: "Feasibility tolerance must be finite and non-negative.",
            });
        }
        Ok(Self { restarts, seed, initial_penalty, max_escalations, feasibility_tol })
    }

    /// Same defaults with a fixed restart count and seed.
    ///
    /// # Errors
    /// As [`MultiStartOptions::new`].
    pub fn seeded(restarts: Option<usize>, seed: u64) -> OptResult<Self> {
        Self::new(
            restarts,
            Some(seed),
            DEFAULT_INITIAL_PENALTY,
            DEFAULT_MAX_ESCALATIONS,
            FEASIBILITY_TOL,
        )
    }
}

impl Default for MultiStartOptions {
    fn default() -> Self {
        Self {
            restarts: None,
            seed: None,
            initial_penalty: DEFAULT_INITIAL_PENALTY,
            max_escalations: DEFAULT_MAX_ESCALATIONS,
            feasibility_tol: FEASIBILITY_TOL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Constructor validation rejects unusable settings.
    //
    // Expect
    // ------
    // - Zero restarts, a penalty of 1, and a negative tolerance are errors.
    // - Defaults are accepted by `new`.
    fn options_validation() {
        assert!(matches!(
            MultiStartOptions::new(Some(0), None, 2.0, 10, 1e-8),
            Err(OptError::InvalidRestarts { .. })
        ));
        assert!(matches!(
            MultiStartOptions::new(None, None, 1.0, 10, 1e-8),
            Err(OptError::InvalidPenalty { .. })
        ));
        assert!(matches!(
            MultiStartOptions::new(None, None, 2.0, 10, -1.0),
            Err(OptError::InvalidFeasibilityTol { .. })
        ));

        let d = MultiStartOptions::default();
        let rebuilt = MultiStartOptions::new(
            d.restarts,
            d.seed,
            d.initial_penalty,
            d.max_escalations,
            d.feasibility_tol,
        )
        .expect("defaults are valid");
        assert_eq!(rebuilt, d);
        assert_eq!(MultiStartOptions::seeded(Some(3), 7).expect("valid").seed, Some(7));
    }
}
