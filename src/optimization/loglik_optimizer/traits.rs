//! Public API surface for constrained log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`ConstrainedLogLikelihood`]: adds inequality margins and simplex scales.
//! - [`LocalOptimizer`]: the substitutable derivative-free local solver.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`OptimOutcome`]: normalized result of one local solve.
//!
//! Convention: we *maximize* a penalized log-likelihood
//! `ℓ(θ) - ρ Σ min(m(θ), 0)²` by minimizing its negation plus an exact
//! penalty on the largest constraint violation (see
//! [`adapter`](crate::optimization::loglik_optimizer::adapter)).
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Theta,
        validation::{
            validate_theta_hat, validate_value, verify_initial_step, verify_merit_weight,
            verify_tol_cost,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use ndarray::Array1;

/// User-implemented log-likelihood interface.
///
/// - `type Data`: per-model data carried into `value`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`. `-∞` is a
///   legitimate value (a zero-probability point); NaN is treated as `-∞` by
///   the adapter.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   malformed `θ`/`data` pairs. Called once before optimization.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;
}

/// Log-likelihood with inequality constraints `m_i(θ) >= 0`.
pub trait ConstrainedLogLikelihood: LogLikelihood {
    /// Constraint margins at `θ`; `+∞` entries are inactive constraints.
    fn margins(&self, theta: &Theta, data: &Self::Data) -> OptResult<Vec<f64>>;

    /// Per-coordinate scale of the initial simplex (the search width of each
    /// coordinate). Defaults to 1.
    fn step_scales(&self, theta: &Theta, _data: &Self::Data) -> Theta {
        Array1::ones(theta.len())
    }
}

/// A derivative-free local solver for penalized constrained problems.
///
/// Given a start point and a quadratic penalty coefficient, return a refined
/// point. Running out of iterations is not an error: the caller inspects
/// feasibility of whatever point comes back.
pub trait LocalOptimizer {
    fn maximize<F: ConstrainedLogLikelihood>(
        &self, f: &F, theta0: Theta, data: &F::Data, penalty: f64, opts: &MLEOptions,
    ) -> OptResult<OptimOutcome>;
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — simplex tolerance and iteration cap.
/// - `initial_step: f64` — initial simplex edge as a fraction of each
///   coordinate's scale.
/// - `merit_weight: f64` — weight of the exact penalty on the largest
///   violation, added to the cost seen by the solver.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
/// - `polish_rounds: usize` — maximum number of extra solves from a fresh
///   simplex around the previous best point. A simplex pressed against a
///   constraint face can collapse before the optimum; rebuilding it lets the
///   search slide along the face. Polishing stops early once a round improves
///   the solver cost by less than `tol_cost` (relative).
///
/// Default:
/// - `tols`: `tol_cost = 1e-10`, `max_iter = 10_000`
/// - `initial_step`: `0.1`
/// - `merit_weight`: `1e6`
/// - `verbose`: `false`
/// - `polish_rounds`: `50`
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub initial_step: f64,
    pub merit_weight: f64,
    pub verbose: bool,
    pub polish_rounds: usize,
}

pub const DEFAULT_TOL_COST: f64 = 1e-10;
pub const DEFAULT_MAX_ITER: usize = 10_000;
pub const DEFAULT_INITIAL_STEP: f64 = 0.1;
pub const DEFAULT_MERIT_WEIGHT: f64 = 1e6;
pub const DEFAULT_POLISH_ROUNDS: usize = 50;

impl MLEOptions {
    /// # Errors
    /// - [`OptError::InvalidInitialStep`] / [`OptError::InvalidMeritWeight`]
    ///   for non-finite or out-of-range values.
    pub fn new(
        tols: Tolerances, initial_step: f64, merit_weight: f64, verbose: bool,
    ) -> OptResult<Self> {
        verify_initial_step(initial_step)?;
        verify_merit_weight(merit_weight)?;
        Ok(Self {
            tols,
            initial_step,
            merit_weight,
            verbose,
            polish_rounds: DEFAULT_POLISH_ROUNDS,
        })
    }

    /// Same options with at most `rounds` polishing solves (0 disables).
    pub fn with_polish_rounds(self, rounds: usize) -> Self {
        Self { polish_rounds: rounds, ..self }
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            initial_step: DEFAULT_INITIAL_STEP,
            merit_weight: DEFAULT_MERIT_WEIGHT,
            verbose: false,
            polish_rounds: DEFAULT_POLISH_ROUNDS,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_cost`: terminate when the standard deviation of the simplex costs
///   falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Either field can be `None` but **at least one** must be provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if both are `None`.
    /// - [`OptError::InvalidTolCost`] for non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(tol_cost: Option<f64>, max_iter: Option<usize>) -> OptResult<Self> {
        if tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_cost: Some(DEFAULT_TOL_COST), max_iter: Some(DEFAULT_MAX_ITER) }
    }
}

/// Result of one local solve.
///
/// - `theta_hat`: best point found.
/// - `value`: penalized log-likelihood at `theta_hat` (quadratic penalty
///   only, not the merit term).
/// - `loglik`: unpenalized log-likelihood at `theta_hat`.
/// - `max_violation`: largest constraint violation at `theta_hat`.
/// - `converged`: `true` if the simplex met its tolerance.
/// - `status`: human-readable termination status string.
/// - `iterations`, `fn_evals`: counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub loglik: f64,
    pub max_violation: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates validation errors for `theta_hat`, `value` or `loglik`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, loglik: f64, max_violation: f64,
        termination: &TerminationStatus, iterations: u64, fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        validate_value(loglik)?;
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        );
        let status = match termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        Ok(Self {
            theta_hat,
            value,
            loglik,
            max_violation,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Tolerances require at least one stopping rule and valid values.
    fn tolerances_validation() {
        assert_eq!(Tolerances::new(None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(Tolerances::new(Some(-1.0), None), Err(OptError::InvalidTolCost { .. })));
        assert!(matches!(Tolerances::new(None, Some(0)), Err(OptError::InvalidMaxIter { .. })));
        assert!(Tolerances::new(None, Some(10)).is_ok());
        let d = MLEOptions::default();
        assert_eq!(d.tols.tol_cost, Some(1e-10));
        assert_eq!(d.tols.max_iter, Some(10_000));
        assert_eq!(d.polish_rounds, 50);
        assert_eq!(d.clone().with_polish_rounds(0).polish_rounds, 0);
        assert!(MLEOptions::new(d.tols, 0.0, 1.0, false).is_err());
        assert!(MLEOptions::new(d.tols, 0.1, -1.0, false).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Only a met tolerance counts as convergence; hitting the iteration cap
    // does not.
    fn outcome_maps_termination_status() {
        let converged = OptimOutcome::new(
            Some(array![0.5]),
            -1.0,
            -1.0,
            0.0,
            &TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
        )
        .expect("valid outcome");
        assert!(converged.converged);
        assert_eq!(converged.iterations, 12);

        let capped = OptimOutcome::new(
            Some(array![0.5]),
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
            0.0,
            &TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            100,
            FnEvalMap::new(),
        )
        .expect("-inf is a valid log-likelihood");
        assert!(!capped.converged);
        assert!(capped.status.contains("MaxItersReached"));
    }
}
