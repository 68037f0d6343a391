//! Adapter that exposes a constrained `LogLikelihood` as an `argmin` problem.
//!
//! The solver minimizes
//!
//! ```text
//! c(θ) = -(ℓ(θ) - ρ Σ_{m_i < 0} m_i²) + μ · max(0, -min_i m_i)
//! ```
//!
//! where `ρ` is the quadratic penalty coefficient of the current restart and
//! `μ` the merit weight. The quadratic part is the penalized log-likelihood
//! that the multistart driver reports; the merit part is an exact penalty
//! that keeps the simplex from drifting into regions where out-of-range
//! parameters inflate the likelihood. NaN log-likelihoods count as `-∞`.
use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::ConstrainedLogLikelihood,
        types::{Cost, Theta},
    },
    numerical_stability::{max_violation, quadratic_penalty, sanitize_loglik},
};
use argmin::core::{CostFunction, Error};

/// All terms of the objective at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveEval {
    /// Sanitized log-likelihood.
    pub loglik: f64,
    /// Quadratic penalty `ρ Σ m_i²` over violated margins.
    pub penalty: f64,
    /// Largest violation `max(0, -min m_i)`.
    pub max_violation: f64,
    /// `loglik - penalty`.
    pub penalized: f64,
    /// Cost handed to the solver; never NaN.
    pub cost: Cost,
}

/// Evaluate every objective term of `f` at `theta`.
///
/// # Errors
/// Propagates errors from `f.value` and `f.margins`.
pub fn penalized_objective<F: ConstrainedLogLikelihood>(
    f: &F, theta: &Theta, data: &F::Data, penalty: f64, merit_weight: f64,
) -> Result<ObjectiveEval, OptError> {
    let loglik = sanitize_loglik(f.value(theta, data)?);
    let margins = f.margins(theta, data)?;
    let quad = quadratic_penalty(&margins, penalty);
    let worst = max_violation(&margins);
    let penalized = loglik - quad;
    let merit = if worst > 0.0 { merit_weight * worst } else { 0.0 };
    let cost = -penalized + merit;
    let cost = if cost.is_nan() { f64::INFINITY } else { cost };
    Ok(ObjectiveEval { loglik, penalty: quad, max_violation: worst, penalized, cost })
}

/// Bridges a [`ConstrainedLogLikelihood`] to `argmin`'s `CostFunction`.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: ConstrainedLogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
    pub penalty: f64,
    pub merit_weight: f64,
}

impl<'a, F: ConstrainedLogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data, penalty: f64, merit_weight: f64) -> Self {
        Self { f, data, penalty, merit_weight }
    }

    pub fn evaluate(&self, theta: &Theta) -> Result<ObjectiveEval, OptError> {
        penalized_objective(self.f, theta, self.data, self.penalty, self.merit_weight)
    }
}

impl<'a, F: ConstrainedLogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// # Errors
    /// Propagates any `OptError` from the model via `?`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.evaluate(theta)?.cost)
    }
}
