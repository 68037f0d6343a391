//! behavior::models::estimator — StrategyModel: constrained MLE of one family.
//!
//! Purpose
//! -------
//! Tie a model family to the optimization layer. [`StrategyModel`]
//! implements [`LogLikelihood`], [`ConstrainedLogLikelihood`] and
//! [`RestartProblem`] over a [`TrainingSet`], runs the multistart driver in
//! [`StrategyModel::fit`], and caches the outcome and the fitted
//! parameters.
//!
//! Key behaviors
//! -------------
//! - Objective: the point is read with [`ModelParams::from_point`] and scored
//!   with [`log_likelihood`]; margins come from [`constraint_margins`].
//! - Simplex scales: the width of each coordinate's search range, so the
//!   switch threshold moves on the scale of its range rather than 0.1.
//! - Start points: mixture weights are a normalized vector of unit
//!   exponentials (uniform on the simplex), the error rate and threshold are
//!   uniform within their bounds, and CustomMixed conditionals are drawn
//!   inside their constraints. One coordinate is spread deterministically
//!   across restarts: the threshold for switching families
//!   (`max(lb, ub · i / n)`) and the error rate for s1-1 (`0.5 · i / n`).
//! - s1-1 estimates need no relabelling: swapping the MatchFirstLabel-custom
//!   and residual components leaves the likelihood unchanged, and the
//!   dominance rows of [`constraint_margins`] (custom ≥ mixed for both
//!   signals) admit only the labelling whose MatchFirstLabel component
//!   reports the first label more often. Every accepted point is therefore
//!   already in canonical form.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every drawn start satisfies all hard constraints.
//! - Results are `None` until a successful `fit`; the accessors return
//!   [`OptError::ModelNotFitted`] instead of panicking.
use crate::{
    behavior::{
        core::{
            bounds::{MAX_ERROR_RATE, MIN_MATCH_FIRST_CUSTOM, point_bounds, threshold_bounds},
            constraints::constraint_margins,
            family::ModelFamily,
            options::EstimationOptions,
            params::ModelParams,
        },
        models::{loglik::log_likelihood, scoring::HeldOutScore, training::TrainingSet},
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{
            ConstrainedLogLikelihood, LocalOptimizer, LogLikelihood, NelderMeadOptimizer, Theta,
        },
        multistart::{MultiStartOutcome, RestartProblem, multistart},
    },
};
use log::debug;
use ndarray::Array1;
use rand::{Rng, rngs::StdRng};

/// A behavioral model family together with its estimation state.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyModel {
    pub family: ModelFamily,
    pub options: EstimationOptions,
    pub results: Option<MultiStartOutcome>,
    pub fitted_params: Option<ModelParams>,
}

impl StrategyModel {
    pub fn new(family: ModelFamily, options: EstimationOptions) -> Self {
        Self { family, options, results: None, fitted_params: None }
    }

    /// Estimate the family's parameters on `data` with Nelder–Mead restarts.
    ///
    /// # Errors
    /// - [`OptError::Model`] wrapping `MissingPayoffPaths` if a switching
    ///   family is fitted on a set without payoff paths.
    /// - [`OptError::NoFeasibleRestart`] if every restart is abandoned.
    /// - Propagates solver errors.
    pub fn fit(&mut self, data: &TrainingSet) -> OptResult<()> {
        self.fit_with(data, &NelderMeadOptimizer)
    }

    /// [`fit`](Self::fit) with an arbitrary local optimizer.
    ///
    /// # Errors
    /// As [`fit`](Self::fit).
    pub fn fit_with<O: LocalOptimizer>(
        &mut self, data: &TrainingSet, optimizer: &O,
    ) -> OptResult<()> {
        data.ensure_supports(self.family)?;
        let outcome =
            multistart(self, data, optimizer, &self.options.mle_opts, &self.options.multistart)?;
        let params = ModelParams::from_point(self.family, outcome.theta_hat.view())?;
        self.fitted_params = Some(params);
        self.results = Some(outcome);
        Ok(())
    }

    /// # Errors
    /// [`OptError::ModelNotFitted`] before a successful `fit`.
    pub fn results(&self) -> OptResult<&MultiStartOutcome> {
        self.results.as_ref().ok_or(OptError::ModelNotFitted)
    }

    /// # Errors
    /// [`OptError::ModelNotFitted`] before a successful `fit`.
    pub fn fitted_params(&self) -> OptResult<&ModelParams> {
        self.fitted_params.as_ref().ok_or(OptError::ModelNotFitted)
    }

    /// Score the fitted parameters on (typically held-out) `data`.
    ///
    /// # Errors
    /// - [`OptError::ModelNotFitted`] before a successful `fit`.
    /// - Model errors from the evaluation.
    pub fn score(&self, data: &TrainingSet) -> OptResult<HeldOutScore> {
        Ok(HeldOutScore::evaluate(self.fitted_params()?, data)?)
    }
}

impl LogLikelihood for StrategyModel {
    type Data = TrainingSet;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = ModelParams::from_point(self.family, theta.view())?;
        Ok(log_likelihood(&params, data)?)
    }

    /// Rejects a point of the wrong length and a training set the family
    /// cannot be evaluated on.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        ModelParams::from_point(self.family, theta.view())?;
        data.ensure_supports(self.family)?;
        Ok(())
    }
}

impl ConstrainedLogLikelihood for StrategyModel {
    fn margins(&self, theta: &Theta, data: &Self::Data) -> OptResult<Vec<f64>> {
        let params = ModelParams::from_point(self.family, theta.view())?;
        Ok(constraint_margins(&params, data.num_rounds()))
    }

    fn step_scales(&self, _theta: &Theta, data: &Self::Data) -> Theta {
        point_bounds(self.family, data.num_rounds()).iter().map(|b| b.width()).collect()
    }
}

impl RestartProblem for StrategyModel {
    fn default_restarts(&self, data: &Self::Data) -> usize {
        self.family.default_restarts(data.num_rounds())
    }

    fn draw_start(
        &self, restart: usize, num_restarts: usize, rng: &mut StdRng, data: &Self::Data,
    ) -> OptResult<Theta> {
        let start = draw_start_point(self.family, restart, num_restarts, data.num_rounds(), rng);
        debug!("{} restart {restart}: start {start}", self.family);
        Ok(start)
    }
}

/// Uniform draw on the `k`-simplex: normalized unit exponentials.
fn simplex_draw(rng: &mut StdRng, k: usize) -> Vec<f64> {
    let draws: Vec<f64> = (0..k).map(|_| -(1.0 - rng.random::<f64>()).ln()).collect();
    let total: f64 = draws.iter().sum();
    if total > 0.0 && total.is_finite() {
        draws.iter().map(|d| d / total).collect()
    } else {
        vec![1.0 / k as f64; k]
    }
}

/// Random start for restart `restart` of `num_restarts`, in `family`'s layout.
pub fn draw_start_point(
    family: ModelFamily, restart: usize, num_restarts: usize, num_rounds: usize, rng: &mut StdRng,
) -> Theta {
    let fraction = restart as f64 / num_restarts.max(1) as f64;
    let slots = if matches!(family, ModelFamily::SwitchMixed(_)) { 6 } else { 5 };
    let weights = simplex_draw(rng, slots);
    let mut x = weights[..4].to_vec();
    x.push(rng.random_range(0.0..MAX_ERROR_RATE));

    match family {
        ModelFamily::SingleStrategy => {}
        ModelFamily::SingleCustom => {
            x[4] = MAX_ERROR_RATE * fraction;
            let mm: [f64; 2] = [
                rng.random_range(MIN_MATCH_FIRST_CUSTOM..=1.0),
                rng.random_range(MIN_MATCH_FIRST_CUSTOM..=1.0),
            ];
            let mixed = [mm[0] * rng.random::<f64>(), mm[1] * rng.random::<f64>()];
            x.extend(mixed);
            x.extend(mm);
        }
        ModelFamily::SwitchOnce(_) | ModelFamily::SwitchMixed(_) => {
            let bounds = threshold_bounds(family, num_rounds);
            x.push(bounds.lower.max(bounds.upper * fraction));
            if matches!(family, ModelFamily::SwitchMixed(_)) {
                x.push(weights[4]);
                x.push(rng.random::<f64>());
                x.push(rng.random::<f64>());
            }
        }
    }
    Array1::from_vec(x)
}
