//! Execution helper that runs the Nelder–Mead solver on a penalized problem and
//! returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome,
        adapter::ArgMinAdapter,
        traits::{ConstrainedLogLikelihood, MLEOptions},
        types::NelderMeadSolver,
    },
};
use argmin::core::{Executor, State};

/// Run Nelder–Mead on `problem` and re-evaluate the best vertex.
///
/// The solver's best cost includes the merit term, so the outcome's
/// `value`, `loglik`, and `max_violation` are recomputed at the best point.
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a terminal
/// slog observer is attached with `ObserverMode::Always`.
///
/// # Errors
/// - Propagates `argmin` runtime errors and model errors raised inside the
///   cost function via `From<argmin::core::Error>`.
/// - Propagates validation errors from [`OptimOutcome::new`].
pub fn run_nelder_mead<'a, F>(
    problem: ArgMinAdapter<'a, F>, solver: NelderMeadSolver, opts: &MLEOptions,
) -> OptResult<OptimOutcome>
where
    F: ConstrainedLogLikelihood,
{
    let evaluator =
        ArgMinAdapter::new(problem.f, problem.data, problem.penalty, problem.merit_weight);
    let mut optimizer = Executor::new(problem, solver);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer =
            optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let theta_hat = result.take_best_param();
    let eval = match &theta_hat {
        Some(theta) => Some(evaluator.evaluate(theta)?),
        None => None,
    };
    let (value, loglik, worst) =
        eval.map_or((f64::NEG_INFINITY, f64::NEG_INFINITY, f64::INFINITY), |e| {
            (e.penalized, e.loglik, e.max_violation)
        });
    OptimOutcome::new(theta_hat, value, loglik, worst, &termination, iterations, function_counts)
}
