//! High-level entry point for maximizing a constrained `LogLikelihood`.
//!
//! Validates the start point, builds a Nelder–Mead simplex scaled by the
//! model's step scales, wraps the model in an `ArgMinAdapter` (which
//! *minimizes* the penalized negative log-likelihood plus a merit term), and
//! delegates the run to `run_nelder_mead`. The run is then repeated from a
//! fresh simplex around its best point while that still lowers the solver
//! cost, up to `opts.polish_rounds` times.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::build_nelder_mead,
        run::run_nelder_mead,
        traits::{ConstrainedLogLikelihood, DEFAULT_TOL_COST, LocalOptimizer, MLEOptions},
        validation::{validate_start, verify_penalty},
    },
};

/// Maximize `ℓ(θ) - penalty · Σ min(m(θ), 0)²` from `theta0` with Nelder–Mead.
///
/// # Errors
/// - Propagates any error from `f.check` and start-point validation.
/// - [`OptError::InvalidPenalty`](crate::optimization::errors::OptError::InvalidPenalty)
///   for a coefficient that is not finite and above 1.
/// - Propagates builder and runtime errors.
pub fn maximize<F: ConstrainedLogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, penalty: f64, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    validate_start(&theta0, theta0.len())?;
    verify_penalty(penalty)?;
    let evaluator = ArgMinAdapter::new(f, data, penalty, opts.merit_weight);
    let tol = opts.tols.tol_cost.unwrap_or(DEFAULT_TOL_COST);

    let mut best = solve_from(f, theta0, data, penalty, opts)?;
    let mut best_cost = evaluator.evaluate(&best.theta_hat)?.cost;
    for _ in 0..opts.polish_rounds {
        let mut next = solve_from(f, best.theta_hat.clone(), data, penalty, opts)?;
        let next_cost = evaluator.evaluate(&next.theta_hat)?.cost;
        let gain = best_cost - next_cost;
        if next_cost < best_cost {
            add_counts(&mut next, &best);
            best = next;
            best_cost = next_cost;
        } else {
            add_counts(&mut best, &next);
        }
        if !(gain > tol * (1.0 + best_cost.abs())) {
            break;
        }
    }
    Ok(best)
}

/// One Nelder–Mead run from a simplex built around `theta0`.
fn solve_from<F: ConstrainedLogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, penalty: f64, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    let scales = f.step_scales(&theta0, data);
    let solver = build_nelder_mead(&theta0, &scales, opts)?;
    let problem = ArgMinAdapter::new(f, data, penalty, opts.merit_weight);
    run_nelder_mead(problem, solver, opts)
}

/// Fold the iteration and evaluation counters of `other` into `into`.
fn add_counts(into: &mut OptimOutcome, other: &OptimOutcome) {
    into.iterations += other.iterations;
    for (name, count) in &other.fn_evals {
        *into.fn_evals.entry(name.clone()).or_insert(0) += count;
    }
}

/// [`LocalOptimizer`] backed by [`maximize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NelderMeadOptimizer;

impl LocalOptimizer for NelderMeadOptimizer {
    fn maximize<F: ConstrainedLogLikelihood>(
        &self, f: &F, theta0: Theta, data: &F::Data, penalty: f64, opts: &MLEOptions,
    ) -> OptResult<OptimOutcome> {
        maximize(f, theta0, data, penalty, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{
            adapter::test_problems::BoxedQuadratic,
            traits::{LogLikelihood, Tolerances},
        },
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn opts() -> MLEOptions {
        let tols = Tolerances::new(Some(1e-12), Some(2_000)).expect("valid tolerances");
        MLEOptions::new(tols, 0.1, 1e6, false).expect("valid options")
    }

    #[test]
    // Purpose
    // -------
    // An interior optimum is found when no constraint binds.
    //
    // Given
    // -----
    // - ℓ(x) = -|x - (0.3, 0.7)|², lower bounds far away, start at 0.
    //
    // Expect
    // ------
    // - θ̂ ≈ (0.3, 0.7), log-likelihood ≈ 0, feasible.
    fn finds_interior_optimum() {
        // Arrange
        let f = BoxedQuadratic { target: vec![0.3, 0.7], lower: vec![-10.0, -10.0] };

        // Act
        let out = maximize(&f, array![0.0, 0.0], &(), 2.0, &opts()).expect("runs");

        // Assert
        assert_abs_diff_eq!(out.theta_hat[0], 0.3, epsilon = 1e-4);
        assert_abs_diff_eq!(out.theta_hat[1], 0.7, epsilon = 1e-4);
        assert_abs_diff_eq!(out.loglik, 0.0, epsilon = 1e-6);
        assert_eq!(out.max_violation, 0.0);
    }

    #[test]
    // Purpose
    // -------
    // A binding constraint holds the solution on the boundary.
    //
    // Given
    // -----
    // - Target (1, -1) with x >= 0: the constrained optimum is (1, 0).
    fn respects_binding_constraint() {
        let f = BoxedQuadratic { target: vec![1.0, -1.0], lower: vec![0.0, 0.0] };
        let out = NelderMeadOptimizer
            .maximize(&f, array![0.5, 0.5], &(), 2.0, &opts())
            .expect("runs");
        assert_abs_diff_eq!(out.theta_hat[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(out.theta_hat[1], 0.0, epsilon = 1e-3);
        assert!(out.max_violation < 1e-6);
    }

    /// `ℓ(a, b) = n · ln(a + (1 - a - b) / 2)` on the simplex `a, b >= 0`,
    /// `a + b <= 1`: a truthful-reporting weight `a`, a weight `b` on a
    /// strategy the data never supports, and a coin-flip residual. The
    /// optimum sits on the corner `(1, 0)`.
    struct CornerMixture {
        n: f64,
    }

    impl LogLikelihood for CornerMixture {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<f64> {
            let (a, b) = (theta[0], theta[1]);
            Ok(self.n * (a + 0.5 * (1.0 - a - b)).ln())
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }
    }

    impl ConstrainedLogLikelihood for CornerMixture {
        fn margins(&self, theta: &Theta, _data: &()) -> OptResult<Vec<f64>> {
            Ok(vec![theta[0], theta[1], 1.0 - theta[0] - theta[1]])
        }
    }

    #[test]
    // Purpose
    // -------
    // Rebuilding the simplex carries the search into a constraint corner.
    //
    // Given
    // -----
    // - `CornerMixture` with n = 300 from (0.3, 0.3) and default options.
    //
    // Expect
    // ------
    // - θ̂ ≈ (1, 0), log-likelihood ≈ 0, feasible; the polished solve
    //   reports iteration counts summed over its rounds.
    fn polishing_reaches_constraint_corner() {
        // Arrange
        let f = CornerMixture { n: 300.0 };
        let polished_opts = MLEOptions::default();
        let single_opts = MLEOptions::default().with_polish_rounds(0);

        // Act
        let polished = maximize(&f, array![0.3, 0.3], &(), 2.0, &polished_opts).expect("runs");
        let single = maximize(&f, array![0.3, 0.3], &(), 2.0, &single_opts).expect("runs");

        // Assert
        assert!(polished.theta_hat[0] > 0.999, "{}", polished.theta_hat);
        assert!(polished.theta_hat[1] < 1e-3, "{}", polished.theta_hat);
        assert!(polished.loglik > -0.5, "{}", polished.loglik);
        assert!(polished.max_violation < 1e-8);
        assert!(polished.iterations >= single.iterations);
    }

    #[test]
    fn rejects_bad_penalty_and_start() {
        let f = BoxedQuadratic { target: vec![0.0], lower: vec![0.0] };
        assert!(matches!(
            maximize(&f, array![0.1], &(), 0.5, &opts()),
            Err(OptError::InvalidPenalty { .. })
        ));
        assert!(matches!(
            maximize(&f, array![f64::NAN], &(), 2.0, &opts()),
            Err(OptError::InvalidStartPoint { .. })
        ));
    }
}
