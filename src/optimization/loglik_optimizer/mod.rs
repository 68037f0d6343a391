//! loglik_optimizer — argmin-powered constrained log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide the local-solve layer for **maximizing constrained
//! log-likelihoods** `ℓ(θ)` subject to `m(θ) >= 0`. Callers implement
//! [`LogLikelihood`] and [`ConstrainedLogLikelihood`] and invoke
//! [`maximize`] (or the [`NelderMeadOptimizer`] [`LocalOptimizer`]) to run a
//! derivative-free Nelder–Mead search on a penalized objective.
//!
//! Key behaviors
//! -------------
//! - Convert a constrained problem into an Argmin cost via
//!   [`adapter::ArgMinAdapter`]: negated log-likelihood, quadratic penalty on
//!   violated margins, and an exact merit term on the largest violation.
//! - Build the initial simplex from per-coordinate step scales
//!   ([`builders`]) and run it with iteration caps and optional observers
//!   ([`run`]).
//! - Normalize results into an [`OptimOutcome`] that reports the true and
//!   penalized log-likelihood at the best point.
//!
//! Invariants & assumptions
//! ------------------------
//! - `-∞` log-likelihoods are legitimate; NaN is sanitized to `-∞` and the
//!   cost handed to Argmin is never NaN.
//! - Configuration types ([`Tolerances`], [`MLEOptions`]) are validated on
//!   construction.
//!
//! Conventions
//! -----------
//! - Points are [`Theta`] (`Array1<f64>`); their layout belongs to the model.
//! - Cost is minimized internally; all user-facing values are expressed as
//!   log-likelihoods.
//! - Errors bubble up as [`OptResult<T>`](crate::optimization::errors::OptResult).
//!
//! Downstream usage
//! ----------------
//! - `optimization::multistart` drives repeated local solves through the
//!   [`LocalOptimizer`] trait.
//! - `behavior::models::estimator` implements the model traits.
//!
//! Testing notes
//! -------------
//! - Unit tests cover option validation, the penalty/merit arithmetic, simplex
//!   construction, and convergence on small boxed quadratics.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::{ObjectiveEval, penalized_objective};
pub use self::api::{NelderMeadOptimizer, maximize};
pub use self::traits::{
    ConstrainedLogLikelihood, LocalOptimizer, LogLikelihood, MLEOptions, OptimOutcome, Tolerances,
};
pub use self::types::{Cost, FnEvalMap, Theta};
