//! optimization — constrained MLE stack, numerical helpers, and error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting: a derivative-free
//! local solver for constrained log-likelihoods, a multistart driver with
//! penalty escalation, shared numerical helpers, and a single error/result
//! surface. Callers implement a log-likelihood with constraint margins and a
//! start-point generator, choose options, and obtain the best feasible point
//! without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: Argmin Nelder–Mead on a penalized objective, with a
//!   substitutable `LocalOptimizer` trait.
//! - `multistart`: repeated local solves from random starts, squaring the
//!   penalty coefficient whenever a solution violates the constraints.
//! - `numerical_stability`: NaN sanitation, penalty arithmetic, and the
//!   residual-weight clamp shared by models and optimizer.
//! - `errors`: configuration, numerical, backend and model failures as one
//!   enum (`OptError`) with the alias `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers search the raw parameter space; constraints are expressed as
//!   margins `m(θ) >= 0` and enforced by penalties plus a hard feasibility
//!   check on every accepted point.
//! - Invalid configurations are rejected at construction time and reported
//!   as `OptError`, not panics.
//!
//! Conventions
//! -----------
//! - Solvers maximize a log-likelihood `ℓ(θ)` by minimizing an internal cost;
//!   user-facing outcomes are expressed in terms of `ℓ`.
//! - Public entry points that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors or model-specific error enums.
//! - Progress is reported through the `log` facade; the optional `obs_slog`
//!   feature adds Argmin's terminal observer for single solves.
//!
//! Downstream usage
//! ----------------
//! - `behavior::models::estimator` implements the problem traits for the
//!   strategy families and calls `multistart::multistart` from `fit`.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover option validation, penalty
//!   arithmetic, solver convergence on boxed quadratics, and the escalation
//!   sequence of the driver with fake local solvers.

pub mod errors;
pub mod loglik_optimizer;
pub mod multistart;
pub mod numerical_stability;
