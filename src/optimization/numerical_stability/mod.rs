//! numerical_stability — guards shared by the likelihood and the optimizer.
//!
//! Purpose
//! -------
//! Centralize the scalar policies that keep a penalized, constrained
//! log-likelihood comparable everywhere in the search space: the
//! residual-weight clamp for mixtures, NaN-to-`-∞` sanitation, and the
//! penalty terms built from constraint margins.
//!
//! Key behaviors
//! -------------
//! - `residual_weight` implements the "overflow → 0" rule for the implicit
//!   leftover mixture component.
//! - `sanitize_loglik` turns NaN into `-∞` so that simplex ordering in the
//!   local solver never sees an unordered value.
//! - `quadratic_penalty`, `max_violation`, and `is_violated` read margin
//!   vectors where `m >= 0` means satisfied and `+∞` means "no constraint".
//!
//! Invariants & assumptions
//! ------------------------
//! - `-∞` log-likelihoods are legitimate values, not errors.
//! - Penalty helpers never evaluate `∞ · 0`.
//!
//! Conventions
//! -----------
//! - Pure helpers: no logging, no I/O, no state.
//!
//! Downstream usage
//! ----------------
//! - `behavior::models::loglik` uses `residual_weight`.
//! - `optimization::loglik_optimizer::adapter` and
//!   `optimization::multistart` use the sanitation and penalty helpers.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover clamping, penalty arithmetic
//!   with infinite margins/coefficients, and NaN handling.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    FEASIBILITY_TOL, is_violated, max_violation, quadratic_penalty, residual_weight,
    sanitize_loglik,
};
