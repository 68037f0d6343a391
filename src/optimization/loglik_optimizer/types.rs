//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and the solver alias used by the
//! log-likelihood optimizer, so the rest of the optimization code stays
//! agnostic to `ndarray` and Argmin generics.
//!
//! Conventions
//! -----------
//! - `Theta` is an optimization point: a flat vector whose layout is owned
//!   by the model (see `behavior::core::params`).
//! - `Cost` is the scalar the solver minimizes; higher layers handle the sign
//!   flip between cost and log-likelihood.
use argmin::solver::neldermead::NelderMead;
use ndarray::Array1;
use std::collections::HashMap;

/// Optimization point.
pub type Theta = Array1<f64>;

/// Scalar objective value minimized by the solver.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Derivative-free simplex solver over optimization points.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;
