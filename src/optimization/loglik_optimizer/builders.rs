//! loglik_optimizer::builders — Nelder–Mead solver construction.
//!
//! Purpose
//! -------
//! Build the initial simplex around a start point and apply crate-level
//! tolerances, hiding Argmin's generic wiring from the callers.
//!
//! Key behaviors
//! -------------
//! - The simplex has `n + 1` vertices: `θ₀` and `θ₀ + h·sᵢ·eᵢ` for each
//!   coordinate, where `h = opts.initial_step` and `sᵢ` is the coordinate's
//!   scale. Non-finite or non-positive scales fall back to 1.
//! - `opts.tols.tol_cost` becomes the simplex standard-deviation tolerance.
//!
//! Conventions
//! -----------
//! - Iteration limits are a runtime concern applied by
//!   [`run_nelder_mead`](crate::optimization::loglik_optimizer::run::run_nelder_mead).
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{NelderMeadSolver, Theta},
    },
};

/// Vertices of the initial simplex around `theta0`.
pub fn initial_simplex(theta0: &Theta, scales: &Theta, step: f64) -> Vec<Theta> {
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for i in 0..theta0.len() {
        let scale = scales.get(i).copied().filter(|s| s.is_finite() && *s > 0.0).unwrap_or(1.0);
        let mut vertex = theta0.clone();
        vertex[i] += step * scale;
        vertices.push(vertex);
    }
    vertices
}

/// Construct a Nelder–Mead solver around `theta0`.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) if Argmin rejects the
///   tolerance.
pub fn build_nelder_mead(
    theta0: &Theta, scales: &Theta, opts: &MLEOptions,
) -> OptResult<NelderMeadSolver> {
    let mut solver = NelderMeadSolver::new(initial_simplex(theta0, scales, opts.initial_step));
    if let Some(tol) = opts.tols.tol_cost {
        solver = solver.with_sd_tolerance(tol)?;
    }
    Ok(solver)
}
