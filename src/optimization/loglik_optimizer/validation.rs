//! Validation helpers for log-likelihood optimization.
//!
//! - **Option checks**: [`verify_tol_cost`], [`verify_initial_step`],
//!   [`verify_merit_weight`], [`verify_penalty`].
//! - **Start points**: [`validate_start`] enforces dimension and finiteness.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] rejects NaN; `-∞` is a valid
//!   log-likelihood.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::Theta,
};

/// Validate the optional simplex cost tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

pub fn verify_initial_step(step: f64) -> OptResult<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(OptError::InvalidInitialStep {
            step,
            reason: "Initial step must be finite and positive.",
        });
    }
    Ok(())
}

pub fn verify_merit_weight(weight: f64) -> OptResult<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(OptError::InvalidMeritWeight {
            weight,
            reason: "Merit weight must be finite and non-negative.",
        });
    }
    Ok(())
}

/// Penalty coefficients must be finite and above 1 so squaring escalates them.
///
/// # Errors
/// Returns [`OptError::InvalidPenalty`] otherwise.
pub fn verify_penalty(value: f64) -> OptResult<()> {
    if !value.is_finite() || value <= 1.0 {
        return Err(OptError::InvalidPenalty {
            value,
            reason: "Penalty coefficient must be finite and greater than 1.",
        });
    }
    Ok(())
}

/// Validate a start point against dimension and finiteness.
///
/// # Errors
/// - [`OptError::StartPointMismatch`] if `theta.len() != dim`.
/// - [`OptError::InvalidStartPoint`] at the first non-finite entry.
pub fn validate_start(theta: &Theta, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::StartPointMismatch { expected: dim, found: theta.len() });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidStartPoint { index, value });
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// # Errors
/// Returns [`OptError::NanObjective`] if the value is NaN.
pub fn validate_value(value: f64) -> OptResult<()> {
    if value.is_nan() {
        return Err(OptError::NanObjective);
    }
    Ok(())
}
