//! Numerical guards for penalized constrained log-likelihoods.
//!
//! Provides the small scalar helpers shared by the likelihood aggregator and
//! the optimizer: the residual-weight policy for mixtures, sanitation of
//! log-likelihood values, and the quadratic / max-violation penalty terms
//! computed from constraint margins.
//!
//! # Provided items
//! - [`FEASIBILITY_TOL`]: slack allowed on a constraint margin before a
//!   point counts as violating (default 1e-8).
//! - [`residual_weight(total)`]: `1 - total`, or 0 once `total > 1`.
//! - [`sanitize_loglik(value)`]: maps NaN to `-∞`.
//! - [`quadratic_penalty(margins, coeff)`], [`max_violation(margins)`] and
//!   [`is_violated(margins, tol)`] over margin vectors where `m >= 0`
//!   means satisfied.

/// Default tolerance on constraint margins for the hard feasibility check.
///
/// Penalty methods approach boundary optima from outside; a margin of
/// `-1e-12` is a converged boundary point, not an infeasible one.
pub const FEASIBILITY_TOL: f64 = 1e-8;

/// Implicit residual weight of a mixture whose explicit weights sum to `total`.
///
/// Returns `1 - total`, clamped to `0` when the explicit weights already
/// exceed one. The overflow itself is penalized by the simplex constraint;
/// this only keeps the mixture from acquiring a negative component.
pub fn residual_weight(total: f64) -> f64 {
    if total > 1.0 { 0.0 } else { 1.0 - total }
}

/// Map a log-likelihood to a value the optimizer can compare.
///
/// `-∞` (a zero-probability point) is kept as is. NaN, which arises when
/// out-of-domain parameters produce negative "probabilities", is treated as
/// `-∞` as well so that simplex ordering stays total.
pub fn sanitize_loglik(value: f64) -> f64 {
    if value.is_nan() { f64::NEG_INFINITY } else { value }
}

/// `Σ coeff · v²` over the violated margins `v < 0`.
///
/// Satisfied margins (including `+∞` from unbounded parameters) contribute
/// nothing, so an infinite coefficient never produces `∞ · 0`.
pub fn quadratic_penalty(margins: &[f64], coeff: f64) -> f64 {
    margins.iter().filter(|m| **m < 0.0).map(|m| coeff * m * m).sum()
}

/// Largest violation `max(0, -min margin)`; NaN margins count as infinite.
pub fn max_violation(margins: &[f64]) -> f64 {
    margins.iter().fold(0.0, |worst, m| {
        if m.is_nan() { f64::INFINITY } else { f64::max(worst, -m) }
    })
}

/// Whether any margin is below `-tol` (or NaN).
pub fn is_violated(margins: &[f64], tol: f64) -> bool {
    margins.iter().any(|m| m.is_nan() || *m < -tol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // The residual weight is the complement of the explicit weights and
    // never goes negative.
    fn residual_weight_clamps_overflow() {
        assert!((residual_weight(0.9) - 0.1).abs() < 1e-15);
        assert_eq!(residual_weight(1.0), 0.0);
        assert_eq!(residual_weight(1.3), 0.0);
        assert_eq!(residual_weight(-0.5), 1.5);
    }

    #[test]
    // Purpose
    // -------
    // Only violated margins are penalized, and infinite margins / coefficients
    // stay well defined.
    //
    // Given
    // -----
    // - Margins [0.5, -0.1, +inf, -0.2] and coefficient 2.
    //
    // Expect
    // ------
    // - Penalty 2·(0.01 + 0.04) = 0.1, max violation 0.2, violated at tol 1e-8.
    // - An infinite coefficient with no violations gives 0, not NaN.
    fn penalty_terms_use_violated_margins_only() {
        let margins = [0.5, -0.1, f64::INFINITY, -0.2];
        assert!((quadratic_penalty(&margins, 2.0) - 0.1).abs() < 1e-12);
        assert!((max_violation(&margins) - 0.2).abs() < 1e-15);
        assert!(is_violated(&margins, FEASIBILITY_TOL));

        let satisfied = [0.0, 1.0, f64::INFINITY];
        assert_eq!(quadratic_penalty(&satisfied, f64::INFINITY), 0.0);
        assert_eq!(max_violation(&satisfied), 0.0);
        assert!(!is_violated(&satisfied, FEASIBILITY_TOL));
        assert!(!is_violated(&[-1e-12], FEASIBILITY_TOL));
        assert!(is_violated(&[f64::NAN], FEASIBILITY_TOL));
    }

    #[test]
    fn sanitize_maps_nan_only() {
        assert_eq!(sanitize_loglik(f64::NAN), f64::NEG_INFINITY);
        assert_eq!(sanitize_loglik(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert_eq!(sanitize_loglik(-3.5), -3.5);
    }
}
