//! behavior::core::constraints — inequality margins of each family.
//!
//! Every hard constraint is expressed as a margin `m` with `m >= 0` meaning
//! satisfied. The optimizer penalizes negative margins quadratically and
//! re-checks them after each restart; the order of the returned vector is
//! fixed per family:
//!
//! - s1 (7): four weights `w ≥ 0`, `eps ≥ 0`, `0.5 - eps ≥ 0`, `1 - Σw ≥ 0`.
//! - s3 (9): s1's weight and eps margins, `delta - lb`, `ub - delta`, `1 - Σw`.
//! - s2 (14): s3's first eight, `w_fixed ≥ 0`, `1 - Σw - w_fixed`, then the
//!   two conditionals in `[0, 1]`.
//! - s1-1 (17): weights, eps, the mixed conditionals in `[0, 1]`, the
//!   MatchFirstLabel-custom conditionals in `[0.5, 1]`, custom ≥ mixed per
//!   signal, and `1 - Σw` last.
//!
//! The s1-1 dominance rows double as its identifiability rule. Trading the
//! MatchFirstLabel-custom component (weight and conditionals) with the
//! CustomMixed residual gives the same likelihood, and at most one of the two
//! labellings satisfies custom ≥ mixed, so estimates never need relabelling.
use crate::behavior::core::{
    bounds::{Bounds, MIN_MATCH_FIRST_CUSTOM, error_rate_bounds, threshold_bounds},
    params::{ModelParams, StrategyWeights},
    strategy::ConditionalReport,
};

fn push_unit_interval(margins: &mut Vec<f64>, cr: &ConditionalReport, bounds: Bounds) {
    margins.extend(bounds.margins(cr.first_given_first));
    margins.extend(bounds.margins(cr.first_given_second));
}

fn weight_margins(weights: &StrategyWeights, error_rate: f64) -> Vec<f64> {
    let mut margins = weights.as_array().to_vec();
    margins.extend(error_rate_bounds().margins(error_rate));
    margins
}

/// Constraint margins of `params` for games of `num_rounds` rounds.
///
/// Threshold margins use the family's threshold range; an unbounded range
/// yields `+∞` margins, which never count as violated.
pub fn constraint_margins(params: &ModelParams, num_rounds: usize) -> Vec<f64> {
    let family = params.family();
    let mut margins = weight_margins(&params.weights(), params.error_rate());
    match params {
        ModelParams::SingleStrategy(p) => {
            margins.push(1.0 - p.weights.total());
        }
        ModelParams::SingleCustom(p) => {
            push_unit_interval(&mut margins, &p.mixed, Bounds::UNIT);
            push_unit_interval(
                &mut margins,
                &p.match_first_custom,
                Bounds::new(MIN_MATCH_FIRST_CUSTOM, 1.0),
            );
            margins.push(p.match_first_custom.first_given_first - p.mixed.first_given_first);
            margins.push(p.match_first_custom.first_given_second - p.mixed.first_given_second);
            margins.push(1.0 - p.weights.total());
        }
        ModelParams::SwitchOnce(p) => {
            margins.extend(threshold_margins(threshold_bounds(family, num_rounds), p.threshold));
            margins.push(1.0 - p.weights.total());
        }
        ModelParams::SwitchMixed(p) => {
            margins.extend(threshold_margins(threshold_bounds(family, num_rounds), p.threshold));
            margins.push(p.fixed_custom_weight);
            margins.push(1.0 - p.weights.total() - p.fixed_custom_weight);
            push_unit_interval(&mut margins, &p.custom, Bounds::UNIT);
        }
    }
    margins
}

fn threshold_margins(bounds: Bounds, threshold: f64) -> [f64; 2] {
    if bounds.is_finite() { bounds.margins(threshold) } else { [f64::INFINITY; 2] }
}
