//! behavior::core::bounds — parameter ranges per model family.
//!
//! Purpose
//! -------
//! Give every coordinate of a family's optimization point a closed search
//! range. The ranges feed three consumers: the constraint margins (which
//! penalize leaving them), the random restart generator (which draws inside
//! them), and the initial simplex (whose step is a fraction of each width).
//!
//! Key behaviors
//! -------------
//! - Mixture weights and conditional report probabilities: `[0, 1]`.
//! - Error rate: `[0, MAX_ERROR_RATE]`.
//! - Switch threshold: absolute mode `[0, (max - min payment) · rounds]`,
//!   relative mode `[1, (max / min payment) · rounds]`; non-switching
//!   families report `(-∞, +∞)`, which the constraint builder skips.
//! - s1-1 MatchFirstLabel-custom conditionals: `[0.5, 1]`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `lower <= upper` for every returned range.
//! - Payment extremes are read from [`PaymentMatrix::basic`], the rule the
//!   threshold ranges were calibrated on; the range scales linearly with the
//!   number of rounds.
use crate::{
    behavior::core::{family::ModelFamily, switching::SwitchMode},
    experiment::core::treatment::PaymentMatrix,
};

/// Upper bound of the error rate.
pub const MAX_ERROR_RATE: f64 = 0.5;
/// Lower bound of the s1-1 MatchFirstLabel-custom conditionals.
pub const MIN_MATCH_FIRST_CUSTOM: f64 = 0.5;

/// Closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub const UNIT: Bounds = Bounds { lower: 0.0, upper: 1.0 };
    pub const UNBOUNDED: Bounds = Bounds { lower: f64::NEG_INFINITY, upper: f64::INFINITY };

    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    /// Margins `[x - lower, upper - x]`; both `≥ 0` inside the interval.
    pub fn margins(&self, x: f64) -> [f64; 2] {
        [x - self.lower, self.upper - x]
    }

    /// Point at fraction `t ∈ [0, 1]` of the interval.
    pub fn lerp(&self, t: f64) -> f64 {
        self.lower + t * self.width()
    }
}

pub fn error_rate_bounds() -> Bounds {
    Bounds::new(0.0, MAX_ERROR_RATE)
}

/// Switch-threshold range of `family` for games of `num_rounds` rounds.
pub fn threshold_bounds(family: ModelFamily, num_rounds: usize) -> Bounds {
    let rounds = num_rounds as f64;
    let basic = PaymentMatrix::basic();
    let (max, min) = (basic.max_payment(), basic.min_payment());
    match family.switch_mode() {
        Some(SwitchMode::Absolute) => Bounds::new(0.0, (max - min) * rounds),
        Some(SwitchMode::Relative) => Bounds::new(1.0, (max / min) * rounds),
        None => Bounds::UNBOUNDED,
    }
}

/// Search range of every point coordinate, in the family's point layout.
pub fn point_bounds(family: ModelFamily, num_rounds: usize) -> Vec<Bounds> {
    let mut bounds = vec![Bounds::UNIT; 4];
    bounds.push(error_rate_bounds());
    match family {
        ModelFamily::SingleStrategy => {}
        ModelFamily::SingleCustom => {
            bounds.extend([Bounds::UNIT; 2]);
            bounds.extend([Bounds::new(MIN_MATCH_FIRST_CUSTOM, 1.0); 2]);
        }
        ModelFamily::SwitchOnce(_) => bounds.push(threshold_bounds(family, num_rounds)),
        ModelFamily::SwitchMixed(_) => {
            bounds.push(threshold_bounds(family, num_rounds));
            bounds.extend([Bounds::UNIT; 3]);
        }
    }
    bounds
}
