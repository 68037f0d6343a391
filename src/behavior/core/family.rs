//! behavior::core::family — model selector and per-family layout record.
//!
//! Purpose
//! -------
//! Name the four model families (with their switch-test sub-modes) and give
//! each one a single [`FamilySpec`] record: its optimization-point length,
//! constraint count, and coordinate names. Every other family-dependent
//! routine (point mapping, bounds, constraints, likelihood) dispatches by
//! pattern-matching on [`ModelFamily`].
//!
//! Conventions
//! -----------
//! - Family names: `s1`, `s1-1`, `s3-abs`, `s3-rel`, `s2-abs`, `s2-rel`.
//! - Coordinate layouts are documented on [`FamilySpec::param_names`] and in
//!   [`crate::behavior::core::params`].
use crate::behavior::{
    core::{bounds::threshold_bounds, switching::SwitchMode},
    errors::{ModelError, ModelResult},
};
use std::str::FromStr;

/// Restart count of the non-switching families.
pub const DEFAULT_RESTARTS: usize = 10;

/// A behavioral model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// s1: one pure strategy per player for the whole game.
    SingleStrategy,
    /// s1-1: like s1, but MatchFirstLabel and the residual category are
    /// CustomMixed strategies with their own conditional probabilities.
    SingleCustom,
    /// s3: one initial pure strategy, then at most one payoff-driven switch.
    SwitchOnce(SwitchMode),
    /// s2: four fixed pure strategies, a fixed CustomMixed strategy, and a
    /// CustomMixed strategy that may switch once.
    SwitchMixed(SwitchMode),
}

/// Static layout of a family's optimization point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilySpec {
    pub name: &'static str,
    pub num_vars: usize,
    pub num_constraints: usize,
    pub param_names: &'static [&'static str],
}

const S1_NAMES: &[&str] = &["TR", "MM", "GB", "OP", "eps"];
const S1_1_NAMES: &[&str] = &[
    "TR",
    "MM",
    "GB",
    "OP",
    "eps",
    "mixedMMGivenMM",
    "mixedMMGivenGB",
    "mmMMGivenMM",
    "mmMMGivenGB",
];
const S3_NAMES: &[&str] = &["TR", "MM", "GB", "OP", "eps", "delta"];
const S2_NAMES: &[&str] =
    &["TR", "MM", "GB", "OP", "eps", "delta", "fixedMixed", "mixedMMGivenMM", "mixedMMGivenGB"];

impl ModelFamily {
    pub const ALL: [ModelFamily; 6] = [
        ModelFamily::SingleStrategy,
        ModelFamily::SingleCustom,
        ModelFamily::SwitchOnce(SwitchMode::Absolute),
        ModelFamily::SwitchOnce(SwitchMode::Relative),
        ModelFamily::SwitchMixed(SwitchMode::Absolute),
        ModelFamily::SwitchMixed(SwitchMode::Relative),
    ];

    pub fn spec(self) -> FamilySpec {
        match self {
            ModelFamily::SingleStrategy => FamilySpec {
                name: self.name(),
                num_vars: 5,
                num_constraints: 7,
                param_names: S1_NAMES,
            },
            ModelFamily::SingleCustom => FamilySpec {
                name: self.name(),
                num_vars: 9,
                num_constraints: 17,
                param_names: S1_1_NAMES,
            },
            ModelFamily::SwitchOnce(_) => FamilySpec {
                name: self.name(),
                num_vars: 6,
                num_constraints: 9,
                param_names: S3_NAMES,
            },
            ModelFamily::SwitchMixed(_) => FamilySpec {
                name: self.name(),
                num_vars: 9,
                num_constraints: 14,
                param_names: S2_NAMES,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModelFamily::SingleStrategy => "s1",
            ModelFamily::SingleCustom => "s1-1",
            ModelFamily::SwitchOnce(SwitchMode::Absolute) => "s3-abs",
            ModelFamily::SwitchOnce(SwitchMode::Relative) => "s3-rel",
            ModelFamily::SwitchMixed(SwitchMode::Absolute) => "s2-abs",
            ModelFamily::SwitchMixed(SwitchMode::Relative) => "s2-rel",
        }
    }

    pub fn switch_mode(self) -> Option<SwitchMode> {
        match self {
            ModelFamily::SwitchOnce(mode) | ModelFamily::SwitchMixed(mode) => Some(mode),
            ModelFamily::SingleStrategy | ModelFamily::SingleCustom => None,
        }
    }

    pub fn is_switching(self) -> bool {
        self.switch_mode().is_some()
    }

    /// Number of restarts when none is configured: 10, or for switching
    /// families the rounded upper bound of the switch threshold (at least 1).
    pub fn default_restarts(self, num_rounds: usize) -> usize {
        if self.is_switching() {
            (threshold_bounds(self, num_rounds).upper.round() as usize).max(1)
        } else {
            DEFAULT_RESTARTS
        }
    }
}

impl FromStr for ModelFamily {
    type Err = ModelError;

    /// Parse a family name (case-insensitive). The switching families take a
    /// `-abs` / `-rel` suffix.
    fn from_str(s: &str) -> ModelResult<Self> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "s1" => return Ok(ModelFamily::SingleStrategy),
            "s1-1" => return Ok(ModelFamily::SingleCustom),
            _ => {}
        }
        let unknown = || ModelError::UnknownFamily { name: s.to_string() };
        let (base, suffix) = name.split_once('-').ok_or_else(unknown)?;
        let mode = suffix.parse::<SwitchMode>().map_err(|_| unknown())?;
        match base {
            "s3" => Ok(ModelFamily::SwitchOnce(mode)),
            "s2" => Ok(ModelFamily::SwitchMixed(mode)),
            _ => Err(unknown()),
        }
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
