//! behavior::core::strategy — the closed set of reporting strategies.
//!
//! Purpose
//! -------
//! Name the six strategy kinds a player can follow and the data each needs:
//! the five pure strategies need nothing, CustomMixed carries its two
//! signal-conditional report probabilities in the variant itself, so a
//! CustomMixed strategy without parameters cannot be constructed.
//!
//! Key behaviors
//! -------------
//! - [`Strategy::from_tag`] parses the short tags `TR`, `MM`, `GB`, `OP`,
//!   `RA`, `CU` and fails on unknown tags or on `CU` without parameters.
//! - [`PureStrategy`] is the fixed enumeration the switch-point simulator
//!   iterates over; its order is the tie-break order.
//!
//! Conventions
//! -----------
//! - "First label" is [`Label::Mm`], "second label" is [`Label::Gb`].
use crate::{
    behavior::errors::{ModelError, ModelResult},
    experiment::core::labels::Label,
};
use std::str::FromStr;

/// Signal-conditional report probabilities of a CustomMixed strategy.
///
/// - `first_given_first`: P(report = MM | signal = MM).
/// - `first_given_second`: P(report = MM | signal = GB).
///
/// Fields are public because optimizer points may carry out-of-range values
/// that the constraint penalty pushes back; [`ConditionalReport::new`] is the
/// validated constructor for user-facing code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionalReport {
    pub first_given_first: f64,
    pub first_given_second: f64,
}

impl ConditionalReport {
    /// # Errors
    /// - [`ModelError::InvalidConditionalProb`] if either value is outside [0, 1].
    pub fn new(first_given_first: f64, first_given_second: f64) -> ModelResult<Self> {
        for value in [first_given_first, first_given_second] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ModelError::InvalidConditionalProb { value });
            }
        }
        Ok(Self { first_given_first, first_given_second })
    }

    /// P(report = MM | signal).
    pub fn first_prob(&self, signal: Label) -> f64 {
        match signal {
            Label::Mm => self.first_given_first,
            Label::Gb => self.first_given_second,
        }
    }

    /// P(report | signal).
    pub fn report_prob(&self, signal: Label, report: Label) -> f64 {
        let p = self.first_prob(signal);
        match report {
            Label::Mm => p,
            Label::Gb => 1.0 - p,
        }
    }
}

/// A reporting strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Truthful,
    MatchFirstLabel,
    MatchSecondLabel,
    Opposite,
    Random,
    CustomMixed(ConditionalReport),
}

impl Strategy {
    /// Build a strategy from its tag and optional CustomMixed parameters.
    ///
    /// Parameters are ignored for every tag except `CU`.
    ///
    /// # Errors
    /// - [`ModelError::UnknownStrategy`] for an unrecognized tag.
    /// - [`ModelError::MissingCustomParams`] for `CU` without parameters.
    pub fn from_tag(tag: &str, params: Option<ConditionalReport>) -> ModelResult<Self> {
        match tag.trim().to_uppercase().as_str() {
            "CU" => params.map(Strategy::CustomMixed).ok_or(ModelError::MissingCustomParams),
            _ => Ok(PureStrategy::from_str(tag)?.into()),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Strategy::Truthful => "TR",
            Strategy::MatchFirstLabel => "MM",
            Strategy::MatchSecondLabel => "GB",
            Strategy::Opposite => "OP",
            Strategy::Random => "RA",
            Strategy::CustomMixed(_) => "CU",
        }
    }

    /// The label a deterministic strategy intends to report for `signal`;
    /// `None` for Random and CustomMixed.
    pub fn intended_report(&self, signal: Label) -> Option<Label> {
        match self {
            Strategy::Truthful => Some(signal),
            Strategy::MatchFirstLabel => Some(Label::Mm),
            Strategy::MatchSecondLabel => Some(Label::Gb),
            Strategy::Opposite => Some(signal.other()),
            Strategy::Random | Strategy::CustomMixed(_) => None,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// The five parameter-free strategies, in switch tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PureStrategy {
    Truthful,
    MatchFirstLabel,
    MatchSecondLabel,
    Opposite,
    Random,
}

impl PureStrategy {
    pub const ALL: [PureStrategy; 5] = [
        PureStrategy::Truthful,
        PureStrategy::MatchFirstLabel,
        PureStrategy::MatchSecondLabel,
        PureStrategy::Opposite,
        PureStrategy::Random,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// # Errors
    /// - [`ModelError::StrategyIndexOutOfRange`] for `index >= 5`.
    pub fn from_index(index: usize) -> ModelResult<Self> {
        Self::ALL.get(index).copied().ok_or(ModelError::StrategyIndexOutOfRange { index })
    }

    pub fn tag(self) -> &'static str {
        Strategy::from(self).tag()
    }
}

impl From<PureStrategy> for Strategy {
    fn from(s: PureStrategy) -> Self {
        match s {
            PureStrategy::Truthful => Strategy::Truthful,
            PureStrategy::MatchFirstLabel => Strategy::MatchFirstLabel,
            PureStrategy::MatchSecondLabel => Strategy::MatchSecondLabel,
            PureStrategy::Opposite => Strategy::Opposite,
            PureStrategy::Random => Strategy::Random,
        }
    }
}

impl FromStr for PureStrategy {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "TR" => Ok(PureStrategy::Truthful),
            "MM" => Ok(PureStrategy::MatchFirstLabel),
            "GB" => Ok(PureStrategy::MatchSecondLabel),
            "OP" => Ok(PureStrategy::Opposite),
            "RA" => Ok(PureStrategy::Random),
            _ => Err(ModelError::UnknownStrategy { tag: s.to_string() }),
        }
    }
}

impl std::fmt::Display for PureStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
