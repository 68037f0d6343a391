//! behavior::core::switching — payoff-driven strategy-switch detection.
//!
//! Purpose
//! -------
//! Model a player who keeps score of what they actually earned and of what
//! each of the five pure strategies would have earned had they followed it
//! from round 0. At the start of every round, before the round is played,
//! the player compares the best hypothetical total with their actual total
//! and abandons their strategy once the gap passes a threshold.
//!
//! Key behaviors
//! -------------
//! - [`SwitchRule::fires`]: absolute mode switches when
//!   `best > actual + threshold`; relative mode when `best > actual * threshold`.
//! - [`PayoffPath::replay`] accumulates the actual reward and the five
//!   hypothetical rewards round by round (Random earns the average of the two
//!   constant-label rewards; Opposite earns the reward for reporting the
//!   label opposite to the signal).
//! - [`PayoffPath::detect`] returns the first round at which the rule fires
//!   and the first strategy attaining the best hypothetical total, or
//!   `(num_rounds, None)` if it never fires.
//!
//! Invariants & assumptions
//! ------------------------
//! - The test runs before each round's update, so round 0 compares zeros.
//! - Payoff paths depend only on the game and the treatment, never on model
//!   parameters; they are computed once per player and reused for every
//!   threshold.
//! - An infinite threshold never fires when rewards are non-negative.
use crate::{
    behavior::{
        core::strategy::PureStrategy,
        errors::{ModelError, ModelResult},
    },
    experiment::{
        core::{
            context::ExperimentContext, game::Game, labels::Label, round::Round,
            treatment::Treatment,
        },
        errors::ExperimentResult,
    },
};
use std::str::FromStr;

/// How the best hypothetical payoff is compared with the actual payoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchMode {
    Absolute,
    Relative,
}

impl SwitchMode {
    /// Short suffix used in family names (`"abs"` / `"rel"`).
    pub fn suffix(self) -> &'static str {
        match self {
            SwitchMode::Absolute => "abs",
            SwitchMode::Relative => "rel",
        }
    }
}

impl FromStr for SwitchMode {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "abs" | "absolute" => Ok(SwitchMode::Absolute),
            "rel" | "relative" => Ok(SwitchMode::Relative),
            _ => Err(ModelError::UnknownFamily { name: s.to_string() }),
        }
    }
}

/// Switch test: mode plus threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchRule {
    pub mode: SwitchMode,
    pub threshold: f64,
}

impl SwitchRule {
    pub fn new(mode: SwitchMode, threshold: f64) -> Self {
        Self { mode, threshold }
    }

    pub fn fires(&self, best_hypothetical: f64, actual: f64) -> bool {
        match self.mode {
            SwitchMode::Absolute => best_hypothetical > actual + self.threshold,
            SwitchMode::Relative => best_hypothetical > actual * self.threshold,
        }
    }
}

/// Where (and to what) a player switches.
///
/// `round == num_rounds` and `target == None` when the test never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchPoint {
    pub round: usize,
    pub target: Option<PureStrategy>,
}

/// Hypothetical rewards of the five pure strategies in one round, in
/// [`PureStrategy::ALL`] order.
///
/// # Errors
/// Propagates lookup errors from [`Treatment::hypothetical_reward`].
pub fn round_hypotheticals(
    treatment: &Treatment, round: &Round, player: &str,
) -> ExperimentResult<[f64; 5]> {
    let signal = round.signal(player)?;
    let first = treatment.hypothetical_reward(round, player, Label::Mm)?;
    let second = treatment.hypothetical_reward(round, player, Label::Gb)?;
    let as_reported = |label: Label| match label {
        Label::Mm => first,
        Label::Gb => second,
    };
    Ok([as_reported(signal), first, second, as_reported(signal.other()), 0.5 * (first + second)])
}

/// First strategy attaining the maximum of `totals`, and that maximum.
pub fn best_alternative(totals: &[f64; 5]) -> (PureStrategy, f64) {
    let mut best = 0;
    for i in 1..totals.len() {
        if totals[i] > totals[best] {
            best = i;
        }
    }
    (PureStrategy::ALL[best], totals[best])
}

/// Running actual and hypothetical totals for online switch detection.
///
/// Used by [`PayoffPath::replay`] and by the game simulator, which has to
/// decide switches while generating rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwitchTracker {
    pub actual: f64,
    pub hypothetical: [f64; 5],
}

impl SwitchTracker {
    /// The strategy to switch to if `rule` fires on the current totals.
    pub fn test(&self, rule: &SwitchRule) -> Option<PureStrategy> {
        let (target, best) = best_alternative(&self.hypothetical);
        rule.fires(best, self.actual).then_some(target)
    }

    pub fn update(&mut self, actual: f64, hypothetical: &[f64; 5]) {
        self.actual += actual;
        for (total, h) in self.hypothetical.iter_mut().zip(hypothetical) {
            *total += h;
        }
    }
}

/// Actual and hypothetical cumulative payoffs of one player, at the start of
/// every round (index `r` holds totals over rounds `0..r`).
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffPath {
    totals: Vec<SwitchTracker>,
}

impl PayoffPath {
    /// Replay `game` for `player` under `treatment`.
    ///
    /// # Errors
    /// - [`ModelError::PlayerNotInGame`] if `player` is not a game player.
    /// - [`ModelError::Experiment`] on reward lookup failures.
    pub fn replay(game: &Game, player: &str, treatment: &Treatment) -> ModelResult<Self> {
        if !game.contains_player(player) {
            return Err(ModelError::PlayerNotInGame { player: player.to_string() });
        }
        let mut totals = Vec::with_capacity(game.num_rounds() + 1);
        let mut tracker = SwitchTracker::default();
        totals.push(tracker);
        for round in game.rounds() {
            let hypothetical = round_hypotheticals(treatment, round, player)?;
            tracker.update(round.reward(player)?, &hypothetical);
            totals.push(tracker);
        }
        Ok(Self { totals })
    }

    pub fn num_rounds(&self) -> usize {
        self.totals.len() - 1
    }

    /// Totals at the start of `round`.
    pub fn totals_at(&self, round: usize) -> Option<&SwitchTracker> {
        self.totals.get(round)
    }

    /// First round at which `rule` fires, and the strategy switched to.
    pub fn detect(&self, rule: &SwitchRule) -> SwitchPoint {
        let num_rounds = self.num_rounds();
        for (round, tracker) in self.totals[..num_rounds].iter().enumerate() {
            if let Some(target) = tracker.test(rule) {
                return SwitchPoint { round, target: Some(target) };
            }
        }
        SwitchPoint { round: num_rounds, target: None }
    }
}

/// Replay a game for one player and detect the switch point.
///
/// # Errors
/// See [`PayoffPath::replay`].
pub fn switch_point(
    game: &Game, player: &str, ctx: &ExperimentContext, rule: &SwitchRule,
) -> ModelResult<SwitchPoint> {
    Ok(PayoffPath::replay(game, player, &ctx.treatment)?.detect(rule))
}
