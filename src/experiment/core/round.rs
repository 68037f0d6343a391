//! experiment::core::round — one round of a game.
//!
//! Purpose
//! -------
//! Hold everything the likelihood core reads about a single round: the world
//! drawn for the round, and for each player the private signal, the report
//! actually submitted, the realized reward, and (for reference-payment
//! treatments) the reference player the reward was computed against.
//!
//! Invariants & assumptions
//! ------------------------
//! - Recorded rewards are finite (checked in [`Round::record`]).
//! - A round never changes once it has been pushed into a
//!   [`Game`](crate::experiment::core::game::Game); completeness of the
//!   per-player outcomes is validated there.
//!
//! Conventions
//! -----------
//! - Player outcomes are keyed by player identifier in a `BTreeMap`, so
//!   iteration order is deterministic.
use std::collections::BTreeMap;

use crate::experiment::{
    core::labels::Label,
    errors::{ExperimentError, ExperimentResult},
};

/// The signal-generating world of a round.
///
/// `first_label_prob` is the probability that a player's signal is the first
/// label ([`Label::Mm`]); signals are drawn independently per player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    pub first_label_prob: f64,
}

impl World {
    /// Validated constructor.
    ///
    /// # Errors
    /// - [`ExperimentError::InvalidWorldProbability`] if the probability is
    ///   non-finite or outside [0, 1].
    pub fn new(first_label_prob: f64) -> ExperimentResult<Self> {
        if !first_label_prob.is_finite() || !(0.0..=1.0).contains(&first_label_prob) {
            return Err(ExperimentError::InvalidWorldProbability { value: first_label_prob });
        }
        Ok(Self { first_label_prob })
    }

    /// Probability of observing `label` as a signal in this world.
    pub fn signal_prob(&self, label: Label) -> f64 {
        match label {
            Label::Mm => self.first_label_prob,
            Label::Gb => 1.0 - self.first_label_prob,
        }
    }
}

/// What one player saw, did and earned in one round.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOutcome {
    pub signal: Label,
    pub report: Label,
    pub reward: f64,
    /// Reference player the reward was computed against, if the treatment uses one.
    pub reference: Option<String>,
}

impl PlayerOutcome {
    pub fn new(signal: Label, report: Label, reward: f64, reference: Option<String>) -> Self {
        Self { signal, report, reward, reference }
    }
}

/// One round of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    index: usize,
    world: World,
    outcomes: BTreeMap<String, PlayerOutcome>,
}

impl Round {
    pub fn new(index: usize, world: World) -> Self {
        Self { index, world, outcomes: BTreeMap::new() }
    }

    /// Record (or overwrite) a player's outcome.
    ///
    /// # Errors
    /// - [`ExperimentError::NonFiniteReward`] if `outcome.reward` is NaN/±inf.
    pub fn record(
        &mut self, player: impl Into<String>, outcome: PlayerOutcome,
    ) -> ExperimentResult<()> {
        let player = player.into();
        if !outcome.reward.is_finite() {
            return Err(ExperimentError::NonFiniteReward {
                round: self.index,
                player,
                value: outcome.reward,
            });
        }
        self.outcomes.insert(player, outcome);
        Ok(())
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn world(&self) -> World {
        self.world
    }

    /// Outcome of `player` in this round.
    ///
    /// # Errors
    /// - [`ExperimentError::MissingPlayerOutcome`] if the player has no outcome.
    pub fn outcome(&self, player: &str) -> ExperimentResult<&PlayerOutcome> {
        self.outcomes.get(player).ok_or_else(|| ExperimentError::MissingPlayerOutcome {
            round: self.index,
            player: player.to_string(),
        })
    }

    pub fn signal(&self, player: &str) -> ExperimentResult<Label> {
        Ok(self.outcome(player)?.signal)
    }

    pub fn report(&self, player: &str) -> ExperimentResult<Label> {
        Ok(self.outcome(player)?.report)
    }

    pub fn reward(&self, player: &str) -> ExperimentResult<f64> {
        Ok(self.outcome(player)?.reward)
    }

    /// Identifiers of the players with a recorded outcome, in sorted order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.outcomes.keys().map(String::as_str)
    }

    /// Reports of every player other than `player`.
    pub fn other_reports<'a>(&'a self, player: &'a str) -> impl Iterator<Item = Label> + 'a {
        self.outcomes.iter().filter(move |(id, _)| id.as_str() != player).map(|(_, o)| o.report)
    }

    pub(crate) fn num_outcomes(&self) -> usize {
        self.outcomes.len()
    }
}
