//! experiment::core::game — an ordered sequence of rounds played by a fixed
//! set of players.
use std::collections::BTreeSet;

use crate::experiment::{
    core::round::Round,
    errors::{ExperimentError, ExperimentResult},
};

/// One game: a fixed player set and its rounds in play order.
///
/// Rounds are append-only. [`Game::push_round`] checks that the round index
/// continues the sequence and that the round has exactly one outcome per
/// game player, so every accessor downstream can assume complete rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    player_ids: Vec<String>,
    rounds: Vec<Round>,
}

impl Game {
    /// Create an empty game for the given players.
    ///
    /// # Errors
    /// - [`ExperimentError::NoPlayers`] if `player_ids` is empty.
    /// - [`ExperimentError::DuplicatePlayer`] on repeated identifiers.
    pub fn new<I, S>(player_ids: I) -> ExperimentResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let player_ids: Vec<String> = player_ids.into_iter().map(Into::into).collect();
        if player_ids.is_empty() {
            return Err(ExperimentError::NoPlayers);
        }
        let mut seen = BTreeSet::new();
        for id in &player_ids {
            if !seen.insert(id.as_str()) {
                return Err(ExperimentError::DuplicatePlayer { player: id.clone() });
            }
        }
        Ok(Self { player_ids, rounds: Vec::new() })
    }

    /// Append the next round.
    ///
    /// # Errors
    /// - [`ExperimentError::RoundIndexMismatch`] if `round.index()` is not the
    ///   current number of rounds.
    /// - [`ExperimentError::MissingPlayerOutcome`] /
    ///   [`ExperimentError::UnexpectedPlayer`] if the round's outcomes do not
    ///   match the game's players.
    pub fn push_round(&mut self, round: Round) -> ExperimentResult<()> {
        let expected = self.rounds.len();
        if round.index() != expected {
            return Err(ExperimentError::RoundIndexMismatch { expected, found: round.index() });
        }
        for player in &self.player_ids {
            round.outcome(player)?;
        }
        if round.num_outcomes() != self.player_ids.len() {
            let extra = round
                .players()
                .find(|p| !self.player_ids.iter().any(|id| id == p))
                .unwrap_or_default()
                .to_string();
            return Err(ExperimentError::UnexpectedPlayer { round: round.index(), player: extra });
        }
        self.rounds.push(round);
        Ok(())
    }

    pub fn player_ids(&self) -> &[String] {
        &self.player_ids
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn num_players(&self) -> usize {
        self.player_ids.len()
    }

    pub fn contains_player(&self, player: &str) -> bool {
        self.player_ids.iter().any(|id| id == player)
    }
}
