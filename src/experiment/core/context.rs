//! experiment::core::context — explicit experiment-wide settings.
//!
//! Purpose
//! -------
//! Carry the payment rule and the dataset-wide round/player counts into every
//! likelihood, switch-detection, and estimation call as a plain value, so no
//! core routine depends on ambient state.
//!
//! Key behaviors
//! -------------
//! - [`ExperimentContext::new`] validates positive counts.
//! - [`ExperimentContext::from_games`] infers counts from a dataset and
//!   checks every game agrees.
//! - [`WorldPrior`] lists the candidate worlds of an experiment with their
//!   prior probabilities; it is only needed to generate synthetic games.
use crate::experiment::{
    core::{game::Game, round::World, treatment::Treatment},
    errors::{ExperimentError, ExperimentResult},
};

/// Experiment-wide settings shared by every core call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentContext {
    pub treatment: Treatment,
    pub num_rounds: usize,
    pub num_players: usize,
}

impl ExperimentContext {
    /// # Errors
    /// - [`ExperimentError::InvalidContext`] if either count is zero.
    pub fn new(
        treatment: Treatment, num_rounds: usize, num_players: usize,
    ) -> ExperimentResult<Self> {
        if num_rounds == 0 || num_players == 0 {
            return Err(ExperimentError::InvalidContext {
                num_rounds,
                num_players,
                reason: "Round and player counts must be positive.",
            });
        }
        Ok(Self { treatment, num_rounds, num_players })
    }

    /// Infer counts from `games`.
    ///
    /// # Errors
    /// - [`ExperimentError::InvalidContext`] if `games` is empty or the games
    ///   disagree on their number of rounds or players.
    pub fn from_games(treatment: Treatment, games: &[Game]) -> ExperimentResult<Self> {
        let first = games.first().ok_or(ExperimentError::InvalidContext {
            num_rounds: 0,
            num_players: 0,
            reason: "Cannot infer a context from an empty dataset.",
        })?;
        let (num_rounds, num_players) = (first.num_rounds(), first.num_players());
        if games.iter().any(|g| g.num_rounds() != num_rounds || g.num_players() != num_players)
        {
            return Err(ExperimentError::InvalidContext {
                num_rounds,
                num_players,
                reason: "All games must share the same number of rounds and players.",
            });
        }
        Self::new(treatment, num_rounds, num_players)
    }
}

/// Candidate worlds and their prior probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldPrior {
    entries: Vec<(f64, World)>,
}

impl WorldPrior {
    /// # Errors
    /// - [`ExperimentError::InvalidPrior`] if `entries` is empty, a prior is
    ///   negative or non-finite, or the priors do not sum to 1 (within 1e-9).
    pub fn new(entries: Vec<(f64, World)>) -> ExperimentResult<Self> {
        if entries.is_empty() {
            return Err(ExperimentError::InvalidPrior { reason: "At least one world is required." });
        }
        if entries.iter().any(|(p, _)| !p.is_finite() || *p < 0.0) {
            return Err(ExperimentError::InvalidPrior {
                reason: "Prior probabilities must be finite and non-negative.",
            });
        }
        let total: f64 = entries.iter().map(|(p, _)| p).sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(ExperimentError::InvalidPrior {
                reason: "Prior probabilities must sum to 1.",
            });
        }
        Ok(Self { entries })
    }

    /// Two equally likely worlds with first-label probabilities `high` and `low`.
    pub fn symmetric(high: f64, low: f64) -> ExperimentResult<Self> {
        Self::new(vec![(0.5, World::new(high)?), (0.5, World::new(low)?)])
    }

    /// Pick the world whose cumulative prior first exceeds `u ∈ [0, 1)`.
    pub fn select(&self, u: f64) -> World {
        let mut cumulative = 0.0;
        for (p, world) in &self.entries {
            cumulative += p;
            if u < cumulative {
                return *world;
            }
        }
        self.entries[self.entries.len() - 1].1
    }
}
