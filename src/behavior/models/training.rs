//! behavior::models::training — games pre-processed for repeated evaluation.
//!
//! Purpose
//! -------
//! Every objective evaluation walks the whole dataset, so games are reduced
//! once to what the likelihood needs: a prefix-count [`PlayerTrace`] per
//! player and, for switching families, the player's [`PayoffPath`] under the
//! experiment's treatment.
//!
//! Key behaviors
//! -------------
//! - [`TrainingSet::new`] builds traces and payoff paths.
//! - [`TrainingSet::without_payoffs`] skips payoff replay, for data whose
//!   treatment lookup is unavailable (e.g. no reference players) and that is
//!   only fitted with non-switching families.
//! - [`TrainingSet::for_family`] picks whichever of the two the family needs.
//!
//! Invariants & assumptions
//! ------------------------
//! - All games have `ctx.num_rounds` rounds.
//! - Player order follows game order, then each game's player order.
use crate::{
    behavior::{
        core::{family::ModelFamily, switching::PayoffPath, trace::PlayerTrace},
        errors::{ModelError, ModelResult},
    },
    experiment::core::{context::ExperimentContext, game::Game},
};

/// One player of one game.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub trace: PlayerTrace,
    pub payoffs: Option<PayoffPath>,
}

/// Pre-processed dataset consumed by the log-likelihood aggregators.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    num_rounds: usize,
    num_games: usize,
    players: Vec<PlayerRecord>,
    with_payoffs: bool,
}

impl TrainingSet {
    /// Traces and payoff paths for every player of every game.
    ///
    /// # Errors
    /// - [`ModelError::EmptyDataset`] for an empty slice.
    /// - [`ModelError::RoundCountMismatch`] if a game's length differs from
    ///   the context.
    /// - Dataset errors from payoff replay (missing outcomes or references).
    pub fn new(games: &[Game], ctx: &ExperimentContext) -> ModelResult<Self> {
        Self::build(games, ctx, true)
    }

    /// Traces only.
    ///
    /// # Errors
    /// As [`TrainingSet::new`], minus payoff replay.
    pub fn without_payoffs(games: &[Game], ctx: &ExperimentContext) -> ModelResult<Self> {
        Self::build(games, ctx, false)
    }

    /// Payoff paths only when `family` switches.
    ///
    /// # Errors
    /// As [`TrainingSet::new`].
    pub fn for_family(
        family: ModelFamily, games: &[Game], ctx: &ExperimentContext,
    ) -> ModelResult<Self> {
        Self::build(games, ctx, family.is_switching())
    }

    fn build(games: &[Game], ctx: &ExperimentContext, with_payoffs: bool) -> ModelResult<Self> {
        if games.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        let mut players = Vec::new();
        for game in games {
            if game.num_rounds() != ctx.num_rounds {
                return Err(ModelError::RoundCountMismatch {
                    expected: ctx.num_rounds,
                    found: game.num_rounds(),
                });
            }
            for player in game.player_ids() {
                let trace = PlayerTrace::from_game(game, player)?;
                let payoffs = if with_payoffs {
                    Some(PayoffPath::replay(game, player, &ctx.treatment)?)
                } else {
                    None
                };
                players.push(PlayerRecord { trace, payoffs });
            }
        }
        Ok(Self { num_rounds: ctx.num_rounds, num_games: games.len(), players, with_payoffs })
    }

    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    pub fn num_games(&self) -> usize {
        self.num_games
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn has_payoffs(&self) -> bool {
        self.with_payoffs
    }

    /// Total number of observed (player, round) pairs.
    pub fn num_player_rounds(&self) -> usize {
        self.players.len() * self.num_rounds
    }

    /// Fail unless the set can be evaluated under `family`.
    ///
    /// # Errors
    /// - [`ModelError::MissingPayoffPaths`] for a switching family on a set
    ///   built without payoff paths.
    pub fn ensure_supports(&self, family: ModelFamily) -> ModelResult<()> {
        if family.is_switching() && !self.with_payoffs {
            return Err(ModelError::MissingPayoffPaths { family: family.name() });
        }
        Ok(())
    }
}
