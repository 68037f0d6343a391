//! behavior::core::kernel — probability of a report sequence under one strategy.
//!
//! Purpose
//! -------
//! Evaluate the likelihood of a player's observed (signal, report) pairs over
//! a half-open round interval `[start, end)` under a single strategy. This
//! is the round-by-round reference evaluation; the prefix-count fast path in
//! [`crate::behavior::core::trace`] must agree with it exactly.
//!
//! Key behaviors
//! -------------
//! - Random: `0.5^(end - start)`, independent of data and error rate.
//! - Truthful / MatchFirstLabel / MatchSecondLabel / Opposite: each round
//!   contributes `1 - error_rate` if the report equals the strategy's
//!   intended report, else `error_rate`.
//! - CustomMixed: each round contributes P(report | signal) from the
//!   strategy's conditional probabilities.
//! - An empty interval has likelihood 1.
//!
//! Invariants & assumptions
//! ------------------------
//! - For `error_rate ∈ [0, 1]` and conditional probabilities in `[0, 1]` the
//!   result lies in `[0, 1]`. Out-of-range values are evaluated as given;
//!   keeping them in range is the optimizer's job.
//! - Pure function: no state, no mutation of the game.
use crate::{
    behavior::{
        core::strategy::{ConditionalReport, Strategy},
        errors::{ModelError, ModelResult},
    },
    experiment::core::{game::Game, labels::Label},
};

/// Likelihood of `player`'s reports in rounds `[start, end)` of `game` under
/// `strategy`.
///
/// # Errors
/// - [`ModelError::InvalidInterval`] unless `start <= end <= game.num_rounds()`.
/// - [`ModelError::PlayerNotInGame`] if `player` is not a game player.
pub fn strategy_likelihood(
    game: &Game, player: &str, start: usize, end: usize, strategy: &Strategy, error_rate: f64,
) -> ModelResult<f64> {
    check_interval(start, end, game.num_rounds())?;
    if !game.contains_player(player) {
        return Err(ModelError::PlayerNotInGame { player: player.to_string() });
    }
    if let Strategy::Random = strategy {
        return Ok(0.5_f64.powi((end - start) as i32));
    }
    let mut likelihood = 1.0;
    for round in &game.rounds()[start..end] {
        let outcome = round.outcome(player)?;
        likelihood *= round_likelihood(strategy, outcome.signal, outcome.report, error_rate);
    }
    Ok(likelihood)
}

/// Tag-based entry point: resolves `tag` (and, for `CU`, `params`) to a
/// [`Strategy`] before evaluating.
///
/// # Errors
/// - [`ModelError::UnknownStrategy`] / [`ModelError::MissingCustomParams`]
///   from [`Strategy::from_tag`].
/// - Everything [`strategy_likelihood`] returns.
pub fn tagged_likelihood(
    game: &Game, player: &str, start: usize, end: usize, tag: &str, error_rate: f64,
    params: Option<ConditionalReport>,
) -> ModelResult<f64> {
    let strategy = Strategy::from_tag(tag, params)?;
    strategy_likelihood(game, player, start, end, &strategy, error_rate)
}

/// Probability of one observed (signal, report) pair under `strategy`.
pub fn round_likelihood(strategy: &Strategy, signal: Label, report: Label, error_rate: f64) -> f64 {
    match (strategy, strategy.intended_report(signal)) {
        (_, Some(intended)) if intended == report => 1.0 - error_rate,
        (_, Some(_)) => error_rate,
        (Strategy::CustomMixed(params), None) => params.report_prob(signal, report),
        (_, None) => 0.5,
    }
}

pub(crate) fn check_interval(start: usize, end: usize, num_rounds: usize) -> ModelResult<()> {
    if start > end || end > num_rounds {
        return Err(ModelError::InvalidInterval { start, end, num_rounds });
    }
    Ok(())
}
