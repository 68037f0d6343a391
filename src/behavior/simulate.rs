//! behavior::simulate — synthetic games drawn from a fitted or known model.
//!
//! Purpose
//! -------
//! Generate datasets whose players behave exactly as a [`ModelParams`] value
//! says they do, so estimators can be checked for parameter recovery and
//! held-out scoring can be exercised without experimental data.
//!
//! Key behaviors
//! -------------
//! - Each player of each game draws one behavioral category from the
//!   family's mixture weights (the residual included) and keeps it for the
//!   whole game.
//! - Every round draws a world from the [`WorldPrior`], then each player's
//!   signal from that world. Deterministic strategies report their intended
//!   label and flip it with probability `error_rate`; Random reports each
//!   label with probability 0.5; CustomMixed reports the first label with
//!   its conditional probability.
//! - Rewards come from the context's treatment, evaluated on the completed
//!   round: [`Treatment::hypothetical_reward`] at the player's own report.
//!   Reference-player treatments draw each player's reference uniformly
//!   among the other players, every round.
//! - Switching categories keep a [`SwitchTracker`] and run the switch test
//!   at the start of every round, before signals are drawn. Once it fires,
//!   the player follows the best alternative for the rest of the game. In
//!   s2 a Random target plays the family's CustomMixed strategy.
//!
//! Invariants & assumptions
//! ------------------------
//! - Online switching reproduces [`PayoffPath::detect`] on the generated
//!   game, so the likelihood of a simulated dataset is never zero for a
//!   positive error rate.
//! - Player identifiers are `p0 .. p{n-1}`.
//! - With a seed, output is a pure function of the inputs.
//!
//! [`PayoffPath::detect`]: crate::behavior::core::switching::PayoffPath::detect
use crate::{
    behavior::{
        core::{
            params::ModelParams,
            strategy::{PureStrategy, Strategy},
            switching::{SwitchRule, SwitchTracker, round_hypotheticals},
        },
        errors::{ModelError, ModelResult},
    },
    experiment::core::{
        context::{ExperimentContext, WorldPrior},
        game::Game,
        labels::Label,
        round::{PlayerOutcome, Round},
        treatment::Treatment,
    },
};
use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Simulation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimOpts {
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SimOpts {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Pending switch of a switching category.
#[derive(Debug, Clone, Copy)]
struct PendingSwitch {
    rule: SwitchRule,
    /// Strategy played when the best alternative is Random.
    random_as: Strategy,
}

/// One simulated player within one game.
#[derive(Debug, Clone)]
struct SimPlayer {
    id: String,
    strategy: Strategy,
    pending: Option<PendingSwitch>,
    tracker: SwitchTracker,
}

impl SimPlayer {
    fn start_round(&mut self) {
        let Some(pending) = self.pending else { return };
        if let Some(target) = self.tracker.test(&pending.rule) {
            self.strategy = match target {
                PureStrategy::Random => pending.random_as,
                other => Strategy::from(other),
            };
            self.pending = None;
        }
    }
}

/// Behavioral categories of `params` with their weights, and whether each
/// category runs the switch test.
fn categories(params: &ModelParams) -> Vec<(f64, Strategy, Option<PendingSwitch>)> {
    let w = params.weights();
    let pure = |s: PureStrategy| Strategy::from(s);
    match params {
        ModelParams::SingleStrategy(_) => PureStrategy::ALL
            .iter()
            .zip([w.truthful, w.match_first, w.match_second, w.opposite, w.residual()])
            .map(|(s, weight)| (weight, pure(*s), None))
            .collect(),
        ModelParams::SingleCustom(p) => vec![
            (w.truthful, Strategy::Truthful, None),
            (w.match_first, Strategy::CustomMixed(p.match_first_custom), None),
            (w.match_second, Strategy::MatchSecondLabel, None),
            (w.opposite, Strategy::Opposite, None),
            (w.residual(), Strategy::CustomMixed(p.mixed), None),
        ],
        ModelParams::SwitchOnce(p) => {
            let pending = PendingSwitch {
                rule: SwitchRule::new(p.mode, p.threshold),
                random_as: Strategy::Random,
            };
            PureStrategy::ALL
                .iter()
                .zip([w.truthful, w.match_first, w.match_second, w.opposite, w.residual()])
                .map(|(s, weight)| (weight, pure(*s), Some(pending)))
                .collect()
        }
        ModelParams::SwitchMixed(p) => {
            let custom = Strategy::CustomMixed(p.custom);
            let pending =
                PendingSwitch { rule: SwitchRule::new(p.mode, p.threshold), random_as: custom };
            vec![
                (w.truthful, Strategy::Truthful, None),
                (w.match_first, Strategy::MatchFirstLabel, None),
                (w.match_second, Strategy::MatchSecondLabel, None),
                (w.opposite, Strategy::Opposite, None),
                (p.fixed_custom_weight, custom, None),
                (p.switching_weight(), custom, Some(pending)),
            ]
        }
    }
}

fn check_inputs(
    params: &ModelParams, ctx: &ExperimentContext, n_games: usize,
) -> ModelResult<()> {
    if n_games == 0 {
        return Err(ModelError::InvalidSimulation { reason: "At least one game is required." });
    }
    if ctx.treatment.needs_reference() && ctx.num_players < 2 {
        return Err(ModelError::InvalidSimulation {
            reason: "Reference-player payments need at least two players per game.",
        });
    }
    let eps = params.error_rate();
    if !eps.is_finite() || !(0.0..=1.0).contains(&eps) {
        return Err(ModelError::InvalidSimulation {
            reason: "Error rate must be a probability.",
        });
    }
    let weights: Vec<f64> = categories(params).iter().map(|c| c.0).collect();
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.iter().sum::<f64>() <= 0.0 {
        return Err(ModelError::InvalidSimulation {
            reason: "Mixture weights must be finite, non-negative and not all zero.",
        });
    }
    Ok(())
}

/// Index of the category selected by `u ∈ [0, 1)` on the normalized weights.
fn pick(weights: &[f64], u: f64) -> usize {
    let total: f64 = weights.iter().sum();
    let target = u * total;
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w;
        if target < cumulative {
            return i;
        }
    }
    weights.iter().rposition(|w| *w > 0.0).unwrap_or(0)
}

fn draw_report(strategy: &Strategy, signal: Label, error_rate: f64, rng: &mut StdRng) -> Label {
    let u: f64 = rng.random();
    match (strategy, strategy.intended_report(signal)) {
        (_, Some(intended)) if u < error_rate => intended.other(),
        (_, Some(intended)) => intended,
        (Strategy::CustomMixed(c), None) if u < c.first_prob(signal) => Label::Mm,
        (Strategy::CustomMixed(_), None) => Label::Gb,
        (_, None) if u < 0.5 => Label::Mm,
        (_, None) => Label::Gb,
    }
}

fn draw_reference(
    treatment: &Treatment, ids: &[String], own: usize, rng: &mut StdRng,
) -> Option<String> {
    if !treatment.needs_reference() {
        return None;
    }
    let j = rng.random_range(0..ids.len() - 1);
    Some(ids[if j >= own { j + 1 } else { j }].clone())
}

fn simulate_game(
    params: &ModelParams, ctx: &ExperimentContext, prior: &WorldPrior, rng: &mut StdRng,
) -> ModelResult<Game> {
    let ids: Vec<String> = (0..ctx.num_players).map(|i| format!("p{i}")).collect();
    let cats = categories(params);
    let weights: Vec<f64> = cats.iter().map(|c| c.0).collect();
    let mut players: Vec<SimPlayer> = ids
        .iter()
        .map(|id| {
            let (_, strategy, pending) = cats[pick(&weights, rng.random())];
            SimPlayer { id: id.clone(), strategy, pending, tracker: SwitchTracker::default() }
        })
        .collect();
    let error_rate = params.error_rate();
    let treatment = &ctx.treatment;

    let mut game = Game::new(ids.iter().cloned())?;
    for index in 0..ctx.num_rounds {
        let world = prior.select(rng.random());
        let mut round = Round::new(index, world);
        for (own, player) in players.iter_mut().enumerate() {
            player.start_round();
            let signal = if rng.random::<f64>() < world.signal_prob(Label::Mm) {
                Label::Mm
            } else {
                Label::Gb
            };
            let report = draw_report(&player.strategy, signal, error_rate, rng);
            let reference = draw_reference(treatment, &ids, own, rng);
            round.record(player.id.as_str(), PlayerOutcome::new(signal, report, 0.0, reference))?;
        }

        let mut paid = Vec::with_capacity(players.len());
        for player in &players {
            let outcome = round.outcome(&player.id)?;
            let reward = treatment.hypothetical_reward(&round, &player.id, outcome.report)?;
            paid.push(PlayerOutcome { reward, ..outcome.clone() });
        }
        for (player, outcome) in players.iter().zip(paid) {
            round.record(player.id.as_str(), outcome)?;
        }

        for player in players.iter_mut().filter(|p| p.pending.is_some()) {
            let hypothetical = round_hypotheticals(treatment, &round, &player.id)?;
            player.tracker.update(round.reward(&player.id)?, &hypothetical);
        }
        game.push_round(round)?;
    }
    Ok(game)
}

/// Simulate `n_games` games of `ctx.num_rounds` rounds and
/// `ctx.num_players` players under `params`.
///
/// # Errors
/// - [`ModelError::InvalidSimulation`] for zero games, a reference-player
///   treatment with a single player, an error rate outside [0, 1], or
///   negative, non-finite or all-zero mixture weights.
/// - [`ModelError::Experiment`] if the treatment cannot price a round (e.g. a
///   peer-count table shorter than the number of other players).
pub fn simulate_games(
    params: &ModelParams, ctx: &ExperimentContext, prior: &WorldPrior, n_games: usize,
    opts: SimOpts,
) -> ModelResult<Vec<Game>> {
    check_inputs(params, ctx, n_games)?;
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    debug!(
        "simulating {n_games} {} games: {} rounds, {} players",
        params.family(),
        ctx.num_rounds,
        ctx.num_players
    );
    let games = (0..n_games)
        .map(|_| simulate_game(params, ctx, prior, &mut rng))
        .collect::<ModelResult<Vec<_>>>()?;
    info!("simulated {} games under {}", games.len(), params.family());
    Ok(games)
}
