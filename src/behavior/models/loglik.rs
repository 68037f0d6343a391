//! behavior::models::loglik — dataset log-likelihood of each model family.
//!
//! Purpose
//! -------
//! Combine the strategy kernels and the switch detector into the
//! log-likelihood `Σ_players ln L_player(θ)` of a [`TrainingSet`] under a
//! [`ModelParams`] value. One per-player function per family; the dispatch
//! is a single `match` on the parameter union.
//!
//! Key behaviors
//! -------------
//! - s1: `L = Σ_k w_k · K_k(0, n)` over the five pure strategies, Random
//!   taking the residual weight.
//! - s1-1: as s1, with the MatchFirstLabel slot played by the
//!   MatchFirstLabel-custom conditionals and the residual slot by the mixed
//!   conditionals.
//! - s3: with `(r, target)` the detected switch point,
//!   `L = [Σ_k w_k · K_k(0, r)] · K_target(r, n)`; without a switch the
//!   second factor is 1 and `r = n`.
//! - s2: `L = Σ_{k≤4} w_k · K_k(0, n) + w_fixed · K_CU(0, n)
//!   + w_switch · K_CU(0, r) · K_target(r, n)`, where a Random target plays
//!   the CustomMixed kernel.
//!
//! Invariants & assumptions
//! ------------------------
//! - The residual weight is clamped to 0 when explicit weights overflow.
//! - A zero per-player likelihood contributes `-∞`; out-of-domain parameters
//!   may produce NaN. Both are left to the optimizer's sanitation.
//! - Switching families need payoff paths in the training set.
use crate::{
    behavior::{
        core::{
            params::{
                ModelParams, SingleCustomParams, SingleStrategyParams, StrategyWeights,
                SwitchMixedParams, SwitchOnceParams,
            },
            strategy::{PureStrategy, Strategy},
            switching::{PayoffPath, SwitchRule},
            trace::PlayerTrace,
        },
        errors::{ModelError, ModelResult},
        models::training::{PlayerRecord, TrainingSet},
    },
    experiment::core::{context::ExperimentContext, game::Game},
};

/// Log-likelihood of `data` under `params`.
///
/// # Errors
/// - [`ModelError::MissingPayoffPaths`] for a switching family evaluated on a
///   set built without payoff paths.
pub fn log_likelihood(params: &ModelParams, data: &TrainingSet) -> ModelResult<f64> {
    data.ensure_supports(params.family())?;
    let mut total = 0.0;
    for record in data.players() {
        total += player_likelihood(params, record)?.ln();
    }
    Ok(total)
}

/// Convenience wrapper: build the training set `params` needs and evaluate.
///
/// # Errors
/// As [`TrainingSet::for_family`] and [`log_likelihood`].
pub fn dataset_log_likelihood(
    params: &ModelParams, games: &[Game], ctx: &ExperimentContext,
) -> ModelResult<f64> {
    let data = TrainingSet::for_family(params.family(), games, ctx)?;
    log_likelihood(params, &data)
}

/// Likelihood of one player's game under `params`.
///
/// # Errors
/// - [`ModelError::MissingPayoffPaths`] if a switching family meets a record
///   without a payoff path.
pub fn player_likelihood(params: &ModelParams, record: &PlayerRecord) -> ModelResult<f64> {
    let lk = match params {
        ModelParams::SingleStrategy(p) => single_strategy_likelihood(p, &record.trace),
        ModelParams::SingleCustom(p) => single_custom_likelihood(p, &record.trace),
        ModelParams::SwitchOnce(p) => {
            switch_once_likelihood(p, &record.trace, payoffs(params, record)?)
        }
        ModelParams::SwitchMixed(p) => {
            switch_mixed_likelihood(p, &record.trace, payoffs(params, record)?)
        }
    };
    Ok(lk)
}

fn payoffs<'a>(params: &ModelParams, record: &'a PlayerRecord) -> ModelResult<&'a PayoffPath> {
    record
        .payoffs
        .as_ref()
        .ok_or(ModelError::MissingPayoffPaths { family: params.family().name() })
}

/// Weights of the five pure strategies in [`PureStrategy::ALL`] order.
fn five_way(weights: &StrategyWeights) -> [f64; 5] {
    let [tr, mm, gb, op] = weights.as_array();
    [tr, mm, gb, op, weights.residual()]
}

fn mixture(
    trace: &PlayerTrace, start: usize, end: usize, weights: [f64; 5], strategies: &[Strategy; 5],
    error_rate: f64,
) -> f64 {
    weights
        .iter()
        .zip(strategies)
        .map(|(w, s)| w * trace.likelihood(start, end, s, error_rate))
        .sum()
}

fn pure_strategies() -> [Strategy; 5] {
    PureStrategy::ALL.map(Strategy::from)
}

pub fn single_strategy_likelihood(p: &SingleStrategyParams, trace: &PlayerTrace) -> f64 {
    let n = trace.num_rounds();
    mixture(trace, 0, n, five_way(&p.weights), &pure_strategies(), p.error_rate)
}

pub fn single_custom_likelihood(p: &SingleCustomParams, trace: &PlayerTrace) -> f64 {
    let n = trace.num_rounds();
    let strategies = [
        Strategy::Truthful,
        Strategy::CustomMixed(p.match_first_custom),
        Strategy::MatchSecondLabel,
        Strategy::Opposite,
        Strategy::CustomMixed(p.mixed),
    ];
    mixture(trace, 0, n, five_way(&p.weights), &strategies, p.error_rate)
}

pub fn switch_once_likelihood(p: &SwitchOnceParams, trace: &PlayerTrace, path: &PayoffPath) -> f64 {
    let n = trace.num_rounds();
    let sp = path.detect(&SwitchRule::new(p.mode, p.threshold));
    let pre = mixture(trace, 0, sp.round, five_way(&p.weights), &pure_strategies(), p.error_rate);
    let post = sp
        .target
        .map_or(1.0, |t| trace.likelihood(sp.round, n, &Strategy::from(t), p.error_rate));
    pre * post
}

pub fn switch_mixed_likelihood(
    p: &SwitchMixedParams, trace: &PlayerTrace, path: &PayoffPath,
) -> f64 {
    let n = trace.num_rounds();
    let custom = Strategy::CustomMixed(p.custom);
    let [tr, mm, gb, op] = p.weights.as_array();
    let fixed = mixture(
        trace,
        0,
        n,
        [tr, mm, gb, op, p.fixed_custom_weight],
        &[
            Strategy::Truthful,
            Strategy::MatchFirstLabel,
            Strategy::MatchSecondLabel,
            Strategy::Opposite,
            custom,
        ],
        p.error_rate,
    );

    let sp = path.detect(&SwitchRule::new(p.mode, p.threshold));
    let pre = trace.likelihood(0, sp.round, &custom, p.error_rate);
    let post = match sp.target {
        None => 1.0,
        Some(PureStrategy::Random) => trace.likelihood(sp.round, n, &custom, p.error_rate),
        Some(t) => trace.likelihood(sp.round, n, &Strategy::from(t), p.error_rate),
    };
    fixed + p.switching_weight() * pre * post
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        behavior::{
            core::{kernel::strategy_likelihood, strategy::ConditionalReport, switching::SwitchMode},
            test_support::{game_from_pairs, reference_game},
        },
        experiment::core::{labels::Label, treatment::Treatment},
        optimization::numerical_stability::residual_weight,
    };
    use Label::{Gb, Mm};
    use approx::assert_relative_eq;

    fn weights(tr: f64, mm: f64, gb: f64, op: f64) -> StrategyWeights {
        StrategyWeights::new(tr, mm, gb, op).expect("valid weights")
    }

    fn one_player_set(pairs: &[(Label, Label)]) -> (Game, TrainingSet) {
        let game = game_from_pairs(pairs);
        let ctx = ExperimentContext::new(Treatment::Constant(1.0), pairs.len(), 1)
            .expect("valid context");
        let data = TrainingSet::new(std::slice::from_ref(&game), &ctx).expect("valid dataset");
        (game, data)
    }

    #[test]
    // Purpose
    // -------
    // s1 matches a hand-computed mixture of reference kernels, in any order
    // of the five categories.
    //
    // Given
    // -----
    // - One player, four rounds, weights TR .4, MM .2, GB .2, OP .1, RA .1,
    //   error rate .1.
    //
    // Expect
    // ------
    // - ln of the reversed-order mixture equals the aggregator's value.
    fn s1_is_a_weighted_mixture() {
        // Arrange
        let pairs = [(Mm, Mm), (Gb, Gb), (Gb, Mm), (Mm, Mm)];
        let (game, data) = one_player_set(&pairs);
        let params = ModelParams::SingleStrategy(
            SingleStrategyParams::new(weights(0.4, 0.2, 0.2, 0.1), 0.1).expect("valid"),
        );

        // Act
        let ll = log_likelihood(&params, &data).expect("evaluates");

        // Assert
        let parts = [
            (0.1, Strategy::Random),
            (0.1, Strategy::Opposite),
            (0.2, Strategy::MatchSecondLabel),
            (0.2, Strategy::MatchFirstLabel),
            (0.4, Strategy::Truthful),
        ];
        let manual: f64 = parts
            .iter()
            .map(|(w, s)| w * strategy_likelihood(&game, "p", 0, 4, s, 0.1).expect("valid"))
            .sum();
        assert_relative_eq!(ll, manual.ln(), max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // With weights summing to exactly 1, the s1 log-likelihood does not
    // depend on which pure strategy receives the residual weight.
    //
    // Given
    // -----
    // - One player, six rounds, five-way weights TR .3, MM .25, GB .2,
    //   OP .15, RA .1, error rate .15.
    // - For each strategy k, a mixture whose k-th weight is the residual
    //   `1 - Σ_{j≠k} w_j` and the other four are explicit.
    //
    // Expect
    // ------
    // - All five mixtures give the aggregator's value, where Random holds
    //   the residual.
    fn s1_is_symmetric_in_the_residual_slot() {
        // Arrange
        let pairs = [(Mm, Mm), (Gb, Gb), (Gb, Mm), (Mm, Mm), (Mm, Gb), (Gb, Gb)];
        let (game, data) = one_player_set(&pairs);
        let five = [0.3, 0.25, 0.2, 0.15, 0.1];
        let params = ModelParams::SingleStrategy(
            SingleStrategyParams::new(weights(five[0], five[1], five[2], five[3]), 0.15)
                .expect("valid"),
        );
        let kernels: Vec<f64> = PureStrategy::ALL
            .iter()
            .map(|s| {
                strategy_likelihood(&game, "p", 0, 6, &Strategy::from(*s), 0.15).expect("valid")
            })
            .collect();

        // Act
        let ll = log_likelihood(&params, &data).expect("evaluates");
        let relabelled: Vec<f64> = (0..5)
            .map(|k| {
                let explicit: f64 = (0..5).filter(|j| *j != k).map(|j| five[j]).sum();
                let mut w = five;
                w[k] = residual_weight(explicit);
                w.iter().zip(&kernels).map(|(w, l)| w * l).sum::<f64>().ln()
            })
            .collect();

        // Assert
        for value in relabelled {
            assert_relative_eq!(value, ll, max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Overflowing weights give Random a zero share instead of a negative one.
    fn s1_overflow_clamps_residual() {
        let (_, data) = one_player_set(&[(Mm, Mm), (Gb, Gb)]);
        let over = ModelParams::SingleStrategy(SingleStrategyParams {
            weights: StrategyWeights {
                truthful: 0.7,
                match_first: 0.6,
                match_second: 0.0,
                opposite: 0.0,
            },
            error_rate: 0.0,
        });
        // TR: 1, MM: 0 (second report is GB), RA: 0 share.
        let ll = log_likelihood(&over, &data).expect("evaluates");
        assert_relative_eq!(ll, 0.7_f64.ln(), max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A deviation under error rate 0 is a zero-probability event.
    fn zero_probability_is_negative_infinity() {
        let (_, data) = one_player_set(&[(Mm, Gb)]);
        let truthful_only = ModelParams::SingleStrategy(
            SingleStrategyParams::new(weights(1.0, 0.0, 0.0, 0.0), 0.0).expect("valid"),
        );
        assert_eq!(log_likelihood(&truthful_only, &data), Ok(f64::NEG_INFINITY));
    }

    #[test]
    // Purpose
    // -------
    // s1-1 swaps the MatchFirstLabel and residual kernels for CustomMixed
    // ones.
    fn s1_1_uses_custom_kernels() {
        let pairs = [(Mm, Mm), (Gb, Mm), (Gb, Gb)];
        let (game, data) = one_player_set(&pairs);
        let mixed = ConditionalReport::new(0.6, 0.4).expect("valid");
        let mmcu = ConditionalReport::new(0.9, 0.7).expect("valid");
        let params = ModelParams::SingleCustom(
            SingleCustomParams::new(weights(0.3, 0.3, 0.1, 0.1), 0.2, mixed, mmcu).expect("valid"),
        );

        let k = |s: Strategy| strategy_likelihood(&game, "p", 0, 3, &s, 0.2).expect("valid");
        let manual = 0.3 * k(Strategy::Truthful)
            + 0.3 * k(Strategy::CustomMixed(mmcu))
            + 0.1 * k(Strategy::MatchSecondLabel)
            + 0.1 * k(Strategy::Opposite)
            + 0.2 * k(Strategy::CustomMixed(mixed));
        assert_relative_eq!(
            log_likelihood(&params, &data).expect("evaluates"),
            manual.ln(),
            max_relative = 1e-12
        );
    }

    #[test]
    // Purpose
    // -------
    // s3 splits the game at the detected switch round and scores the second
    // part under the switch target.
    //
    // Given
    // -----
    // - Player "a" reports GB against MM for four rounds (signal MM), so the
    //   absolute rule with threshold 2 fires at round 2 towards Truthful.
    //
    // Expect
    // ------
    // - Player "a"'s likelihood = [Σ w_k K_k(0, 2)] · K_TR(2, 4).
    fn s3_splits_at_switch_round() {
        // Arrange
        let game = reference_game(&[[(Mm, Gb), (Mm, Mm)]; 4]);
        let ctx = ExperimentContext::new(Treatment::basic(), 4, 2).expect("valid context");
        let data = TrainingSet::new(std::slice::from_ref(&game), &ctx).expect("valid dataset");
        let p = SwitchOnceParams::new(SwitchMode::Absolute, weights(0.1, 0.2, 0.5, 0.1), 0.1, 2.0)
            .expect("valid");

        // Act
        let lk_a = player_likelihood(&ModelParams::SwitchOnce(p), &data.players()[0])
            .expect("evaluates");

        // Assert
        let k = |s, a, b| strategy_likelihood(&game, "a", a, b, &s, 0.1).expect("valid");
        let pre = 0.1 * k(Strategy::Truthful, 0, 2)
            + 0.2 * k(Strategy::MatchFirstLabel, 0, 2)
            + 0.5 * k(Strategy::MatchSecondLabel, 0, 2)
            + 0.1 * k(Strategy::Opposite, 0, 2)
            + 0.1 * k(Strategy::Random, 0, 2);
        assert_relative_eq!(lk_a, pre * k(Strategy::Truthful, 2, 4), max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Without a switch, s3 reduces to the s1 mixture over the full game.
    fn s3_without_switch_matches_s1() {
        let game = reference_game(&[[(Mm, Gb), (Gb, Mm)], [(Gb, Gb), (Mm, Mm)]]);
        let ctx = ExperimentContext::new(Treatment::basic(), 2, 2).expect("valid context");
        let data = TrainingSet::new(std::slice::from_ref(&game), &ctx).expect("valid dataset");
        let w = weights(0.3, 0.2, 0.2, 0.2);
        let s3 = ModelParams::SwitchOnce(
            SwitchOnceParams::new(SwitchMode::Relative, w, 0.15, f64::INFINITY).expect("valid"),
        );
        let s1 = ModelParams::SingleStrategy(SingleStrategyParams::new(w, 0.15).expect("valid"));
        assert_relative_eq!(
            log_likelihood(&s3, &data).expect("evaluates"),
            log_likelihood(&s1, &data).expect("evaluates"),
            max_relative = 1e-12
        );
    }

    #[test]
    // Purpose
    // -------
    // s2 adds a fixed CustomMixed term and a switching CustomMixed term.
    fn s2_combines_fixed_and_switching_custom() {
        let game = reference_game(&[[(Mm, Gb), (Mm, Mm)]; 4]);
        let ctx = ExperimentContext::new(Treatment::basic(), 4, 2).expect("valid context");
        let data = TrainingSet::new(std::slice::from_ref(&game), &ctx).expect("valid dataset");
        let custom = ConditionalReport::new(0.3, 0.6).expect("valid");
        let p = SwitchMixedParams::new(
            SwitchMode::Absolute,
            weights(0.1, 0.1, 0.2, 0.1),
            0.1,
            2.0,
            0.2,
            custom,
        )
        .expect("valid");
        let lk_a = player_likelihood(&ModelParams::SwitchMixed(p), &data.players()[0])
            .expect("evaluates");

        let k = |s, a, b| strategy_likelihood(&game, "a", a, b, &s, 0.1).expect("valid");
        let cu = Strategy::CustomMixed(custom);
        let fixed = 0.1 * k(Strategy::Truthful, 0, 4)
            + 0.1 * k(Strategy::MatchFirstLabel, 0, 4)
            + 0.2 * k(Strategy::MatchSecondLabel, 0, 4)
            + 0.1 * k(Strategy::Opposite, 0, 4)
            + 0.2 * k(cu, 0, 4);
        let switching = 0.3 * k(cu, 0, 2) * k(Strategy::Truthful, 2, 4);
        assert_relative_eq!(lk_a, fixed + switching, max_relative = 1e-12);
    }

    #[test]
    fn switching_family_needs_payoffs() {
        let game = reference_game(&[[(Mm, Gb), (Mm, Mm)]]);
        let ctx = ExperimentContext::new(Treatment::basic(), 1, 2).expect("valid context");
        let data = TrainingSet::without_payoffs(&[game], &ctx).expect("valid dataset");
        let p = ModelParams::SwitchOnce(
            SwitchOnceParams::new(SwitchMode::Absolute, weights(0.2, 0.2, 0.2, 0.2), 0.1, 1.0)
                .expect("valid"),
        );
        assert!(matches!(log_likelihood(&p, &data), Err(ModelError::MissingPayoffPaths { .. })));
    }
}
