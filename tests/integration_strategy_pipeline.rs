//! Integration tests for the behavioral-model estimation pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path: synthetic games from known parameters,
//!   training-set construction, multistart constrained MLE, and held-out
//!   scoring against the random-reporting baseline.
//! - Check parameter recovery for the single-strategy family on a dataset
//!   large enough for the estimate to be tight.
//!
//! Coverage
//! --------
//! - `behavior::simulate::simulate_games` for s1, s1-1, s3 and s2.
//! - `behavior::models::{training, estimator, scoring}`.
//! - `optimization::multistart` through `StrategyModel::fit`.
//!
//! Exclusions
//! ----------
//! - Kernel, switch-detection and constraint arithmetic: covered by unit
//!   tests next to the code.
use approx::assert_relative_eq;
use strategy_mle::{
    behavior::{
        core::{
            constraints::constraint_margins,
            family::ModelFamily,
            options::EstimationOptions,
            params::{
                ModelParams, SingleCustomParams, SingleStrategyParams, StrategyWeights,
                SwitchMixedParams, SwitchOnceParams,
            },
            strategy::ConditionalReport,
            switching::SwitchMode,
        },
        errors::ModelError,
        models::{estimator::StrategyModel, log_likelihood, training::TrainingSet},
        simulate::{SimOpts, simulate_games},
    },
    experiment::core::{
        context::{ExperimentContext, WorldPrior},
        treatment::Treatment,
    },
    optimization::{
        errors::OptError,
        numerical_stability::{FEASIBILITY_TOL, is_violated},
    },
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Purpose
/// -------
/// Two equally likely worlds that favour opposite signals, so every player
/// sees both labels and the pure strategies are distinguishable.
fn prior() -> WorldPrior {
    WorldPrior::symmetric(0.8, 0.3).expect("valid prior")
}

/// Purpose
/// -------
/// Simulate `n_games` games under `params` and pre-process them for `family`.
///
/// Invariants
/// ----------
/// - Panics on any simulation or dataset error; those are configuration
///   errors of the test, not behavior under test.
fn simulated_set(
    params: &ModelParams, ctx: &ExperimentContext, n_games: usize, seed: u64,
) -> TrainingSet {
    let games =
        simulate_games(params, ctx, &prior(), n_games, SimOpts::seeded(seed)).expect("simulates");
    TrainingSet::for_family(params.family(), &games, ctx).expect("valid dataset")
}

fn s1_truth() -> ModelParams {
    ModelParams::SingleStrategy(
        SingleStrategyParams::new(StrategyWeights::new(0.4, 0.2, 0.2, 0.1).expect("valid"), 0.05)
            .expect("valid"),
    )
}

#[test]
// Purpose
// -------
// Recover known s1 parameters from a large simulated dataset.
//
// Given
// -----
// - 400 games of 10 rounds, 3 players, basic reference-player payments.
// - Weights {TR: 0.4, MM: 0.2, GB: 0.2, OP: 0.1}, residual Random 0.1,
//   error rate 0.05.
// - 4 seeded restarts.
//
// Expect
// ------
// - Every weight within ±0.1 and the error rate within ±0.05 of the truth.
// - At least one restart accepted and the fitted loglik at least the
//   loglik of the true parameters, up to optimizer tolerance.
fn s1_recovers_known_parameters() {
    // Arrange
    init_logging();
    let ctx = ExperimentContext::new(Treatment::basic(), 10, 3).expect("valid context");
    let truth = s1_truth();
    let data = simulated_set(&truth, &ctx, 400, 2024);
    let options = EstimationOptions::seeded(Some(4), 17).expect("valid options");
    let mut model = StrategyModel::new(ModelFamily::SingleStrategy, options);

    // Act
    model.fit(&data).expect("fit succeeds");

    // Assert
    let fitted = model.fitted_params().expect("fitted");
    let (w, t) = (fitted.weights(), truth.weights());
    for (hat, true_w) in w.as_array().iter().zip(t.as_array()) {
        assert!((hat - true_w).abs() <= 0.1, "weight {hat} vs {true_w}: {fitted}");
    }
    assert!((fitted.error_rate() - 0.05).abs() <= 0.05, "{fitted}");

    let results = model.results().expect("fitted");
    assert!(results.accepted_restarts() >= 1);
    let truth_score = log_likelihood(&truth, &data).expect("evaluates");
    assert!(results.loglik >= truth_score - 1e-3 * truth_score.abs());
}

#[test]
// Purpose
// -------
// A model fitted on one sample beats random reporting on a fresh sample.
//
// Given
// -----
// - s1 truth, 150 training games and 50 held-out games from another seed.
//
// Expect
// ------
// - Positive improvement over the baseline and a per-round loglik above
//   ln(0.5).
fn held_out_score_beats_random_baseline() {
    // Arrange
    init_logging();
    let ctx = ExperimentContext::new(Treatment::basic(), 10, 3).expect("valid context");
    let train = simulated_set(&s1_truth(), &ctx, 150, 1);
    let held_out = simulated_set(&s1_truth(), &ctx, 50, 2);
    let options = EstimationOptions::seeded(Some(3), 5).expect("valid options");
    let mut model = StrategyModel::new(ModelFamily::SingleStrategy, options);

    // Act
    model.fit(&train).expect("fit succeeds");
    let score = model.score(&held_out).expect("scores");

    // Assert
    assert!(score.improvement > 0.0, "{score:?}");
    assert!(score.per_round > 0.5_f64.ln(), "{score:?}");
    let expected_baseline = 0.5_f64.ln() * (50 * 3 * 10) as f64;
    assert_relative_eq!(score.baseline, expected_baseline, max_relative = 1e-12);
}

#[test]
// Purpose
// -------
// The switch-once family fits on simulated switching players and yields a
// feasible estimate that beats random reporting on held-out games.
//
// Given
// -----
// - s3-abs truth: mostly MatchFirstLabel and Truthful starters, error rate
//   0.05, threshold 1.0; 120 games of 8 rounds with 2 players.
//
// Expect
// ------
// - A finite loglik, an estimate inside its hard bounds, and a positive
//   held-out improvement.
fn switch_once_pipeline_runs_end_to_end() {
    // Arrange
    init_logging();
    let ctx = ExperimentContext::new(Treatment::basic(), 8, 2).expect("valid context");
    let truth = ModelParams::SwitchOnce(
        SwitchOnceParams::new(
            SwitchMode::Absolute,
            StrategyWeights::new(0.3, 0.5, 0.05, 0.05).expect("valid"),
            0.05,
            1.0,
        )
        .expect("valid"),
    );
    let train = simulated_set(&truth, &ctx, 120, 11);
    let held_out = simulated_set(&truth, &ctx, 40, 12);
    let options = EstimationOptions::seeded(Some(4), 3).expect("valid options");
    let mut model = StrategyModel::new(ModelFamily::SwitchOnce(SwitchMode::Absolute), options);

    // Act
    model.fit(&train).expect("fit succeeds");

    // Assert
    let results = model.results().expect("fitted");
    assert!(results.loglik.is_finite());
    let ModelParams::SwitchOnce(fitted) = *model.fitted_params().expect("fitted") else {
        panic!("family changed during fit");
    };
    assert!((0.0..=0.5 + 1e-6).contains(&fitted.error_rate));
    assert!(fitted.threshold >= -1e-6);
    assert!(fitted.weights.total() <= 1.0 + 1e-6);
    let score = model.score(&held_out).expect("scores");
    assert!(score.improvement > 0.0, "{score:?}");
}

#[test]
// Purpose
// -------
// The custom-mixture family fits to a feasible estimate whose
// MatchFirstLabel component is the one reporting the first label more often,
// at a log-likelihood no worse than the generating parameters.
//
// Given
// -----
// - s1-1 truth: MM-custom (0.9, 0.7), mixed (0.5, 0.4), error rate 0.05;
//   80 games of 10 rounds with 2 players; 3 seeded restarts.
//
// Expect
// ------
// - Every margin holds, including custom ≥ mixed for both signals.
// - Fitted loglik within 1% of the truth's or above it.
fn single_custom_pipeline_fits_ordered_components() {
    // Arrange
    init_logging();
    let ctx = ExperimentContext::new(Treatment::basic(), 10, 2).expect("valid context");
    let truth = ModelParams::SingleCustom(
        SingleCustomParams::new(
            StrategyWeights::new(0.4, 0.3, 0.1, 0.05).expect("valid"),
            0.05,
            ConditionalReport::new(0.5, 0.4).expect("valid"),
            ConditionalReport::new(0.9, 0.7).expect("valid"),
        )
        .expect("valid"),
    );
    let data = simulated_set(&truth, &ctx, 80, 21);
    let mut model = StrategyModel::new(
        ModelFamily::SingleCustom,
        EstimationOptions::seeded(Some(3), 8).expect("valid options"),
    );

    // Act
    model.fit(&data).expect("fit succeeds");

    // Assert
    let fitted = *model.fitted_params().expect("fitted");
    let ModelParams::SingleCustom(p) = fitted else {
        panic!("family changed during fit");
    };
    assert!(!is_violated(&constraint_margins(&fitted, 10), FEASIBILITY_TOL), "{p:?}");
    assert!(p.match_first_custom.first_given_first >= p.mixed.first_given_first - FEASIBILITY_TOL);
    assert!(
        p.match_first_custom.first_given_second >= p.mixed.first_given_second - FEASIBILITY_TOL
    );
    let loglik = model.results().expect("fitted").loglik;
    let truth_score = log_likelihood(&truth, &data).expect("evaluates");
    assert!(loglik >= truth_score - 1e-2 * truth_score.abs(), "{loglik} vs {truth_score}");
}

#[test]
// Purpose
// -------
// The switch-with-mixed-custom family runs end to end: nine coordinates,
// fourteen constraints and six-slot start draws through multistart.
//
// Given
// -----
// - s2-abs truth: TR .2, MM .2, GB .1, OP .1, fixed custom .2, switching
//   custom .2 with conditionals (0.7, 0.4), error rate 0.05, threshold 1.0.
// - 60 training and 30 held-out games of 8 rounds with 2 players; 3 seeded
//   restarts.
//
// Expect
// ------
// - Every accepted restart started from and ended at a 9-coordinate point.
// - The estimate satisfies all fourteen margins, its loglik is within 2% of
//   the truth's or above it, and it beats random reporting on held-out
//   games.
fn switch_mixed_pipeline_runs_end_to_end() {
    // Arrange
    init_logging();
    let ctx = ExperimentContext::new(Treatment::basic(), 8, 2).expect("valid context");
    let mode = SwitchMode::Absolute;
    let truth = ModelParams::SwitchMixed(
        SwitchMixedParams::new(
            mode,
            StrategyWeights::new(0.2, 0.2, 0.1, 0.1).expect("valid"),
            0.05,
            1.0,
            0.2,
            ConditionalReport::new(0.7, 0.4).expect("valid"),
        )
        .expect("valid"),
    );
    let train = simulated_set(&truth, &ctx, 60, 31);
    let held_out = simulated_set(&truth, &ctx, 30, 32);
    let mut model = StrategyModel::new(
        ModelFamily::SwitchMixed(mode),
        EstimationOptions::seeded(Some(3), 9).expect("valid options"),
    );

    // Act
    model.fit(&train).expect("fit succeeds");

    // Assert
    let results = model.results().expect("fitted");
    assert!(results.accepted_restarts() >= 1);
    for attempt in results.attempts.iter().filter(|a| a.accepted) {
        assert_eq!(attempt.start.len(), 9);
        assert_eq!(attempt.end.len(), 9);
    }
    let fitted = *model.fitted_params().expect("fitted");
    let margins = constraint_margins(&fitted, 8);
    assert_eq!(margins.len(), 14);
    assert!(!is_violated(&margins, FEASIBILITY_TOL), "{fitted:?}");
    let truth_score = log_likelihood(&truth, &train).expect("evaluates");
    assert!(
        results.loglik >= truth_score - 2e-2 * truth_score.abs(),
        "{} vs {truth_score}",
        results.loglik
    );
    let score = model.score(&held_out).expect("scores");
    assert!(score.improvement > 0.0, "{score:?}");
}

#[test]
// Purpose
// -------
// A lone player who always reports the signal is fitted as an error-free
// truth-teller.
//
// Given
// -----
// - One player, 30 games of 10 rounds, constant payments, s1 truth
//   {TR: 1} with error rate 0.
//
// Expect
// ------
// - Fitted Truthful weight above 0.99 and error rate below 0.01; the
//   leftover weight does not stay parked on Random.
fn truthful_single_player_is_recovered() {
    // Arrange
    init_logging();
    let ctx = ExperimentContext::new(Treatment::Constant(1.0), 10, 1).expect("valid context");
    let truth = ModelParams::SingleStrategy(
        SingleStrategyParams::new(StrategyWeights::new(1.0, 0.0, 0.0, 0.0).expect("valid"), 0.0)
            .expect("valid"),
    );
    let data = simulated_set(&truth, &ctx, 30, 77);
    let mut model = StrategyModel::new(
        ModelFamily::SingleStrategy,
        EstimationOptions::seeded(Some(4), 13).expect("valid options"),
    );

    // Act
    model.fit(&data).expect("fit succeeds");

    // Assert
    let fitted = model.fitted_params().expect("fitted");
    assert!(fitted.weights().truthful > 0.99, "{fitted}");
    assert!(fitted.weights().residual() < 0.01, "{fitted}");
    assert!(fitted.error_rate() < 0.01, "{fitted}");
}

#[test]
// Purpose
// -------
// Misuse surfaces as typed errors rather than panics or sentinel values.
fn unfitted_and_trace_only_models_fail_cleanly() {
    init_logging();
    let ctx = ExperimentContext::new(Treatment::basic(), 5, 2).expect("valid context");
    let games = simulate_games(&s1_truth(), &ctx, &prior(), 5, SimOpts::seeded(4))
        .expect("simulates");
    let trace_only = TrainingSet::without_payoffs(&games, &ctx).expect("valid dataset");

    let unfitted = StrategyModel::new(ModelFamily::SingleStrategy, EstimationOptions::default());
    assert_eq!(unfitted.score(&trace_only).err(), Some(OptError::ModelNotFitted));

    let mut switching = StrategyModel::new(
        ModelFamily::SwitchOnce(SwitchMode::Relative),
        EstimationOptions::seeded(Some(1), 1).expect("valid options"),
    );
    assert!(matches!(
        switching.fit(&trace_only),
        Err(OptError::Model(ModelError::MissingPayoffPaths { .. }))
    ));
}
