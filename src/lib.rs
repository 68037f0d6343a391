//! strategy_mle — maximum-likelihood estimation of behavioral strategy models
//! for repeated peer-prediction games.
//!
//! Purpose
//! -------
//! Serve as the crate root. The crate fits parametric models of how players
//! turn private signals into reports, including models where a player
//! abandons their strategy once another one would clearly have paid more,
//! and estimates each model's parameters with a derivative-free,
//! multi-restart constrained optimizer.
//!
//! Key behaviors
//! -------------
//! - [`experiment`]: the dataset (games, rounds, signals, reports, rewards)
//!   and the payment rules that price reports.
//! - [`behavior`]: strategies, likelihood kernels, switch detection, the four
//!   model families, estimation, held-out scoring and simulation.
//! - [`optimization`]: the generic log-likelihood maximizer (Nelder–Mead via
//!   `argmin`) and the restart / penalty-escalation driver.
//!
//! Invariants & assumptions
//! ------------------------
//! - Data flow is one way: dataset → switch detection → likelihood →
//!   optimizer → fitted parameters → likelihood (for scoring).
//! - No global state: treatment, round and player counts travel in an
//!   explicit experiment context, and random generators are owned by the
//!   call that uses them.
//!
//! Conventions
//! -----------
//! - Labels are `MM` (first) and `GB` (second); strategy tags are `TR`, `MM`,
//!   `GB`, `OP`, `RA` and `CU`.
//! - Errors are hand-written enums per layer (`ExperimentError`,
//!   `ModelError`, `OptError`) with `From` conversions upward.
//! - Logging goes through the `log` facade; binaries and tests pick the
//!   backend (e.g. `env_logger`).
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code they cover.
//! - Integration tests under `tests/` run simulate → train → fit → score end
//!   to end with seeded generators.

pub mod behavior;
pub mod experiment;
pub mod optimization;
