//! experiment — the repeated-game dataset consumed by the likelihood core.
//!
//! Purpose
//! -------
//! Model what an experiment recorded: games made of rounds, and for each
//! round the world, every player's signal, report and reward. Also model the
//! payment rule that turns reports into rewards. The behavioral models in
//! [`crate::behavior`] only read these types.
//!
//! Key behaviors
//! -------------
//! - Validated, append-only construction of [`core::game::Game`] and
//!   [`core::round::Round`].
//! - Hypothetical-reward lookup per payment rule
//!   ([`core::treatment::Treatment::hypothetical_reward`]).
//! - An explicit [`core::context::ExperimentContext`] carrying the treatment
//!   and dataset-wide counts.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every round of a game holds exactly one outcome per game player.
//! - Rewards are finite.
//! - Games are never mutated by estimation code.
//!
//! Conventions
//! -----------
//! - Round indices are 0-based and contiguous.
//! - Errors are reported as [`errors::ExperimentError`].
pub mod core;
pub mod errors;
