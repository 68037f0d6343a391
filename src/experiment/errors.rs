//! Errors for experiment datasets (games, rounds, payment rules, context).
//!
//! [`ExperimentError`] covers everything the data model can reject before a
//! likelihood is ever evaluated: malformed games, missing per-player
//! outcomes, unknown labels, invalid payment tables, and inconsistent
//! experiment-wide counts.
//!
//! ## Conventions
//! - Round indices are **0-based**.
//! - Player identifiers are the opaque strings supplied by the data loader.

/// Result alias for dataset construction and lookups.
pub type ExperimentResult<T> = Result<T, ExperimentError>;

/// Unified error type for the experiment data model.
#[derive(Debug, Clone, PartialEq)]
pub enum ExperimentError {
    // ---- Labels ----
    /// Label string is neither "MM" nor "GB".
    UnknownLabel { label: String },

    // ---- Games / rounds ----
    /// A game needs at least one player.
    NoPlayers,

    /// Player identifiers must be unique within a game.
    DuplicatePlayer { player: String },

    /// Round appended out of order.
    RoundIndexMismatch { expected: usize, found: usize },

    /// A round is missing the outcome of a game player.
    MissingPlayerOutcome { round: usize, player: String },

    /// A round carries an outcome for a player that is not in the game.
    UnexpectedPlayer { round: usize, player: String },

    /// Recorded rewards must be finite.
    NonFiniteReward { round: usize, player: String, value: f64 },

    /// World probability must lie in [0, 1].
    InvalidWorldProbability { value: f64 },

    // ---- Payment rules ----
    /// A reference-player rule needs a reference for every player.
    MissingReference { round: usize, player: String },

    /// The reference player is not part of the round.
    UnknownReference { round: usize, player: String, reference: String },

    /// Payment table entries must be finite and the table must cover the game size.
    InvalidPaymentTable { reason: &'static str },

    // ---- Context / priors ----
    /// Experiment-wide counts must be positive and consistent across games.
    InvalidContext { num_rounds: usize, num_players: usize, reason: &'static str },

    /// World priors must be non-empty, finite, non-negative and sum to 1.
    InvalidPrior { reason: &'static str },
}

impl std::error::Error for ExperimentError {}

impl std::fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Labels ----
            ExperimentError::UnknownLabel { label } => {
                write!(f, "Unknown label '{label}': expected 'MM' or 'GB'")
            }

            // ---- Games / rounds ----
            ExperimentError::NoPlayers => write!(f, "Game has no players"),
            ExperimentError::DuplicatePlayer { player } => {
                write!(f, "Duplicate player identifier '{player}'")
            }
            ExperimentError::RoundIndexMismatch { expected, found } => {
                write!(f, "Round index mismatch: expected {expected}, found {found}")
            }
            ExperimentError::MissingPlayerOutcome { round, player } => {
                write!(f, "Round {round} has no outcome for player '{player}'")
            }
            ExperimentError::UnexpectedPlayer { round, player } => {
                write!(f, "Round {round} has an outcome for unknown player '{player}'")
            }
            ExperimentError::NonFiniteReward { round, player, value } => {
                write!(f, "Non-finite reward {value} for player '{player}' in round {round}")
            }
            ExperimentError::InvalidWorldProbability { value } => {
                write!(f, "Invalid world probability {value}, must be in [0, 1]")
            }

            // ---- Payment rules ----
            ExperimentError::MissingReference { round, player } => {
                write!(f, "Player '{player}' has no reference player in round {round}")
            }
            ExperimentError::UnknownReference { round, player, reference } => {
                write!(
                    f,
                    "Reference '{reference}' of player '{player}' is not part of round {round}"
                )
            }
            ExperimentError::InvalidPaymentTable { reason } => {
                write!(f, "Invalid payment table: {reason}")
            }

            // ---- Context / priors ----
            ExperimentError::InvalidContext { num_rounds, num_players, reason } => {
                write!(
                    f,
                    "Invalid experiment context (rounds = {num_rounds}, players = {num_players}): {reason}"
                )
            }
            ExperimentError::InvalidPrior { reason } => {
                write!(f, "Invalid world prior: {reason}")
            }
        }
    }
}
