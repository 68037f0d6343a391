//! Errors for behavioral strategy models (strategy tags, kernels, parameter
//! points, model selection, training data, simulation).
//!
//! [`ModelError`] is the error type of the likelihood core. Configuration and
//! programming errors (unknown strategy tags, missing CustomMixed
//! parameters, malformed intervals or points) fail fast here instead of
//! yielding sentinel likelihoods. Out-of-domain parameter *values* are not
//! errors: the optimizer handles them through constraint penalties.
use crate::experiment::errors::ExperimentError;

/// Result alias for behavioral-model operations.
pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Strategies ----
    /// Strategy tag is not one of TR, MM, GB, OP, RA, CU.
    UnknownStrategy { tag: String },

    /// Pure-strategy index outside 0..5.
    StrategyIndexOutOfRange { index: usize },

    /// A CustomMixed strategy was requested without its two conditional probabilities.
    MissingCustomParams,

    /// Conditional report probabilities must lie in [0, 1].
    InvalidConditionalProb { value: f64 },

    // ---- Kernel ----
    /// Round interval must satisfy start <= end <= number of rounds.
    InvalidInterval { start: usize, end: usize, num_rounds: usize },

    /// Player is not part of the game.
    PlayerNotInGame { player: String },

    // ---- Parameters / families ----
    /// Optimization point has the wrong length for the family.
    PointLengthMismatch { family: &'static str, expected: usize, actual: usize },

    /// Model family name is not recognized.
    UnknownFamily { name: String },

    /// Parameter set does not belong to the requested family.
    FamilyMismatch { expected: &'static str, found: &'static str },

    /// Parameter values outside their documented domain.
    InvalidParams { reason: &'static str },

    // ---- Training data ----
    /// Dataset is empty.
    EmptyDataset,

    /// A game's number of rounds disagrees with the experiment context.
    RoundCountMismatch { expected: usize, found: usize },

    /// Switching families need payoff paths, which were not computed.
    MissingPayoffPaths { family: &'static str },

    // ---- Simulation ----
    /// Simulation configuration cannot produce games.
    InvalidSimulation { reason: &'static str },

    // ---- Data model ----
    /// Wrapper for dataset errors raised while reading games.
    Experiment(ExperimentError),
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Strategies ----
            ModelError::UnknownStrategy { tag } => {
                write!(f, "Unknown strategy '{tag}': expected one of TR, MM, GB, OP, RA, CU")
            }
            ModelError::StrategyIndexOutOfRange { index } => {
                write!(f, "Pure strategy index {index} out of range 0..5")
            }
            ModelError::MissingCustomParams => {
                write!(f, "CustomMixed strategy requires two conditional report probabilities")
            }
            ModelError::InvalidConditionalProb { value } => {
                write!(f, "Invalid conditional report probability {value}, must be in [0, 1]")
            }

            // ---- Kernel ----
            ModelError::InvalidInterval { start, end, num_rounds } => {
                write!(
                    f,
                    "Invalid round interval [{start}, {end}) for a game with {num_rounds} rounds"
                )
            }
            ModelError::PlayerNotInGame { player } => {
                write!(f, "Player '{player}' is not part of the game")
            }

            // ---- Parameters / families ----
            ModelError::PointLengthMismatch { family, expected, actual } => {
                write!(f, "Point length mismatch for family {family}: expected {expected}, actual {actual}")
            }
            ModelError::UnknownFamily { name } => {
                write!(
                    f,
                    "Unknown model family '{name}': expected s1, s1-1, s2-abs, s2-rel, s3-abs or s3-rel"
                )
            }
            ModelError::FamilyMismatch { expected, found } => {
                write!(f, "Parameter family mismatch: expected {expected}, found {found}")
            }
            ModelError::InvalidParams { reason } => write!(f, "Invalid model parameters: {reason}"),

            // ---- Training data ----
            ModelError::EmptyDataset => write!(f, "Dataset contains no games"),
            ModelError::RoundCountMismatch { expected, found } => {
                write!(f, "Game has {found} rounds, experiment context expects {expected}")
            }
            ModelError::MissingPayoffPaths { family } => {
                write!(f, "Family {family} needs payoff paths; build the training set for it")
            }

            // ---- Simulation ----
            ModelError::InvalidSimulation { reason } => {
                write!(f, "Invalid simulation configuration: {reason}")
            }

            // ---- Data model ----
            ModelError::Experiment(err) => write!(f, "Dataset error: {err}"),
        }
    }
}

impl From<ExperimentError> for ModelError {
    fn from(err: ExperimentError) -> Self {
        ModelError::Experiment(err)
    }
}
