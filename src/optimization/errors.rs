use argmin::core::{ArgminError, Error};

use crate::behavior::errors::ModelError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- MLEOptions ----
    /// Simplex cost tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Initial simplex step must be positive and finite.
    InvalidInitialStep {
        step: f64,
        reason: &'static str,
    },

    /// Merit weight must be non-negative and finite.
    InvalidMeritWeight {
        weight: f64,
        reason: &'static str,
    },

    // ---- MultiStartOptions ----
    /// Penalty coefficient must exceed 1 and be finite.
    InvalidPenalty {
        value: f64,
        reason: &'static str,
    },

    /// Restart count must be positive.
    InvalidRestarts {
        restarts: usize,
        reason: &'static str,
    },

    /// Feasibility tolerance must be non-negative and finite.
    InvalidFeasibilityTol {
        tol: f64,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Starting point has the wrong dimension.
    StartPointMismatch {
        expected: usize,
        found: usize,
    },

    /// Starting point entries need to be finite.
    InvalidStartPoint {
        index: usize,
        value: f64,
    },

    /// Objective evaluated to NaN after sanitation.
    NanObjective,

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    /// Every restart ended in an infeasible point.
    NoFeasibleRestart {
        restarts: usize,
        abandoned: usize,
    },

    /// Results requested before `fit`.
    ModelNotFitted,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Model ----
    /// Wrapper for behavioral-model errors raised inside the objective.
    Model(ModelError),

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- MLEOptions ----
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid simplex cost tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidInitialStep { step, reason } => {
                write!(f, "Invalid initial simplex step {step}: {reason}")
            }
            OptError::InvalidMeritWeight { weight, reason } => {
                write!(f, "Invalid merit weight {weight}: {reason}")
            }

            // ---- MultiStartOptions ----
            OptError::InvalidPenalty { value, reason } => {
                write!(f, "Invalid penalty coefficient {value}: {reason}")
            }
            OptError::InvalidRestarts { restarts, reason } => {
                write!(f, "Invalid restart count {restarts}: {reason}")
            }
            OptError::InvalidFeasibilityTol { tol, reason } => {
                write!(f, "Invalid feasibility tolerance {tol}: {reason}")
            }

            // ---- Objective ----
            OptError::StartPointMismatch { expected, found } => {
                write!(f, "Start point dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidStartPoint { index, value } => {
                write!(f, "Invalid start point at index {index}: {value}, must be finite")
            }
            OptError::NanObjective => write!(f, "Objective evaluated to NaN"),

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }
            OptError::NoFeasibleRestart { restarts, abandoned } => {
                write!(
                    f,
                    "No feasible restart: {abandoned} of {restarts} restarts abandoned after penalty escalation"
                )
            }
            OptError::ModelNotFitted => write!(f, "Model has not been fitted"),

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Model ----
            OptError::Model(err) => write!(f, "Model error: {err}"),

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<ModelError> for OptError {
    fn from(err: ModelError) -> Self {
        OptError::Model(err)
    }
}
