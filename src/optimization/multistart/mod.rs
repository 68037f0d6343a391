//! multistart — random restarts with quadratic penalty escalation.
//!
//! Purpose
//! -------
//! Wrap a [`LocalOptimizer`](crate::optimization::loglik_optimizer::LocalOptimizer)
//! in a global search: draw several start points, refine each one, and keep
//! the best point that satisfies the hard constraints.
//!
//! Key behaviors
//! -------------
//! - Start points come from the problem itself through [`RestartProblem`].
//! - An infeasible local solution squares the penalty coefficient and the
//!   restart is retried; the coefficient persists across restarts.
//! - A restart that stays infeasible after `max_escalations` is abandoned.
//!   If every restart is abandoned the run fails with
//!   [`OptError::NoFeasibleRestart`](crate::optimization::errors::OptError::NoFeasibleRestart).
//!
//! Invariants & assumptions
//! ------------------------
//! - Seeded runs are reproducible: the generator is the only randomness.
//! - The reported log-likelihood is unpenalized and re-evaluated at the
//!   accepted point.
//!
//! Testing notes
//! -------------
//! - Driver tests substitute fake local optimizers to pin the escalation and
//!   abandonment sequence, plus one end-to-end run with Nelder–Mead.

pub mod driver;
pub mod options;
pub mod traits;

pub use self::driver::{MultiStartOutcome, RestartSummary, multistart};
pub use self::options::{DEFAULT_INITIAL_PENALTY, DEFAULT_MAX_ESCALATIONS, MultiStartOptions};
pub use self::traits::RestartProblem;
