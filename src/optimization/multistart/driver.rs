//! Multistart driver with penalty escalation.
//!
//! Each restart draws a start point from the problem, refines it with a
//! [`LocalOptimizer`], and checks the result against the hard constraints.
//! An infeasible result squares the quadratic penalty coefficient and
//! retries the same restart from a fresh start point; after
//! `max_escalations` failed escalations the restart is abandoned. The
//! coefficient is never reset, so later restarts begin at the escalated
//! value. The best feasible restart (by unpenalized log-likelihood) wins.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{LocalOptimizer, MLEOptions, Theta},
    multistart::{options::MultiStartOptions, traits::RestartProblem},
    numerical_stability::{is_violated, max_violation, sanitize_loglik},
};
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

/// Record of one local solve inside the multistart loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RestartSummary {
    /// Restart index in `0..num_restarts`.
    pub index: usize,
    /// Escalation attempt within the restart (0 for the first solve).
    pub attempt: usize,
    pub start: Theta,
    pub end: Theta,
    /// Unpenalized log-likelihood at `end`.
    pub loglik: f64,
    /// Largest constraint violation at `end`.
    pub max_violation: f64,
    /// Whether `end` passed the feasibility check.
    pub accepted: bool,
    /// Quadratic penalty coefficient used for this solve.
    pub penalty: f64,
    pub converged: bool,
    pub iterations: usize,
}

/// Result of a multistart run.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStartOutcome {
    pub theta_hat: Theta,
    /// Unpenalized log-likelihood at `theta_hat`.
    pub loglik: f64,
    /// Index of the restart that produced `theta_hat`.
    pub best_restart: usize,
    /// Every local solve in execution order, including rejected attempts.
    pub attempts: Vec<RestartSummary>,
    /// Total number of penalty escalations.
    pub escalations: usize,
    /// Restarts abandoned after exhausting their escalations.
    pub abandoned: usize,
    /// Penalty coefficient in force when the run ended.
    pub final_penalty: f64,
}

impl MultiStartOutcome {
    /// Number of restarts that produced a feasible point.
    pub fn accepted_restarts(&self) -> usize {
        self.attempts.iter().filter(|a| a.accepted).count()
    }
}

/// Squared penalty, saturating at `f64::MAX`.
fn escalate(penalty: f64) -> f64 {
    (penalty * penalty).min(f64::MAX)
}

/// Maximize `f` over `data` from several random starts.
///
/// # Errors
/// - [`OptError::NoFeasibleRestart`] if every restart is abandoned.
/// - [`OptError::InvalidRestarts`] if the problem's default restart count is
///   zero.
/// - Propagates start-point, local-solver and model errors.
pub fn multistart<F, O>(
    f: &F, data: &F::Data, optimizer: &O, mle_opts: &MLEOptions, ms: &MultiStartOptions,
) -> OptResult<MultiStartOutcome>
where
    F: RestartProblem,
    O: LocalOptimizer,
{
    let num_restarts = ms.restarts.unwrap_or_else(|| f.default_restarts(data));
    if num_restarts == 0 {
        return Err(OptError::InvalidRestarts {
            restarts: 0,
            reason: "The problem requested zero restarts.",
        });
    }
    let mut rng = match ms.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut penalty = ms.initial_penalty;
    let mut attempts = Vec::new();
    let mut best: Option<(usize, Theta, f64)> = None;
    let mut escalations = 0;
    let mut abandoned = 0;

    for index in 0..num_restarts {
        let mut attempt = 0;
        loop {
            let start = f.draw_start(index, num_restarts, &mut rng, data)?;
            let out = optimizer.maximize(f, start.clone(), data, penalty, mle_opts)?;
            let margins = f.margins(&out.theta_hat, data)?;
            let feasible = !is_violated(&margins, ms.feasibility_tol);
            let loglik = sanitize_loglik(f.value(&out.theta_hat, data)?);
            debug!(
                "restart {index} attempt {attempt}: loglik {loglik}, violation {}, penalty {penalty}",
                max_violation(&margins)
            );
            attempts.push(RestartSummary {
                index,
                attempt,
                start,
                end: out.theta_hat.clone(),
                loglik,
                max_violation: max_violation(&margins),
                accepted: feasible,
                penalty,
                converged: out.converged,
                iterations: out.iterations,
            });

            if feasible {
                info!("restart {index} accepted with log-likelihood {loglik}");
                let improves = best.as_ref().is_none_or(|(_, _, b)| loglik > *b);
                if improves {
                    best = Some((index, out.theta_hat, loglik));
                }
                break;
            }
            if attempt == ms.max_escalations {
                warn!("restart {index} abandoned after {attempt} penalty escalations");
                abandoned += 1;
                break;
            }
            penalty = escalate(penalty);
            escalations += 1;
            attempt += 1;
            warn!("restart {index} infeasible; penalty escalated to {penalty}");
        }
    }

    match best {
        Some((best_restart, theta_hat, loglik)) => Ok(MultiStartOutcome {
            theta_hat,
            loglik,
            best_restart,
            attempts,
            escalations,
            abandoned,
            final_penalty: penalty,
        }),
        None => Err(OptError::NoFeasibleRestart { restarts: num_restarts, abandoned }),
    }
}
