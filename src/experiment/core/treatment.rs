//! experiment::core::treatment — payment rules.
//!
//! Purpose
//! -------
//! Compute the reward a player would have received in a round had they
//! reported a given label instead, holding every other player's report
//! fixed. The switch-point simulator replays games through this lookup, and
//! the synthetic-data generator uses it to pay simulated players.
//!
//! Key behaviors
//! -------------
//! - [`Treatment::ReferencePlayer`]: the reward is read from a 2×2 payment
//!   matrix indexed by (own report, reference player's report). The
//!   reference is recorded per player per round.
//! - [`Treatment::PeerCount`]: the reward depends on the own report and the
//!   number of *other* players who reported the first label.
//! - [`Treatment::Constant`]: a flat reward that ignores reports.
//!
//! Conventions
//! -----------
//! - The treatment is carried by value inside
//!   [`ExperimentContext`](crate::experiment::core::context::ExperimentContext);
//!   nothing here is global.
use crate::experiment::{
    core::{labels::Label, round::Round},
    errors::{ExperimentError, ExperimentResult},
};

/// Payment matrix for reference-player scoring, indexed `[own][reference]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentMatrix {
    payments: [[f64; 2]; 2],
}

impl PaymentMatrix {
    /// Build a matrix from its four entries.
    ///
    /// # Errors
    /// - [`ExperimentError::InvalidPaymentTable`] if an entry is non-finite.
    pub fn new(mm_mm: f64, mm_gb: f64, gb_mm: f64, gb_gb: f64) -> ExperimentResult<Self> {
        let payments = [[mm_mm, mm_gb], [gb_mm, gb_gb]];
        if payments.iter().flatten().any(|p| !p.is_finite()) {
            return Err(ExperimentError::InvalidPaymentTable {
                reason: "Payment matrix entries must be finite.",
            });
        }
        Ok(Self { payments })
    }

    /// The "basic" peer-prediction rule used in the two-world experiments.
    pub fn basic() -> Self {
        Self { payments: [[1.5, 0.1], [0.3, 1.2]] }
    }

    pub fn payment(&self, own: Label, reference: Label) -> f64 {
        self.payments[own.index()][reference.index()]
    }

    pub fn max_payment(&self) -> f64 {
        self.payments.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_payment(&self) -> f64 {
        self.payments.iter().flatten().copied().fold(f64::INFINITY, f64::min)
    }
}

/// Payment table indexed by own report and the number of other players
/// reporting the first label.
///
/// `first[k]` / `second[k]` is the payment for reporting MM / GB when `k`
/// other players reported MM.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerCountPayments {
    first: Vec<f64>,
    second: Vec<f64>,
}

impl PeerCountPayments {
    /// # Errors
    /// - [`ExperimentError::InvalidPaymentTable`] if the two rows differ in
    ///   length, are empty, or hold non-finite values.
    pub fn new(first: Vec<f64>, second: Vec<f64>) -> ExperimentResult<Self> {
        if first.is_empty() || first.len() != second.len() {
            return Err(ExperimentError::InvalidPaymentTable {
                reason: "Peer-count rows must be non-empty and of equal length.",
            });
        }
        if first.iter().chain(second.iter()).any(|p| !p.is_finite()) {
            return Err(ExperimentError::InvalidPaymentTable {
                reason: "Peer-count payments must be finite.",
            });
        }
        Ok(Self { first, second })
    }

    pub fn payment(&self, own: Label, others_first: usize) -> ExperimentResult<f64> {
        let row = match own {
            Label::Mm => &self.first,
            Label::Gb => &self.second,
        };
        row.get(others_first).copied().ok_or(ExperimentError::InvalidPaymentTable {
            reason: "Peer-count table does not cover the number of other players.",
        })
    }
}

/// Payment rule of an experiment.
#[derive(Debug, Clone, PartialEq)]
pub enum Treatment {
    ReferencePlayer(PaymentMatrix),
    PeerCount(PeerCountPayments),
    Constant(f64),
}

impl Treatment {
    /// Reference-player scoring with [`PaymentMatrix::basic`].
    pub fn basic() -> Self {
        Treatment::ReferencePlayer(PaymentMatrix::basic())
    }

    /// Whether rounds must carry a reference player per outcome.
    pub fn needs_reference(&self) -> bool {
        matches!(self, Treatment::ReferencePlayer(_))
    }

    /// Reward `player` would have earned in `round` by reporting `candidate`.
    ///
    /// Other players' reports are taken as recorded.
    ///
    /// # Errors
    /// - [`ExperimentError::MissingPlayerOutcome`] if `player` is not in the round.
    /// - [`ExperimentError::MissingReference`] / [`ExperimentError::UnknownReference`]
    ///   for reference scoring without a usable reference.
    /// - [`ExperimentError::InvalidPaymentTable`] if a peer-count table is too short.
    pub fn hypothetical_reward(
        &self, round: &Round, player: &str, candidate: Label,
    ) -> ExperimentResult<f64> {
        let outcome = round.outcome(player)?;
        match self {
            Treatment::ReferencePlayer(matrix) => {
                let reference = outcome.reference.as_deref().ok_or_else(|| {
                    ExperimentError::MissingReference {
                        round: round.index(),
                        player: player.to_string(),
                    }
                })?;
                let reference_report = round.report(reference).map_err(|_| {
                    ExperimentError::UnknownReference {
                        round: round.index(),
                        player: player.to_string(),
                        reference: reference.to_string(),
                    }
                })?;
                Ok(matrix.payment(candidate, reference_report))
            }
            Treatment::PeerCount(table) => {
                let others_first = round.other_reports(player).filter(|r| *r == Label::Mm).count();
                table.payment(candidate, others_first)
            }
            Treatment::Constant(value) => Ok(*value),
        }
    }
}
