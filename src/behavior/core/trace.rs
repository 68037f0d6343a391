//! behavior::core::trace — prefix counts of (signal, report) pairs.
//!
//! Every strategy kernel depends on the data only through how often each of
//! the four (signal, report) combinations occurs in the interval. A
//! [`PlayerTrace`] stores cumulative counts per round so any interval's
//! kernel is a handful of `powi` calls instead of a walk over the rounds.
//! Results match [`strategy_likelihood`](crate::behavior::core::kernel::strategy_likelihood)
//! exactly.
use crate::{
    behavior::{
        core::{kernel::check_interval, strategy::Strategy},
        errors::{ModelError, ModelResult},
    },
    experiment::core::{game::Game, labels::Label},
};

/// Counts of (signal, report) pairs, indexed `[signal][report]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCounts {
    counts: [[u32; 2]; 2],
}

impl ReportCounts {
    pub fn get(&self, signal: Label, report: Label) -> u32 {
        self.counts[signal.index()][report.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }

    /// Rounds in which `strategy` would have reported what was reported.
    ///
    /// Only meaningful for the four deterministic strategies; zero otherwise.
    pub fn hits(&self, strategy: &Strategy) -> u32 {
        let mut hits = 0;
        for signal in Label::ALL {
            if let Some(intended) = strategy.intended_report(signal) {
                hits += self.get(signal, intended);
            }
        }
        hits
    }

    fn add(&mut self, signal: Label, report: Label) {
        self.counts[signal.index()][report.index()] += 1;
    }

    fn minus(&self, earlier: &ReportCounts) -> ReportCounts {
        let mut out = ReportCounts::default();
        for s in 0..2 {
            for r in 0..2 {
                out.counts[s][r] = self.counts[s][r] - earlier.counts[s][r];
            }
        }
        out
    }

    /// Likelihood of these counts under `strategy` with `error_rate`.
    pub fn likelihood(&self, strategy: &Strategy, error_rate: f64) -> f64 {
        let total = self.total() as i32;
        match strategy {
            Strategy::Random => 0.5_f64.powi(total),
            Strategy::CustomMixed(params) => {
                let mut lk = 1.0;
                for signal in Label::ALL {
                    for report in Label::ALL {
                        let n = self.get(signal, report) as i32;
                        lk *= params.report_prob(signal, report).powi(n);
                    }
                }
                lk
            }
            _ => {
                let hits = self.hits(strategy) as i32;
                (1.0 - error_rate).powi(hits) * error_rate.powi(total - hits)
            }
        }
    }
}

/// Cumulative report counts of one player in one game.
///
/// `prefix[r]` holds the counts of rounds `0..r`, so `prefix.len()` is the
/// number of rounds plus one.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTrace {
    prefix: Vec<ReportCounts>,
}

impl PlayerTrace {
    /// # Errors
    /// - [`ModelError::PlayerNotInGame`] if `player` is not a game player.
    pub fn from_game(game: &Game, player: &str) -> ModelResult<Self> {
        if !game.contains_player(player) {
            return Err(ModelError::PlayerNotInGame { player: player.to_string() });
        }
        let mut prefix = Vec::with_capacity(game.num_rounds() + 1);
        let mut running = ReportCounts::default();
        prefix.push(running);
        for round in game.rounds() {
            let outcome = round.outcome(player)?;
            running.add(outcome.signal, outcome.report);
            prefix.push(running);
        }
        Ok(Self { prefix })
    }

    pub fn num_rounds(&self) -> usize {
        self.prefix.len() - 1
    }

    /// Counts over rounds `[start, end)`.
    ///
    /// # Panics
    /// - If `start > end` or `end > self.num_rounds()`. Use
    ///   [`PlayerTrace::checked_likelihood`] for untrusted intervals.
    pub fn counts(&self, start: usize, end: usize) -> ReportCounts {
        assert!(start <= end, "interval start {start} exceeds end {end}");
        self.prefix[end].minus(&self.prefix[start])
    }

    /// Kernel over `[start, end)`; same panics as [`PlayerTrace::counts`].
    pub fn likelihood(
        &self, start: usize, end: usize, strategy: &Strategy, error_rate: f64,
    ) -> f64 {
        self.counts(start, end).likelihood(strategy, error_rate)
    }

    /// Full-game kernel.
    pub fn game_likelihood(&self, strategy: &Strategy, error_rate: f64) -> f64 {
        self.likelihood(0, self.num_rounds(), strategy, error_rate)
    }

    /// # Errors
    /// - [`ModelError::InvalidInterval`] unless `start <= end <= num_rounds`.
    pub fn checked_likelihood(
        &self, start: usize, end: usize, strategy: &Strategy, error_rate: f64,
    ) -> ModelResult<f64> {
        check_interval(start, end, self.num_rounds())?;
        Ok(self.likelihood(start, end, strategy, error_rate))
    }
}
