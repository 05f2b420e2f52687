#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Statistics recorder that accumulates the move count of every round.

mod metrics;

use log::debug;
use wandering_core::{Event, StatsSummary};

pub use metrics::summarize;

/// Pure bookkeeping system holding the append-only sequence of round records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsRecorder {
    records: Vec<u32>,
}

impl StatsRecorder {
    /// Creates a recorder with no rounds recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the move count of a completed round.
    pub fn record(&mut self, round_moves: u32) {
        debug!("recording round {} with {round_moves} moves", self.records.len() + 1);
        self.records.push(round_moves);
    }

    /// Consumes world events, recording every closed round.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            if let Event::RoundEnded { moves, .. } = event {
                self.record(*moves);
            }
        }
    }

    /// Recorded rounds in the order they completed.
    #[must_use]
    pub fn records(&self) -> &[u32] {
        &self.records
    }

    /// Number of recorded rounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reports whether no round has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Derives the aggregate metrics over every recorded round.
    #[must_use]
    pub fn summary(&self) -> StatsSummary {
        summarize(&self.records)
    }
}
