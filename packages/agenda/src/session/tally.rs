//! Read-side projections over session state.
//!
//! Pure group-bys for display; they never mutate and never trigger
//! invalidation.

use serde::{Deserialize, Serialize};

use super::AgendaSession;
use crate::outcome::OutcomeIx;
use crate::seat::SeatIx;

/// Votes gathered by one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub outcome: OutcomeIx,
    pub name: String,
    pub votes: u64,
    /// Contributing seats, ascending; seats with zero recorded votes are
    /// ignored.
    pub seats: Vec<SeatIx>,
}

/// Prediction side-bets gathered by one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionTally {
    pub outcome: OutcomeIx,
    pub name: String,
    pub predictions: u64,
    pub seats: Vec<SeatIx>,
}

impl<P, B> AgendaSession<P, B> {
    /// Group seats by chosen outcome and sum their recorded votes.
    pub fn summarize_outcomes(&self) -> Vec<OutcomeTally> {
        self.outcomes
            .iter()
            .enumerate()
            .map(|(ix, outcome)| {
                let mut votes = 0u64;
                let mut seats = Vec::new();
                for (seat, st) in self.seats.iter().enumerate() {
                    if st.outcome == Some(ix) && st.votes > 0 {
                        votes += u64::from(st.votes);
                        seats.push(seat);
                    }
                }
                OutcomeTally {
                    outcome: ix,
                    name: outcome.name.clone(),
                    votes,
                    seats,
                }
            })
            .collect()
    }

    /// Group the independent prediction counters by outcome. Predictions do
    /// not affect the vote tally.
    pub fn summarize_predictions(&self) -> Vec<PredictionTally> {
        self.outcomes
            .iter()
            .enumerate()
            .map(|(ix, outcome)| {
                let mut predictions = 0u64;
                let mut seats = Vec::new();
                for (seat, st) in self.seats.iter().enumerate() {
                    let count = st.predictions.get(ix).copied().unwrap_or(0);
                    if count > 0 {
                        predictions += u64::from(count);
                        seats.push(seat);
                    }
                }
                PredictionTally {
                    outcome: ix,
                    name: outcome.name.clone(),
                    predictions,
                    seats,
                }
            })
            .collect()
    }
}
