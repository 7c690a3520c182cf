#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Agenda round engine.
//!
//! Resolves a multi-seat, turn-structured political-proposal round: a
//! proposal is announced, seats react in two successive windows
//! ("when"/"after"), seats cast weighted votes for named outcomes, and the
//! round resolves. The engine owns phase choreography, turn-order math,
//! vote-weight snapshots, and idempotent pass/lock semantics; everything
//! else (rendering, seating, board state, persistence) stays with the host
//! behind the traits in [`ports`].

pub mod errors;
pub mod order;
pub mod outcome;
pub mod phase;
pub mod ports;
pub mod seat;
pub mod session;

#[cfg(test)]
mod test_prelude;

// Re-exports for ergonomics
pub use errors::AgendaError;
pub use outcome::{Outcome, OutcomeIx};
pub use phase::Phase;
pub use ports::{Asset, BoardQuery, TurnOrderProvider, VoteModifier};
pub use seat::SeatIx;
pub use session::{AgendaSession, OutcomeTally, PredictionTally, SeatState};
