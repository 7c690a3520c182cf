//! Agenda session orchestration.
//!
//! One `AgendaSession` lives for the whole process; a round of agenda
//! resolution is `init()` + `start()`, and `clear()` returns the session to
//! its dormant state. The session is the single logical owner of all
//! per-seat mutable fields: collaborators may read freely but every write
//! goes through the session's mutators so invariants and invalidation
//! batching stay intact.

mod choreography;
mod mutators;
mod tally;
mod weights;

#[cfg(test)]
mod tests_choreography;

pub use tally::{OutcomeTally, PredictionTally};
pub use weights::{ALLIANCE_VOTE_BONUS, COMMANDER_VOTE_BONUS};

use tracing::info;

use crate::errors::AgendaError;
use crate::outcome::{Outcome, OutcomeIx};
use crate::phase::Phase;
use crate::ports::{BoardQuery, TurnOrderProvider, VoteModifier};
use crate::seat::SeatIx;

/// Mutable per-seat agenda state. Freshly allocated on `init`, discarded on
/// `clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatState {
    /// Seat declared it has no reaction for the first window.
    pub no_whens: bool,
    /// Seat declared it has no reaction for the second window.
    pub no_afters: bool,
    /// Protects the no-reaction declarations from bulk reset.
    pub reaction_locked: bool,
    /// Protects the vote (choice, count, snapshot) from bulk reset, direct
    /// rewrites, and card-flip adjustments.
    pub vote_locked: bool,
    /// Chosen outcome, if any.
    pub outcome: Option<OutcomeIx>,
    /// Votes recorded toward the chosen outcome.
    pub votes: u32,
    /// Informational side-bets, one counter per outcome. Not votes; they
    /// never affect the tally.
    pub predictions: Vec<u32>,
    /// Available vote weight, snapshotted when voting opens (never
    /// recomputed automatically afterward).
    pub available_votes: u32,
}

/// Orchestrator for one political-proposal round.
///
/// Owns the current phase, the outcome catalog, the per-seat state, the
/// vote-modifier registry, and the batched invalidation flag. Drives phase
/// advancement through the turn-order collaborator and computes vote weight
/// through the board collaborator.
pub struct AgendaSession<P, B> {
    provider: P,
    board: B,
    /// Monotonic counter identifying the current proposal instance; bumped
    /// whenever a proposal starts or ends.
    epoch: u64,
    phase: Phase,
    outcomes: Vec<Outcome>,
    seats: Vec<SeatState>,
    /// Ordered seat sequence seeded into the provider for the current phase.
    current_order: Vec<SeatIx>,
    /// Session-owned registry, append-only for the session's lifetime.
    modifiers: Vec<VoteModifier>,
    /// Dirty flag drained once per host tick.
    invalidated: bool,
}

impl<P, B> AgendaSession<P, B>
where
    P: TurnOrderProvider,
    B: BoardQuery,
{
    /// Construct a dormant session around its collaborators.
    pub fn new(provider: P, board: B) -> Self {
        Self {
            provider,
            board,
            epoch: 0,
            phase: Phase::Idle,
            outcomes: Vec::new(),
            seats: Vec::new(),
            current_order: Vec::new(),
            modifiers: Vec::new(),
            invalidated: false,
        }
    }

    /// Allocate the outcome catalog and per-seat state for a new proposal.
    ///
    /// Must be paired with `start()`; calling it while a round is active is
    /// a programming error.
    pub fn init<I, S>(&mut self, outcome_names: I) -> Result<(), AgendaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.phase != Phase::Idle {
            return Err(AgendaError::invariant(format!(
                "init called while a round is active (phase {})",
                self.phase
            )));
        }
        self.outcomes = outcome_names.into_iter().map(Outcome::new).collect();
        let outcome_count = self.outcomes.len();
        self.seats = (0..self.provider.seat_count())
            .map(|_| SeatState {
                predictions: vec![0; outcome_count],
                ..SeatState::default()
            })
            .collect();
        self.current_order.clear();
        self.post_invalidate();
        Ok(())
    }

    /// Begin the round: bump the epoch and enter `ChooseOutcomeType`.
    pub fn start(&mut self) -> Result<(), AgendaError> {
        if self.phase != Phase::Idle {
            return Err(AgendaError::invariant(format!(
                "start called while a round is active (phase {})",
                self.phase
            )));
        }
        if self.outcomes.is_empty() {
            return Err(AgendaError::invariant("start called before init"));
        }
        self.epoch += 1;
        self.phase = Phase::ChooseOutcomeType;
        info!(epoch = self.epoch, "agenda round started");
        self.reset_for_phase()?;
        self.post_invalidate();
        Ok(())
    }

    /// Return to the dormant state, discarding all round state. Idempotent.
    pub fn clear(&mut self) {
        if self.phase == Phase::Idle && self.outcomes.is_empty() {
            return;
        }
        self.epoch += 1;
        self.phase = Phase::Idle;
        self.outcomes.clear();
        self.seats.clear();
        self.current_order.clear();
        self.provider.clear_all_passed();
        info!(epoch = self.epoch, "agenda round cleared");
        self.post_invalidate();
    }

    /// Whether a proposal round is active.
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn seats(&self) -> &[SeatState] {
        &self.seats
    }

    pub fn seat(&self, seat: SeatIx) -> Result<&SeatState, AgendaError> {
        self.seats
            .get(seat)
            .ok_or(AgendaError::SeatOutOfRange(seat))
    }

    /// Ordered seat sequence for the current phase (empty for phases without
    /// a turn order).
    pub fn current_order(&self) -> &[SeatIx] {
        &self.current_order
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[cfg(test)]
    pub(crate) fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    /// Drain the batched change-notification flag.
    ///
    /// Every mutator sets the flag; the host calls this once per tick and
    /// fires its own "state changed" signal when it returns true. However
    /// many mutations happened since the last drain, at most one signal
    /// results.
    pub fn take_invalidate(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    pub(crate) fn post_invalidate(&mut self) {
        self.invalidated = true;
    }

    pub(crate) fn check_seat(&self, seat: SeatIx) -> Result<(), AgendaError> {
        if seat < self.seats.len() {
            Ok(())
        } else {
            Err(AgendaError::SeatOutOfRange(seat))
        }
    }

    pub(crate) fn check_outcome(&self, outcome: OutcomeIx) -> Result<(), AgendaError> {
        if outcome < self.outcomes.len() {
            Ok(())
        } else {
            Err(AgendaError::OutcomeOutOfRange(outcome))
        }
    }
}
