//! Seat-state mutators and bulk resets.
//!
//! Every mutator funnels through the session so the invalidation batching
//! and the lock invariants hold. Returns follow one convention: `Err` for
//! broken preconditions (bad indices), `Ok(false)` for absorbed stale input,
//! `Ok(true)` when state changed.

use tracing::debug;

use super::AgendaSession;
use crate::errors::AgendaError;
use crate::outcome::OutcomeIx;
use crate::phase::Phase;
use crate::ports::{BoardQuery, TurnOrderProvider};
use crate::seat::SeatIx;

impl<P, B> AgendaSession<P, B>
where
    P: TurnOrderProvider,
    B: BoardQuery,
{
    /// Rename an outcome. Names are frozen once `ChooseOutcomeType` ends;
    /// a late rename is stale UI input and is absorbed.
    pub fn set_outcome_name(
        &mut self,
        outcome: OutcomeIx,
        name: impl Into<String>,
    ) -> Result<bool, AgendaError> {
        self.check_outcome(outcome)?;
        if self.phase != Phase::ChooseOutcomeType {
            debug!(outcome, phase = %self.phase, "outcome rename absorbed, names are frozen");
            return Ok(false);
        }
        self.outcomes[outcome].name = name.into();
        self.post_invalidate();
        Ok(true)
    }

    /// Declare (or retract) "no reaction" for the first window. May be set
    /// early; `reset_for_phase` turns it into a carried-over pass.
    pub fn set_no_whens(&mut self, seat: SeatIx, value: bool) -> Result<bool, AgendaError> {
        self.check_seat(seat)?;
        if !self.is_active() {
            return Ok(false);
        }
        self.seats[seat].no_whens = value;
        self.post_invalidate();
        Ok(true)
    }

    /// Declare (or retract) "no reaction" for the second window.
    pub fn set_no_afters(&mut self, seat: SeatIx, value: bool) -> Result<bool, AgendaError> {
        self.check_seat(seat)?;
        if !self.is_active() {
            return Ok(false);
        }
        self.seats[seat].no_afters = value;
        self.post_invalidate();
        Ok(true)
    }

    /// Protect a seat's no-reaction declarations from bulk reset.
    pub fn set_reaction_locked(&mut self, seat: SeatIx, value: bool) -> Result<bool, AgendaError> {
        self.check_seat(seat)?;
        if !self.is_active() {
            return Ok(false);
        }
        self.seats[seat].reaction_locked = value;
        self.post_invalidate();
        Ok(true)
    }

    /// Lock a seat's vote. A locked vote survives bulk resets and ignores
    /// card-flip adjustments; it also counts as a carried-over pass when the
    /// `Vote` phase begins.
    pub fn set_vote_locked(&mut self, seat: SeatIx, value: bool) -> Result<bool, AgendaError> {
        self.check_seat(seat)?;
        if !self.is_active() {
            return Ok(false);
        }
        self.seats[seat].vote_locked = value;
        self.post_invalidate();
        Ok(true)
    }

    /// Choose an outcome for a seat (`None` retracts the choice). Writes to
    /// a vote-locked seat are absorbed: a lock means the choice is
    /// committed.
    pub fn set_outcome(
        &mut self,
        seat: SeatIx,
        outcome: Option<OutcomeIx>,
    ) -> Result<bool, AgendaError> {
        self.check_seat(seat)?;
        if let Some(ix) = outcome {
            self.check_outcome(ix)?;
        }
        if !self.is_active() {
            return Ok(false);
        }
        if self.seats[seat].vote_locked {
            debug!(seat, "outcome write absorbed, vote is locked");
            return Ok(false);
        }
        self.seats[seat].outcome = outcome;
        self.post_invalidate();
        Ok(true)
    }

    /// Record how many votes a seat casts toward its chosen outcome. The
    /// count is stored as given; capping against the snapshot is the UI's
    /// concern (seats may record votes before the snapshot exists).
    pub fn set_votes(&mut self, seat: SeatIx, votes: u32) -> Result<bool, AgendaError> {
        self.check_seat(seat)?;
        if !self.is_active() {
            return Ok(false);
        }
        if self.seats[seat].vote_locked {
            debug!(seat, "vote count write absorbed, vote is locked");
            return Ok(false);
        }
        self.seats[seat].votes = votes;
        self.post_invalidate();
        Ok(true)
    }

    /// Record a seat's prediction counter for an outcome. Predictions are
    /// informational side-bets, independent of votes and of vote locks.
    pub fn set_prediction(
        &mut self,
        seat: SeatIx,
        outcome: OutcomeIx,
        count: u32,
    ) -> Result<bool, AgendaError> {
        self.check_seat(seat)?;
        self.check_outcome(outcome)?;
        if !self.is_active() {
            return Ok(false);
        }
        self.seats[seat].predictions[outcome] = count;
        self.post_invalidate();
        Ok(true)
    }

    /// Bulk reset of no-reaction declarations after a late environmental
    /// change. Reaction-locked seats keep their declarations.
    pub fn reset_reactions(&mut self) {
        for st in self.seats.iter_mut().filter(|st| !st.reaction_locked) {
            st.no_whens = false;
            st.no_afters = false;
        }
        self.post_invalidate();
    }

    /// Bulk reset of votes after a late environmental change. Vote-locked
    /// seats keep their choice and count.
    pub fn reset_votes(&mut self) {
        for st in self.seats.iter_mut().filter(|st| !st.vote_locked) {
            st.outcome = None;
            st.votes = 0;
        }
        self.post_invalidate();
    }
}
