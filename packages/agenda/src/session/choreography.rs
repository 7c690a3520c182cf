//! Phase and turn choreography.
//!
//! Phases are not strictly sequential from the engine's point of view: seats
//! may act early (before the engine reaches a phase) or late (after everyone
//! else already passed it). The early-act guard absorbs stale input, the
//! carry-over pass marks honor early declarations, and the skip-ahead loop
//! makes a phase with zero active participants invisible to players.

use tracing::{debug, info};

use super::AgendaSession;
use crate::errors::AgendaError;
use crate::order;
use crate::phase::Phase;
use crate::ports::{BoardQuery, TurnOrderProvider};
use crate::seat::SeatIx;

impl<P, B> AgendaSession<P, B>
where
    P: TurnOrderProvider,
    B: BoardQuery,
{
    /// Record that `seat` took its action for `phase` and advance the turn.
    ///
    /// Returns `Ok(false)` when the call is stale (no active round, wrong
    /// phase, or not this seat's turn); players may legitimately race the
    /// engine, so repeated or out-of-order calls are absorbed silently.
    pub fn play_for_phase(&mut self, seat: SeatIx, phase: Phase) -> Result<bool, AgendaError> {
        self.check_seat(seat)?;
        if !self.turn_guard(seat, phase) {
            return Ok(false);
        }
        debug!(seat, phase = %phase, "seat played");
        self.provider.set_passed(seat, true);
        self.advance_turn_or_phase(seat)?;
        self.post_invalidate();
        Ok(true)
    }

    /// Record that `seat` forfeits its action for `phase` and advance the
    /// turn. Same guard and absorption rules as `play_for_phase`.
    pub fn pass_for_phase(&mut self, seat: SeatIx, phase: Phase) -> Result<bool, AgendaError> {
        self.check_seat(seat)?;
        if !self.turn_guard(seat, phase) {
            return Ok(false);
        }
        debug!(seat, phase = %phase, "seat passed");
        self.provider.set_passed(seat, true);
        self.advance_turn_or_phase(seat)?;
        self.post_invalidate();
        Ok(true)
    }

    /// Advance to the successor phase and reseed the turn order.
    ///
    /// Host-driven for transitions that are not triggered by a final pass
    /// (e.g. leaving `ChooseOutcomeType` once names are fixed).
    pub fn advance_phase(&mut self) -> Result<(), AgendaError> {
        if !self.is_active() {
            return Err(AgendaError::invariant("advance_phase while no round is active"));
        }
        if self.phase == Phase::Finish {
            // The wrap back to Idle ends the round; tear down through
            // clear() so no catalog or seat state survives into the
            // dormant session.
            self.clear();
            return Ok(());
        }
        self.phase = self.phase.successor();
        self.reset_for_phase()?;
        self.post_invalidate();
        Ok(())
    }

    /// Force-set a phase; used only for session recovery and for entering
    /// the out-of-band `Post` phase. Returning to `Idle` goes through
    /// `clear()`, never through here.
    pub fn set_phase(&mut self, phase: Phase) -> Result<(), AgendaError> {
        if !self.is_active() {
            return Err(AgendaError::invariant("set_phase while no round is active"));
        }
        if phase == Phase::Idle {
            return Err(AgendaError::invariant("set_phase(Idle): use clear()"));
        }
        self.phase = phase;
        self.reset_for_phase()?;
        self.post_invalidate();
        Ok(())
    }

    /// `set_phase` by name; fails on anything but the seven phase names.
    pub fn set_phase_by_name(&mut self, name: &str) -> Result<(), AgendaError> {
        self.set_phase(name.parse::<Phase>()?)
    }

    fn turn_guard(&self, seat: SeatIx, phase: Phase) -> bool {
        if !self.is_active() || self.phase != phase {
            debug!(seat, requested = %phase, current = %self.phase, "stale action absorbed");
            return false;
        }
        if self.provider.current_turn() != Some(seat) {
            debug!(seat, "action out of turn absorbed");
            return false;
        }
        true
    }

    /// Whether `seat` enters the current phase already passed, because it
    /// declared its choice before the phase began.
    fn carries_pass(&self, seat: SeatIx) -> bool {
        let st = &self.seats[seat];
        match self.phase {
            Phase::When => st.no_whens,
            Phase::After => st.no_afters,
            Phase::Vote => st.vote_locked,
            _ => false,
        }
    }

    /// Recompute the seat order for the current phase and seed the provider.
    ///
    /// Carry-over passes are applied first; if they cover every seat the
    /// phase is skipped entirely and the loop continues with its successor.
    pub(crate) fn reset_for_phase(&mut self) -> Result<(), AgendaError> {
        loop {
            if !self.phase.has_turn_order() {
                self.current_order.clear();
                self.provider.clear_all_passed();
                return Ok(());
            }

            let speaker = self
                .provider
                .speaker_seat()
                .ok_or(AgendaError::SpeakerNotFound)?;
            let seat_count = self.provider.seat_count();
            let order = match self.phase {
                Phase::When | Phase::After => order::resolve_order(seat_count, speaker),
                Phase::Vote => order::vote_order(seat_count, speaker, &self.board),
                _ => unreachable!("has_turn_order covers exactly these phases"),
            };

            if self.phase == Phase::Vote {
                self.compute_vote_weights();
            }

            self.provider.clear_all_passed();
            for &seat in &order {
                if self.carries_pass(seat) {
                    self.provider.set_passed(seat, true);
                }
            }

            if order.iter().all(|&s| self.provider.is_passed(s)) {
                info!(phase = %self.phase, "phase skipped, every seat pre-passed");
                self.phase = self.phase.successor();
                continue;
            }

            self.provider.set_turn_order(&order);
            let first = order
                .iter()
                .copied()
                .find(|&s| !self.provider.is_passed(s))
                .ok_or_else(|| {
                    // Contradiction with the all-passed check above.
                    AgendaError::invariant("turn order not exhausted but no candidate seat found")
                })?;
            self.provider.set_current_turn(first);
            info!(phase = %self.phase, first_turn = first, "phase order seeded");
            self.current_order = order;
            return Ok(());
        }
    }

    /// Hand the turn to the next unpassed seat, or advance the phase when
    /// the order is exhausted.
    fn advance_turn_or_phase(&mut self, from: SeatIx) -> Result<(), AgendaError> {
        if self.provider.is_turn_order_empty() {
            self.phase = self.phase.successor();
            return self.reset_for_phase();
        }

        let pos = self
            .current_order
            .iter()
            .position(|&s| s == from)
            .ok_or_else(|| {
                AgendaError::invariant(format!("acting seat {from} missing from current order"))
            })?;
        let n = self.current_order.len();
        let next = (1..n)
            .map(|k| self.current_order[(pos + k) % n])
            .find(|&s| !self.provider.is_passed(s))
            .ok_or_else(|| {
                // is_turn_order_empty said someone is left.
                AgendaError::invariant("turn order not exhausted but no candidate seat found")
            })?;
        self.provider.set_current_turn(next);
        debug!(from, next, phase = %self.phase, "turn advanced");
        Ok(())
    }
}
