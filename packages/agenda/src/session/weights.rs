//! Vote-weight computation.
//!
//! Weight is a derived snapshot taken once when voting opens, not a live
//! recomputation: board changes after the snapshot are ignored, with a
//! single explicit exception for the card-flip input event.

use tracing::{debug, warn};

use super::AgendaSession;
use crate::errors::AgendaError;
use crate::phase::Phase;
use crate::ports::{Asset, BoardQuery, TurnOrderProvider, VoteModifier};

/// Flat weight bonus for a seat holding its unlocked commander-equivalent.
pub const COMMANDER_VOTE_BONUS: u32 = 2;

/// Additional flat bonus when a second, related unlockable distinct from the
/// commander card is also present.
pub const ALLIANCE_VOTE_BONUS: u32 = 2;

impl<P, B> AgendaSession<P, B>
where
    P: TurnOrderProvider,
    B: BoardQuery,
{
    /// Snapshot every seat's available vote weight. Runs once, on entry
    /// into the `Vote` phase.
    pub(crate) fn compute_vote_weights(&mut self) {
        if self.board.flat_vote_override() {
            debug!("flat vote override active, every seat weighs 1");
            for st in &mut self.seats {
                st.available_votes = 1;
            }
            return;
        }

        for st in &mut self.seats {
            st.available_votes = 0;
        }

        for asset in self.board.assets() {
            let Some(owner) = asset.owner else { continue };
            if owner >= self.seats.len() || !asset.face_up {
                continue;
            }
            let add = self.asset_weight(owner, &asset);
            self.seats[owner].available_votes += add;
        }

        for seat in 0..self.seats.len() {
            if self.board.commander_unlocked(seat) {
                self.seats[seat].available_votes += COMMANDER_VOTE_BONUS;
                if self.board.alliance_present(seat) {
                    self.seats[seat].available_votes += ALLIANCE_VOTE_BONUS;
                }
            }
        }

        self.apply_modifiers();

        for (seat, st) in self.seats.iter().enumerate() {
            debug!(seat, weight = st.available_votes, "vote weight snapshotted");
        }
    }

    /// Register an externally supplied per-seat weight adjustment. The
    /// registry is owned by this session and append-only for its lifetime;
    /// each entry runs per seat during the snapshot and is isolated against
    /// faults.
    pub fn inject_vote_modifier(&mut self, modifier: VoteModifier) {
        self.modifiers.push(modifier);
    }

    /// The one live adjustment path: a resource card flipping face-up or
    /// face-down during `Vote` moves exactly its owner's snapshot by the
    /// card's weight. Ignored outside `Vote` and for vote-locked seats.
    pub fn apply_card_flip(&mut self, card: &Asset, face_up: bool) -> Result<bool, AgendaError> {
        let Some(owner) = card.owner else {
            return Ok(false);
        };
        self.check_seat(owner)?;
        if self.phase != Phase::Vote {
            debug!(owner, "card flip ignored outside the vote phase");
            return Ok(false);
        }
        if self.seats[owner].vote_locked {
            debug!(owner, "card flip ignored, vote is locked");
            return Ok(false);
        }

        let delta = self.asset_weight(owner, card);
        let st = &mut self.seats[owner];
        st.available_votes = if face_up {
            st.available_votes.saturating_add(delta)
        } else {
            st.available_votes.saturating_sub(delta)
        };
        debug!(owner, delta, face_up, weight = st.available_votes, "card flip applied");
        self.post_invalidate();
        Ok(true)
    }

    /// Weight a single asset contributes to `seat`: its primary value, plus
    /// its secondary value when the seat holds the hero-equivalent.
    fn asset_weight(&self, seat: usize, asset: &Asset) -> u32 {
        let mut weight = asset.value;
        if self.board.hero_present(seat) {
            weight += asset.secondary_value;
        }
        weight
    }

    fn apply_modifiers(&mut self) {
        for (index, modifier) in self.modifiers.iter().enumerate() {
            for (seat, st) in self.seats.iter_mut().enumerate() {
                match modifier(seat) {
                    Ok(delta) => {
                        let adjusted = (i64::from(st.available_votes) + delta)
                            .clamp(0, i64::from(u32::MAX));
                        st.available_votes = adjusted as u32;
                    }
                    Err(error) => {
                        // Third-party extension fault: neutral delta, keep going.
                        warn!(index, seat, %error, "vote modifier failed, contributing 0");
                    }
                }
            }
        }
    }
}
