//! Collaborator contracts the session is driven against.
//!
//! These are in-process seams, not wire formats. The host wires its own
//! board, seating, and turn widgets behind these traits; the session never
//! reaches past them.

use crate::seat::SeatIx;

/// A resource-bearing card or token on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Controlling seat; an uncontrolled asset contributes to nobody.
    pub owner: Option<SeatIx>,
    /// Primary value counted toward vote weight.
    pub value: u32,
    /// Secondary value, counted only for seats holding the hero-equivalent.
    pub secondary_value: u32,
    /// Face-down assets are not counted.
    pub face_up: bool,
}

/// Seat and turn-order state owned by the host's turn widget.
///
/// The session is the only writer during an active round: it seeds the order
/// on each phase entry and records passes; the host may read freely.
pub trait TurnOrderProvider {
    /// Number of seats at the table, fixed for the session.
    fn seat_count(&self) -> usize;

    /// Seat whose turn is active, if any.
    fn current_turn(&self) -> Option<SeatIx>;

    /// Replace the active ordered seat sequence. Clears nothing else.
    fn set_turn_order(&mut self, order: &[SeatIx]);

    /// Force the active turn onto `seat`.
    fn set_current_turn(&mut self, seat: SeatIx);

    fn set_passed(&mut self, seat: SeatIx, passed: bool);

    fn is_passed(&self, seat: SeatIx) -> bool;

    /// True when every seat in the active order has passed.
    fn is_turn_order_empty(&self) -> bool;

    fn clear_all_passed(&mut self);

    /// The designated speaker seat anchoring both orderings. `None` is
    /// treated as fatal at every use site.
    fn speaker_seat(&self) -> Option<SeatIx>;
}

/// Spatial/board state consumed read-only for derived values.
pub trait BoardQuery {
    /// Every resource-bearing asset currently on the table.
    fn assets(&self) -> Vec<Asset>;

    /// Session-wide flat-vote override: every seat votes with weight 1 and
    /// no other weight rule applies.
    fn flat_vote_override(&self) -> bool;

    /// Seat holds its unlocked commander-equivalent bonus card.
    fn commander_unlocked(&self, seat: SeatIx) -> bool;

    /// Seat additionally holds a second, related unlockable distinct from
    /// the commander card itself.
    fn alliance_present(&self, seat: SeatIx) -> bool;

    /// Seat holds the hero-equivalent card that counts each asset's
    /// secondary value alongside its primary value.
    fn hero_present(&self, seat: SeatIx) -> bool;

    /// A vote-direction-reversal card is face up somewhere on the table.
    fn vote_direction_reversed(&self) -> bool;

    /// Seat carries the votes-first priority attribute.
    fn votes_first(&self, seat: SeatIx) -> bool;
}

/// An externally injected per-seat vote-weight adjustment.
///
/// Modifiers come from third-party extensions and are isolated against
/// faults: a failing modifier is logged and contributes 0 for that seat.
pub type VoteModifier =
    Box<dyn Fn(SeatIx) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> + Send + Sync>;
