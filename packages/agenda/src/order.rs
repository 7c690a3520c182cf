//! Turn-order derivation.
//!
//! Two orderings, both anchored on the speaker seat. Stateless per call;
//! they read collaborator state at call time and never cache.

use crate::ports::BoardQuery;
use crate::seat::{seat_offset, SeatIx};

/// Order for the reaction windows: speaker first, then clockwise.
///
/// `[s, s+1, ..., s+N-1] mod N` for speaker `s`.
pub fn resolve_order(seat_count: usize, speaker: SeatIx) -> Vec<SeatIx> {
    (0..seat_count)
        .map(|k| seat_offset(speaker, k as isize, seat_count))
        .collect()
}

/// Order for voting: starts after the speaker and proceeds clockwise, so the
/// speaker votes last. A reversal card on the table flips the direction to
/// counter-clockwise (at most one flip per computation, however many copies
/// are out). Seats carrying the votes-first priority attribute are then
/// stably moved to the front.
pub fn vote_order<B: BoardQuery + ?Sized>(
    seat_count: usize,
    speaker: SeatIx,
    board: &B,
) -> Vec<SeatIx> {
    let step: isize = if board.vote_direction_reversed() { -1 } else { 1 };
    let base = (1..=seat_count).map(|k| seat_offset(speaker, step * k as isize, seat_count));

    // Stable partition: priority seats keep their relative order, as does
    // everyone else.
    let (mut order, rest): (Vec<SeatIx>, Vec<SeatIx>) = base.partition(|&s| board.votes_first(s));
    order.extend(rest);
    order
}
