//! Seat indexing and wrap-around seat math.
//!
//! These helpers are the single source of truth for rotation math so every
//! layer (orders, session, tests) agrees on "who sits next".
//!
//! Clockwise direction is positive (+1).
//! Counter-clockwise direction is negative (-1).

/// Stable index of a participant slot, `0..seat_count`, fixed for the
/// session. Seats are owned by the host; this subsystem only indexes into
/// the externally supplied ordered seat list.
pub type SeatIx = usize;

/// Returns the seat `delta` steps from `seat`, wrapping around the table.
#[inline]
pub fn seat_offset(seat: SeatIx, delta: isize, seat_count: usize) -> SeatIx {
    debug_assert!(seat_count > 0, "seat_offset requires a non-empty table");
    let n = seat_count as isize;
    (seat as isize + delta).rem_euclid(n) as SeatIx
}

/// Returns the next seat clockwise.
#[inline]
pub fn next_seat(seat: SeatIx, seat_count: usize) -> SeatIx {
    seat_offset(seat, 1, seat_count)
}

/// Returns the previous seat counter-clockwise.
#[inline]
pub fn prev_seat(seat: SeatIx, seat_count: usize) -> SeatIx {
    seat_offset(seat, -1, seat_count)
}
