//! Central error type for the agenda engine.
//!
//! Only broken preconditions surface as errors: a missing speaker, an
//! out-of-range index, an internal contradiction. Stale player input (acting
//! out of turn or in the wrong phase) is absorbed at the guards and reported
//! as a "not applied" result, never as an error.

use thiserror::Error;

use crate::outcome::OutcomeIx;
use crate::seat::SeatIx;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgendaError {
    /// The speaker seat could not be located. Every ordering is anchored on
    /// the speaker, so this is fatal.
    #[error("speaker seat not found")]
    SpeakerNotFound,

    /// A seat index outside the session's seat list.
    #[error("seat index out of range: {0}")]
    SeatOutOfRange(SeatIx),

    /// An outcome index outside the outcome catalog.
    #[error("outcome index out of range: {0}")]
    OutcomeOutOfRange(OutcomeIx),

    /// `set_phase` by name with a name that is not one of the seven phases.
    #[error("unknown phase name: {0}")]
    UnknownPhase(String),

    /// An internal contradiction that indicates a defect, not a runtime
    /// condition. Propagated to the host boundary, never swallowed.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl AgendaError {
    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }
}
