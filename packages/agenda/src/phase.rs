//! Agenda resolution phases.
//!
//! A closed enum with a statically defined successor table. Exhaustive
//! matching replaces the runtime table lookup the UI layer would otherwise
//! need to guard.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AgendaError;

/// One named step of agenda resolution.
///
/// The default chain is a single cycle:
/// `Idle → ChooseOutcomeType → When → After → Vote → Finish → Idle`.
/// `Post` sits off the chain and is entered only by explicit `set_phase`;
/// advancing from it lands on `Finish`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No agenda is active.
    Idle,
    /// Outcome names are being fixed; the only phase in which they mutate.
    ChooseOutcomeType,
    /// First reaction window.
    When,
    /// Second reaction window.
    After,
    /// Weighted voting.
    Vote,
    /// Auxiliary post-vote window, handled out of band by players.
    Post,
    /// Round resolved.
    Finish,
}

impl Phase {
    /// All seven phases, in default-chain order with `Post` last.
    pub const ALL: [Phase; 7] = [
        Phase::Idle,
        Phase::ChooseOutcomeType,
        Phase::When,
        Phase::After,
        Phase::Vote,
        Phase::Finish,
        Phase::Post,
    ];

    /// The statically defined successor on `advance()`.
    pub fn successor(self) -> Phase {
        match self {
            Phase::Idle => Phase::ChooseOutcomeType,
            Phase::ChooseOutcomeType => Phase::When,
            Phase::When => Phase::After,
            Phase::After => Phase::Vote,
            Phase::Vote => Phase::Finish,
            Phase::Post => Phase::Finish,
            Phase::Finish => Phase::Idle,
        }
    }

    /// Stable phase name, also accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::ChooseOutcomeType => "ChooseOutcomeType",
            Phase::When => "When",
            Phase::After => "After",
            Phase::Vote => "Vote",
            Phase::Post => "Post",
            Phase::Finish => "Finish",
        }
    }

    /// Key of the main UI panel shown during this phase.
    pub fn main_panel(self) -> &'static str {
        match self {
            Phase::Idle => "panel.idle",
            Phase::ChooseOutcomeType => "panel.choose-outcome",
            Phase::When => "panel.when",
            Phase::After => "panel.after",
            Phase::Vote => "panel.vote",
            Phase::Post => "panel.post",
            Phase::Finish => "panel.finish",
        }
    }

    /// Key of the per-seat UI panel, present only for the four phases in
    /// which individual seats act; all four share one panel identity.
    pub fn seat_panel(self) -> Option<&'static str> {
        match self {
            Phase::When | Phase::After | Phase::Vote | Phase::Post => Some("panel.seat-action"),
            Phase::Idle | Phase::ChooseOutcomeType | Phase::Finish => None,
        }
    }

    /// Whether seats take ordered turns in this phase.
    pub fn has_turn_order(self) -> bool {
        matches!(self, Phase::When | Phase::After | Phase::Vote)
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Idle" => Ok(Phase::Idle),
            "ChooseOutcomeType" => Ok(Phase::ChooseOutcomeType),
            "When" => Ok(Phase::When),
            "After" => Ok(Phase::After),
            "Vote" => Ok(Phase::Vote),
            "Post" => Ok(Phase::Post),
            "Finish" => Ok(Phase::Finish),
            other => Err(AgendaError::UnknownPhase(other.to_string())),
        }
    }
}
