//! Voting outcomes.

use serde::{Deserialize, Serialize};

/// Stable index into the outcome catalog, `0..catalog_len`, fixed once
/// voting begins.
pub type OutcomeIx = usize;

/// A named voting option. The name is mutable only while the session is in
/// `ChooseOutcomeType`; the catalog size never changes after `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
}

impl Outcome {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
