//! Ballot types
//!
//! Each participant produces exactly one ballot in the terminal round.
//! Raw vote text that does not match a recognized label is coerced to a
//! defined choice so the tally never sees malformed input.

use serde::{Deserialize, Serialize};

/// A participant's terminal-round choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallotChoice {
    Yes,
    No,
    Abstain,
}

impl BallotChoice {
    /// Coerce raw vote text into a defined choice.
    ///
    /// Recognized labels (case-insensitive, surrounding whitespace
    /// ignored): `Yes`, `No`, and `Abstain` when `allow_abstain` is on.
    /// Anything else, including a missing vote field, resolves to the
    /// coercion default: `Abstain` when abstention is allowed, `No`
    /// otherwise. The default scheme is `Abstain`; the `No` coercion is
    /// the legacy behavior kept behind the toggle.
    pub fn from_raw(raw: Option<&str>, allow_abstain: bool) -> Self {
        let normalized = raw.map(str::trim).unwrap_or_default();

        if normalized.eq_ignore_ascii_case("yes") {
            BallotChoice::Yes
        } else if normalized.eq_ignore_ascii_case("no") {
            BallotChoice::No
        } else if allow_abstain && normalized.eq_ignore_ascii_case("abstain") {
            BallotChoice::Abstain
        } else if allow_abstain {
            BallotChoice::Abstain
        } else {
            BallotChoice::No
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BallotChoice::Yes => "Yes",
            BallotChoice::No => "No",
            BallotChoice::Abstain => "Abstain",
        }
    }
}

impl std::fmt::Display for BallotChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One cast ballot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub participant: String,
    pub choice: BallotChoice,
}

impl Ballot {
    pub fn new(participant: impl Into<String>, choice: BallotChoice) -> Self {
        Self {
            participant: participant.into(),
            choice,
        }
    }
}
