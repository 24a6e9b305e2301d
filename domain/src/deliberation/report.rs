//! Structured run outputs
//!
//! Value objects returned to callers (a CLI, a UI) after each round and
//! at the end of a run. Everything here is serializable so a front end
//! can consume round reports directly.

use super::ballot::Ballot;
use super::phase::Phase;
use super::tally::VoteTally;
use serde::Serialize;

/// One executed turn: the speaker and the structured fields its
/// response yielded, in solicitation order. A turn whose oracle call
/// produced nothing usable has an empty field list.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub speaker: String,
    pub fields: Vec<(String, String)>,
}

impl TurnRecord {
    pub fn new(speaker: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            fields: Vec::new(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Everything that happened in one round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub phases: Vec<Phase>,
    pub turns: Vec<TurnRecord>,
    /// Ballots cast this round; empty except for the terminal round.
    pub ballots: Vec<Ballot>,
    /// Present only on the terminal round.
    pub tally: Option<VoteTally>,
    /// Whether this round concluded the deliberation.
    pub finished: bool,
}

impl RoundReport {
    pub fn new(round: u32, phases: Vec<Phase>) -> Self {
        Self {
            round,
            phases,
            turns: Vec::new(),
            ballots: Vec::new(),
            tally: None,
            finished: false,
        }
    }
}

/// Final result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct DeliberationResult {
    pub rounds: Vec<RoundReport>,
    pub ballots: Vec<Ballot>,
    pub tally: VoteTally,
    /// The exported markdown run log.
    pub log: String,
}
