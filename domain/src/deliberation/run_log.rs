//! The exportable run log
//!
//! A human-readable markdown record of the whole deliberation: one
//! section per round, one block per turn, and a final voting-results
//! block. Write-only during the run; exportable at any time and empty
//! before the first round begins.

use super::tally::VoteTally;

/// Accumulated markdown record of a run.
///
/// Append-only: past entries are never rewritten. The header naming the
/// participants is written lazily when the first round begins, so an
/// untouched log exports as the empty string.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    text: String,
    started: bool,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the log header once. Subsequent calls are no-ops.
    pub fn begin_run(&mut self, participants: &[String]) {
        if self.started {
            return;
        }
        self.started = true;

        self.text.push_str("# Deliberation Log\n\n## Participants\n\n");
        for name in participants {
            self.text.push_str(&format!("- {name}\n"));
        }
    }

    /// Open a round section.
    pub fn begin_round(&mut self, round: u32, voting: bool) {
        if voting {
            self.text.push_str(&format!("\n\n## Round {round} (Voting)\n"));
        } else {
            self.text.push_str(&format!("\n\n## Round {round}\n"));
        }
    }

    /// Record one turn: the speaker and every structured field it
    /// produced, in solicitation order.
    pub fn record_turn(&mut self, speaker: &str, fields: &[(String, String)]) {
        self.text.push_str(&format!("\n### {speaker}\n\n"));
        for (name, value) in fields {
            self.text
                .push_str(&format!("**{}**: {}\n\n", field_label(name), value));
        }
    }

    /// Record the final tally block. Called once, after the terminal
    /// round.
    pub fn record_tally(&mut self, tally: &VoteTally) {
        self.text.push_str("\n## Voting Results\n\n");
        self.text.push_str(&format!("Yes votes: {}\n", tally.yes));
        self.text.push_str(&format!("No votes: {}\n", tally.no));
        self.text
            .push_str(&format!("Abstentions: {}\n", tally.abstain));
        self.text
            .push_str(&format!("\n**Outcome**: {}\n", tally.outcome.announcement()));
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The full log as accumulated so far.
    pub fn export(&self) -> &str {
        &self.text
    }
}

/// `vote_plan` -> `Vote Plan`
fn field_label(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
