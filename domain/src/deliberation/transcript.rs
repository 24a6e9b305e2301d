//! The shared conversation transcript
//!
//! Append-only for the lifetime of a run. Every oracle call for a
//! participant turn receives the rendered transcript as shared context,
//! so a turn always observes exactly the turns that completed before it.

use serde::{Deserialize, Serialize};

/// Context text shown while nothing has been said yet.
pub const EMPTY_TRANSCRIPT: &str = "Nothing has been said yet. Start the conversation. You \
                                    don't know anything about the other delegations yet, and \
                                    vice versa.";

/// One public turn: who spoke, and what they said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: String,
    pub text: String,
}

/// The single shared, append-only conversation history.
///
/// Turns are never edited, reordered, or pruned. The rendered form is
/// passed verbatim to every subsequent oracle call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a public turn. This is the only mutation the transcript
    /// supports.
    pub fn append(&mut self, speaker: impl Into<String>, text: impl Into<String>) {
        self.turns.push(Turn {
            speaker: speaker.into(),
            text: text.into(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the transcript as the delimited block given to the oracle.
    ///
    /// An empty transcript renders as the fixed seed text instead, so
    /// first-round participants know the floor is open.
    pub fn render(&self) -> String {
        if self.turns.is_empty() {
            return EMPTY_TRANSCRIPT.to_string();
        }

        let body = self
            .turns
            .iter()
            .map(|t| format!("{}: {}", t.speaker, t.text))
            .collect::<Vec<_>>()
            .join("\n");

        format!("START OF CONVERSATION SO FAR.\n{body}\nEND OF CONVERSATION SO FAR.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_seed_text() {
        let transcript = Transcript::new();
        assert_eq!(transcript.render(), EMPTY_TRANSCRIPT);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append("Aland", "We welcome the proposal.");
        transcript.append("Borduria", "We have reservations.");
        transcript.append("Aland", "Noted.");

        let speakers: Vec<&str> = transcript.turns().iter().map(|t| t.speaker.as_str()).collect();
        assert_eq!(speakers, vec!["Aland", "Borduria", "Aland"]);
    }

    #[test]
    fn test_render_delimits_conversation() {
        let mut transcript = Transcript::new();
        transcript.append("Aland", "We welcome the proposal.");
        transcript.append("Borduria", "We have reservations.");

        let rendered = transcript.render();
        assert!(rendered.starts_with("START OF CONVERSATION SO FAR.\n"));
        assert!(rendered.ends_with("\nEND OF CONVERSATION SO FAR."));
        assert!(rendered.contains("Aland: We welcome the proposal.\nBorduria: We have reservations."));
    }

    #[test]
    fn test_render_reflects_only_prior_turns() {
        let mut transcript = Transcript::new();
        transcript.append("Aland", "First.");
        let before = transcript.render();
        transcript.append("Borduria", "Second.");

        assert!(!before.contains("Second."));
        assert!(transcript.render().contains("Second."));
    }
}
