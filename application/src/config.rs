//! Run configuration
//!
//! The boundary input describing one deliberation: the roster, the
//! policy text, the round count, and the state-machine toggles. A
//! single orchestrator configured here replaces what would otherwise be
//! parallel with/without-chairperson program variants.

use plenum_domain::DeliberationSettings;
use serde::{Deserialize, Serialize};

/// One participant to seat at the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantSpec {
    pub name: String,
    /// Optional persona override replacing the default delegate framing.
    #[serde(default)]
    pub persona: Option<String>,
}

impl ParticipantSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            persona: None,
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }
}

/// Configuration for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// The policy text put before the assembly.
    pub policy: String,
    /// The roster, in seating order.
    pub participants: Vec<ParticipantSpec>,
    /// Number of rounds including the terminal voting round.
    pub total_rounds: u32,
    /// Cap on speakers in chairperson-gated discussion rounds.
    #[serde(default)]
    pub speaker_cap: Option<usize>,
    /// Whether a chairperson gates the floor in discussion rounds.
    #[serde(default = "default_true")]
    pub has_chairperson: bool,
    /// Whether `Abstain` is a recognized ballot label.
    #[serde(default = "default_true")]
    pub allow_abstain: bool,
}

fn default_true() -> bool {
    true
}

impl RunConfig {
    pub fn new(policy: impl Into<String>, participants: Vec<ParticipantSpec>) -> Self {
        Self {
            policy: policy.into(),
            participants,
            total_rounds: 5,
            speaker_cap: None,
            has_chairperson: true,
            allow_abstain: true,
        }
    }

    /// Convenience constructor from bare names.
    pub fn from_names<I, S>(policy: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            policy,
            names.into_iter().map(|n| ParticipantSpec::new(n)).collect(),
        )
    }

    pub fn with_rounds(mut self, total_rounds: u32) -> Self {
        self.total_rounds = total_rounds;
        self
    }

    pub fn with_speaker_cap(mut self, cap: usize) -> Self {
        self.speaker_cap = Some(cap);
        self
    }

    pub fn without_chairperson(mut self) -> Self {
        self.has_chairperson = false;
        self
    }

    pub fn without_abstain(mut self) -> Self {
        self.allow_abstain = false;
        self
    }

    /// The domain-level toggles this configuration selects.
    pub fn settings(&self) -> DeliberationSettings {
        DeliberationSettings {
            total_rounds: self.total_rounds,
            speaker_cap: self.speaker_cap,
            has_chairperson: self.has_chairperson,
            allow_abstain: self.allow_abstain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::from_names("Adopt the accord", ["Aland", "Borduria"]);
        assert_eq!(config.total_rounds, 5);
        assert!(config.has_chairperson);
        assert!(config.allow_abstain);
        assert!(config.speaker_cap.is_none());
    }

    #[test]
    fn test_builders_map_to_settings() {
        let config = RunConfig::from_names("Adopt the accord", ["Aland"])
            .with_rounds(3)
            .with_speaker_cap(2)
            .without_chairperson()
            .without_abstain();

        let settings = config.settings();
        assert_eq!(settings.total_rounds, 3);
        assert_eq!(settings.speaker_cap, Some(2));
        assert!(!settings.has_chairperson);
        assert!(!settings.allow_abstain);
    }
}
