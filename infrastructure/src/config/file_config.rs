//! File-backed configuration schema
//!
//! Everything a `plenum.toml` can carry: the run definition, gateway
//! settings, and output paths. All fields have serde defaults so a
//! partial file merges cleanly over the built-in defaults.

use plenum_application::{ParticipantSpec, RunConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub run: RunSection,
    pub gateway: GatewaySection,
    pub participants: Vec<ParticipantEntry>,
    pub output: OutputSection,
}

impl FileConfig {
    /// Assemble the application-level run configuration. CLI overrides
    /// are applied by the caller after this.
    pub fn run_config(&self) -> RunConfig {
        let participants = self
            .participants
            .iter()
            .map(|entry| {
                let mut spec = ParticipantSpec::new(entry.name.as_str());
                if let Some(persona) = &entry.persona {
                    spec = spec.with_persona(persona.as_str());
                }
                spec
            })
            .collect();

        RunConfig {
            policy: self.run.policy.clone(),
            participants,
            total_rounds: self.run.rounds,
            speaker_cap: self.run.speaker_cap,
            has_chairperson: self.run.chairperson,
            allow_abstain: self.run.allow_abstain,
        }
    }
}

/// `[run]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSection {
    /// Policy text put before the assembly.
    pub policy: String,
    /// Rounds including the terminal voting round.
    pub rounds: u32,
    /// Cap on speakers in chairperson-gated discussion rounds.
    pub speaker_cap: Option<usize>,
    /// Whether a chairperson gates the floor.
    pub chairperson: bool,
    /// Whether `Abstain` is a recognized ballot label.
    pub allow_abstain: bool,
    /// Seed for reproducible speaker shuffles.
    pub seed: Option<u64>,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            policy: String::new(),
            rounds: 5,
            speaker_cap: None,
            chairperson: true,
            allow_abstain: true,
            seed: None,
        }
    }
}

/// `[gateway]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySection {
    /// OpenAI-compatible endpoint base URL.
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub max_attempts: u32,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 1.0,
            max_tokens: 2000,
            max_attempts: 3,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// `[[participants]]` entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantEntry {
    pub name: String,
    #[serde(default)]
    pub persona: Option<String>,
}

/// `[output]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Markdown run log destination.
    pub log_file: Option<PathBuf>,
    /// JSONL event log destination.
    pub event_file: Option<PathBuf>,
    /// Briefing file with a `[briefings]` table.
    pub briefing_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.run.rounds, 5);
        assert!(config.run.chairperson);
        assert!(config.run.allow_abstain);
        assert_eq!(config.gateway.model, "gpt-4o");
        assert_eq!(config.gateway.api_key_env, "OPENAI_API_KEY");
        assert!(config.participants.is_empty());
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [run]
            policy = "Adopt the accord"
            rounds = 3

            [[participants]]
            name = "Aland"

            [[participants]]
            name = "Borduria"
            persona = "a stubborn negotiator."
            "#,
        )
        .unwrap();

        assert_eq!(config.run.rounds, 3);
        assert!(config.run.chairperson);
        assert_eq!(config.participants.len(), 2);

        let run = config.run_config();
        assert_eq!(run.policy, "Adopt the accord");
        assert_eq!(run.total_rounds, 3);
        assert_eq!(
            run.participants[1].persona.as_deref(),
            Some("a stubborn negotiator.")
        );
    }
}
