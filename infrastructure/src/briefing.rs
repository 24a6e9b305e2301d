//! Briefing providers
//!
//! Adapters for the [`BriefingProvider`] port. Briefings are loaded
//! once, outside the deliberation core; the core only ever reads them
//! through the port and never refreshes or mutates them.

use plenum_application::BriefingProvider;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors loading a briefing file
#[derive(Error, Debug)]
pub enum BriefingFileError {
    #[error("could not read briefing file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse briefing file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Immutable in-memory briefing map.
#[derive(Debug, Clone, Default)]
pub struct StaticBriefingProvider {
    briefings: BTreeMap<String, String>,
}

impl StaticBriefingProvider {
    pub fn new(briefings: BTreeMap<String, String>) -> Self {
        Self { briefings }
    }

    pub fn is_empty(&self) -> bool {
        self.briefings.is_empty()
    }
}

impl BriefingProvider for StaticBriefingProvider {
    fn briefing_for(&self, participant: &str) -> Option<String> {
        self.briefings.get(participant).cloned()
    }
}

impl FromIterator<(String, String)> for StaticBriefingProvider {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Deserialize)]
struct BriefingFile {
    #[serde(default)]
    briefings: BTreeMap<String, String>,
}

/// Briefings loaded from a TOML file with a `[briefings]` table mapping
/// participant name to briefing text.
#[derive(Debug, Clone)]
pub struct FileBriefingProvider {
    inner: StaticBriefingProvider,
}

impl FileBriefingProvider {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BriefingFileError> {
        let text = std::fs::read_to_string(path)?;
        let file: BriefingFile = toml::from_str(&text)?;
        Ok(Self {
            inner: StaticBriefingProvider::new(file.briefings),
        })
    }
}

impl BriefingProvider for FileBriefingProvider {
    fn briefing_for(&self, participant: &str) -> Option<String> {
        self.inner.briefing_for(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_static_provider_lookup() {
        let provider: StaticBriefingProvider = [(
            "Aland".to_string(),
            "Grain imports cover a third of demand.".to_string(),
        )]
        .into_iter()
        .collect();

        assert_eq!(
            provider.briefing_for("Aland").as_deref(),
            Some("Grain imports cover a third of demand.")
        );
        assert!(provider.briefing_for("Borduria").is_none());
    }

    #[test]
    fn test_file_provider_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("briefings.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[briefings]\nAland = \"Grain imports cover a third of demand.\"\nBorduria = \"A border dispute is simmering.\""
        )
        .unwrap();

        let provider = FileBriefingProvider::from_path(&path).unwrap();
        assert_eq!(
            provider.briefing_for("Borduria").as_deref(),
            Some("A border dispute is simmering.")
        );
        assert!(provider.briefing_for("Cadia").is_none());
    }

    #[test]
    fn test_missing_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "# no briefings here\n").unwrap();

        let provider = FileBriefingProvider::from_path(&path).unwrap();
        assert!(provider.briefing_for("Aland").is_none());
    }

    #[test]
    fn test_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[briefings\nAland = oops").unwrap();

        assert!(matches!(
            FileBriefingProvider::from_path(&path),
            Err(BriefingFileError::Parse(_))
        ));
    }
}
