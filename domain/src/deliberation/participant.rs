//! Participant entity

use serde::{Deserialize, Serialize};

/// One party in the deliberation (Entity)
///
/// The name is immutable for the run. The optional persona override and
/// briefing are assigned once at creation and never mutated. Memory is
/// an ordered, append-only list of the participant's private
/// reflections, one entry per round in which a reflection step ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    name: String,
    persona: Option<String>,
    briefing: Option<String>,
    memory: Vec<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            persona: None,
            briefing: None,
            memory: Vec::new(),
        }
    }

    /// Attach a persona override replacing the default delegate framing.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Attach static briefing text supplied by the briefing provider.
    pub fn with_briefing(mut self, briefing: impl Into<String>) -> Self {
        self.briefing = Some(briefing.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn persona(&self) -> Option<&str> {
        self.persona.as_deref()
    }

    pub fn briefing(&self) -> Option<&str> {
        self.briefing.as_deref()
    }

    /// Private reflections recorded so far, in round order.
    pub fn memory(&self) -> &[String] {
        &self.memory
    }

    pub fn has_memory(&self) -> bool {
        !self.memory.is_empty()
    }

    /// Append one private reflection. Entries are never removed.
    pub fn record_reflection(&mut self, reflection: impl Into<String>) {
        self.memory.push(reflection.into());
    }
}
