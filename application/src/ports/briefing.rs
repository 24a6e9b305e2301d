//! Briefing provider port
//!
//! Supplies the optional static background text attached to a
//! participant at creation. The provider is injected and immutable for
//! the run; the orchestrator never owns or refreshes its contents.

/// Source of per-participant briefing text.
pub trait BriefingProvider: Send + Sync {
    /// Briefing text for the named participant, if any.
    fn briefing_for(&self, participant: &str) -> Option<String>;
}

/// Provider with no briefings, for runs that do not use them.
pub struct NoBriefings;

impl BriefingProvider for NoBriefings {
    fn briefing_for(&self, _participant: &str) -> Option<String> {
        None
    }
}
