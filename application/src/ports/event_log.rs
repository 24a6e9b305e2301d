//! Structured event log port
//!
//! Machine-readable record of everything that happens in a run: turns,
//! floor requests, rankings, and the final tally. This is separate from
//! `tracing` diagnostics and from the human-readable markdown run log.
//! It captures replayable data, one record per event.

use serde_json::Value;

/// A structured run event.
pub struct RunEvent {
    /// Event kind identifier (e.g. "turn", "floor_request", "tally").
    pub kind: &'static str,
    /// JSON payload with event-specific fields.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(kind: &'static str, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Sink for structured run events.
///
/// Recording is synchronous and infallible by contract: a sink that
/// cannot write must swallow the failure rather than disturb the run.
pub trait EventLog: Send + Sync {
    /// Record one event.
    fn record(&self, event: RunEvent);
}

/// No-op sink for tests and for runs without an event log.
pub struct NoEventLog;

impl EventLog for NoEventLog {
    fn record(&self, _event: RunEvent) {}
}
