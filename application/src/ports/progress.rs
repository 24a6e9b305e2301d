//! Progress notification port
//!
//! Callbacks for live display of a running deliberation. Implementations
//! live in the presentation layer (console, UI); the orchestrator only
//! reports, it never waits on the notifier.

use plenum_domain::Phase;

/// Callback for progress updates during a run
pub trait ProgressNotifier: Send + Sync {
    /// Called when a round begins, with its scheduled phases.
    fn on_round_start(&self, round: u32, phases: &[Phase]);

    /// Called after each turn. `success` is false when the oracle
    /// yielded no usable fields for the turn.
    fn on_turn_complete(&self, round: u32, speaker: &str, success: bool);

    /// Called when a round has fully completed.
    fn on_round_complete(&self, round: u32);
}

/// No-op notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: u32, _phases: &[Phase]) {}
    fn on_turn_complete(&self, _round: u32, _speaker: &str, _success: bool) {}
    fn on_round_complete(&self, _round: u32) {}
}
