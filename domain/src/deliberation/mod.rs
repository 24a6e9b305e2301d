//! Deliberation entities and round mechanics
//!
//! Everything that makes up one run: the roster, the shared transcript,
//! phase definitions and scheduling, speaker-order validation, ballots,
//! and the markdown run log.

pub mod ballot;
pub mod participant;
pub mod phase;
pub mod ranking;
pub mod report;
pub mod run_log;
pub mod schedule;
pub mod session;
pub mod tally;
pub mod transcript;
