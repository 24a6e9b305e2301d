//! Domain layer for plenum
//!
//! This crate contains the deliberation state machine and its entities:
//! participants, the shared transcript, round phases and scheduling,
//! speaker-order validation, ballots and tallying, and the exportable
//! run log. It has no dependencies on infrastructure or presentation
//! concerns, performs no I/O, and is fully deterministic.
//!
//! # Core Concepts
//!
//! ## Deliberation
//!
//! A [`Deliberation`] is one bounded run: a fixed roster of participants
//! converses over `total_rounds` rounds and concludes with a vote. The
//! transcript is the only channel through which participants observe one
//! another, so turn order is the run's sole synchronization mechanism.
//!
//! ## Phases
//!
//! Each round maps to an ordered list of [`Phase`]s (introduction,
//! discussion, voting), and each phase defines the structured fields
//! solicited from a participant that round.

pub mod core;
pub mod deliberation;
pub mod prompt;

// Re-export commonly used types
pub use self::core::{error::DomainError, policy::Policy};
pub use deliberation::{
    ballot::{Ballot, BallotChoice},
    participant::Participant,
    phase::{Module, Phase},
    ranking::validate_speaking_order,
    report::{DeliberationResult, RoundReport, TurnRecord},
    run_log::RunLog,
    schedule::phases_for,
    session::{CHAIRPERSON, Deliberation, DeliberationSettings},
    tally::{Outcome, VoteTally},
    transcript::{Transcript, Turn},
};
pub use prompt::PromptTemplate;
