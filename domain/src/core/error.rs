//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are the only conditions the deliberation core treats as fatal.
/// Everything recoverable (an unparseable vote, an invalid speaker
/// ranking, an empty oracle response) is absorbed with a deterministic
/// fallback at the site where it occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("round {round} is outside the valid range 1..={total_rounds}")]
    RoundOutOfRange { round: u32, total_rounds: u32 },

    #[error("a deliberation requires at least one participant")]
    NoParticipants,

    #[error("a deliberation requires at least one round")]
    NoRounds,
}
