//! Deliberation session entity
//!
//! One [`Deliberation`] owns all mutable state for a single run: the
//! roster, the shared transcript, the run log, and the terminal-round
//! ballots. It is passed explicitly to every operation; there is no
//! process-wide run state anywhere in the system.

use super::ballot::Ballot;
use super::participant::Participant;
use super::run_log::RunLog;
use super::tally::{Outcome, VoteTally};
use super::transcript::Transcript;
use crate::core::error::DomainError;
use crate::core::policy::Policy;

/// Transcript label and log name used for chairperson turns.
pub const CHAIRPERSON: &str = "Chairperson";

/// Toggles selecting which variant of the state machine a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliberationSettings {
    /// Number of rounds, including the terminal voting round.
    pub total_rounds: u32,
    /// Cap on speakers in chairperson-gated discussion rounds.
    pub speaker_cap: Option<usize>,
    /// Whether a chairperson gates the floor in discussion rounds.
    pub has_chairperson: bool,
    /// Whether `Abstain` is a recognized ballot label. Also selects the
    /// coercion default for unrecognized votes (`Abstain` on, `No` off).
    pub allow_abstain: bool,
}

impl Default for DeliberationSettings {
    fn default() -> Self {
        Self {
            total_rounds: 5,
            speaker_cap: None,
            has_chairperson: true,
            allow_abstain: true,
        }
    }
}

/// All state for one run (Entity)
///
/// Exclusively owned by the orchestrator for the run's lifetime. The
/// mutation surface is append-only: turns, reflections, and ballots can
/// be added but never removed or rewritten.
#[derive(Debug, Clone)]
pub struct Deliberation {
    policy: Policy,
    participants: Vec<Participant>,
    settings: DeliberationSettings,
    transcript: Transcript,
    log: RunLog,
    ballots: Vec<Ballot>,
    tally: Option<VoteTally>,
}

impl Deliberation {
    pub fn new(
        policy: Policy,
        participants: Vec<Participant>,
        settings: DeliberationSettings,
    ) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        if settings.total_rounds < 1 {
            return Err(DomainError::NoRounds);
        }

        Ok(Self {
            policy,
            participants,
            settings,
            transcript: Transcript::new(),
            log: RunLog::new(),
            ballots: Vec::new(),
            tally: None,
        })
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn settings(&self) -> DeliberationSettings {
        self.settings
    }

    pub fn total_rounds(&self) -> u32 {
        self.settings.total_rounds
    }

    pub fn is_terminal_round(&self, round: u32) -> bool {
        round == self.settings.total_rounds
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name() == name)
    }

    /// Participant names in roster order.
    pub fn roster(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Append a public message to the shared transcript.
    pub fn append_message(&mut self, speaker: impl Into<String>, text: impl Into<String>) {
        self.transcript.append(speaker, text);
    }

    /// Append a private reflection to the named participant's memory.
    /// Returns false if no such participant exists.
    pub fn record_reflection(&mut self, name: &str, reflection: impl Into<String>) -> bool {
        match self.participants.iter_mut().find(|p| p.name() == name) {
            Some(participant) => {
                participant.record_reflection(reflection);
                true
            }
            None => false,
        }
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut RunLog {
        &mut self.log
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn record_ballot(&mut self, ballot: Ballot) {
        self.ballots.push(ballot);
    }

    /// Finalize the outcome. The tally is immutable once set.
    pub fn set_tally(&mut self, tally: VoteTally) {
        if self.tally.is_none() {
            self.tally = Some(tally);
        }
    }

    pub fn tally(&self) -> Option<&VoteTally> {
        self.tally.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.tally.as_ref().map(|t| t.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::ballot::BallotChoice;

    fn session() -> Deliberation {
        Deliberation::new(
            Policy::new("Adopt the accord"),
            vec![Participant::new("Aland"), Participant::new("Borduria")],
            DeliberationSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_requires_participants() {
        let err = Deliberation::new(
            Policy::new("Adopt the accord"),
            vec![],
            DeliberationSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::NoParticipants);
    }

    #[test]
    fn test_requires_rounds() {
        let err = Deliberation::new(
            Policy::new("Adopt the accord"),
            vec![Participant::new("Aland")],
            DeliberationSettings {
                total_rounds: 0,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, DomainError::NoRounds);
    }

    #[test]
    fn test_roster_order() {
        let d = session();
        assert_eq!(d.roster(), vec!["Aland".to_string(), "Borduria".to_string()]);
    }

    #[test]
    fn test_record_reflection() {
        let mut d = session();
        assert!(d.record_reflection("Aland", "They are stalling."));
        assert!(!d.record_reflection("Zembla", "No such delegate."));
        assert_eq!(d.participant("Aland").unwrap().memory().len(), 1);
    }

    #[test]
    fn test_terminal_round() {
        let d = session();
        assert!(d.is_terminal_round(5));
        assert!(!d.is_terminal_round(4));
    }

    #[test]
    fn test_tally_set_once() {
        let mut d = session();
        let first = VoteTally::tally(&[Ballot::new("Aland", BallotChoice::Yes)]);
        let second = VoteTally::tally(&[Ballot::new("Aland", BallotChoice::No)]);
        d.set_tally(first.clone());
        d.set_tally(second);
        assert_eq!(d.tally(), Some(&first));
        assert_eq!(d.outcome(), Some(Outcome::Adopted));
    }
}
