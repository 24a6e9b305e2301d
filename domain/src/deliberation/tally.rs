//! Vote aggregation
//!
//! Counts ballots into a deterministic outcome: adopted only when yes
//! votes strictly outnumber no votes. Ties and an all-abstain vote both
//! resolve to rejection.

use super::ballot::{Ballot, BallotChoice};
use serde::{Deserialize, Serialize};

/// Result of the final tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Adopted,
    Rejected,
}

impl Outcome {
    pub fn is_adopted(&self) -> bool {
        matches!(self, Outcome::Adopted)
    }

    /// The announcement sentence recorded in the log and shown to
    /// callers.
    pub fn announcement(&self) -> &'static str {
        match self {
            Outcome::Adopted => "The policy is adopted.",
            Outcome::Rejected => "The policy is not adopted.",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Adopted => write!(f, "Adopted"),
            Outcome::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Aggregated ballot counts and the derived outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub yes: usize,
    pub no: usize,
    pub abstain: usize,
    pub outcome: Outcome,
}

impl VoteTally {
    /// Count the ballots. Adopted iff `yes > no`; everything else,
    /// including an exact tie and a unanimous abstention, is rejected.
    pub fn tally(ballots: &[Ballot]) -> Self {
        let mut yes = 0;
        let mut no = 0;
        let mut abstain = 0;

        for ballot in ballots {
            match ballot.choice {
                BallotChoice::Yes => yes += 1,
                BallotChoice::No => no += 1,
                BallotChoice::Abstain => abstain += 1,
            }
        }

        let outcome = if yes > no {
            Outcome::Adopted
        } else {
            Outcome::Rejected
        };

        Self {
            yes,
            no,
            abstain,
            outcome,
        }
    }

    pub fn count(&self, choice: BallotChoice) -> usize {
        match choice {
            BallotChoice::Yes => self.yes,
            BallotChoice::No => self.no,
            BallotChoice::Abstain => self.abstain,
        }
    }

    pub fn total(&self) -> usize {
        self.yes + self.no + self.abstain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballots(choices: &[(&str, BallotChoice)]) -> Vec<Ballot> {
        choices
            .iter()
            .map(|(name, choice)| Ballot::new(*name, *choice))
            .collect()
    }

    #[test]
    fn test_majority_adopts() {
        let tally = VoteTally::tally(&ballots(&[
            ("A", BallotChoice::Yes),
            ("B", BallotChoice::No),
            ("C", BallotChoice::Yes),
        ]));
        assert_eq!(tally.yes, 2);
        assert_eq!(tally.no, 1);
        assert_eq!(tally.abstain, 0);
        assert_eq!(tally.outcome, Outcome::Adopted);
    }

    #[test]
    fn test_tie_rejects() {
        let tally = VoteTally::tally(&ballots(&[
            ("A", BallotChoice::Yes),
            ("B", BallotChoice::No),
        ]));
        assert_eq!(tally.outcome, Outcome::Rejected);
    }

    #[test]
    fn test_all_abstain_rejects() {
        let tally = VoteTally::tally(&ballots(&[
            ("A", BallotChoice::Abstain),
            ("B", BallotChoice::Abstain),
        ]));
        assert_eq!(tally.abstain, 2);
        assert_eq!(tally.outcome, Outcome::Rejected);
    }

    #[test]
    fn test_abstentions_do_not_block_adoption() {
        let tally = VoteTally::tally(&ballots(&[
            ("A", BallotChoice::Yes),
            ("B", BallotChoice::Abstain),
            ("C", BallotChoice::Abstain),
        ]));
        assert_eq!(tally.outcome, Outcome::Adopted);
    }

    #[test]
    fn test_empty_ballot_list_rejects() {
        let tally = VoteTally::tally(&[]);
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.outcome, Outcome::Rejected);
    }

    #[test]
    fn test_announcement_text() {
        assert_eq!(Outcome::Adopted.announcement(), "The policy is adopted.");
        assert_eq!(
            Outcome::Rejected.announcement(),
            "The policy is not adopted."
        );
    }
}
