//! Round phases and their structured modules
//!
//! A phase determines which named fields are solicited from a
//! participant in a given round, and which of those fields become
//! public. `message` is the only field ever appended to the shared
//! transcript; `reflection` is the only field appended to a
//! participant's private memory. Everything else is recorded in the run
//! log and never replayed into shared context.

use serde::{Deserialize, Serialize};

/// One named instruction step within a phase.
///
/// The participant is asked to answer every module of the phase in a
/// single structured response keyed by the module names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    /// Response key this module's answer is filed under.
    pub name: &'static str,
    /// Instruction text presented to the participant.
    pub instruction: &'static str,
}

/// Introduction step, first round only.
pub const INTRODUCTION: Module = Module {
    name: "introduction",
    instruction: "Since the meeting has just started, briefly introduce your delegation's \
                  position and any initial thoughts on the proposed policy. Be strategic in \
                  presenting your delegation's perspective.",
};

/// Private reflection step for discussion rounds.
pub const REFLECTION: Module = Module {
    name: "reflection",
    instruction: "Reflect on the proposed policy by considering the following:\n\
                  1] What are the potential benefits and drawbacks of the policy for your delegation?\n\
                  2] How does this policy align with your delegation's interests and values?\n\
                  3] What are your main concerns or points of support?",
};

/// Private planning step for discussion rounds.
pub const PLAN: Module = Module {
    name: "plan",
    instruction: "Based on your reflection, outline a plan for how you will present your \
                  delegation's stance in the discussion. Consider how to address any concerns \
                  and persuade others to support your position.",
};

/// The public message step. This is the only module whose answer enters
/// the shared transcript.
pub const MESSAGE: Module = Module {
    name: "message",
    instruction: "Compose your diplomatic message to the assembly, incorporating your plan \
                  from above.",
};

/// Private vote rationale step, terminal round only.
pub const VOTE_PLAN: Module = Module {
    name: "vote_plan",
    instruction: "The discussion has ended. Reflect on the arguments presented. Consider the \
                  overall benefits and drawbacks, and decide whether your delegation should \
                  vote to adopt the policy. Provide your reasoning in this step.",
};

/// The ballot step, terminal round only.
pub const VOTE: Module = Module {
    name: "vote",
    instruction: "The discussion has ended. Cast your vote on the proposed policy. Respond \
                  with ONLY 'Yes' if you support adopting the policy, or 'No' if you do not.",
};

/// Ballot instruction variant offered when abstention is allowed.
pub const VOTE_WITH_ABSTAIN: Module = Module {
    name: "vote",
    instruction: "The discussion has ended. Cast your vote on the proposed policy. Respond \
                  with ONLY 'Yes' if you support adopting the policy, 'No' if you do not, or \
                  'Abstain' if your delegation takes no position.",
};

/// Phase of a deliberation round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Chairperson opening statement preceding the first introductions.
    Opening,
    /// First-round introductions - every participant states its position.
    Introduction,
    /// Middle-round discussion - reflect, plan, and address the assembly.
    Discussion,
    /// Terminal round - weigh the arguments and cast a ballot.
    Voting,
}

impl Phase {
    /// The ordered modules solicited from a participant in this phase.
    ///
    /// `Opening` has none: it is a chairperson turn, not a participant
    /// turn. The `Voting` ballot module defaults to the Yes/No wording;
    /// callers that permit abstention swap in [`VOTE_WITH_ABSTAIN`].
    pub fn modules(self) -> &'static [Module] {
        match self {
            Phase::Opening => &[],
            Phase::Introduction => &[INTRODUCTION, MESSAGE],
            Phase::Discussion => &[REFLECTION, PLAN, MESSAGE],
            Phase::Voting => &[VOTE_PLAN, VOTE],
        }
    }

    /// Response keys expected from a participant in this phase.
    pub fn keys(self) -> Vec<&'static str> {
        self.modules().iter().map(|m| m.name).collect()
    }

    /// Whether this phase collects ballots.
    pub fn is_vote(self) -> bool {
        matches!(self, Phase::Voting)
    }

    /// Whether every participant acts in this phase regardless of any
    /// chairperson gating.
    pub fn is_forced(self) -> bool {
        matches!(self, Phase::Introduction | Phase::Voting)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Phase::Opening => "opening",
            Phase::Introduction => "introduction",
            Phase::Discussion => "discussion",
            Phase::Voting => "voting",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Opening => "Opening",
            Phase::Introduction => "Introduction",
            Phase::Discussion => "Discussion",
            Phase::Voting => "Voting",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
