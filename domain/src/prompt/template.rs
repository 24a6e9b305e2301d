//! Prompt templates for participant and chairperson turns
//!
//! Every oracle call is assembled here: the per-participant system
//! prompt, the numbered step instructions for each phase, and the
//! chairperson's opening, gating, ranking, and filler prompts. The
//! structured steps always end with a JSON output-format block keyed by
//! the module names, which is what the response parser extracts against.

use crate::deliberation::participant::Participant;
use crate::deliberation::phase::{Module, Phase, VOTE_WITH_ABSTAIN};

/// Response key for the floor-request query in gated rounds.
pub const REQUEST_KEY: &str = "request_to_speak";

/// Response key for the chairperson's proposed speaking order.
pub const ORDER_KEY: &str = "order";

/// Response key for the chairperson's opening statement.
pub const OPENING_KEY: &str = "opening";

/// Response key for the chairperson's filler remark.
pub const FILLER_KEY: &str = "message";

/// Deterministic filler used when the oracle yields nothing for an
/// empty round. The round must still produce exactly one chair turn.
pub const FALLBACK_FILLER: &str = "No delegation has requested the floor this round. The chair \
                                   encourages all delegations to share their positions in the \
                                   next round.";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a participant turn.
    ///
    /// `briefing_override` replaces the participant's stored briefing
    /// when present; the terminal round passes the synthesized memory
    /// summary here. An empty override suppresses the background
    /// section entirely.
    pub fn system_prompt(
        participant: &Participant,
        roster: &[String],
        policy: &str,
        briefing_override: Option<&str>,
    ) -> String {
        let name = participant.name();

        let you = match participant.persona() {
            Some(persona) => format!("YOU: You are {name}, {persona}"),
            None => format!(
                "YOU: You are the representative of {name}. Your utmost goal is to accurately \
                 and faithfully represent {name} in all interactions and decisions. Prioritize \
                 the interests of {name}, maximizing accuracy and realism at all cost."
            ),
        };

        let briefing = briefing_override.or(participant.briefing());
        let background = match briefing {
            Some(text) if !text.trim().is_empty() => format!("\n\nBACKGROUND: {text}"),
            _ => String::new(),
        };

        format!(
            "{you}{background}\n\n{scenario}\n\n{style}",
            scenario = Self::scenario(roster, policy),
            style = Self::style(),
        )
    }

    /// System prompt for chairperson turns.
    pub fn chair_system_prompt(roster: &[String], policy: &str) -> String {
        format!(
            "YOU: You are the chairperson of the assembly. You represent no delegation and \
             take no position on the policy. Your role is to run an orderly, balanced meeting.\
             \n\n{scenario}\n\n{style}",
            scenario = Self::scenario(roster, policy),
            style = Self::style(),
        )
    }

    fn scenario(roster: &[String], policy: &str) -> String {
        format!(
            "SCENARIO: You are attending an assembly session with the delegations {}. The \
             meeting is to discuss and vote on a proposed policy: \"{policy}\". At the end of \
             the discussion, each delegation will vote on whether to adopt the policy.",
            roster.join(", ")
        )
    }

    fn style() -> &'static str {
        "STYLE: Write in the style of a diplomatic communication, with concise and clear \
         messages. Avoid informal language and maintain a professional tone."
    }

    /// Numbered step instructions plus the output-format block for a
    /// participant phase.
    pub fn phase_instruction(phase: Phase, allow_abstain: bool) -> String {
        let modules: Vec<Module> = phase
            .modules()
            .iter()
            .map(|m| {
                if allow_abstain && m.name == VOTE_WITH_ABSTAIN.name && phase.is_vote() {
                    VOTE_WITH_ABSTAIN
                } else {
                    *m
                }
            })
            .collect();
        Self::steps(&modules)
    }

    /// Floor-request query for chairperson-gated rounds.
    pub fn request_instruction() -> String {
        Self::steps(&[Module {
            name: REQUEST_KEY,
            instruction: "The floor is open for this round. State whether your delegation \
                          wishes to address the assembly. Respond with ONLY 'Yes' if you wish \
                          to speak, or 'No' if you will listen this round.",
        }])
    }

    /// Chairperson ranking query over the round's requesters.
    pub fn ranking_instruction(requesters: &[String]) -> String {
        let listing = requesters.join(", ");
        format!(
            "Step 1 ({ORDER_KEY}): The following delegations have requested the floor this \
             round: {listing}. Decide the order in which they will speak, balancing the \
             discussion so far. Respond with the delegation names in speaking order, separated \
             by commas.\n\n{format}",
            format = Self::output_format(&[ORDER_KEY]),
        )
    }

    /// Chairperson opening statement for the first round.
    pub fn opening_instruction() -> String {
        Self::steps(&[Module {
            name: OPENING_KEY,
            instruction: "Open the session. Briefly welcome the delegations, state the policy \
                          under consideration, and invite each delegation to introduce its \
                          position.",
        }])
    }

    /// Chairperson filler remark for a round in which nobody requested
    /// the floor.
    pub fn filler_instruction() -> String {
        Self::steps(&[Module {
            name: FILLER_KEY,
            instruction: "No delegation has requested the floor this round. Issue a brief \
                          remark to the assembly encouraging the delegations to make use of \
                          the next round.",
        }])
    }

    /// Free-form summarization prompt over a participant's private
    /// reflections. The response is used verbatim, so no output-format
    /// block is attached.
    pub fn summary_prompt(reflections: &[String]) -> String {
        let mut prompt = String::from(
            "Below are the private notes you recorded during the discussion, in order.\n",
        );
        for (i, reflection) in reflections.iter().enumerate() {
            prompt.push_str(&format!("\n{}. {}", i + 1, reflection));
        }
        prompt.push_str(
            "\n\nCondense these notes into a short first-person summary of your position and \
             how it evolved over the discussion. Two or three sentences at most.",
        );
        prompt
    }

    /// `Step N (name): instruction` lines followed by the JSON
    /// output-format block.
    fn steps(modules: &[Module]) -> String {
        let mut prompt = String::new();
        for (i, module) in modules.iter().enumerate() {
            prompt.push_str(&format!(
                "Step {} ({}): {}\n",
                i + 1,
                module.name,
                module.instruction
            ));
        }
        prompt.push('\n');
        let keys: Vec<&str> = modules.iter().map(|m| m.name).collect();
        prompt.push_str(&Self::output_format(&keys));
        prompt
    }

    fn output_format(keys: &[&str]) -> String {
        let mut format = String::from("Output Format:\n{\n");
        let body = keys
            .iter()
            .map(|key| format!("    \"{key}\": \"<your response>\""))
            .collect::<Vec<_>>()
            .join(",\n");
        format.push_str(&body);
        format.push_str("\n}");
        format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        vec!["Aland".to_string(), "Borduria".to_string()]
    }

    #[test]
    fn test_system_prompt_default_framing() {
        let p = Participant::new("Aland");
        let prompt = PromptTemplate::system_prompt(&p, &roster(), "Adopt the accord", None);
        assert!(prompt.contains("YOU: You are the representative of Aland."));
        assert!(prompt.contains("Aland, Borduria"));
        assert!(prompt.contains("\"Adopt the accord\""));
        assert!(prompt.contains("STYLE:"));
        assert!(!prompt.contains("BACKGROUND:"));
    }

    #[test]
    fn test_system_prompt_persona_override() {
        let p = Participant::new("Aland").with_persona("a blunt trade negotiator.");
        let prompt = PromptTemplate::system_prompt(&p, &roster(), "Adopt the accord", None);
        assert!(prompt.contains("YOU: You are Aland, a blunt trade negotiator."));
        assert!(!prompt.contains("representative of Aland"));
    }

    #[test]
    fn test_briefing_and_override() {
        let p = Participant::new("Aland").with_briefing("Drought has cut exports.");
        let with_briefing =
            PromptTemplate::system_prompt(&p, &roster(), "Adopt the accord", None);
        assert!(with_briefing.contains("BACKGROUND: Drought has cut exports."));

        // An override replaces the stored briefing rather than joining it.
        let replaced = PromptTemplate::system_prompt(
            &p,
            &roster(),
            "Adopt the accord",
            Some("I warmed to the proposal over time."),
        );
        assert!(replaced.contains("BACKGROUND: I warmed to the proposal over time."));
        assert!(!replaced.contains("Drought"));

        // An empty override suppresses the section entirely.
        let suppressed =
            PromptTemplate::system_prompt(&p, &roster(), "Adopt the accord", Some(""));
        assert!(!suppressed.contains("BACKGROUND:"));
    }

    #[test]
    fn test_phase_instruction_steps_and_format() {
        let prompt = PromptTemplate::phase_instruction(Phase::Discussion, true);
        assert!(prompt.contains("Step 1 (reflection):"));
        assert!(prompt.contains("Step 2 (plan):"));
        assert!(prompt.contains("Step 3 (message):"));
        assert!(prompt.contains("Output Format:"));
        assert!(prompt.contains("\"message\": \"<your response>\""));
    }

    #[test]
    fn test_vote_instruction_abstain_toggle() {
        let with = PromptTemplate::phase_instruction(Phase::Voting, true);
        assert!(with.contains("'Abstain'"));

        let without = PromptTemplate::phase_instruction(Phase::Voting, false);
        assert!(!without.contains("'Abstain'"));
        assert!(without.contains("ONLY 'Yes'"));
    }

    #[test]
    fn test_request_instruction_key() {
        let prompt = PromptTemplate::request_instruction();
        assert!(prompt.contains("Step 1 (request_to_speak):"));
        assert!(prompt.contains("\"request_to_speak\""));
    }

    #[test]
    fn test_ranking_instruction_lists_requesters() {
        let prompt =
            PromptTemplate::ranking_instruction(&["Cadia".to_string(), "Aland".to_string()]);
        assert!(prompt.contains("Cadia, Aland"));
        assert!(prompt.contains("\"order\""));
    }

    #[test]
    fn test_summary_prompt_numbers_reflections() {
        let prompt = PromptTemplate::summary_prompt(&[
            "First impressions poor.".to_string(),
            "The amendment helps us.".to_string(),
        ]);
        assert!(prompt.contains("1. First impressions poor."));
        assert!(prompt.contains("2. The amendment helps us."));
        assert!(!prompt.contains("Output Format"));
    }
}
