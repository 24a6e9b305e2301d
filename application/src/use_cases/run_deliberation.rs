//! Run Deliberation use case
//!
//! Drives one deliberation end to end: round scheduling, speaker
//! selection (with optional chairperson gating), strictly sequential
//! turn execution against the oracle, transcript and memory updates,
//! and the terminal tally.
//!
//! Turn execution is deliberately serial. The transcript is the only
//! channel participants observe each other through, so each oracle call
//! must complete and have its results appended before the next call is
//! built. The one exception is the floor-request queries of a gated
//! round, which all read the same pre-round transcript and are issued
//! in randomized order.

use crate::config::RunConfig;
use crate::ports::briefing::{BriefingProvider, NoBriefings};
use crate::ports::event_log::{EventLog, NoEventLog, RunEvent};
use crate::ports::llm_gateway::{ChatMessage, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::response_parser::ResponseParser;
use plenum_domain::deliberation::phase::{MESSAGE, REFLECTION, VOTE};
use plenum_domain::prompt::template::{
    FALLBACK_FILLER, FILLER_KEY, OPENING_KEY, ORDER_KEY, REQUEST_KEY,
};
use plenum_domain::{
    Ballot, BallotChoice, CHAIRPERSON, Deliberation, DeliberationResult, DomainError,
    Participant, Phase, Policy, PromptTemplate, RoundReport, TurnRecord, VoteTally, phases_for,
    validate_speaking_order,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur when running a deliberation
///
/// Only configuration-level violations surface here. Oracle failures,
/// unparseable responses, invalid rankings, and malformed votes are all
/// absorbed with deterministic fallbacks so a validly configured run
/// always completes.
#[derive(Error, Debug)]
pub enum RunDeliberationError {
    #[error("policy text is empty")]
    EmptyPolicy,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Use case for running a deliberation
pub struct RunDeliberationUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    parser: Arc<dyn ResponseParser>,
    briefings: Arc<dyn BriefingProvider>,
    events: Arc<dyn EventLog>,
    rng: Mutex<StdRng>,
}

impl<G: LlmGateway + 'static> RunDeliberationUseCase<G> {
    pub fn new(gateway: Arc<G>, parser: Arc<dyn ResponseParser>) -> Self {
        Self {
            gateway,
            parser,
            briefings: Arc::new(NoBriefings),
            events: Arc::new(NoEventLog),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_briefings(mut self, briefings: Arc<dyn BriefingProvider>) -> Self {
        self.briefings = briefings;
        self
    }

    pub fn with_event_log(mut self, events: Arc<dyn EventLog>) -> Self {
        self.events = events;
        self
    }

    /// Seed the speaker-shuffle RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Build the session object for a run. All run state lives on the
    /// returned [`Deliberation`]; the use case itself holds none.
    pub fn start(&self, config: &RunConfig) -> Result<Deliberation, RunDeliberationError> {
        let policy = Policy::try_new(config.policy.clone())
            .ok_or(RunDeliberationError::EmptyPolicy)?;

        let participants = config
            .participants
            .iter()
            .map(|spec| {
                let mut participant = Participant::new(spec.name.as_str());
                if let Some(persona) = &spec.persona {
                    participant = participant.with_persona(persona.as_str());
                }
                if let Some(briefing) = self.briefings.briefing_for(&spec.name) {
                    participant = participant.with_briefing(briefing);
                }
                participant
            })
            .collect();

        Ok(Deliberation::new(policy, participants, config.settings())?)
    }

    /// Execute a full run with default (no-op) progress.
    pub async fn execute(
        &self,
        config: RunConfig,
    ) -> Result<DeliberationResult, RunDeliberationError> {
        self.execute_with_progress(config, &NoProgress).await
    }

    /// Execute a full run with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        config: RunConfig,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationResult, RunDeliberationError> {
        let mut session = self.start(&config)?;

        info!(
            participants = session.participants().len(),
            rounds = session.total_rounds(),
            "Starting deliberation"
        );

        let mut rounds = Vec::new();
        for round in 1..=session.total_rounds() {
            let report = self.run_round(&mut session, round, progress).await?;
            rounds.push(report);
        }

        let tally = session
            .tally()
            .cloned()
            .unwrap_or_else(|| VoteTally::tally(session.ballots()));

        Ok(DeliberationResult {
            rounds,
            ballots: session.ballots().to_vec(),
            tally,
            log: session.log().export().to_string(),
        })
    }

    /// Run a single round end to end. Public so callers that drive a
    /// session stepwise (a UI polling round by round) can use the same
    /// state machine as [`execute`](Self::execute).
    pub async fn run_round(
        &self,
        session: &mut Deliberation,
        round: u32,
        progress: &dyn ProgressNotifier,
    ) -> Result<RoundReport, RunDeliberationError> {
        let phases = phases_for(round, session.total_rounds())?;
        progress.on_round_start(round, &phases);

        let roster = session.roster();
        session.log_mut().begin_run(&roster);
        let voting = phases.iter().any(|p| p.is_vote());
        session.log_mut().begin_round(round, voting);

        let mut report = RoundReport::new(round, phases.clone());

        for phase in phases {
            if phase == Phase::Opening {
                self.run_opening(session, round, &mut report, progress).await;
                continue;
            }

            let speakers = self
                .select_speakers(session, phase, round, &mut report, progress)
                .await;

            for name in speakers {
                let turn = self.execute_turn(session, &name, phase, round).await;
                progress.on_turn_complete(round, &name, !turn.is_empty());
                report.turns.push(turn);
            }
        }

        if voting {
            self.finalize_vote(session, &mut report);
        }

        progress.on_round_complete(round);
        Ok(report)
    }

    /// Chairperson opening statement preceding the first introductions.
    /// Skipped entirely when no chairperson is configured, and skipped
    /// quietly if the oracle yields nothing.
    async fn run_opening(
        &self,
        session: &mut Deliberation,
        round: u32,
        report: &mut RoundReport,
        progress: &dyn ProgressNotifier,
    ) {
        if !session.settings().has_chairperson {
            return;
        }

        let roster = session.roster();
        let messages = vec![
            ChatMessage::system(PromptTemplate::chair_system_prompt(
                &roster,
                session.policy().text(),
            )),
            ChatMessage::user(session.transcript().render()),
            ChatMessage::user(PromptTemplate::opening_instruction()),
        ];

        let fields = self.ask(&messages, &[OPENING_KEY]).await;
        let Some(text) = fields
            .get(OPENING_KEY)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(String::from)
        else {
            debug!("opening statement unavailable; continuing without one");
            return;
        };

        session.append_message(CHAIRPERSON, text.as_str());
        let mut turn = TurnRecord::new(CHAIRPERSON);
        turn.push(OPENING_KEY, text.as_str());
        session.log_mut().record_turn(CHAIRPERSON, &turn.fields);
        self.events.record(RunEvent::new(
            "opening",
            json!({ "round": round, "text": text }),
        ));
        progress.on_turn_complete(round, CHAIRPERSON, true);
        report.turns.push(turn);
    }

    /// Ordered list of participants acting in this phase.
    async fn select_speakers(
        &self,
        session: &mut Deliberation,
        phase: Phase,
        round: u32,
        report: &mut RoundReport,
        progress: &dyn ProgressNotifier,
    ) -> Vec<String> {
        match phase {
            Phase::Opening => Vec::new(),
            // Ballots are simultaneous in effect, so roster order is fine.
            Phase::Voting => session.roster(),
            Phase::Introduction => self.shuffled_roster(session),
            Phase::Discussion if !session.settings().has_chairperson => {
                self.shuffled_roster(session)
            }
            Phase::Discussion => self.gate_discussion(session, round, report, progress).await,
        }
    }

    fn shuffled_roster(&self, session: &Deliberation) -> Vec<String> {
        let mut order = session.roster();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        order.shuffle(&mut *rng);
        order
    }

    /// Chairperson-gated discussion round: poll each participant for a
    /// floor request, then have the chairperson rank the requesters.
    async fn gate_discussion(
        &self,
        session: &mut Deliberation,
        round: u32,
        report: &mut RoundReport,
        progress: &dyn ProgressNotifier,
    ) -> Vec<String> {
        let roster = session.roster();
        let policy = session.policy().text().to_string();

        // Queries go out in randomized order to avoid systematic bias,
        // and all of them see the transcript as it stood before any
        // decision this round.
        let query_order = self.shuffled_roster(session);
        let context = session.transcript().render();

        let mut requesters = Vec::new();
        for name in &query_order {
            let Some(participant) = session.participant(name) else {
                continue;
            };
            let messages = vec![
                ChatMessage::system(PromptTemplate::system_prompt(
                    participant,
                    &roster,
                    &policy,
                    None,
                )),
                ChatMessage::user(context.clone()),
                ChatMessage::user(PromptTemplate::request_instruction()),
            ];
            let fields = self.ask(&messages, &[REQUEST_KEY]).await;
            // An unparseable or missing answer counts as declining.
            let requested = fields
                .get(REQUEST_KEY)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"));

            self.events.record(RunEvent::new(
                "floor_request",
                json!({ "round": round, "participant": name, "requested": requested }),
            ));

            if requested {
                requesters.push(name.clone());
            }
        }

        if requesters.is_empty() {
            self.run_filler(session, round, report, progress).await;
            return Vec::new();
        }

        let mut order = if requesters.len() > 1 {
            self.rank_requesters(session, &requesters).await
        } else {
            requesters
        };

        if let Some(cap) = session.settings().speaker_cap {
            if order.len() > cap {
                debug!(cap, requested = order.len(), "truncating speaking order");
                order.truncate(cap);
            }
        }

        order
    }

    /// Ask the chairperson to order the requesters, then repair the
    /// answer into a permutation of them. An unparseable ranking falls
    /// back to the raw request order.
    async fn rank_requesters(
        &self,
        session: &Deliberation,
        requesters: &[String],
    ) -> Vec<String> {
        let roster = session.roster();
        let messages = vec![
            ChatMessage::system(PromptTemplate::chair_system_prompt(
                &roster,
                session.policy().text(),
            )),
            ChatMessage::user(session.transcript().render()),
            ChatMessage::user(PromptTemplate::ranking_instruction(requesters)),
        ];

        let fields = self.ask(&messages, &[ORDER_KEY]).await;
        let proposed: Vec<String> = fields
            .get(ORDER_KEY)
            .map(|raw| {
                raw.split([',', ';', '\n'])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        if proposed.is_empty() {
            debug!("speaker ranking unavailable; using request order");
        }

        let order = validate_speaking_order(requesters, &proposed);
        self.events.record(RunEvent::new(
            "ranking",
            json!({ "requesters": requesters, "order": &order }),
        ));
        order
    }

    /// Nobody requested the floor: the chairperson still produces
    /// exactly one turn so the round is visible in the transcript.
    async fn run_filler(
        &self,
        session: &mut Deliberation,
        round: u32,
        report: &mut RoundReport,
        progress: &dyn ProgressNotifier,
    ) {
        let roster = session.roster();
        let messages = vec![
            ChatMessage::system(PromptTemplate::chair_system_prompt(
                &roster,
                session.policy().text(),
            )),
            ChatMessage::user(session.transcript().render()),
            ChatMessage::user(PromptTemplate::filler_instruction()),
        ];

        let fields = self.ask(&messages, &[FILLER_KEY]).await;
        let text = fields
            .get(FILLER_KEY)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(String::from)
            .unwrap_or_else(|| FALLBACK_FILLER.to_string());

        session.append_message(CHAIRPERSON, text.as_str());
        let mut turn = TurnRecord::new(CHAIRPERSON);
        turn.push(FILLER_KEY, text.as_str());
        session.log_mut().record_turn(CHAIRPERSON, &turn.fields);
        self.events.record(RunEvent::new(
            "filler",
            json!({ "round": round, "text": text }),
        ));
        progress.on_turn_complete(round, CHAIRPERSON, true);
        report.turns.push(turn);
    }

    /// One participant turn: assemble context, consult the oracle, file
    /// the structured fields. The public `message` field is the only
    /// one that reaches the shared transcript; `reflection` goes to the
    /// participant's private memory; the rest are log-only.
    async fn execute_turn(
        &self,
        session: &mut Deliberation,
        name: &str,
        phase: Phase,
        round: u32,
    ) -> TurnRecord {
        let roster = session.roster();
        let policy = session.policy().text().to_string();
        let allow_abstain = session.settings().allow_abstain;

        // The vote turn replaces the briefing with a summary of the
        // participant's own reflections.
        let briefing_override = if phase.is_vote() {
            Some(self.summarize_memory(session, name).await)
        } else {
            None
        };

        let system = match session.participant(name) {
            Some(participant) => PromptTemplate::system_prompt(
                participant,
                &roster,
                &policy,
                briefing_override.as_deref(),
            ),
            None => return TurnRecord::new(name),
        };

        let messages = vec![
            ChatMessage::system(system),
            ChatMessage::user(session.transcript().render()),
            ChatMessage::user(PromptTemplate::phase_instruction(phase, allow_abstain)),
        ];

        let keys = phase.keys();
        let fields = self.ask(&messages, &keys).await;

        let mut turn = TurnRecord::new(name);
        for key in &keys {
            if let Some(value) = fields.get(*key) {
                turn.push(*key, value.clone());
            }
        }

        if let Some(message) = turn.get(MESSAGE.name).map(String::from) {
            session.append_message(name, message);
        }
        if let Some(reflection) = turn.get(REFLECTION.name).map(String::from) {
            session.record_reflection(name, reflection);
        }

        session.log_mut().record_turn(name, &turn.fields);
        self.events.record(RunEvent::new(
            "turn",
            json!({
                "round": round,
                "phase": phase.as_str(),
                "speaker": name,
                "fields": serde_json::to_value(&turn.fields).unwrap_or_default(),
            }),
        ));

        turn
    }

    /// Condense a participant's private reflections into the short
    /// summary used as its vote-turn briefing. Empty memory skips the
    /// oracle call and yields an empty summary.
    async fn summarize_memory(&self, session: &Deliberation, name: &str) -> String {
        let Some(participant) = session.participant(name) else {
            return String::new();
        };
        if !participant.has_memory() {
            return String::new();
        }

        let roster = session.roster();
        let messages = vec![
            ChatMessage::system(PromptTemplate::system_prompt(
                participant,
                &roster,
                session.policy().text(),
                Some(""),
            )),
            ChatMessage::user(PromptTemplate::summary_prompt(participant.memory())),
        ];

        match self.gateway.complete(&messages).await {
            Ok(raw) => {
                let summary = raw.trim().to_string();
                self.events.record(RunEvent::new(
                    "summary",
                    json!({ "participant": name, "summary": &summary }),
                ));
                summary
            }
            Err(e) => {
                warn!(error = %e, participant = name, "memory summarization failed");
                String::new()
            }
        }
    }

    /// Collect one ballot per participant turn, tally, and close the
    /// run. Missing or unrecognized votes coerce to the configured
    /// default; no retry happens at this layer.
    fn finalize_vote(&self, session: &mut Deliberation, report: &mut RoundReport) {
        let allow_abstain = session.settings().allow_abstain;

        let ballots: Vec<Ballot> = report
            .turns
            .iter()
            .filter(|turn| turn.speaker != CHAIRPERSON)
            .map(|turn| {
                Ballot::new(
                    turn.speaker.as_str(),
                    BallotChoice::from_raw(turn.get(VOTE.name), allow_abstain),
                )
            })
            .collect();

        for ballot in &ballots {
            session.record_ballot(ballot.clone());
        }

        let tally = VoteTally::tally(session.ballots());
        info!(
            yes = tally.yes,
            no = tally.no,
            abstain = tally.abstain,
            outcome = %tally.outcome,
            "Deliberation concluded"
        );

        session.log_mut().record_tally(&tally);
        self.events.record(RunEvent::new(
            "tally",
            json!({
                "yes": tally.yes,
                "no": tally.no,
                "abstain": tally.abstain,
                "outcome": tally.outcome.announcement(),
            }),
        ));
        session.set_tally(tally.clone());

        report.ballots = ballots;
        report.tally = Some(tally);
        report.finished = true;
    }

    /// One oracle exchange routed through the parser. Empty responses
    /// and transport failures both degrade to "no fields for this
    /// turn"; the round always continues.
    async fn ask(&self, messages: &[ChatMessage], keys: &[&str]) -> BTreeMap<String, String> {
        match self.gateway.complete(messages).await {
            Ok(raw) => {
                if raw.trim().is_empty() {
                    debug!("oracle returned empty text");
                    BTreeMap::new()
                } else {
                    self.parser.extract(&raw, keys)
                }
            }
            Err(e) => {
                warn!(error = %e, "oracle call failed; no fields for this turn");
                BTreeMap::new()
            }
        }
    }
}
