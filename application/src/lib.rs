//! Application layer for plenum
//!
//! This crate contains the run-deliberation use case, port definitions,
//! and run configuration. It depends only on the domain layer; adapters
//! for the ports live in the infrastructure layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ParticipantSpec, RunConfig};
pub use ports::{
    briefing::{BriefingProvider, NoBriefings},
    event_log::{EventLog, NoEventLog, RunEvent},
    llm_gateway::{ChatMessage, ChatRole, GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    response_parser::ResponseParser,
};
pub use use_cases::run_deliberation::{RunDeliberationError, RunDeliberationUseCase};
