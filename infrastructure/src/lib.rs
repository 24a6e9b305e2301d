//! Infrastructure layer for plenum
//!
//! Adapters implementing the application-layer ports: the
//! chat-completions gateway, the JSON-first/regex-fallback response
//! parser, briefing providers, the figment config loader, and the JSONL
//! event log.

pub mod briefing;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod parser;

// Re-export commonly used types
pub use briefing::{BriefingFileError, FileBriefingProvider, StaticBriefingProvider};
pub use config::{ConfigLoader, FileConfig};
pub use gateway::OpenAiGateway;
pub use logging::JsonlEventLog;
pub use parser::KeyedResponseParser;
