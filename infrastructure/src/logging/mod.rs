//! Structured event logging adapters

pub mod jsonl;

pub use jsonl::JsonlEventLog;
