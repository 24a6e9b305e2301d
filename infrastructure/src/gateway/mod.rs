//! Gateway adapters for the text-generation oracle

pub mod openai;

pub use openai::OpenAiGateway;
