//! All AI/LLM functionality

pub mod client;
pub mod mock;
pub mod prompt_builder;

// Re-export main types for convenience
pub use client::{CompletionTransport, HttpTransport, LlmClient, TransportResponse};
pub use prompt_builder::estimate_tokens;
