//! PDF Summary - on-demand LLM summaries of the PDF attached to a record.
//!
//! A request names a record; the service looks up the record's owner and
//! title, reads `<root>/<owner>/<title>.pdf`, extracts its text and asks an
//! OpenAI-compatible chat completions endpoint for a short English summary.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda behind API Gateway for the single HTTP route
//! - SSM Parameter Store for record lookup and the API key
//! - lopdf for text extraction
//! - reqwest for the LLM call
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pdf_summary::core::config::LlmRequestConfig;
//! use pdf_summary::core::records::InMemoryRecordStore;
//! use pdf_summary::documents::{PathResolver, TextExtractor};
//! use pdf_summary::{LlmClient, SummaryService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     pdf_summary::setup_logging();
//!
//!     let llm = LlmRequestConfig::new("https://api.cerebras.ai/v1/", Some("csk-...".into()))?;
//!     let records = InMemoryRecordStore::new().with_record(42, "a@b.com", "Paper One");
//!     let service = SummaryService::new(
//!         Arc::new(records),
//!         PathResolver::new("researchers"),
//!         TextExtractor::new(),
//!         LlmClient::new(llm)?,
//!     );
//!
//!     let result = service.get_summary(42).await;
//!     println!("{}", serde_json::to_string(&result)?);
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod api;
pub mod core;
pub mod documents;
pub mod errors;
pub mod features;

pub use ai::{LlmClient, estimate_tokens};
pub use crate::core::models::SummaryResult;
pub use errors::{ErrorKind, SummaryError};
pub use features::SummaryService;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. The level comes from `RUST_LOG` and defaults to `info`. Calling it
/// more than once is harmless.
///
/// # Example
///
/// ```
/// pdf_summary::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
