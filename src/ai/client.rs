//! LLM API client module
//!
//! Sends extracted document text to an OpenAI-compatible chat completions
//! endpoint and returns the generated summary.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, warn};
use url::Url;

use super::prompt_builder::{
    build_messages, build_user_prompt, estimate_tokens, prepare_document, render_instruction,
    strip_reasoning,
};
use crate::core::config::LlmRequestConfig;
use crate::errors::SummaryError;

const COMPLETIONS_PATH: &str = "chat/completions";
const MAX_LOGGED_ERROR_CHARS: usize = 500;

/// Status and raw body of one upstream response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The single outbound call the summarizer makes.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// POST `body` as JSON to `url` with bearer `api_key`.
    ///
    /// Only failures to get a response at all are errors; any HTTP status
    /// comes back as a [`TransportResponse`].
    async fn post_json(
        &self,
        url: &Url,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, SummaryError>;
}

/// `reqwest`-backed transport, one shared connection pool.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, SummaryError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            SummaryError::Configuration(format!("Failed to build LLM HTTP client: {e}"))
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &Url,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, SummaryError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {api_key}").parse().map_err(|e| {
            SummaryError::Configuration(format!("Invalid Authorization header: {e}"))
        })?;
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let response = self
            .client
            .post(url.clone())
            .headers(headers)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            SummaryError::Network(format!(
                "Failed to read LLM response body (status {status}): {e}"
            ))
        })?;

        Ok(TransportResponse { status, body })
    }
}

/// LLM API client for generating document summaries
pub struct LlmClient {
    config: LlmRequestConfig,
    transport: Arc<dyn CompletionTransport>,
}

impl LlmClient {
    /// Client using the real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: LlmRequestConfig) -> Result<Self, SummaryError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    #[must_use]
    pub fn with_transport(config: LlmRequestConfig, transport: Arc<dyn CompletionTransport>) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub const fn config(&self) -> &LlmRequestConfig {
        &self.config
    }

    /// Full URL of the chat completions endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured endpoint cannot be joined.
    pub fn completions_url(&self) -> Result<Url, SummaryError> {
        self.config.endpoint.join(COMPLETIONS_PATH).map_err(|e| {
            SummaryError::Configuration(format!("Invalid LLM endpoint: {e}"))
        })
    }

    /// Builds the request body. The second value is `true` when the document
    /// was cut to `max_input_chars`.
    #[must_use]
    pub fn build_request_body(&self, raw_text: &str) -> (Value, bool) {
        let (document, truncated) = prepare_document(raw_text, self.config.max_input_chars);
        let instruction = render_instruction(
            &self.config.instruction_template,
            self.config.max_output_words,
        );
        let prompt = build_messages(
            &instruction,
            build_user_prompt(&document, self.config.max_output_words),
        );

        #[cfg(feature = "debug-logs")]
        tracing::debug!(
            instruction_chars = instruction.chars().count(),
            document_chars = document.chars().count(),
            "Built summarization prompt"
        );

        let body = json!({
            "model": self.config.model,
            "messages": messages_to_json(&prompt),
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "stream": false
        });

        (body, truncated)
    }

    /// Summarizes `raw_text` with a single call to the endpoint.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::Configuration`] if no API key is configured (no call is made).
    /// - [`SummaryError::Network`] if the endpoint cannot be reached.
    /// - [`SummaryError::InputTooLarge`] if the endpoint rejects the input size.
    /// - [`SummaryError::Upstream`] for any other non-success status.
    /// - [`SummaryError::MalformedResponse`] if the body has no summary text.
    pub async fn summarize(&self, raw_text: &str) -> Result<String, SummaryError> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty())
        else {
            return Err(SummaryError::Configuration(
                "no LLM API key is configured".to_string(),
            ));
        };

        let url = self.completions_url()?;
        let (body, truncated) = self.build_request_body(raw_text);

        if truncated {
            info!(
                max_input_chars = self.config.max_input_chars,
                original_chars = raw_text.chars().count(),
                "Document text truncated before summarization"
            );
        }
        info!(
            model = %self.config.model,
            estimated_input_tokens = estimate_tokens(&body.to_string()),
            "Sending document to LLM for summarization"
        );

        let started = Instant::now();
        let response = self.transport.post_json(&url, api_key, &body).await?;
        let elapsed_ms = started.elapsed().as_millis();

        if !response.is_success() {
            warn!(
                status = response.status,
                elapsed_ms,
                "LLM endpoint returned an error"
            );
            return Err(classify_failure(response.status, &response.body));
        }

        let summary = parse_completion(&response.body)?;
        info!(
            elapsed_ms,
            summary_chars = summary.chars().count(),
            "Received summary from LLM"
        );
        Ok(summary)
    }
}

/// Chat messages in the wire shape `{ "role": ..., "content": ... }`.
fn messages_to_json(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .filter_map(|m| {
            let role = match m.role {
                MessageRole::system => "system",
                MessageRole::user | MessageRole::function | MessageRole::tool => "user",
                MessageRole::assistant => "assistant",
            };
            match &m.content {
                Content::Text(text) => Some(json!({ "role": role, "content": text })),
                Content::ImageUrl(_) => None,
            }
        })
        .collect()
}

/// Extracts `choices[0].message.content`, minus any reasoning prefix.
pub(crate) fn parse_completion(body: &str) -> Result<String, SummaryError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| SummaryError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let content = json
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            SummaryError::MalformedResponse("missing choices[0].message.content".to_string())
        })?;

    let summary = strip_reasoning(content);
    if summary.trim().is_empty() {
        return Err(SummaryError::MalformedResponse(
            "summary text is empty".to_string(),
        ));
    }

    Ok(summary.to_string())
}

fn classify_failure(status: u16, body: &str) -> SummaryError {
    let message: String = body.chars().take(MAX_LOGGED_ERROR_CHARS).collect();
    let lowered = body.to_ascii_lowercase();
    let too_large = status == 413
        || lowered.contains("context_length_exceeded")
        || lowered.contains("maximum context length");

    if too_large {
        SummaryError::InputTooLarge(format!("status {status}: {message}"))
    } else {
        SummaryError::Upstream { status, message }
    }
}
