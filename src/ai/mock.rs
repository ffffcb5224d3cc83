//! In-process stand-in for the LLM endpoint.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::client::{CompletionTransport, TransportResponse};
use crate::errors::SummaryError;

/// What [`MockTransport`] answers with.
#[derive(Clone, Debug)]
pub enum MockReply {
    Response(TransportResponse),
    NetworkError(String),
}

/// One captured `post_json` call.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub url: String,
    pub api_key: String,
    pub body: Value,
}

/// A hand-rolled [`CompletionTransport`] that returns a fixed reply and
/// records every call it receives.
pub struct MockTransport {
    reply: MockReply,
    calls: Mutex<Vec<RecordedCall>>,
    call_count: AtomicUsize,
}

impl MockTransport {
    #[must_use]
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Replies 200 with `body`.
    #[must_use]
    pub fn ok(body: String) -> Self {
        Self::status(200, body)
    }

    #[must_use]
    pub fn status(status: u16, body: String) -> Self {
        Self::new(MockReply::Response(TransportResponse { status, body }))
    }

    /// Replies 200 with a chat completion whose content is `summary`.
    #[must_use]
    pub fn completion(summary: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": summary}}]
        });
        Self::ok(body.to_string())
    }

    #[must_use]
    pub fn network_error(message: &str) -> Self {
        Self::new(MockReply::NetworkError(message.to_string()))
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionTransport for MockTransport {
    async fn post_json(
        &self,
        url: &Url,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, SummaryError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                url: url.to_string(),
                api_key: api_key.to_string(),
                body: body.clone(),
            });
        }

        match &self.reply {
            MockReply::Response(response) => Ok(response.clone()),
            MockReply::NetworkError(message) => Err(SummaryError::Network(message.clone())),
        }
    }
}
