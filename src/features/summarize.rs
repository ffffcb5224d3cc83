//! The summary pipeline: record → path → text → summary.
//!
//! Stages run strictly in order and the first failure ends the request. No
//! stage is retried; callers retry by sending the request again.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::ai::LlmClient;
use crate::core::config::AppConfig;
use crate::core::models::{SummaryRequest, SummaryResult};
use crate::core::records::RecordStore;
use crate::documents::{PathResolver, TextExtractor};
use crate::errors::{ErrorKind, SummaryError};

/// Where a request is in the pipeline. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    ResolvingPath,
    Extracting,
    Summarizing,
    Succeeded,
    Failed(ErrorKind),
}

impl PipelineStage {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

/// A generated summary and the title of the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    pub summary: String,
}

/// Everything one request needs, built once and shared read-only.
pub struct SummaryService {
    records: Arc<dyn RecordStore>,
    resolver: PathResolver,
    extractor: TextExtractor,
    llm: LlmClient,
}

impl SummaryService {
    #[must_use]
    pub fn new(
        records: Arc<dyn RecordStore>,
        resolver: PathResolver,
        extractor: TextExtractor,
        llm: LlmClient,
    ) -> Self {
        Self {
            records,
            resolver,
            extractor,
            llm,
        }
    }

    /// Service with the real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM HTTP client cannot be built.
    pub fn from_config(
        config: &AppConfig,
        records: Arc<dyn RecordStore>,
    ) -> Result<Self, SummaryError> {
        Ok(Self::new(
            records,
            PathResolver::new(config.documents_root.clone()),
            TextExtractor::new(),
            LlmClient::new(config.llm.clone())?,
        ))
    }

    /// Runs the pipeline and converts the outcome into the response body.
    pub async fn get_summary(&self, record_id: u64) -> SummaryResult {
        match self.run(&SummaryRequest::new(record_id)).await {
            Ok(Summary { title, summary }) => SummaryResult::success(summary, title),
            Err(e) => SummaryResult::failure(&e),
        }
    }

    /// Runs the pipeline for one request.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that failed.
    #[tracing::instrument(
        level = "info",
        skip(self, request),
        fields(record_id = request.record_id, request_id = %request.request_id)
    )]
    pub async fn run(&self, request: &SummaryRequest) -> Result<Summary, SummaryError> {
        let started = Instant::now();
        let mut stage = PipelineStage::Idle;

        let outcome = self.run_stages(request, &mut stage).await;

        let elapsed_ms = started.elapsed().as_millis();
        match &outcome {
            Ok(_) => {
                advance(&mut stage, PipelineStage::Succeeded);
                info!(elapsed_ms, "Summary generated");
            }
            Err(e) => {
                let failed_in = stage;
                advance(&mut stage, PipelineStage::Failed(e.kind()));
                error!(?failed_in, elapsed_ms, "Summary request failed: {}", e);
            }
        }

        outcome
    }

    async fn run_stages(
        &self,
        request: &SummaryRequest,
        stage: &mut PipelineStage,
    ) -> Result<Summary, SummaryError> {
        advance(stage, PipelineStage::ResolvingPath);
        let location = self
            .records
            .owner_and_title(request.record_id)
            .await?
            .ok_or(SummaryError::RecordNotFound(request.record_id))?;
        let path = self.resolver.resolve_location(&location);
        info!(path = %path.display(), "Resolved PDF path");

        advance(stage, PipelineStage::Extracting);
        let extractor = self.extractor.clone();
        let task_path = path.clone();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(&task_path))
            .await
            .map_err(|e| SummaryError::UnreadablePdf {
                path: path.clone(),
                reason: format!("extraction task failed: {e}"),
            })??;

        advance(stage, PipelineStage::Summarizing);
        info!(
            source_bytes = extracted.source_length,
            pages = extracted.page_count,
            "Generating summary"
        );
        let summary = self.llm.summarize(&extracted.raw_text).await?;

        Ok(Summary {
            title: location.title,
            summary,
        })
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    let from = *stage;
    info!(?from, to = ?next, "Pipeline stage");
    *stage = next;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_outcomes_are_terminal() {
        assert!(!PipelineStage::Idle.is_terminal());
        assert!(!PipelineStage::ResolvingPath.is_terminal());
        assert!(!PipelineStage::Extracting.is_terminal());
        assert!(!PipelineStage::Summarizing.is_terminal());
        assert!(PipelineStage::Succeeded.is_terminal());
        assert!(PipelineStage::Failed(ErrorKind::Network).is_terminal());
    }
}
