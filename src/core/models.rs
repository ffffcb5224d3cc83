use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SummaryError;

/// One summary request, built per invocation.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub record_id: u64,
    /// Correlation id for logs only.
    pub request_id: Uuid,
}

impl SummaryRequest {
    #[must_use]
    pub fn new(record_id: u64) -> Self {
        Self {
            record_id,
            request_id: Uuid::new_v4(),
        }
    }
}

/// Owner and title of the PDF attached to a record, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLocation {
    pub owner_key: String,
    pub title: String,
}

impl DocumentLocation {
    pub fn new(owner_key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            owner_key: owner_key.into(),
            title: title.into(),
        }
    }
}

/// Text pulled out of a PDF. Lives only as long as one request.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub raw_text: String,
    /// Size of the PDF on disk, in bytes.
    pub source_length: u64,
    pub page_count: usize,
}

/// Response body returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryResult {
    Success {
        success: bool,
        summary: String,
        title: String,
    },
    Failure {
        error: String,
    },
}

impl SummaryResult {
    #[must_use]
    pub fn success(summary: String, title: String) -> Self {
        Self::Success {
            success: true,
            summary,
            title,
        }
    }

    #[must_use]
    pub fn failure(error: &SummaryError) -> Self {
        Self::Failure {
            error: error.user_message(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
