use std::path::PathBuf;

use thiserror::Error;

/// Every way a summary request can fail, one variant per pipeline failure.
///
/// `Display` carries the diagnostic detail for logs. What the caller sees is
/// [`SummaryError::user_message`], which never includes upstream bodies or
/// filesystem paths.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Record {0} not found")]
    RecordNotFound(u64),

    #[error("Failed to look up record: {0}")]
    Storage(String),

    #[error("PDF file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse PDF {}: {reason}", .path.display())]
    UnreadablePdf { path: PathBuf, reason: String },

    #[error("PDF {} contains no extractable text ({chars} characters)", .path.display())]
    EmptyExtraction { path: PathBuf, chars: usize },

    #[error("AI service not configured: {0}")]
    Configuration(String),

    #[error("Failed to reach LLM endpoint: {0}")]
    Network(String),

    #[error("LLM endpoint returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("LLM response was malformed: {0}")]
    MalformedResponse(String),

    #[error("Input rejected as too large by LLM endpoint: {0}")]
    InputTooLarge(String),
}

/// Discriminant of [`SummaryError`], handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RecordNotFound,
    Storage,
    FileNotFound,
    UnreadablePdf,
    EmptyExtraction,
    Configuration,
    Network,
    Upstream,
    MalformedResponse,
    InputTooLarge,
}

impl SummaryError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RecordNotFound(_) => ErrorKind::RecordNotFound,
            Self::Storage(_) => ErrorKind::Storage,
            Self::FileNotFound(_) => ErrorKind::FileNotFound,
            Self::UnreadablePdf { .. } => ErrorKind::UnreadablePdf,
            Self::EmptyExtraction { .. } => ErrorKind::EmptyExtraction,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Network(_) => ErrorKind::Network,
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::InputTooLarge(_) => ErrorKind::InputTooLarge,
        }
    }

    /// Message placed in the `{"error": ...}` body.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::RecordNotFound(_) => "Post not found".to_string(),
            Self::Storage(_) => "Failed to look up record".to_string(),
            Self::FileNotFound(_) => "PDF file not found".to_string(),
            // Both extraction failures look the same from the outside.
            Self::UnreadablePdf { .. } | Self::EmptyExtraction { .. } => {
                "Failed to extract text".to_string()
            }
            Self::Configuration(_) => "AI service not configured".to_string(),
            Self::Network(_) => "Failed to reach AI service".to_string(),
            Self::Upstream { status, .. } => {
                format!("AI service returned an error (status {status})")
            }
            Self::MalformedResponse(_) => "AI service returned an unexpected response".to_string(),
            Self::InputTooLarge(_) => "Document is too large to summarize".to_string(),
        }
    }

    /// HTTP status code used by the API handler.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::RecordNotFound(_) | Self::FileNotFound(_) => 404,
            Self::Storage(_)
            | Self::UnreadablePdf { .. }
            | Self::EmptyExtraction { .. }
            | Self::Configuration(_) => 500,
            Self::Network(_) | Self::Upstream { .. } | Self::MalformedResponse(_) => 502,
            Self::InputTooLarge(_) => 413,
        }
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SummaryError::Network(format!("request timed out: {error}"))
        } else if error.is_connect() {
            SummaryError::Network(format!("connection failed: {error}"))
        } else {
            SummaryError::Network(error.to_string())
        }
    }
}
