//! PDF text extraction.
//!
//! The file is read in one call and parsed in memory with `lopdf`; pages are
//! decoded in page-number order. `lopdf` can panic on badly broken input, so
//! parsing and per-page decoding run under [`std::panic::catch_unwind`] and a
//! panic becomes [`SummaryError::UnreadablePdf`].

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::{info, warn};

use crate::core::models::ExtractedText;
use crate::errors::SummaryError;

/// Below this many characters the text is treated as missing.
pub const MIN_EXTRACTED_CHARS: usize = 10;

#[derive(Debug, Clone)]
pub struct TextExtractor {
    min_chars: usize,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self {
            min_chars: MIN_EXTRACTED_CHARS,
        }
    }
}

impl TextExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Reads the PDF at `path` and returns its text, pages in order.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::FileNotFound`] if the file cannot be read.
    /// - [`SummaryError::UnreadablePdf`] if it is empty, not a PDF, encrypted,
    ///   truncated, has no pages or is otherwise undecodable.
    /// - [`SummaryError::EmptyExtraction`] if it parses but holds no text.
    pub fn extract(&self, path: &Path) -> Result<ExtractedText, SummaryError> {
        info!(path = %path.display(), "Extracting text from PDF");

        let bytes = fs::read(path).map_err(|e| {
            warn!(path = %path.display(), "Cannot read PDF: {}", e);
            SummaryError::FileNotFound(path.to_path_buf())
        })?;

        if bytes.is_empty() {
            return Err(unreadable(path, "file is empty (0 bytes)"));
        }
        info!(bytes = bytes.len(), "PDF file size");

        let (text, page_count) = extract_pages(path, &bytes)?;
        let raw_text = clean_text(&text);
        let chars = raw_text.chars().count();

        if chars < self.min_chars {
            warn!(chars, page_count, "PDF has no usable text layer");
            return Err(SummaryError::EmptyExtraction {
                path: path.to_path_buf(),
                chars,
            });
        }

        info!(chars, page_count, "Extracted text from PDF");
        Ok(ExtractedText {
            raw_text,
            source_length: bytes.len() as u64,
            page_count,
        })
    }
}

fn unreadable(path: &Path, reason: impl Into<String>) -> SummaryError {
    SummaryError::UnreadablePdf {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Parses `bytes` and concatenates the text of every page.
fn extract_pages(path: &Path, bytes: &[u8]) -> Result<(String, usize), SummaryError> {
    let doc = match panic::catch_unwind(AssertUnwindSafe(|| Document::load_mem(bytes))) {
        Ok(Ok(doc)) => doc,
        Ok(Err(e)) => return Err(unreadable(path, e.to_string())),
        Err(_) => return Err(unreadable(path, "parser panicked (malformed document)")),
    };

    if doc.is_encrypted() {
        return Err(unreadable(path, "document is encrypted"));
    }

    // BTreeMap keyed by page number, so iteration is reading order.
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(unreadable(path, "document has no pages"));
    }

    let mut text = String::new();
    let mut failed = 0_usize;

    for &page_number in pages.keys() {
        match panic::catch_unwind(AssertUnwindSafe(|| doc.extract_text(&[page_number]))) {
            Ok(Ok(page_text)) => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(&page_text);
            }
            Ok(Err(e)) => {
                warn!(page = page_number, "Failed to decode page text: {}", e);
                failed += 1;
            }
            Err(_) => {
                warn!(page = page_number, "Page decoder panicked");
                failed += 1;
            }
        }
    }

    if failed == pages.len() {
        return Err(unreadable(path, "no page could be decoded"));
    }

    Ok((text, pages.len()))
}

/// Drops NUL bytes and trailing spaces, and collapses long blank runs.
fn clean_text(raw: &str) -> String {
    let without_nul = raw.replace('\0', "");
    let mut out = String::with_capacity(without_nul.len());
    let mut blank_run = 0_u32;

    for line in without_nul.lines().map(str::trim_end) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 2 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out.trim().to_string()
}
