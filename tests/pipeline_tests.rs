//! End-to-end runs of the summary pipeline with an in-memory record store,
//! PDFs in a temp directory and a mocked LLM endpoint.

mod common;

use std::path::Path;
use std::sync::Arc;

use common::{PageSpec, build_pdf, text_pdf, write_document};
use pdf_summary::ai::mock::MockTransport;
use pdf_summary::core::config::LlmRequestConfig;
use pdf_summary::core::models::SummaryRequest;
use pdf_summary::core::records::InMemoryRecordStore;
use pdf_summary::documents::{PathResolver, TextExtractor};
use pdf_summary::{ErrorKind, LlmClient, SummaryResult, SummaryService};
use serde_json::json;

fn records() -> InMemoryRecordStore {
    InMemoryRecordStore::new()
        .with_record(42, "a@b.com", "Paper One")
        .with_record(43, "a@b.com", "Missing Paper")
        .with_record(44, "c@d.org", "Paper Three")
        .with_record(45, "c@d.org", "Scanned")
}

fn service(
    root: &Path,
    api_key: Option<&str>,
    transport: Arc<MockTransport>,
) -> SummaryService {
    let llm = LlmRequestConfig::new("https://llm.example.com/v1/", api_key.map(str::to_string))
        .unwrap();
    SummaryService::new(
        Arc::new(records()),
        PathResolver::new(root),
        TextExtractor::new(),
        LlmClient::with_transport(llm, transport),
    )
}

#[tokio::test]
async fn test_record_with_pdf_is_summarized() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        "a@b.com",
        "Paper One",
        &text_pdf(&["We study the effect of caffeine on sleep."]),
    );
    let transport = Arc::new(MockTransport::completion("Summary text"));
    let service = service(dir.path(), Some("csk-test"), transport.clone());

    let result = service.get_summary(42).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"success": true, "summary": "Summary text", "title": "Paper One"})
    );
    assert_eq!(transport.call_count(), 1);
    let sent = transport.calls()[0].body["messages"][1]["content"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(sent.contains("caffeine on sleep"));
}

#[tokio::test]
async fn test_missing_pdf_never_calls_llm() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(MockTransport::completion("unused"));
    let service = service(dir.path(), Some("csk-test"), transport.clone());

    let result = service.get_summary(43).await;

    assert_eq!(
        result,
        SummaryResult::Failure {
            error: "PDF file not found".to_string()
        }
    );
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_missing_api_key_is_reported_after_extraction() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        "c@d.org",
        "Paper Three",
        &text_pdf(&["A perfectly readable third paper."]),
    );
    let transport = Arc::new(MockTransport::completion("unused"));
    let service = service(dir.path(), None, transport.clone());

    let result = service.get_summary(44).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"error": "AI service not configured"})
    );
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_record_stops_before_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(MockTransport::completion("unused"));
    let service = service(dir.path(), Some("csk-test"), transport.clone());

    let err = service.run(&SummaryRequest::new(999)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RecordNotFound);
    assert_eq!(err.status_code(), 404);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_scanned_pdf_fails_extraction() {
    let dir = tempfile::tempdir().unwrap();
    write_document(dir.path(), "c@d.org", "Scanned", &build_pdf(&[PageSpec::NoText]));
    let transport = Arc::new(MockTransport::completion("unused"));
    let service = service(dir.path(), Some("csk-test"), transport.clone());

    let err = service.run(&SummaryRequest::new(45)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EmptyExtraction);
    assert_eq!(err.user_message(), "Failed to extract text");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_does_not_poison_later_requests() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        "a@b.com",
        "Paper One",
        &text_pdf(&["We study the effect of caffeine on sleep."]),
    );

    let failing = Arc::new(MockTransport::status(503, "overloaded".to_string()));
    let service_down = service(dir.path(), Some("csk-test"), failing);
    let err = service_down.run(&SummaryRequest::new(42)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert_eq!(err.user_message(), "AI service returned an error (status 503)");

    // The same service keeps answering; nothing is cached between requests.
    let again = service_down.get_summary(42).await;
    assert!(!again.is_success());

    let working = Arc::new(MockTransport::completion("Summary text"));
    let service_up = service(dir.path(), Some("csk-test"), working.clone());
    assert!(service_up.get_summary(42).await.is_success());
    assert!(service_up.get_summary(42).await.is_success());
    assert_eq!(working.call_count(), 2);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        "a@b.com",
        "Paper One",
        &text_pdf(&["We study the effect of caffeine on sleep."]),
    );
    let transport = Arc::new(MockTransport::completion("Summary text"));
    let service = Arc::new(service(dir.path(), Some("csk-test"), transport.clone()));

    let handles: Vec<_> = [42_u64, 43, 42, 999]
        .into_iter()
        .map(|id| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.get_summary(id).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_success() {
            successes += 1;
        }
    }
    assert_eq!(successes, 2);
    assert_eq!(transport.call_count(), 2);
}
