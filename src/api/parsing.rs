//! Pulling the route and record id out of API Gateway payloads (REST v1 and
//! HTTP v2 shapes).

use serde_json::Value;

pub const SUMMARY_ROUTE: &str = "get_ai_summary";

/// Request path, from `rawPath` (v2) or `path` (v1).
#[must_use]
pub fn request_path(payload: &Value) -> Option<&str> {
    payload
        .get("rawPath")
        .and_then(Value::as_str)
        .or_else(|| payload.get("path").and_then(Value::as_str))
}

/// HTTP method, upper-cased. Defaults to `GET` when the payload has none.
#[must_use]
pub fn request_method(payload: &Value) -> String {
    payload
        .get("httpMethod")
        .and_then(Value::as_str)
        .or_else(|| {
            payload
                .get("requestContext")
                .and_then(|c| c.get("http"))
                .and_then(|h| h.get("method"))
                .and_then(Value::as_str)
        })
        .unwrap_or("GET")
        .to_ascii_uppercase()
}

/// Raw record id segment: `pathParameters.record_id` if mapped, otherwise the
/// segment after `/get_ai_summary/`. `None` when this is not the summary route.
#[must_use]
pub fn record_id_segment(payload: &Value) -> Option<String> {
    if let Some(id) = payload
        .get("pathParameters")
        .and_then(|p| p.get("record_id"))
        .and_then(Value::as_str)
    {
        return Some(id.to_string());
    }

    let path = request_path(payload)?;
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let id = segments.next()?;
    match segments.next() {
        Some(SUMMARY_ROUTE) => Some(id.to_string()),
        _ => None,
    }
}

/// Parses a record id; only plain non-negative integers are accepted.
#[must_use]
pub fn parse_record_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
