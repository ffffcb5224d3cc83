//! API Gateway response builders.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

/// Returns a response with `body` serialized as JSON.
#[must_use]
pub fn json_response<T: Serialize>(status_code: u16, body: &T) -> Value {
    match serde_json::to_string(body) {
        Ok(body) => json!({
            "statusCode": status_code,
            "headers": { "Content-Type": "application/json" },
            "body": body
        }),
        Err(e) => {
            error!("Failed to serialize response body: {}", e);
            err_response(500, "Internal error")
        }
    }
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "error": message }).to_string()
    })
}
