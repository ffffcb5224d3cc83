//! API Lambda handler for `GET /get_ai_summary/{record_id}`.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{info, warn};

use super::{helpers, parsing};
use crate::core::models::{SummaryRequest, SummaryResult};
use crate::features::summarize::SummaryService;

/// Lambda handler for the API entrypoint.
///
/// Every outcome, including pipeline failures, is returned as an HTTP
/// response; the `Err` side is never used.
///
/// # Errors
///
/// Never returns an error; the signature is what `lambda_runtime` expects.
#[tracing::instrument(level = "info", skip(service, event), fields(aws_request_id = %event.context.request_id))]
pub async fn function_handler(
    service: &SummaryService,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_request(service, &event.payload).await)
}

/// Routes one API Gateway payload and builds the response.
pub async fn handle_request(service: &SummaryService, payload: &Value) -> Value {
    let Some(raw_id) = parsing::record_id_segment(payload) else {
        warn!(path = ?parsing::request_path(payload), "No route for request");
        return helpers::err_response(404, "Not found");
    };

    let method = parsing::request_method(payload);
    if method != "GET" {
        warn!(%method, "Method not allowed");
        return helpers::err_response(405, "Method not allowed");
    }

    let Some(record_id) = parsing::parse_record_id(&raw_id) else {
        warn!(raw_id = %raw_id, "Invalid record id");
        return helpers::err_response(400, "Invalid record id");
    };

    info!(record_id, "Summary requested");
    match service.run(&SummaryRequest::new(record_id)).await {
        Ok(summary) => helpers::json_response(
            200,
            &SummaryResult::success(summary.summary, summary.title),
        ),
        Err(e) => helpers::err_response(e.status_code(), &e.user_message()),
    }
}
