use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, service_fn};
use pdf_summary::api::handler;
use pdf_summary::core::config::AppConfig;
use pdf_summary::core::records::SsmRecordStore;
use pdf_summary::SummaryService;
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    pdf_summary::setup_logging();

    // Config and clients are built once per cold start and shared read-only.
    let shared = aws_config::from_env().load().await;
    let ssm = aws_sdk_ssm::Client::new(&shared);

    let config = AppConfig::load(&ssm).await.map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    info!(config = ?config, "Loaded configuration");

    let records = Arc::new(SsmRecordStore::new(ssm, config.record_param_prefix.clone()));
    let service = Arc::new(SummaryService::from_config(&config, records).map_err(|e| {
        error!("Failed to initialize summary service: {}", e);
        Error::from(e.to_string())
    })?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let service = Arc::clone(&service);
        async move { handler(&service, event).await }
    }))
    .await
}
