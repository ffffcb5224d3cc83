//! Record lookup: record id → owner key and document title.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_ssm::Client as SsmClient;

use super::models::DocumentLocation;
use super::ssm;
use crate::errors::SummaryError;

/// Storage collaborator used by the pipeline to resolve a record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns `Ok(None)` when no record has this id.
    async fn owner_and_title(&self, record_id: u64)
    -> Result<Option<DocumentLocation>, SummaryError>;
}

/// Records kept as SSM parameters named `<prefix><record_id>`, each holding
/// `{"owner_key": "...", "title": "..."}`.
pub struct SsmRecordStore {
    client: SsmClient,
    prefix: String,
}

impl SsmRecordStore {
    #[must_use]
    pub fn new(client: SsmClient, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl RecordStore for SsmRecordStore {
    async fn owner_and_title(
        &self,
        record_id: u64,
    ) -> Result<Option<DocumentLocation>, SummaryError> {
        let name = ssm::parameter_name(&self.prefix, &record_id.to_string());
        let Some(value) = ssm::get_parameter(&self.client, &name, false).await? else {
            return Ok(None);
        };
        let location: DocumentLocation = serde_json::from_str(&value)
            .map_err(|e| SummaryError::Storage(format!("record {record_id} parse: {e}")))?;
        Ok(Some(location))
    }
}

/// Fixed set of records, for tests and local runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordStore {
    records: HashMap<u64, DocumentLocation>,
}

impl InMemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_record(
        mut self,
        record_id: u64,
        owner_key: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        self.records
            .insert(record_id, DocumentLocation::new(owner_key, title));
        self
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn owner_and_title(
        &self,
        record_id: u64,
    ) -> Result<Option<DocumentLocation>, SummaryError> {
        Ok(self.records.get(&record_id).cloned())
    }
}
