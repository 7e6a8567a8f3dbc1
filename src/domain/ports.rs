use crate::domain::model::{SectorRecord, SessionId, SubmissionPayload, SubmissionValues};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Synchronous string key/value store, shaped like browser-local storage.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn session_key(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

#[async_trait]
pub trait SubmissionApi: Send + Sync {
    async fn fetch_sectors(&self) -> Result<Vec<SectorRecord>>;
    async fn fetch_submission(&self, session_id: &SessionId) -> Result<SubmissionValues>;
    async fn create_submission(&self, payload: &SubmissionPayload) -> Result<SessionId>;
    async fn update_submission(
        &self,
        session_id: &SessionId,
        payload: &SubmissionPayload,
    ) -> Result<()>;
}
