use crate::domain::model::{
    CreatedSubmission, SectorRecord, SessionId, SubmissionPayload, SubmissionValues,
};
use crate::domain::ports::{ConfigProvider, SubmissionApi};
use crate::utils::error::Result;
use crate::utils::validation::parse_http_url;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `SubmissionApi` over the REST endpoints rooted at one base URL.
#[derive(Debug, Clone)]
pub struct HttpSubmissionApi {
    client: Client,
    base_url: Url,
}

impl HttpSubmissionApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_http_url("api.endpoint", base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(config.api_endpoint(), config.request_timeout())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path to extend
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait::async_trait]
impl SubmissionApi for HttpSubmissionApi {
    async fn fetch_sectors(&self) -> Result<Vec<SectorRecord>> {
        let url = self.endpoint(&["sectors"]);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let records = response.error_for_status()?.json().await?;
        Ok(records)
    }

    async fn fetch_submission(&self, session_id: &SessionId) -> Result<SubmissionValues> {
        let url = self.endpoint(&["submission", session_id.as_str()]);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let values = response.error_for_status()?.json().await?;
        Ok(values)
    }

    async fn create_submission(&self, payload: &SubmissionPayload) -> Result<SessionId> {
        let url = self.endpoint(&["submission", "0"]);
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(payload).send().await?;
        let created: CreatedSubmission = response.error_for_status()?.json().await?;
        Ok(created.session_id)
    }

    async fn update_submission(
        &self,
        session_id: &SessionId,
        payload: &SubmissionPayload,
    ) -> Result<()> {
        let url = self.endpoint(&["submission", session_id.as_str()]);
        tracing::debug!("PUT {}", url);

        self.client
            .put(url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
