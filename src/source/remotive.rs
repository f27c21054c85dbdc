use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::job::{JobRecord, JobsEnvelope};
use crate::source::JobSource;

pub const DEFAULT_URL: &str = "https://remotive.com/api/remote-jobs";

const USER_AGENT: &str = concat!("remoteboard/", env!("CARGO_PKG_VERSION"));

/// Remotive public job feed. One unauthenticated GET returns every job.
pub struct RemotiveSource {
    client: reqwest::Client,
    url: String,
}

impl RemotiveSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl JobSource for RemotiveSource {
    fn name(&self) -> &str {
        "remotive"
    }

    async fn fetch_all(&self) -> Result<Vec<JobRecord>, AppError> {
        let resp = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Fetch(format!("Request to {} timed out", self.url))
                } else {
                    AppError::Fetch(format!("Request to {} failed: {e}", self.url))
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!(
                "{} returned {status}",
                self.url
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to read response body: {e}")))?;

        parse_jobs(&body)
    }
}

/// Decode the `{ "jobs": [...] }` envelope.
fn parse_jobs(body: &[u8]) -> Result<Vec<JobRecord>, AppError> {
    let envelope: JobsEnvelope = serde_json::from_slice(body)
        .map_err(|e| AppError::Fetch(format!("Failed to parse response: {e}")))?;
    Ok(envelope.jobs)
}
