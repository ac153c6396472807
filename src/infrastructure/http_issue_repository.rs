// HTTP issue repository implementation
use crate::application::issue_repository::{FetchError, IssueRepository};
use crate::domain::issue::Issue;
use crate::infrastructure::issue_mapper::issues_from_json;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpIssueRepository {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIssueRepository {
    pub fn new(endpoint: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl IssueRepository for HttpIssueRepository {
    async fn fetch_issues(&self) -> Result<Vec<Issue>, FetchError> {
        tracing::debug!("Requesting issues from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        issues_from_json(&body)
    }
}
