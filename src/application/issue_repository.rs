// Repository trait for issue data access
use crate::domain::issue::Issue;
use async_trait::async_trait;

/// Why a fetch of the issue collection failed.
///
/// `Transport` and `Status` are both transport-level failures; `Decode` means the
/// remote answered but the payload did not match the issue shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("issue source unreachable: {0}")]
    Transport(String),
    #[error("issue source responded with status {0}")]
    Status(u16),
    #[error("issue payload could not be decoded: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Fetch the full issue collection in server order.
    ///
    /// One network round trip per call; no caching, no retry.
    async fn fetch_issues(&self) -> Result<Vec<Issue>, FetchError>;
}
