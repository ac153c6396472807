// List presentation contract
use crate::domain::dashboard::{DashboardSnapshot, Phase};
use crate::domain::issue::{Issue, IssueType};
use serde::Serialize;

pub const EMPTY_MESSAGE: &str = "No issues found";
pub const NO_IMAGE: &str = "No Image";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ListView {
    Loading,
    Error { message: String },
    Empty { message: String },
    Rows { rows: Vec<IssueRow> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImageCell {
    Url { url: String },
    Placeholder { text: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRow {
    pub id: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    pub image: ImageCell,
    pub status: String,
    pub reported_on: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        let image = match &issue.image_url {
            Some(url) => ImageCell::Url { url: url.clone() },
            None => ImageCell::Placeholder { text: NO_IMAGE },
        };

        Self {
            id: issue.id.clone(),
            issue_type: issue.issue_type,
            title: issue.title.clone(),
            description: issue.description.clone(),
            image,
            status: issue.status.clone(),
            reported_on: issue.reported_on(),
        }
    }
}

impl ListView {
    /// Loading wins over error, error over empty, empty over rows.
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        match snapshot.phase {
            Phase::Idle | Phase::Loading => ListView::Loading,
            Phase::Error => ListView::Error {
                message: snapshot.error_message.clone().unwrap_or_default(),
            },
            Phase::Success if snapshot.filtered.is_empty() => ListView::Empty {
                message: EMPTY_MESSAGE.to_string(),
            },
            Phase::Success => ListView::Rows {
                rows: snapshot.filtered.iter().map(IssueRow::from).collect(),
            },
        }
    }
}
