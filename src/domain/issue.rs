// Issue domain model
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::selection::InvalidSelection;

/// Closed set of civic issue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Road,
    Water,
    Garbage,
    Electricity,
    Other,
}

impl IssueType {
    pub const ALL: [IssueType; 5] = [
        IssueType::Road,
        IssueType::Water,
        IssueType::Garbage,
        IssueType::Electricity,
        IssueType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Road => "road",
            IssueType::Water => "water",
            IssueType::Garbage => "garbage",
            IssueType::Electricity => "electricity",
            IssueType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssueType::Road => "Road Issue",
            IssueType::Water => "Water Supply",
            IssueType::Garbage => "Garbage Collection",
            IssueType::Electricity => "Electricity",
            IssueType::Other => "Other",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = InvalidSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidSelection(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A reported civic problem, exactly as delivered by the issue source.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: String,
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub location: Location,
    pub status: String,
    pub reported_at: DateTime<Utc>,
}

impl Issue {
    /// Display form of `reported_at`, e.g. "Mar 5, 2024".
    ///
    /// Rendered in UTC, not the viewer's local zone, so timestamps close to
    /// midnight may show the neighbouring day.
    pub fn reported_on(&self) -> String {
        self.reported_at.format("%b %-d, %Y").to_string()
    }
}
