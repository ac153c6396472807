// Filter selection domain model
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::issue::IssueType;

const ALL_VALUE: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown issue category: {0:?}")]
pub struct InvalidSelection(pub String);

/// The active category filter. `All` is the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterSelection {
    #[default]
    All,
    Only(IssueType),
}

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl FilterSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterSelection::All => ALL_VALUE,
            FilterSelection::Only(t) => t.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterSelection::All => "All Issues",
            FilterSelection::Only(t) => t.label(),
        }
    }

    pub fn matches(&self, issue_type: IssueType) -> bool {
        match self {
            FilterSelection::All => true,
            FilterSelection::Only(t) => *t == issue_type,
        }
    }

    /// Selector entries, wildcard first.
    pub fn catalogue() -> Vec<CategoryOption> {
        std::iter::once(FilterSelection::All)
            .chain(IssueType::ALL.into_iter().map(FilterSelection::Only))
            .map(|s| CategoryOption {
                value: s.as_str(),
                label: s.label(),
            })
            .collect()
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterSelection {
    type Err = InvalidSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_VALUE {
            return Ok(FilterSelection::All);
        }
        s.parse::<IssueType>().map(FilterSelection::Only)
    }
}

impl Serialize for FilterSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
