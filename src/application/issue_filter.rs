// Filter engine - Derives the visible subset of issues
use crate::domain::issue::Issue;
use crate::domain::selection::FilterSelection;
use std::sync::Arc;

/// Keep the issues matching `selection`, in source order.
pub fn filter_issues(issues: &[Issue], selection: FilterSelection) -> Vec<Issue> {
    issues
        .iter()
        .filter(|issue| selection.matches(issue.issue_type))
        .cloned()
        .collect()
}

/// Memoized filter result keyed on `(issues revision, selection)`.
///
/// The revision is bumped by the owner whenever the issue collection is replaced.
#[derive(Debug, Default)]
pub struct FilterCache {
    key: Option<(u64, FilterSelection)>,
    filtered: Arc<Vec<Issue>>,
    recomputations: u64,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        issues: &Arc<Vec<Issue>>,
        revision: u64,
        selection: FilterSelection,
    ) -> Arc<Vec<Issue>> {
        let key = (revision, selection);
        if self.key != Some(key) {
            self.filtered = match selection {
                // Wildcard shares the source collection as-is
                FilterSelection::All => Arc::clone(issues),
                FilterSelection::Only(_) => Arc::new(filter_issues(issues, selection)),
            };
            self.key = Some(key);
            self.recomputations += 1;
        }
        Arc::clone(&self.filtered)
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
