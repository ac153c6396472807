// Dashboard state machine - Fetch lifecycle, selection and derived views
use crate::application::issue_filter::FilterCache;
use crate::application::issue_repository::FetchError;
use crate::application::viewport_deriver::derive_viewport;
use crate::domain::dashboard::{DashboardSnapshot, Phase};
use crate::domain::issue::Issue;
use crate::domain::selection::FilterSelection;
use crate::domain::viewport::ViewportPolicy;
use std::sync::Arc;

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load issues.";

/// Identifies one fetch cycle. Only the latest issued id may complete.
pub type RequestId = u64;

/// Synchronous core of the dashboard: no IO, driven by the coordinator task.
#[derive(Debug)]
pub struct DashboardState {
    policy: ViewportPolicy,
    phase: Phase,
    selection: FilterSelection,
    issues: Arc<Vec<Issue>>,
    revision: u64,
    latest_request: RequestId,
    error_message: Option<String>,
    filter_cache: FilterCache,
}

impl DashboardState {
    pub fn new(policy: ViewportPolicy) -> Self {
        Self {
            policy,
            phase: Phase::Idle,
            selection: FilterSelection::All,
            issues: Arc::new(Vec::new()),
            revision: 0,
            latest_request: 0,
            error_message: None,
            filter_cache: FilterCache::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> FilterSelection {
        self.selection
    }

    /// Enter `Loading` and issue a new request id, superseding any in-flight one.
    ///
    /// Issues from the previous successful fetch stay visible until this one completes.
    pub fn begin_fetch(&mut self) -> RequestId {
        self.latest_request += 1;
        self.phase = Phase::Loading;
        self.error_message = None;
        self.latest_request
    }

    /// Apply a fetch result. Returns `false` when the completion is stale and was dropped.
    pub fn complete_fetch(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<Issue>, FetchError>,
    ) -> bool {
        if request_id != self.latest_request || self.phase != Phase::Loading {
            tracing::debug!(
                request_id,
                latest = self.latest_request,
                "Discarding stale fetch completion"
            );
            return false;
        }

        match result {
            Ok(issues) => {
                tracing::debug!(request_id, count = issues.len(), "Fetched issues");
                self.replace_issues(issues);
                self.phase = Phase::Success;
            }
            Err(e) => {
                tracing::error!(request_id, kind = e.kind(), "Error fetching issues: {}", e);
                if !self.issues.is_empty() {
                    self.replace_issues(Vec::new());
                }
                self.phase = Phase::Error;
                self.error_message = Some(LOAD_FAILURE_MESSAGE.to_string());
            }
        }

        true
    }

    /// Parse and apply a category. Unknown values leave the selection unchanged.
    ///
    /// Returns whether the selection actually changed.
    pub fn set_selection(&mut self, raw: &str) -> bool {
        match raw.parse::<FilterSelection>() {
            Ok(selection) => {
                let changed = selection != self.selection;
                self.selection = selection;
                changed
            }
            Err(e) => {
                tracing::warn!("Ignoring selection change: {}", e);
                false
            }
        }
    }

    pub fn snapshot(&mut self) -> DashboardSnapshot {
        let filtered = self
            .filter_cache
            .get(&self.issues, self.revision, self.selection);
        let viewport = derive_viewport(&filtered, &self.policy);

        DashboardSnapshot {
            phase: self.phase,
            selection: self.selection,
            issues: Arc::clone(&self.issues),
            filtered,
            viewport,
            error_message: self.error_message.clone(),
        }
    }

    pub fn filter_recomputations(&self) -> u64 {
        self.filter_cache.recomputations()
    }

    fn replace_issues(&mut self, issues: Vec<Issue>) {
        self.issues = Arc::new(issues);
        self.revision += 1;
    }
}
