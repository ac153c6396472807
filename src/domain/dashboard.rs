// Dashboard snapshot domain model
use serde::Serialize;
use std::sync::Arc;

use super::issue::Issue;
use super::selection::FilterSelection;
use super::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Consistent view of the dashboard handed to the list and map renderers.
///
/// `filtered` and `viewport` are always derived from `issues` under `selection`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub phase: Phase,
    pub selection: FilterSelection,
    pub issues: Arc<Vec<Issue>>,
    pub filtered: Arc<Vec<Issue>>,
    pub viewport: Viewport,
    pub error_message: Option<String>,
}
