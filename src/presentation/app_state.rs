// Application state for HTTP handlers
use crate::application::dashboard_coordinator::DashboardHandle;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardHandle,
}
