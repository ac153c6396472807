// HTTP request handlers
use crate::domain::dashboard::{DashboardSnapshot, Phase};
use crate::domain::selection::{CategoryOption, FilterSelection};
use crate::presentation::app_state::AppState;
use crate::presentation::list_view::ListView;
use crate::presentation::map_view::MapView;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SelectionRequest {
    pub category: String,
}

/// Everything a dashboard page needs, rendered from one snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub phase: Phase,
    pub selection: FilterSelection,
    pub categories: Vec<CategoryOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub list: ListView,
    pub map: MapView,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        Self {
            phase: snapshot.phase,
            selection: snapshot.selection,
            categories: FilterSelection::catalogue(),
            error_message: snapshot.error_message.clone(),
            list: ListView::from_snapshot(snapshot),
            map: MapView::from_snapshot(snapshot),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard state
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let snapshot = state.dashboard.snapshot();
    Json(DashboardView::from_snapshot(&snapshot))
}

/// Change the category filter
pub async fn update_selection(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectionRequest>,
) -> Response {
    match state.dashboard.set_selection(&request.category).await {
        Ok(snapshot) => Json(DashboardView::from_snapshot(&snapshot)).into_response(),
        Err(e) => {
            tracing::error!("Error updating selection: {}", e);
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

/// Start a new fetch cycle
pub async fn refresh_dashboard(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.dashboard.refresh().await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::error!("Error refreshing dashboard: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
