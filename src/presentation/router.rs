// Route table for the dashboard service
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, health_check, refresh_dashboard, update_selection,
};
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/selection", put(update_selection))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
