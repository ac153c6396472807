// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use crate::application::dashboard_coordinator::DashboardCoordinator;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_issue_repository::HttpIssueRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpIssueRepository::new(
        config.issues.endpoint.clone(),
        config.issues.timeout(),
    )?);

    // Start the coordinator (application layer) and trigger the initial fetch
    let dashboard = DashboardCoordinator::spawn(repository, config.map.viewport_policy());
    dashboard.activate().await?;

    // Build router (presentation layer)
    let state = Arc::new(AppState { dashboard });
    let app = router(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!("Starting civic issues dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
