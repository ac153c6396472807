// Application layer - Use cases and ports
pub mod dashboard_coordinator;
pub mod dashboard_state;
pub mod issue_filter;
pub mod issue_repository;
pub mod viewport_deriver;
