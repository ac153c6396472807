// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_issue_repository;
pub mod issue_mapper;
