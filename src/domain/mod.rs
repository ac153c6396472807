// Domain layer - Core business models
pub mod dashboard;
pub mod issue;
pub mod selection;
pub mod viewport;
