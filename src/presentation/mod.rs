// Presentation layer - View contracts and HTTP surface
pub mod app_state;
pub mod handlers;
pub mod list_view;
pub mod map_view;
pub mod router;
