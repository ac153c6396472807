// Viewport deriver - Map center and zoom for the filtered issues
use crate::domain::issue::Issue;
use crate::domain::viewport::{Viewport, ViewportPolicy};

/// Center on the first filtered issue at focused zoom, or fall back to the overview.
///
/// Does not frame every marker; issues spread over a wide area may fall outside
/// the focused view.
pub fn derive_viewport(filtered: &[Issue], policy: &ViewportPolicy) -> Viewport {
    match filtered.first() {
        Some(first) => Viewport::new(first.location, policy.focused_zoom),
        None => policy.overview(),
    }
}
