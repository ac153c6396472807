// Map viewport domain model
use serde::Serialize;

use super::issue::Location;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Location,
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center: Location, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

/// Fallback and focus parameters for viewport derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPolicy {
    pub default_center: Location,
    pub overview_zoom: u8,
    pub focused_zoom: u8,
}

impl ViewportPolicy {
    pub fn overview(&self) -> Viewport {
        Viewport::new(self.default_center, self.overview_zoom)
    }
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self {
            default_center: Location::new(20.5937, 78.9629),
            overview_zoom: 5,
            focused_zoom: 12,
        }
    }
}
