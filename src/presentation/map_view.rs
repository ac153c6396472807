// Map presentation contract
use crate::domain::dashboard::{DashboardSnapshot, Phase};
use crate::domain::issue::Location;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub position: Location,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub loading: bool,
    pub center: Location,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapView {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        let markers = snapshot
            .filtered
            .iter()
            .map(|issue| Marker {
                id: issue.id.clone(),
                position: issue.location,
                label: issue.issue_type.to_string(),
            })
            .collect();

        Self {
            loading: matches!(snapshot.phase, Phase::Idle | Phase::Loading),
            center: snapshot.viewport.center,
            zoom: snapshot.viewport.zoom,
            markers,
        }
    }
}
