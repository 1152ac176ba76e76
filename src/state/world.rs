//! Load state of the world land dataset.

use crate::geo::LandLayer;
use std::sync::Arc;

/// Where the world dataset is in its one-shot load.
#[derive(Debug, Clone, Default)]
pub enum WorldData {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Parsed and cached for the lifetime of the view
    Loaded(Arc<LandLayer>),
    /// Fetch or parse failed; holds a human-readable reason
    Failed(String),
}

impl WorldData {
    pub fn layer(&self) -> Option<&Arc<LandLayer>> {
        match self {
            WorldData::Loaded(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WorldData::Loading)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            WorldData::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Short status text for the UI.
    pub fn label(&self) -> &'static str {
        match self {
            WorldData::Idle => "Waiting",
            WorldData::Loading => "Loading map data...",
            WorldData::Loaded(_) => "Ready",
            WorldData::Failed(_) => "Map data unavailable",
        }
    }
}
