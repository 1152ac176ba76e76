//! Map display settings.
//!
//! On the web, settings are read from localStorage so they can be tweaked
//! without a rebuild.

use super::gesture::DEFAULT_ZOOM_SPEED;
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

/// Path the world dataset is fetched from.
#[cfg(target_arch = "wasm32")]
pub const DEFAULT_DATA_PATH: &str = "/world.geo.json";
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_DATA_PATH: &str = "assets/world.geo.json";

/// Largest accepted zoom speed; keeps the zoom-out factor positive.
const MAX_ZOOM_SPEED: f32 = 0.9;

/// Errors raised while reading settings.
#[derive(Debug, Clone)]
pub enum SettingsError {
    /// The settings document was not valid JSON for [`MapSettings`].
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Parse(msg) => write!(f, "Invalid map settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Appearance and behavior settings for the map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Location of the GeoJSON world dataset
    pub data_path: String,
    /// Fractional scale change per wheel event
    pub zoom_speed: f32,
    /// Land fill color (RGB)
    pub land_color: [u8; 3],
    /// Pin fill color (RGB)
    pub pin_color: [u8; 3],
    /// Pin circle radius in pixels
    pub pin_radius: f32,
    /// Draw pin labels next to their markers
    pub show_labels: bool,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            zoom_speed: DEFAULT_ZOOM_SPEED,
            land_color: [204, 204, 204], // #ccc
            pin_color: [220, 60, 60],
            pin_radius: 4.0,
            show_labels: true,
        }
    }
}

impl MapSettings {
    /// localStorage key for persisted settings.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "worldmap_settings";

    /// Parses settings from JSON. Missing fields take their defaults.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        Ok(settings.sanitized())
    }

    /// Clamps values into their usable ranges.
    pub fn sanitized(mut self) -> Self {
        if !self.zoom_speed.is_finite() || self.zoom_speed <= 0.0 {
            self.zoom_speed = DEFAULT_ZOOM_SPEED;
        }
        self.zoom_speed = self.zoom_speed.min(MAX_ZOOM_SPEED);
        if !self.pin_radius.is_finite() || self.pin_radius < 0.0 {
            self.pin_radius = Self::default().pin_radius;
        }
        self
    }

    pub fn land_color32(&self) -> Color32 {
        let [r, g, b] = self.land_color;
        Color32::from_rgb(r, g, b)
    }

    pub fn pin_color32(&self) -> Color32 {
        let [r, g, b] = self.pin_color;
        Color32::from_rgb(r, g, b)
    }

    /// Load settings from localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Self::default(),
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        let json = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded map settings from localStorage");
                settings
            }
            Err(e) => {
                log::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Native builds have no settings store; defaults apply.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
