//! Geographic layer system for the world map.
//!
//! This module provides loading of land boundaries from GeoJSON, the
//! Mercator projection, and rendering of land and pins into a scene.

mod layer;
mod projection;
mod renderer;
mod scene;

pub use layer::{LandLayer, Ring};
pub use projection::MercatorProjection;
pub use renderer::{render_map, MapStyle};
pub use scene::{DrawSurface, SceneBuffer};
