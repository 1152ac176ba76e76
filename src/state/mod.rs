//! Map view state.
//!
//! This module contains the plain state types behind the map view: the view
//! transform, drag gestures, the dataset load state and user settings.

mod gesture;
mod settings;
mod view;
mod world;

pub use gesture::{zoom_factor, DragState, InputEvent};
pub use settings::MapSettings;
pub use view::ViewState;
pub use world::WorldData;
