//! UI modules for the world map application.
//!
//! The UI is split into two areas:
//! - Top bar: title, data status and view controls
//! - Central canvas: the map itself

mod canvas;
mod top_bar;

pub use canvas::render_canvas;
pub use top_bar::render_top_bar;
