#![warn(clippy::all)]

//! World Map - an interactive world map viewer.
//!
//! Draws land boundaries from a GeoJSON dataset with labeled pins on top,
//! and supports drag-to-pan and wheel zoom with a live readout of the view
//! transform. Runs natively and in the browser.

mod data;
mod geo;
mod map_view;
mod state;
mod ui;
mod world_fetch;

use eframe::egui;
use map_view::MapView;
use state::MapSettings;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 836.0]),
        ..Default::default()
    };

    eframe::run_native(
        "World Map",
        native_options,
        Box::new(|cc| Ok(Box::new(WorldMapApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(WorldMapApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application: hosts the map view.
pub struct WorldMapApp {
    map: MapView,
}

impl WorldMapApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = MapSettings::load();
        log::info!(
            "Starting world map (data: {}, zoom speed: {})",
            settings.data_path,
            settings.zoom_speed
        );

        let mut map = MapView::new(settings, world_fetch::default_source());
        map.set_context(cc.egui_ctx.clone());

        Self { map }
    }
}

impl eframe::App for WorldMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.map.poll();

        ui::render_top_bar(ctx, &mut self.map);
        ui::render_canvas(ctx, &mut self.map);
    }
}
