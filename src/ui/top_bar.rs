//! Top bar UI: app title, data status and view controls.

use crate::map_view::MapView;
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, map: &mut MapView) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // App title
                ui.label(
                    RichText::new("World Map")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                // Status text
                ui.label(
                    RichText::new(map.world().label())
                        .size(13.0)
                        .color(Color32::GRAY),
                );

                ui.separator();

                if ui
                    .button("Reset view")
                    .on_hover_text("Double-click the map to do the same")
                    .clicked()
                {
                    map.reset_view();
                }
            });
        });
}
