//! Central canvas UI: the map area, its input and the view readout.

use crate::geo::MercatorProjection;
use crate::map_view::MapView;
use crate::state::InputEvent;
use eframe::egui::{self, Color32, Pos2, Rect, RichText, Sense, Vec2};

const BACKGROUND: Color32 = Color32::from_rgb(20, 28, 45);
const READOUT_COLOR: Color32 = Color32::from_rgb(200, 200, 220);

/// Render the map canvas and feed it this frame's input.
pub fn render_canvas(ctx: &egui::Context, map: &mut MapView) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let available_size = ui.available_size();

            // Allocate the full available space for the canvas
            let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;

            map.set_container_size(rect.size());
            handle_canvas_interaction(ui, &response, rect, map);

            painter.rect_filled(rect, 0.0, BACKGROUND);
            map.scene().paint(&painter, rect);

            let hover = response.hover_pos().map(|pos| pos - rect.min.to_vec2());
            draw_overlay_info(ui, rect, map, hover);
            draw_load_status(ui, rect, map);
        });
}

fn handle_canvas_interaction(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: Rect,
    map: &mut MapView,
) {
    let events = ui.input(|i| i.events.clone());
    for event in &events {
        if let Some(input) = translate_event(event, rect, response.hovered()) {
            map.handle_input(input);
        }
    }

    if response.double_clicked() {
        map.handle_input(InputEvent::DoubleClick);
    }

    if map.is_dragging() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }
}

/// Converts a raw egui event into map input relative to `rect`.
fn translate_event(event: &egui::Event, rect: Rect, hovered: bool) -> Option<InputEvent> {
    let local = |pos: Pos2| pos - rect.min.to_vec2();

    match event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => {
            if !*pressed {
                Some(InputEvent::PointerUp)
            } else if rect.contains(*pos) {
                Some(InputEvent::PointerDown(local(*pos)))
            } else {
                None
            }
        }
        egui::Event::PointerMoved(pos) => {
            if rect.contains(*pos) {
                Some(InputEvent::PointerMove(local(*pos)))
            } else {
                Some(InputEvent::PointerLeave)
            }
        }
        egui::Event::PointerGone => Some(InputEvent::PointerLeave),
        egui::Event::MouseWheel { delta, .. } if hovered => wheel_event(*delta),
        _ => None,
    }
}

/// egui scroll deltas point the way content moves; flip to wheel direction.
fn wheel_event(delta: Vec2) -> Option<InputEvent> {
    (delta.y != 0.0).then_some(InputEvent::Wheel { delta_y: -delta.y })
}

fn draw_overlay_info(ui: &mut egui::Ui, rect: Rect, map: &MapView, hover: Option<Pos2>) {
    let overlay_pos = rect.left_top() + Vec2::new(10.0, 10.0);
    let overlay_rect = Rect::from_min_size(overlay_pos, Vec2::new(260.0, 90.0));
    let view = map.view();

    ui.scope_builder(egui::UiBuilder::new().max_rect(overlay_rect), |ui| {
        ui.vertical(|ui| {
            ui.label(readout(format!("Scale: {:.1}", view.scale)));
            ui.label(readout(format!(
                "Origin: ({:.1}, {:.1})",
                view.origin_x, view.origin_y
            )));

            if let Some(pos) = hover {
                let coord = MercatorProjection::from_view(view).screen_to_geo(pos);
                ui.label(readout(format!("Lon/Lat: {:.2}, {:.2}", coord.x, coord.y)));
            }
        });
    });
}

/// Loading or failure notice in the middle of the map.
fn draw_load_status(ui: &mut egui::Ui, rect: Rect, map: &mut MapView) {
    let world = map.world();
    if !world.is_loading() && world.failure().is_none() {
        return;
    }

    let status_rect = Rect::from_center_size(rect.center(), Vec2::new(320.0, 80.0));
    let mut reload = false;
    ui.scope_builder(egui::UiBuilder::new().max_rect(status_rect), |ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(world.label()).size(14.0).color(READOUT_COLOR));
            if let Some(reason) = world.failure() {
                ui.label(RichText::new(reason).size(11.0).color(Color32::GRAY));
                reload = ui.button("Reload").clicked();
            }
        });
    });

    if reload {
        log::info!("Reloading world data");
        map.reload();
    }
}

fn readout(text: String) -> RichText {
    RichText::new(text).monospace().size(12.0).color(READOUT_COLOR)
}
