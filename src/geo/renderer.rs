//! Map rendering: land polygons and pins onto a drawing surface.

use super::{DrawSurface, LandLayer, MercatorProjection, Ring};
use crate::data::Pin;
use crate::state::ViewState;
use eframe::egui::{Color32, Pos2};

/// Colors and sizes used for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapStyle {
    pub land_color: Color32,
    pub pin_color: Color32,
    pub pin_radius: f32,
    pub show_labels: bool,
}

/// What a render pass drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub polygons: usize,
    pub pins: usize,
    pub skipped_pins: usize,
}

/// Clears `surface` and redraws the land layer and pins for `view`.
///
/// Both layers share one projection so pins line up with the land outlines.
/// A view without area leaves the surface empty.
pub fn render_map(
    surface: &mut dyn DrawSurface,
    view: &ViewState,
    land: &LandLayer,
    pins: &[Pin],
    style: &MapStyle,
) -> RenderStats {
    surface.clear();

    let mut stats = RenderStats::default();
    if !view.has_area() {
        return stats;
    }

    let projection = MercatorProjection::from_view(view);

    for feature in &land.features {
        for polygon in &feature.polygons {
            let exterior = project_ring(&projection, &polygon.exterior);
            let holes = polygon
                .holes
                .iter()
                .map(|ring| project_ring(&projection, ring))
                .collect();
            surface.fill_polygon(exterior, holes, style.land_color);
            stats.polygons += 1;
        }
    }

    for pin in pins {
        if !pin.is_valid() {
            log::warn!("Skipping pin {:?} with invalid coordinates", pin.label);
            stats.skipped_pins += 1;
            continue;
        }

        let pos = projection.geo_to_screen(pin.coord());
        let label = style.show_labels.then_some(pin.label);
        surface.fill_circle(pos, style.pin_radius, style.pin_color, label);
        stats.pins += 1;
    }

    stats
}

fn project_ring(projection: &MercatorProjection, ring: &Ring) -> Vec<Pos2> {
    ring.iter().map(|c| projection.geo_to_screen(*c)).collect()
}
