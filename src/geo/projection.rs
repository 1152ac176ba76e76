//! Map projection and coordinate transformation.
//!
//! Handles converting between geographic coordinates (lat/lon) and
//! screen coordinates for rendering on the canvas.

use crate::state::ViewState;
use eframe::egui::Pos2;
use geo_types::Coord;
use std::f64::consts::FRAC_PI_4;

/// Latitude of the projection center in degrees.
pub const CENTER_LAT: f64 = 42.0;

/// Longitude of the projection center in degrees.
pub const CENTER_LON: f64 = 0.0;

/// Mercator stretches to infinity at the poles; clamp to the usual web limit.
const MAX_LAT: f64 = 85.051_128_779_806_59;

/// Mercator projection for converting geographic to screen coordinates.
///
/// Built once per render pass from a [`ViewState`] so that every layer in
/// the pass is placed with the same transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorProjection {
    /// Pixels per radian of longitude
    pub scale: f64,
    /// Screen position the projection center maps to
    pub origin: Pos2,
    /// Mercator y of the center latitude, precomputed
    center_y: f64,
}

impl MercatorProjection {
    /// Creates a projection for the given scale and origin.
    pub fn new(scale: f64, origin: Pos2) -> Self {
        Self {
            scale,
            origin,
            center_y: mercator_y(CENTER_LAT),
        }
    }

    /// Creates the projection for the current view.
    pub fn from_view(view: &ViewState) -> Self {
        Self::new(f64::from(view.scale), view.origin())
    }

    /// Converts geographic coordinates (lon, lat) to screen position.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let x = (coord.x - CENTER_LON).to_radians() * self.scale;
        let y = (mercator_y(coord.y) - self.center_y) * self.scale;

        Pos2::new(
            self.origin.x + x as f32,
            // Screen y grows downward
            self.origin.y - y as f32,
        )
    }

    /// Converts screen position to geographic coordinates (lon, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let x = f64::from(pos.x - self.origin.x) / self.scale;
        let y = self.center_y - f64::from(pos.y - self.origin.y) / self.scale;

        Coord {
            x: CENTER_LON + x.to_degrees(),
            y: (2.0 * y.exp().atan() - 2.0 * FRAC_PI_4).to_degrees(),
        }
    }
}

fn mercator_y(lat: f64) -> f64 {
    let phi = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();
    (FRAC_PI_4 + phi / 2.0).tan().ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> MercatorProjection {
        MercatorProjection::new(186.0, Pos2::new(544.0, 229.0))
    }

    #[test]
    fn test_center_maps_to_origin() {
        let pos = projection().geo_to_screen(Coord {
            x: CENTER_LON,
            y: CENTER_LAT,
        });
        assert!((pos.x - 544.0).abs() < 1e-4);
        assert!((pos.y - 229.0).abs() < 1e-4);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let coord = Coord { x: -74.006, y: 40.7128 };
        let a = projection().geo_to_screen(coord);
        let b = projection().geo_to_screen(coord);
        assert_eq!(a, b);
    }

    #[test]
    fn test_orientation() {
        let p = projection();
        let center = p.geo_to_screen(Coord { x: 0.0, y: 42.0 });
        let east = p.geo_to_screen(Coord { x: 10.0, y: 42.0 });
        let north = p.geo_to_screen(Coord { x: 0.0, y: 52.0 });
        assert!(east.x > center.x);
        assert!((east.y - center.y).abs() < 1e-4);
        assert!(north.y < center.y);

        // One radian of longitude spans `scale` pixels
        let antimeridian = p.geo_to_screen(Coord { x: 180.0, y: 42.0 });
        let expected = 544.0 + 186.0 * std::f32::consts::PI;
        assert!((antimeridian.x - expected).abs() < 1e-2);
    }

    #[test]
    fn test_poles_stay_finite() {
        let p = projection();
        let north = p.geo_to_screen(Coord { x: 0.0, y: 90.0 });
        let south = p.geo_to_screen(Coord { x: 0.0, y: -90.0 });
        assert!(north.y.is_finite() && south.y.is_finite());
        assert!(north.y < south.y);
    }

    #[test]
    fn test_screen_to_geo_inverts() {
        let p = projection();
        let coord = Coord { x: 139.6503, y: 35.6762 };
        let back = p.screen_to_geo(p.geo_to_screen(coord));
        assert!((back.x - coord.x).abs() < 1e-3);
        assert!((back.y - coord.y).abs() < 1e-3);
    }
}
