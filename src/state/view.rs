//! View transform state (container size, scale, origin) and breakpoint sizing.

use eframe::egui::{Pos2, Vec2};

/// Smallest scale a view may hold. Keeps the projection invertible for
/// degenerate containers and long zoom-out sequences.
pub const MIN_SCALE: f32 = 1e-3;

/// Width-based layout tier used to pick the initial scale and origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Containers at least this wide use this tier
    pub min_width: f32,
    /// Scale as a fraction of container height
    pub height_ratio: f32,
    /// Upper bound on scale as a fraction of container width
    pub width_ratio: f32,
    /// Origin offset from the container center, in pixels
    pub origin_shift: Vec2,
}

/// Tiers ordered from widest to narrowest; the last one matches everything.
pub const BREAKPOINTS: [Breakpoint; 3] = [
    Breakpoint {
        min_width: 1200.0,
        height_ratio: 0.2325,
        width_ratio: 0.2,
        origin_shift: Vec2::new(-56.0, -171.0),
    },
    Breakpoint {
        min_width: 768.0,
        height_ratio: 1.0 / 4.25,
        width_ratio: 0.2,
        origin_shift: Vec2::new(-32.0, -120.0),
    },
    Breakpoint {
        min_width: 0.0,
        height_ratio: 1.0 / 4.25,
        width_ratio: 1.0 / 6.5,
        origin_shift: Vec2::new(0.0, -60.0),
    },
];

impl Breakpoint {
    /// Returns the tier for a container width.
    pub fn for_width(width: f32) -> &'static Breakpoint {
        BREAKPOINTS
            .iter()
            .find(|bp| width >= bp.min_width)
            .unwrap_or(&BREAKPOINTS[BREAKPOINTS.len() - 1])
    }
}

/// Current view of the map: drawing surface size plus projection transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Drawing surface width in pixels
    pub width: f32,
    /// Drawing surface height in pixels
    pub height: f32,
    /// Projection scale factor (pixels per radian)
    pub scale: f32,
    /// Screen x of the projection center
    pub origin_x: f32,
    /// Screen y of the projection center
    pub origin_y: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::fit(Vec2::ZERO)
    }
}

impl ViewState {
    /// Builds the initial view for a container size using [`BREAKPOINTS`].
    ///
    /// A container with no area yields a zeroed view with the minimum scale.
    pub fn fit(size: Vec2) -> Self {
        let width = size.x.max(0.0);
        let height = size.y.max(0.0);

        if width == 0.0 || height == 0.0 {
            return Self {
                width,
                height,
                scale: MIN_SCALE,
                origin_x: 0.0,
                origin_y: 0.0,
            };
        }

        let bp = Breakpoint::for_width(width);
        let scale = (height * bp.height_ratio).min(width * bp.width_ratio);

        Self {
            width,
            height,
            scale: scale.max(MIN_SCALE),
            origin_x: width / 2.0 + bp.origin_shift.x,
            origin_y: height / 2.0 + bp.origin_shift.y,
        }
    }

    pub fn origin(&self) -> Pos2 {
        Pos2::new(self.origin_x, self.origin_y)
    }

    pub fn center(&self) -> Pos2 {
        Pos2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether there is any area to draw into.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Moves the origin by a pixel delta. Unbounded.
    pub fn pan(&mut self, delta: Vec2) {
        self.origin_x += delta.x;
        self.origin_y += delta.y;
    }

    /// Multiplies the scale by `factor` while keeping the container center fixed.
    ///
    /// The origin shift is computed from the pre-zoom origin.
    pub fn zoom_about_center(&mut self, factor: f32) {
        let center = self.center();
        let dx = (center.x - self.origin_x) * (factor - 1.0);
        let dy = (center.y - self.origin_y) * (factor - 1.0);

        self.pan(Vec2::new(-dx, -dy));
        self.scale = (self.scale * factor).max(MIN_SCALE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::MercatorProjection;

    #[test]
    fn test_fit_wide_container() {
        let view = ViewState::fit(Vec2::new(1200.0, 800.0));
        assert!((view.scale - 186.0).abs() < 1e-3);
        assert_eq!(view.origin(), Pos2::new(544.0, 229.0));
        assert_eq!((view.width, view.height), (1200.0, 800.0));
    }

    #[test]
    fn test_breakpoint_selection() {
        assert_eq!(Breakpoint::for_width(1920.0).min_width, 1200.0);
        assert_eq!(Breakpoint::for_width(1200.0).min_width, 1200.0);
        assert_eq!(Breakpoint::for_width(1199.0).min_width, 768.0);
        assert_eq!(Breakpoint::for_width(320.0).min_width, 0.0);
    }

    #[test]
    fn test_fit_narrow_container_limited_by_width() {
        // Tall phone-like container: width bound wins
        let view = ViewState::fit(Vec2::new(390.0, 844.0));
        assert!((view.scale - 60.0).abs() < 1e-3);
        assert_eq!(view.origin(), Pos2::new(195.0, 362.0));
    }

    #[test]
    fn test_fit_zero_size() {
        let view = ViewState::fit(Vec2::ZERO);
        assert!(!view.has_area());
        assert!(view.scale > 0.0);
        assert_eq!(view.origin(), Pos2::ZERO);

        let view = ViewState::fit(Vec2::new(-5.0, 100.0));
        assert_eq!(view.width, 0.0);
        assert!(!view.has_area());
    }

    #[test]
    fn test_pan_is_linear() {
        let start = ViewState::fit(Vec2::new(1200.0, 800.0));

        let mut stepped = start;
        stepped.pan(Vec2::new(10.0, -5.0));
        stepped.pan(Vec2::new(-3.0, 12.0));

        let mut single = start;
        single.pan(Vec2::new(7.0, 7.0));

        assert_eq!(stepped.origin(), single.origin());
    }

    #[test]
    fn test_drag_scenario() {
        let mut view = ViewState::fit(Vec2::new(1200.0, 800.0));
        view.pan(Vec2::new(10.0, -5.0));
        assert_eq!(view.origin(), Pos2::new(554.0, 224.0));
    }

    #[test]
    fn test_zoom_in_scenario() {
        let mut view = ViewState::fit(Vec2::new(1200.0, 800.0));
        view.zoom_about_center(1.1);
        assert!((view.scale - 204.6).abs() < 1e-3);
        assert!((view.origin_x - 538.4).abs() < 1e-3);
        assert!((view.origin_y - 211.9).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_keeps_center_fixed() {
        let mut view = ViewState::fit(Vec2::new(1200.0, 800.0));
        view.pan(Vec2::new(-140.0, 75.0));
        let center = view.center();
        let under_center = MercatorProjection::from_view(&view).screen_to_geo(center);

        for factor in [1.1, 0.9, 1.1, 1.1] {
            view.zoom_about_center(factor);
            let pos = MercatorProjection::from_view(&view).geo_to_screen(under_center);
            assert!((pos.x - center.x).abs() < 1e-2, "x drifted to {}", pos.x);
            assert!((pos.y - center.y).abs() < 1e-2, "y drifted to {}", pos.y);
        }
    }

    #[test]
    fn test_scale_stays_positive() {
        let mut view = ViewState::fit(Vec2::new(800.0, 600.0));
        for _ in 0..2000 {
            view.zoom_about_center(0.1);
        }
        assert!(view.scale >= MIN_SCALE);
    }
}
