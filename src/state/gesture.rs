//! Pointer and wheel input for the map, independent of the GUI backend.

use eframe::egui::{Pos2, Vec2};

/// Default fraction by which a single wheel notch changes the scale.
pub const DEFAULT_ZOOM_SPEED: f32 = 0.1;

/// Input delivered to the map, in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed inside the map
    PointerDown(Pos2),
    /// Pointer moved inside the map
    PointerMove(Pos2),
    /// Primary button released
    PointerUp,
    /// Pointer left the map
    PointerLeave,
    /// Wheel scrolled; positive `delta_y` scrolls down (zooms out)
    Wheel { delta_y: f32 },
    /// Double-click inside the map
    DoubleClick,
}

/// Transient state of a drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    active: bool,
    last: Pos2,
}

impl DragState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts a drag at `pos`.
    pub fn begin(&mut self, pos: Pos2) {
        self.active = true;
        self.last = pos;
    }

    /// Records a pointer move and returns the delta since the previous one.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn update(&mut self, pos: Pos2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = pos - self.last;
        self.last = pos;
        Some(delta)
    }

    /// Ends the drag, whether or not one was in progress.
    pub fn end(&mut self) {
        *self = Self::default();
    }
}

/// Scale multiplier for one wheel event.
///
/// Scrolling down zooms out by `speed`, scrolling up zooms in by `speed`.
/// A zero delta (purely horizontal scroll) does not zoom.
pub fn zoom_factor(delta_y: f32, speed: f32) -> Option<f32> {
    if delta_y > 0.0 {
        Some(1.0 - speed)
    } else if delta_y < 0.0 {
        Some(1.0 + speed)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_reports_incremental_deltas() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(Pos2::new(5.0, 5.0)), None);

        drag.begin(Pos2::new(100.0, 100.0));
        assert!(drag.is_active());
        assert_eq!(drag.update(Pos2::new(110.0, 95.0)), Some(Vec2::new(10.0, -5.0)));
        assert_eq!(drag.update(Pos2::new(112.0, 95.0)), Some(Vec2::new(2.0, 0.0)));

        drag.end();
        assert!(!drag.is_active());
        assert_eq!(drag.update(Pos2::new(200.0, 200.0)), None);
    }

    #[test]
    fn test_end_without_begin() {
        let mut drag = DragState::default();
        drag.end();
        assert_eq!(drag, DragState::default());
    }

    #[test]
    fn test_zoom_factor_direction() {
        assert_eq!(zoom_factor(-120.0, 0.1), Some(1.1));
        assert_eq!(zoom_factor(3.0, 0.1), Some(0.9));
        assert_eq!(zoom_factor(0.0, 0.1), None);
    }
}
