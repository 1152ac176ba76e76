//! The map view component: view state, gestures, data loading and redraws.
//!
//! Every state change notifies the view, which redraws its retained scene
//! right away. The canvas only paints that scene.

use crate::data::{Pin, PINS};
use crate::geo::{render_map, MapStyle, SceneBuffer};
use crate::state::{zoom_factor, DragState, InputEvent, MapSettings, ViewState, WorldData};
use crate::world_fetch::{WorldLoader, WorldSource};
use eframe::egui::{self, Vec2};

pub struct MapView {
    view: ViewState,
    /// Last measured container size; `None` until mounted
    container: Option<Vec2>,
    drag: DragState,
    loader: WorldLoader,
    scene: SceneBuffer,
    settings: MapSettings,
    pins: &'static [Pin],
    /// Number of completed redraws
    redraws: u64,
    torn_down: bool,
}

impl MapView {
    pub fn new(settings: MapSettings, source: Box<dyn WorldSource>) -> Self {
        let settings = settings.sanitized();
        Self {
            view: ViewState::default(),
            container: None,
            drag: DragState::default(),
            loader: WorldLoader::new(source, settings.data_path.clone()),
            scene: SceneBuffer::new(),
            settings,
            pins: PINS,
            redraws: 0,
            torn_down: false,
        }
    }

    /// Context to wake when the dataset arrives.
    pub fn set_context(&mut self, ctx: egui::Context) {
        self.loader.set_context(ctx);
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn scene(&self) -> &SceneBuffer {
        &self.scene
    }

    pub fn world(&self) -> &WorldData {
        self.loader.data()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    #[allow(dead_code)] // Used by tests to observe the redraw contract
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Reports the container's current size.
    ///
    /// The first report mounts the view; later ones rebuild the view
    /// state only when the size actually changed.
    pub fn set_container_size(&mut self, size: Vec2) {
        if self.torn_down || self.container == Some(size) {
            return;
        }

        log::debug!("Map container resized to {:.0}x{:.0}", size.x, size.y);
        self.container = Some(size);
        self.view = ViewState::fit(size);
        self.drag.end();
        self.state_changed();
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.torn_down {
            return;
        }

        match event {
            InputEvent::PointerDown(pos) => self.drag.begin(pos),
            InputEvent::PointerMove(pos) => {
                if let Some(delta) = self.drag.update(pos) {
                    if delta != Vec2::ZERO {
                        self.view.pan(delta);
                        self.state_changed();
                    }
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => self.drag.end(),
            InputEvent::Wheel { delta_y } => {
                if let Some(factor) = zoom_factor(delta_y, self.settings.zoom_speed) {
                    self.view.zoom_about_center(factor);
                    self.state_changed();
                }
            }
            InputEvent::DoubleClick => self.reset_view(),
        }
    }

    /// Restores the breakpoint view for the current container.
    pub fn reset_view(&mut self) {
        if self.torn_down {
            return;
        }
        self.view = ViewState::fit(self.container.unwrap_or(Vec2::ZERO));
        self.state_changed();
    }

    /// Picks up a finished fetch. Call once per frame.
    pub fn poll(&mut self) {
        if self.torn_down {
            return;
        }
        if self.loader.poll() && self.loader.data().layer().is_some() {
            self.state_changed();
        }
    }

    /// Clears a failed load and tries again.
    pub fn reload(&mut self) {
        if self.torn_down {
            return;
        }
        self.loader.reset_failed();
        self.state_changed();
    }

    /// Stops the view: cancels the fetch and ignores further events.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        log::debug!("Tearing down map view");
        self.torn_down = true;
        self.drag.end();
        self.loader.cancel();
    }

    fn state_changed(&mut self) {
        self.redraw();
    }

    /// Full redraw of the scene from the current state.
    ///
    /// Skipped until the dataset is loaded; the first call starts the fetch.
    fn redraw(&mut self) {
        if self.container.is_none() {
            return;
        }

        self.loader.request();
        let Some(land) = self.loader.data().layer().cloned() else {
            return;
        };

        let style = MapStyle {
            land_color: self.settings.land_color32(),
            pin_color: self.settings.pin_color32(),
            pin_radius: self.settings.pin_radius,
            show_labels: self.settings.show_labels,
        };
        let stats = render_map(&mut self.scene, &self.view, &land, self.pins, &style);
        self.redraws += 1;
        log::trace!("Redraw #{}: {:?}", self.redraws, stats);
    }
}

impl Drop for MapView {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_fetch::tests::{ManualSource, TINY_WORLD};
    use crate::world_fetch::FetchError;
    use eframe::egui::Pos2;

    fn mounted() -> (MapView, ManualSource) {
        let source = ManualSource::default();
        let mut map = MapView::new(MapSettings::default(), Box::new(source.clone()));
        map.set_container_size(Vec2::new(1200.0, 800.0));
        (map, source)
    }

    fn loaded() -> (MapView, ManualSource) {
        let (mut map, source) = mounted();
        source.respond(TINY_WORLD);
        map.poll();
        (map, source)
    }

    #[test]
    fn test_single_fetch_before_load() {
        let (mut map, source) = mounted();
        map.handle_input(InputEvent::Wheel { delta_y: -1.0 });
        map.handle_input(InputEvent::PointerDown(Pos2::new(10.0, 10.0)));
        map.handle_input(InputEvent::PointerMove(Pos2::new(20.0, 20.0)));
        map.set_container_size(Vec2::new(900.0, 700.0));

        assert_eq!(source.calls.get(), 1);
        assert!(map.world().is_loading());
        assert!(map.scene().is_empty());
        assert_eq!(map.redraws(), 0);
    }

    #[test]
    fn test_load_completion_triggers_redraw() {
        let (map, source) = loaded();
        assert_eq!(map.redraws(), 1);
        // One land polygon plus every static pin
        assert_eq!(map.scene().commands().len(), 1 + PINS.len());

        let mut map = map;
        map.handle_input(InputEvent::Wheel { delta_y: 1.0 });
        assert_eq!(map.redraws(), 2);
        assert_eq!(map.scene().commands().len(), 1 + PINS.len());
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn test_each_state_change_redraws_once() {
        let (mut map, _source) = loaded();
        map.handle_input(InputEvent::PointerDown(Pos2::new(100.0, 100.0)));
        map.handle_input(InputEvent::PointerMove(Pos2::new(101.0, 100.0)));
        map.handle_input(InputEvent::PointerMove(Pos2::new(102.0, 100.0)));
        map.handle_input(InputEvent::PointerMove(Pos2::new(102.0, 100.0)));
        map.handle_input(InputEvent::PointerUp);
        map.handle_input(InputEvent::PointerMove(Pos2::new(150.0, 100.0)));

        assert_eq!(map.redraws(), 3);
        assert_eq!(map.view().origin(), Pos2::new(546.0, 229.0));
    }

    #[test]
    fn test_scenario_from_initial_state() {
        let (mut map, _source) = loaded();
        assert!((map.view().scale - 186.0).abs() < 1e-3);
        assert_eq!(map.view().origin(), Pos2::new(544.0, 229.0));

        map.handle_input(InputEvent::PointerDown(Pos2::new(300.0, 300.0)));
        map.handle_input(InputEvent::PointerMove(Pos2::new(310.0, 295.0)));
        map.handle_input(InputEvent::PointerLeave);
        assert!(!map.is_dragging());
        assert_eq!(map.view().origin(), Pos2::new(554.0, 224.0));

        map.reset_view();
        map.handle_input(InputEvent::Wheel { delta_y: -53.0 });
        assert!((map.view().scale - 204.6).abs() < 1e-3);
        assert!((map.view().origin_x - 538.4).abs() < 1e-3);
        assert!((map.view().origin_y - 211.9).abs() < 1e-3);
    }

    #[test]
    fn test_double_click_resets_view() {
        let (mut map, _source) = loaded();
        let initial = *map.view();
        map.handle_input(InputEvent::Wheel { delta_y: -1.0 });
        map.handle_input(InputEvent::PointerDown(Pos2::new(0.0, 0.0)));
        map.handle_input(InputEvent::PointerMove(Pos2::new(-400.0, 900.0)));
        assert_ne!(*map.view(), initial);

        map.handle_input(InputEvent::DoubleClick);
        assert_eq!(*map.view(), initial);
    }

    #[test]
    fn test_resize_replaces_view() {
        let (mut map, _source) = loaded();
        map.handle_input(InputEvent::Wheel { delta_y: -1.0 });
        let redraws = map.redraws();

        map.set_container_size(Vec2::new(1200.0, 800.0));
        assert_eq!(map.redraws(), redraws);

        map.set_container_size(Vec2::new(700.0, 500.0));
        assert_eq!(*map.view(), ViewState::fit(Vec2::new(700.0, 500.0)));
        assert_eq!(map.redraws(), redraws + 1);

        map.set_container_size(Vec2::ZERO);
        assert!(map.scene().is_empty());
    }

    #[test]
    fn test_failed_load_skips_rendering() {
        let (mut map, source) = mounted();
        source.fail(FetchError::Network("offline".into()));
        map.poll();

        assert_eq!(map.world().failure(), Some("Network error: offline"));
        map.handle_input(InputEvent::Wheel { delta_y: -1.0 });
        assert!(map.scene().is_empty());
        assert_eq!(source.calls.get(), 1);

        map.reload();
        assert_eq!(source.calls.get(), 2);
        source.respond(TINY_WORLD);
        map.poll();
        assert!(!map.scene().is_empty());
    }

    #[test]
    fn test_teardown_cancels_and_ignores_events() {
        let (mut map, source) = mounted();
        map.teardown();
        source.respond(TINY_WORLD);
        map.poll();
        assert!(map.world().layer().is_none());

        let before = *map.view();
        map.handle_input(InputEvent::Wheel { delta_y: -1.0 });
        map.set_container_size(Vec2::new(10.0, 10.0));
        assert_eq!(*map.view(), before);
        assert_eq!(map.redraws(), 0);
    }
}
