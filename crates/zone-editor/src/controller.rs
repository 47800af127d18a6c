//! Drag, resize and close protocol.
//!
//! Events arrive one at a time from the rendering engine and run to
//! completion. Anything that cannot be matched to a live zone, or that does
//! not fit the current drag, is dropped.

use crate::registry::ZoneRegistry;
use crate::surface::{HandleRef, HandleRole, RenderSurface};
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use zone_core::ZoneId;
use zone_geo::{Coordinate, angular_difference, bearing, distance};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapEvent {
    Click {
        handle: HandleRef,
    },
    DragStart {
        handle: HandleRef,
        position: Coordinate,
    },
    DragMove {
        handle: HandleRef,
        position: Coordinate,
    },
    DragEnd {
        handle: HandleRef,
        position: Coordinate,
    },
    CameraChanged {
        bearing: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    DraggingCenter(ZoneId),
    DraggingResizeHandle(ZoneId),
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Abandons any drag in progress. The zone keeps its last moved state.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Applies one event. Returns `false` when the event was dropped.
    pub fn handle(
        &mut self,
        registry: &mut ZoneRegistry,
        surface: &mut dyn RenderSurface,
        event: MapEvent,
    ) -> bool {
        let handled = match event {
            MapEvent::Click { handle } => self.click(registry, surface, handle),
            MapEvent::DragStart { handle, .. } => self.drag_start(registry, surface, handle),
            MapEvent::DragMove { handle, position } => {
                self.drag_move(registry, surface, handle, position)
            }
            MapEvent::DragEnd { handle, position } => {
                self.drag_end(registry, surface, handle, position)
            }
            MapEvent::CameraChanged { bearing } => {
                surface.camera_changed(bearing);
                if let Some(zone) = registry.selected_mut() {
                    zone.orient_handles(surface, bearing);
                }
                true
            }
        };
        if !handled {
            metrics::counter!("zone_events_dropped_total").increment(1);
            tracing::debug!(?event, state = ?self.state, "map event dropped");
        }
        handled
    }

    fn click(
        &mut self,
        registry: &mut ZoneRegistry,
        surface: &mut dyn RenderSurface,
        handle: HandleRef,
    ) -> bool {
        let Some(zone) = registry.get(handle.zone_id) else {
            return false;
        };
        match handle.role {
            // close handles only exist on the selected zone
            HandleRole::Close if !zone.is_selected() => return false,
            HandleRole::Close => {
                if let Some(hook) = zone.hooks().on_close.clone() {
                    hook(zone);
                    return true;
                }
                registry.unregister(handle.zone_id, surface);
                if self.dragged_zone() == Some(handle.zone_id) {
                    self.reset();
                }
            }
            HandleRole::Center | HandleRole::Resize => {
                registry.select(handle.zone_id, surface);
                if let Some(marker) = registry.get(handle.zone_id).and_then(Zone::center_marker) {
                    surface.show_info(marker);
                }
            }
        }
        true
    }

    fn drag_start(
        &mut self,
        registry: &mut ZoneRegistry,
        surface: &mut dyn RenderSurface,
        handle: HandleRef,
    ) -> bool {
        let Some(selected) = registry.get(handle.zone_id).map(Zone::is_selected) else {
            return false;
        };
        match handle.role {
            HandleRole::Center => {
                if let Some(previous) = registry.selected_mut() {
                    if previous.id() != handle.zone_id {
                        previous.deactivate(surface);
                    }
                }
                registry.select(handle.zone_id, surface);
                self.state = InteractionState::DraggingCenter(handle.zone_id);
                true
            }
            // resize handles only exist on the selected zone
            HandleRole::Resize if selected => {
                self.state = InteractionState::DraggingResizeHandle(handle.zone_id);
                true
            }
            HandleRole::Resize | HandleRole::Close => false,
        }
    }

    fn drag_move(
        &mut self,
        registry: &mut ZoneRegistry,
        surface: &mut dyn RenderSurface,
        handle: HandleRef,
        position: Coordinate,
    ) -> bool {
        if !self.is_dragging(handle) {
            return false;
        }
        let Some(zone) = registry.get_mut(handle.zone_id) else {
            return false;
        };
        match handle.role {
            HandleRole::Center => zone.relocate(surface, position),
            _ => {
                track_resize(zone, surface, position);
            }
        }
        true
    }

    fn drag_end(
        &mut self,
        registry: &mut ZoneRegistry,
        surface: &mut dyn RenderSurface,
        handle: HandleRef,
        position: Coordinate,
    ) -> bool {
        if !self.is_dragging(handle) {
            return false;
        }
        self.reset();
        let Some(zone) = registry.get_mut(handle.zone_id) else {
            return false;
        };

        match handle.role {
            HandleRole::Center => {
                zone.relocate(surface, position);
                tracing::info!(zone_id = %zone.id(), "zone moved");
                if let Some(hook) = zone.hooks().on_drag_complete.clone() {
                    hook(&*zone);
                }
            }
            _ => {
                let heading = track_resize(zone, surface, position);
                separate_from_close_handle(zone, surface, heading);
                zone.refresh_resize_handle(surface);
                tracing::info!(
                    zone_id = %zone.id(),
                    radius_m = zone.radius_m(),
                    resize_heading = zone.resize_heading(),
                    "zone resized"
                );
                if let Some(hook) = zone.hooks().on_resize_complete.clone() {
                    hook(&*zone);
                }
            }
        }
        true
    }

    fn is_dragging(&self, handle: HandleRef) -> bool {
        match (self.state, handle.role) {
            (InteractionState::DraggingCenter(id), HandleRole::Center) => id == handle.zone_id,
            (InteractionState::DraggingResizeHandle(id), HandleRole::Resize) => {
                id == handle.zone_id
            }
            _ => false,
        }
    }

    fn dragged_zone(&self) -> Option<ZoneId> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::DraggingCenter(id) | InteractionState::DraggingResizeHandle(id) => {
                Some(id)
            }
        }
    }
}

/// Resizes `zone` so its rim passes through `position` and parks the resize
/// marker under the pointer. Returns the world bearing of the pointer.
fn track_resize(zone: &mut Zone, surface: &mut dyn RenderSurface, position: Coordinate) -> f64 {
    let camera = surface.camera_bearing();
    let radius = distance(zone.center(), position).max(zone.tuning().min_radius_m);
    let heading = bearing(zone.center(), position);
    zone.resize(surface, radius, heading - camera);
    zone.place_resize_handle(surface, position);
    heading
}

/// Slack on the band edges for round-off in the bearing math.
const BAND_TOLERANCE_DEG: f64 = 1e-6;

/// Snaps the resize heading out of the band around the close handle.
///
/// The band is closed on both ends: a drop exactly onto the close handle or
/// exactly `band` degrees to either side of it is moved.
fn separate_from_close_handle(zone: &mut Zone, surface: &mut dyn RenderSurface, heading: f64) {
    let camera = surface.camera_bearing();
    let close_heading = bearing(zone.center(), zone.close_handle_position(camera));
    let gap = angular_difference(heading, close_heading);
    let band = zone.tuning().overlap_band_deg;
    if gap <= band + BAND_TOLERANCE_DEG {
        let snapped = close_heading + zone.tuning().snap_offset_deg();
        zone.set_resize_heading(snapped - camera);
        metrics::counter!("zone_overlap_corrections_total").increment(1);
        tracing::debug!(
            zone_id = %zone.id(),
            gap,
            snapped,
            "resize handle moved off close handle"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySurface;
    use crate::zone::{ZoneConfig, ZoneHooks};
    use std::cell::Cell;
    use std::rc::Rc;
    use zone_geo::destination;

    fn setup() -> (InteractionController, ZoneRegistry, MemorySurface, ZoneId) {
        let mut surface = MemorySurface::new();
        let mut registry = ZoneRegistry::new();
        let id = registry.register(
            Zone::new(ZoneConfig {
                label: "A".to_string(),
                center: Coordinate::new(0.0, 0.0),
                ..ZoneConfig::default()
            })
            .unwrap(),
            &mut surface,
        );
        (InteractionController::new(), registry, surface, id)
    }

    #[test]
    fn drag_move_without_start_is_dropped() {
        let (mut controller, mut registry, mut surface, id) = setup();
        let event = MapEvent::DragMove {
            handle: HandleRef::new(id, HandleRole::Center),
            position: Coordinate::new(0.01, 0.0),
        };
        assert!(!controller.handle(&mut registry, &mut surface, event));
        assert_eq!(registry.get(id).unwrap().center(), Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn events_for_unknown_zone_are_dropped() {
        let (mut controller, mut registry, mut surface, _) = setup();
        let stranger = HandleRef::new(ZoneId::new(), HandleRole::Close);
        let event = MapEvent::Click { handle: stranger };
        assert!(!controller.handle(&mut registry, &mut surface, event));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn mismatched_role_does_not_hijack_drag() {
        let (mut controller, mut registry, mut surface, id) = setup();
        let center = HandleRef::new(id, HandleRole::Center);
        let resize = HandleRef::new(id, HandleRole::Resize);
        let origin = Coordinate::new(0.0, 0.0);
        let start = MapEvent::DragStart {
            handle: center,
            position: origin,
        };
        controller.handle(&mut registry, &mut surface, start);
        assert_eq!(controller.state(), InteractionState::DraggingCenter(id));

        let far = destination(origin, 100.0, 135.0);
        let stray = MapEvent::DragMove {
            handle: resize,
            position: far,
        };
        assert!(!controller.handle(&mut registry, &mut surface, stray));
        assert_eq!(registry.get(id).unwrap().radius_m(), 35.0);
    }

    #[test]
    fn center_drag_relocates_and_fires_hook() {
        let moved = Rc::new(Cell::new(0));
        let resized = Rc::new(Cell::new(0));
        let mut surface = MemorySurface::new();
        let mut registry = ZoneRegistry::new();
        let hooks = ZoneHooks::default()
            .on_drag_complete({
                let moved = moved.clone();
                move |_| moved.set(moved.get() + 1)
            })
            .on_resize_complete({
                let resized = resized.clone();
                move |_| resized.set(resized.get() + 1)
            });
        let id = registry.register(
            Zone::new(ZoneConfig {
                center: Coordinate::new(0.0, 0.0),
                hooks,
                ..ZoneConfig::default()
            })
            .unwrap(),
            &mut surface,
        );
        let mut controller = InteractionController::new();
        let handle = HandleRef::new(id, HandleRole::Center);
        let target = Coordinate::new(0.002, 0.003);

        for event in [
            MapEvent::DragStart {
                handle,
                position: Coordinate::new(0.0, 0.0),
            },
            MapEvent::DragMove {
                handle,
                position: Coordinate::new(0.001, 0.001),
            },
            MapEvent::DragEnd {
                handle,
                position: target,
            },
        ] {
            assert!(controller.handle(&mut registry, &mut surface, event));
        }

        assert_eq!(registry.get(id).unwrap().center(), target);
        assert_eq!(surface.circle_for(id).unwrap().center, target);
        assert_eq!(moved.get(), 1);
        assert_eq!(resized.get(), 0);
        assert_eq!(controller.state(), InteractionState::Idle);
    }

    #[test]
    fn close_hook_replaces_removal() {
        let closed = Rc::new(Cell::new(false));
        let mut surface = MemorySurface::new();
        let mut registry = ZoneRegistry::new();
        let hooks = ZoneHooks::default().on_close({
            let closed = closed.clone();
            move |_| closed.set(true)
        });
        let id = registry.register(
            Zone::new(ZoneConfig {
                hooks,
                ..ZoneConfig::default()
            })
            .unwrap(),
            &mut surface,
        );
        let mut controller = InteractionController::new();
        let handle = HandleRef::new(id, HandleRole::Close);
        assert!(controller.handle(&mut registry, &mut surface, MapEvent::Click { handle }));
        assert!(closed.get());
        assert_eq!(registry.len(), 1);
        assert_eq!(surface.primitive_count(), 4);
    }

    #[test]
    fn click_center_shows_info() {
        let (mut controller, mut registry, mut surface, id) = setup();
        let handle = HandleRef::new(id, HandleRole::Center);
        controller.handle(&mut registry, &mut surface, MapEvent::Click { handle });
        assert_eq!(surface.info_window(), registry.get(id).unwrap().center_marker());
    }

    #[test]
    fn resize_drag_far_from_close_handle_keeps_heading() {
        let (mut controller, mut registry, mut surface, id) = setup();
        let handle = HandleRef::new(id, HandleRole::Resize);
        let origin = Coordinate::new(0.0, 0.0);
        let target = destination(origin, 60.0, 200.0);

        let start = MapEvent::DragStart {
            handle,
            position: origin,
        };
        let end = MapEvent::DragEnd {
            handle,
            position: target,
        };
        assert!(controller.handle(&mut registry, &mut surface, start));
        assert!(controller.handle(&mut registry, &mut surface, end));

        let zone = registry.get(id).unwrap();
        assert!((zone.radius_m() - 60.0).abs() < 1e-6);
        assert!((zone.resize_heading() - 200.0).abs() < 1e-6);
        let marker = surface.marker_for(zone.handle_ref(HandleRole::Resize)).unwrap();
        assert!((distance(origin, marker.position) - 60.0).abs() < 1e-6);
    }

    #[test]
    fn camera_change_updates_surface_bearing() {
        let (mut controller, mut registry, mut surface, id) = setup();
        let event = MapEvent::CameraChanged { bearing: 30.0 };
        assert!(controller.handle(&mut registry, &mut surface, event));
        assert_eq!(surface.camera_bearing(), 30.0);

        let zone = registry.get(id).unwrap();
        let close = surface.marker_for(zone.handle_ref(HandleRole::Close)).unwrap();
        let heading = bearing(zone.center(), close.position);
        assert!((heading - 75.0).abs() < 1e-6);
    }

    #[test]
    fn band_edges_are_inclusive() {
        for (pointer, expected) in [(45.0, 60.0), (15.0, 60.0), (75.0, 60.0), (76.0, 76.0)] {
            let (_, mut registry, mut surface, id) = setup();
            let zone = registry.get_mut(id).unwrap();
            let origin = zone.center();
            let heading = track_resize(zone, &mut surface, destination(origin, 50.0, pointer));
            separate_from_close_handle(zone, &mut surface, heading);
            let stored = zone.resize_heading();
            assert!((stored - expected).abs() < 1e-6, "pointer {pointer} stored {stored}");
        }
    }
}
