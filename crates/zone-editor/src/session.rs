use crate::controller::{InteractionController, InteractionState, MapEvent};
use crate::registry::ZoneRegistry;
use crate::surface::RenderSurface;
use crate::zone::Zone;
use zone_core::ZoneId;

/// One map session: the rendering surface, the zones drawn on it and the
/// interaction state. Zones live exactly as long as the session.
#[derive(Debug)]
pub struct MapSession<S: RenderSurface> {
    surface: S,
    registry: ZoneRegistry,
    controller: InteractionController,
}

impl<S: RenderSurface> MapSession<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            registry: ZoneRegistry::new(),
            controller: InteractionController::new(),
        }
    }

    /// Puts `zone` on the map as the selected zone.
    pub fn show(&mut self, zone: Zone) -> ZoneId {
        self.registry.register(zone, &mut self.surface)
    }

    pub fn remove(&mut self, id: ZoneId) -> Option<Zone> {
        let removed = self.registry.unregister(id, &mut self.surface);
        if removed.is_some() {
            match self.controller.state() {
                InteractionState::DraggingCenter(dragged)
                | InteractionState::DraggingResizeHandle(dragged)
                    if dragged == id =>
                {
                    self.controller.reset();
                }
                _ => {}
            }
        }
        removed
    }

    pub fn select(&mut self, id: ZoneId) -> bool {
        self.registry.select(id, &mut self.surface)
    }

    /// Feeds one rendering-surface event through the interaction controller.
    pub fn handle(&mut self, event: MapEvent) -> bool {
        self.controller
            .handle(&mut self.registry, &mut self.surface, event)
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Removes every zone from the surface and hands the surface back.
    pub fn close(mut self) -> S {
        self.registry.clear(&mut self.surface);
        self.surface
    }
}
