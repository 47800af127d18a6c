use crate::surface::RenderSurface;
use crate::zone::Zone;
use zone_core::ZoneId;
use zone_geo::Coordinate;

/// The zones of one map session, in insertion order.
///
/// At most one zone is selected between calls, and every zone's primitives
/// on the surface match its fields. Both hold because every selection
/// change goes through a full deselect-and-redraw sweep.
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `zone` as the selected zone and redraws the whole session.
    pub fn register(&mut self, zone: Zone, surface: &mut dyn RenderSurface) -> ZoneId {
        let id = zone.id();
        self.zones.push(zone);
        self.sweep_select(self.zones.len() - 1, surface);
        metrics::counter!("zone_registered_total").increment(1);
        tracing::info!(zone_id = %id, zones = self.zones.len(), "zone registered");
        id
    }

    /// Removes the zone and its primitives. Nothing else becomes selected.
    pub fn unregister(&mut self, id: ZoneId, surface: &mut dyn RenderSurface) -> Option<Zone> {
        let index = self.position(id)?;
        let mut zone = self.zones.remove(index);
        zone.clear_visuals(surface);
        zone.set_selected(false);
        metrics::counter!("zone_unregistered_total").increment(1);
        tracing::info!(zone_id = %id, zones = self.zones.len(), "zone unregistered");
        Some(zone)
    }

    /// Makes `id` the only selected zone. Returns `false` for unknown ids.
    pub fn select(&mut self, id: ZoneId, surface: &mut dyn RenderSurface) -> bool {
        match self.position(id) {
            Some(index) => {
                self.sweep_select(index, surface);
                true
            }
            None => false,
        }
    }

    pub fn find(&self, predicate: impl Fn(&Zone) -> bool) -> Option<&Zone> {
        self.zones.iter().find(|zone| predicate(zone))
    }

    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|zone| zone.id() == id)
    }

    pub fn selected(&self) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.is_selected())
    }

    pub fn selected_id(&self) -> Option<ZoneId> {
        self.selected().map(Zone::id)
    }

    pub(crate) fn selected_mut(&mut self) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|zone| zone.is_selected())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zones_containing(&self, point: Coordinate) -> impl Iterator<Item = &Zone> {
        self.zones
            .iter()
            .filter(move |zone| zone.fence().contains(point))
    }

    /// Rebuilds every zone's primitives in insertion order.
    pub fn redraw_all(&mut self, surface: &mut dyn RenderSurface) {
        for zone in &mut self.zones {
            zone.redraw_all(surface);
        }
    }

    /// Removes every zone and its primitives.
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) {
        for mut zone in self.zones.drain(..) {
            zone.clear_visuals(surface);
        }
    }

    fn position(&self, id: ZoneId) -> Option<usize> {
        self.zones.iter().position(|zone| zone.id() == id)
    }

    fn sweep_select(&mut self, index: usize, surface: &mut dyn RenderSurface) {
        for zone in &mut self.zones {
            zone.set_selected(false);
            zone.clear_visuals(surface);
        }
        self.zones[index].set_selected(true);
        for zone in &mut self.zones {
            zone.redraw_all(surface);
        }
        metrics::counter!("zone_selected_total").increment(1);
        tracing::debug!(zone_id = %self.zones[index].id(), "zone selected");
    }
}
