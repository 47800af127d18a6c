use crate::surface::{
    CircleHandle, CircleOptions, HandleRef, MarkerHandle, MarkerOptions, RenderSurface,
};
use std::collections::BTreeMap;
use zone_core::ZoneId;
use zone_geo::Coordinate;

/// Headless [`RenderSurface`] that keeps every live primitive in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    next_handle: u64,
    camera_bearing: f64,
    markers: BTreeMap<MarkerHandle, MarkerOptions>,
    circles: BTreeMap<CircleHandle, CircleOptions>,
    info_window: Option<MarkerHandle>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera_bearing(bearing: f64) -> Self {
        Self {
            camera_bearing: bearing,
            ..Self::default()
        }
    }

    pub fn set_camera_bearing(&mut self, bearing: f64) {
        self.camera_bearing = bearing;
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &MarkerOptions)> {
        self.markers.iter().map(|(handle, options)| (*handle, options))
    }

    pub fn circles(&self) -> impl Iterator<Item = (CircleHandle, &CircleOptions)> {
        self.circles.iter().map(|(handle, options)| (*handle, options))
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&MarkerOptions> {
        self.markers.get(&handle)
    }

    pub fn marker_for(&self, tag: HandleRef) -> Option<&MarkerOptions> {
        self.markers.values().find(|options| options.tag == tag)
    }

    pub fn circle_for(&self, zone_id: ZoneId) -> Option<&CircleOptions> {
        self.circles.values().find(|options| options.zone_id == zone_id)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn primitive_count(&self) -> usize {
        self.markers.len() + self.circles.len()
    }

    pub fn info_window(&self) -> Option<MarkerHandle> {
        self.info_window
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl RenderSurface for MemorySurface {
    fn add_marker(&mut self, options: MarkerOptions) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle());
        self.markers.insert(handle, options);
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if self.markers.remove(&handle).is_none() {
            tracing::debug!(marker = handle.0, "remove of unknown marker ignored");
        }
        if self.info_window == Some(handle) {
            self.info_window = None;
        }
    }

    fn set_marker_pose(&mut self, handle: MarkerHandle, position: Coordinate, rotation: f32) {
        if let Some(options) = self.markers.get_mut(&handle) {
            options.position = position;
            options.rotation = rotation;
        }
    }

    fn add_circle(&mut self, options: CircleOptions) -> CircleHandle {
        let handle = CircleHandle(self.next_handle());
        self.circles.insert(handle, options);
        handle
    }

    fn remove_circle(&mut self, handle: CircleHandle) {
        if self.circles.remove(&handle).is_none() {
            tracing::debug!(circle = handle.0, "remove of unknown circle ignored");
        }
    }

    fn show_info(&mut self, handle: MarkerHandle) {
        if self.markers.contains_key(&handle) {
            self.info_window = Some(handle);
        }
    }

    fn camera_bearing(&self) -> f64 {
        self.camera_bearing
    }

    fn camera_changed(&mut self, bearing: f64) {
        self.camera_bearing = bearing;
    }
}
