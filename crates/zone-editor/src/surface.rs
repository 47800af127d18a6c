//! Boundary to the map rendering engine.
//!
//! The editor never draws anything itself. It asks a [`RenderSurface`] to add
//! and remove markers and circles, and every marker carries a [`HandleRef`]
//! so the engine can report clicks and drags back in structured form.

use serde::{Deserialize, Serialize};
use zone_core::{Color, ZoneId};
use zone_geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CircleHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleRole {
    Center,
    Resize,
    Close,
}

/// Identity of a marker as seen by the editor: which zone, which role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleRef {
    pub zone_id: ZoneId,
    pub role: HandleRole,
}

impl HandleRef {
    pub fn new(zone_id: ZoneId, role: HandleRole) -> Self {
        Self { zone_id, role }
    }
}

/// Logical icon names; the host maps them to its own bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleIcon {
    Resize,
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    pub position: Coordinate,
    pub label: String,
    pub draggable: bool,
    pub visible: bool,
    pub icon: Option<HandleIcon>,
    /// Clockwise rotation of the icon in degrees.
    pub rotation: f32,
    /// Icon anchor as fractions of its width and height.
    pub anchor: [f32; 2],
    pub tag: HandleRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleOptions {
    pub center: Coordinate,
    pub radius_m: f64,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub stroke_width: f32,
    pub zone_id: ZoneId,
}

pub trait RenderSurface {
    fn add_marker(&mut self, options: MarkerOptions) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    /// Moves and rotates a live marker in place.
    fn set_marker_pose(&mut self, handle: MarkerHandle, position: Coordinate, rotation: f32);
    fn add_circle(&mut self, options: CircleOptions) -> CircleHandle;
    fn remove_circle(&mut self, handle: CircleHandle);
    /// Pops the marker's info window (its label).
    fn show_info(&mut self, handle: MarkerHandle);
    /// Current camera rotation in degrees clockwise from north.
    ///
    /// Every redraw reads the bearing from here, so after a camera change it
    /// must already report the new value.
    fn camera_bearing(&self) -> f64;
    /// Called with the bearing carried by a camera change event before the
    /// selected zone's handles are rebuilt. Engines that track their own
    /// camera can ignore it.
    fn camera_changed(&mut self, _bearing: f64) {}
}
