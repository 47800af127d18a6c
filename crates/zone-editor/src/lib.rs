//! Interactive circular zones (geofences) on a rotatable map.
//!
//! A [`MapSession`] owns a [`RenderSurface`], the [`ZoneRegistry`] of zones
//! drawn on it, and the [`InteractionController`] that turns clicks, drags
//! and camera moves into zone edits.

pub mod controller;
pub mod memory;
pub mod registry;
pub mod session;
pub mod surface;
pub mod zone;

pub use controller::{InteractionController, InteractionState, MapEvent};
pub use memory::MemorySurface;
pub use registry::ZoneRegistry;
pub use session::MapSession;
pub use surface::{
    CircleHandle, CircleOptions, HandleIcon, HandleRef, HandleRole, MarkerHandle, MarkerOptions,
    RenderSurface,
};
pub use zone::{Zone, ZoneConfig, ZoneHook, ZoneHooks, ZoneStyle};
pub use zone_config::HandleTuning;
pub use zone_core::{Color, ZoneError, ZoneId, ZoneResult};
pub use zone_geo::Coordinate;
