use crate::surface::{
    CircleHandle, CircleOptions, HandleIcon, HandleRef, HandleRole, MarkerHandle, MarkerOptions,
    RenderSurface,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use zone_config::HandleTuning;
use zone_core::{Color, ZoneError, ZoneId, ZoneResult};
use zone_geo::{Coordinate, GeoFence, destination, normalize_bearing};

const CENTER_ANCHOR: [f32; 2] = [0.5, 1.0];
const HANDLE_ANCHOR: [f32; 2] = [0.5, 0.5];

pub type ZoneHook = Rc<dyn Fn(&Zone)>;

/// Caller-supplied callbacks, invoked synchronously by the interaction
/// controller.
#[derive(Clone, Default)]
pub struct ZoneHooks {
    pub on_close: Option<ZoneHook>,
    pub on_resize_complete: Option<ZoneHook>,
    pub on_drag_complete: Option<ZoneHook>,
}

impl ZoneHooks {
    pub fn on_close(mut self, hook: impl Fn(&Zone) + 'static) -> Self {
        self.on_close = Some(Rc::new(hook));
        self
    }

    pub fn on_resize_complete(mut self, hook: impl Fn(&Zone) + 'static) -> Self {
        self.on_resize_complete = Some(Rc::new(hook));
        self
    }

    pub fn on_drag_complete(mut self, hook: impl Fn(&Zone) + 'static) -> Self {
        self.on_drag_complete = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for ZoneHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneHooks")
            .field("on_close", &self.on_close.is_some())
            .field("on_resize_complete", &self.on_resize_complete.is_some())
            .field("on_drag_complete", &self.on_drag_complete.is_some())
            .finish()
    }
}

/// Everything needed to build a [`Zone`]. Unset fields take the defaults of
/// [`ZoneConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub label: String,
    pub center: Coordinate,
    pub radius_m: f64,
    pub border_color: Color,
    pub border_width: f32,
    pub fill_color: Color,
    pub border_color_inactive: Color,
    pub fill_color_inactive: Color,
    #[serde(skip)]
    pub hooks: ZoneHooks,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            label: "No title".to_string(),
            center: Coordinate::new(-33.865143, 151.209900),
            radius_m: 35.0,
            border_color: Color(0xAAFF_0000),
            border_width: 4.0,
            fill_color: Color(0x44FF_0000),
            border_color_inactive: Color(0x0000_0000),
            fill_color_inactive: Color(0x11FF_0000),
            hooks: ZoneHooks::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneStyle {
    pub border_color: Color,
    pub border_width: f32,
    pub fill_color: Color,
    pub border_color_inactive: Color,
    pub fill_color_inactive: Color,
}

#[derive(Debug, Clone, Copy, Default)]
struct Visuals {
    center: Option<MarkerHandle>,
    circle: Option<CircleHandle>,
    resize: Option<MarkerHandle>,
    close: Option<MarkerHandle>,
}

#[derive(Debug)]
pub struct Zone {
    id: ZoneId,
    label: String,
    center: Coordinate,
    radius_m: f64,
    resize_heading: f64,
    selected: bool,
    style: ZoneStyle,
    hooks: ZoneHooks,
    tuning: HandleTuning,
    visuals: Visuals,
}

impl Zone {
    pub fn new(config: ZoneConfig) -> ZoneResult<Self> {
        Self::with_tuning(config, HandleTuning::default())
    }

    pub fn with_tuning(config: ZoneConfig, tuning: HandleTuning) -> ZoneResult<Self> {
        if !config.center.is_valid() {
            return Err(ZoneError::InvalidCoordinate {
                latitude: config.center.latitude,
                longitude: config.center.longitude,
            });
        }
        if !config.radius_m.is_finite() || config.radius_m <= 0.0 {
            return Err(ZoneError::InvalidRadius(config.radius_m));
        }
        if !config.border_width.is_finite() || config.border_width < 0.0 {
            return Err(ZoneError::InvalidStyle(format!(
                "border width {} must be a non-negative number",
                config.border_width
            )));
        }

        Ok(Self {
            id: ZoneId::new(),
            label: config.label,
            center: config.center,
            radius_m: config.radius_m.max(tuning.min_radius_m),
            resize_heading: normalize_bearing(tuning.resize_heading_deg),
            selected: false,
            style: ZoneStyle {
                border_color: config.border_color,
                border_width: config.border_width,
                fill_color: config.fill_color,
                border_color_inactive: config.border_color_inactive,
                fill_color_inactive: config.fill_color_inactive,
            },
            hooks: config.hooks,
            tuning,
            visuals: Visuals::default(),
        })
    }

    pub fn id(&self) -> ZoneId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Heading of the resize handle relative to the camera, in `[0, 360)`.
    pub fn resize_heading(&self) -> f64 {
        self.resize_heading
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn style(&self) -> &ZoneStyle {
        &self.style
    }

    pub fn hooks(&self) -> &ZoneHooks {
        &self.hooks
    }

    pub fn tuning(&self) -> &HandleTuning {
        &self.tuning
    }

    pub fn fence(&self) -> GeoFence {
        GeoFence {
            center: self.center,
            radius_m: self.radius_m,
        }
    }

    pub fn handle_ref(&self, role: HandleRole) -> HandleRef {
        HandleRef::new(self.id, role)
    }

    pub fn center_marker(&self) -> Option<MarkerHandle> {
        self.visuals.center
    }

    pub fn resize_marker(&self) -> Option<MarkerHandle> {
        self.visuals.resize
    }

    pub fn close_marker(&self) -> Option<MarkerHandle> {
        self.visuals.close
    }

    /// Number of primitives this zone currently has on the surface.
    pub fn visual_count(&self) -> usize {
        [
            self.visuals.center.is_some(),
            self.visuals.circle.is_some(),
            self.visuals.resize.is_some(),
            self.visuals.close.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    pub fn resize_handle_position(&self, camera_bearing: f64) -> Coordinate {
        destination(
            self.center,
            self.radius_m,
            self.resize_heading + camera_bearing,
        )
    }

    pub fn close_handle_position(&self, camera_bearing: f64) -> Coordinate {
        destination(
            self.center,
            self.radius_m,
            self.tuning.close_heading_deg + camera_bearing,
        )
    }

    pub(crate) fn activate(&mut self, surface: &mut dyn RenderSurface) {
        self.selected = true;
        self.draw_circle(surface);
        let bearing = surface.camera_bearing();
        self.draw_handles(surface, bearing);
    }

    pub(crate) fn deactivate(&mut self, surface: &mut dyn RenderSurface) {
        self.selected = false;
        self.remove_handles(surface);
        self.draw_circle(surface);
    }

    pub(crate) fn relocate(&mut self, surface: &mut dyn RenderSurface, center: Coordinate) {
        self.center = center;
        if let Some(marker) = self.visuals.center {
            surface.set_marker_pose(marker, center, 0.0);
        }
        self.draw_circle(surface);
        if self.selected {
            let bearing = surface.camera_bearing();
            self.draw_handles(surface, bearing);
        }
    }

    /// Updates radius and heading and redraws the circle and close handle.
    /// The resize handle is left where it is; during a drag it follows the
    /// pointer.
    pub(crate) fn resize(&mut self, surface: &mut dyn RenderSurface, radius_m: f64, heading: f64) {
        self.radius_m = radius_m.max(self.tuning.min_radius_m);
        self.resize_heading = normalize_bearing(heading);
        self.draw_circle(surface);
        if self.selected {
            let bearing = surface.camera_bearing();
            self.draw_close_handle(surface, bearing);
        }
    }

    pub(crate) fn set_resize_heading(&mut self, heading: f64) {
        self.resize_heading = normalize_bearing(heading);
    }

    pub(crate) fn place_resize_handle(
        &mut self,
        surface: &mut dyn RenderSurface,
        position: Coordinate,
    ) {
        if let Some(marker) = self.visuals.resize {
            surface.set_marker_pose(marker, position, self.handle_rotation());
        }
    }

    /// Rebuilds the resize handle from the stored radius and heading.
    pub(crate) fn refresh_resize_handle(&mut self, surface: &mut dyn RenderSurface) {
        if self.selected {
            let bearing = surface.camera_bearing();
            self.draw_resize_handle(surface, bearing);
        }
    }

    pub(crate) fn orient_handles(&mut self, surface: &mut dyn RenderSurface, camera_bearing: f64) {
        if self.selected {
            self.draw_handles(surface, camera_bearing);
        }
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Throws away every primitive and rebuilds them from the current fields.
    pub(crate) fn redraw_all(&mut self, surface: &mut dyn RenderSurface) {
        self.clear_visuals(surface);
        self.draw_center_marker(surface);
        if self.selected {
            self.activate(surface);
        } else {
            self.draw_circle(surface);
        }
    }

    pub(crate) fn clear_visuals(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(marker) = self.visuals.center.take() {
            surface.remove_marker(marker);
        }
        if let Some(circle) = self.visuals.circle.take() {
            surface.remove_circle(circle);
        }
        self.remove_handles(surface);
    }

    fn handle_rotation(&self) -> f32 {
        (self.resize_heading - self.tuning.resize_heading_deg) as f32
    }

    fn draw_center_marker(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(marker) = self.visuals.center.take() {
            surface.remove_marker(marker);
        }
        let marker = surface.add_marker(MarkerOptions {
            position: self.center,
            label: self.label.clone(),
            draggable: true,
            visible: true,
            icon: None,
            rotation: 0.0,
            anchor: CENTER_ANCHOR,
            tag: self.handle_ref(HandleRole::Center),
        });
        self.visuals.center = Some(marker);
    }

    fn draw_circle(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(circle) = self.visuals.circle.take() {
            surface.remove_circle(circle);
        }
        let (stroke_color, fill_color) = if self.selected {
            (self.style.border_color, self.style.fill_color)
        } else {
            (self.style.border_color_inactive, self.style.fill_color_inactive)
        };
        let circle = surface.add_circle(CircleOptions {
            center: self.center,
            radius_m: self.radius_m,
            stroke_color,
            fill_color,
            stroke_width: self.style.border_width,
            zone_id: self.id,
        });
        self.visuals.circle = Some(circle);
    }

    fn draw_handles(&mut self, surface: &mut dyn RenderSurface, camera_bearing: f64) {
        self.draw_resize_handle(surface, camera_bearing);
        self.draw_close_handle(surface, camera_bearing);
    }

    fn draw_resize_handle(&mut self, surface: &mut dyn RenderSurface, camera_bearing: f64) {
        if let Some(marker) = self.visuals.resize.take() {
            surface.remove_marker(marker);
        }
        let marker = surface.add_marker(MarkerOptions {
            position: self.resize_handle_position(camera_bearing),
            label: self.label.clone(),
            draggable: true,
            visible: self.selected,
            icon: Some(HandleIcon::Resize),
            rotation: self.handle_rotation(),
            anchor: HANDLE_ANCHOR,
            tag: self.handle_ref(HandleRole::Resize),
        });
        self.visuals.resize = Some(marker);
    }

    fn draw_close_handle(&mut self, surface: &mut dyn RenderSurface, camera_bearing: f64) {
        if let Some(marker) = self.visuals.close.take() {
            surface.remove_marker(marker);
        }
        let marker = surface.add_marker(MarkerOptions {
            position: self.close_handle_position(camera_bearing),
            label: self.label.clone(),
            draggable: false,
            visible: self.selected,
            icon: Some(HandleIcon::Close),
            rotation: 0.0,
            anchor: HANDLE_ANCHOR,
            tag: self.handle_ref(HandleRole::Close),
        });
        self.visuals.close = Some(marker);
    }

    fn remove_handles(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(marker) = self.visuals.resize.take() {
            surface.remove_marker(marker);
        }
        if let Some(marker) = self.visuals.close.take() {
            surface.remove_marker(marker);
        }
    }
}
