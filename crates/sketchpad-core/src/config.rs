//! Editor configuration.

use crate::shapes::SerializableColor;
use crate::viewport::{DEFAULT_SURFACE_SIZE, MAX_ZOOM, MIN_ZOOM, Viewport, ZOOM_BASE};
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// Tunables for an editor session.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Storage key the scene snapshot is written under.
    pub storage_key: String,
    /// New drawables spawn at `viewport.center() - spawn_offset`.
    pub spawn_offset: Vec2,
    /// Initial render-surface size, until the container reports its own.
    pub surface_size: Size,
    /// Pencil stroke width.
    pub brush_width: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Wheel zoom factor per unit of vertical delta.
    pub zoom_base: f64,
    /// Pointer hit-test slop in screen pixels.
    pub hit_tolerance: f64,
    /// Color selected when the editor starts.
    pub default_color: SerializableColor,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: "canvas".to_string(),
            spawn_offset: Vec2::new(100.0, 200.0),
            surface_size: DEFAULT_SURFACE_SIZE,
            brush_width: 4.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_base: ZOOM_BASE,
            hit_tolerance: 4.0,
            default_color: SerializableColor::black(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply the configured limits to a viewport loaded from storage.
    ///
    /// A stored pan or zoom that is not a usable number is reset.
    pub fn configure_viewport(&self, viewport: &mut Viewport) {
        if !viewport.is_finite() {
            log::warn!("Resetting unusable stored viewport");
            viewport.reset();
        }
        viewport.min_zoom = self.min_zoom;
        viewport.max_zoom = self.max_zoom;
        viewport.zoom_base = self.zoom_base;
        viewport.set_surface_size(self.surface_size);
        viewport.zoom = viewport.clamp_zoom(viewport.zoom);
    }
}
