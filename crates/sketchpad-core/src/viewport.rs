//! Viewport: pan/zoom transform and render-surface size.

use crate::input::{EventDisposition, WheelInput};
use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default logical size of the render surface.
pub const DEFAULT_SURFACE_SIZE: Size = Size::new(1024.0, 1024.0);

/// Smallest zoom the wheel can reach.
pub const MIN_ZOOM: f64 = 0.01;

/// Largest zoom the wheel can reach.
pub const MAX_ZOOM: f64 = 20.0;

/// Default per-unit wheel zoom factor: zoom *= ZOOM_BASE ^ delta_y.
pub const ZOOM_BASE: f64 = 0.99;

/// View transform for the scene.
///
/// Screen (surface) coordinates relate to scene coordinates by
/// `screen = scene * zoom + offset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level
    pub zoom: f64,
    /// Minimum allowed zoom level
    #[serde(skip, default = "default_min_zoom")]
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    #[serde(skip, default = "default_max_zoom")]
    pub max_zoom: f64,
    /// Wheel zoom factor per unit of vertical delta
    #[serde(skip, default = "default_zoom_base")]
    pub zoom_base: f64,
    /// Size of the backing render surface; follows the container, never persisted.
    #[serde(skip, default = "default_surface_size")]
    pub surface_size: Size,
}

fn default_min_zoom() -> f64 {
    MIN_ZOOM
}

fn default_max_zoom() -> f64 {
    MAX_ZOOM
}

fn default_zoom_base() -> f64 {
    ZOOM_BASE
}

fn default_surface_size() -> Size {
    DEFAULT_SURFACE_SIZE
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_base: ZOOM_BASE,
            surface_size: DEFAULT_SURFACE_SIZE,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene → screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen → scene transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_scene(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn scene_to_screen(&self, scene_point: Point) -> Point {
        self.transform() * scene_point
    }

    /// Center of the render surface in screen coordinates.
    pub fn surface_center(&self) -> Point {
        Point::new(self.surface_size.width / 2.0, self.surface_size.height / 2.0)
    }

    /// The scene point currently shown at the center of the surface.
    pub fn center(&self) -> Point {
        self.screen_to_scene(self.surface_center())
    }

    /// Resize the backing surface.
    pub fn set_surface_size(&mut self, size: Size) {
        self.surface_size = size;
    }

    /// Pan by a delta in screen coordinates.
    ///
    /// A pan that would leave the offset non-finite is ignored.
    pub fn relative_pan(&mut self, delta: Vec2) {
        let offset = self.offset + delta;
        if offset.is_finite() {
            self.offset = offset;
        }
    }

    /// Clamp a zoom value to this viewport's limits.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Set the zoom level, keeping the scene point under `screen_point` fixed.
    ///
    /// Non-finite zoom values or anchors leave the viewport unchanged.
    pub fn zoom_to_point(&mut self, screen_point: Point, zoom: f64) {
        if zoom.is_nan() || !screen_point.is_finite() {
            return;
        }
        let zoom = self.clamp_zoom(zoom);
        let anchor = self.screen_to_scene(screen_point);
        let previous = self.zoom;
        self.zoom = zoom;
        let offset = self.offset + (screen_point - self.scene_to_screen(anchor));
        if offset.is_finite() {
            self.offset = offset;
        } else {
            self.zoom = previous;
        }
    }

    /// Whether zoom and offset are usable numbers.
    pub fn is_finite(&self) -> bool {
        self.zoom.is_finite() && self.zoom > 0.0 && self.offset.is_finite()
    }

    /// React to a wheel/trackpad scroll.
    ///
    /// * zoom modifier held: zoom by `zoom_base ^ delta.y` about the pointer
    ///   (surface center when the pointer position is unknown);
    /// * alt held: pan vertically only;
    /// * otherwise: pan by the raw delta.
    ///
    /// Scrolls over the surface never reach the page.
    pub fn handle_wheel(&mut self, wheel: &WheelInput) -> EventDisposition {
        if !wheel.delta.is_finite() {
            log::debug!("Ignoring non-finite wheel delta {:?}", wheel.delta);
            return EventDisposition::Consumed;
        }
        if wheel.modifiers.zoom() {
            let zoom = self.zoom * self.zoom_base.powf(wheel.delta.y);
            let anchor = wheel
                .pointer
                .filter(|p| p.is_finite())
                .unwrap_or_else(|| self.surface_center());
            self.zoom_to_point(anchor, zoom);
            log::trace!("Wheel zoom: {:.3}", self.zoom);
        } else if wheel.modifiers.alt {
            self.relative_pan(Vec2::new(0.0, wheel.delta.y));
        } else {
            self.relative_pan(wheel.delta);
        }
        EventDisposition::Consumed
    }

    /// Reset pan and zoom, keeping the surface size.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn wheel(delta: Vec2, modifiers: Modifiers, pointer: Option<Point>) -> WheelInput {
        WheelInput {
            delta,
            pointer,
            modifiers,
        }
    }

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::default()
        }
    }

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
        assert_eq!(viewport.surface_size, DEFAULT_SURFACE_SIZE);
    }

    #[test]
    fn test_center_of_default_surface() {
        let viewport = Viewport::new();
        assert_eq!(viewport.center(), Point::new(512.0, 512.0));
    }

    #[test]
    fn test_center_follows_pan_and_zoom() {
        let mut viewport = Viewport::new();
        viewport.relative_pan(Vec2::new(112.0, 12.0));
        assert_eq!(viewport.center(), Point::new(400.0, 500.0));

        viewport.offset = Vec2::ZERO;
        viewport.zoom = 2.0;
        assert_eq!(viewport.center(), Point::new(256.0, 256.0));
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(30.0, -20.0);
        viewport.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let scene = viewport.screen_to_scene(original);
        let back = viewport.scene_to_screen(scene);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_to_point_keeps_anchor() {
        let mut viewport = Viewport::new();
        let anchor = Point::new(200.0, 300.0);
        let before = viewport.screen_to_scene(anchor);
        viewport.zoom_to_point(anchor, 3.0);
        let after = viewport.screen_to_scene(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_zoom_inverse_deltas() {
        let mut viewport = Viewport::new();
        let pointer = Some(Point::new(100.0, 100.0));
        viewport.handle_wheel(&wheel(Vec2::new(0.0, 40.0), ctrl(), pointer));
        assert!(viewport.zoom < 1.0);
        viewport.handle_wheel(&wheel(Vec2::new(0.0, -40.0), ctrl(), pointer));
        assert!((viewport.zoom - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_zoom_clamped() {
        let mut viewport = Viewport::new();
        viewport.handle_wheel(&wheel(Vec2::new(0.0, 100_000.0), ctrl(), None));
        assert!((viewport.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        viewport.handle_wheel(&wheel(Vec2::new(0.0, -100_000.0), ctrl(), None));
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_zoom_without_pointer_uses_center() {
        let mut viewport = Viewport::new();
        let center_before = viewport.center();
        viewport.handle_wheel(&wheel(Vec2::new(0.0, -50.0), ctrl(), None));
        let center_after = viewport.center();
        assert!((center_before.x - center_after.x).abs() < 1e-9);
        assert!((center_before.y - center_after.y).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_pan() {
        let mut viewport = Viewport::new();
        let disposition = viewport.handle_wheel(&wheel(Vec2::new(10.0, 20.0), Modifiers::default(), None));
        assert_eq!(disposition, EventDisposition::Consumed);
        assert_eq!(viewport.offset, Vec2::new(10.0, 20.0));
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_alt_pans_vertically() {
        let mut viewport = Viewport::new();
        let alt = Modifiers {
            alt: true,
            ..Modifiers::default()
        };
        viewport.handle_wheel(&wheel(Vec2::new(10.0, 20.0), alt, None));
        assert_eq!(viewport.offset, Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_non_finite_wheel_is_ignored() {
        let mut viewport = Viewport::new();
        viewport.zoom = 2.0;
        viewport.offset = Vec2::new(5.0, -5.0);
        for delta in [
            Vec2::new(0.0, f64::NAN),
            Vec2::new(f64::INFINITY, 0.0),
            Vec2::new(0.0, f64::NEG_INFINITY),
        ] {
            for modifiers in [ctrl(), Modifiers::NONE] {
                let disposition = viewport.handle_wheel(&wheel(delta, modifiers, None));
                assert_eq!(disposition, EventDisposition::Consumed);
                assert!((viewport.zoom - 2.0).abs() < f64::EPSILON);
                assert_eq!(viewport.offset, Vec2::new(5.0, -5.0));
            }
        }
    }

    #[test]
    fn test_non_finite_zoom_and_pan_rejected() {
        let mut viewport = Viewport::new();
        viewport.zoom_to_point(Point::new(10.0, 10.0), f64::NAN);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
        viewport.zoom_to_point(Point::new(f64::INFINITY, 0.0), 2.0);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);

        viewport.relative_pan(Vec2::new(f64::MAX, 0.0));
        viewport.relative_pan(Vec2::new(f64::MAX, 0.0));
        assert!(viewport.offset.is_finite());
        assert!(viewport.is_finite());
    }

    #[test]
    fn test_huge_zoom_delta_stays_clamped() {
        let mut viewport = Viewport::new();
        viewport.handle_wheel(&wheel(Vec2::new(0.0, -1.0e9), ctrl(), None));
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);
        assert!(viewport.is_finite());
    }

    #[test]
    fn test_surface_size_not_serialized() {
        let mut viewport = Viewport::new();
        viewport.set_surface_size(Size::new(300.0, 200.0));
        viewport.zoom = 2.0;
        let json = serde_json::to_string(&viewport).unwrap();
        let restored: Viewport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.surface_size, DEFAULT_SURFACE_SIZE);
        assert!((restored.zoom - 2.0).abs() < f64::EPSILON);
    }
}
