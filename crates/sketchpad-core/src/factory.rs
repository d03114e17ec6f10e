//! Creation of drawables with their default geometry.

use crate::scene::Scene;
use crate::shapes::{
    Circle, Rectangle, SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle, Text, Triangle,
};
use kurbo::{Point, Vec2};

/// Content of text created from the toolbar.
pub const DEFAULT_TEXT: &str = "New Text";

/// Stroke width of factory-made outline shapes.
pub const OUTLINE_WIDTH: f64 = 4.0;

const RECT_SIZE: f64 = 100.0;
const ROUNDED_RECT_SIZE: f64 = 20.0;
const ROUNDED_RECT_RADIUS: f64 = 5.0;
const CIRCLE_RADIUS: f64 = 50.0;
const TRIANGLE_SIZE: f64 = 100.0;

/// Places new drawables relative to the visible center of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawableFactory {
    spawn_offset: Vec2,
}

impl Default for DrawableFactory {
    fn default() -> Self {
        Self::new(Vec2::new(100.0, 200.0))
    }
}

impl DrawableFactory {
    pub fn new(spawn_offset: Vec2) -> Self {
        Self { spawn_offset }
    }

    /// Where the next drawable goes: viewport center minus the spawn offset.
    pub fn spawn_point(&self, scene: &Scene) -> Point {
        scene.viewport.center() - self.spawn_offset
    }

    /// Build a drawable of `kind` at `position` without inserting it.
    ///
    /// Outline shapes take `color` as stroke with a transparent interior;
    /// text takes it as fill. Freehand strokes come from the pencil, so
    /// there is nothing to build for them here.
    pub fn build(kind: ShapeKind, position: Point, color: SerializableColor) -> Option<Shape> {
        let outline = ShapeStyle::outline(color, OUTLINE_WIDTH);
        let shape = match kind {
            ShapeKind::Rectangle => {
                let mut rect = Rectangle::new(position, RECT_SIZE, RECT_SIZE);
                rect.style = outline;
                Shape::Rectangle(rect)
            }
            ShapeKind::RoundedRectangle => {
                let mut rect = Rectangle::rounded(
                    position,
                    ROUNDED_RECT_SIZE,
                    ROUNDED_RECT_SIZE,
                    ROUNDED_RECT_RADIUS,
                );
                rect.style = outline;
                Shape::RoundedRectangle(rect)
            }
            ShapeKind::Circle => {
                let mut circle = Circle::new(position, CIRCLE_RADIUS);
                circle.style = outline;
                Shape::Circle(circle)
            }
            ShapeKind::Triangle => {
                let mut triangle = Triangle::new(position, TRIANGLE_SIZE, TRIANGLE_SIZE);
                triangle.style = outline;
                Shape::Triangle(triangle)
            }
            ShapeKind::Text => Shape::Text(Self::text(position, DEFAULT_TEXT, color)),
            ShapeKind::Freehand => return None,
        };
        Some(shape)
    }

    fn text(position: Point, content: &str, color: SerializableColor) -> Text {
        let mut text = Text::new(position, content.to_string());
        text.style = ShapeStyle::filled(color);
        text
    }

    /// Create a drawable at the spawn point and insert it into the scene.
    pub fn create_shape(
        &self,
        scene: &mut Scene,
        kind: ShapeKind,
        color: SerializableColor,
    ) -> Option<ShapeId> {
        let shape = Self::build(kind, self.spawn_point(scene), color)?;
        self.insert(scene, shape)
    }

    /// Create a text box with the given content at the spawn point.
    pub fn create_text(
        &self,
        scene: &mut Scene,
        content: &str,
        color: SerializableColor,
    ) -> Option<ShapeId> {
        let text = Self::text(self.spawn_point(scene), content, color);
        self.insert(scene, Shape::Text(text))
    }

    fn insert(&self, scene: &mut Scene, shape: Shape) -> Option<ShapeId> {
        let id = shape.id();
        let kind = shape.kind();
        if !scene.add(shape) {
            return None;
        }
        log::debug!("Created {kind} {id}");
        scene.request_render();
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneEvent;

    fn red() -> SerializableColor {
        SerializableColor::rgb(0xef, 0x44, 0x44)
    }

    #[test]
    fn test_spawn_point_default_viewport() {
        let scene = Scene::new();
        let factory = DrawableFactory::default();
        assert_eq!(factory.spawn_point(&scene), Point::new(412.0, 312.0));
    }

    #[test]
    fn test_create_rectangle() {
        let mut scene = Scene::new();
        let factory = DrawableFactory::default();
        let id = factory
            .create_shape(&mut scene, ShapeKind::Rectangle, red())
            .unwrap();

        let shape = scene.get(id).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Rectangle);
        assert_eq!(shape.position(), Point::new(412.0, 312.0));
        assert_eq!(shape.style().stroke_color, red());
        assert!(shape.style().has_transparent_fill());
        assert!((shape.style().stroke_width - 4.0).abs() < f64::EPSILON);
        assert!((shape.bounds().width() - 100.0).abs() < f64::EPSILON);
        assert!(scene.take_render_request());
        assert_eq!(scene.drain_events(), vec![SceneEvent::ObjectAdded(id)]);
    }

    #[test]
    fn test_create_rounded_rectangle() {
        let mut scene = Scene::new();
        let id = DrawableFactory::default()
            .create_shape(&mut scene, ShapeKind::RoundedRectangle, red())
            .unwrap();
        match scene.get(id).unwrap() {
            Shape::RoundedRectangle(rect) => {
                assert!((rect.width - 20.0).abs() < f64::EPSILON);
                assert!((rect.corner_radius - 5.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected shape {:?}", other.kind()),
        }
    }

    #[test]
    fn test_create_circle_and_triangle_geometry() {
        let mut scene = Scene::new();
        let factory = DrawableFactory::default();
        let circle = factory
            .create_shape(&mut scene, ShapeKind::Circle, red())
            .unwrap();
        let triangle = factory
            .create_shape(&mut scene, ShapeKind::Triangle, red())
            .unwrap();

        let circle = scene.get(circle).unwrap();
        assert_eq!(circle.position(), Point::new(412.0, 312.0));
        assert!((circle.bounds().width() - 100.0).abs() < f64::EPSILON);

        let triangle = scene.get(triangle).unwrap();
        assert!((triangle.bounds().height() - 100.0).abs() < f64::EPSILON);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_create_text_uses_fill() {
        let mut scene = Scene::new();
        let id = DrawableFactory::default()
            .create_text(&mut scene, "hello", red())
            .unwrap();
        match scene.get(id).unwrap() {
            Shape::Text(text) => {
                assert_eq!(text.content, "hello");
                assert_eq!(text.style.fill_color, Some(red()));
                assert!((text.font_size - 20.0).abs() < f64::EPSILON);
                assert_eq!(text.position, Point::new(412.0, 312.0));
            }
            other => panic!("unexpected shape {:?}", other.kind()),
        }
    }

    #[test]
    fn test_text_kind_has_default_content() {
        let shape = DrawableFactory::build(ShapeKind::Text, Point::ZERO, red()).unwrap();
        match shape {
            Shape::Text(text) => assert_eq!(text.content, DEFAULT_TEXT),
            other => panic!("unexpected shape {:?}", other.kind()),
        }
    }

    #[test]
    fn test_freehand_not_buildable() {
        let mut scene = Scene::new();
        let created =
            DrawableFactory::default().create_shape(&mut scene, ShapeKind::Freehand, red());
        assert!(created.is_none());
        assert!(scene.is_empty());
        assert!(!scene.take_render_request());
    }

    #[test]
    fn test_spawn_follows_viewport() {
        let mut scene = Scene::new();
        scene.viewport.zoom = 2.0;
        let id = DrawableFactory::new(Vec2::new(10.0, 20.0))
            .create_shape(&mut scene, ShapeKind::Rectangle, red())
            .unwrap();
        assert_eq!(scene.get(id).unwrap().position(), Point::new(246.0, 236.0));
    }
}
