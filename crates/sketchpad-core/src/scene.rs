//! The scene: drawables in z-order plus the viewport transform.

use crate::shapes::{Shape, ShapeId};
use crate::viewport::Viewport;
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// Change notification emitted by scene mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    ObjectAdded(ShapeId),
    ObjectRemoved(ShapeId),
    ObjectModified(ShapeId),
}

impl SceneEvent {
    pub fn id(&self) -> ShapeId {
        match self {
            SceneEvent::ObjectAdded(id)
            | SceneEvent::ObjectRemoved(id)
            | SceneEvent::ObjectModified(id) => *id,
        }
    }
}

/// All drawables of one editor session.
///
/// The scene exclusively owns its drawables; everything else refers to
/// them by [`ShapeId`]. Mutations record [`SceneEvent`]s which the editor
/// drains and hands to subscribers.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: HashMap<ShapeId, Shape>,
    /// Back to front.
    z_order: Vec<ShapeId>,
    /// Pan/zoom and surface size.
    pub viewport: Viewport,
    /// Freehand drawing enabled; true exactly while the pencil tool is active.
    drawing_mode: bool,
    events: Vec<SceneEvent>,
    render_requested: bool,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with the given viewport.
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Rebuild a scene from drawables in z-order without emitting events.
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn from_shapes(shapes: Vec<Shape>, viewport: Viewport) -> Self {
        let mut scene = Self::with_viewport(viewport);
        for shape in shapes {
            scene.insert(shape);
        }
        scene
    }

    fn insert(&mut self, shape: Shape) -> Option<ShapeId> {
        let id = shape.id();
        if self.shapes.contains_key(&id) {
            log::warn!("Rejected drawable with duplicate id {id}");
            return None;
        }
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        Some(id)
    }

    /// Add a drawable on top of the z-order.
    ///
    /// Returns `false` (and changes nothing) if a drawable with the same id
    /// is already present.
    pub fn add(&mut self, shape: Shape) -> bool {
        match self.insert(shape) {
            Some(id) => {
                self.events.push(SceneEvent::ObjectAdded(id));
                true
            }
            None => false,
        }
    }

    /// Remove a drawable.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(&id)?;
        self.z_order.retain(|&shape_id| shape_id != id);
        self.events.push(SceneEvent::ObjectRemoved(id));
        Some(removed)
    }

    /// Remove several drawables, returning those that existed.
    pub fn remove_many(&mut self, ids: &[ShapeId]) -> Vec<Shape> {
        ids.iter().filter_map(|&id| self.remove(id)).collect()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Mutable access to a drawable.
    ///
    /// Callers report the change with [`Scene::mark_modified`].
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Record that a drawable's properties changed.
    pub fn mark_modified(&mut self, id: ShapeId) {
        if self.shapes.contains_key(&id) {
            self.events.push(SceneEvent::ObjectModified(id));
        }
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Drawables in z-order (back to front).
    pub fn objects(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Ids in z-order (back to front).
    pub fn ids(&self) -> &[ShapeId] {
        &self.z_order
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Topmost drawable under a scene point.
    pub fn topmost_at(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.shapes
                .get(id)
                .is_some_and(|s| s.hit_test(point, tolerance))
        })
    }

    /// Bounding box of all drawables.
    pub fn bounds(&self) -> Option<Rect> {
        self.objects()
            .map(Shape::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    pub fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    pub fn set_drawing_mode(&mut self, enabled: bool) {
        self.drawing_mode = enabled;
    }

    /// Ask the host to redraw on its next frame.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Consume a pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Take all change notifications recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Rectangle, ShapeTrait};

    fn rect_at(x: f64, y: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Point::new(x, y), 100.0, 100.0))
    }

    #[test]
    fn test_scene_creation() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(!scene.is_drawing_mode());
    }

    #[test]
    fn test_add_shape_emits_event() {
        let mut scene = Scene::new();
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        let id = rect.id();

        assert!(scene.add(Shape::Rectangle(rect)));
        assert_eq!(scene.len(), 1);
        assert!(scene.get(id).is_some());
        assert_eq!(scene.drain_events(), vec![SceneEvent::ObjectAdded(id)]);
        assert!(!scene.has_pending_events());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut scene = Scene::new();
        let shape = rect_at(0.0, 0.0);
        assert!(scene.add(shape.clone()));
        assert!(!scene.add(shape));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.ids().len(), 1);
    }

    #[test]
    fn test_remove_shape() {
        let mut scene = Scene::new();
        let shape = rect_at(0.0, 0.0);
        let id = shape.id();
        scene.add(shape);
        scene.drain_events();

        assert!(scene.remove(id).is_some());
        assert!(scene.is_empty());
        assert!(scene.ids().is_empty());
        assert_eq!(scene.drain_events(), vec![SceneEvent::ObjectRemoved(id)]);

        assert!(scene.remove(id).is_none());
        assert!(!scene.has_pending_events());
    }

    #[test]
    fn test_mark_modified_only_for_known_ids() {
        let mut scene = Scene::new();
        let shape = rect_at(0.0, 0.0);
        let id = shape.id();
        scene.add(shape);
        scene.drain_events();

        scene.mark_modified(id);
        scene.mark_modified(ShapeId::new_v4());
        assert_eq!(scene.drain_events(), vec![SceneEvent::ObjectModified(id)]);
    }

    #[test]
    fn test_topmost_at_prefers_front() {
        let mut scene = Scene::new();
        let back = rect_at(0.0, 0.0);
        let front = rect_at(50.0, 50.0);
        let (id1, id2) = (back.id(), front.id());
        scene.add(back);
        scene.add(front);

        assert_eq!(scene.topmost_at(Point::new(75.0, 75.0), 0.0), Some(id2));
        assert_eq!(scene.topmost_at(Point::new(25.0, 25.0), 0.0), Some(id1));
        assert_eq!(scene.topmost_at(Point::new(500.0, 500.0), 0.0), None);
    }

    #[test]
    fn test_objects_in_z_order() {
        let mut scene = Scene::new();
        let a = rect_at(0.0, 0.0);
        let b = Shape::Circle(Circle::new(Point::ZERO, 10.0));
        let (ida, idb) = (a.id(), b.id());
        scene.add(a);
        scene.add(b);
        let ids: Vec<_> = scene.objects().map(Shape::id).collect();
        assert_eq!(ids, vec![ida, idb]);
    }

    #[test]
    fn test_render_request_is_consumed() {
        let mut scene = Scene::new();
        assert!(!scene.take_render_request());
        scene.request_render();
        assert!(scene.take_render_request());
        assert!(!scene.take_render_request());
    }

    #[test]
    fn test_from_shapes_is_silent() {
        let shapes = vec![rect_at(0.0, 0.0), rect_at(10.0, 10.0)];
        let mut scene = Scene::from_shapes(shapes, Viewport::default());
        assert_eq!(scene.len(), 2);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn test_bounds() {
        let mut scene = Scene::new();
        assert!(scene.bounds().is_none());
        scene.add(rect_at(0.0, 0.0));
        scene.add(rect_at(50.0, 100.0));
        let bounds = scene.bounds().unwrap();
        assert!((bounds.x1 - 150.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 200.0).abs() < f64::EPSILON);
    }
}
