//! Tool system for the whiteboard.

use crate::input::Modifiers;
use crate::scene::Scene;
use crate::selection::Selection;
use crate::shapes::{Freehand, SerializableColor, Shape, ShapeId};
use crate::style::Brush;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Simplification tolerance applied to finished pencil strokes, in scene units.
const STROKE_SIMPLIFY_TOLERANCE: f64 = 0.5;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Select and move drawables.
    #[default]
    Pointer,
    /// Freehand drawing.
    Pencil,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Pointer => "pointer",
            ToolKind::Pencil => "pencil",
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// Waiting for interaction.
    #[default]
    Idle,
    /// The shape picker is open; nothing is recorded until a kind is chosen.
    ShapePicker,
    /// Pointer drag moving the drawables selected at press time.
    Moving {
        targets: Vec<ShapeId>,
        /// Last pointer position in scene coordinates.
        last: Point,
        /// Whether anything moved since the press.
        moved: bool,
    },
    /// Pencil stroke being captured.
    Drawing {
        /// Points so far, in scene coordinates.
        points: Vec<Point>,
    },
}

/// Manages the active tool, the current color and in-progress gestures.
#[derive(Debug, Clone)]
pub struct ToolController {
    tool: ToolKind,
    state: ToolState,
    /// Color for new drawables; persists across tool switches.
    color: SerializableColor,
    brush: Brush,
    brush_width: f64,
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new(SerializableColor::black(), 4.0)
    }
}

impl ToolController {
    pub fn new(color: SerializableColor, brush_width: f64) -> Self {
        Self {
            tool: ToolKind::Pointer,
            state: ToolState::Idle,
            color,
            brush: Brush::new(color, brush_width),
            brush_width,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn is_picking_shape(&self) -> bool {
        self.state == ToolState::ShapePicker
    }

    /// Check if a drag or stroke is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Moving { .. } | ToolState::Drawing { .. })
    }

    /// Switch to the pointer tool. Drawing mode goes off; the selection is kept.
    pub fn select_pointer(&mut self, scene: &mut Scene) {
        self.end_gesture(scene);
        self.tool = ToolKind::Pointer;
        scene.set_drawing_mode(false);
        scene.request_render();
        log::debug!("Tool: pointer");
    }

    /// Switch to the pencil tool with a fresh brush in the current color.
    ///
    /// Selecting the pencil while it is already active keeps drawing mode on.
    pub fn select_pencil(&mut self, scene: &mut Scene) {
        self.end_gesture(scene);
        self.tool = ToolKind::Pencil;
        self.brush = Brush::new(self.color, self.brush_width);
        scene.set_drawing_mode(true);
        log::debug!("Tool: pencil ({})", self.color);
    }

    pub fn open_shape_picker(&mut self) {
        self.state = ToolState::ShapePicker;
    }

    pub fn close_shape_picker(&mut self) {
        if self.is_picking_shape() {
            self.state = ToolState::Idle;
        }
    }

    /// Change the current color; the brush follows it.
    pub fn set_color(&mut self, color: SerializableColor) {
        self.color = color;
        self.brush.set_color(color);
    }

    /// Drop the selection and fall back to the pointer tool.
    pub fn click_away(&mut self, scene: &mut Scene, selection: &mut Selection) {
        selection.clear();
        self.select_pointer(scene);
    }

    /// Pointer pressed at a scene point.
    pub fn pointer_down(
        &mut self,
        scene: &mut Scene,
        selection: &mut Selection,
        point: Point,
        modifiers: Modifiers,
        tolerance: f64,
    ) {
        self.close_shape_picker();
        // A press without a matching release (focus loss) ends the old gesture.
        self.end_gesture(scene);
        match self.tool {
            ToolKind::Pointer => {
                let Some(id) = scene.topmost_at(point, tolerance) else {
                    self.click_away(scene, selection);
                    return;
                };
                if modifiers.shift {
                    selection.add(id);
                } else if !selection.contains(id) {
                    selection.set(id);
                }
                self.state = ToolState::Moving {
                    targets: selection.ids().to_vec(),
                    last: point,
                    moved: false,
                };
                scene.request_render();
            }
            ToolKind::Pencil => {
                self.state = ToolState::Drawing {
                    points: vec![point],
                };
            }
        }
    }

    /// Pointer moved to a scene point.
    pub fn pointer_move(&mut self, scene: &mut Scene, point: Point) {
        match &mut self.state {
            ToolState::Moving {
                targets,
                last,
                moved,
            } => {
                let delta = point - *last;
                if delta.hypot2() == 0.0 {
                    return;
                }
                for &id in targets.iter() {
                    if let Some(shape) = scene.get_mut(id) {
                        shape.translate(delta);
                    }
                }
                *last = point;
                *moved = true;
                scene.request_render();
            }
            ToolState::Drawing { points } => {
                if points.last() != Some(&point) {
                    points.push(point);
                    scene.request_render();
                }
            }
            ToolState::Idle | ToolState::ShapePicker => {}
        }
    }

    /// Pointer released at a scene point.
    ///
    /// Returns the id of a stroke the pencil inserted, if any.
    pub fn pointer_up(&mut self, scene: &mut Scene, point: Point) -> Option<ShapeId> {
        if !self.is_active() {
            return None;
        }
        self.pointer_move(scene, point);
        match std::mem::take(&mut self.state) {
            ToolState::Drawing { points } => self.finish_stroke(scene, points),
            moving => {
                self.state = moving;
                self.end_gesture(scene);
                None
            }
        }
    }

    /// Abandon any gesture in progress.
    ///
    /// Drawables already dragged stay where they are and are reported as
    /// modified; a stroke in progress is dropped.
    pub fn cancel(&mut self, scene: &mut Scene) {
        if self.is_active() {
            self.end_gesture(scene);
        }
    }

    /// Leave the current gesture, recording a finished drag as modifications.
    fn end_gesture(&mut self, scene: &mut Scene) {
        match std::mem::take(&mut self.state) {
            ToolState::Moving {
                targets,
                moved: true,
                ..
            } => {
                for id in targets {
                    scene.mark_modified(id);
                }
            }
            ToolState::Drawing { points } if points.len() > 1 => {
                log::debug!("Dropped unfinished pencil stroke");
                scene.request_render();
            }
            _ => {}
        }
    }

    fn finish_stroke(&self, scene: &mut Scene, points: Vec<Point>) -> Option<ShapeId> {
        if points.len() < 2 {
            log::trace!("Discarded pencil stroke with {} point(s)", points.len());
            return None;
        }
        let mut stroke = Freehand::with_style(points, self.brush.stroke_style());
        stroke.simplify(STROKE_SIMPLIFY_TOLERANCE);
        let shape = Shape::Freehand(stroke);
        let id = shape.id();
        if !scene.add(shape) {
            return None;
        }
        scene.request_render();
        Some(id)
    }

    /// The stroke being drawn, for hosts that render it live.
    pub fn preview_shape(&self) -> Option<Shape> {
        match &self.state {
            ToolState::Drawing { points } if points.len() >= 2 => Some(Shape::Freehand(
                Freehand::with_style(points.clone(), self.brush.stroke_style()),
            )),
            _ => None,
        }
    }
}
