//! Applying the current color to selected drawables.

use crate::scene::Scene;
use crate::selection::Selection;
use crate::shapes::{SerializableColor, Shape, ShapeStyle};

/// Recolor a single drawable.
///
/// Outline shapes take the color as stroke and keep their fill; text and
/// freehand strokes take it as fill.
pub fn recolor(shape: &mut Shape, color: SerializableColor) {
    match shape {
        Shape::Rectangle(_) | Shape::RoundedRectangle(_) | Shape::Circle(_) | Shape::Triangle(_) => {
            shape.style_mut().stroke_color = color;
        }
        Shape::Text(_) | Shape::Freehand(_) => {
            shape.style_mut().fill_color = Some(color);
        }
    }
}

/// Apply `color` to every selected drawable.
///
/// Returns the number of drawables changed. Each one is reported as
/// modified and a render is requested when anything changed.
pub fn apply_color(scene: &mut Scene, selection: &Selection, color: SerializableColor) -> usize {
    let mut changed = 0;
    for &id in selection.ids() {
        let Some(shape) = scene.get_mut(id) else {
            continue;
        };
        recolor(shape, color);
        scene.mark_modified(id);
        changed += 1;
    }
    if changed > 0 {
        log::debug!("Applied {color} to {changed} drawable(s)");
        scene.request_render();
    }
    changed
}

/// Pencil brush settings used for new freehand strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: SerializableColor,
    pub width: f64,
}

impl Brush {
    pub fn new(color: SerializableColor, width: f64) -> Self {
        Self { color, width }
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.color = color;
    }

    /// Style given to a stroke drawn with this brush.
    pub fn stroke_style(&self) -> ShapeStyle {
        ShapeStyle::outline(self.color, self.width)
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(SerializableColor::black(), 4.0)
    }
}
