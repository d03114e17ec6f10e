//! Text shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A wrapping text box.
///
/// Glyph layout belongs to the renderer; bounds are estimated from the box
/// width, the font size and the number of lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Position (top-left corner of text bounding box).
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Box width; lines wrap inside it.
    pub width: f64,
    /// Font size in pixels.
    pub font_size: f64,
    /// Style properties. Glyphs are painted with the fill color.
    pub style: ShapeStyle,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Default box width.
    pub const DEFAULT_WIDTH: f64 = 100.0;

    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f64 = 1.16;

    /// Create a new text shape.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            width: Self::DEFAULT_WIDTH,
            font_size: Self::DEFAULT_FONT_SIZE,
            style: ShapeStyle::default(),
        }
    }

    /// Number of rendered lines, counting explicit breaks and a rough wrap estimate.
    pub fn line_count(&self) -> usize {
        // Average glyph advance is roughly half the font size.
        let chars_per_line = ((self.width / (self.font_size * 0.5)).floor() as usize).max(1);
        self.content
            .split('\n')
            .map(|line| line.chars().count().div_ceil(chars_per_line).max(1))
            .sum()
    }

    /// Estimated height of the text box.
    pub fn height(&self) -> f64 {
        self.line_count() as f64 * self.font_size * Self::LINE_HEIGHT
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height()))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.bounds().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
