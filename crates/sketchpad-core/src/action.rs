//! Editor actions shared by toolbar buttons and keyboard shortcuts.

use crate::palette::Swatch;
use crate::shapes::{SerializableColor, ShapeKind};
use std::fmt;

/// A user intent. Buttons and shortcuts both resolve to one of these and go
/// through [`Editor::dispatch`](crate::editor::Editor::dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Switch to the pointer tool.
    SelectPointer,
    /// Switch to the pencil tool.
    SelectPencil,
    /// Remove the selected drawables.
    Delete,
    OpenShapePicker,
    CloseShapePicker,
    /// Create a drawable at the spawn point in the current color.
    CreateShape(ShapeKind),
    /// Create a text box with the default content.
    CreateText,
    PickSwatch(Swatch),
    PickColor(SerializableColor),
    SelectAll,
    /// Clear the selection and return to the pointer tool.
    ClickAway,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SelectPointer => f.write_str("select pointer"),
            Action::SelectPencil => f.write_str("select pencil"),
            Action::Delete => f.write_str("delete"),
            Action::OpenShapePicker => f.write_str("open shape picker"),
            Action::CloseShapePicker => f.write_str("close shape picker"),
            Action::CreateShape(kind) => write!(f, "create {kind}"),
            Action::CreateText => f.write_str("create text"),
            Action::PickSwatch(swatch) => write!(f, "pick {}", swatch.name()),
            Action::PickColor(color) => write!(f, "pick {color}"),
            Action::SelectAll => f.write_str("select all"),
            Action::ClickAway => f.write_str("click away"),
        }
    }
}
