//! Keyboard shortcut mapping and documentation.
//!
//! Key events resolve to the same [`Action`]s the toolbar dispatches, so a
//! shortcut and its button share one code path.

use crate::action::Action;
use crate::input::{KeyInput, Modifiers};
use crate::palette::Swatch;
use crate::shapes::ShapeKind;

/// Resolve a key event to an action.
///
/// `key` is the `KeyboardEvent.key` value. Letters match in either case,
/// since shift (or caps lock) changes the reported character. Alt
/// combinations are never bound.
pub fn resolve(input: &KeyInput) -> Option<Action> {
    let Modifiers { shift, alt, .. } = input.modifiers;
    let key = input.key.as_str();

    if alt {
        return None;
    }

    if input.modifiers.command() {
        return match key {
            "a" | "A" if !shift => Some(Action::SelectAll),
            _ => None,
        };
    }

    if shift {
        return match key {
            "s" | "S" => Some(Action::CreateShape(ShapeKind::Rectangle)),
            "c" | "C" => Some(Action::CreateShape(ShapeKind::Circle)),
            "t" | "T" => Some(Action::CreateShape(ShapeKind::Triangle)),
            _ => None,
        };
    }

    match key {
        "v" | "V" => Some(Action::SelectPointer),
        "p" | "P" => Some(Action::SelectPencil),
        "t" | "T" => Some(Action::CreateText),
        "Delete" | "Backspace" => Some(Action::Delete),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(digit), None) => Swatch::from_digit(digit).map(Action::PickSwatch),
                _ => None,
            }
        }
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl, or Cmd on macOS.
    pub command: bool,
    pub shift: bool,
    pub action: Action,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        command: bool,
        shift: bool,
        action: Action,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            command,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl/Cmd+A").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl/Cmd".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        // Single letters display in uppercase; named keys as-is.
        if self.key.chars().count() == 1 {
            parts.push(self.key.to_uppercase());
        } else {
            parts.push(self.key.to_string());
        }
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts = vec![
            Shortcut::new("v", false, false, Action::SelectPointer, "Pointer tool"),
            Shortcut::new("p", false, false, Action::SelectPencil, "Pencil tool"),
            Shortcut::new("t", false, false, Action::CreateText, "Add text"),
            Shortcut::new(
                "s",
                false,
                true,
                Action::CreateShape(ShapeKind::Rectangle),
                "Add square",
            ),
            Shortcut::new(
                "c",
                false,
                true,
                Action::CreateShape(ShapeKind::Circle),
                "Add circle",
            ),
            Shortcut::new(
                "t",
                false,
                true,
                Action::CreateShape(ShapeKind::Triangle),
                "Add triangle",
            ),
        ];
        const DIGITS: [&str; 6] = ["1", "2", "3", "4", "5", "6"];
        shortcuts.extend(Swatch::all().iter().zip(DIGITS).map(|(&swatch, digit)| {
            Shortcut::new(digit, false, false, Action::PickSwatch(swatch), swatch.name())
        }));
        shortcuts.extend([
            Shortcut::new("Delete", false, false, Action::Delete, "Delete selected"),
            Shortcut::new("Backspace", false, false, Action::Delete, "Delete selected"),
            Shortcut::new("a", true, false, Action::SelectAll, "Select all"),
        ]);
        shortcuts
    }

    /// Help text listing every shortcut, one per line.
    pub fn help_text() -> String {
        Self::all()
            .iter()
            .map(|s| format!("  {:20} {}", s.format(), s.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
