//! Sketchpad Core Library
//!
//! Platform-agnostic core of the Sketchpad whiteboard: drawables, the scene,
//! tools, shortcuts, viewport and persistence. Hosts supply input events,
//! a storage backend and a renderer.

pub mod action;
pub mod config;
pub mod editor;
pub mod factory;
pub mod input;
pub mod palette;
pub mod persistence;
pub mod resize;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod shortcuts;
pub mod storage;
pub mod store;
pub mod style;
pub mod tools;
pub mod viewport;

pub use action::Action;
pub use config::EditorConfig;
pub use editor::Editor;
pub use factory::DrawableFactory;
pub use input::{EventDisposition, KeyInput, Modifiers, MouseButton, PointerEvent, WheelInput};
pub use palette::Swatch;
pub use persistence::{PersistenceBridge, SceneSnapshot, SceneSubscriber, SnapshotError};
pub use resize::{ContainerObserver, ContentBox, ResizeBridge};
pub use scene::{Scene, SceneEvent};
pub use selection::Selection;
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use store::SceneStore;
pub use style::{Brush, apply_color};
pub use tools::{ToolController, ToolKind, ToolState};
pub use viewport::Viewport;
