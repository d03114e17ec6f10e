//! The editor: one session's scene plus the state that acts on it.

use crate::action::Action;
use crate::config::EditorConfig;
use crate::factory::{DEFAULT_TEXT, DrawableFactory};
use crate::input::{EventDisposition, KeyInput, MouseButton, PointerEvent, WheelInput};
use crate::persistence::{PersistenceBridge, SceneSubscriber, restore};
use crate::resize::{ContainerObserver, ContentBox, ResizeBridge};
use crate::scene::Scene;
use crate::selection::Selection;
use crate::shapes::{SerializableColor, Shape};
use crate::shortcuts;
use crate::storage::Storage;
use crate::store::SceneStore;
use crate::style::apply_color;
use crate::tools::ToolController;

/// Entry point for hosts.
///
/// Hosts forward toolbar clicks as [`Action`]s and raw input as key, pointer
/// and wheel events. After each call, scene changes have been delivered to
/// every subscriber, and [`Editor::take_render_request`] tells the host
/// whether to redraw.
pub struct Editor {
    config: EditorConfig,
    store: SceneStore,
    selection: Selection,
    tools: ToolController,
    factory: DrawableFactory,
    /// Writer for the storage the current scene was mounted from.
    persistence: Option<Box<dyn SceneSubscriber>>,
    subscribers: Vec<Box<dyn SceneSubscriber>>,
    resize: ResizeBridge,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            tools: ToolController::new(config.default_color, config.brush_width),
            factory: DrawableFactory::new(config.spawn_offset),
            store: SceneStore::new(),
            selection: Selection::new(),
            persistence: None,
            subscribers: Vec::new(),
            resize: ResizeBridge::new(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Restore the saved scene from `storage` and persist every later change to it.
    ///
    /// Mounting again switches to the new storage; the previous one is no
    /// longer written.
    pub fn mount<S: Storage + 'static>(&mut self, storage: S) {
        let scene = restore(&storage, &self.config.storage_key);
        self.attach(scene);
        self.persistence = Some(Box::new(PersistenceBridge::new(
            storage,
            self.config.storage_key.clone(),
        )));
    }

    /// Install a scene without persistence.
    ///
    /// Any storage from an earlier [`Editor::mount`] is detached.
    pub fn attach(&mut self, mut scene: Scene) {
        if let Some(previous) = self.store.scene_mut() {
            self.tools.cancel(previous);
        }
        self.flush();
        self.persistence = None;
        self.config.configure_viewport(&mut scene.viewport);
        scene.set_drawing_mode(false);
        log::info!("Mounted scene with {} drawable(s)", scene.len());
        if self.store.set_scene(scene).is_some() {
            log::debug!("Replaced previously mounted scene");
        }
        self.selection.clear();
        self.tools = ToolController::new(self.tools.color(), self.config.brush_width);
    }

    /// Register a change subscriber.
    pub fn subscribe(&mut self, subscriber: Box<dyn SceneSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Hand over the host's container size observer; it is disconnected on unmount.
    pub fn observe_container(&mut self, observer: Box<dyn ContainerObserver>) {
        self.resize.observe(observer);
    }

    /// Tear down: stop observing, flush pending changes, drop the scene.
    pub fn unmount(&mut self) {
        self.resize.teardown();
        if let Some(scene) = self.store.scene_mut() {
            self.tools.cancel(scene);
        }
        self.flush();
        self.persistence = None;
        self.subscribers.clear();
        self.selection.clear();
        if let Some(scene) = self.store.take() {
            log::info!("Unmounted scene with {} drawable(s)", scene.len());
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.store.is_ready()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.store.scene()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tools(&self) -> &ToolController {
        &self.tools
    }

    /// Current color for new drawables.
    pub fn color(&self) -> SerializableColor {
        self.tools.color()
    }

    /// In-progress pencil stroke, if any.
    pub fn preview_shape(&self) -> Option<Shape> {
        self.tools.preview_shape()
    }

    /// Consume the scene's pending render request.
    pub fn take_render_request(&mut self) -> bool {
        self.store
            .scene_mut()
            .is_some_and(Scene::take_render_request)
    }

    /// Perform an action. Does nothing while no scene is mounted.
    pub fn dispatch(&mut self, action: Action) {
        let Some(scene) = self.store.scene_mut() else {
            log::debug!("Ignoring {action}: no scene mounted");
            return;
        };
        log::debug!("Action: {action}");

        match action {
            Action::SelectPointer => self.tools.select_pointer(scene),
            Action::SelectPencil => self.tools.select_pencil(scene),
            Action::Delete => {
                if self.selection.is_empty() {
                    return;
                }
                let removed = scene.remove_many(self.selection.ids());
                log::debug!("Deleted {} drawable(s)", removed.len());
                self.selection.retain_existing(scene);
                scene.request_render();
            }
            Action::OpenShapePicker => self.tools.open_shape_picker(),
            Action::CloseShapePicker => self.tools.close_shape_picker(),
            Action::CreateShape(kind) => {
                self.tools.close_shape_picker();
                self.factory.create_shape(scene, kind, self.tools.color());
            }
            Action::CreateText => {
                self.factory
                    .create_text(scene, DEFAULT_TEXT, self.tools.color());
            }
            Action::PickSwatch(swatch) => {
                self.tools.set_color(swatch.color());
                apply_color(scene, &self.selection, swatch.color());
            }
            Action::PickColor(color) => {
                self.tools.set_color(color);
                apply_color(scene, &self.selection, color);
            }
            Action::SelectAll => {
                self.selection.set_many(scene.ids().iter().copied());
                scene.request_render();
            }
            Action::ClickAway => self.tools.click_away(scene, &mut self.selection),
        }

        self.flush();
    }

    /// Handle a key press through the shortcut table.
    ///
    /// Consumed keys should not reach the page (no browser select-all,
    /// no history navigation on Backspace).
    pub fn handle_key(&mut self, key: &KeyInput) -> EventDisposition {
        if !self.is_mounted() {
            return EventDisposition::Ignored;
        }
        match shortcuts::resolve(key) {
            Some(action) => {
                self.dispatch(action);
                EventDisposition::Consumed
            }
            None => EventDisposition::Ignored,
        }
    }

    /// Handle a pointer event in surface coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EventDisposition {
        let Some(scene) = self.store.scene_mut() else {
            return EventDisposition::Ignored;
        };
        let point = scene.viewport.screen_to_scene(event.position());

        match event {
            PointerEvent::Down {
                button: MouseButton::Left,
                modifiers,
                ..
            } => {
                // Slop is given in screen pixels.
                let tolerance = self.config.hit_tolerance / scene.viewport.zoom;
                self.tools
                    .pointer_down(scene, &mut self.selection, point, modifiers, tolerance);
            }
            PointerEvent::Move { .. } => {
                self.tools.pointer_move(scene, point);
            }
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => {
                self.tools.pointer_up(scene, point);
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => {
                return EventDisposition::Ignored;
            }
        }

        self.flush();
        EventDisposition::Consumed
    }

    /// Handle a wheel scroll over the surface.
    ///
    /// Always consumed, so the page never scrolls or zooms underneath.
    pub fn handle_wheel(&mut self, wheel: &WheelInput) -> EventDisposition {
        if let Some(scene) = self.store.scene_mut() {
            scene.viewport.handle_wheel(wheel);
            scene.request_render();
        }
        EventDisposition::Consumed
    }

    /// The container's content box changed size.
    pub fn resize(&mut self, width: f64, height: f64) {
        if let Some(scene) = self.store.scene_mut() {
            self.resize.on_resize(scene, ContentBox::new(width, height));
        }
    }

    /// Deliver pending scene changes to subscribers.
    fn flush(&mut self) {
        let Some(scene) = self.store.scene_mut() else {
            return;
        };
        if !scene.has_pending_events() {
            return;
        }
        let events = scene.drain_events();
        for subscriber in self.persistence.iter_mut().chain(self.subscribers.iter_mut()) {
            subscriber.on_scene_changed(scene, &events);
        }
    }
}
