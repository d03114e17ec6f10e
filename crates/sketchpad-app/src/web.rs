//! WebAssembly entry point and browser bindings.
//!
//! [`WebEditor`] owns an [`Editor`] mounted on `localStorage`, forwards DOM
//! input from a container element, and reports container size changes
//! through a `ResizeObserver`. Rendering stays on the JS side: register a
//! callback with [`WebEditor::on_render`] and read [`WebEditor::scene_json`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use kurbo::{Point, Vec2};
use sketchpad_core::storage::LocalStorage;
use sketchpad_core::{
    Action, ContainerObserver, Editor, EditorConfig, EventDisposition, KeyInput, Modifiers,
    MouseButton, PointerEvent, SceneSnapshot, SerializableColor, ShapeKind, Swatch, WheelInput,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Element, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent,
    ResizeObserver, ResizeObserverEntry, WheelEvent,
};

/// Pixels per line for `DOM_DELTA_LINE` wheel events.
const LINE_HEIGHT: f64 = 16.0;

struct Shared {
    editor: Editor,
    on_render: Option<js_sys::Function>,
}

type SharedRef = Rc<RefCell<Shared>>;

/// Invoke the render callback if the editor asked for a redraw.
///
/// The borrow is released before calling into JS so the callback may read
/// the scene back.
fn notify(shared: &SharedRef) {
    let callback = {
        let mut state = shared.borrow_mut();
        if !state.editor.take_render_request() {
            return;
        }
        state.on_render.clone()
    };
    if let Some(callback) = callback {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::error!("Render callback failed: {:?}", e);
        }
    }
}

fn modifiers_of(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}

fn button_of(event: &MouseEvent) -> Option<MouseButton> {
    match event.button() {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}

/// Pointer position relative to the container's top-left corner.
fn local_point(container: &Element, event: &MouseEvent) -> Point {
    let rect = container.get_bounding_client_rect();
    Point::new(
        event.client_x() as f64 - rect.left(),
        event.client_y() as f64 - rect.top(),
    )
}

/// Keys typed into form fields or editable regions are left to the page.
fn targets_text_entry(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        .is_some_and(|element| {
            crate::keys::is_text_entry(&element.tag_name(), element.is_content_editable())
        })
}

fn consume(event: &Event, disposition: EventDisposition) {
    if disposition.is_consumed() {
        event.prevent_default();
        event.stop_propagation();
    }
}

/// `ResizeObserver` registration handed to the editor's resize bridge.
struct DomResizeObserver {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl DomResizeObserver {
    fn observe(container: &Element, shared: Weak<RefCell<Shared>>) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let Some(entry) = entries
                .iter()
                .last()
                .and_then(|e| e.dyn_into::<ResizeObserverEntry>().ok())
            else {
                return;
            };
            let rect = entry.content_rect();
            shared
                .borrow_mut()
                .editor
                .resize(rect.width(), rect.height());
            notify(&shared);
        });
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(container);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl ContainerObserver for DomResizeObserver {
    fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

/// A DOM listener kept alive until [`WebEditor::unmount`].
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        target: &EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        // Passive listeners cannot cancel wheel scrolling or touch panning.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    fn remove(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Browser handle to a mounted editor.
#[wasm_bindgen]
pub struct WebEditor {
    shared: SharedRef,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WebEditor {
    /// Mount an editor on the element with id `container_id`.
    ///
    /// `config_json` may be empty or a partial JSON config.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, config_json: Option<String>) -> Result<WebEditor, JsValue> {
        let config = match config_json.as_deref().map(str::trim) {
            Some(json) if !json.is_empty() => EditorConfig::from_json(json)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?,
            _ => EditorConfig::default(),
        };

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Missing document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", container_id)))?;

        let storage = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut editor = Editor::new(config);
        editor.mount(storage);

        let shared = Rc::new(RefCell::new(Shared {
            editor,
            on_render: None,
        }));

        let observer = DomResizeObserver::observe(&container, Rc::downgrade(&shared))?;
        shared
            .borrow_mut()
            .editor
            .observe_container(Box::new(observer));

        let mut web_editor = WebEditor {
            shared,
            listeners: Vec::new(),
        };
        web_editor.listen(&window, &container)?;
        log::info!("Sketchpad mounted on #{}", container_id);
        Ok(web_editor)
    }

    /// Register a callback invoked whenever the scene needs a redraw.
    ///
    /// Called once right away to draw whatever was restored from storage.
    pub fn on_render(&self, callback: js_sys::Function) {
        self.shared.borrow_mut().on_render = Some(callback.clone());
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::error!("Render callback failed: {:?}", e);
        }
    }

    /// Current scene (drawables and viewport) as JSON, for the renderer.
    pub fn scene_json(&self) -> Result<String, JsValue> {
        let state = self.shared.borrow();
        let scene = state
            .editor
            .scene()
            .ok_or_else(|| JsValue::from_str("Editor is not mounted"))?;
        SceneSnapshot::capture(scene)
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// In-progress pencil stroke as JSON, or `None` when not drawing.
    pub fn preview_json(&self) -> Option<String> {
        let shape = self.shared.borrow().editor.preview_shape()?;
        serde_json::to_string(&shape).ok()
    }

    /// Ids of the selected drawables as JSON.
    pub fn selection_json(&self) -> String {
        let state = self.shared.borrow();
        serde_json::to_string(state.editor.selection().ids()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Currently selected color as `#rrggbb`.
    pub fn color(&self) -> String {
        self.shared.borrow().editor.color().to_hex()
    }

    pub fn select_pointer(&self) {
        self.dispatch(Action::SelectPointer);
    }

    pub fn select_pencil(&self) {
        self.dispatch(Action::SelectPencil);
    }

    pub fn delete_selection(&self) {
        self.dispatch(Action::Delete);
    }

    pub fn open_shape_picker(&self) {
        self.dispatch(Action::OpenShapePicker);
    }

    pub fn close_shape_picker(&self) {
        self.dispatch(Action::CloseShapePicker);
    }

    /// Kinds offered by the shape picker, as a JSON array of names.
    pub fn shape_kinds_json(&self) -> String {
        let kinds: Vec<&str> = ShapeKind::picker().iter().map(ShapeKind::name).collect();
        serde_json::to_string(&kinds).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn is_drawing_mode(&self) -> bool {
        self.shared
            .borrow()
            .editor
            .scene()
            .is_some_and(|scene| scene.is_drawing_mode())
    }

    pub fn is_picking_shape(&self) -> bool {
        self.shared.borrow().editor.tools().is_picking_shape()
    }

    /// Create a shape by kind name (`rectangle`, `rounded-rectangle`,
    /// `circle`, `triangle`).
    pub fn create_shape(&self, kind: &str) -> Result<(), JsValue> {
        let kind: ShapeKind = kind.parse().map_err(|e: String| JsValue::from_str(&e))?;
        if kind == ShapeKind::Freehand {
            return Err(JsValue::from_str("freehand strokes are drawn with the pencil"));
        }
        self.dispatch(Action::CreateShape(kind));
        Ok(())
    }

    pub fn create_text(&self) {
        self.dispatch(Action::CreateText);
    }

    /// Pick a palette swatch by name (`black`, `red`, ...).
    pub fn pick_swatch(&self, name: &str) -> Result<(), JsValue> {
        let swatch = Swatch::by_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown swatch: {}", name)))?;
        self.dispatch(Action::PickSwatch(swatch));
        Ok(())
    }

    /// Pick an arbitrary color from the color input (`#rrggbb`).
    pub fn pick_color(&self, hex: &str) -> Result<(), JsValue> {
        let color =
            SerializableColor::from_hex(hex).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.dispatch(Action::PickColor(color));
        Ok(())
    }

    /// Save and release the editor, removing every DOM listener.
    pub fn unmount(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        self.shared.borrow_mut().editor.unmount();
        log::info!("Sketchpad unmounted");
    }
}

impl Drop for WebEditor {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
    }
}

impl WebEditor {
    fn listen(&mut self, window: &web_sys::Window, container: &Element) -> Result<(), JsValue> {
        {
            let shared = self.shared.clone();
            let onkeydown = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if targets_text_entry(&event) {
                    return;
                }
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = KeyInput::new(
                    event.key(),
                    Modifiers {
                        shift: event.shift_key(),
                        ctrl: event.ctrl_key(),
                        alt: event.alt_key(),
                        meta: event.meta_key(),
                    },
                );
                let disposition = shared.borrow_mut().editor.handle_key(&key);
                consume(event, disposition);
                notify(&shared);
            });
            self.listeners
                .push(Listener::add(window, "keydown", onkeydown)?);
        }

        {
            let shared = self.shared.clone();
            let target = container.clone();
            let onwheel = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let scale = match event.delta_mode() {
                    WheelEvent::DOM_DELTA_LINE => LINE_HEIGHT,
                    WheelEvent::DOM_DELTA_PAGE => target.client_height() as f64,
                    _ => 1.0,
                };
                let wheel = WheelInput {
                    delta: Vec2::new(event.delta_x() * scale, event.delta_y() * scale),
                    pointer: Some(local_point(&target, event)),
                    modifiers: modifiers_of(event),
                };
                let disposition = shared.borrow_mut().editor.handle_wheel(&wheel);
                consume(event, disposition);
                notify(&shared);
            });
            self.listeners.push(Listener::add(container, "wheel", onwheel)?);
        }

        for name in ["pointerdown", "pointermove", "pointerup"] {
            let shared = self.shared.clone();
            let target = container.clone();
            let onpointer = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let position = local_point(&target, mouse);
                let input = match (name, button_of(mouse)) {
                    ("pointerdown", Some(button)) => PointerEvent::Down {
                        position,
                        button,
                        modifiers: modifiers_of(mouse),
                    },
                    ("pointerup", Some(button)) => PointerEvent::Up { position, button },
                    ("pointermove", _) => PointerEvent::Move { position },
                    _ => return,
                };
                if let (PointerEvent::Down { .. }, Some(pointer)) =
                    (&input, event.dyn_ref::<web_sys::PointerEvent>())
                {
                    // Keep receiving moves while dragging outside the container.
                    let _ = target.set_pointer_capture(pointer.pointer_id());
                }
                let disposition = shared.borrow_mut().editor.handle_pointer(input);
                consume(&event, disposition);
                notify(&shared);
            });
            self.listeners.push(Listener::add(container, name, onpointer)?);
        }

        Ok(())
    }

    fn dispatch(&self, action: Action) {
        self.shared.borrow_mut().editor.dispatch(action);
        notify(&self.shared);
    }
}

/// Initialize panic reporting and logging.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Logger init failed: {}", e)));
    }
    log::info!("Starting Sketchpad (WASM)");
}
