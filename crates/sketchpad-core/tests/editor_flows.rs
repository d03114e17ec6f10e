//! Integration tests: editor flows driven through actions and raw input.

use kurbo::{Point, Vec2};
use sketchpad_core::shapes::Shape;
use sketchpad_core::{
    Action, Editor, EditorConfig, EventDisposition, KeyInput, Modifiers, MouseButton,
    PointerEvent, Scene, SerializableColor, ShapeKind, Swatch, ToolKind, WheelInput,
};

fn mounted_editor() -> Editor {
    let mut editor = Editor::new(EditorConfig::default());
    editor.attach(Scene::new());
    editor
}

fn scene(editor: &Editor) -> &Scene {
    editor.scene().expect("scene mounted")
}

fn click(editor: &mut Editor, position: Point, modifiers: Modifiers) {
    editor.handle_pointer(PointerEvent::Down {
        position,
        button: MouseButton::Left,
        modifiers,
    });
    editor.handle_pointer(PointerEvent::Up {
        position,
        button: MouseButton::Left,
    });
}

fn zoom_wheel(delta_y: f64) -> WheelInput {
    WheelInput {
        delta: Vec2::new(0.0, delta_y),
        pointer: Some(Point::new(300.0, 200.0)),
        modifiers: Modifiers::CTRL,
    }
}

// ─── Creation ───────────────────────────────────────────────────────────

#[test]
fn each_creation_appends_one_drawable_at_spawn_point() {
    let mut editor = mounted_editor();
    let yellow = Swatch::Yellow.color();
    editor.dispatch(Action::PickSwatch(Swatch::Yellow));

    let actions = [
        Action::CreateShape(ShapeKind::Rectangle),
        Action::CreateShape(ShapeKind::RoundedRectangle),
        Action::CreateShape(ShapeKind::Circle),
        Action::CreateShape(ShapeKind::Triangle),
        Action::CreateText,
    ];
    for (n, action) in actions.into_iter().enumerate() {
        // Pan between creations so the spawn point moves.
        editor.handle_wheel(&WheelInput {
            delta: Vec2::new(7.0, -3.0),
            pointer: None,
            modifiers: Modifiers::NONE,
        });
        let center = scene(&editor).viewport.center();

        editor.dispatch(action);
        let scene = scene(&editor);
        assert_eq!(scene.len(), n + 1);

        let created = scene.objects().last().unwrap();
        let expected = Point::new(center.x - 100.0, center.y - 200.0);
        assert!((created.position() - expected).hypot() < 1e-9, "{action}");

        match created {
            Shape::Text(text) => assert_eq!(text.style.fill_color, Some(yellow)),
            other => {
                assert_eq!(other.style().stroke_color, yellow);
                assert!(other.style().has_transparent_fill());
            }
        }
    }
}

#[test]
fn shape_picker_creates_and_closes() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::OpenShapePicker);
    editor.dispatch(Action::CreateShape(ShapeKind::Circle));
    assert!(!editor.tools().is_picking_shape());
    assert_eq!(scene(&editor).objects().next().unwrap().kind(), ShapeKind::Circle);
}

// ─── Viewport ───────────────────────────────────────────────────────────

#[test]
fn zoom_in_then_out_restores_zoom() {
    let mut editor = mounted_editor();
    for delta in [10.0, 125.0, -60.0] {
        let before = scene(&editor).viewport.zoom;
        editor.handle_wheel(&zoom_wheel(delta));
        editor.handle_wheel(&zoom_wheel(-delta));
        assert!((scene(&editor).viewport.zoom - before).abs() < 1e-9);
    }
}

#[test]
fn zoom_stays_within_limits() {
    let mut editor = mounted_editor();
    for delta in [5_000.0, -10_000.0, 300.0, -1.0e6] {
        let disposition = editor.handle_wheel(&zoom_wheel(delta));
        assert_eq!(disposition, EventDisposition::Consumed);
        let zoom = scene(&editor).viewport.zoom;
        assert!((0.01..=20.0).contains(&zoom), "zoom {zoom}");
    }
}

#[test]
fn nan_zoom_wheel_keeps_zoom_in_limits() {
    let mut editor = mounted_editor();
    let disposition = editor.handle_wheel(&zoom_wheel(f64::NAN));
    assert_eq!(disposition, EventDisposition::Consumed);
    let zoom = scene(&editor).viewport.zoom;
    assert!((zoom - 1.0).abs() < f64::EPSILON, "zoom {zoom}");
}

#[test]
fn wheel_without_modifier_pans() {
    let mut editor = mounted_editor();
    let zoom = scene(&editor).viewport.zoom;
    editor.handle_wheel(&WheelInput {
        delta: Vec2::new(15.0, -40.0),
        pointer: None,
        modifiers: Modifiers::NONE,
    });
    let viewport = &scene(&editor).viewport;
    assert_eq!(viewport.offset, Vec2::new(15.0, -40.0));
    assert!((viewport.zoom - zoom).abs() < f64::EPSILON);
}

// ─── Delete ─────────────────────────────────────────────────────────────

#[test]
fn delete_with_empty_selection_changes_nothing() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::CreateShape(ShapeKind::Rectangle));
    editor.dispatch(Action::CreateText);
    let ids = scene(&editor).ids().to_vec();

    assert_eq!(
        editor.handle_key(&KeyInput::plain("Delete")),
        EventDisposition::Consumed
    );
    assert_eq!(scene(&editor).ids(), ids.as_slice());
}

#[test]
fn delete_removes_exactly_the_selection() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::CreateShape(ShapeKind::Rectangle));
    editor.handle_wheel(&WheelInput {
        delta: Vec2::new(400.0, 0.0),
        pointer: None,
        modifiers: Modifiers::NONE,
    });
    editor.dispatch(Action::CreateShape(ShapeKind::Triangle));
    let ids = scene(&editor).ids().to_vec();

    // The triangle spawns at scene (12, 312); with the pan it sits at screen
    // x = 412..512. Click inside it.
    click(&mut editor, Point::new(462.0, 380.0), Modifiers::NONE);
    assert_eq!(editor.selection().ids(), &[ids[1]]);

    editor.handle_key(&KeyInput::plain("Backspace"));
    assert_eq!(scene(&editor).ids(), &[ids[0]]);
    assert!(editor.selection().is_empty());
}

#[test]
fn select_all_then_delete_empties_scene() {
    let mut editor = mounted_editor();
    for _ in 0..4 {
        editor.dispatch(Action::CreateShape(ShapeKind::Circle));
    }
    assert_eq!(
        editor.handle_key(&KeyInput::new("a", Modifiers::META)),
        EventDisposition::Consumed
    );
    assert_eq!(editor.selection().len(), 4);
    editor.handle_key(&KeyInput::plain("Delete"));
    assert!(scene(&editor).is_empty());
}

// ─── Tools ──────────────────────────────────────────────────────────────

#[test]
fn pencil_pointer_pencil_keeps_last_color() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::PickSwatch(Swatch::Blue));
    editor.handle_key(&KeyInput::plain("p"));
    assert!(scene(&editor).is_drawing_mode());

    editor.handle_key(&KeyInput::plain("v"));
    assert!(!scene(&editor).is_drawing_mode());
    assert_eq!(editor.tools().tool(), ToolKind::Pointer);

    editor.handle_key(&KeyInput::plain("p"));
    assert!(scene(&editor).is_drawing_mode());
    assert_eq!(editor.tools().brush().color, Swatch::Blue.color());
}

#[test]
fn pencil_stroke_is_added_in_brush_color() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::PickSwatch(Swatch::Green));
    editor.dispatch(Action::SelectPencil);

    editor.handle_pointer(PointerEvent::Down {
        position: Point::new(10.0, 10.0),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    });
    for i in 1..10 {
        let t = i as f64;
        editor.handle_pointer(PointerEvent::Move {
            position: Point::new(10.0 + t * 5.0, 10.0 + (t * 0.7).sin() * 20.0),
        });
    }
    assert!(editor.preview_shape().is_some());
    assert!(scene(&editor).is_empty());
    editor.handle_pointer(PointerEvent::Up {
        position: Point::new(60.0, 10.0),
        button: MouseButton::Left,
    });

    let scene = scene(&editor);
    assert_eq!(scene.len(), 1);
    let stroke = scene.objects().next().unwrap();
    assert_eq!(stroke.kind(), ShapeKind::Freehand);
    assert_eq!(stroke.style().stroke_color, Swatch::Green.color());
    assert!((stroke.style().stroke_width - 4.0).abs() < f64::EPSILON);
}

#[test]
fn drag_moves_selected_drawable() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::CreateShape(ShapeKind::Rectangle));
    let start = scene(&editor).objects().next().unwrap().position();

    editor.handle_pointer(PointerEvent::Down {
        position: Point::new(450.0, 350.0),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    });
    editor.handle_pointer(PointerEvent::Move {
        position: Point::new(470.0, 360.0),
    });
    editor.handle_pointer(PointerEvent::Up {
        position: Point::new(500.0, 400.0),
        button: MouseButton::Left,
    });

    let moved = scene(&editor).objects().next().unwrap().position();
    assert_eq!(moved - start, Vec2::new(50.0, 50.0));
}

#[test]
fn clicking_background_clears_selection() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::CreateShape(ShapeKind::Rectangle));
    editor.dispatch(Action::SelectAll);
    click(&mut editor, Point::new(5.0, 5.0), Modifiers::NONE);
    assert!(editor.selection().is_empty());
}

// ─── Color ──────────────────────────────────────────────────────────────

#[test]
fn key_three_sets_yellow_and_applies_it() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::CreateText);
    editor.dispatch(Action::CreateShape(ShapeKind::Rectangle));
    editor.dispatch(Action::SelectAll);

    editor.handle_key(&KeyInput::plain("3"));

    let yellow = SerializableColor::from_hex("#f59e0b").unwrap();
    assert_eq!(editor.color(), yellow);
    let scene = scene(&editor);
    let mut objects = scene.objects();
    assert_eq!(objects.next().unwrap().style().fill_color, Some(yellow));
    assert_eq!(objects.next().unwrap().style().stroke_color, yellow);
}

#[test]
fn red_circle_turns_white_on_key_two() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::PickSwatch(Swatch::Red));
    editor.handle_key(&KeyInput::new("C", Modifiers::SHIFT));

    let circle = scene(&editor).objects().next().unwrap();
    assert_eq!(circle.kind(), ShapeKind::Circle);
    assert_eq!(circle.style().stroke_color.to_hex(), "#ef4444");

    // Spawned at scene (412, 312) with radius 50; click its center.
    click(&mut editor, Point::new(462.0, 362.0), Modifiers::NONE);
    assert_eq!(editor.selection().len(), 1);

    editor.handle_key(&KeyInput::plain("2"));
    let circle = scene(&editor).objects().next().unwrap();
    assert_eq!(circle.style().stroke_color.to_hex(), "#ffffff");
    assert!(circle.style().has_transparent_fill());
}

#[test]
fn color_without_selection_only_changes_current_color() {
    let mut editor = mounted_editor();
    editor.dispatch(Action::CreateShape(ShapeKind::Triangle));
    editor.dispatch(Action::PickColor(SerializableColor::rgb(1, 2, 3)));

    assert_eq!(editor.color(), SerializableColor::rgb(1, 2, 3));
    let triangle = scene(&editor).objects().next().unwrap();
    assert_eq!(triangle.style().stroke_color, SerializableColor::black());
}

// ─── Keyboard ───────────────────────────────────────────────────────────

#[test]
fn unbound_keys_are_not_consumed() {
    let mut editor = mounted_editor();
    assert_eq!(
        editor.handle_key(&KeyInput::plain("q")),
        EventDisposition::Ignored
    );
    assert_eq!(
        editor.handle_key(&KeyInput::new("p", Modifiers::CTRL)),
        EventDisposition::Ignored
    );
    assert!(scene(&editor).is_empty());
}
