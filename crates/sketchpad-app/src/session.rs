//! Line-oriented headless session.
//!
//! Each input line is one command, parsed into a [`Command`] and applied to
//! an [`Editor`]. Used by the native binary and handy for scripting scenes.

use kurbo::{Point, Vec2};
use sketchpad_core::{
    Action, Editor, EventDisposition, KeyInput, Modifiers, MouseButton, PointerEvent,
    SerializableColor, ShapeKind, ShortcutRegistry, Swatch, WheelInput,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("missing argument for `{0}`")]
    MissingArgument(&'static str),
    #[error("invalid argument `{arg}` for `{command}`")]
    InvalidArgument { command: &'static str, arg: String },
}

/// A parsed session command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action(Action),
    Key(KeyInput),
    Pointer(PointerEvent),
    Wheel(WheelInput),
    Resize(f64, f64),
    List,
    Svg,
    Help,
    Quit,
}

fn parse_f64(command: &'static str, arg: Option<&str>) -> Result<f64, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(command))?;
    match arg.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidArgument {
            command,
            arg: arg.to_string(),
        }),
    }
}

fn parse_point<'a>(
    command: &'static str,
    args: &mut impl Iterator<Item = &'a str>,
) -> Result<Point, CommandError> {
    let x = parse_f64(command, args.next())?;
    let y = parse_f64(command, args.next())?;
    Ok(Point::new(x, y))
}

fn parse_modifiers<'a>(
    command: &'static str,
    args: impl Iterator<Item = &'a str>,
) -> Result<Modifiers, CommandError> {
    let mut modifiers = Modifiers::NONE;
    for arg in args {
        match arg {
            "shift" => modifiers.shift = true,
            "ctrl" => modifiers.ctrl = true,
            "alt" => modifiers.alt = true,
            "meta" | "cmd" => modifiers.meta = true,
            other => {
                return Err(CommandError::InvalidArgument {
                    command,
                    arg: other.to_string(),
                });
            }
        }
    }
    Ok(modifiers)
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let mut args = line.split_whitespace();
        let Some(name) = args.next() else {
            return Ok(None);
        };

        let command = match name {
            "pointer" | "v" => Command::Action(Action::SelectPointer),
            "pencil" | "p" => Command::Action(Action::SelectPencil),
            "delete" | "del" => Command::Action(Action::Delete),
            "picker" => Command::Action(Action::OpenShapePicker),
            "close-picker" => Command::Action(Action::CloseShapePicker),
            "text" => Command::Action(Action::CreateText),
            "select-all" => Command::Action(Action::SelectAll),
            "click-away" => Command::Action(Action::ClickAway),
            "shape" => {
                let arg = args.next().ok_or(CommandError::MissingArgument("shape"))?;
                // Freehand strokes come from the pencil, not the picker.
                match arg.parse::<ShapeKind>() {
                    Ok(kind) if kind != ShapeKind::Freehand => {
                        Command::Action(Action::CreateShape(kind))
                    }
                    _ => {
                        return Err(CommandError::InvalidArgument {
                            command: "shape",
                            arg: arg.to_string(),
                        });
                    }
                }
            }
            "swatch" => {
                let arg = args.next().ok_or(CommandError::MissingArgument("swatch"))?;
                let swatch = match arg.chars().next() {
                    Some(c) if arg.len() == 1 => Swatch::from_digit(c),
                    _ => Swatch::by_name(arg),
                };
                let swatch = swatch.ok_or_else(|| CommandError::InvalidArgument {
                    command: "swatch",
                    arg: arg.to_string(),
                })?;
                Command::Action(Action::PickSwatch(swatch))
            }
            "color" => {
                let arg = args.next().ok_or(CommandError::MissingArgument("color"))?;
                let color = SerializableColor::from_hex(arg).map_err(|_| {
                    CommandError::InvalidArgument {
                        command: "color",
                        arg: arg.to_string(),
                    }
                })?;
                Command::Action(Action::PickColor(color))
            }
            "key" => {
                let key = args.next().ok_or(CommandError::MissingArgument("key"))?;
                let modifiers = parse_modifiers("key", args)?;
                Command::Key(KeyInput::new(key, modifiers))
            }
            "down" => {
                let position = parse_point("down", &mut args)?;
                let modifiers = parse_modifiers("down", args)?;
                Command::Pointer(PointerEvent::Down {
                    position,
                    button: MouseButton::Left,
                    modifiers,
                })
            }
            "move" => Command::Pointer(PointerEvent::Move {
                position: parse_point("move", &mut args)?,
            }),
            "up" => Command::Pointer(PointerEvent::Up {
                position: parse_point("up", &mut args)?,
                button: MouseButton::Left,
            }),
            "wheel" => {
                let dx = parse_f64("wheel", args.next())?;
                let dy = parse_f64("wheel", args.next())?;
                let modifiers = parse_modifiers("wheel", args)?;
                Command::Wheel(WheelInput {
                    delta: Vec2::new(dx, dy),
                    pointer: None,
                    modifiers,
                })
            }
            "resize" => {
                let width = parse_f64("resize", args.next())?;
                let height = parse_f64("resize", args.next())?;
                Command::Resize(width, height)
            }
            "list" | "ls" => Command::List,
            "svg" => Command::Svg,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Shortcut list plus the kinds `shape` accepts.
fn help_text() -> String {
    let kinds: Vec<&str> = ShapeKind::picker().iter().map(ShapeKind::name).collect();
    format!(
        "{}\n  shape <kind>         {}",
        ShortcutRegistry::help_text(),
        kinds.join(", ")
    )
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue(Option<String>),
    Quit,
}

/// Drives an [`Editor`] from text commands.
pub struct Session {
    editor: Editor,
}

impl Session {
    pub fn new(editor: Editor) -> Self {
        Self { editor }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn into_editor(self) -> Editor {
        self.editor
    }

    /// Parse and run one line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, CommandError> {
        match Command::parse(line)? {
            Some(command) => Ok(self.run(command)),
            None => Ok(Outcome::Continue(None)),
        }
    }

    pub fn run(&mut self, command: Command) -> Outcome {
        let reply = match command {
            Command::Action(action) => {
                self.editor.dispatch(action);
                None
            }
            Command::Key(key) => match self.editor.handle_key(&key) {
                EventDisposition::Consumed => None,
                EventDisposition::Ignored => Some(format!("key `{}` not bound", key.key)),
            },
            Command::Pointer(event) => {
                self.editor.handle_pointer(event);
                None
            }
            Command::Wheel(wheel) => {
                self.editor.handle_wheel(&wheel);
                None
            }
            Command::Resize(width, height) => {
                self.editor.resize(width, height);
                None
            }
            Command::List => Some(self.list()),
            Command::Svg => Some(self.svg()),
            Command::Help => Some(help_text()),
            Command::Quit => return Outcome::Quit,
        };
        Outcome::Continue(reply)
    }

    fn list(&self) -> String {
        let Some(scene) = self.editor.scene() else {
            return "no scene".to_string();
        };
        let selection = self.editor.selection();
        let mut out = format!(
            "{} drawables, zoom {:.3}, offset ({:.1}, {:.1}), color {}, tool {}{}\n",
            scene.len(),
            scene.viewport.zoom,
            scene.viewport.offset.x,
            scene.viewport.offset.y,
            self.editor.color(),
            self.editor.tools().tool().name(),
            if scene.is_drawing_mode() { " (drawing)" } else { "" },
        );
        for shape in scene.objects() {
            let marker = if selection.contains(shape.id()) { '*' } else { ' ' };
            let pos = shape.position();
            let style = shape.style();
            out.push_str(&format!(
                "{marker} {} {} at ({:.1}, {:.1}) stroke {}",
                shape.id(),
                shape.kind(),
                pos.x,
                pos.y,
                style.stroke_color,
            ));
            if let Some(fill) = style.fill_color {
                out.push_str(&format!(" fill {fill}"));
            }
            out.push('\n');
        }
        out
    }

    fn svg(&self) -> String {
        let Some(scene) = self.editor.scene() else {
            return String::new();
        };
        let size = scene.viewport.surface_size;
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
            size.width, size.height
        );
        let transform = scene.viewport.transform();
        let [a, b, c, d, e, f] = transform.as_coeffs();
        out.push_str(&format!(
            "<g transform=\"matrix({a} {b} {c} {d} {e} {f})\">\n"
        ));
        for shape in scene.objects() {
            let style = shape.style();
            let fill = match style.fill_color {
                Some(color) if !style.has_transparent_fill() => color.to_hex(),
                _ => "none".to_string(),
            };
            out.push_str(&format!(
                "  <path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\"/>\n",
                shape.to_path().to_svg(),
                style.stroke_color,
                style.stroke_width,
                fill,
            ));
        }
        out.push_str("</g>\n</svg>\n");
        out
    }
}
