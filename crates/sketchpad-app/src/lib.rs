//! Sketchpad Application
//!
//! Host shells around `sketchpad-core`: a line-driven native session and
//! the browser binding.

pub mod keys;
pub mod session;

pub use session::{Command, CommandError, Outcome, Session};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebEditor, run_wasm};
