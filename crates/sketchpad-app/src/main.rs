//! Main application entry point (native).

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() {
    use sketchpad_app::{Outcome, Session};
    use sketchpad_core::storage::FileStorage;
    use sketchpad_core::{Editor, EditorConfig, StorageResult};
    use std::io::{self, BufRead, Write};

    env_logger::init();
    log::info!("Starting Sketchpad");

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| EditorConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => EditorConfig::default(),
    };

    let storage: StorageResult<FileStorage> = match std::env::var_os("SKETCHPAD_DATA_DIR") {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::default_location(),
    };
    let storage = match storage {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("Failed to open storage: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Saving to {}", storage.base_path().display());

    let mut editor = Editor::new(config);
    editor.mount(storage);
    let mut session = Session::new(editor);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };
        match session.execute(&line) {
            Ok(Outcome::Continue(Some(reply))) => {
                let _ = writeln!(stdout, "{}", reply.trim_end());
            }
            Ok(Outcome::Continue(None)) => {}
            Ok(Outcome::Quit) => break,
            Err(e) => {
                let _ = writeln!(stdout, "error: {}", e);
            }
        }
    }

    session.into_editor().unmount();
    log::info!("Sketchpad closed");
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
