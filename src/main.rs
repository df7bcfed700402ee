//! `kedit`: a minimal terminal text editor.
//!
//! ## Reading guide (high level architecture)
//! - **`main()` / `run()`**: loads config, opens the file and runs the refresh/read/handle loop.
//! - **`terminal`**: raw mode (`TerminalGuard`) and the byte-level `Terminal` seam.
//! - **`decoder`**: turns raw input bytes (including escape sequences) into `Key`s.
//! - **`buffer::Document`**: rows of raw text plus their tab-expanded rendering.
//! - **`cursor::Cursor`**: cursor position and the scrolled viewport.
//! - **`editor::Editor`**: application state, key handling, the prompt, file I/O and rendering.

mod buffer;
mod config;
mod cursor;
mod decoder;
mod editor;
mod terminal;
mod types;

use anyhow::{Context, Result};
use editor::Editor;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use terminal::{StdTerminal, Terminal, TerminalGuard};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Runs the editor:
/// - reads the optional file argument
/// - sets up logging and config
/// - switches the terminal to raw mode
/// - loops: refresh → read key → handle key
fn run() -> Result<()> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);

    init_logging()?;
    let config = config::load_config()?;
    tracing::info!("Starting kedit {}", env!("CARGO_PKG_VERSION"));

    let mut term = StdTerminal::new();
    let size = term.size().context("Failed to query terminal size")?;
    let mut editor = Editor::new(config, size);
    if let Some(path) = path {
        editor.open(path)?;
    }
    editor.set_status("HELP: Ctrl-S = save | Ctrl-Q = quit");

    // Dropped before `main` prints any error, so the message lands on a sane terminal.
    let _guard = TerminalGuard::new()?;

    loop {
        editor.refresh_screen(&mut term)?;
        let Some(key) = editor.read_key(&mut term)? else { continue; };
        if editor.handle_key(key, &mut term)? {
            break;
        }
    }
    Ok(())
}

/// The screen owns stdout and stderr, so logs go to the file named by `KEDIT_LOG`, if any.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("KEDIT_LOG") else { return Ok(()); };
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", PathBuf::from(&path).display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
