//! Editor: the application state and the operations that drive it.

mod edit;
mod file_ops;
mod input;
mod movement;
mod render;

use crate::buffer::Document;
use crate::config::Config;
use crate::cursor::Cursor;
use crate::decoder::{Key, KeyReader};
use crate::terminal::Terminal;
use crate::types::{QuitState, StatusMsg};
use anyhow::{Context, Result};
use std::time::Instant;

/// The top-level application state, owned by the main loop.
pub struct Editor {
    /// The open document.
    pub doc: Document,
    /// Cursor and viewport.
    pub cursor: Cursor,
    /// Text rows on screen (the terminal minus the status and message lines).
    pub screen_rows: usize,
    pub screen_cols: usize,
    /// Short-lived message on the bottom line.
    pub(crate) status: Option<StatusMsg>,
    /// Quit confirmation progress.
    pub(crate) quit: QuitState,
    pub(crate) config: Config,
    keys: KeyReader,
}

impl Editor {
    /// Create an editor with an empty document for a terminal of `(columns, rows)`.
    pub fn new(config: Config, size: (u16, u16)) -> Self {
        let mut ed = Self {
            doc: Document::new(config.tab_stop),
            cursor: Cursor::default(),
            screen_rows: 0,
            screen_cols: 0,
            status: None,
            quit: QuitState::Normal,
            keys: KeyReader::new(config.read_timeout()),
            config,
        };
        ed.resize(size);
        ed
    }

    /// Adopt a new terminal size.
    pub fn resize(&mut self, (cols, rows): (u16, u16)) {
        self.screen_rows = usize::from(rows).saturating_sub(2);
        self.screen_cols = usize::from(cols);
    }

    /// Show a message on the bottom line.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(StatusMsg { text: msg.into(), set_at: Instant::now() });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Wait (boundedly) for the next key.
    pub fn read_key<T: Terminal + ?Sized>(&mut self, term: &mut T) -> Result<Option<Key>> {
        self.keys.read_key(term).context("Failed to read terminal input")
    }
}

#[cfg(test)]
pub(crate) fn test_editor(lines: &[&str]) -> Editor {
    let mut ed = Editor::new(Config::default(), (80, 24));
    ed.doc.load_from_lines(lines.iter().map(|l| l.as_bytes()));
    ed
}

#[cfg(test)]
pub(crate) fn rows(ed: &Editor) -> Vec<String> {
    (0..ed.doc.row_count())
        .map(|y| String::from_utf8_lossy(ed.doc.row(y).unwrap().raw()).into_owned())
        .collect()
}
