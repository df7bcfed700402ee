//! Cursor position and the scrolled viewport around it.

use crate::buffer::{Document, Row};
use std::cmp::min;

/// Which kind of line the cursor sits on.
///
/// The cursor may stand one line past the last row: the empty line a new row is created on
/// when the user starts typing there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorRow {
    OnRow(usize),
    PastEnd,
}

/// Single-step cursor movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Cursor + viewport state.
///
/// - `cx`/`cy`: column and row in raw text (`cy == row_count()` means past the end)
/// - `rx`: the same column in rendered (tab-expanded) text
/// - `rowoff`/`coloff`: top-left corner of the visible window, in rendered coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
    pub rx: usize,
    pub rowoff: usize,
    pub coloff: usize,
}

impl Cursor {
    /// Classify the current line.
    pub fn row(&self, doc: &Document) -> CursorRow {
        if self.cy < doc.row_count() {
            CursorRow::OnRow(self.cy)
        } else {
            CursorRow::PastEnd
        }
    }

    /// Length of the line under the cursor (0 past the end).
    pub fn line_len(&self, doc: &Document) -> usize {
        match self.row(doc) {
            CursorRow::OnRow(y) => doc.row_len(y),
            CursorRow::PastEnd => 0,
        }
    }

    /// Pull the cursor back inside the document after an edit or a move.
    pub fn clamp_to_document(&mut self, doc: &Document) {
        self.cy = min(self.cy, doc.row_count());
        self.cx = min(self.cx, self.line_len(doc));
    }

    /// Convert a raw column into a rendered column.
    pub fn raw_to_render_column(row: &Row, cx: usize, tab_stop: usize) -> usize {
        row.raw().iter().take(cx).fold(0, |rx, &b| {
            if b == b'\t' {
                rx + tab_stop - rx % tab_stop
            } else {
                rx + 1
            }
        })
    }

    /// Recompute `rx` and move the viewport so the cursor is on screen.
    pub fn scroll_to_keep_cursor_visible(&mut self, doc: &Document, screen_rows: usize, screen_cols: usize) {
        self.rx = match self.row(doc) {
            CursorRow::OnRow(y) => doc
                .row(y)
                .map_or(0, |row| Self::raw_to_render_column(row, self.cx, doc.tab_stop())),
            CursorRow::PastEnd => 0,
        };

        if self.cy < self.rowoff {
            self.rowoff = self.cy;
        }
        if self.cy >= self.rowoff + screen_rows {
            self.rowoff = (self.cy + 1).saturating_sub(screen_rows);
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + screen_cols {
            self.coloff = (self.rx + 1).saturating_sub(screen_cols);
        }
    }

    /// Move one step, wrapping across line ends for Left/Right.
    pub fn move_cursor(&mut self, dir: Direction, doc: &Document) {
        match dir {
            Direction::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = self.line_len(doc);
                }
            }
            Direction::Right => {
                if let CursorRow::OnRow(y) = self.row(doc) {
                    let len = doc.row_len(y);
                    if self.cx < len {
                        self.cx += 1;
                    } else if self.cx == len {
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
            Direction::Up => {
                self.cy = self.cy.saturating_sub(1);
            }
            Direction::Down => {
                if self.cy < doc.row_count() {
                    self.cy += 1;
                }
            }
        }
        self.clamp_to_document(doc);
    }
}
