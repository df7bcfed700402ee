//! Rendering: composing the whole screen into one buffer and writing it out.

use crate::terminal::Terminal;
use super::Editor;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{Attribute, SetAttribute},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use std::cmp::min;
use std::io::{self, Write};
use std::time::Instant;

const FILENAME_WIDTH: usize = 20;

impl Editor {
    /// Scroll to the cursor and repaint the screen with a single write.
    pub fn refresh_screen<T: Terminal + ?Sized>(&mut self, term: &mut T) -> Result<()> {
        match term.size() {
            Ok(size) => self.resize(size),
            Err(e) => tracing::debug!("Terminal size query failed, keeping last size: {}", e),
        }
        self.cursor
            .scroll_to_keep_cursor_visible(&self.doc, self.screen_rows, self.screen_cols);

        let frame = self.compose_frame(Instant::now()).context("Failed to compose frame")?;
        term.write_frame(&frame).context("Failed to write to terminal")
    }

    /// Build the escape-sequence buffer for the current state.
    ///
    /// Pure apart from `now`, which decides whether the status message has expired.
    pub fn compose_frame(&self, now: Instant) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        out.queue(cursor::Hide)?;
        out.queue(cursor::MoveTo(0, 0))?;

        self.draw_rows(&mut out)?;
        self.draw_status_bar(&mut out)?;
        self.draw_message_bar(&mut out, now)?;

        let col = u16::try_from(self.cursor.rx.saturating_sub(self.cursor.coloff)).unwrap_or(u16::MAX);
        let row = u16::try_from(self.cursor.cy.saturating_sub(self.cursor.rowoff)).unwrap_or(u16::MAX);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(cursor::Show)?;
        Ok(out)
    }

    fn draw_rows(&self, out: &mut Vec<u8>) -> io::Result<()> {
        for y in 0..self.screen_rows {
            match self.doc.row(y + self.cursor.rowoff) {
                Some(row) => {
                    let visible = row.rendered().get(self.cursor.coloff..).unwrap_or_default();
                    out.write_all(&visible[..min(visible.len(), self.screen_cols)])?;
                }
                None if self.doc.row_count() == 0 && y == self.screen_rows / 3 => {
                    self.draw_banner(out)?;
                }
                None => out.write_all(b"~")?,
            }
            out.queue(Clear(ClearType::UntilNewLine))?;
            out.write_all(b"\r\n")?;
        }
        Ok(())
    }

    /// Centered name and version, shown while the document is empty.
    fn draw_banner(&self, out: &mut Vec<u8>) -> io::Result<()> {
        let banner = format!("kedit editor -- version {}", env!("CARGO_PKG_VERSION"));
        let shown = &banner.as_bytes()[..min(banner.len(), self.screen_cols)];
        let mut padding = (self.screen_cols - shown.len()) / 2;
        if padding > 0 {
            out.write_all(b"~")?;
            padding -= 1;
        }
        out.write_all(" ".repeat(padding).as_bytes())?;
        out.write_all(shown)
    }

    /// Inverse-video line: file name, line count and modified flag; cursor line on the right.
    fn draw_status_bar(&self, out: &mut Vec<u8>) -> io::Result<()> {
        let name: String = match &self.doc.filename {
            Some(path) => path.display().to_string().chars().take(FILENAME_WIDTH).collect(),
            None => "[No Name]".to_string(),
        };
        let modified = if self.doc.is_dirty() { " (modified)" } else { "" };
        let left = format!("{name} - {} lines{modified}", self.doc.row_count());
        let right = format!("{}/{}", self.cursor.cy + 1, self.doc.row_count());

        let width = self.screen_cols;
        let mut line = left.into_bytes();
        line.truncate(width);
        while line.len() < width {
            if width - line.len() == right.len() {
                line.extend_from_slice(right.as_bytes());
                break;
            }
            line.push(b' ');
        }

        out.queue(SetAttribute(Attribute::Reverse))?;
        out.write_all(&line)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.write_all(b"\r\n")
    }

    fn draw_message_bar(&self, out: &mut Vec<u8>, now: Instant) -> io::Result<()> {
        out.queue(Clear(ClearType::UntilNewLine))?;
        if let Some(msg) = &self.status {
            if now.saturating_duration_since(msg.set_at) < self.config.message_timeout() {
                let text = msg.text.as_bytes();
                out.write_all(&text[..min(text.len(), self.screen_cols)])?;
            }
        }
        Ok(())
    }
}
