//! Text editing operations at the cursor.

use crate::cursor::CursorRow;
use super::Editor;

impl Editor {
    /// Insert a byte at the cursor. Typing past the last row starts a new one.
    pub fn insert_char(&mut self, byte: u8) {
        if self.cursor.row(&self.doc) == CursorRow::PastEnd {
            self.doc.insert_row(self.doc.row_count(), b"");
        }
        self.doc.insert_char(self.cursor.cy, self.cursor.cx, byte);
        self.cursor.cx += 1;
    }

    /// Break the line at the cursor.
    pub fn insert_newline(&mut self) {
        if self.cursor.cx == 0 {
            self.doc.insert_row(self.cursor.cy, b"");
        } else {
            self.doc.split_row(self.cursor.cy, self.cursor.cx);
        }
        self.cursor.cy += 1;
        self.cursor.cx = 0;
    }

    /// Backspace: remove the byte left of the cursor, or join with the previous line.
    pub fn delete_char(&mut self) {
        let CursorRow::OnRow(y) = self.cursor.row(&self.doc) else { return; };
        if self.cursor.cx == 0 && y == 0 {
            return;
        }

        if self.cursor.cx > 0 {
            self.doc.delete_char(y, self.cursor.cx - 1);
            self.cursor.cx -= 1;
        } else {
            let prev_len = self.doc.row_len(y - 1);
            let line = self.doc.row(y).map(|r| r.raw().to_vec()).unwrap_or_default();
            self.doc.append_to_row(y - 1, &line);
            self.doc.delete_row(y);
            self.cursor.cy = y - 1;
            self.cursor.cx = prev_len;
        }
    }
}
