//! Cursor navigation keys.

use crate::cursor::Direction;
use crate::decoder::Key;
use super::Editor;
use std::cmp::min;

impl Editor {
    /// Apply a navigation key. Keys that do not move the cursor are ignored.
    pub fn move_cursor(&mut self, key: Key) {
        match key {
            Key::Left => self.step(Direction::Left),
            Key::Right => self.step(Direction::Right),
            Key::Up => self.step(Direction::Up),
            Key::Down => self.step(Direction::Down),
            Key::Home => self.cursor.cx = 0,
            Key::End => self.cursor.cx = self.cursor.line_len(&self.doc),
            Key::PageUp => {
                self.cursor.cy = self.cursor.rowoff;
                self.repeat_step(Direction::Up);
            }
            Key::PageDown => {
                let bottom = (self.cursor.rowoff + self.screen_rows).saturating_sub(1);
                self.cursor.cy = min(bottom, self.doc.row_count());
                self.repeat_step(Direction::Down);
            }
            _ => {}
        }
        self.cursor.clamp_to_document(&self.doc);
    }

    fn step(&mut self, dir: Direction) {
        self.cursor.move_cursor(dir, &self.doc);
    }

    /// One screenful of single steps.
    fn repeat_step(&mut self, dir: Direction) {
        self.cursor.clamp_to_document(&self.doc);
        for _ in 0..self.screen_rows {
            self.step(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::decoder::Key;
    use crate::editor::test_editor;

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    // ==================== Home/End tests ====================

    #[test]
    fn home_and_end() {
        let mut ed = test_editor(&["hello", "x"]);
        ed.move_cursor(Key::End);
        assert_eq!(ed.cursor.cx, 5);
        ed.move_cursor(Key::Home);
        assert_eq!(ed.cursor.cx, 0);
    }

    #[test]
    fn end_past_last_row_stays_at_zero() {
        let mut ed = test_editor(&["hello"]);
        ed.cursor.cy = 1;
        ed.move_cursor(Key::End);
        assert_eq!(ed.cursor.cx, 0);
    }

    // ==================== Arrow tests ====================

    #[test]
    fn down_snaps_to_shorter_line() {
        let mut ed = test_editor(&["hello", "hi"]);
        ed.move_cursor(Key::End);
        ed.move_cursor(Key::Down);
        assert_eq!((ed.cursor.cx, ed.cursor.cy), (2, 1));
    }

    #[test]
    fn right_wraps_to_next_line() {
        let mut ed = test_editor(&["ab", "cd"]);
        ed.cursor.cx = 2;
        ed.move_cursor(Key::Right);
        assert_eq!((ed.cursor.cx, ed.cursor.cy), (0, 1));
        ed.move_cursor(Key::Left);
        assert_eq!((ed.cursor.cx, ed.cursor.cy), (2, 0));
    }

    #[test]
    fn non_navigation_keys_are_ignored() {
        let mut ed = test_editor(&["ab"]);
        ed.cursor.cx = 1;
        ed.move_cursor(Key::Char(b'x'));
        assert_eq!((ed.cursor.cx, ed.cursor.cy), (1, 0));
    }

    // ==================== Paging tests ====================

    #[test]
    fn page_down_moves_a_screen() {
        let lines = numbered(100);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut ed = test_editor(&refs);
        ed.move_cursor(Key::PageDown);
        // Bottom of the screen (21), then 22 more steps.
        assert_eq!(ed.cursor.cy, 43);
    }

    #[test]
    fn page_down_stops_past_end() {
        let mut ed = test_editor(&["a", "b", "c"]);
        ed.move_cursor(Key::PageDown);
        assert_eq!(ed.cursor.cy, 3);
        assert_eq!(ed.cursor.cx, 0);
    }

    #[test]
    fn page_up_goes_to_top() {
        let lines = numbered(100);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut ed = test_editor(&refs);
        ed.cursor.cy = 50;
        ed.cursor.rowoff = 40;
        ed.move_cursor(Key::PageUp);
        assert_eq!(ed.cursor.cy, 18);
        ed.cursor.rowoff = 5;
        ed.move_cursor(Key::PageUp);
        assert_eq!(ed.cursor.cy, 0);
    }

    #[test]
    fn page_keys_on_empty_document() {
        let mut ed = test_editor(&[]);
        ed.move_cursor(Key::PageDown);
        assert_eq!(ed.cursor.cy, 0);
        ed.move_cursor(Key::PageUp);
        assert_eq!(ed.cursor.cy, 0);
    }
}
