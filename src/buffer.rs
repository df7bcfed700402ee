//! The document buffer: rows of raw bytes plus their tab-expanded render form.

use std::cmp::min;
use std::path::PathBuf;

/// One line of the document.
///
/// `raw` is what the user typed; `rendered` is what goes to the screen (tabs expanded to the
/// next tab stop). Every mutating method rebuilds `rendered` before returning, so the two are
/// never observed out of sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    raw: Vec<u8>,
    rendered: Vec<u8>,
}

impl Row {
    /// Build a row from raw bytes (no newline) and render it.
    pub fn new(raw: Vec<u8>, tab_stop: usize) -> Self {
        let mut row = Self { raw, rendered: Vec::new() };
        row.update(tab_stop);
        row
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    /// Rebuild `rendered` from `raw`.
    fn update(&mut self, tab_stop: usize) {
        let tabs = self.raw.iter().filter(|&&b| b == b'\t').count();
        let mut rendered = Vec::with_capacity(self.raw.len() + tabs * (tab_stop - 1));
        for &b in &self.raw {
            if b == b'\t' {
                rendered.push(b' ');
                while rendered.len() % tab_stop != 0 {
                    rendered.push(b' ');
                }
            } else {
                rendered.push(b);
            }
        }
        self.rendered = rendered;
    }

    fn insert(&mut self, at: usize, byte: u8, tab_stop: usize) {
        let at = min(at, self.raw.len());
        self.raw.insert(at, byte);
        self.update(tab_stop);
    }

    /// Remove the byte at `at`. Returns `false` (and changes nothing) when out of range.
    fn remove(&mut self, at: usize, tab_stop: usize) -> bool {
        if at >= self.raw.len() {
            return false;
        }
        self.raw.remove(at);
        self.update(tab_stop);
        true
    }

    fn append(&mut self, text: &[u8], tab_stop: usize) {
        self.raw.extend_from_slice(text);
        self.update(tab_stop);
    }

    /// Cut the row at `at`, returning everything from `at` on.
    fn split_off(&mut self, at: usize, tab_stop: usize) -> Vec<u8> {
        let at = min(at, self.raw.len());
        let rest = self.raw.split_off(at);
        self.update(tab_stop);
        rest
    }
}

/// The whole open file.
///
/// Indices coming from the input layer are routinely one past the end; every operation here
/// clamps or ignores them instead of failing.
#[derive(Debug)]
pub struct Document {
    rows: Vec<Row>,
    /// Mutations since the last load/save. Zero means unmodified.
    pub dirty: usize,
    /// Where the document is saved. `None` for a new buffer.
    pub filename: Option<PathBuf>,
    tab_stop: usize,
}

impl Document {
    /// Create an empty, unnamed document.
    pub fn new(tab_stop: usize) -> Self {
        Self { rows: Vec::new(), dirty: 0, filename: None, tab_stop: tab_stop.max(1) }
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Raw length of row `at`, or 0 for a row that does not exist.
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, |r| r.raw.len())
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    /// Insert a new row at `at`. Ignored when `at > row_count()`.
    pub fn insert_row(&mut self, at: usize, text: &[u8]) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(text.to_vec(), self.tab_stop));
        self.dirty += 1;
    }

    /// Remove row `at` if it exists.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty += 1;
    }

    /// Insert `byte` into row `row` at `col` (clamped to the row length).
    pub fn insert_char(&mut self, row: usize, col: usize, byte: u8) {
        let tab_stop = self.tab_stop;
        if let Some(r) = self.rows.get_mut(row) {
            r.insert(col, byte, tab_stop);
            self.dirty += 1;
        }
    }

    /// Remove the byte at `col` of row `row`. Out-of-range positions are ignored.
    pub fn delete_char(&mut self, row: usize, col: usize) {
        let tab_stop = self.tab_stop;
        if let Some(r) = self.rows.get_mut(row) {
            if r.remove(col, tab_stop) {
                self.dirty += 1;
            }
        }
    }

    /// Concatenate `text` onto the end of row `row`.
    pub fn append_to_row(&mut self, row: usize, text: &[u8]) {
        let tab_stop = self.tab_stop;
        if let Some(r) = self.rows.get_mut(row) {
            r.append(text, tab_stop);
            self.dirty += 1;
        }
    }

    /// Split row `row` at `col`: the tail becomes a new row right after it.
    pub fn split_row(&mut self, row: usize, col: usize) {
        let tab_stop = self.tab_stop;
        let Some(r) = self.rows.get_mut(row) else { return; };
        let rest = r.split_off(col, tab_stop);
        self.dirty += 1;
        self.insert_row(row + 1, &rest);
    }

    /// Serialize for saving: every row followed by `\n`.
    pub fn to_flat_buffer(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.raw.len() + 1).sum();
        let mut buf = Vec::with_capacity(total);
        for row in &self.rows {
            buf.extend_from_slice(&row.raw);
            buf.push(b'\n');
        }
        buf
    }

    /// Replace the content with one row per line. Trailing `\n`/`\r` bytes are trimmed from
    /// each line. The document is clean afterwards.
    pub fn load_from_lines<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        self.rows = lines
            .into_iter()
            .map(|line| {
                let mut line = line.as_ref();
                while let [head @ .., b'\n' | b'\r'] = line {
                    line = head;
                }
                Row::new(line.to_vec(), self.tab_stop)
            })
            .collect();
        self.dirty = 0;
    }

    /// Load file contents. A final newline does not produce an extra empty row.
    pub fn load_bytes(&mut self, bytes: &[u8]) {
        let mut lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        self.load_from_lines(lines);
    }

    /// Forget pending modifications (after a successful save).
    pub fn mark_saved(&mut self) {
        self.dirty = 0;
    }
}
