//! File operations: open and save.

use crate::cursor::Cursor;
use crate::terminal::Terminal;
use super::Editor;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

impl Editor {
    /// Load `path` into the document. A file that does not exist yet gives an empty document
    /// that will be saved under that name.
    pub fn open(&mut self, path: PathBuf) -> Result<()> {
        if path.exists() {
            let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            self.doc.load_bytes(&bytes);
            tracing::info!("Opened {} ({} lines)", path.display(), self.doc.row_count());
        } else {
            tracing::info!("New file {}", path.display());
        }
        self.doc.filename = Some(path);
        self.cursor = Cursor::default();
        Ok(())
    }

    /// Ctrl-S. Asks for a name first when the document has none.
    ///
    /// Write failures end up on the message line with the document still dirty; only terminal
    /// errors from the prompt are returned.
    pub fn save<T: Terminal + ?Sized>(&mut self, term: &mut T) -> Result<()> {
        let path = match &self.doc.filename {
            Some(path) => path.clone(),
            None => {
                let Some(name) = self.prompt(term, "Save as: ", " (ESC to cancel)")? else {
                    self.set_status("Save aborted");
                    return Ok(());
                };
                let path = PathBuf::from(name);
                self.doc.filename = Some(path.clone());
                path
            }
        };

        let bytes = self.doc.to_flat_buffer();
        match write_file(&path, &bytes) {
            Ok(()) => {
                self.doc.mark_saved();
                tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
                self.set_status(format!("{} bytes written to disk", bytes.len()));
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", path.display(), e);
                self.set_status(format!("Can't save! I/O error: {e}"));
            }
        }
        Ok(())
    }
}

/// Overwrite `path` with `bytes`, creating it (mode 0644) if needed.
fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    let mut file = opts.open(path)?;
    file.set_len(bytes.len() as u64)?;
    file.write_all(bytes)
}
