//! Key handling: the command layer and the single-line prompt.

use crate::decoder::{ctrl, Key};
use crate::terminal::Terminal;
use crate::types::QuitState;
use super::Editor;
use anyhow::Result;

const QUIT: u8 = ctrl(b'q');
const SAVE: u8 = ctrl(b's');
const CTRL_H: u8 = ctrl(b'h');
const ENTER: u8 = b'\r';
const TAB: u8 = b'\t';
const BACKSPACE: u8 = 0x7f;

impl Editor {
    /// Apply one key. Returns `true` when the editor should exit.
    pub fn handle_key<T: Terminal + ?Sized>(&mut self, key: Key, term: &mut T) -> Result<bool> {
        match key {
            Key::Control(QUIT) => return Ok(self.try_quit()),
            Key::Control(SAVE) => self.save(term)?,
            Key::Control(ENTER) => self.insert_newline(),
            Key::Control(BACKSPACE | CTRL_H) => self.delete_char(),
            Key::Control(TAB) => self.insert_char(TAB),
            Key::Delete => {
                self.move_cursor(Key::Right);
                self.delete_char();
            }
            Key::Char(byte) => self.insert_char(byte),
            Key::Up
            | Key::Down
            | Key::Left
            | Key::Right
            | Key::Home
            | Key::End
            | Key::PageUp
            | Key::PageDown => self.move_cursor(key),
            // Ctrl-L, Escape and the remaining control bytes: the screen is repainted every
            // iteration anyway.
            Key::Escape | Key::Control(_) => {}
        }

        self.quit = QuitState::Normal;
        Ok(false)
    }

    /// Ctrl-Q. A dirty document needs `quit_times` extra presses in a row.
    fn try_quit(&mut self) -> bool {
        if !self.doc.is_dirty() {
            tracing::info!("Quit");
            return true;
        }
        let remaining = match self.quit {
            QuitState::Normal => self.config.quit_times,
            QuitState::Confirming(n) => n,
        };
        if remaining == 0 {
            tracing::info!("Quit discarding unsaved changes");
            return true;
        }
        self.set_status(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {remaining} more times to quit."
        ));
        self.quit = QuitState::Confirming(remaining - 1);
        false
    }

    /// Read a line of input on the message line.
    ///
    /// The message shows `prefix`, the input so far and `suffix`. Returns `None` when the user
    /// cancels with ESC; Enter on empty input is ignored.
    pub fn prompt<T: Terminal + ?Sized>(
        &mut self,
        term: &mut T,
        prefix: &str,
        suffix: &str,
    ) -> Result<Option<String>> {
        let mut input = String::new();
        loop {
            self.set_status(format!("{prefix}{input}{suffix}"));
            self.refresh_screen(term)?;

            let Some(key) = self.read_key(term)? else { continue; };
            match key {
                Key::Escape => {
                    self.clear_status();
                    tracing::debug!("Prompt cancelled");
                    return Ok(None);
                }
                Key::Control(ENTER) if !input.is_empty() => {
                    self.clear_status();
                    return Ok(Some(input));
                }
                Key::Control(BACKSPACE | CTRL_H) | Key::Delete => {
                    input.pop();
                }
                Key::Char(byte) if byte.is_ascii() => input.push(char::from(byte)),
                _ => {}
            }
        }
    }
}
