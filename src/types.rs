//! Common types used throughout the editor.

use std::time::Instant;

/// Short-lived message shown on the bottom line.
#[derive(Debug, Clone)]
pub struct StatusMsg {
    pub text: String,
    /// When the message was set; the renderer hides it once it is too old.
    pub set_at: Instant,
}

/// Progress towards quitting with unsaved changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitState {
    Normal,
    /// Ctrl-Q was pressed on a dirty document; this many more presses are needed.
    Confirming(u32),
}
