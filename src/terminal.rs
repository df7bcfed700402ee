//! Terminal setup and teardown, plus the byte-level I/O seam the editor talks through.

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    terminal::{self, ClearType},
    ExecutableCommand,
};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Everything the editor needs from a terminal.
///
/// The real implementation is [`StdTerminal`]; tests drive the editor through a scripted one.
pub trait Terminal {
    /// Read one input byte, waiting at most `timeout`. `Ok(None)` when nothing arrived.
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;

    /// Write a complete frame in one go.
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;

    /// Current size as `(columns, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;
}

/// RAII guard for raw mode.
///
/// Acquired in `new()`, released in `Drop`, so the terminal is restored even when the editor
/// bails out with an error.
pub struct TerminalGuard;

impl TerminalGuard {
    /// Switch the terminal to raw (non-canonical, non-echoing) mode.
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("enable_raw_mode failed")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    /// Clear the screen and hand the terminal back in its original mode.
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(terminal::Clear(ClearType::All));
        let _ = stdout.execute(cursor::MoveTo(0, 0));
        let _ = stdout.execute(cursor::Show);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

/// stdin/stdout of the controlling terminal.
pub struct StdTerminal {
    stdout: Stdout,
}

impl StdTerminal {
    pub fn new() -> Self {
        Self { stdout: io::stdout() }
    }
}

impl Terminal for StdTerminal {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        // `std::io::Stdin` buffers internally, which would hide pending bytes from `poll`, so
        // stdin is read one byte at a time straight from the file descriptor.
        let mut fds = libc::pollfd { fd: libc::STDIN_FILENO, events: libc::POLLIN, revents: 0 };
        let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);
        // SAFETY: `fds` is a valid array of one pollfd for the whole call.
        let ready = unsafe { libc::poll(&mut fds, 1, millis) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            return if err.kind() == io::ErrorKind::Interrupted { Ok(None) } else { Err(err) };
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = 0u8;
        // SAFETY: reads at most one byte into a live local.
        let n = unsafe { libc::read(libc::STDIN_FILENO, std::ptr::addr_of_mut!(byte).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
                    _ => Err(err),
                }
            }
        }
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.stdout.write_all(frame)?;
        self.stdout.flush()
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

/// A terminal that replays a fixed script of input bytes and timeouts and keeps every frame.
#[cfg(test)]
pub struct ScriptedTerminal {
    input: std::collections::VecDeque<Option<u8>>,
    pub frames: Vec<Vec<u8>>,
    cols: u16,
    rows: u16,
}

#[cfg(test)]
impl ScriptedTerminal {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { input: std::collections::VecDeque::new(), frames: Vec::new(), cols, rows }
    }

    /// Queue input bytes.
    pub fn with_input(mut self, bytes: &[u8]) -> Self {
        self.input.extend(bytes.iter().copied().map(Some));
        self
    }

    /// Queue `n` reads that time out.
    pub fn with_timeouts(mut self, n: usize) -> Self {
        self.input.extend(std::iter::repeat(None).take(n));
        self
    }

    pub fn last_frame(&self) -> String {
        self.frames.last().map(|f| String::from_utf8_lossy(f).into_owned()).unwrap_or_default()
    }
}

#[cfg(test)]
impl Terminal for ScriptedTerminal {
    /// Running past the end of the script is an error, so a test can never spin forever.
    fn read_byte(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted"))
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.frames.push(frame.to_vec());
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.cols, self.rows))
    }
}
