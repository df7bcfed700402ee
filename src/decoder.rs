//! Raw terminal input → logical key events.
//!
//! The terminal delivers plain bytes. Most keys are a single byte; navigation keys arrive as
//! short escape sequences (`ESC [ A`, `ESC [ 5 ~`, `ESC O H`, ...). [`Decoder`] is a small
//! state machine fed one byte at a time; [`KeyReader`] pulls bytes from a [`Terminal`] with a
//! bounded wait so a lone ESC is still reported as a key.

use crate::terminal::Terminal;
use std::io;
use std::time::Duration;

const ESC: u8 = 0x1b;

/// The byte produced by `Ctrl` + `key`.
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1f
}

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A byte outside the control range, inserted as-is.
    Char(u8),
    /// A control byte (`< 0x20` or `0x7f`): Enter, Tab, Backspace, Ctrl+letter...
    Control(u8),
    /// ESC on its own, or an escape sequence we do not understand.
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

impl Key {
    fn from_byte(byte: u8) -> Self {
        if byte < 0x20 || byte == 0x7f {
            Key::Control(byte)
        } else {
            Key::Char(byte)
        }
    }
}

/// Where the decoder is inside an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Ground,
    /// Saw `ESC`.
    Escape,
    /// Saw `ESC [`.
    Csi,
    /// Saw `ESC [ <digit>`, waiting for `~`.
    CsiDigit(u8),
    /// Saw `ESC O`.
    Ss3,
    /// Saw `ESC` and a byte that starts no known sequence; one more byte is swallowed.
    Unknown,
}

/// Escape-sequence state machine.
#[derive(Debug, Default)]
pub struct Decoder {
    state: State,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte. Returns `None` while a sequence is still incomplete.
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        let (next, key) = match (self.state, byte) {
            (State::Ground, ESC) => (State::Escape, None),
            (State::Ground, b) => (State::Ground, Some(Key::from_byte(b))),

            (State::Escape, b'[') => (State::Csi, None),
            (State::Escape, b'O') => (State::Ss3, None),
            // Two bytes are always consumed after ESC, even when the first is not understood.
            (State::Escape, _) => (State::Unknown, None),

            (State::Csi, d @ b'0'..=b'9') => (State::CsiDigit(d), None),
            (State::Csi, b) => (State::Ground, Some(Self::csi_letter(b))),

            (State::CsiDigit(d), b'~') => (State::Ground, Some(Self::csi_tilde(d))),
            (State::CsiDigit(_), _) => (State::Ground, Some(Key::Escape)),

            (State::Ss3, b'H') => (State::Ground, Some(Key::Home)),
            (State::Ss3, b'F') => (State::Ground, Some(Key::End)),
            (State::Ss3 | State::Unknown, _) => (State::Ground, Some(Key::Escape)),
        };
        self.state = next;
        key
    }

    /// The input went quiet. A half-read escape sequence is reported as a plain ESC.
    pub fn flush(&mut self) -> Option<Key> {
        let pending = self.state != State::Ground;
        self.state = State::Ground;
        pending.then_some(Key::Escape)
    }

    fn csi_letter(b: u8) -> Key {
        match b {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'C' => Key::Right,
            b'D' => Key::Left,
            b'H' => Key::Home,
            b'F' => Key::End,
            _ => Key::Escape,
        }
    }

    fn csi_tilde(digit: u8) -> Key {
        match digit {
            b'1' | b'7' => Key::Home,
            b'3' => Key::Delete,
            b'4' | b'8' => Key::End,
            b'5' => Key::PageUp,
            b'6' => Key::PageDown,
            _ => Key::Escape,
        }
    }
}

/// Reads whole keys from a terminal, never waiting longer than `timeout` per byte.
#[derive(Debug)]
pub struct KeyReader {
    decoder: Decoder,
    timeout: Duration,
}

impl KeyReader {
    pub fn new(timeout: Duration) -> Self {
        Self { decoder: Decoder::new(), timeout }
    }

    /// Read the next key. `Ok(None)` means no input arrived within the timeout.
    pub fn read_key<T: Terminal + ?Sized>(&mut self, term: &mut T) -> io::Result<Option<Key>> {
        let Some(first) = term.read_byte(self.timeout)? else { return Ok(None); };
        if let Some(key) = self.decoder.feed(first) {
            return Ok(Some(key));
        }
        // Inside an escape sequence: at most three more bytes settle it.
        loop {
            match term.read_byte(self.timeout)? {
                Some(b) => {
                    if let Some(key) = self.decoder.feed(b) {
                        return Ok(Some(key));
                    }
                }
                None => return Ok(self.decoder.flush()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let mut d = Decoder::new();
        let mut keys: Vec<Key> = bytes.iter().filter_map(|&b| d.feed(b)).collect();
        keys.extend(d.flush());
        keys
    }

    // ==================== Single byte tests ====================

    #[test]
    fn printable_bytes() {
        assert_eq!(decode_all(b"a Z~"), vec![
            Key::Char(b'a'),
            Key::Char(b' '),
            Key::Char(b'Z'),
            Key::Char(b'~'),
        ]);
    }

    #[test]
    fn control_bytes() {
        assert_eq!(decode_all(&[ctrl(b'q'), b'\r', b'\t', 0x7f, 0x00]), vec![
            Key::Control(0x11),
            Key::Control(b'\r'),
            Key::Control(b'\t'),
            Key::Control(0x7f),
            Key::Control(0x00),
        ]);
        assert_eq!(ctrl(b's'), 0x13);
        assert_eq!(ctrl(b'h'), 0x08);
    }

    #[test]
    fn high_bytes_are_chars() {
        assert_eq!(decode_all(&[0xc3, 0xa9]), vec![Key::Char(0xc3), Key::Char(0xa9)]);
    }

    // ==================== Escape sequence tests ====================

    #[test]
    fn arrow_keys() {
        assert_eq!(decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"), vec![
            Key::Up,
            Key::Down,
            Key::Right,
            Key::Left,
        ]);
    }

    #[test]
    fn home_end_variants() {
        let keys = decode_all(b"\x1b[H\x1b[F\x1bOH\x1bOF\x1b[1~\x1b[7~\x1b[4~\x1b[8~");
        assert_eq!(keys, vec![
            Key::Home,
            Key::End,
            Key::Home,
            Key::End,
            Key::Home,
            Key::Home,
            Key::End,
            Key::End,
        ]);
    }

    #[test]
    fn tilde_keys() {
        assert_eq!(decode_all(b"\x1b[3~\x1b[5~\x1b[6~"), vec![
            Key::Delete,
            Key::PageUp,
            Key::PageDown,
        ]);
    }

    #[test]
    fn unknown_sequences_collapse_to_escape() {
        assert_eq!(decode_all(b"\x1b[Z"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1b[2~"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1b[5x"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1bOA"), vec![Key::Escape]);
        // ESC + two arbitrary bytes: both are swallowed by the sequence.
        assert_eq!(decode_all(b"\x1bab"), vec![Key::Escape]);
    }

    #[test]
    fn state_resets_after_each_sequence() {
        assert_eq!(decode_all(b"\x1b[Zx\x1b[Ay"), vec![
            Key::Escape,
            Key::Char(b'x'),
            Key::Up,
            Key::Char(b'y'),
        ]);
    }

    #[test]
    fn flush_reports_pending_escape() {
        let mut d = Decoder::new();
        assert_eq!(d.feed(ESC), None);
        assert_eq!(d.flush(), Some(Key::Escape));
        assert_eq!(d.flush(), None);

        assert_eq!(d.feed(ESC), None);
        assert_eq!(d.feed(b'['), None);
        assert_eq!(d.feed(b'5'), None);
        assert_eq!(d.flush(), Some(Key::Escape));
        assert_eq!(d.feed(b'a'), Some(Key::Char(b'a')));
    }

    // ==================== KeyReader tests ====================

    #[test]
    fn reader_times_out_without_input() {
        let mut term = ScriptedTerminal::new(24, 80).with_timeouts(1);
        let mut reader = KeyReader::new(Duration::from_millis(1));
        assert_eq!(reader.read_key(&mut term).unwrap(), None);
    }

    #[test]
    fn reader_assembles_sequences() {
        let mut term = ScriptedTerminal::new(24, 80).with_input(b"\x1b[6~q");
        let mut reader = KeyReader::new(Duration::from_millis(1));
        assert_eq!(reader.read_key(&mut term).unwrap(), Some(Key::PageDown));
        assert_eq!(reader.read_key(&mut term).unwrap(), Some(Key::Char(b'q')));
    }

    #[test]
    fn reader_reports_lone_escape_on_timeout() {
        let mut term = ScriptedTerminal::new(24, 80).with_input(b"\x1b").with_timeouts(1).with_input(b"x");
        let mut reader = KeyReader::new(Duration::from_millis(1));
        assert_eq!(reader.read_key(&mut term).unwrap(), Some(Key::Escape));
        assert_eq!(reader.read_key(&mut term).unwrap(), Some(Key::Char(b'x')));
    }
}
