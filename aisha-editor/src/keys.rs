//! Decodes raw input bytes into logical editing keys (spec.md §4.8/§6's
//! escape-sequence table). A small incremental state machine: each byte
//! either completes a [`Key`], starts an escape sequence awaiting more
//! bytes, or is itself a complete key.

/// A logical key the editor acts on, independent of how many bytes of
/// input produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(u8),
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Backspace,
    Delete,
    CutToEnd,
    CutToStart,
    CutPreviousWord,
    Yank,
    Redraw,
    Transpose,
    Tab,
    Eof,
    Interrupt,
    Enter,
}

/// Feeds raw bytes one at a time and yields [`Key`]s once a full sequence
/// has been recognized; buffers internally while an escape sequence is
/// incomplete.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one input byte, returning a decoded key once a complete
    /// sequence has accumulated, or `None` while still mid-escape.
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        if self.pending.is_empty() {
            return self.start(byte);
        }
        self.pending.push(byte);
        self.continue_escape()
    }

    fn start(&mut self, byte: u8) -> Option<Key> {
        match byte {
            0x1b => {
                self.pending.push(byte);
                None
            }
            0x01 => Some(Key::Home),
            0x02 => Some(Key::Left),
            0x03 => Some(Key::Interrupt),
            0x04 => Some(Key::Eof),
            0x05 => Some(Key::End),
            0x06 => Some(Key::Right),
            0x07 => None,
            0x08 | 0x7f => Some(Key::Backspace),
            b'\t' => Some(Key::Tab),
            b'\n' | b'\r' => Some(Key::Enter),
            0x0b => Some(Key::CutToEnd),
            0x0c => Some(Key::Redraw),
            0x0e => Some(Key::Down),
            0x10 => Some(Key::Up),
            0x14 => Some(Key::Transpose),
            0x15 => Some(Key::CutToStart),
            0x17 => Some(Key::CutPreviousWord),
            0x19 => Some(Key::Yank),
            _ if byte.is_ascii_graphic() || byte == b' ' => Some(Key::Char(byte)),
            _ => None,
        }
    }

    fn continue_escape(&mut self) -> Option<Key> {
        let key = match self.pending.as_slice() {
            [0x1b, b'['] | [0x1b, b'O'] => return None,
            [0x1b, b'[', b'A'] => Some(Key::Up),
            [0x1b, b'[', b'B'] => Some(Key::Down),
            [0x1b, b'[', b'C'] => Some(Key::Right),
            [0x1b, b'[', b'D'] => Some(Key::Left),
            [0x1b, b'[', b'H'] | [0x1b, b'O', b'H'] => Some(Key::Home),
            [0x1b, b'[', b'F'] | [0x1b, b'O', b'F'] => Some(Key::End),
            [0x1b, b'[', b'1'..=b'8'] => return None,
            [0x1b, b'[', b'1' | b'7', b'~'] => Some(Key::Home),
            [0x1b, b'[', b'3', b'~'] => Some(Key::Delete),
            [0x1b, b'[', b'4' | b'8', b'~'] => Some(Key::End),
            // Page-Up/Page-Down (`5~`/`6~`): lexed per spec.md §6 but bound
            // to no editing action; swallow the sequence.
            [0x1b, b'[', b'5' | b'6', b'~'] => None,
            [0x1b, _] => Some(Key::Char(0x1b)),
            _ => None,
        };
        if key.is_some() || self.pending.len() > 4 {
            self.pending.clear();
        } else if matches!(self.pending.last(), Some(b'~')) {
            self.pending.clear();
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_printable_byte() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.feed(b'a'), Some(Key::Char(b'a')));
    }

    #[test]
    fn control_codes() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.feed(0x01), Some(Key::Home));
        assert_eq!(d.feed(0x05), Some(Key::End));
        assert_eq!(d.feed(0x04), Some(Key::Eof));
    }

    #[test]
    fn arrow_escape_sequence() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.feed(0x1b), None);
        assert_eq!(d.feed(b'['), None);
        assert_eq!(d.feed(b'A'), Some(Key::Up));
    }

    #[test]
    fn delete_key_escape_sequence() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.feed(0x1b), None);
        assert_eq!(d.feed(b'['), None);
        assert_eq!(d.feed(b'3'), None);
        assert_eq!(d.feed(b'~'), Some(Key::Delete));
    }

    #[test]
    fn page_updown_is_swallowed_without_wedging_decoder() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.feed(0x1b), None);
        assert_eq!(d.feed(b'['), None);
        assert_eq!(d.feed(b'5'), None);
        assert_eq!(d.feed(b'~'), None);
        // the decoder must have cleared its buffer, not stay wedged
        assert_eq!(d.feed(b'a'), Some(Key::Char(b'a')));
    }

    #[test]
    fn ss3_home_end_variant() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.feed(0x1b), None);
        assert_eq!(d.feed(b'O'), None);
        assert_eq!(d.feed(b'H'), Some(Key::Home));
    }

    #[test]
    fn enter_key() {
        let mut d = KeyDecoder::new();
        assert_eq!(d.feed(b'\n'), Some(Key::Enter));
    }
}
