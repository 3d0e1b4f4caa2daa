//! The interactive line editor's main cooperative loop (spec.md §4.8).

use crate::buffer::LineBuffer;
use crate::completion::{self, Completion};
use crate::keys::{Key, KeyDecoder};
use crate::terminal::Terminal;
use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;
use std::io;
use std::os::unix::io::RawFd;

const STDIN: RawFd = 0;

/// What a completed read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line the user committed with Enter (possibly empty: Ctrl-C
    /// produces an empty line too, spec.md §4.8 "Ctrl-C → abort the
    /// current line and yield an empty result").
    Line(String),
    /// Ctrl-D on an empty line: end of session.
    Eof,
}

/// Owns the raw-mode terminal handle and drives one line of input at a
/// time; the history ring and completion sources live in [`Env`] and are
/// borrowed for the duration of a single `read_line` call.
pub struct Editor<T: Terminal> {
    terminal: T,
}

impl<T: Terminal> Editor<T> {
    pub fn new(terminal: T) -> Self {
        Editor { terminal }
    }

    /// Reads one line interactively, rendering `prompt` (which may contain
    /// ANSI escapes excluded from width calculations) at its start.
    pub fn read_line<S: System>(
        &mut self,
        env: &Env<S>,
        builtins: &BuiltinTable<S>,
        prompt: &str,
    ) -> io::Result<ReadOutcome> {
        let previous = self.terminal.enable_raw_mode(STDIN)?;
        let result = self.read_line_raw(env, builtins, prompt);
        self.terminal.disable_raw_mode(STDIN, &previous)?;
        result
    }

    fn read_line_raw<S: System>(
        &mut self,
        env: &Env<S>,
        builtins: &BuiltinTable<S>,
        prompt: &str,
    ) -> io::Result<ReadOutcome> {
        let mut buffer = LineBuffer::new();
        let mut decoder = KeyDecoder::new();
        let mut history_offset: Option<usize> = None;
        let mut draft: Vec<u8> = Vec::new();

        self.refresh(prompt, &buffer)?;
        loop {
            let Some(byte) = self.terminal.read_byte()? else {
                continue;
            };
            let Some(key) = decoder.feed(byte) else {
                continue;
            };
            match key {
                Key::Char(c) => {
                    buffer.insert(c);
                    history_offset = None;
                }
                Key::Left => buffer.move_left(),
                Key::Right => buffer.move_right(),
                Key::Home => buffer.move_home(),
                Key::End => buffer.move_end(),
                Key::Backspace => buffer.delete_left(),
                Key::Delete => buffer.delete_right(),
                Key::CutToEnd => buffer.cut_to_end(),
                Key::CutToStart => buffer.cut_to_start(),
                Key::CutPreviousWord => buffer.cut_previous_word(),
                Key::Yank => buffer.yank(),
                Key::Transpose => buffer.transpose(),
                Key::Up => {
                    self.history_back(env, &mut buffer, &mut history_offset, &mut draft);
                }
                Key::Down => {
                    self.history_forward(&mut buffer, &mut history_offset, &draft);
                }
                Key::Redraw => {
                    self.terminal.write_all(b"\x1b[H\x1b[2J")?;
                }
                Key::Tab => {
                    self.complete(env, builtins, &mut buffer)?;
                }
                Key::Eof => {
                    if buffer.text().is_empty() {
                        return Ok(ReadOutcome::Eof);
                    }
                    buffer.delete_right();
                }
                Key::Interrupt => {
                    self.terminal.write_all(b"\r\n")?;
                    return Ok(ReadOutcome::Line(String::new()));
                }
                Key::Enter => {
                    self.terminal.write_all(b"\r\n")?;
                    let line = String::from_utf8_lossy(buffer.text()).into_owned();
                    return Ok(ReadOutcome::Line(line));
                }
            }
            self.refresh(prompt, &buffer)?;
        }
    }

    fn history_back<S: System>(
        &self,
        env: &Env<S>,
        buffer: &mut LineBuffer,
        offset: &mut Option<usize>,
        draft: &mut Vec<u8>,
    ) {
        let next = offset.map_or(0, |o| o + 1);
        let Some(entry) = env.history.nth_back(next) else {
            return;
        };
        if offset.is_none() {
            *draft = buffer.text().to_vec();
        }
        *offset = Some(next);
        buffer.set_text(entry.as_bytes().to_vec());
    }

    fn history_forward(&self, buffer: &mut LineBuffer, offset: &mut Option<usize>, draft: &[u8]) {
        match *offset {
            None => {}
            Some(0) => {
                *offset = None;
                buffer.set_text(draft.to_vec());
            }
            Some(o) => {
                // The caller only reaches here through `history_back`, so
                // the entry at `o - 1` was already confirmed to exist.
                *offset = Some(o - 1);
            }
        }
    }

    fn complete<S: System>(
        &mut self,
        env: &Env<S>,
        builtins: &BuiltinTable<S>,
        buffer: &mut LineBuffer,
    ) -> io::Result<()> {
        let (word, is_command_position) = buffer.word_under_cursor();
        match completion::complete(env, builtins, &word, is_command_position) {
            Completion::None => {}
            Completion::Insert {
                replacement,
                trailing_space,
            } => {
                buffer.replace_word_under_cursor(&replacement);
                if trailing_space {
                    buffer.insert(b' ');
                }
            }
            Completion::List(candidates) => {
                self.print_candidates(&candidates)?;
            }
        }
        Ok(())
    }

    fn print_candidates(&mut self, candidates: &[String]) -> io::Result<()> {
        let width = candidates.iter().map(String::len).max().unwrap_or(0) + 2;
        let columns = (80 / width.max(1)).max(1);
        let mut out = Vec::new();
        out.extend_from_slice(b"\r\n");
        for chunk in candidates.chunks(columns) {
            for name in chunk {
                out.extend_from_slice(format!("{name:<width$}").as_bytes());
            }
            out.extend_from_slice(b"\r\n");
        }
        self.terminal.write_all(&out)
    }

    fn refresh(&mut self, prompt: &str, buffer: &LineBuffer) -> io::Result<()> {
        let mut out = Vec::new();
        out.push(b'\r');
        out.extend_from_slice(prompt.as_bytes());
        out.extend_from_slice(buffer.text());
        out.extend_from_slice(b"\x1b[K");
        out.push(b'\r');
        let column = visible_width(prompt) + buffer.cursor();
        if column > 0 {
            out.extend_from_slice(format!("\x1b[{column}C").as_bytes());
        }
        self.terminal.write_all(&out)
    }
}

/// The prompt's on-screen width, excluding bytes between an ESC `[` and
/// the terminating letter of the ANSI sequence (spec.md §4.8).
fn visible_width(prompt: &str) -> usize {
    let bytes = prompt.as_bytes();
    let mut width = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'[') {
            i += 2;
            while i < bytes.len() && !(0x40..=0x7e).contains(&bytes[i]) {
                i += 1;
            }
            i += 1;
        } else {
            width += 1;
            i += 1;
        }
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_width_ignores_ansi_escapes() {
        assert_eq!(visible_width("$ "), 2);
        assert_eq!(visible_width("\x1b[32m$\x1b[0m "), 2);
    }
}
