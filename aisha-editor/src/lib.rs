//! The interactive raw-mode line editor: terminal control, key decoding,
//! the line/cursor/kill-buffer state, completion, and the cooperative
//! read loop that ties them together (spec.md §4.8).

pub mod buffer;
pub mod completion;
pub mod editor;
pub mod keys;
pub mod terminal;

pub use buffer::LineBuffer;
pub use completion::Completion;
pub use editor::{Editor, ReadOutcome};
pub use keys::{Key, KeyDecoder};
pub use terminal::{RealTerminal, Terminal};
