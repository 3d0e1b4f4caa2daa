//! Command history ring (spec.md §3 "History ring", §4.7 "Line editor" —
//! the store the editor's up/down history motion reads and writes).

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// A bounded ring of past input lines. Consecutive duplicate entries are
/// collapsed at push time (spec.md: "a line identical to the immediately
/// preceding history entry is not added again"), and the oldest entry is
/// evicted once `capacity` is exceeded.
#[derive(Debug)]
pub struct HistoryRing {
    entries: Vec<String>,
    capacity: usize,
}

impl HistoryRing {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        HistoryRing {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if line.is_empty() {
            return;
        }
        if self.entries.last().is_some_and(|last| last == &line) {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(line);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry `offset` steps back from the most recent one (`offset ==
    /// 0` is the last line pushed), or `None` past the beginning.
    #[must_use]
    pub fn nth_back(&self, offset: usize) -> Option<&str> {
        let len = self.entries.len();
        let idx = len.checked_sub(offset + 1)?;
        self.entries.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Loads history lines from a file, oldest first, silently capping at
    /// `capacity` (a missing file is not an error: first run has none).
    pub fn load(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        for line in io::BufReader::new(file).lines() {
            self.push(line?);
        }
        Ok(())
    }

    /// Persists the full ring to `path`, one entry per line.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut file = File::create(path)?;
        for entry in &self.entries {
            writeln!(file, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_consecutive_duplicates() {
        let mut h = HistoryRing::new(10);
        h.push("ls");
        h.push("ls");
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn non_consecutive_duplicates_both_kept() {
        let mut h = HistoryRing::new(10);
        h.push("ls");
        h.push("pwd");
        h.push("ls");
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut h = HistoryRing::new(2);
        h.push("a");
        h.push("b");
        h.push("c");
        assert_eq!(h.len(), 2);
        assert_eq!(h.nth_back(0), Some("c"));
        assert_eq!(h.nth_back(1), Some("b"));
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        let mut h = HistoryRing::new(10);
        h.push("one");
        h.push("two");
        h.save(&path).unwrap();

        let mut loaded = HistoryRing::new(10);
        loaded.load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.nth_back(0), Some("two"));
    }

    #[test]
    fn missing_file_loads_empty() {
        let mut h = HistoryRing::new(10);
        h.load("/nonexistent/path/to/history").unwrap();
        assert!(h.is_empty());
    }
}
