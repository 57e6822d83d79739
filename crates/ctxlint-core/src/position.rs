//! Source positions and offset-to-line resolution.

use std::path::Path;

/// Index of a file within its [`Package`](crate::Package).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub u32);

impl FileId {
    /// Returns the index into the package's file list.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A byte offset inside one file of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    /// File the offset belongs to.
    pub file: FileId,
    /// Byte offset from the start of the file.
    pub offset: u32,
}

impl Pos {
    /// Creates a position.
    #[must_use]
    pub fn new(file: FileId, offset: u32) -> Self {
        Self { file, offset }
    }
}

/// A resolved, human-readable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position<'a> {
    /// Path of the file as supplied by the host.
    pub path: &'a Path,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number in bytes (1-indexed).
    pub column: usize,
    /// Byte offset in the file.
    pub offset: usize,
}

/// Byte offsets of line starts, used to turn offsets into line/column pairs.
///
/// `starts[0]` is always 0. A file without text has a single line, so every
/// offset resolves to line 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<u32>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self { starts: vec![0] }
    }
}

impl LineIndex {
    /// Builds the index for a source text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        Self { starts }
    }

    /// Returns the 1-indexed `(line, column)` of a byte offset.
    #[must_use]
    pub fn line_col(&self, offset: u32) -> (usize, usize) {
        let line = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let column = offset - self.starts[line];
        (line + 1, column as usize + 1)
    }

    /// Number of lines in the indexed text.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("line1\nline2\nline3");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(6), (2, 1));
        assert_eq!(index.line_col(8), (2, 3));
        assert_eq!(index.line_col(12), (3, 1));
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn test_without_text_everything_is_line_one() {
        let index = LineIndex::default();
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(41), (1, 42));
    }
}
