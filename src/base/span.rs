//! Line/column conversion for byte offsets.

use text_size::TextSize;

/// A line/column pair, both 0-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets to line/column pairs.
///
/// Built once per file; lookups are a binary search over line starts.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
            }
        }
        LineIndex { line_starts }
    }

    /// Convert a byte offset to a line/column pair.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        LineCol {
            line: line as u32,
            col: u32::from(offset) - u32::from(line_start),
        }
    }

    /// Byte offset of the start of `line`, if the file has that many lines.
    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.line_starts.get(line as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_roundtrip() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(2)), LineCol { line: 0, col: 2 });
        assert_eq!(index.line_col(TextSize::new(3)), LineCol { line: 1, col: 0 });
        assert_eq!(index.line_col(TextSize::new(6)), LineCol { line: 2, col: 0 });
        assert_eq!(index.line_col(TextSize::new(8)), LineCol { line: 3, col: 1 });
    }

    #[test]
    fn line_start_lookup() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.line_start(0), Some(TextSize::new(0)));
        assert_eq!(index.line_start(1), Some(TextSize::new(2)));
        assert_eq!(index.line_start(2), None);
    }
}
