//! Line and column lookup for byte offsets.
//!
//! Line starts are computed once, so each lookup is a binary search instead
//! of a scan from the start of the source.

/// Pre-computed line start offsets for one source.
///
/// # Example
///
/// ```
/// use tsc_lexer::LineIndex;
///
/// let source = "<p>\n{name}\n</p>";
/// let index = LineIndex::build(source);
///
/// assert_eq!(index.line_col(source, 0), (1, 1));
/// assert_eq!(index.line_col(source, 5), (2, 2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    /// Byte offset of each line start. `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineIndex {
    /// Build the index with one pass over the source.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "source offsets bounded by u32, the scanner's size limit"
    )]
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        LineIndex { offsets }
    }

    /// 1-based line containing `offset`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "line count bounded by source length"
    )]
    #[inline]
    pub fn line(&self, offset: u32) -> u32 {
        let idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        idx as u32 + 1
    }

    /// 1-based `(line, column)` of `offset`. Columns count characters, not
    /// bytes.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line(offset);
        let line_start = self.line_start(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Byte offset where 1-based `line` starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        let idx = line.checked_sub(1)?;
        self.offsets.get(idx as usize).copied()
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let index = LineIndex::build("hello");
        assert_eq!(index.line(0), 1);
        assert_eq!(index.line(4), 1);
        assert_eq!(index.line_count(), 1);
    }

    #[test]
    fn multiple_lines() {
        let source = "abc\ndefgh\nij";
        let index = LineIndex::build(source);
        assert_eq!(index.line_col(source, 0), (1, 1));
        assert_eq!(index.line_col(source, 3), (1, 4)); // the '\n'
        assert_eq!(index.line_col(source, 4), (2, 1));
        assert_eq!(index.line_col(source, 7), (2, 4));
        assert_eq!(index.line_col(source, 10), (3, 1));
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn columns_count_characters() {
        let source = "caf\u{e9} {x}";
        let index = LineIndex::build(source);
        // `{` is byte 6 but character 5
        assert_eq!(index.line_col(source, 6), (1, 6));
    }

    #[test]
    fn offset_past_end_clamps() {
        let source = "ab";
        let index = LineIndex::build(source);
        assert_eq!(index.line_col(source, 10), (1, 3));
    }

    #[test]
    fn line_start_offsets() {
        let index = LineIndex::build("a\nb\n");
        assert_eq!(index.line_start(0), None);
        assert_eq!(index.line_start(1), Some(0));
        assert_eq!(index.line_start(3), Some(4));
        assert_eq!(index.line_start(4), None);
    }
}
