//! Byte offset <-> LSP position conversion.
//!
//! LSP columns count UTF-16 code units; offsets here are UTF-8 byte offsets.

use tower_lsp::lsp_types::{Position, Range};

/// Line start table over a query text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    source: String,
    /// Byte offset of the first character of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Index `source`. Both `\n` and `\r\n` line endings are accepted.
    pub fn new(source: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    /// The indexed text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Start offset and text of line `line`, without its terminator.
    pub(crate) fn line(&self, line: usize) -> Option<(usize, &str)> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.source.len(), |next| next - 1);
        let text = &self.source[start..end];
        Some((start, text.strip_suffix('\r').unwrap_or(text)))
    }

    /// Convert a byte offset to an LSP position. Offsets past the end clamp to it.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let character: usize = self.source[start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();
        Position::new(line as u32, character as u32)
    }

    /// Returns `None` if the line is out of range. Columns past the end of a
    /// line clamp to the line end.
    pub fn position_to_offset(&self, position: Position) -> Option<usize> {
        let (start, text) = self.line(position.line as usize)?;
        let mut units = 0u32;
        for (i, c) in text.char_indices() {
            if units >= position.character {
                return Some(start + i);
            }
            units += c.len_utf16() as u32;
        }
        Some(start + text.len())
    }

    /// Convert a byte span to an LSP range.
    pub fn span_to_range(&self, span: &std::ops::Range<usize>) -> Range {
        Range::new(
            self.offset_to_position(span.start),
            self.offset_to_position(span.end),
        )
    }
}
