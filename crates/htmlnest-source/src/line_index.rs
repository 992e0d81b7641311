use crate::ByteOffset;
use crate::LineCol;

/// Maps byte offsets in a document to [`LineCol`] positions.
///
/// `\n`, `\r\n` and a lone `\r` each end a line.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    length: u32,
}

impl LineIndex {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];

        for (i, &byte) in bytes.iter().enumerate() {
            let ends_line = match byte {
                b'\n' => true,
                b'\r' => bytes.get(i + 1) != Some(&b'\n'),
                _ => false,
            };
            if ends_line {
                line_starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }

        Self {
            line_starts,
            length: u32::try_from(bytes.len()).unwrap_or(u32::MAX),
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolve `offset` against `text`, the same text this index was built from.
    ///
    /// Columns count characters, not bytes. Offsets past the end clamp to the
    /// end of the document.
    #[must_use]
    pub fn to_line_col(&self, text: &str, offset: ByteOffset) -> LineCol {
        let offset = offset.offset().min(self.length);
        let line = self.line_of(offset);
        let column = count_chars(text, self.line_starts[line], offset);
        LineCol::new(line_number(line), column)
    }

    fn line_of(&self, offset: u32) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }
}

/// Position lookup for offsets visited in increasing order.
///
/// Remembers the last resolved position so that each character is counted
/// once, however long the line. An offset behind the last one is still
/// resolved correctly, counting from the start of its line.
#[derive(Clone, Debug)]
pub struct LineCursor<'a> {
    text: &'a str,
    index: LineIndex,
    offset: u32,
    position: LineCol,
}

impl<'a> LineCursor<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            index: LineIndex::from_text(text),
            offset: 0,
            position: LineCol::default(),
        }
    }

    pub fn line_col(&mut self, offset: ByteOffset) -> LineCol {
        let offset = offset.offset().min(self.index.length);
        let line = self.index.line_of(offset);
        let line_start = self.index.line_starts[line];

        let (from, column) = if line_start <= self.offset && self.offset <= offset {
            (self.offset, self.position.column())
        } else {
            (line_start, 0)
        };

        self.offset = offset;
        self.position = LineCol::new(
            line_number(line),
            column.saturating_add(count_chars(self.text, from, offset)),
        );
        self.position
    }
}

fn count_chars(text: &str, from: u32, to: u32) -> u32 {
    text.get(from as usize..to as usize)
        .map_or(0, |slice| u32::try_from(slice.chars().count()).unwrap_or(u32::MAX))
}

fn line_number(line: usize) -> u32 {
    u32::try_from(line + 1).unwrap_or(u32::MAX)
}
