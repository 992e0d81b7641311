use std::fmt;
use std::ops::Deref;

use serde::Serialize;

/// A byte offset within a text document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ByteOffset(u32);

impl ByteOffset {
    #[must_use]
    pub fn new(offset: u32) -> Self {
        Self(offset)
    }

    #[must_use]
    pub fn from_usize(offset: usize) -> Self {
        Self(u32::try_from(offset).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Deref for ByteOffset {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A line and column position within a text document.
///
/// Lines are 1-indexed and columns are 0-indexed character counts from the
/// start of the line. Rendered as `(line, column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineCol {
    line: u32,
    column: u32,
}

impl LineCol {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl Default for LineCol {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_renders_as_tuple() {
        assert_eq!(LineCol::new(3, 4).to_string(), "(3, 4)");
        assert_eq!(LineCol::default().to_string(), "(1, 0)");
    }

    #[test]
    fn line_col_orders_by_line_then_column() {
        assert!(LineCol::new(1, 9) < LineCol::new(2, 0));
        assert!(LineCol::new(2, 1) < LineCol::new(2, 3));
    }

    #[test]
    fn line_col_serializes_fields() {
        let json = serde_json::to_string(&LineCol::new(2, 5)).unwrap();
        assert_eq!(json, r#"{"line":2,"column":5}"#);
    }

    #[test]
    fn byte_offset_saturates() {
        assert_eq!(ByteOffset::from_usize(7).offset(), 7);
        assert_eq!(*ByteOffset::new(12), 12);
    }
}
