mod file;
mod line_index;
mod position;

pub use file::DecodeError;
pub use file::SourceText;
pub use line_index::LineCursor;
pub use line_index::LineIndex;
pub use position::ByteOffset;
pub use position::LineCol;
