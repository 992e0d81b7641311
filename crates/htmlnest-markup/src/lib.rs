//! Tag-level tokenizer for HTML documents.
//!
//! This is not an HTML5 tokenizer. It recognises start, end and
//! self-closing tags with their positions, skips comments, declarations and
//! processing instructions, and treats `<script>`/`<style>` bodies as raw
//! text. Nothing here knows about implied end tags or tree construction.
//! Every input tokenizes; markup left unfinished at the end of a document is
//! read as text.

mod lexer;
mod tokens;

pub use lexer::Lexer;
pub use tokens::TagEvent;

/// Tokenize `source` into the sequence of tag events it contains.
#[must_use]
pub fn tokenize(source: &str) -> Vec<TagEvent> {
    Lexer::new(source).tokenize()
}
