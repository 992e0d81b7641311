use htmlnest_source::ByteOffset;
use htmlnest_source::LineCol;
use htmlnest_source::LineCursor;
use memchr::memchr;
use memchr::memmem;

use crate::tokens::TagEvent;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Scans a document for tags.
///
/// Never fails. A construct that is still open at the end of the document
/// (comment, tag, declaration, processing instruction) takes the rest of the
/// document as text and produces no event.
pub struct Lexer<'a> {
    source: &'a str,
    cursor: LineCursor<'a>,
    start: usize,
    current: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            cursor: LineCursor::new(source),
            start: 0,
            current: 0,
        }
    }

    #[must_use]
    pub fn tokenize(mut self) -> Vec<TagEvent> {
        let mut events = Vec::new();

        while let Some(lt) = self.find_byte(b'<') {
            self.start = lt;
            self.current = lt;

            match self.peek_at(lt + 1) {
                Some(b'!') => self.lex_declaration(),
                Some(b'?') => self.consume_past(self.start + 2, ">"),
                Some(b'/') => {
                    if let Some(event) = self.lex_end_tag() {
                        events.push(event);
                    }
                }
                Some(c) if c.is_ascii_alphabetic() => {
                    let Some(event) = self.lex_start_tag() else {
                        continue;
                    };
                    let raw_text = match &event {
                        TagEvent::Open { name, .. } if is_raw_text_element(name) => {
                            Some(name.clone())
                        }
                        _ => None,
                    };
                    events.push(event);
                    if let Some(name) = raw_text {
                        self.skip_raw_text(&name);
                    }
                }
                _ => self.current = lt + 1,
            }
        }

        events
    }

    fn lex_declaration(&mut self) {
        let rest = &self.source[self.start..];

        if rest.starts_with(COMMENT_START) {
            // from the `!`, so that `<!-->` and `<!--->` close themselves
            self.consume_past(self.start + 2, COMMENT_END);
        } else if rest.starts_with(CDATA_START) {
            self.consume_past(self.start + CDATA_START.len(), CDATA_END);
        } else {
            self.consume_past(self.start + 2, ">");
        }
    }

    fn lex_end_tag(&mut self) -> Option<TagEvent> {
        let name_start = self.start + 2;

        match self.peek_at(name_start) {
            Some(b'>') => {
                // `</>` is dropped entirely
                self.current = name_start + 1;
                None
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let name_end = self.scan_name(name_start);
                let Some(gt) = memchr(b'>', &self.source.as_bytes()[name_end..]) else {
                    self.current = self.source.len();
                    return None;
                };
                self.current = name_end + gt + 1;
                let position = self.position(self.start);
                Some(TagEvent::close(&self.source[name_start..name_end], position))
            }
            _ => {
                // Bogus comment; without a `>` the `</` is plain text.
                match memchr(b'>', &self.source.as_bytes()[name_start..]) {
                    Some(gt) => self.current = name_start + gt + 1,
                    None => self.current = name_start,
                }
                None
            }
        }
    }

    fn lex_start_tag(&mut self) -> Option<TagEvent> {
        let source = self.source;
        let bytes = source.as_bytes();
        let name_start = self.start + 1;
        let name_end = self.scan_name(name_start);

        // `/` only marks the tag self-closing when it directly precedes `>`
        let mut slash = false;
        let mut pos = name_end;

        while let Some(&c) = bytes.get(pos) {
            match c {
                b'>' => {
                    self.current = pos + 1;
                    let name = &source[name_start..name_end];
                    let position = self.position(self.start);
                    return Some(if slash {
                        TagEvent::self_close(name, position)
                    } else {
                        TagEvent::open(name, position)
                    });
                }
                b'=' => {
                    slash = false;
                    let Some(end) = self.skip_attribute_value(pos + 1) else {
                        break;
                    };
                    pos = end;
                }
                _ => {
                    slash = c == b'/';
                    pos += 1;
                }
            }
        }

        self.current = bytes.len();
        None
    }

    /// Skip the attribute value that follows an `=` ending just before `from`.
    ///
    /// Quoted values run to the matching quote and may contain `>` and `/`.
    /// Unquoted values run to whitespace or `>`. Returns `None` for a quote
    /// that is never closed.
    fn skip_attribute_value(&self, from: usize) -> Option<usize> {
        let bytes = self.source.as_bytes();
        let mut pos = from;
        while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }

        match bytes.get(pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                memchr(quote, &bytes[pos + 1..]).map(|end| pos + 1 + end + 1)
            }
            _ => {
                while bytes
                    .get(pos)
                    .is_some_and(|&c| !c.is_ascii_whitespace() && c != b'>')
                {
                    pos += 1;
                }
                Some(pos)
            }
        }
    }

    /// Advance to the end tag that closes a raw text element, or to the end
    /// of the document if there is none.
    fn skip_raw_text(&mut self, name: &str) {
        let bytes = self.source.as_bytes();
        let mut pos = self.current;

        while let Some(offset) = memchr(b'<', &bytes[pos..]) {
            let lt = pos + offset;
            let name_start = lt + 2;
            let name_end = name_start + name.len();
            if self.peek_at(lt + 1) == Some(b'/')
                && bytes
                    .get(name_start..name_end)
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()))
                && self.peek_at(name_end).is_none_or(is_name_terminator)
            {
                self.current = lt;
                return;
            }
            pos = lt + 1;
        }

        self.current = bytes.len();
    }

    /// Move past the first `delimiter` at or after `from`, or to the end of
    /// the document when there is none.
    fn consume_past(&mut self, from: usize, delimiter: &str) {
        self.current = match memmem::find(&self.source.as_bytes()[from..], delimiter.as_bytes()) {
            Some(found) => from + found + delimiter.len(),
            None => self.source.len(),
        };
    }

    fn scan_name(&self, from: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut end = from;
        while end < bytes.len() && !is_name_terminator(bytes[end]) {
            end += 1;
        }
        end
    }

    fn find_byte(&self, needle: u8) -> Option<usize> {
        let rest = self.source.as_bytes().get(self.current..)?;
        memchr(needle, rest).map(|offset| self.current + offset)
    }

    #[inline]
    fn peek_at(&self, index: usize) -> Option<u8> {
        self.source.as_bytes().get(index).copied()
    }

    fn position(&mut self, offset: usize) -> LineCol {
        self.cursor.line_col(ByteOffset::from_usize(offset))
    }
}

fn is_name_terminator(c: u8) -> bool {
    c.is_ascii_whitespace() || c == b'/' || c == b'>'
}

fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS
        .iter()
        .any(|element| element.eq_ignore_ascii_case(name))
}
