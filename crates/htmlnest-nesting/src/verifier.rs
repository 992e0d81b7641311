use htmlnest_markup::TagEvent;
use htmlnest_source::LineCol;

use crate::is_void;
use crate::NestingError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Report self-closing notation on elements that are not void.
    pub strict_self_closing: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OpenFrame {
    name: String,
    position: LineCol,
}

/// Stack-based nesting check, driven one [`TagEvent`] at a time.
///
/// The stack always holds the currently open non-void elements, outermost
/// first. A closing tag resolves exactly one frame, even when the names do
/// not match; no deeper search is attempted.
#[derive(Clone, Debug, Default)]
pub struct Verifier {
    options: VerifyOptions,
    stack: Vec<OpenFrame>,
    errors: Vec<NestingError>,
}

impl Verifier {
    #[must_use]
    pub fn new(options: VerifyOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn step(mut self, event: TagEvent) -> Self {
        match event {
            TagEvent::Open { name, position } => {
                if !is_void(&name) {
                    self.stack.push(OpenFrame { name, position });
                }
            }
            TagEvent::SelfClose { name, position } => {
                if self.options.strict_self_closing && !is_void(&name) {
                    self.errors
                        .push(NestingError::SelfClosingNonVoid { tag: name, position });
                }
            }
            TagEvent::Close { name, position } => self.handle_close(name, position),
        }
        self
    }

    fn handle_close(&mut self, name: String, position: LineCol) {
        let Some(frame) = self.stack.pop() else {
            self.errors
                .push(NestingError::UnexpectedClose { tag: name, position });
            return;
        };

        if !frame.name.eq_ignore_ascii_case(&name) {
            self.errors.push(NestingError::Mismatch {
                tag: name,
                position,
                expected: frame.name,
                expected_position: frame.position,
            });
        }
    }

    /// Number of elements currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// End of stream: drain what is still open, outermost first.
    #[must_use]
    pub fn finish(mut self) -> Vec<NestingError> {
        self.errors
            .extend(self.stack.drain(..).map(|frame| NestingError::Unclosed {
                tag: frame.name,
                position: frame.position,
            }));
        self.errors
    }
}

/// Verify a complete event stream with default options.
pub fn verify(events: impl IntoIterator<Item = TagEvent>) -> Vec<NestingError> {
    verify_with(events, &VerifyOptions::default())
}

pub fn verify_with(
    events: impl IntoIterator<Item = TagEvent>,
    options: &VerifyOptions,
) -> Vec<NestingError> {
    events
        .into_iter()
        .fold(Verifier::new(*options), Verifier::step)
        .finish()
}
