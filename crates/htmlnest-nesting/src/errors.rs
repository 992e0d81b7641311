use htmlnest_source::LineCol;
use serde::Serialize;
use thiserror::Error;

/// A structural defect found while verifying tag nesting.
///
/// The `Display` output is the exact report line for the defect.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NestingError {
    #[error("Unexpected closing </{tag}> at {position}")]
    UnexpectedClose { tag: String, position: LineCol },

    #[error(
        "Mismatched closing </{tag}> at {position}, expected </{expected}> from {expected_position}"
    )]
    Mismatch {
        tag: String,
        position: LineCol,
        expected: String,
        expected_position: LineCol,
    },

    #[error("Unclosed <{tag}> opened at {position}")]
    Unclosed { tag: String, position: LineCol },

    #[error("Self-closing non-void <{tag}/> at {position}")]
    SelfClosingNonVoid { tag: String, position: LineCol },
}

impl NestingError {
    /// Tag name as written at the primary position.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            NestingError::UnexpectedClose { tag, .. }
            | NestingError::Mismatch { tag, .. }
            | NestingError::Unclosed { tag, .. }
            | NestingError::SelfClosingNonVoid { tag, .. } => tag,
        }
    }

    #[must_use]
    pub fn position(&self) -> LineCol {
        match self {
            NestingError::UnexpectedClose { position, .. }
            | NestingError::Mismatch { position, .. }
            | NestingError::Unclosed { position, .. }
            | NestingError::SelfClosingNonVoid { position, .. } => *position,
        }
    }

    /// Get a diagnostic code string for this error type
    #[must_use]
    pub fn diagnostic_code(&self) -> &'static str {
        match self {
            NestingError::Unclosed { .. } => "N100",
            NestingError::Mismatch { .. } => "N101",
            NestingError::UnexpectedClose { .. } => "N102",
            NestingError::SelfClosingNonVoid { .. } => "N103",
        }
    }
}
