use htmlnest_source::LineCol;
use serde::Serialize;

/// A tag recognised by the [`Lexer`](crate::Lexer).
///
/// Names keep the case they were written in. `position` points at the `<`
/// that starts the tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TagEvent {
    Open { name: String, position: LineCol },
    Close { name: String, position: LineCol },
    SelfClose { name: String, position: LineCol },
}

impl TagEvent {
    pub fn open(name: impl Into<String>, position: LineCol) -> Self {
        Self::Open {
            name: name.into(),
            position,
        }
    }

    pub fn close(name: impl Into<String>, position: LineCol) -> Self {
        Self::Close {
            name: name.into(),
            position,
        }
    }

    pub fn self_close(name: impl Into<String>, position: LineCol) -> Self {
        Self::SelfClose {
            name: name.into(),
            position,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TagEvent::Open { name, .. }
            | TagEvent::Close { name, .. }
            | TagEvent::SelfClose { name, .. } => name,
        }
    }

    #[must_use]
    pub fn position(&self) -> LineCol {
        match self {
            TagEvent::Open { position, .. }
            | TagEvent::Close { position, .. }
            | TagEvent::SelfClose { position, .. } => *position,
        }
    }
}
