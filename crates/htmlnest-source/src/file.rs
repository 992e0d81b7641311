use std::ops::Deref;
use std::sync::Arc;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("stream did not contain valid UTF-8 (invalid byte at offset {valid_up_to})")]
pub struct DecodeError {
    pub path: Utf8PathBuf,
    pub valid_up_to: usize,
}

/// Decoded contents of one document.
#[derive(Debug, Clone)]
pub struct SourceText(Arc<SourceTextInner>);

#[derive(Debug)]
struct SourceTextInner {
    path: Utf8PathBuf,
    source: String,
}

impl SourceText {
    #[must_use]
    pub fn new(path: &Utf8Path, source: String) -> Self {
        Self(Arc::new(SourceTextInner {
            path: path.to_owned(),
            source,
        }))
    }

    /// Decode raw file bytes as UTF-8. A leading byte order mark is dropped.
    pub fn decode(path: &Utf8Path, bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let mut source = String::from_utf8(bytes).map_err(|err| DecodeError {
            path: path.to_owned(),
            valid_up_to: err.utf8_error().valid_up_to(),
        })?;
        if source.starts_with('\u{feff}') {
            source.drain(..'\u{feff}'.len_utf8());
        }
        Ok(Self::new(path, source))
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.0.path
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0.source
    }
}

impl AsRef<str> for SourceText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for SourceText {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}
