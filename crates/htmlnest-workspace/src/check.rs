use camino::Utf8Path;
use camino::Utf8PathBuf;
use htmlnest_nesting::NestingError;
use htmlnest_nesting::VerifyOptions;
use htmlnest_source::LineCol;
use htmlnest_source::SourceText;
use rayon::prelude::*;
use thiserror::Error;

/// One line of a file's report.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Defect {
    #[error(transparent)]
    Nesting(#[from] NestingError),

    /// The file is not valid UTF-8. Always the only defect for its file.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The file could not be read.
    #[error("Read error: {0}")]
    Read(String),
}

impl Defect {
    #[must_use]
    pub fn diagnostic_code(&self) -> &'static str {
        match self {
            Defect::Nesting(err) => err.diagnostic_code(),
            Defect::Parse(_) => "N900",
            Defect::Read(_) => "N901",
        }
    }

    #[must_use]
    pub fn position(&self) -> Option<LineCol> {
        match self {
            Defect::Nesting(err) => Some(err.position()),
            Defect::Parse(_) | Defect::Read(_) => None,
        }
    }
}

/// Everything found in one file, in report order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    path: Utf8PathBuf,
    defects: Vec<Defect>,
}

impl FileReport {
    #[must_use]
    pub fn new(path: &Utf8Path, defects: Vec<Defect>) -> Self {
        Self {
            path: path.to_owned(),
            defects,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    #[must_use]
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    #[must_use]
    pub fn has_defects(&self) -> bool {
        !self.defects.is_empty()
    }

    /// The path relative to `root` when it lives under it, otherwise as stored.
    #[must_use]
    pub fn display_path(&self, root: &Utf8Path) -> &str {
        self.path
            .strip_prefix(root)
            .map_or(self.path.as_str(), Utf8Path::as_str)
    }
}

/// Read and check a single file. Never fails: read and decode problems
/// become the file's only defect.
#[must_use]
pub fn check_file(path: &Utf8Path, options: &VerifyOptions) -> FileReport {
    match std::fs::read(path) {
        Ok(bytes) => check_bytes(path, bytes, options),
        Err(err) => {
            tracing::warn!(%path, %err, "failed to read file");
            FileReport::new(path, vec![Defect::Read(err.to_string())])
        }
    }
}

#[must_use]
pub fn check_bytes(path: &Utf8Path, bytes: Vec<u8>, options: &VerifyOptions) -> FileReport {
    let source = match SourceText::decode(path, bytes) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(%path, %err, "failed to decode file");
            return FileReport::new(path, vec![Defect::Parse(err.to_string())]);
        }
    };

    let defects: Vec<Defect> = htmlnest_nesting::check_source(source.as_str(), options)
        .into_iter()
        .map(Defect::Nesting)
        .collect();

    tracing::debug!(%path, defects = defects.len(), "checked file");
    FileReport::new(source.path(), defects)
}

/// Check `files` in parallel. The returned reports are sorted by path.
#[must_use]
pub fn check_files(files: &[Utf8PathBuf], options: &VerifyOptions) -> Vec<FileReport> {
    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| check_file(path, options))
        .collect();
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    reports
}
