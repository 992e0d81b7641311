use std::fmt;
use std::io;
use std::io::Write;

use camino::Utf8Path;
use htmlnest_source::LineCol;
use serde::Serialize;

use crate::check::Defect;
use crate::check::FileReport;

pub const CLEAN_MESSAGE: &str = "No unclosed/mismatched tags found.";

/// Totals over a set of reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub files_checked: usize,
    pub files_with_errors: usize,
    pub errors: usize,
}

impl Summary {
    #[must_use]
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Summary {
            files_checked: reports.len(),
            ..Summary::default()
        };
        for report in reports.iter().filter(|report| report.has_defects()) {
            summary.files_with_errors += 1;
            summary.errors += report.defects().len();
        }
        summary
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error_word = if self.errors == 1 { "error" } else { "errors" };
        let file_word = if self.files_with_errors == 1 {
            "file"
        } else {
            "files"
        };
        write!(
            f,
            "Found {} {error_word} in {} {file_word}.",
            self.errors, self.files_with_errors
        )
    }
}

/// Write the plain-text report: one block per file with defects, or the
/// clean message when there are none.
pub fn render_text(
    out: &mut impl Write,
    root: &Utf8Path,
    reports: &[FileReport],
) -> io::Result<Summary> {
    let summary = Summary::from_reports(reports);

    for report in reports.iter().filter(|report| report.has_defects()) {
        writeln!(out, "--- {} ---", report.display_path(root))?;
        for defect in report.defects() {
            writeln!(out, "{defect}")?;
        }
        writeln!(out)?;
    }

    if summary.is_clean() {
        writeln!(out, "{CLEAN_MESSAGE}")?;
    }

    Ok(summary)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    path: &'a str,
    errors: Vec<JsonDefect<'a>>,
}

#[derive(Serialize)]
struct JsonDefect<'a> {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<LineCol>,
}

impl<'a> From<&'a Defect> for JsonDefect<'a> {
    fn from(defect: &'a Defect) -> Self {
        let tag = match defect {
            Defect::Nesting(err) => Some(err.tag()),
            Defect::Parse(_) | Defect::Read(_) => None,
        };
        Self {
            code: defect.diagnostic_code(),
            message: defect.to_string(),
            tag,
            position: defect.position(),
        }
    }
}

/// Write the reports with defects as a JSON array.
pub fn render_json(
    out: &mut impl Write,
    root: &Utf8Path,
    reports: &[FileReport],
) -> io::Result<Summary> {
    let json: Vec<JsonReport> = reports
        .iter()
        .filter(|report| report.has_defects())
        .map(|report| JsonReport {
            path: report.display_path(root),
            errors: report.defects().iter().map(JsonDefect::from).collect(),
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;

    Ok(Summary::from_reports(reports))
}
