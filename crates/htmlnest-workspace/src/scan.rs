use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use htmlnest_conf::Settings;
use htmlnest_nesting::VerifyOptions;

use crate::check::check_files;
use crate::render::render_json;
use crate::render::render_text;
use crate::render::Summary;
use crate::walk::walk_files;
use crate::walk::WalkOptions;

/// Collect the files selected by `settings` under `paths`, sorted.
#[must_use]
pub fn discover_files(paths: &[Utf8PathBuf], settings: &Settings) -> Vec<Utf8PathBuf> {
    walk_files(
        paths,
        |path| settings.is_selected(path),
        &WalkOptions::from(settings),
    )
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Check every selected file under `root` and write the text report to `out`.
///
/// Returns the totals; the run had errors unless [`Summary::is_clean`].
pub fn scan(root: &Utf8Path, settings: &Settings, out: &mut impl Write) -> Result<Summary> {
    scan_paths(root, &[root.to_owned()], settings, ReportFormat::Text, out)
}

/// Like [`scan`], for explicit files or directories. Report paths are shown
/// relative to `root` when they are under it.
pub fn scan_paths(
    root: &Utf8Path,
    paths: &[Utf8PathBuf],
    settings: &Settings,
    format: ReportFormat,
    out: &mut impl Write,
) -> Result<Summary> {
    let root = crate::walk::canonical(root)
        .with_context(|| format!("Failed to resolve root directory {root}"))?;

    let files = discover_files(paths, settings);
    tracing::info!(%root, files = files.len(), "discovered files");

    let options = VerifyOptions {
        strict_self_closing: settings.strict_self_closing(),
    };
    let reports = check_files(&files, &options);

    let summary = match format {
        ReportFormat::Text => render_text(out, &root, &reports),
        ReportFormat::Json => render_json(out, &root, &reports),
    }
    .context("Failed to write report")?;
    tracing::info!(
        files = summary.files_checked,
        errors = summary.errors,
        "scan finished"
    );
    Ok(summary)
}
