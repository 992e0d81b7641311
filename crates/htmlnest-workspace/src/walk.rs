use camino::Utf8Path;
use camino::Utf8PathBuf;
use htmlnest_conf::Settings;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;

/// Options controlling how [`walk_files`] traverses directories.
#[derive(Clone, Debug)]
pub struct WalkOptions {
    /// Include hidden files and directories (those starting with `.`).
    pub hidden: bool,
    /// Gitignore-style glob patterns. Prefix with `!` to exclude.
    pub globs: Vec<String>,
    /// Honour `.gitignore`, `.ignore` and friends.
    pub respect_ignore_files: bool,
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            hidden: true,
            globs: Vec::new(),
            respect_ignore_files: false,
            follow_links: false,
        }
    }
}

impl From<&Settings> for WalkOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            hidden: settings.hidden(),
            globs: settings.globs().to_vec(),
            respect_ignore_files: settings.respect_gitignore(),
            follow_links: settings.follow_links(),
        }
    }
}

/// Walk `paths` and collect the files accepted by `predicate`.
///
/// Files given directly are kept if they match; directories are walked
/// recursively. Returns a sorted, deduplicated list of canonical paths, so
/// callers get the same order on every run.
#[must_use]
pub fn walk_files(
    paths: &[Utf8PathBuf],
    predicate: impl Fn(&Utf8Path) -> bool,
    options: &WalkOptions,
) -> Vec<Utf8PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if predicate(path) {
                files.push(canonical(path).unwrap_or_else(|_| path.clone()));
            }
            continue;
        }

        if !path.is_dir() {
            tracing::warn!(%path, "skipping path that is neither a file nor a directory");
            continue;
        }

        let mut builder = WalkBuilder::new(path.as_std_path());
        // standard_filters first, it resets hidden and the ignore-file switches
        builder
            .standard_filters(options.respect_ignore_files)
            .hidden(!options.hidden)
            .follow_links(options.follow_links);

        if !options.globs.is_empty() {
            let mut overrides = OverrideBuilder::new(path.as_std_path());
            for glob in &options.globs {
                if let Err(err) = overrides.add(glob) {
                    tracing::warn!(%glob, %err, "ignoring invalid glob");
                }
            }
            match overrides.build() {
                Ok(built) => {
                    builder.overrides(built);
                }
                Err(err) => tracing::warn!(%err, "ignoring glob overrides"),
            }
        }

        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(%err, "error while walking {path}");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let Some(utf8) = Utf8Path::from_path(entry.path()) else {
                tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 path");
                continue;
            };
            if predicate(utf8) {
                files.push(canonical(utf8).unwrap_or_else(|_| utf8.to_owned()));
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

pub(crate) fn canonical(path: &Utf8Path) -> std::io::Result<Utf8PathBuf> {
    let canonical = dunce::canonicalize(path.as_std_path())?;
    Utf8PathBuf::from_path_buf(canonical)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidData, "non-UTF-8 path"))
}
