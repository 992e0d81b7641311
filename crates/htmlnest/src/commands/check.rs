use std::io::Read as _;
use std::io::Write as _;

use anyhow::Context;
use anyhow::Result;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use clap::Parser;
use clap::ValueEnum;
use htmlnest_conf::Settings;
use htmlnest_nesting::VerifyOptions;
use htmlnest_workspace::check_bytes;
use htmlnest_workspace::render_json;
use htmlnest_workspace::render_text;
use htmlnest_workspace::scan_paths;
use htmlnest_workspace::ReportFormat;
use htmlnest_workspace::Summary;

use crate::args::Args;
use crate::commands::Command;
use crate::exit::Exit;

const STDIN_PATH: &str = "<stdin>";

#[derive(Debug, Parser)]
pub struct Check {
    /// Files or directories to check. Defaults to the current directory.
    paths: Vec<Utf8PathBuf>,

    /// File extension to check, without the dot. May be repeated.
    #[arg(long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Gitignore-style glob to include, or to exclude with a leading `!`.
    #[arg(long = "glob", value_name = "GLOB")]
    globs: Vec<String>,

    /// Include hidden files and directories.
    #[arg(long, overrides_with = "no_hidden")]
    hidden: bool,

    /// Skip hidden files and directories.
    #[arg(long, overrides_with = "hidden")]
    no_hidden: bool,

    /// Skip files excluded by `.gitignore` and `.ignore`.
    #[arg(long)]
    respect_gitignore: bool,

    /// Follow symbolic links while walking directories.
    #[arg(long)]
    follow_links: bool,

    /// Report self-closing notation on elements that are not void.
    #[arg(long)]
    strict_self_closing: bool,

    /// Check a single document read from standard input.
    #[arg(long, conflicts_with = "paths")]
    stdin: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl Command for Check {
    fn execute(&self, _args: &Args) -> Result<Exit> {
        let project_root = resolve_project_root()?;
        tracing::debug!(%project_root, stdin = self.stdin, "running check");
        let settings = self.apply_overrides(
            Settings::new(&project_root).context("Failed to load settings")?,
        );

        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        let summary = if self.stdin {
            self.check_stdin(&project_root, &settings, &mut out)?
        } else {
            let paths = self.resolve_paths(&project_root);
            scan_paths(
                &project_root,
                &paths,
                &settings,
                self.output_format.into(),
                &mut out,
            )?
        };
        out.flush().context("Failed to flush stdout")?;

        if summary.is_clean() {
            Ok(Exit::success())
        } else {
            Ok(Exit::error().with_message(summary.to_string()))
        }
    }
}

impl Check {
    fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if !self.extensions.is_empty() {
            settings = settings.with_extensions(self.extensions.clone());
        }
        if self.hidden {
            settings = settings.with_hidden(true);
        }
        if self.no_hidden {
            settings = settings.with_hidden(false);
        }
        if self.respect_gitignore {
            settings = settings.with_respect_gitignore(true);
        }
        if self.follow_links {
            settings = settings.with_follow_links(true);
        }
        if self.strict_self_closing {
            settings = settings.with_strict_self_closing(true);
        }
        settings.with_globs(self.globs.clone())
    }

    fn resolve_paths(&self, project_root: &Utf8Path) -> Vec<Utf8PathBuf> {
        if self.paths.is_empty() {
            return vec![project_root.to_owned()];
        }
        self.paths
            .iter()
            .map(|p| {
                if p.is_relative() {
                    project_root.join(p)
                } else {
                    p.clone()
                }
            })
            .collect()
    }

    fn check_stdin(
        &self,
        project_root: &Utf8Path,
        settings: &Settings,
        out: &mut impl std::io::Write,
    ) -> Result<Summary> {
        let mut source = Vec::new();
        std::io::stdin()
            .read_to_end(&mut source)
            .context("Failed to read stdin")?;

        let options = VerifyOptions {
            strict_self_closing: settings.strict_self_closing(),
        };
        let report = check_bytes(Utf8Path::new(STDIN_PATH), source, &options);
        let reports = [report];

        let summary = match self.output_format {
            OutputFormat::Text => render_text(out, project_root, &reports),
            OutputFormat::Json => render_json(out, project_root, &reports),
        }
        .context("Failed to write report")?;
        Ok(summary)
    }
}

fn resolve_project_root() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|_| anyhow::anyhow!("Current directory is not valid UTF-8"))
}
