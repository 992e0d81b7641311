use camino::Utf8Path;
use camino::Utf8PathBuf;
use config::Config;
use config::ConfigError as ExternalConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "htmlnest.toml";
pub const HIDDEN_CONFIG_FILE_NAME: &str = ".htmlnest.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration build/deserialize error")]
    Config(#[from] ExternalConfigError),
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// File extensions selected for checking, without the leading dot.
    extensions: Vec<String>,
    /// Gitignore-style globs applied during discovery. Prefix with `!` to exclude.
    globs: Vec<String>,
    hidden: bool,
    respect_gitignore: bool,
    follow_links: bool,
    strict_self_closing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extensions: vec!["html".to_string()],
            globs: Vec::new(),
            hidden: true,
            respect_gitignore: false,
            follow_links: false,
            strict_self_closing: false,
        }
    }
}

impl Settings {
    pub fn new(project_root: &Utf8Path) -> Result<Self, ConfigError> {
        let user_config_file = ProjectDirs::from("com.github", "htmlnest", "htmlnest")
            .and_then(|proj_dirs| {
                Utf8PathBuf::from_path_buf(proj_dirs.config_dir().join(CONFIG_FILE_NAME)).ok()
            });

        Self::load_from_paths(project_root, user_config_file.as_deref())
    }

    fn load_from_paths(
        project_root: &Utf8Path,
        user_config_path: Option<&Utf8Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = user_config_path {
            builder = builder.add_source(
                File::from(path.as_std_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            File::from(project_root.join(HIDDEN_CONFIG_FILE_NAME).as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        builder = builder.add_source(
            File::from(project_root.join(CONFIG_FILE_NAME).as_std_path())
                .format(FileFormat::Toml)
                .required(false),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(?settings, %project_root, "loaded settings");
        Ok(settings)
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    #[must_use]
    pub fn globs(&self) -> &[String] {
        &self.globs
    }

    #[must_use]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub fn strict_self_closing(&self) -> bool {
        self.strict_self_closing
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
        self
    }

    #[must_use]
    pub fn with_globs(mut self, globs: Vec<String>) -> Self {
        self.globs.extend(globs);
        self
    }

    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn with_respect_gitignore(mut self, respect_gitignore: bool) -> Self {
        self.respect_gitignore = respect_gitignore;
        self
    }

    #[must_use]
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    #[must_use]
    pub fn with_strict_self_closing(mut self, strict_self_closing: bool) -> Self {
        self.strict_self_closing = strict_self_closing;
        self
    }

    /// Whether `path` has one of the selected extensions. Matching is case-sensitive.
    #[must_use]
    pub fn is_selected(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.extensions.iter().any(|selected| selected == ext))
    }
}
