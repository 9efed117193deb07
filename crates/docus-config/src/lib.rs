//! Configuration management for Docus.
//!
//! Parses `docus.toml` project files with serde and provides auto-discovery
//! of the config file in parent directories.
//!
//! ```toml
//! title = "My Project"
//! src_dir = "src"
//! chapters = ["index.md", { Guide = ["guide/intro.md", "guide/usage.md"] }]
//!
//! [docus]
//! cache_dir = ".cache"
//! slug = "my-project"
//!
//! [docus.site]
//! tagline = "Docs for my project"
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `title`
//! - `docus.slug`
//! - `docus.scaffold_command`
//! - `docus.build_command`

mod expand;

use std::path::{Component, Path, PathBuf};

use docus_chapters::Chapter;
use serde::Deserialize;
use serde_json::{Map, Value};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override project title.
    pub title: Option<String>,
    /// Override source directory.
    pub source_dir: Option<PathBuf>,
    /// Override scaffold cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Override output directory for artifacts.
    pub output_dir: Option<PathBuf>,
    /// Override artifact slug.
    pub slug: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docus.toml";

/// Title used when the config doesn't set one.
pub const DEFAULT_TITLE: &str = "main";

/// Project configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project title, used for the implicit sidebar and the site title.
    pub title: String,
    /// Chapter tree. Required by every build command.
    pub chapters: Option<Chapter>,
    /// Source directory (relative string from TOML).
    src_dir: Option<String>,
    /// Docusaurus backend options.
    pub docus: DocusConfig,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Docusaurus backend options (`[docus]` section).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocusConfig {
    /// Scaffold cache directory (relative string from TOML).
    cache_dir: Option<String>,
    /// Artifact output directory (relative string from TOML).
    output_dir: Option<String>,
    /// Artifact name stem. Defaults to the slugified title.
    pub slug: Option<String>,
    /// Scaffolding generator command line.
    pub scaffold_command: String,
    /// Site build command line.
    pub build_command: String,
    /// Pass-through options written to `siteConf.json`.
    pub site: Map<String, Value>,
}

impl Default for DocusConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            output_dir: None,
            slug: None,
            scaffold_command: "docusaurus-init".to_owned(),
            build_command: "docusaurus-build".to_owned(),
            site: Map::new(),
        }
    }
}

/// Resolved absolute paths.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Directory containing the config file.
    pub project_dir: PathBuf,
    /// Source directory for documents.
    pub source_dir: PathBuf,
    /// Scaffold cache directory.
    pub cache_dir: PathBuf,
    /// Directory where artifacts are written.
    pub output_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docus.build_command`").
        field: String,
        /// Error message (e.g., "${`BUILD_CMD`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Lexically normalize `path`, dropping `.` and folding `..`.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docus.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(title) = &settings.title {
            self.title.clone_from(title);
        }
        if let Some(source_dir) = &settings.source_dir {
            self.paths.source_dir.clone_from(source_dir);
        }
        if let Some(cache_dir) = &settings.cache_dir {
            self.paths.cache_dir.clone_from(cache_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths.output_dir.clone_from(output_dir);
        }
        if let Some(slug) = &settings.slug {
            self.docus.slug = Some(slug.clone());
        }
    }

    /// Get the chapter tree.
    ///
    /// Use this instead of accessing the `chapters` field directly when the
    /// command builds something.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `chapters` is not set.
    pub fn require_chapters(&self) -> Result<&Chapter, ConfigError> {
        self.chapters
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("chapters must be set in config".into()))
    }

    /// Artifact name stem: `docus.slug`, or the slugified title.
    #[must_use]
    pub fn slug(&self) -> String {
        self.docus
            .slug
            .clone()
            .unwrap_or_else(|| slugify(&self.title))
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            title: DEFAULT_TITLE.to_owned(),
            chapters: None,
            src_dir: None,
            docus: DocusConfig::default(),
            paths: PathsConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "title")?;
        if let Some(slug) = &self.docus.slug {
            require_non_empty(slug, "docus.slug")?;
            if slug.contains(['/', '\\']) {
                return Err(ConfigError::Validation(
                    "docus.slug cannot contain path separators".to_owned(),
                ));
            }
        }
        require_non_empty(&self.docus.scaffold_command, "docus.scaffold_command")?;
        require_non_empty(&self.docus.build_command, "docus.build_command")?;
        // Artifacts are copied out of the cache and would end up copying themselves.
        if normalize(&self.paths.output_dir).starts_with(normalize(&self.paths.cache_dir)) {
            return Err(ConfigError::Validation(
                "docus.output_dir cannot be inside docus.cache_dir".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.title = expand::expand_env(&self.title, "title")?;
        if let Some(ref slug) = self.docus.slug {
            self.docus.slug = Some(expand::expand_env(slug, "docus.slug")?);
        }
        self.docus.scaffold_command =
            expand::expand_env(&self.docus.scaffold_command, "docus.scaffold_command")?;
        self.docus.build_command =
            expand::expand_env(&self.docus.build_command, "docus.build_command")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.paths = PathsConfig {
            project_dir: config_dir.to_path_buf(),
            source_dir: resolve(self.src_dir.as_deref(), "src"),
            cache_dir: resolve(self.docus.cache_dir.as_deref(), ".cache"),
            output_dir: self
                .docus
                .output_dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |dir| config_dir.join(dir)),
        };
    }
}

/// Lowercase `title`, keeping alphanumerics and joining the rest with `-`.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        DEFAULT_TITLE.to_owned()
    } else {
        slug
    }
}
