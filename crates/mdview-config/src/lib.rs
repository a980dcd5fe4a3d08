//! Configuration management for mdview.
//!
//! Parses `mdview.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override table of contents generation.
    pub table_of_contents: Option<bool>,
    /// Override code highlighting.
    pub highlight: Option<bool>,
    /// Override document title.
    pub title: Option<String>,
    /// Override document language.
    pub lang: Option<String>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "mdview.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion pipeline configuration.
    pub render: RenderConfig,
    /// Standalone document configuration.
    pub document: DocumentConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Conversion pipeline configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Insert a table of contents before the first heading.
    pub table_of_contents: bool,
    /// Highlight fenced code blocks.
    pub highlight: bool,
    /// Largest accepted input in bytes.
    pub max_input_bytes: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            table_of_contents: true,
            highlight: true,
            max_input_bytes: 4 * 1024 * 1024,
        }
    }
}

/// Standalone document configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Document title.
    pub title: String,
    /// Value of the `lang` attribute.
    pub lang: String,
    /// `strftime` format of the generation timestamp.
    pub timestamp_format: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Markdown Document".to_owned(),
            lang: "en".to_owned(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_owned(),
        }
    }
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
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdview.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and take precedence over
    /// config file values. The result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Search for a config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(table_of_contents) = settings.table_of_contents {
            self.render.table_of_contents = table_of_contents;
        }
        if let Some(highlight) = settings.highlight {
            self.render.highlight = highlight;
        }
        if let Some(title) = &settings.title {
            self.document.title.clone_from(title);
        }
        if let Some(lang) = &settings.lang {
            self.document.lang.clone_from(lang);
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.max_input_bytes == 0 {
            return Err(ConfigError::Validation(
                "render.max_input_bytes must be greater than 0".to_owned(),
            ));
        }
        require_non_empty(&self.document.title, "document.title")?;
        require_non_empty(&self.document.lang, "document.lang")?;
        require_non_empty(&self.document.timestamp_format, "document.timestamp_format")?;
        Ok(())
    }
}
