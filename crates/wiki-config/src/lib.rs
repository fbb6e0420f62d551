//! Configuration management for the wiki editor core.
//!
//! Parses `wiki.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `diagrams.plantuml_url` and `diagrams.plantuml_format` support:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wiki.toml";

/// Public `PlantUML` server.
pub const DEFAULT_PLANTUML_URL: &str = "https://www.plantuml.com/plantuml";

/// Image formats the `PlantUML` server is asked for.
const PLANTUML_FORMATS: &[&str] = &["svg", "png"];

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override `PlantUML` server URL.
    pub plantuml_url: Option<String>,
    /// Override `PlantUML` image format.
    pub plantuml_format: Option<String>,
    /// Override soft line break rendering.
    pub breaks: Option<bool>,
    /// Override extended markdown syntax.
    pub gfm: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markdown rendering options.
    pub renderer: RendererConfig,
    /// Diagram rendering options.
    pub diagrams: DiagramsConfig,
    /// Editor history options.
    pub history: HistoryConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markdown rendering configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Render soft line breaks as `<br>`.
    pub breaks: bool,
    /// Enable tables, strikethrough, task lists and footnotes.
    pub gfm: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            breaks: true,
            gfm: true,
        }
    }
}

/// Diagram rendering configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagramsConfig {
    /// `PlantUML` server base URL.
    pub plantuml_url: String,
    /// Image format (`svg` or `png`).
    pub plantuml_format: String,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            plantuml_url: DEFAULT_PLANTUML_URL.to_owned(),
            plantuml_format: "svg".to_owned(),
        }
    }
}

/// Editor history configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of retained snapshots.
    pub capacity: usize,
    /// Minimum time between two recorded snapshots, in milliseconds.
    pub debounce_ms: u64,
}

impl HistoryConfig {
    /// Debounce window as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            debounce_ms: 500,
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`diagrams.plantuml_url`").
        field: String,
        /// Error message (e.g., "${`PLANTUML_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wiki.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and validated together with
    /// the file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// Expands environment variables and validates, like [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(url) = &settings.plantuml_url {
            self.diagrams.plantuml_url.clone_from(url);
        }
        if let Some(format) = &settings.plantuml_format {
            self.diagrams.plantuml_format.clone_from(format);
        }
        if let Some(breaks) = settings.breaks {
            self.renderer.breaks = breaks;
        }
        if let Some(gfm) = settings.gfm {
            self.renderer.gfm = gfm;
        }
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_diagrams()?;
        self.validate_history()?;
        Ok(())
    }

    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.diagrams.plantuml_url, "diagrams.plantuml_url")?;
        require_http_url(&self.diagrams.plantuml_url, "diagrams.plantuml_url")?;

        if !PLANTUML_FORMATS.contains(&self.diagrams.plantuml_format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "diagrams.plantuml_format must be one of: {}",
                PLANTUML_FORMATS.join(", ")
            )));
        }
        Ok(())
    }

    fn validate_history(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::Validation(
                "history.capacity must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.diagrams.plantuml_url =
            expand::expand_env(&self.diagrams.plantuml_url, "diagrams.plantuml_url")?;
        self.diagrams.plantuml_format =
            expand::expand_env(&self.diagrams.plantuml_format, "diagrams.plantuml_format")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.renderer.breaks);
        assert!(config.renderer.gfm);
        assert_eq!(config.diagrams.plantuml_url, DEFAULT_PLANTUML_URL);
        assert_eq!(config.diagrams.plantuml_format, "svg");
        assert_eq!(config.history.capacity, 100);
        assert_eq!(config.history.debounce(), Duration::from_millis(500));
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.history.debounce_ms, 500);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[renderer]
breaks = false
gfm = false

[diagrams]
plantuml_url = "http://localhost:8080/plantuml"
plantuml_format = "png"

[history]
capacity = 20
debounce_ms = 0
"#;
        let config = Config::from_toml(toml).unwrap();
        assert!(!config.renderer.breaks);
        assert!(!config.renderer.gfm);
        assert_eq!(config.diagrams.plantuml_url, "http://localhost:8080/plantuml");
        assert_eq!(config.diagrams.plantuml_format, "png");
        assert_eq!(config.history.capacity, 20);
        assert_eq!(config.history.debounce(), Duration::ZERO);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = Config::from_toml("[history]\ncapacity = 5\n").unwrap();
        assert_eq!(config.history.capacity, 5);
        assert_eq!(config.history.debounce_ms, 500);
    }

    #[test]
    fn test_invalid_plantuml_url() {
        let err = Config::from_toml("[diagrams]\nplantuml_url = \"ftp://x\"\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("diagrams.plantuml_url"));
    }

    #[test]
    fn test_empty_plantuml_url() {
        let err = Config::from_toml("[diagrams]\nplantuml_url = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_invalid_plantuml_format() {
        let err = Config::from_toml("[diagrams]\nplantuml_format = \"gif\"\n").unwrap_err();
        assert!(err.to_string().contains("svg, png"));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Config::from_toml("[history]\ncapacity = 0\n").unwrap_err();
        assert!(err.to_string().contains("history.capacity"));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml("[history\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            plantuml_url: Some("https://uml.example".to_owned()),
            gfm: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.diagrams.plantuml_url, "https://uml.example");
        assert!(!config.renderer.gfm);
        assert!(config.renderer.breaks); // Unchanged
        assert_eq!(config.diagrams.plantuml_format, "svg"); // Unchanged
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wiki.toml");
        std::fs::write(&path, "[history]\ncapacity = 7\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.history.capacity, 7);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_validates_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wiki.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            plantuml_url: Some("not-a-url".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
