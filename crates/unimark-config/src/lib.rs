//! Configuration management for unimark.
//!
//! Parses `unimark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `client.base_url`
//! - `client.token`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use unimark_renderer::{DEFAULT_IMAGE_MODE, DEFAULT_LINK_TARGET, RenderOptions};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override table border styling.
    pub table_borders: Option<bool>,
    /// Override hard line breaks.
    pub hard_breaks: Option<bool>,
    /// Override API base URL.
    pub base_url: Option<String>,
    /// Override auth token.
    pub token: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "unimark.toml";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// HTTP client configuration.
    pub client: ClientConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Add inline border styles to tables.
    pub table_borders: bool,
    /// Render single line breaks as break elements.
    pub hard_breaks: bool,
    /// Image scaling mode attribute.
    pub image_mode: String,
    /// Link target attribute. An empty string omits the attribute.
    pub link_target: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            table_borders: true,
            hard_breaks: true,
            image_mode: DEFAULT_IMAGE_MODE.to_owned(),
            link_target: DEFAULT_LINK_TARGET.to_owned(),
        }
    }
}

impl RenderConfig {
    /// Link target, `None` when configured empty.
    #[must_use]
    pub fn link_target(&self) -> Option<&str> {
        (!self.link_target.is_empty()).then_some(self.link_target.as_str())
    }

    /// Renderer options for this section.
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            table_borders: self.table_borders,
            hard_breaks: self.hard_breaks,
            image_mode: self.image_mode.clone(),
            link_target: self.link_target().map(str::to_owned),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL that relative request URLs are joined onto.
    pub base_url: Option<String>,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
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
        /// Config field path (e.g., "`client.token`").
        field: String,
        /// Error message (e.g., "${`API_TOKEN`} environment variable not found").
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
    /// Otherwise, searches for `unimark.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(table_borders) = settings.table_borders {
            self.render.table_borders = table_borders;
        }
        if let Some(hard_breaks) = settings.hard_breaks {
            self.render.hard_breaks = hard_breaks;
        }
        if let Some(base_url) = &settings.base_url {
            self.client.base_url = Some(base_url.clone());
        }
        if let Some(token) = &settings.token {
            self.client.token = Some(token.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and expansion
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.image_mode, "render.image_mode")?;

        if let Some(ref base_url) = self.client.base_url {
            require_non_empty(base_url, "client.base_url")?;
            require_http_url(base_url, "client.base_url")?;
        }
        if self.client.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "client.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.client.base_url {
            self.client.base_url = Some(expand::expand_env(url, "client.base_url")?);
        }
        if let Some(ref token) = self.client.token {
            self.client.token = Some(expand::expand_env(token, "client.token")?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.render.table_borders);
        assert!(config.render.hard_breaks);
        assert_eq!(config.render.image_mode, "widthFix");
        assert_eq!(config.render.link_target(), Some("_blank"));
        assert_eq!(config.client.base_url, None);
        assert_eq!(config.client.timeout(), Duration::from_secs(30));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_default_render_options_match_renderer() {
        assert_eq!(RenderConfig::default().options(), RenderOptions::default());
    }

    #[test]
    fn test_render_options_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("unimark.toml");
        fs::write(
            &config_path,
            "[render]\ntable_borders = false\nimage_mode = \"aspectFit\"\nlink_target = \"\"\n",
        )
        .unwrap();

        let options = Config::load(Some(config_path.as_path()), None)
            .unwrap()
            .render
            .options();
        assert!(!options.table_borders);
        assert!(options.hard_breaks);
        assert_eq!(options.image_mode, "aspectFit");
        assert_eq!(options.link_target, None);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.render.table_borders);
        assert_eq!(config.client.timeout_secs, 30);
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
table_borders = false
image_mode = "aspectFit"
link_target = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.render.table_borders);
        assert!(config.render.hard_breaks);
        assert_eq!(config.render.image_mode, "aspectFit");
        assert_eq!(config.render.link_target(), None);
    }

    #[test]
    fn test_parse_client_config() {
        let toml = r#"
[client]
base_url = "https://api.example.com"
token = "secret"
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.client.base_url.as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(config.client.token.as_deref(), Some("secret"));
        assert_eq!(config.client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[render]\nhard_breaks = false\n").unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();
        assert!(!config.render.hard_breaks);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[render\n").unwrap();

        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(nested.join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let settings = CliSettings {
            table_borders: Some(false),
            hard_breaks: Some(false),
            base_url: Some("http://localhost:8080".to_owned()),
            token: Some("cli-token".to_owned()),
        };

        config.apply_cli_settings(&settings);

        assert!(!config.render.table_borders);
        assert!(!config.render.hard_breaks);
        assert_eq!(
            config.client.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(config.client.token.as_deref(), Some("cli-token"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert!(config.render.table_borders);
        assert_eq!(config.client.base_url, None);
    }

    #[test]
    fn test_load_rejects_invalid_cli_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "").unwrap();
        let settings = CliSettings {
            base_url: Some("ftp://example.com".to_owned()),
            ..CliSettings::default()
        };

        let err = Config::load(Some(path.as_path()), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_expand_env_vars_client() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_UNIMARK_URL", "https://api.test.com");
            std::env::set_var("TEST_UNIMARK_TOKEN", "my-token");
        }

        let toml = r#"
[client]
base_url = "${TEST_UNIMARK_URL}"
token = "${TEST_UNIMARK_TOKEN}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.client.base_url.as_deref(), Some("https://api.test.com"));
        assert_eq!(config.client.token.as_deref(), Some("my-token"));

        unsafe {
            std::env::remove_var("TEST_UNIMARK_URL");
            std::env::remove_var("TEST_UNIMARK_TOKEN");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_UNIMARK_TEST");
        }

        let toml = r#"
[client]
token = "${MISSING_VAR_UNIMARK_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_UNIMARK_TEST"));
        assert!(err.to_string().contains("client.token"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_base_url_invalid_scheme() {
        let mut config = Config::default();
        config.client.base_url = Some("api.example.com".to_owned());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("client.base_url"));
    }

    #[test]
    fn test_validate_base_url_empty() {
        let mut config = Config::default();
        config.client.base_url = Some(String::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_timeout_zero() {
        let mut config = Config::default();
        config.client.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("client.timeout_secs"));
    }

    #[test]
    fn test_validate_image_mode_empty() {
        let mut config = Config::default();
        config.render.image_mode = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render.image_mode"));
    }
}
