//! Configuration module for savesync.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for savesync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Remote store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Name of the remote root folder holding one entry per item.
    pub root_folder: String,
    /// Directory the remote store is mounted at.
    pub store_path: PathBuf,
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Write into the user-selected external storage instead of the internal one.
    pub use_external: bool,
    /// Root of the external storage. Required when `use_external` is set.
    pub external_path: Option<PathBuf>,
    /// Internal item data directory. Its parent is the internal destination
    /// root and its final component names the mirror folder.
    pub game_data_dir: PathBuf,
}

/// Item catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the YAML catalog file.
    pub path: PathBuf,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    ///
    /// Only for settings read before errors can be reported (log level).
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Load from `path`, or use [`Config::default`] when no file exists there.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_if_present(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/savesync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("savesync")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("savesync")
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            root_folder: "Mupen64Plus AE".to_string(),
            store_path: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Remote"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            use_external: false,
            external_path: None,
            game_data_dir: data_dir().join("GameData"),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: data_dir().join("catalog.yaml"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"remote.root_folder"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- remote ---
        if self.remote.root_folder.trim().is_empty() {
            errors.push(ValidationError {
                field: "remote.root_folder".into(),
                message: "must not be empty".into(),
            });
        }

        // --- storage ---
        if self.storage.game_data_dir.file_name().is_none() {
            errors.push(ValidationError {
                field: "storage.game_data_dir".into(),
                message: format!(
                    "must end in a folder name: {}",
                    self.storage.game_data_dir.display()
                ),
            });
        }
        let external_missing = self
            .storage
            .external_path
            .as_ref()
            .map_or(true, |p| p.as_os_str().is_empty());
        if self.storage.use_external && external_missing {
            errors.push(ValidationError {
                field: "storage.external_path".into(),
                message: "required when storage.use_external is true".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and lets callers override individual fields.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pre-populated with default values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- remote ---

    pub fn remote_root_folder(mut self, name: impl Into<String>) -> Self {
        self.config.remote.root_folder = name.into();
        self
    }

    pub fn remote_store_path(mut self, path: PathBuf) -> Self {
        self.config.remote.store_path = path;
        self
    }

    // --- storage ---

    pub fn storage_use_external(mut self, use_external: bool) -> Self {
        self.config.storage.use_external = use_external;
        self
    }

    pub fn storage_external_path(mut self, path: PathBuf) -> Self {
        self.config.storage.external_path = Some(path);
        self
    }

    pub fn storage_game_data_dir(mut self, path: PathBuf) -> Self {
        self.config.storage.game_data_dir = path;
        self
    }

    // --- catalog ---

    pub fn catalog_path(mut self, path: PathBuf) -> Self {
        self.config.catalog.path = path;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    // -- Defaults --

    #[test]
    fn default_config_has_sensible_values() {
        let cfg = Config::default();
        assert_eq!(cfg.remote.root_folder, "Mupen64Plus AE");
        assert!(!cfg.storage.use_external);
        assert!(cfg.storage.external_path.is_none());
        assert!(cfg.storage.game_data_dir.ends_with("GameData"));
        assert!(cfg.catalog.path.ends_with("catalog.yaml"));
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.storage.use_external);
    }

    #[test]
    fn default_config_passes_validation() {
        let errors = Config::default().validate();
        assert!(errors.is_empty(), "unexpected validation errors: {errors:?}");
    }

    // -- Loading --

    #[test]
    fn load_from_yaml_file() {
        let yaml = r#"
remote:
  root_folder: "My Saves"
  store_path: /mnt/remote
storage:
  use_external: true
  external_path: /media/sdcard
  game_data_dir: /data/app/GameData
catalog:
  path: /data/app/catalog.yaml
logging:
  level: debug
"#;
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(yaml.as_bytes()).unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).expect("load config");
        assert_eq!(cfg.remote.root_folder, "My Saves");
        assert_eq!(cfg.remote.store_path, PathBuf::from("/mnt/remote"));
        assert!(cfg.storage.use_external);
        assert_eq!(
            cfg.storage.external_path,
            Some(PathBuf::from("/media/sdcard"))
        );
        assert_eq!(cfg.storage.game_data_dir, PathBuf::from("/data/app/GameData"));
        assert_eq!(cfg.catalog.path, PathBuf::from("/data/app/catalog.yaml"));
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.storage.use_external);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(b"logging:\n  level: warn\n").unwrap();
        tmp.flush().unwrap();

        let cfg = Config::load(tmp.path()).expect("load config");
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.remote.root_folder, "Mupen64Plus AE");
    }

    #[test]
    fn load_or_default_returns_default_on_missing_file() {
        let cfg = Config::load_or_default(Path::new("/nonexistent/savesync.yaml"));
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn load_if_present_defaults_only_for_missing_file() {
        let cfg = Config::load_if_present(Path::new("/nonexistent/savesync.yaml")).unwrap();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.remote.root_folder, "Mupen64Plus AE");

        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(b"remote: [").unwrap();
        tmp.flush().unwrap();
        let err = Config::load_if_present(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }

    #[test]
    fn load_returns_error_on_invalid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        tmp.write_all(b"remote: [not, a, map").unwrap();
        tmp.flush().unwrap();
        assert!(Config::load(tmp.path()).is_err());
    }

    // -- Validation --

    #[test]
    fn validate_catches_empty_root_folder() {
        let cfg = ConfigBuilder::new().remote_root_folder("  ").build();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "remote.root_folder"));
    }

    #[test]
    fn validate_catches_game_data_dir_without_name() {
        let cfg = ConfigBuilder::new()
            .storage_game_data_dir(PathBuf::from("/"))
            .build();
        assert!(cfg
            .validate()
            .iter()
            .any(|e| e.field == "storage.game_data_dir"));
    }

    #[test]
    fn validate_requires_external_path_in_external_mode() {
        let cfg = ConfigBuilder::new().storage_use_external(true).build();
        assert!(cfg
            .validate()
            .iter()
            .any(|e| e.field == "storage.external_path"));

        let cfg = ConfigBuilder::new()
            .storage_use_external(true)
            .storage_external_path(PathBuf::from("/media/sd"))
            .build();
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validate_catches_invalid_log_level() {
        let cfg = ConfigBuilder::new().logging_level("verbose").build();
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "logging.level");
        assert!(errors[0].to_string().contains("verbose"));
    }

    #[test]
    fn validate_accepts_all_valid_log_levels() {
        for level in VALID_LOG_LEVELS {
            let cfg = ConfigBuilder::new().logging_level(*level).build();
            assert!(cfg.validate().is_empty(), "level {level} should be valid");
        }
    }

    // -- Builder --

    #[test]
    fn builder_overrides_fields() {
        let cfg = ConfigBuilder::new()
            .remote_root_folder("Saves")
            .remote_store_path(PathBuf::from("/mnt/r"))
            .catalog_path(PathBuf::from("/tmp/c.yaml"))
            .build();
        assert_eq!(cfg.remote.root_folder, "Saves");
        assert_eq!(cfg.remote.store_path, PathBuf::from("/mnt/r"));
        assert_eq!(cfg.catalog.path, PathBuf::from("/tmp/c.yaml"));
    }

    #[test]
    fn builder_build_validated_fails_for_invalid_config() {
        let result = ConfigBuilder::new().logging_level("nope").build_validated();
        assert!(result.is_err());
        assert!(ConfigBuilder::new().build_validated().is_ok());
    }
}
