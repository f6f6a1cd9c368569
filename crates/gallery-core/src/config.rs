//! Configuration for the flag gallery
//!
//! Where preferences are stored, which catalog to seed from, the
//! defaults for durable preferences, and the log filter.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gallery_domain::{Catalog, CatalogError};
use serde::{Deserialize, Serialize};

use crate::backend::{JsonFileBackend, MemoryBackend, PreferenceBackend};
use crate::error::{PreferenceError, Result};
use crate::preferences::{is_allowed_items_per_row, PreferenceDefaults};

/// Application-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Preference storage and defaults
    pub preferences: PreferenceConfig,
    /// Seed catalog location
    pub catalog: CatalogConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Which preference backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Nothing survives the process
    Memory,
    /// One JSON object file
    #[default]
    Json,
    /// SQLite database (needs the `sqlite` feature)
    Sqlite,
}

/// Preference storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceConfig {
    pub backend: BackendKind,
    /// Storage location; defaults to the user config directory
    pub path: Option<PathBuf>,
    /// Color mode when nothing is stored
    pub show_colors: bool,
    /// Grid density when nothing is stored
    pub items_per_row: u32,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        let defaults = PreferenceDefaults::default();
        Self {
            backend: BackendKind::default(),
            path: None,
            show_colors: defaults.show_colors,
            items_per_row: defaults.items_per_row,
        }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file; the bundled catalog is used when unset
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> std::result::Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> std::result::Result<Self, ConfigError> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> std::result::Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load a config file; `.json` files are read as JSON, anything else as TOML
    pub fn from_path(path: &Path) -> std::result::Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            _ => Self::from_toml(&contents),
        }
    }

    /// `<config dir>/flag-gallery/config.toml`
    pub fn standard_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flag-gallery").join("config.toml"))
    }

    /// Load from the standard location, or defaults when there is no file
    pub fn load_standard() -> std::result::Result<Self, ConfigError> {
        match Self::standard_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from {:?}", path);
                Self::from_path(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !is_allowed_items_per_row(self.preferences.items_per_row) {
            return Err(ConfigError::OutOfRange(format!(
                "items_per_row {} is not an offered grid density",
                self.preferences.items_per_row
            )));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::MissingField("logging.filter".to_string()));
        }

        if self.preferences.backend == BackendKind::Sqlite && !cfg!(feature = "sqlite") {
            return Err(ConfigError::FeatureDisabled("sqlite"));
        }

        Ok(())
    }

    /// Defaults for durable preferences
    pub fn preference_defaults(&self) -> PreferenceDefaults {
        PreferenceDefaults {
            show_colors: self.preferences.show_colors,
            items_per_row: self.preferences.items_per_row,
        }
    }

    /// Where the configured backend keeps its data
    pub fn preference_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.preferences.path {
            return Some(path.clone());
        }
        match self.preferences.backend {
            BackendKind::Memory => None,
            BackendKind::Json => JsonFileBackend::default_path(),
            BackendKind::Sqlite => dirs::config_dir()
                .map(|dir| dir.join("flag-gallery").join("preferences.sqlite")),
        }
    }

    /// Open the configured preference backend
    pub fn open_backend(&self) -> Result<Arc<dyn PreferenceBackend>> {
        self.validate()?;

        let backend: Arc<dyn PreferenceBackend> = match self.preferences.backend {
            BackendKind::Memory => Arc::new(MemoryBackend::new()),
            BackendKind::Json => {
                let path = self.require_preference_path()?;
                tracing::info!("Using preference file {:?}", path);
                Arc::new(JsonFileBackend::open(path))
            }
            BackendKind::Sqlite => self.open_sqlite()?,
        };
        Ok(backend)
    }

    #[cfg(feature = "sqlite")]
    fn open_sqlite(&self) -> Result<Arc<dyn PreferenceBackend>> {
        let path = self.require_preference_path()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(PreferenceError::from)?;
            }
        }
        tracing::info!("Using preference database {:?}", path);
        Ok(Arc::new(crate::sqlite_backend::SqliteBackend::open(&path)?))
    }

    #[cfg(not(feature = "sqlite"))]
    fn open_sqlite(&self) -> Result<Arc<dyn PreferenceBackend>> {
        Err(ConfigError::FeatureDisabled("sqlite").into())
    }

    fn require_preference_path(&self) -> Result<PathBuf> {
        self.preference_path().ok_or_else(|| {
            PreferenceError::Io("no preference path configured and no config directory".into())
                .into()
        })
    }

    /// Load the configured catalog, or the bundled one
    pub fn load_catalog(&self) -> std::result::Result<Catalog, CatalogError> {
        match &self.catalog.path {
            Some(path) => {
                tracing::info!("Loading catalog from {:?}", path);
                Catalog::from_path(path)
            }
            None => Catalog::builtin(),
        }
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// Config text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Config could not be serialized
    #[error("Serialize error: {0}")]
    Serialize(String),

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Required field is missing
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Option needs a cargo feature this build lacks
    #[error("Feature not enabled: {0}")]
    FeatureDisabled(&'static str),
}
