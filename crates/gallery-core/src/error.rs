//! Error types for gallery-core
//!
//! Store operations are total and never return these. Errors only come from
//! the edges: loading a catalog, talking to a preference backend, and
//! reading configuration.

use thiserror::Error;

use gallery_domain::CatalogError;

use crate::config::ConfigError;

/// Result type alias for gallery operations
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Main error type for gallery operations
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Catalog could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Preference backend failure
    #[error("Preference error: {0}")]
    Preference(#[from] PreferenceError),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Preference backend errors
#[derive(Error, Debug)]
pub enum PreferenceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Stored value or file could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// A backend lock was poisoned by a panicking writer
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

impl From<std::io::Error> for PreferenceError {
    fn from(err: std::io::Error) -> Self {
        PreferenceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PreferenceError {
    fn from(err: serde_json::Error) -> Self {
        PreferenceError::Serialization(err.to_string())
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PreferenceError {
    fn from(err: rusqlite::Error) -> Self {
        PreferenceError::Database(err.to_string())
    }
}
