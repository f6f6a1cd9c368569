//! Persistent key-value layer for durable preferences.
//!
//! Keys are preference names; values are JSON primitives. Backends use
//! interior mutability so one instance can be shared by every durable field.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::error::PreferenceError;

/// The trait that all preference storage backends implement.
pub trait PreferenceBackend: Send + Sync {
    /// Read a stored value. `Ok(None)` means the key was never saved.
    fn load(&self, key: &str) -> Result<Option<Value>, PreferenceError>;

    /// Store a value, replacing any previous one.
    fn save(&self, key: &str, value: Value) -> Result<(), PreferenceError>;
}

/// In-process backend. Sharing one instance between two stores simulates a
/// restart that keeps durable state.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<BTreeMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything stored so far.
    pub fn snapshot(&self) -> Result<BTreeMap<String, Value>, PreferenceError> {
        let values = self
            .values
            .lock()
            .map_err(|e| PreferenceError::Lock(e.to_string()))?;
        Ok(values.clone())
    }
}

impl PreferenceBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        let values = self
            .values
            .lock()
            .map_err(|e| PreferenceError::Lock(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| PreferenceError::Lock(e.to_string()))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Stores every key in one JSON object file, rewritten on each save.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
}

impl JsonFileBackend {
    /// Open a preference file. A missing file starts empty and is created on
    /// the first save.
    ///
    /// An unreadable or malformed file is logged and treated as empty; the
    /// next save overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = if path.exists() {
            Self::read_values(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring preference file {:?}: {}", path, e);
                Map::new()
            })
        } else {
            Map::new()
        };

        tracing::debug!("Opened preference file {:?} ({} keys)", path, values.len());
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn read_values(path: &Path) -> Result<Map<String, Value>, PreferenceError> {
        let contents = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(map) => Ok(map),
            other => Err(PreferenceError::Serialization(format!(
                "expected a JSON object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Default location: `<config dir>/flag-gallery/preferences.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flag-gallery").join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, values: &Map<String, Value>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceBackend for JsonFileBackend {
    fn load(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        let values = self
            .values
            .lock()
            .map_err(|e| PreferenceError::Lock(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| PreferenceError::Lock(e.to_string()))?;
        values.insert(key.to_string(), value);
        self.write(&values)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
