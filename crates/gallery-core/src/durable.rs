//! Values that survive a restart.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::PreferenceBackend;
use crate::error::PreferenceError;

/// A value loaded from a [`PreferenceBackend`] once and saved on every write.
///
/// Loading never fails: an absent, unreadable, or mistyped stored value
/// falls back to the default. Writes always update the in-memory value,
/// whether or not the backend accepts it.
pub struct DurableField<T> {
    key: String,
    value: T,
    backend: Arc<dyn PreferenceBackend>,
}

impl<T> DurableField<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load `key` from `backend`, or use `default`.
    pub fn load(backend: Arc<dyn PreferenceBackend>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = match backend.load(&key) {
            Ok(Some(raw)) => match serde_json::from_value(raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Ignoring stored preference {}: {}", key, e);
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("Failed to load preference {}: {}, using default", key, e);
                default
            }
        };

        Self {
            key,
            value,
            backend,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Overwrite the value and persist it. Backend failures are logged.
    pub fn set(&mut self, value: T) {
        if let Err(e) = self.try_set(value) {
            tracing::warn!("Failed to save preference {}: {}", self.key, e);
        }
    }

    /// Overwrite the value and report whether the backend stored it.
    ///
    /// The in-memory value changes even when this returns an error.
    pub fn try_set(&mut self, value: T) -> Result<(), PreferenceError> {
        self.value = value;
        let raw = serde_json::to_value(&self.value)?;
        self.backend.save(&self.key, raw)
    }
}

impl<T: fmt::Debug> fmt::Debug for DurableField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DurableField")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use serde_json::{json, Value};

    struct FailingBackend;

    impl PreferenceBackend for FailingBackend {
        fn load(&self, _key: &str) -> Result<Option<Value>, PreferenceError> {
            Err(PreferenceError::Io("disk on fire".into()))
        }

        fn save(&self, _key: &str, _value: Value) -> Result<(), PreferenceError> {
            Err(PreferenceError::Io("disk on fire".into()))
        }
    }

    #[test]
    fn absent_key_uses_default() {
        let backend = Arc::new(MemoryBackend::new());
        let field = DurableField::load(backend, "colorState", true);
        assert!(*field.get());
        assert_eq!(field.key(), "colorState");
    }

    #[test]
    fn set_persists() {
        let backend = Arc::new(MemoryBackend::new());
        let mut field = DurableField::load(backend.clone(), "itemsPerRowState", 4u32);
        field.set(8);

        assert_eq!(*field.get(), 8);
        assert_eq!(backend.load("itemsPerRowState").unwrap(), Some(json!(8)));

        let reloaded = DurableField::load(backend, "itemsPerRowState", 4u32);
        assert_eq!(*reloaded.get(), 8);
    }

    #[test]
    fn mistyped_value_uses_default() {
        let backend = Arc::new(MemoryBackend::new());
        backend.save("itemsPerRowState", json!("lots")).unwrap();
        let field = DurableField::load(backend, "itemsPerRowState", 4u32);
        assert_eq!(*field.get(), 4);
    }

    #[test]
    fn failing_backend_is_tolerated() {
        let mut field = DurableField::load(Arc::new(FailingBackend), "colorState", true);
        assert!(*field.get());

        field.set(false);
        assert!(!*field.get());
        assert!(field.try_set(true).is_err());
        assert!(*field.get());
    }

    #[test]
    fn works_for_structured_values() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Window {
            width: u32,
            height: u32,
        }

        let backend = Arc::new(MemoryBackend::new());
        let mut field = DurableField::load(
            backend.clone(),
            "window",
            Window {
                width: 800,
                height: 600,
            },
        );
        field.set(Window {
            width: 1024,
            height: 768,
        });

        let reloaded = DurableField::load(
            backend,
            "window",
            Window {
                width: 0,
                height: 0,
            },
        );
        assert_eq!(reloaded.get().width, 1024);
    }
}
