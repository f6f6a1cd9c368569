//! The application state container.

use std::sync::Arc;

use gallery_domain::Catalog;

use crate::backend::PreferenceBackend;
use crate::config::GalleryConfig;
use crate::countries::CountryStore;
use crate::error::Result;
use crate::preferences::{PreferenceDefaults, PreferenceStore};
use crate::view::{compose, GalleryView};

/// Owns the preference and country stores for one gallery session.
///
/// Hand out `&GalleryState` to code that only reads and `&mut` to code
/// that dispatches edits.
pub struct GalleryState {
    preferences: PreferenceStore,
    countries: CountryStore,
}

impl GalleryState {
    pub fn new(catalog: Catalog, backend: Arc<dyn PreferenceBackend>) -> Self {
        Self::with_defaults(catalog, backend, PreferenceDefaults::default())
    }

    pub fn with_defaults(
        catalog: Catalog,
        backend: Arc<dyn PreferenceBackend>,
        defaults: PreferenceDefaults,
    ) -> Self {
        Self {
            preferences: PreferenceStore::load_with_defaults(backend, defaults),
            countries: CountryStore::from_catalog(catalog),
        }
    }

    /// Build from configuration: open the backend and load the catalog.
    pub fn from_config(config: &GalleryConfig) -> Result<Self> {
        let backend = config.open_backend()?;
        let catalog = config.load_catalog()?;
        tracing::info!("Loaded catalog with {} countries", catalog.len());
        Ok(Self::with_defaults(catalog, backend, config.preference_defaults()))
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut PreferenceStore {
        &mut self.preferences
    }

    pub fn countries(&self) -> &CountryStore {
        &self.countries
    }

    pub fn countries_mut(&mut self) -> &mut CountryStore {
        &mut self.countries
    }

    /// Compose the current view. `hovered` is the code under the pointer.
    pub fn view(&self, hovered: Option<&str>) -> GalleryView {
        let countries = self.countries.all();
        compose(&self.preferences.snapshot(), &countries[..], hovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::config::BackendKind;
    use gallery_domain::{Continent, Country};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Country::new("FR", "France", Continent::Europe, "fr.png", "fr-o.png"),
            Country::new("JP", "Japan", Continent::Asia, "jp.png", "jp-o.png"),
        ])
        .unwrap()
    }

    #[test]
    fn view_follows_store_changes() {
        let mut state = GalleryState::new(catalog(), Arc::new(MemoryBackend::new()));
        state.preferences_mut().set_show_colors(false);
        state.preferences_mut().set_active_continent(Some(Continent::Asia));
        state.countries_mut().add_tag("JP", "visited");

        let view = state.view(None);
        assert_eq!(view.sections.len(), 1);
        let jp = view.find_card("JP").unwrap();
        assert_eq!(jp.image_url, "jp-o.png");
        assert!(jp.tags.contains("visited"));

        let hovered = state.view(Some("JP"));
        assert_eq!(hovered.find_card("JP").unwrap().image_url, "jp.png");
    }

    #[test]
    fn from_memory_config() {
        let mut config = GalleryConfig::default();
        config.preferences.backend = BackendKind::Memory;
        config.preferences.items_per_row = 12;

        let state = GalleryState::from_config(&config).unwrap();
        assert_eq!(state.preferences().items_per_row(), 12);
        assert!(!state.countries().is_empty());
    }

    #[test]
    fn from_config_reports_bad_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[]]").unwrap();

        let mut config = GalleryConfig::default();
        config.preferences.backend = BackendKind::Memory;
        config.catalog.path = Some(path);

        assert!(matches!(
            GalleryState::from_config(&config),
            Err(crate::error::GalleryError::Catalog(_))
        ));
    }
}
