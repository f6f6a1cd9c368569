//! Viewer preferences: color mode, grid density, continent filter.
//!
//! `show_colors` and `items_per_row` are durable and go through a
//! [`PreferenceBackend`]. The continent filter lives for the session only.

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use gallery_domain::Continent;
use serde::{Deserialize, Serialize};

use crate::backend::PreferenceBackend;
use crate::durable::DurableField;
use crate::subscription::{SubscriptionId, Subscribers};

/// Backend key for the color-mode preference.
pub const SHOW_COLORS_KEY: &str = "colorState";
/// Backend key for the grid-density preference.
pub const ITEMS_PER_ROW_KEY: &str = "itemsPerRowState";

pub const DEFAULT_SHOW_COLORS: bool = true;
pub const DEFAULT_ITEMS_PER_ROW: u32 = 4;

/// Grid densities offered to the viewer, in selector order.
pub const ITEMS_PER_ROW_OPTIONS: [u32; 9] = [24, 12, 8, 6, 5, 4, 3, 2, 1];

/// Whether `n` is one of [`ITEMS_PER_ROW_OPTIONS`].
pub fn is_allowed_items_per_row(n: u32) -> bool {
    ITEMS_PER_ROW_OPTIONS.contains(&n)
}

/// Values used when the backend has nothing stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceDefaults {
    pub show_colors: bool,
    pub items_per_row: u32,
}

impl Default for PreferenceDefaults {
    fn default() -> Self {
        Self {
            show_colors: DEFAULT_SHOW_COLORS,
            items_per_row: DEFAULT_ITEMS_PER_ROW,
        }
    }
}

/// Point-in-time copy of every preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub show_colors: bool,
    pub items_per_row: u32,
    pub active_continent: Option<Continent>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_colors: DEFAULT_SHOW_COLORS,
            items_per_row: DEFAULT_ITEMS_PER_ROW,
            active_continent: None,
        }
    }
}

/// Emitted after a preference is written, carrying the new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceChange {
    ShowColors(bool),
    ItemsPerRow(u32),
    ActiveContinent(Option<Continent>),
}

/// Holds the viewer's display preferences.
pub struct PreferenceStore {
    show_colors: DurableField<bool>,
    items_per_row: DurableField<u32>,
    active_continent: Option<Continent>,
    subscribers: Subscribers<PreferenceChange>,
}

impl PreferenceStore {
    /// Load durable preferences from `backend`, falling back to the
    /// built-in defaults.
    pub fn load(backend: Arc<dyn PreferenceBackend>) -> Self {
        Self::load_with_defaults(backend, PreferenceDefaults::default())
    }

    pub fn load_with_defaults(
        backend: Arc<dyn PreferenceBackend>,
        defaults: PreferenceDefaults,
    ) -> Self {
        let show_colors =
            DurableField::load(Arc::clone(&backend), SHOW_COLORS_KEY, defaults.show_colors);
        let items_per_row =
            DurableField::load(backend, ITEMS_PER_ROW_KEY, defaults.items_per_row);

        tracing::debug!(
            "Loaded preferences: show_colors={}, items_per_row={}",
            show_colors.get(),
            items_per_row.get()
        );

        Self {
            show_colors,
            items_per_row,
            active_continent: None,
            subscribers: Subscribers::new(),
        }
    }

    pub fn show_colors(&self) -> bool {
        *self.show_colors.get()
    }

    /// Overwrite the color mode, persist it, and notify subscribers.
    pub fn set_show_colors(&mut self, value: bool) {
        self.show_colors.set(value);
        self.subscribers.notify(&PreferenceChange::ShowColors(value));
    }

    pub fn items_per_row(&self) -> u32 {
        *self.items_per_row.get()
    }

    /// Overwrite the grid density, persist it, and notify subscribers.
    ///
    /// Values outside [`ITEMS_PER_ROW_OPTIONS`] are stored as given; the
    /// layout they produce is the caller's problem.
    pub fn set_items_per_row(&mut self, value: u32) {
        if !is_allowed_items_per_row(value) {
            tracing::debug!("items_per_row set to unlisted value {}", value);
        }
        self.items_per_row.set(value);
        self.subscribers.notify(&PreferenceChange::ItemsPerRow(value));
    }

    /// The continent filter. `None` shows every continent.
    pub fn active_continent(&self) -> Option<Continent> {
        self.active_continent
    }

    /// Overwrite the continent filter. Not persisted.
    pub fn set_active_continent(&mut self, value: Option<Continent>) {
        self.active_continent = value;
        self.subscribers.notify(&PreferenceChange::ActiveContinent(value));
    }

    pub fn snapshot(&self) -> Preferences {
        Preferences {
            show_colors: self.show_colors(),
            items_per_row: self.items_per_row(),
            active_continent: self.active_continent,
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PreferenceChange) + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn subscribe_channel(&mut self) -> (SubscriptionId, Receiver<PreferenceChange>) {
        self.subscribers.channel()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
