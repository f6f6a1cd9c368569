//! The mutable list of country records.
//!
//! Every mutation swaps in a new [`CountryList`] in which only the touched
//! record is freshly allocated; all other entries are the same `Arc` as
//! before, so subscribers can spot what changed with `Arc::ptr_eq`.

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use gallery_domain::{Catalog, Country, Tag, TagSet};

use crate::subscription::{SubscriptionId, Subscribers};

/// Immutable snapshot of every record, in catalog order.
pub type CountryList = Arc<[Arc<Country>]>;

/// Mutation to apply to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryMutation {
    Hide,
    Replace(Country),
    SetTags(TagSet),
    AddTag(Tag),
    RemoveTag(Tag),
}

impl CountryMutation {
    /// Produce the updated record. The result always keeps `current.code`.
    fn apply_to(&self, current: &Country) -> Country {
        match self {
            CountryMutation::Hide => Country {
                hidden: true,
                ..current.clone()
            },
            CountryMutation::Replace(replacement) => {
                let mut next = replacement.clone();
                if next.code != current.code {
                    tracing::warn!(
                        "Replacement for {} carried code {}; keeping {}",
                        current.code,
                        next.code,
                        current.code
                    );
                    next.code = current.code.clone();
                }
                next
            }
            CountryMutation::SetTags(tags) => Country {
                tags: tags.clone(),
                ..current.clone()
            },
            CountryMutation::AddTag(tag) => Country {
                tags: current.tags.with(tag.clone()),
                ..current.clone()
            },
            CountryMutation::RemoveTag(tag) => Country {
                tags: current.tags.without(tag),
                ..current.clone()
            },
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            CountryMutation::Hide => "hide",
            CountryMutation::Replace(_) => "replace",
            CountryMutation::SetTags(_) => "set_tags",
            CountryMutation::AddTag(_) => "add_tag",
            CountryMutation::RemoveTag(_) => "remove_tag",
        }
    }
}

/// Emitted after a mutation matched a record.
#[derive(Debug, Clone)]
pub struct CountryEvent {
    pub code: String,
    pub mutation: CountryMutation,
    pub previous: CountryList,
    pub current: CountryList,
}

impl CountryEvent {
    /// The record after the change.
    pub fn updated(&self) -> Option<&Arc<Country>> {
        self.current.iter().find(|c| c.code == self.code)
    }
}

/// Holds every country record and applies per-record edits.
pub struct CountryStore {
    countries: CountryList,
    subscribers: Subscribers<CountryEvent>,
}

impl CountryStore {
    /// Seed the store from a catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        let countries: CountryList = catalog
            .into_countries()
            .into_iter()
            .map(Arc::new)
            .collect();
        tracing::debug!("Seeded country store with {} records", countries.len());
        Self {
            countries,
            subscribers: Subscribers::new(),
        }
    }

    /// The current list, in catalog order.
    pub fn all(&self) -> CountryList {
        Arc::clone(&self.countries)
    }

    pub fn get(&self, code: &str) -> Option<Arc<Country>> {
        self.countries.iter().find(|c| c.code == code).cloned()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Apply `mutation` to the record with `code`.
    ///
    /// Returns false, leaving the list untouched and notifying nobody, when
    /// no record has that code.
    pub fn apply(&mut self, code: &str, mutation: CountryMutation) -> bool {
        let Some(index) = self.countries.iter().position(|c| c.code == code) else {
            tracing::debug!("No country with code {}; {} ignored", code, mutation.name());
            return false;
        };

        let updated = mutation.apply_to(&self.countries[index]);
        let mut next = self.countries.to_vec();
        next[index] = Arc::new(updated);

        let previous = std::mem::replace(&mut self.countries, next.into());
        tracing::debug!("Applied {} to {}", mutation.name(), code);

        let event = CountryEvent {
            code: code.to_string(),
            mutation,
            previous,
            current: Arc::clone(&self.countries),
        };
        self.subscribers.notify(&event);
        true
    }

    /// Mark a record hidden. Other fields are untouched.
    pub fn hide(&mut self, code: &str) -> bool {
        self.apply(code, CountryMutation::Hide)
    }

    /// Replace a record wholesale. The stored record keeps `code` even if
    /// `country.code` differs.
    pub fn replace(&mut self, code: &str, country: Country) -> bool {
        self.apply(code, CountryMutation::Replace(country))
    }

    pub fn set_tags(&mut self, code: &str, tags: TagSet) -> bool {
        self.apply(code, CountryMutation::SetTags(tags))
    }

    /// Add a tag. Adding a tag that is already present leaves the set as is.
    pub fn add_tag(&mut self, code: &str, tag: impl Into<Tag>) -> bool {
        self.apply(code, CountryMutation::AddTag(tag.into()))
    }

    pub fn remove_tag(&mut self, code: &str, tag: impl Into<Tag>) -> bool {
        self.apply(code, CountryMutation::RemoveTag(tag.into()))
    }

    /// Edit handle bound to one record.
    pub fn handle(&mut self, code: impl Into<String>) -> CountryHandle<'_> {
        CountryHandle {
            store: self,
            code: code.into(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CountryEvent) + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn subscribe_channel(&mut self) -> (SubscriptionId, Receiver<CountryEvent>) {
        self.subscribers.channel()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

/// Mutations for a single country, addressed by the code it was created with.
pub struct CountryHandle<'a> {
    store: &'a mut CountryStore,
    code: String,
}

impl CountryHandle<'_> {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn get(&self) -> Option<Arc<Country>> {
        self.store.get(&self.code)
    }

    pub fn hide(&mut self) -> bool {
        self.store.hide(&self.code)
    }

    pub fn replace(&mut self, country: Country) -> bool {
        self.store.replace(&self.code, country)
    }

    pub fn set_tags(&mut self, tags: TagSet) -> bool {
        self.store.set_tags(&self.code, tags)
    }

    pub fn add_tag(&mut self, tag: impl Into<Tag>) -> bool {
        self.store.add_tag(&self.code, tag)
    }

    pub fn remove_tag(&mut self, tag: impl Into<Tag>) -> bool {
        self.store.remove_tag(&self.code, tag)
    }
}
