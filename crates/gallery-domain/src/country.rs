//! Country records shown in the gallery.

use serde::{Deserialize, Serialize};

use crate::continent::Continent;
use crate::tag::TagSet;

/// One flag in the gallery.
///
/// `code` is the stable identity of the record. Everything else may be
/// edited by the country store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub continent: Continent,
    /// Full-color flag image.
    pub png_image: String,
    /// Outline-only flag image.
    pub png_outline: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub tags: TagSet,
}

impl Country {
    /// Create a visible, untagged record.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        continent: Continent,
        png_image: impl Into<String>,
        png_outline: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            continent,
            png_image: png_image.into(),
            png_outline: png_outline.into(),
            hidden: false,
            tags: TagSet::new(),
        }
    }

    /// Builder method to attach tags
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }
}
