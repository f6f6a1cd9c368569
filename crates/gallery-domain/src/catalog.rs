//! The static seed list of countries.

use std::collections::HashSet;
use std::path::Path;

use crate::country::Country;

const BUILTIN_CATALOG: &str = include_str!("../data/countries.json");

/// Errors raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate country code: {0}")]
    DuplicateCode(String),

    #[error("Country code must not be empty (entry {0})")]
    EmptyCode(usize),
}

/// An ordered, code-unique list of countries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    countries: Vec<Country>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or repeated codes.
    pub fn new(countries: Vec<Country>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(countries.len());
        for (index, country) in countries.iter().enumerate() {
            if country.code.is_empty() {
                return Err(CatalogError::EmptyCode(index));
            }
            if !seen.insert(country.code.as_str()) {
                return Err(CatalogError::DuplicateCode(country.code.clone()));
            }
        }
        Ok(Self { countries })
    }

    /// Parse a JSON array of country records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let countries: Vec<Country> = serde_json::from_str(json)?;
        Self::new(countries)
    }

    /// Load a JSON catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// The sample catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn into_countries(self) -> Vec<Country> {
        self.countries
    }
}
