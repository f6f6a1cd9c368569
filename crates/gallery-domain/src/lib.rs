//! gallery-domain: data models for the flag gallery.
//!
//! A gallery is a flat list of [`Country`] records seeded from a [`Catalog`]
//! and grouped by [`Continent`] for display. Each record carries a
//! deduplicated [`TagSet`] and a `hidden` marker that viewers can toggle.
//!
//! The `code` field is the identity of a record. A catalog refuses to load
//! two records with the same code, and nothing downstream renames codes.

pub mod catalog;
pub mod continent;
pub mod country;
pub mod tag;

pub use catalog::*;
pub use continent::*;
pub use country::*;
pub use tag::*;
