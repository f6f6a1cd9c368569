//! gallery-core: view state for the flag gallery.
//!
//! Two stores live inside a [`GalleryState`]:
//!
//! - [`PreferenceStore`]: color mode and grid density, persisted through a
//!   [`PreferenceBackend`], plus a session-only continent filter.
//! - [`CountryStore`]: the country records, edited one record at a time
//!   (hide, replace, tag edits).
//!
//! Both notify subscribers synchronously after each committed change. The
//! [`view`] module turns a snapshot of both into sections and cards ready to
//! draw.
//!
//! Stores are single-writer: mutation takes `&mut self`. A multithreaded
//! host should put each store behind one lock or one command queue.

pub mod backend;
pub mod config;
pub mod countries;
pub mod durable;
pub mod error;
pub mod preferences;
pub mod state;
pub mod subscription;
pub mod view;

#[cfg(feature = "sqlite")]
pub mod sqlite_backend;

pub use backend::*;
pub use config::*;
pub use countries::*;
pub use durable::*;
pub use error::*;
pub use preferences::*;
pub use state::*;
pub use subscription::*;
pub use view::*;

#[cfg(feature = "sqlite")]
pub use sqlite_backend::SqliteBackend;
