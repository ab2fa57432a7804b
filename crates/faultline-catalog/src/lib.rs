//! Faultline Catalog: YAML translation catalogs
//!
//! One YAML file per locale (`en.yaml`, `pt.yaml`, ...). Nested mappings
//! flatten into dotted keys, so these two files are equivalent:
//!
//! ```yaml
//! error:
//!   file:
//!     not-found: "File {{ filename }} not found"
//! ```
//!
//! ```yaml
//! error.file.not-found: "File {{ filename }} not found"
//! ```
//!
//! A [`Catalog`] pairs the active locale with the default locale and
//! implements [`faultline_core::Translator`].

pub mod catalog;
pub mod locale;

pub use catalog::{Catalog, CatalogError, LocaleCatalog};
pub use locale::{detect_from, DEFAULT_LOCALE};
