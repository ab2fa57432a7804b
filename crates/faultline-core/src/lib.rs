//! Faultline Core: structured error records with localized messages
//!
//! A fault is built from either a verbatim message or a [`FaultSpec`]
//! (key, fallback text, substitution data, HTTP status, details, cause).
//! Its text is resolved once, through an ordered waterfall of catalog
//! lookups and fallbacks, and rendered against the substitution data.
//!
//! # Example
//!
//! ```
//! use faultline_core::{Fault, FaultSpec, Variant};
//!
//! let fault = Fault::build(
//!     &Variant::NOT_FOUND,
//!     FaultSpec::new()
//!         .key("file.not-found")
//!         .fallback("File {{ filename }} is missing")
//!         .datum("filename", "a.txt"),
//! );
//!
//! assert_eq!(fault.message(), "File a.txt is missing");
//! assert_eq!(fault.key(), "error.file.not-found");
//! assert_eq!(fault.http_code(), 404);
//! ```

pub mod context;
pub mod fault;
pub mod key;
pub mod path;
pub mod resolver;
pub mod template;
pub mod translate;
pub mod variant;

pub use context::FaultContext;
pub use fault::{Fault, FaultArray};
pub use key::{normalize, KEY_PREFIX};
pub use path::relativize;
pub use resolver::{Cause, Data, FaultArgs, FaultSpec, MessageSource, Resolution};
pub use template::{HandlebarsEngine, RenderError, TemplateEngine, FALLBACK_MARKER};
pub use translate::{Environment, MemoryTranslator, ProcessEnvironment, Translator};
pub use variant::Variant;
