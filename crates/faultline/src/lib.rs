//! Faultline: structured, localized error records
//!
//! Install a context once at startup, then raise faults anywhere:
//!
//! ```no_run
//! use faultline::{Fault, FaultSpec, FaultlineConfig, Variant};
//!
//! faultline::init(&FaultlineConfig::from_env()?)?;
//!
//! let fault = Fault::build(
//!     &Variant::NOT_FOUND,
//!     FaultSpec::new().key("file.not-found").datum("filename", "a.txt"),
//! );
//! println!("{}", fault);
//! # Ok::<(), faultline::ConfigError>(())
//! ```

pub mod config;
pub mod error;

pub use config::FaultlineConfig;
pub use error::ConfigError;

pub use faultline_catalog::{Catalog, CatalogError, LocaleCatalog};
pub use faultline_core::{
    normalize, relativize, Cause, Data, Environment, Fault, FaultArgs, FaultArray, FaultContext,
    FaultSpec, HandlebarsEngine, MemoryTranslator, MessageSource, ProcessEnvironment,
    TemplateEngine, Translator, Variant, FALLBACK_MARKER, KEY_PREFIX,
};

/// Build a context from `config` and install it process-wide.
///
/// Fails if a context was already installed.
pub fn init(config: &FaultlineConfig) -> Result<(), ConfigError> {
    let ctx = config.build_context()?;
    tracing::info!(context = ?ctx, "installing fault context");
    ctx.install().map_err(|_| ConfigError::AlreadyInitialized)
}

/// [`init`] with [`FaultlineConfig::from_env`]
pub fn init_from_env() -> Result<(), ConfigError> {
    init(&FaultlineConfig::from_env()?)
}
