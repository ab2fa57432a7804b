//! Setup errors
use faultline_catalog::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CONFIG/read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CONFIG/parse: {0}")]
    Parse(String),

    #[error("CATALOG/{0}")]
    Catalog(#[from] CatalogError),

    #[error("CONTEXT/already initialized")]
    AlreadyInitialized,
}
