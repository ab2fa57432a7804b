//! Faultline configuration.
//!
//! Read from YAML, then overridden by environment variables:
//!
//! | Field | Variable |
//! |-------|----------|
//! | `catalog_dir` | `FAULTLINE_CATALOG_DIR` |
//! | `locale` | `FAULTLINE_LOCALE` |
//! | `default_locale` | `FAULTLINE_DEFAULT_LOCALE` |
//! | `document_root` | `FAULTLINE_DOCUMENT_ROOT` |
//!
//! `FAULTLINE_CONFIG` names the YAML file for [`FaultlineConfig::from_env`].

use crate::error::ConfigError;
use faultline_catalog::{locale, Catalog, DEFAULT_LOCALE};
use faultline_core::{Environment, FaultContext, ProcessEnvironment};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaultlineConfig {
    /// Directory holding `<locale>.yaml` catalogs; no localization when unset
    pub catalog_dir: Option<PathBuf>,
    /// Active locale; detected from the environment when unset
    pub locale: Option<String>,
    pub default_locale: Option<String>,
    /// Prefix stripped from source paths; `DOCUMENT_ROOT` when unset
    pub document_root: Option<String>,
}

impl FaultlineConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// `FAULTLINE_CONFIG` file (if any) with environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var("FAULTLINE_CONFIG") {
            Ok(path) if !path.is_empty() => Self::load(path)?,
            _ => Self::default(),
        };
        Ok(base.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Apply overrides from a variable source; empty values are ignored
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| var(name).filter(|v| !v.is_empty());

        if let Some(dir) = get("FAULTLINE_CATALOG_DIR") {
            self.catalog_dir = Some(PathBuf::from(dir));
        }
        if let Some(locale) = get("FAULTLINE_LOCALE") {
            self.locale = Some(locale);
        }
        if let Some(locale) = get("FAULTLINE_DEFAULT_LOCALE") {
            self.default_locale = Some(locale);
        }
        if let Some(root) = get("FAULTLINE_DOCUMENT_ROOT") {
            self.document_root = Some(root);
        }
        self
    }

    /// Configured locale, else detected from the process environment
    pub fn active_locale(&self) -> String {
        self.active_locale_in(&ProcessEnvironment)
    }

    /// Configured locale, else `FAULTLINE_LOCALE`/`LANG` from `env`, else
    /// the default locale
    pub fn active_locale_in(&self, env: &dyn Environment) -> String {
        self.locale
            .as_deref()
            .and_then(locale::language)
            .unwrap_or_else(|| locale::detect_from(|name| env.var(name), &self.default_locale()))
    }

    pub fn default_locale(&self) -> String {
        self.default_locale
            .as_deref()
            .and_then(locale::language)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
    }

    /// Build a context, reading the document root from the process
    pub fn build_context(&self) -> Result<FaultContext, ConfigError> {
        self.build_context_with(&ProcessEnvironment)
    }

    /// Build a context; `env` supplies the locale and document root when
    /// the configuration has none.
    pub fn build_context_with(&self, env: &dyn Environment) -> Result<FaultContext, ConfigError> {
        let mut ctx = FaultContext::new();

        if let Some(dir) = &self.catalog_dir {
            let locale = self.active_locale_in(env);
            let catalog = Catalog::load_dir(dir, &locale, &self.default_locale())?;
            tracing::debug!(
                locale = catalog.locale(),
                default_locale = catalog.default_locale(),
                "catalog ready"
            );
            ctx = ctx.with_translator(Arc::new(catalog));
        }

        ctx = match &self.document_root {
            Some(root) => ctx.with_document_root(root.clone()),
            None => ctx.with_environment(env),
        };

        Ok(ctx)
    }
}
