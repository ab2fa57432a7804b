//! Catalog loading and lookup.

use faultline_core::Translator;
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading catalogs
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog {path}: {message}")]
    Parse { path: String, message: String },
    #[error("No catalog for default locale {locale} in {dir}")]
    MissingDefault { locale: String, dir: String },
}

/// Messages of a single locale, keyed by dotted path
#[derive(Debug, Clone, Default)]
pub struct LocaleCatalog {
    locale: String,
    messages: HashMap<String, String>,
}

impl LocaleCatalog {
    /// An empty catalog for `locale`
    pub fn empty(locale: impl Into<String>) -> Self {
        LocaleCatalog {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    /// Load a catalog from a YAML file
    pub fn load(locale: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(locale, &content, &path.display().to_string())
    }

    /// Parse a catalog from YAML content
    pub fn from_yaml(locale: impl Into<String>, yaml: &str) -> Result<Self, CatalogError> {
        Self::parse(locale, yaml, "<inline>")
    }

    fn parse(locale: impl Into<String>, yaml: &str, origin: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let mut messages = HashMap::new();
        match &root {
            Value::Mapping(_) => flatten("", &root, &mut messages),
            Value::Null => {}
            _ => {
                return Err(CatalogError::Parse {
                    path: origin.to_string(),
                    message: "top level must be a mapping".to_string(),
                })
            }
        }

        let catalog = LocaleCatalog {
            locale: locale.into(),
            messages,
        };
        tracing::debug!(
            locale = %catalog.locale,
            origin,
            messages = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Template for `key`; empty templates count as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages
            .get(key)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.messages.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Walk nested mappings, joining keys with `.`
fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let Some(segment) = scalar_text(k) else {
                    continue;
                };
                let path = if prefix.is_empty() {
                    segment
                } else {
                    format!("{}.{}", prefix, segment)
                };
                flatten(&path, v, out);
            }
        }
        Value::Tagged(tagged) => flatten(prefix, &tagged.value, out),
        Value::Sequence(_) | Value::Null => {
            tracing::debug!(key = prefix, "skipping non-scalar catalog entry");
        }
        scalar => {
            if let Some(text) = scalar_text(scalar) {
                out.insert(prefix.to_string(), text);
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Active-locale catalog with a default-locale fallback
#[derive(Debug, Clone)]
pub struct Catalog {
    active: LocaleCatalog,
    default: Option<LocaleCatalog>,
}

impl Catalog {
    pub fn new(active: LocaleCatalog, default: LocaleCatalog) -> Self {
        Catalog {
            active,
            default: Some(default),
        }
    }

    /// A catalog whose active locale is also the default
    pub fn single(catalog: LocaleCatalog) -> Self {
        Catalog {
            active: catalog,
            default: None,
        }
    }

    /// Load `<locale>.yaml` and `<default_locale>.yaml` from `dir`.
    ///
    /// The default locale must exist. A missing active locale is logged
    /// and served entirely from the default.
    pub fn load_dir(
        dir: impl AsRef<Path>,
        locale: &str,
        default_locale: &str,
    ) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let default_path =
            locale_file(dir, default_locale).ok_or_else(|| CatalogError::MissingDefault {
                locale: default_locale.to_string(),
                dir: dir.display().to_string(),
            })?;
        let default = LocaleCatalog::load(default_locale, default_path)?;

        if locale == default_locale {
            return Ok(Catalog::single(default));
        }

        let active = match locale_file(dir, locale) {
            Some(path) => LocaleCatalog::load(locale, path)?,
            None => {
                tracing::warn!(
                    locale,
                    default_locale,
                    dir = %dir.display(),
                    "no catalog for locale, using default"
                );
                LocaleCatalog::empty(locale)
            }
        };

        Ok(Catalog::new(active, default))
    }

    /// The active locale
    pub fn locale(&self) -> &str {
        self.active.locale()
    }

    pub fn default_locale(&self) -> &str {
        self.default.as_ref().unwrap_or(&self.active).locale()
    }
}

impl Translator for Catalog {
    fn lookup(&self, key: &str) -> Option<String> {
        self.active
            .get(key)
            .or_else(|| self.default.as_ref().and_then(|d| d.get(key)))
            .map(str::to_string)
    }

    fn is_available(&self) -> bool {
        !self.active.is_empty() || self.default.as_ref().map_or(false, |d| !d.is_empty())
    }
}

/// `<dir>/<locale>.yaml`, or `.yml`, if either exists
fn locale_file(dir: &Path, locale: &str) -> Option<PathBuf> {
    ["yaml", "yml"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", locale, ext)))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_format() {
        let yaml = r#"
error:
  general: "Something went wrong"
  file:
    not-found: "File {{ filename }} not found"
"#;

        let catalog = LocaleCatalog::from_yaml("en", yaml).unwrap();
        assert_eq!(catalog.get("error.general"), Some("Something went wrong"));
        assert_eq!(
            catalog.get("error.file.not-found"),
            Some("File {{ filename }} not found")
        );
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_flat_and_mixed_format() {
        let yaml = r#"
error.general: "Flat"
error:
  code:
    404: "Numbered"
  enabled: true
"#;

        let catalog = LocaleCatalog::from_yaml("en", yaml).unwrap();
        assert_eq!(catalog.get("error.general"), Some("Flat"));
        assert_eq!(catalog.get("error.code.404"), Some("Numbered"));
        assert_eq!(catalog.get("error.enabled"), Some("true"));
    }

    #[test]
    fn test_skips_lists_and_nulls() {
        let yaml = r#"
error:
  list: [a, b]
  nothing: ~
  empty: ""
"#;

        let catalog = LocaleCatalog::from_yaml("en", yaml).unwrap();
        assert_eq!(catalog.get("error.list"), None);
        assert_eq!(catalog.get("error.nothing"), None);
        assert_eq!(catalog.get("error.empty"), None);
    }

    #[test]
    fn test_empty_document() {
        let catalog = LocaleCatalog::from_yaml("en", "").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_rejects_non_mapping() {
        let err = LocaleCatalog::from_yaml("en", "- just\n- a list\n").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_default_locale_fallback() {
        let active = LocaleCatalog::from_yaml("pt", "error.a: \"A pt\"\nerror.b: \"\"").unwrap();
        let default =
            LocaleCatalog::from_yaml("en", "error.a: \"A en\"\nerror.b: \"B en\"").unwrap();
        let catalog = Catalog::new(active, default);

        assert_eq!(catalog.lookup("error.a").as_deref(), Some("A pt"));
        assert_eq!(catalog.lookup("error.b").as_deref(), Some("B en"));
        assert_eq!(catalog.lookup("error.c"), None);
        assert_eq!(catalog.locale(), "pt");
        assert_eq!(catalog.default_locale(), "en");
    }

    #[test]
    fn test_empty_catalog_is_unavailable() {
        let catalog = Catalog::single(LocaleCatalog::empty("en"));
        assert!(!catalog.is_available());
        assert_eq!(catalog.default_locale(), "en");
    }
}
