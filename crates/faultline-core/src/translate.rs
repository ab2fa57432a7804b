//! Collaborator seams: translation lookup and process environment.

use std::collections::HashMap;

/// Looks up localized message templates by fully-qualified key
pub trait Translator: Send + Sync {
    /// Template for `key` in the active locale, falling back to the
    /// default locale. `None` when neither has it.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Whether the catalog is initialized and usable
    fn is_available(&self) -> bool {
        true
    }
}

/// Source of process-level settings consulted at construction
pub trait Environment {
    fn document_root(&self) -> Option<String>;

    /// A named setting such as `LANG`; `None` when unset
    fn var(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Reads settings from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn document_root(&self) -> Option<String> {
        self.var("DOCUMENT_ROOT")
    }

    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}

/// In-memory translator with an active and a default locale
#[derive(Debug, Clone, Default)]
pub struct MemoryTranslator {
    active: HashMap<String, String>,
    default: HashMap<String, String>,
}

impl MemoryTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template to the active locale
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.active.insert(key.into(), template.into());
        self
    }

    /// Add a template to the default locale
    pub fn with_default(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.default.insert(key.into(), template.into());
        self
    }
}

impl Translator for MemoryTranslator {
    fn lookup(&self, key: &str) -> Option<String> {
        [&self.active, &self.default]
            .into_iter()
            .filter_map(|locale| locale.get(key))
            .find(|t| !t.is_empty())
            .cloned()
    }
}
