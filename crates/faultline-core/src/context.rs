//! Construction context: the collaborators a fault is resolved against.
//!
//! Construction reads nothing ambient. Callers either pass a context
//! explicitly or use the process-wide default, which can be installed
//! once at startup.

use crate::template::{HandlebarsEngine, TemplateEngine};
use crate::translate::{Environment, Translator};
use once_cell::sync::{Lazy, OnceCell};
use std::fmt;
use std::sync::Arc;

static GLOBAL: OnceCell<FaultContext> = OnceCell::new();
static FALLBACK: Lazy<FaultContext> = Lazy::new(FaultContext::new);

#[derive(Clone)]
pub struct FaultContext {
    pub translator: Option<Arc<dyn Translator>>,
    pub engine: Arc<dyn TemplateEngine>,
    pub document_root: Option<String>,
}

impl FaultContext {
    /// No translator, Handlebars engine, no document root
    pub fn new() -> Self {
        Self {
            translator: None,
            engine: Arc::new(HandlebarsEngine::new()),
            document_root: None,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_document_root(mut self, root: impl Into<String>) -> Self {
        let root = root.into();
        self.document_root = (!root.is_empty()).then_some(root);
        self
    }

    /// Take the document root from an environment, if it has one
    pub fn with_environment(mut self, env: &dyn Environment) -> Self {
        if let Some(root) = env.document_root() {
            self.document_root = Some(root);
        }
        self
    }

    /// The translator, when present and initialized
    pub fn localization(&self) -> Option<&dyn Translator> {
        self.translator
            .as_deref()
            .filter(|translator| translator.is_available())
    }

    /// Install the process-wide default. Returns the rejected context if
    /// one was already installed.
    pub fn install(self) -> Result<(), FaultContext> {
        GLOBAL.set(self)
    }

    /// The installed process-wide context, or a bare one
    pub fn global() -> &'static FaultContext {
        GLOBAL.get().unwrap_or_else(|| Lazy::force(&FALLBACK))
    }
}

impl Default for FaultContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FaultContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultContext")
            .field("localization", &self.localization().is_some())
            .field("document_root", &self.document_root)
            .finish()
    }
}
