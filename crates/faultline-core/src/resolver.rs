//! Message resolution.
//!
//! A fault's text comes from the first step of this waterfall that
//! produces something:
//!
//! 1. the translation of the caller's key
//! 2. the caller's fallback text
//! 3. the translation of the variant's default key
//! 4. the variant's static fallback
//!
//! Translation steps are skipped when `translate` is off or no translator
//! is available. The chosen text is then rendered against the fault data.
//! A raw message bypasses the waterfall entirely.

use crate::context::FaultContext;
use crate::key;
use crate::template::FALLBACK_MARKER;
use crate::variant::Variant;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Substitution values and supplementary details
pub type Data = Map<String, Value>;

/// A prior error this fault was raised from
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// Structured construction arguments
#[derive(Debug, Clone, Default)]
pub struct FaultSpec {
    pub key: Option<String>,
    /// Defaults to `true` when unset
    pub translate: Option<bool>,
    pub fallback: Option<String>,
    pub data: Data,
    pub http_code: Option<u16>,
    pub details: Data,
    pub cause: Option<Cause>,
}

impl FaultSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn translate(mut self, translate: bool) -> Self {
        self.translate = Some(translate);
        self
    }

    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn data(mut self, data: Data) -> Self {
        self.data = data;
        self
    }

    /// Add one substitution value
    pub fn datum(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn http_code(mut self, code: u16) -> Self {
        self.http_code = Some(code);
        self
    }

    pub fn details(mut self, details: Data) -> Self {
        self.details = details;
        self
    }

    /// Add one supplementary detail
    pub fn detail(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(name.into(), value.into());
        self
    }

    pub fn cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Attach a cause that is already shared
    pub fn shared_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    fn explicit_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }
}

/// What a fault is constructed from
#[derive(Debug, Clone)]
pub enum FaultArgs {
    /// Final text, used verbatim
    Message(String),
    Spec(FaultSpec),
}

impl From<&str> for FaultArgs {
    fn from(message: &str) -> Self {
        FaultArgs::Message(message.to_string())
    }
}

impl From<String> for FaultArgs {
    fn from(message: String) -> Self {
        FaultArgs::Message(message)
    }
}

impl From<FaultSpec> for FaultArgs {
    fn from(spec: FaultSpec) -> Self {
        FaultArgs::Spec(spec)
    }
}

/// Which waterfall step produced the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    Raw,
    Translation,
    Fallback,
    DefaultTranslation,
    DefaultFallback,
}

impl fmt::Display for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageSource::Raw => "raw",
            MessageSource::Translation => "translation",
            MessageSource::Fallback => "fallback",
            MessageSource::DefaultTranslation => "default_translation",
            MessageSource::DefaultFallback => "default_fallback",
        };
        f.write_str(name)
    }
}

/// Outcome of message resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub message: String,
    pub is_translated: bool,
    pub source: MessageSource,
}

/// The normalized key a fault carries: the caller's key when given,
/// otherwise the variant default.
pub fn resolve_key(args: &FaultArgs, variant: &Variant) -> String {
    let raw = match args {
        FaultArgs::Spec(spec) => spec.explicit_key().unwrap_or(variant.key),
        FaultArgs::Message(_) => variant.key,
    };
    key::normalize(raw)
}

/// Run the waterfall and render the result against `data`.
pub fn resolve(args: &FaultArgs, variant: &Variant, data: &Data, ctx: &FaultContext) -> Resolution {
    match args {
        FaultArgs::Message(message) if !message.is_empty() => Resolution {
            message: message.clone(),
            is_translated: false,
            source: MessageSource::Raw,
        },
        FaultArgs::Message(_) => resolve_spec(&FaultSpec::default(), variant, data, ctx),
        FaultArgs::Spec(spec) => resolve_spec(spec, variant, data, ctx),
    }
}

fn resolve_spec(
    spec: &FaultSpec,
    variant: &Variant,
    data: &Data,
    ctx: &FaultContext,
) -> Resolution {
    let translator = if spec.translate.unwrap_or(true) {
        ctx.localization()
    } else {
        None
    };
    let lookup = |raw: &str| {
        translator
            .and_then(|t| t.lookup(&key::normalize(raw)))
            .filter(|template| !template.is_empty())
    };

    let (template, is_translated, source) =
        if let Some(found) = spec.explicit_key().and_then(|k| lookup(k)) {
            (found, true, MessageSource::Translation)
        } else if let Some(fallback) = spec.fallback.as_deref().filter(|f| !f.is_empty()) {
            (fallback.to_string(), false, MessageSource::Fallback)
        } else if let Some(found) = lookup(variant.key) {
            (found, true, MessageSource::DefaultTranslation)
        } else {
            (variant.fallback.to_string(), false, MessageSource::DefaultFallback)
        };

    let mut message = ctx.engine.render(&template, data, FALLBACK_MARKER);
    if message.is_empty() {
        message = if variant.fallback.is_empty() {
            key::normalize(variant.key)
        } else {
            variant.fallback.to_string()
        };
    }

    tracing::debug!(
        variant = variant.name,
        key = spec.explicit_key().unwrap_or(variant.key),
        %source,
        translated = is_translated,
        "resolved fault message"
    );

    Resolution {
        message,
        is_translated,
        source,
    }
}

/// Overlay `overrides` onto `defaults`, overrides winning per key
pub fn merge(mut defaults: Data, overrides: &Data) -> Data {
    for (name, value) in overrides {
        defaults.insert(name.clone(), value.clone());
    }
    defaults
}
