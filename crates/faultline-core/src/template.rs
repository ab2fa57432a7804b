//! Placeholder substitution for fault messages.
//!
//! Messages are Handlebars templates (`File {{ filename }} not found`).
//! Every simple reference (`{{ name }}`, `{{ user.name }}`, `{{ @index }}`)
//! is resolved against the data before Handlebars runs and handed over as
//! an opaque slot, so a missing value always renders as the fallback marker
//! and a data key never collides with a helper of the same name. Block
//! helpers and helper calls with arguments still see the caller's data.
//! Rendering never fails: a template Handlebars cannot parse is
//! substituted reference by reference instead.

use handlebars::Handlebars;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use thiserror::Error;

/// Marker written in place of a missing placeholder value
pub const FALLBACK_MARKER: &str = "-";

lazy_static! {
    /// Single-token `{{ path }}` references, keeping whitespace control.
    /// Blocks, partials, comments and calls with arguments do not match.
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{(~?)\s*([^\s{}~#/^!>&*][^\s{}~]*)\s*(~?)\}\}").unwrap();
}

/// Keywords that look like references but are template syntax
const RESERVED: &[&str] = &["else"];

/// Context name of the n-th resolved reference
const SLOT_PREFIX: &str = "faultline_slot_";

/// Renders a message template against substitution data
pub trait TemplateEngine: Send + Sync {
    /// Render `template`, writing `fallback` for every referenced value
    /// that is missing from `data`.
    fn render(&self, template: &str, data: &Map<String, Value>, fallback: &str) -> String;
}

/// Errors raised by the Handlebars pass before falling back
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Default engine backed by Handlebars
pub struct HandlebarsEngine {
    handlebars: Handlebars<'static>,
}

impl HandlebarsEngine {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // References are resolved up front; blocks may still probe data
        handlebars.set_strict_mode(false);
        // Messages are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        HandlebarsEngine { handlebars }
    }

    /// Render through Handlebars only, surfacing template errors
    pub fn try_render(
        &self,
        template: &str,
        data: &Map<String, Value>,
        fallback: &str,
    ) -> Result<String, RenderError> {
        let mut context = data.clone();
        let mut slots = 0usize;

        let pinned = PLACEHOLDER.replace_all(template, |caps: &Captures| {
            let path = &caps[2];
            if RESERVED.contains(&path) {
                return caps[0].to_string();
            }
            let slot = format!("{}{}", SLOT_PREFIX, slots);
            slots += 1;
            context.insert(slot.clone(), Value::String(resolve(data, path, fallback)));
            format!("{{{{{}{}{}}}}}", &caps[1], slot, &caps[3])
        });

        let rendered = self
            .handlebars
            .render_template(&pinned, &Value::Object(context))?;
        Ok(rendered)
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn render(&self, template: &str, data: &Map<String, Value>, fallback: &str) -> String {
        match self.try_render(template, data, fallback) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::debug!(error = %e, "handlebars rejected template, substituting directly");
                substitute(template, data, fallback)
            }
        }
    }
}

/// Replace single-token `{{ path }}` references without Handlebars.
pub fn substitute(template: &str, data: &Map<String, Value>, fallback: &str) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let path = &caps[2];
            if RESERVED.contains(&path) {
                caps[0].to_string()
            } else {
                resolve(data, path, fallback)
            }
        })
        .into_owned()
}

/// Display string for `path`, or `fallback` when it does not resolve
fn resolve(data: &Map<String, Value>, path: &str, fallback: &str) -> String {
    lookup(data, path)
        .and_then(display_value)
        .unwrap_or_else(|| fallback.to_string())
}

/// A flat key wins over a nested path of the same spelling
fn lookup<'a>(data: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(path) {
        return Some(value);
    }

    let mut segments = path.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Display form of a scalar; `None` for null, arrays and objects
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
