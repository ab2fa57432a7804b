//! Fault variants and their static defaults.
//!
//! A variant is the category of a fault (not found, validation, ...). It
//! carries the defaults that take part in message resolution when the
//! caller does not supply them. Applications declare their own variants as
//! `const` values next to the built-in ones.

use serde_json::{Map, Value};
use std::fmt;

/// Static configuration attached to a fault category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    /// Type name exposed in serialized output
    pub name: &'static str,
    /// Default key, with or without the `error.` prefix
    pub key: &'static str,
    /// Last-resort message; must not be empty
    pub fallback: &'static str,
    /// Default HTTP status
    pub http_code: u16,
    /// Default substitution data
    pub data: &'static [(&'static str, &'static str)],
    /// Default supplementary details
    pub details: &'static [(&'static str, &'static str)],
}

impl Variant {
    /// Declare a variant with empty default data and details
    pub const fn new(
        name: &'static str,
        key: &'static str,
        fallback: &'static str,
        http_code: u16,
    ) -> Self {
        Variant {
            name,
            key,
            fallback,
            http_code,
            data: &[],
            details: &[],
        }
    }

    /// Replace the default substitution data
    pub const fn with_data(mut self, data: &'static [(&'static str, &'static str)]) -> Self {
        self.data = data;
        self
    }

    /// Replace the default details
    pub const fn with_details(mut self, details: &'static [(&'static str, &'static str)]) -> Self {
        self.details = details;
        self
    }

    pub const GENERAL: Variant = Variant::new(
        "GeneralError",
        "general",
        "An unexpected error occurred.",
        500,
    );

    pub const BAD_REQUEST: Variant = Variant::new(
        "BadRequestError",
        "bad-request",
        "The request could not be understood.",
        400,
    );

    pub const VALIDATION: Variant = Variant::new(
        "ValidationError",
        "validation",
        "The submitted data is invalid.",
        422,
    );

    pub const UNAUTHORIZED: Variant = Variant::new(
        "UnauthorizedError",
        "unauthorized",
        "Authentication is required.",
        401,
    );

    pub const FORBIDDEN: Variant = Variant::new(
        "ForbiddenError",
        "forbidden",
        "You are not allowed to perform this action.",
        403,
    );

    pub const NOT_FOUND: Variant = Variant::new(
        "NotFoundError",
        "not-found",
        "The requested resource was not found.",
        404,
    );

    pub const CONFLICT: Variant = Variant::new(
        "ConflictError",
        "conflict",
        "The request conflicts with the current state.",
        409,
    );

    pub const NOT_IMPLEMENTED: Variant = Variant::new(
        "NotImplementedError",
        "not-implemented",
        "This feature is not implemented.",
        501,
    );

    pub const SERVICE_UNAVAILABLE: Variant = Variant::new(
        "ServiceUnavailableError",
        "service-unavailable",
        "The service is temporarily unavailable.",
        503,
    );

    /// Built-in variants, in declaration order
    pub const BUILTIN: &'static [Variant] = &[
        Variant::GENERAL,
        Variant::BAD_REQUEST,
        Variant::VALIDATION,
        Variant::UNAUTHORIZED,
        Variant::FORBIDDEN,
        Variant::NOT_FOUND,
        Variant::CONFLICT,
        Variant::NOT_IMPLEMENTED,
        Variant::SERVICE_UNAVAILABLE,
    ];

    /// Find a built-in variant by its type name
    pub fn by_name(name: &str) -> Option<&'static Variant> {
        Self::BUILTIN.iter().find(|v| v.name == name)
    }

    /// Default data as a JSON map
    pub fn default_data(&self) -> Map<String, Value> {
        to_map(self.data)
    }

    /// Default details as a JSON map
    pub fn default_details(&self) -> Map<String, Value> {
        to_map(self.details)
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::GENERAL
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn to_map(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}
