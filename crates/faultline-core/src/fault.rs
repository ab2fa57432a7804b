//! The fault record.
//!
//! A [`Fault`] is resolved once, at the call site, and is read-only from
//! then on. [`Fault::to_array`] is its serialized form and the shape every
//! renderer and log sink consumes.

use crate::context::FaultContext;
use crate::path;
use crate::resolver::{self, Cause, Data, FaultArgs, FaultSpec};
use crate::variant::Variant;
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::panic::Location;

/// An immutable, fully-resolved error record
#[derive(Debug, Clone)]
pub struct Fault {
    variant: Variant,
    key: String,
    message: String,
    data: Data,
    details: Data,
    http_code: u16,
    translated: bool,
    file: String,
    line: u32,
    document_root: Option<String>,
    cause: Option<Cause>,
}

/// Serialized form of a fault
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultArray {
    /// Variant type name
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub key: String,
    /// Source file, relative to the document root
    pub file: String,
    pub line: u32,
    pub details: Data,
    /// HTTP status
    pub code: u16,
}

impl Fault {
    /// A general fault with a verbatim message
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::construct(&Variant::GENERAL, FaultArgs::Message(message.into()))
    }

    /// A fault of `variant` with a verbatim message
    #[track_caller]
    pub fn raw(variant: &Variant, message: impl Into<String>) -> Self {
        Self::construct(variant, FaultArgs::Message(message.into()))
    }

    /// A fault of `variant` resolved from structured arguments
    #[track_caller]
    pub fn build(variant: &Variant, spec: FaultSpec) -> Self {
        Self::construct(variant, FaultArgs::Spec(spec))
    }

    /// Construct against the process-wide context
    #[track_caller]
    pub fn construct(variant: &Variant, args: impl Into<FaultArgs>) -> Self {
        Self::construct_in(FaultContext::global(), variant, args)
    }

    /// Construct against an explicit context
    #[track_caller]
    pub fn construct_in(ctx: &FaultContext, variant: &Variant, args: impl Into<FaultArgs>) -> Self {
        let location = Location::caller();
        let args = args.into();

        let (data, details, http_code, cause) = match &args {
            FaultArgs::Spec(spec) => (
                resolver::merge(variant.default_data(), &spec.data),
                resolver::merge(variant.default_details(), &spec.details),
                spec.http_code.unwrap_or(variant.http_code),
                spec.cause.clone(),
            ),
            FaultArgs::Message(_) => (
                variant.default_data(),
                variant.default_details(),
                variant.http_code,
                None,
            ),
        };

        let key = resolver::resolve_key(&args, variant);
        let resolution = resolver::resolve(&args, variant, &data, ctx);

        Fault {
            variant: *variant,
            key,
            message: resolution.message,
            data,
            details,
            http_code,
            translated: resolution.is_translated,
            file: location.file().to_string(),
            line: location.line(),
            document_root: ctx.document_root.clone(),
            cause,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Normalized key, always under `error.`
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The key, read as the fault's discriminant
    pub fn code(&self) -> &str {
        &self.key
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn details(&self) -> &Data {
        &self.details
    }

    pub fn http_code(&self) -> u16 {
        self.http_code
    }

    /// Whether the message came from a translation catalog
    pub fn is_translated(&self) -> bool {
        self.translated
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn type_name(&self) -> &'static str {
        self.variant.name
    }

    /// Whether this fault belongs to `variant`
    pub fn is(&self, variant: &Variant) -> bool {
        self.variant.name == variant.name
    }

    /// Source file as captured at the call site
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Source file with the document root stripped
    pub fn file_relative(&self) -> String {
        path::relativize(&self.file, self.document_root.as_deref())
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// The cause, when it is itself a fault
    pub fn cause_fault(&self) -> Option<&Fault> {
        self.cause()?.downcast_ref::<Fault>()
    }

    /// This fault followed by every error in its causal chain
    pub fn chain(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        std::iter::successors(Some(self as &(dyn Error + 'static)), |&e| e.source())
    }

    pub fn to_array(&self) -> FaultArray {
        FaultArray {
            kind: self.variant.name.to_string(),
            message: self.message.clone(),
            key: self.key.clone(),
            file: self.file_relative(),
            line: self.line,
            details: self.details.clone(),
            code: self.http_code,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

impl Serialize for Fault {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::MemoryTranslator;
    use serde_json::json;
    use std::sync::Arc;

    fn ctx() -> FaultContext {
        FaultContext::new()
            .with_translator(Arc::new(
                MemoryTranslator::new()
                    .with("error.file.not-found", "File {{ filename }} not found"),
            ))
            .with_document_root(env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn test_raw_construction() {
        let fault = Fault::construct_in(&ctx(), &Variant::GENERAL, "disk full");
        assert_eq!(fault.message(), "disk full");
        assert!(!fault.is_translated());
        assert_eq!(fault.http_code(), 500);
        assert_eq!(fault.key(), "error.general");
        assert!(fault.data().is_empty());
    }

    #[test]
    fn test_raw_construction_uses_variant_code() {
        let fault = Fault::construct_in(&ctx(), &Variant::NOT_FOUND, "gone");
        assert_eq!(fault.http_code(), 404);
        assert_eq!(fault.key(), "error.not-found");
    }

    #[test]
    fn test_structured_overrides() {
        let spec = FaultSpec::new()
            .key("file.not-found")
            .datum("filename", "a.txt")
            .http_code(410)
            .detail("retry", false);
        let fault = Fault::construct_in(&ctx(), &Variant::NOT_FOUND, spec);

        assert_eq!(fault.message(), "File a.txt not found");
        assert!(fault.is_translated());
        assert_eq!(fault.http_code(), 410);
        assert_eq!(fault.details().get("retry"), Some(&json!(false)));
        assert_eq!(fault.data().get("filename"), Some(&json!("a.txt")));
        assert_eq!(fault.code(), "error.file.not-found");
    }

    #[test]
    fn test_captures_call_site() {
        let line = line!() + 1;
        let fault = Fault::construct_in(&ctx(), &Variant::GENERAL, "here");
        assert_eq!(fault.line(), line);
        assert!(fault.file().ends_with("fault.rs"));
    }

    #[test]
    fn test_to_array_shape() {
        let spec = FaultSpec::new().detail("id", 7);
        let fault = Fault::construct_in(&ctx(), &Variant::CONFLICT, spec);
        let value = serde_json::to_value(fault.to_array()).unwrap();
        let obj = value.as_object().unwrap();

        let mut fields: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        fields.sort_unstable();
        assert_eq!(fields, ["code", "details", "file", "key", "line", "message", "type"]);

        assert_eq!(obj["type"], json!("ConflictError"));
        assert_eq!(obj["key"], json!(fault.key()));
        assert_eq!(obj["code"], json!(fault.http_code()));
        assert_eq!(obj["details"], json!({ "id": 7 }));
    }

    #[test]
    fn test_serialize_matches_to_array() {
        let fault = Fault::construct_in(&ctx(), &Variant::GENERAL, "x");
        assert_eq!(
            serde_json::to_value(&fault).unwrap(),
            serde_json::to_value(fault.to_array()).unwrap()
        );
    }

    #[test]
    fn test_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let inner =
            Fault::construct_in(&ctx(), &Variant::SERVICE_UNAVAILABLE, FaultSpec::new().cause(io));
        let outer = Fault::construct_in(&ctx(), &Variant::GENERAL, FaultSpec::new().cause(inner));

        let inner = outer.cause_fault().expect("cause should be a fault");
        assert!(inner.is(&Variant::SERVICE_UNAVAILABLE));
        assert!(inner.cause_fault().is_none());

        let messages: Vec<String> = outer.chain().map(|e| e.to_string()).collect();
        assert_eq!(
            messages,
            [
                Variant::GENERAL.fallback,
                Variant::SERVICE_UNAVAILABLE.fallback,
                "socket closed",
            ]
        );
    }

    #[test]
    fn test_display_is_message() {
        let fault = Fault::construct_in(&ctx(), &Variant::GENERAL, "boom");
        assert_eq!(fault.to_string(), "boom");
    }
}
