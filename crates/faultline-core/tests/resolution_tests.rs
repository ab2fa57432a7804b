//! Integration tests for fault construction and message resolution.
//!
//! Each test builds its own context, so nothing here depends on the
//! process-wide default.

use faultline_core::{
    normalize, Fault, FaultContext, FaultSpec, MemoryTranslator, Translator, Variant,
    FALLBACK_MARKER,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn localized() -> FaultContext {
    let catalog = MemoryTranslator::new()
        .with("error.file.not-found", "File {{ filename }} not found")
        .with("error.custom", "Translated custom failure");
    FaultContext::new().with_translator(Arc::new(catalog))
}

fn offline() -> FaultContext {
    FaultContext::new()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_raw_message() {
    let fault = Fault::construct_in(&localized(), &Variant::GENERAL, "disk full");

    assert_eq!(fault.message(), "disk full");
    assert!(!fault.is_translated());
    assert_eq!(fault.http_code(), 500);
}

#[test]
fn test_scenario_translated_key() {
    let fault = Fault::construct_in(
        &localized(),
        &Variant::GENERAL,
        FaultSpec::new().key("file.not-found").datum("filename", "a.txt"),
    );

    assert_eq!(fault.message(), "File a.txt not found");
    assert!(fault.is_translated());
}

#[test]
fn test_scenario_missing_placeholder_value() {
    let spec = FaultSpec::new().key("file.not-found");
    let fault = Fault::construct_in(&localized(), &Variant::GENERAL, spec);

    assert_eq!(fault.message(), "File - not found");
    assert!(fault.is_translated());
}

#[test]
fn test_scenario_untranslated_custom_key() {
    let fault = Fault::construct_in(
        &localized(),
        &Variant::GENERAL,
        FaultSpec::new()
            .key("custom")
            .fallback("Custom failure")
            .translate(false),
    );

    assert_eq!(fault.message(), "Custom failure");
    assert!(!fault.is_translated());
    assert_eq!(fault.key(), "error.custom");
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_untranslated_without_fallback_uses_variant_text() {
    const RATE: Variant =
        Variant::new("RateLimitError", "rate", "Slow down, {{ who }} ({{ limit }}/s)", 429)
            .with_data(&[("limit", "5")]);

    for variant in Variant::BUILTIN.iter().chain([&RATE]) {
        let fault = Fault::construct_in(
            &offline(),
            variant,
            FaultSpec::new().translate(false).datum("who", "bot"),
        );
        let mut data = variant.default_data();
        data.insert("who".into(), json!("bot"));
        let expected = offline().engine.render(variant.fallback, &data, FALLBACK_MARKER);

        assert_eq!(fault.message(), expected, "variant {}", variant);
        assert!(!fault.is_translated());
    }
}

#[test]
fn test_translation_wins_over_fallback() {
    let fault = Fault::construct_in(
        &localized(),
        &Variant::VALIDATION,
        FaultSpec::new().key("custom").fallback("never shown"),
    );

    assert!(fault.is_translated());
    assert_eq!(fault.message(), "Translated custom failure");
    assert_eq!(fault.http_code(), 422);
}

#[test]
fn test_normalize_idempotent() {
    let keys = ["", "x", "error", "error.", "error.x", "errors", "a.error.b", "error.error.y"];
    for key in keys {
        let once = normalize(key);
        assert!(once.starts_with("error."), "{:?} -> {:?}", key, once);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn test_unresolved_placeholder_never_fails() {
    let templates = [
        "{{a}}",
        "start {{ a }} middle {{b}} end",
        "{{#each}} broken {{ a }}",
        "{{ a }}{{ a }}",
    ];
    let engine = offline().engine;
    for template in templates {
        let out = engine.render(template, &Map::new(), FALLBACK_MARKER);
        assert!(out.contains(FALLBACK_MARKER), "{:?} -> {:?}", template, out);
        assert!(!out.contains("{{ a }}"), "{:?} -> {:?}", template, out);
    }
}

#[test]
fn test_dotted_placeholder_missing_uses_marker() {
    let fault = Fault::construct_in(
        &offline(),
        &Variant::GENERAL,
        FaultSpec::new().fallback("User {{ user.name }} failed"),
    );

    assert_eq!(fault.message(), "User - failed");
}

#[test]
fn test_dotted_placeholder_reads_nested_data() {
    let fault = Fault::construct_in(
        &offline(),
        &Variant::GENERAL,
        FaultSpec::new()
            .fallback("User {{ user.name }} failed")
            .datum("user", json!({ "name": "ana" })),
    );

    assert_eq!(fault.message(), "User ana failed");
}

#[test]
fn test_helper_named_placeholders_read_data() {
    let present = Fault::construct_in(
        &offline(),
        &Variant::GENERAL,
        FaultSpec::new().fallback("x {{ log }} y").datum("log", "VALUE"),
    );
    let missing = Fault::construct_in(
        &offline(),
        &Variant::GENERAL,
        FaultSpec::new().fallback("x {{ lookup }} {{ 1st }} y"),
    );

    assert_eq!(present.message(), "x VALUE y");
    assert_eq!(missing.message(), "x - - y");
}

#[test]
fn test_to_array_carries_key_and_code() {
    let faults = [
        Fault::construct_in(&offline(), &Variant::GENERAL, "plain"),
        Fault::construct_in(
            &localized(),
            &Variant::NOT_FOUND,
            FaultSpec::new().key("file.not-found"),
        ),
        Fault::construct_in(&offline(), &Variant::FORBIDDEN, FaultSpec::new().http_code(451)),
    ];

    for fault in &faults {
        let array = fault.to_array();
        assert_eq!(array.key, fault.key());
        assert_eq!(array.code, fault.http_code());
        assert_eq!(array.kind, fault.variant().name);
    }
}

// =============================================================================
// Context behavior
// =============================================================================

struct Uninitialized;

impl Translator for Uninitialized {
    fn lookup(&self, _key: &str) -> Option<String> {
        Some("should not be consulted".into())
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[test]
fn test_unavailable_translator_degrades_to_fallback() {
    let ctx = FaultContext::new().with_translator(Arc::new(Uninitialized));
    let spec = FaultSpec::new().key("x").fallback("offline");
    let fault = Fault::construct_in(&ctx, &Variant::GENERAL, spec);

    assert_eq!(fault.message(), "offline");
    assert!(!fault.is_translated());
}

#[test]
fn test_file_relative_uses_context_root() {
    let root = env!("CARGO_MANIFEST_DIR");
    let ctx = FaultContext::new().with_document_root(root);
    let fault = Fault::construct_in(&ctx, &Variant::GENERAL, "x");

    // Cargo passes either an absolute or a workspace-relative path
    let relative = fault.file_relative();
    assert!(relative.ends_with("resolution_tests.rs"));
    assert!(!relative.starts_with('/'));
    assert_eq!(fault.to_array().file, relative);
}

#[test]
fn test_unmatched_root_keeps_file() {
    let ctx = FaultContext::new().with_document_root("/definitely/not/a/prefix");
    let fault = Fault::construct_in(&ctx, &Variant::GENERAL, "x");

    assert_eq!(fault.file_relative(), fault.file());
}

#[test]
fn test_details_are_serialized_not_rendered() {
    let fault = Fault::construct_in(
        &offline(),
        &Variant::BAD_REQUEST,
        FaultSpec::new()
            .fallback("Field {{ field }} is bad")
            .datum("field", "email")
            .detail("constraints", json!(["format", "length"])),
    );

    assert_eq!(fault.message(), "Field email is bad");
    let value = serde_json::to_value(&fault).unwrap();
    assert_eq!(value["details"]["constraints"], json!(["format", "length"]));
    assert_eq!(value.get("data"), None::<&Value>);
}
