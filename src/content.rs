//! Accessors over raw DTDL JSON values.
//!
//! DTDL allows two encodings for a content element's `@type`: a bare string
//! (`"@type": "Telemetry"`) or an array whose first element is the primary
//! type followed by semantic annotations (`"@type": ["Telemetry", "Units"]`).
//! Every type check in the engine goes through [`primary_type`] so both
//! encodings classify identically.

use serde_json::Value;

/// Extract the primary type name of a content element, tolerating both the
/// bare-string and annotated-array encodings.
pub fn primary_type(element: &Value) -> Option<&str> {
    match element.get("@type")? {
        Value::String(tag) => Some(tag),
        Value::Array(tags) => tags.first().and_then(Value::as_str),
        _ => None,
    }
}

/// Case-insensitive primary-type check.
pub fn has_type(element: &Value, kind: &str) -> bool {
    primary_type(element).is_some_and(|tag| tag.eq_ignore_ascii_case(kind))
}

/// Canonical form of a model id. Ids are canonicalized once at ingestion;
/// map keys and all lookups use this form, containers keep the source
/// spelling.
pub fn canonical_model_id(model_id: &str) -> String {
    model_id.trim().to_ascii_lowercase()
}

/// The `@id` of an interface document, as spelled in the source.
pub fn model_id_of(document: &Value) -> Option<&str> {
    document.get("@id")?.as_str()
}

/// The `contents` array of an interface document.
pub fn contents_of(document: &Value) -> Option<&Vec<Value>> {
    document.get("contents")?.as_array()
}

/// The `name` of a content element (or of an object-schema field).
pub fn name_of(element: &Value) -> Option<&str> {
    element.get("name")?.as_str()
}

/// For a Component element, the referenced interface's id (its `schema`
/// field, which DTDL reuses as an interface reference).
pub fn component_schema_ref(element: &Value) -> Option<&str> {
    element.get("schema")?.as_str()
}

/// Whether a property element is cloud-settable. Tolerates a boolean or a
/// string `"true"`/`"false"`, both of which appear in the wild.
pub fn is_writable(element: &Value) -> bool {
    match element.get("writable") {
        Some(Value::Bool(writable)) => *writable,
        Some(Value::String(writable)) => writable.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
