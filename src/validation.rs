//! Batch grammar validation.
//!
//! One validation call covers the whole batch: each document is checked
//! against an embedded JSON Schema for DTDL v2 interfaces, and duplicate ids
//! are detected across documents. Findings are keyed per canonical document
//! id so the orchestrator can degrade exactly the offending documents while
//! their siblings keep resolving.
//!
//! Dangling component references are deliberately not reported here: the
//! component resolver records those on the referenced sub-model's container,
//! which keeps the referencing document's own data usable.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use serde_json::Value;

use crate::content;
use crate::error::{DtdlError, ValidationMessage};

/// Validation findings keyed by canonical document id. Documents with no
/// `@id` are keyed under the empty string.
pub type ValidationFindings = BTreeMap<String, Vec<ValidationMessage>>;

/// Structural grammar for one DTDL v2 interface document. Kept intentionally
/// permissive on fields the engine does not consume.
const DTDL_INTERFACE_SCHEMA: &str = r##"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["@id", "@type"],
    "properties": {
        "@id": {
            "type": "string",
            "pattern": "^dtmi:[A-Za-z0-9_:]+;[0-9]+$"
        },
        "@type": {
            "oneOf": [
                { "type": "string" },
                { "type": "array", "items": { "type": "string" }, "minItems": 1 }
            ]
        },
        "@context": {
            "oneOf": [
                { "type": "string" },
                { "type": "array", "items": { "type": "string" } }
            ]
        },
        "contents": {
            "type": "array",
            "items": {
                "type": "object",
                "required": ["@type", "name"],
                "properties": {
                    "@type": {
                        "oneOf": [
                            { "type": "string" },
                            { "type": "array", "items": { "type": "string" }, "minItems": 1 }
                        ]
                    },
                    "name": {
                        "type": "string",
                        "pattern": "^[A-Za-z][A-Za-z0-9_]*$"
                    },
                    "writable": { "type": ["boolean", "string"] }
                }
            }
        }
    }
}"##;

static INTERFACE_VALIDATOR: OnceLock<jsonschema::Validator> = OnceLock::new();

fn interface_validator() -> &'static jsonschema::Validator {
    INTERFACE_VALIDATOR.get_or_init(|| {
        let schema: Value = serde_json::from_str(DTDL_INTERFACE_SCHEMA)
            .expect("embedded DTDL interface schema is well-formed JSON");
        jsonschema::validator_for(&schema).expect("embedded DTDL interface schema compiles")
    })
}

/// Validate a whole batch in one call.
///
/// Returns per-document findings; an empty map means the batch is clean.
pub fn validate_batch(batch: &[Value]) -> ValidationFindings {
    let mut findings = ValidationFindings::new();
    let mut seen_ids = BTreeSet::new();

    for doc in batch {
        let model_id = content::model_id_of(doc);
        let key = model_id.map(content::canonical_model_id).unwrap_or_default();

        let mut messages: Vec<ValidationMessage> = interface_validator()
            .iter_errors(doc)
            .map(|error| ValidationMessage {
                primary_id: model_id.map(str::to_string),
                message: format!("{}: {}", error.instance_path, error),
            })
            .collect();

        if model_id.is_none() {
            messages.push(ValidationMessage {
                primary_id: None,
                message: "document declares no '@id'".to_string(),
            });
        } else if !seen_ids.insert(key.clone()) {
            messages.push(ValidationMessage {
                primary_id: model_id.map(str::to_string),
                message: format!("duplicate model id '{key}' in batch"),
            });
        }

        if !messages.is_empty() {
            findings.entry(key).or_default().extend(messages);
        }
    }

    findings
}

/// Convenience wrapper turning any finding into a single tagged error.
pub fn ensure_valid(batch: &[Value]) -> Result<(), DtdlError> {
    let findings = validate_batch(batch);
    if findings.is_empty() {
        return Ok(());
    }

    Err(DtdlError::Validation(
        findings.into_values().flatten().collect(),
    ))
}
