//! Error types for DTDL model resolution.
//!
//! Every failure mode carries its own tagged variant so the orchestrator can
//! decide per kind whether to abort a batch or degrade a single document.

use std::fmt;

use thiserror::Error;

/// Main error type for the DTDL resolution engine.
#[derive(Error, Debug)]
pub enum DtdlError {
    /// The document source could not be loaded or was not valid JSON.
    /// Fatal for the whole call.
    #[error("failed to load DTDL document from '{location}': {reason}")]
    Load { location: String, reason: String },

    /// A root model id is required and must be non-empty.
    #[error("model id must not be empty")]
    EmptyModelId,

    /// The requested root model id is not present in the loaded batch.
    /// Distinct from an empty result map.
    #[error("no DTDL model with the id '{model_id}' is present in the loaded batch")]
    ModelNotFound { model_id: String },

    /// A document lacks the mandatory `contents` array. Fatal for that one
    /// document only; the orchestrator degrades it to a parsing-error
    /// container instead of aborting the batch.
    #[error("DTDL document '{model_id}' has no 'contents' array")]
    Structural { model_id: String },

    /// A component element references an interface id that no document in
    /// the batch declares.
    #[error("component '{component}' references the interface '{referenced}', which is not present in the batch")]
    Reference {
        component: String,
        referenced: String,
    },

    /// The batch failed DTDL grammar validation.
    #[error("DTDL validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationMessage>),
}

/// One grammar-validation finding: the id of the document it concerns (when
/// the document declares one) plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationMessage {
    pub primary_id: Option<String>,
    pub message: String,
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.primary_id {
            Some(id) => write!(f, "{}: {}", id, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
