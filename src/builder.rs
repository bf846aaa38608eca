//! Container Builder
//!
//! Turns one DTDL interface document into a result container: the interface's
//! identity, the raw document, and either synthesized sample data or the
//! parsing errors that prevented synthesis.
//!
//! Categories are modelled as `Option<Vec<_>>` and a category with zero
//! matching elements is `None`, never an empty vector. Callers test for
//! presence to decide whether to advertise a category at all, so "no
//! telemetries" and "telemetries absent" must stay distinguishable.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use serde::Serialize;
use serde_json::Value;

use crate::classifier;
use crate::content;
use crate::error::DtdlError;
use crate::synthesizer::{self, SynthesizedEntry};

/// Result map for full resolution, keyed by canonical model id.
pub type ModelMap = BTreeMap<String, ModelContainer>;

/// Result map for command-only extraction, keyed by canonical model id.
pub type CommandMap = BTreeMap<String, CommandContainer>;

/// Synthesized sample data for one interface. Each category is present only
/// when the source schema declares at least one matching element.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratedData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetries: Option<Vec<SynthesizedEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readable_properties: Option<Vec<SynthesizedEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writable_properties: Option<Vec<SynthesizedEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<SynthesizedCommand>>,
}

/// One synthesized command: the command name plus independently synthesized
/// request and response payloads, either of which the schema may omit.
#[derive(Debug, Clone, Serialize)]
pub struct SynthesizedCommand {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<SynthesizedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<SynthesizedEntry>,
}

/// One interface's resolution outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ModelContainer {
    /// The interface's `@id` as spelled in the source document.
    pub model_id: String,
    /// The raw DTDL document.
    pub dtdl: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsing_errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedData>,
}

impl ModelContainer {
    /// A container for a document that failed validation or resolution:
    /// errors populated, no generated data.
    pub fn with_errors(model_id: impl Into<String>, dtdl: Value, errors: Vec<String>) -> Self {
        Self {
            model_id: model_id.into(),
            dtdl,
            parsing_errors: Some(errors),
            generated: None,
        }
    }
}

/// Command-only resolution outcome, used by command extraction.
#[derive(Debug, Clone, Serialize)]
pub struct CommandContainer {
    pub model_id: String,
    pub dtdl: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsing_errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<SynthesizedCommand>>,
}

impl CommandContainer {
    pub fn with_errors(model_id: impl Into<String>, dtdl: Value, errors: Vec<String>) -> Self {
        Self {
            model_id: model_id.into(),
            dtdl,
            parsing_errors: Some(errors),
            commands: None,
        }
    }
}

/// Access to the raw document backing a result container. The dependency
/// filter walks component references through this seam so it works over both
/// container kinds.
pub trait RawModel {
    fn raw(&self) -> &Value;
}

impl RawModel for ModelContainer {
    fn raw(&self) -> &Value {
        &self.dtdl
    }
}

impl RawModel for CommandContainer {
    fn raw(&self) -> &Value {
        &self.dtdl
    }
}

/// Build the full container for one interface document.
///
/// A missing `contents` array is a hard error for this document; the
/// orchestrator catches it and degrades the document instead of aborting the
/// batch.
pub fn build_model_container(doc: &Value, rng: &mut StdRng) -> Result<ModelContainer, DtdlError> {
    let model_id = content::model_id_of(doc).unwrap_or_default().to_string();
    let contents = content::contents_of(doc).ok_or_else(|| DtdlError::Structural {
        model_id: model_id.clone(),
    })?;

    let classified = classifier::classify(contents);
    let generated = GeneratedData {
        telemetries: synthesize_category(&classified.telemetries, rng),
        readable_properties: synthesize_category(&classified.readable_properties, rng),
        writable_properties: synthesize_category(&classified.writable_properties, rng),
        commands: synthesize_commands(&classified.commands, rng),
    };

    Ok(ModelContainer {
        model_id,
        dtdl: doc.clone(),
        parsing_errors: None,
        generated: Some(generated),
    })
}

/// Build the command-only container for one interface document.
pub fn build_command_container(
    doc: &Value,
    rng: &mut StdRng,
) -> Result<CommandContainer, DtdlError> {
    let model_id = content::model_id_of(doc).unwrap_or_default().to_string();
    let contents = content::contents_of(doc).ok_or_else(|| DtdlError::Structural {
        model_id: model_id.clone(),
    })?;

    let classified = classifier::classify(contents);

    Ok(CommandContainer {
        model_id,
        dtdl: doc.clone(),
        parsing_errors: None,
        commands: synthesize_commands(&classified.commands, rng),
    })
}

fn synthesize_category(elements: &[&Value], rng: &mut StdRng) -> Option<Vec<SynthesizedEntry>> {
    if elements.is_empty() {
        return None;
    }

    Some(
        elements
            .iter()
            .map(|element| {
                synthesizer::synthesize(
                    content::name_of(element).unwrap_or_default(),
                    element.get("schema"),
                    rng,
                )
            })
            .collect(),
    )
}

fn synthesize_commands(elements: &[&Value], rng: &mut StdRng) -> Option<Vec<SynthesizedCommand>> {
    if elements.is_empty() {
        return None;
    }

    Some(
        elements
            .iter()
            .map(|element| SynthesizedCommand {
                name: content::name_of(element).unwrap_or_default().to_string(),
                request: synthesize_command_payload(element.get("request"), rng),
                response: synthesize_command_payload(element.get("response"), rng),
            })
            .collect(),
    )
}

fn synthesize_command_payload(
    payload: Option<&Value>,
    rng: &mut StdRng,
) -> Option<SynthesizedEntry> {
    let payload = payload?;
    Some(synthesizer::synthesize(
        content::name_of(payload).unwrap_or_default(),
        payload.get("schema"),
        rng,
    ))
}
