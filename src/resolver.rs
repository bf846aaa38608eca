//! Component Resolver
//!
//! Walks the component references of one interface, locates each referenced
//! interface elsewhere in the batch, and recursively resolves it into a
//! shared accumulator. Merging is first-writer-wins: an id already present
//! is never replaced, which keeps the aggregate idempotent when the same
//! sub-component is reachable through several paths and lets the recursion
//! terminate on cyclic references.
//!
//! Resolution runs sequentially, one component at a time; that is what makes
//! the merge race-free without a lock.

use rand::rngs::StdRng;
use serde_json::Value;
use tracing::{debug, warn};

use crate::builder::{self, CommandContainer, CommandMap, ModelContainer, ModelMap};
use crate::content;
use crate::error::DtdlError;
use crate::validation::ValidationFindings;

/// Locate the batch document whose canonical id matches `canonical_id`.
pub fn find_document<'a>(batch: &'a [Value], canonical_id: &str) -> Option<&'a Value> {
    batch.iter().find(|doc| {
        content::model_id_of(doc)
            .map(content::canonical_model_id)
            .as_deref()
            == Some(canonical_id)
    })
}

/// Resolve every component of `doc` into `acc`, recursively.
///
/// A lookup failure (the referenced interface is absent from the batch) is
/// recorded as a parsing-error container for the referenced id; sibling
/// components and the parent document keep resolving.
pub fn resolve_components(
    batch: &[Value],
    doc: &Value,
    acc: &mut ModelMap,
    rng: &mut StdRng,
    findings: &ValidationFindings,
) {
    for (key, outcome) in component_lookups(batch, doc, acc) {
        // Recursion below may already have inserted this id.
        if acc.contains_key(&key) {
            continue;
        }
        match outcome {
            Ok(referenced) => {
                let container = build_or_degrade(referenced, rng, findings);
                acc.insert(key.clone(), container);
                resolve_components(batch, referenced, acc, rng, findings);
            }
            Err(error) => {
                let referenced = match &error {
                    DtdlError::Reference { referenced, .. } => referenced.clone(),
                    _ => key.clone(),
                };
                acc.insert(
                    key,
                    ModelContainer::with_errors(referenced, Value::Null, vec![error.to_string()]),
                );
            }
        }
    }
}

/// Command-extraction variant of [`resolve_components`]: same traversal and
/// merge semantics, but the accumulator holds [`CommandContainer`]s.
pub fn resolve_component_commands(
    batch: &[Value],
    doc: &Value,
    acc: &mut CommandMap,
    rng: &mut StdRng,
    findings: &ValidationFindings,
) {
    for (key, outcome) in component_lookups(batch, doc, acc) {
        // Recursion below may already have inserted this id.
        if acc.contains_key(&key) {
            continue;
        }
        match outcome {
            Ok(referenced) => {
                let container = build_commands_or_degrade(referenced, rng, findings);
                acc.insert(key.clone(), container);
                resolve_component_commands(batch, referenced, acc, rng, findings);
            }
            Err(error) => {
                let referenced = match &error {
                    DtdlError::Reference { referenced, .. } => referenced.clone(),
                    _ => key.clone(),
                };
                acc.insert(
                    key,
                    CommandContainer::with_errors(referenced, Value::Null, vec![error.to_string()]),
                );
            }
        }
    }
}

/// Shared traversal: for each component element of `doc` whose id is not yet
/// in the accumulator, yield the canonical key and either the referenced
/// document or the reference error.
fn component_lookups<'a, C>(
    batch: &'a [Value],
    doc: &Value,
    acc: &std::collections::BTreeMap<String, C>,
) -> Vec<(String, Result<&'a Value, DtdlError>)> {
    let Some(contents) = content::contents_of(doc) else {
        return Vec::new();
    };

    let mut lookups = Vec::new();
    for element in contents
        .iter()
        .filter(|element| content::has_type(element, "Component"))
    {
        let component_name = content::name_of(element).unwrap_or("<unnamed>");
        let Some(schema_ref) = content::component_schema_ref(element) else {
            warn!(component = component_name, "component element has no schema reference");
            continue;
        };

        let key = content::canonical_model_id(schema_ref);
        if acc.contains_key(&key) {
            debug!(model_id = %key, "component already resolved, first writer wins");
            continue;
        }

        match find_document(batch, &key) {
            Some(referenced) => lookups.push((key, Ok(referenced))),
            None => {
                let error = DtdlError::Reference {
                    component: component_name.to_string(),
                    referenced: schema_ref.to_string(),
                };
                warn!(%error, "unresolvable component reference");
                lookups.push((key, Err(error)));
            }
        }
    }

    lookups
}

/// Build a full container for `doc`, degrading to a parsing-error container
/// when validation flagged the document or it is structurally broken.
pub(crate) fn build_or_degrade(
    doc: &Value,
    rng: &mut StdRng,
    findings: &ValidationFindings,
) -> ModelContainer {
    let model_id = content::model_id_of(doc).unwrap_or_default().to_string();

    if let Some(messages) = document_findings(&model_id, findings) {
        return ModelContainer::with_errors(model_id, doc.clone(), messages);
    }

    match builder::build_model_container(doc, rng) {
        Ok(container) => container,
        Err(error) => ModelContainer::with_errors(model_id, doc.clone(), vec![error.to_string()]),
    }
}

/// Command-only sibling of [`build_or_degrade`].
pub(crate) fn build_commands_or_degrade(
    doc: &Value,
    rng: &mut StdRng,
    findings: &ValidationFindings,
) -> CommandContainer {
    let model_id = content::model_id_of(doc).unwrap_or_default().to_string();

    if let Some(messages) = document_findings(&model_id, findings) {
        return CommandContainer::with_errors(model_id, doc.clone(), messages);
    }

    match builder::build_command_container(doc, rng) {
        Ok(container) => container,
        Err(error) => CommandContainer::with_errors(model_id, doc.clone(), vec![error.to_string()]),
    }
}

fn document_findings(model_id: &str, findings: &ValidationFindings) -> Option<Vec<String>> {
    let messages = findings.get(&content::canonical_model_id(model_id))?;
    if messages.is_empty() {
        return None;
    }
    Some(messages.iter().map(ToString::to_string).collect())
}
