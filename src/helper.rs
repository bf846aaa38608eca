//! Batch Orchestrator
//!
//! The public entry points of the engine. One call loads the raw document(s)
//! from a source, normalizes single-document input into a uniform batch,
//! validates the whole batch in one pass, drives the container builder and
//! component resolver over every document, and finally restricts the result
//! to the dependency closure of the requested root.
//!
//! All state — the accumulator, the loaded batch, the random generator — is
//! scoped to one invocation; nothing is cached across calls.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing::{debug, warn};

use crate::builder::{CommandMap, ModelMap};
use crate::content;
use crate::error::DtdlError;
use crate::filter;
use crate::loader;
use crate::resolver;
use crate::validation;

/// Resolve a root model id against a document source into the filtered
/// container map: the root plus every interface transitively reachable from
/// it through component references, each with synthesized sample data or
/// recorded parsing errors.
///
/// Errors: [`DtdlError::EmptyModelId`] for a blank root id,
/// [`DtdlError::Load`] when the source cannot be loaded, and
/// [`DtdlError::ModelNotFound`] when the batch does not declare the root.
pub async fn resolve_model_and_content(
    model_id: &str,
    model_source: &str,
) -> Result<ModelMap, DtdlError> {
    if model_id.trim().is_empty() {
        return Err(DtdlError::EmptyModelId);
    }

    let raw = loader::load_model(model_source).await?;
    let batch = loader::normalize_batch(raw);
    let mut rng = StdRng::from_entropy();

    let all = parse_and_build(&batch, &mut rng);
    filter::filter_reachable(&all, model_id).ok_or_else(|| DtdlError::ModelNotFound {
        model_id: model_id.to_string(),
    })
}

/// Extract just the command set for a root model id: the same loading,
/// validation and component recursion as [`resolve_model_and_content`], but
/// each entry carries only synthesized commands. Entries that end up with
/// neither commands nor parsing errors are dropped from the final map.
pub async fn resolve_commands(
    model_id: &str,
    model_source: &str,
) -> Result<CommandMap, DtdlError> {
    if model_id.trim().is_empty() {
        return Err(DtdlError::EmptyModelId);
    }

    let raw = loader::load_model(model_source).await?;
    let batch = loader::normalize_batch(raw);
    let mut rng = StdRng::from_entropy();

    let all = parse_and_build_commands(&batch, &mut rng);
    let mut filtered =
        filter::filter_reachable(&all, model_id).ok_or_else(|| DtdlError::ModelNotFound {
            model_id: model_id.to_string(),
        })?;

    filtered.retain(|_, container| {
        container.commands.is_some() || container.parsing_errors.is_some()
    });
    Ok(filtered)
}

/// Resolve an already-loaded batch into the full, unfiltered container map.
///
/// Exposed for callers that hold a parsed batch (simulation hosts typically
/// load models once and resolve several roots against them). Documents with
/// validation findings degrade to parsing-error containers; well-formed
/// siblings are unaffected.
pub fn parse_and_build(batch: &[Value], rng: &mut StdRng) -> ModelMap {
    let findings = validation::validate_batch(batch);
    let mut acc = ModelMap::new();

    for doc in batch {
        let Some(model_id) = content::model_id_of(doc) else {
            warn!("skipping document without '@id'");
            continue;
        };
        let key = content::canonical_model_id(model_id);

        resolver::resolve_components(batch, doc, &mut acc, rng, &findings);

        if !acc.contains_key(&key) {
            let container = resolver::build_or_degrade(doc, rng, &findings);
            acc.insert(key, container);
        }
    }

    debug!(models = acc.len(), "batch resolution complete");
    acc
}

/// Command-extraction sibling of [`parse_and_build`].
pub fn parse_and_build_commands(batch: &[Value], rng: &mut StdRng) -> CommandMap {
    let findings = validation::validate_batch(batch);
    let mut acc = CommandMap::new();

    for doc in batch {
        let Some(model_id) = content::model_id_of(doc) else {
            warn!("skipping document without '@id'");
            continue;
        };
        let key = content::canonical_model_id(model_id);

        resolver::resolve_component_commands(batch, doc, &mut acc, rng, &findings);

        if !acc.contains_key(&key) {
            let container = resolver::build_commands_or_degrade(doc, rng, &findings);
            acc.insert(key, container);
        }
    }

    debug!(models = acc.len(), "batch command extraction complete");
    acc
}
