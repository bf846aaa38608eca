//! DTDL model resolution and sample-payload synthesis.
//!
//! This crate ingests Digital Twin Definition Language (DTDL v2) interface
//! documents and produces, per interface, a structural breakdown of its
//! telemetries, properties, commands and components plus a synthetic sample
//! payload usable for simulation and testing.
//!
//! ## Pipeline
//! Load (file or HTTP) -> normalize to a batch -> validate grammar ->
//! classify contents -> synthesize values -> resolve components recursively
//! -> filter to the root's dependency closure.
//!
//! The engine is a pure, stateless, per-call computation: nothing is cached
//! or retained between invocations.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), iot_dtdl::DtdlError> {
//! let models = iot_dtdl::resolve_model_and_content(
//!     "dtmi:com:example:thermostat;1",
//!     "./models/thermostat.json",
//! )
//! .await?;
//!
//! for (id, container) in &models {
//!     if let Some(generated) = &container.generated {
//!         println!("{id}: {:?}", generated.telemetries);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Raw-document accessors shared across the pipeline
pub mod content;

// Pipeline stages
pub mod builder;
pub mod classifier;
pub mod filter;
pub mod loader;
pub mod resolver;
pub mod synthesizer;
pub mod validation;

// Public entry points
pub mod helper;

pub use builder::{
    CommandContainer, CommandMap, GeneratedData, ModelContainer, ModelMap, RawModel,
    SynthesizedCommand,
};
pub use error::{DtdlError, ValidationMessage};
pub use helper::{
    parse_and_build, parse_and_build_commands, resolve_commands, resolve_model_and_content,
};
pub use synthesizer::SynthesizedEntry;
