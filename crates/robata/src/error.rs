//! Unified error type for the extraction pipeline.
//!
//! Every failure in this pipeline is fatal: nothing here is retried. The
//! variants mirror the stages of a run: configuration, model load, and
//! device binding fail before any worker spawns; dataset construction
//! failures are broadcast to every waiting worker; worker failures abort
//! the pool.

use thiserror::Error;

/// Top-level error type for the extraction pipeline.
///
/// All pipeline errors surface as this type; external collaborators
/// (model providers, dataset providers, tokenizers) are expected to map
/// their own failures into the matching variant.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The run configuration is invalid (zero workers, zero batch size, ...).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The requested model identifier is not in the provider's catalog.
    #[error("unknown model {identifier:?}; available models: {available:?}")]
    UnknownModel {
        identifier: String,
        available: Vec<String>,
    },

    /// The model is in the catalog but its checkpoint could not be loaded.
    #[error("model checkpoint unavailable: {0}")]
    Checkpoint(String),

    /// More workers were requested than there are visible devices.
    #[error("requested {requested} workers but only {available} devices are visible")]
    DeviceBinding {
        requested: usize,
        available: usize,
    },

    /// Dataset construction failed. Broadcast to every worker blocked on
    /// the serialized constructor, so the message is carried by value.
    #[error("dataset construction failed: {0}")]
    DatasetBuild(String),

    /// A worker returned an error; the rest of the pool was aborted.
    #[error("worker {index} failed")]
    Worker {
        index: usize,
        #[source]
        source: Box<ExtractError>,
    },

    /// A worker panicked; the rest of the pool was aborted.
    #[error("worker {index} panicked")]
    WorkerPanic { index: usize },

    /// A dedicated per-worker runtime could not be built under the
    /// isolated start strategy.
    #[error("worker runtime construction failed: {0}")]
    Runtime(String),

    /// A text input does not fit the tokenizer's context window.
    #[error("text of {actual} tokens exceeds context length {context_length}")]
    ContextOverflow {
        actual: usize,
        context_length: usize,
    },

    /// Filesystem error while scanning for samples or checkpoints.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
