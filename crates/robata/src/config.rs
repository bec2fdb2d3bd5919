//! Run configuration for the extraction pipeline.
//!
//! The configuration is an explicit immutable value: the dispatcher clones
//! it into every worker at spawn time, so no worker ever observes another
//! worker's mutations and both start strategies behave identically.

use std::path::PathBuf;

use crate::error::ExtractError;

/// How worker tasks are launched by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMethod {
    /// Workers run as tasks on the ambient tokio runtime, sharing its
    /// threads the way forked children share parent state.
    #[default]
    Fork,

    /// Each worker runs on a dedicated blocking thread with its own
    /// current-thread runtime, isolated from the ambient runtime the way
    /// freshly spawned processes are isolated from their parent.
    Spawn,
}

/// Immutable configuration for one extraction run.
///
/// Every worker receives its own clone; mutating a worker's copy after
/// launch has no effect on its siblings.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Number of parallel workers, one per accelerator device. Must be
    /// positive and no greater than the number of visible devices.
    pub num_workers: usize,

    /// Samples per batch. Must be positive; the final batch of a dataset
    /// may be smaller.
    pub batch_size: usize,

    /// Identifier of the encoder model to load from the provider's catalog.
    pub model_name: String,

    /// Root directory handed to the dataset provider.
    pub data_dir: PathBuf,

    /// How worker tasks are launched.
    pub start_method: StartMethod,

    /// Optional iteration cutoff: each worker stops after this many
    /// batches. Stopping early is normal termination, not an error.
    pub max_batches: Option<usize>,

    /// When set, each batch additionally runs the model's joint forward
    /// pass between the input and conditioning images and logs the
    /// resulting similarity logits.
    pub compute_similarity: bool,
}

impl ExtractionConfig {
    /// Creates a configuration with single-worker defaults for the given
    /// model and data directory.
    pub fn new(model_name: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            num_workers: 1,
            batch_size: 32,
            model_name: model_name.into(),
            data_dir: data_dir.into(),
            start_method: StartMethod::default(),
            max_batches: None,
            compute_similarity: false,
        }
    }

    /// Validates the configuration. Called by the dispatcher before any
    /// model load or worker spawn.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.num_workers == 0 {
            return Err(ExtractError::Config("num_workers must be positive".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ExtractError::Config("batch_size must be positive".to_string()));
        }
        if self.model_name.is_empty() {
            return Err(ExtractError::Config("model_name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = ExtractionConfig::new("vit-base", "/tmp/pairs");
        assert!(config.validate().is_ok());
        assert_eq!(config.num_workers, 1);
        assert_eq!(config.start_method, StartMethod::Fork);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = ExtractionConfig::new("vit-base", "/tmp/pairs");
        config.num_workers = 0;
        assert!(matches!(config.validate(), Err(ExtractError::Config(_))));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut config = ExtractionConfig::new("vit-base", "/tmp/pairs");
        config.batch_size = 0;
        assert!(matches!(config.validate(), Err(ExtractError::Config(_))));
    }

    #[test]
    fn test_empty_model_name_rejected() {
        let config = ExtractionConfig::new("", "/tmp/pairs");
        assert!(matches!(config.validate(), Err(ExtractError::Config(_))));
    }

    #[test]
    fn test_clones_are_independent() {
        let config = ExtractionConfig::new("vit-base", "/tmp/pairs");
        let mut copy = config.clone();
        copy.batch_size = 1;
        assert_eq!(config.batch_size, 32);
    }
}
