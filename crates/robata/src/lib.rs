//! # Robata
//!
//! A **ro**bust **bat**ched feature-extraction pipeline for running frozen
//! image/text encoders over large paired-image datasets, sharded across a
//! pool of parallel workers with one accelerator device per worker.
//!
//! ## Overview
//!
//! This library provides the orchestration layer for bulk feature
//! extraction: it loads a model once, builds the dataset exactly once,
//! launches a fixed-size worker pool, and drives each worker's disjoint
//! shard of batches through a prefetching per-device loader into a
//! forward-only inference loop.
//!
//! Key components include:
//!
//! - A tensor abstraction layer supporting various backends
//! - A worker pool dispatcher with all-or-nothing failure semantics
//! - A serialized dataset constructor shared by all workers
//! - A per-device batch loader that overlaps transfer with compute
//!
//! ## Architecture
//!
//! ### Assumptions
//!
//! Regardless of backend used, robata reserves the `0th` tensor dimension
//! as the batch dimension; samples fill in the remaining dimensions.
//!
//! ### Backend Traits
//!
//! The [`backend::Backend`] and [`backend::Unsqueezable`] traits define the
//! interface any tensor implementation must satisfy. This keeps the batching
//! and device-transfer logic independent of the specific tensor library.
//!
//! ### External Collaborators
//!
//! The encoder model ([`model::Encoder`]), its provider and catalog
//! ([`model::ModelProvider`]), the tokenizer ([`model::Tokenizer`]), and the
//! dataset enumeration ([`dataset::DatasetProvider`]) are consumed through
//! traits, never reimplemented here. The pool treats the loaded model as an
//! immutable shared handle: workers read it, nobody mutates it.
//!
//! ## Failure Semantics
//!
//! There are no retries anywhere in this pipeline. Configuration, model
//! load, and device binding are validated before any worker spawns; a
//! dataset-construction failure is broadcast to every waiting worker; a
//! failing or panicking worker aborts its siblings and surfaces as a
//! pool-level error.
//!
//! ## Features
//!
//! - **candle** - Enables the candle tensor backend


mod tensor;

pub mod backend;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod model;
pub mod pool;

/// Constants for client reference
pub use tensor::constant;

pub use config::{ExtractionConfig, StartMethod};
pub use error::ExtractError;
pub use pool::{PoolReport, WorkerPool, WorkerReport};
