//! # Dataset Construction
//!
//! A module for dataset enumeration and its exactly-once construction
//! across a worker pool.
//!
//! ## Key Components
//!
//! * [`Sample`] / [`Dataset`] - Paired image samples and the finite ordered
//!   sequence a provider enumerates them into
//! * [`DatasetProvider`] - The external collaborator that scans a directory
//!   into a dataset
//! * [`OnceConstructor`] - A one-shot broadcast wrapper ensuring the build
//!   operation runs exactly once per pool, with failures observed by every
//!   waiter
//!
//! Datasets are immutable after construction and shared between workers as
//! `Arc<Dataset<B>>`; no locking is required once the constructor resolves.

mod once;
mod provider;

pub use once::OnceConstructor;
pub use provider::{Dataset, DatasetProvider, Sample};
