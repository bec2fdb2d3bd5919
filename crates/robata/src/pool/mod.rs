//! # Worker Pool
//!
//! A module for dispatching the extraction run across a fixed-size pool of
//! parallel workers, one per accelerator device.
//!
//! ## Overview
//!
//! The dispatcher validates the configuration, loads the model, and checks
//! device binding before any worker spawns; those failures never cost a
//! worker launch. Each worker then receives an explicit, immutable context
//! (its index, its device, a clone of the configuration, the shared model
//! handle, and the serialized dataset constructor). Nothing is inherited
//! implicitly, so the inherit-style and isolated start strategies behave
//! identically.
//!
//! ## Key Components
//!
//! * [`WorkerPool`] - Launches workers and joins them with all-or-nothing
//!   semantics: any worker error or panic aborts the siblings and surfaces
//!   as a pool-level error
//! * [`PoolReport`] / [`WorkerReport`] - Per-run and per-worker accounting
//!
//! ## Termination
//!
//! A worker terminates by exhausting its shard of batches or by hitting the
//! configured iteration cutoff; both are normal. There is no retry logic
//! anywhere in the pool.

mod dispatcher;
mod worker;

pub use dispatcher::{PoolReport, WorkerPool};
pub use worker::WorkerReport;
