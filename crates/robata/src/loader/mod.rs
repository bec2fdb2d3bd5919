//! # Batch Loading
//!
//! A module for slicing a dataset into batches and streaming them onto a
//! worker's device.
//!
//! ## Key Components
//!
//! * [`Batch`] / [`batches`] - Index-stamped fixed-size batches cut from an
//!   ordered dataset
//! * [`DeviceLoader`] - A lazy stream of batches pre-transferred to one
//!   device, overlapping the transfer of batch `i+1` with computation on
//!   batch `i`
//!
//! Each worker owns its own loader bound to its own device; batches are
//! never shared across workers.

mod batch;
mod device_loader;

pub use batch::{batches, Batch};
pub use device_loader::DeviceLoader;
