//! # Tensor Backend
//!
//! This module provides a unified interface for different tensor backends,
//! allowing the batching and device-transfer apis to work in a
//! backend-agnostic manner.
//!
//! ## Feature Flags
//!
//! The module uses feature flags to conditionally compile support for
//! different backends:
//!
//! - `candle`: Enables support for the Candle tensor library
//!
//! ## Usage
//!
//! Users of this crate can work with tensors in a backend-agnostic way by:
//!
//! 1. Importing the traits ([`Backend`], [`Unsqueezable`])
//! 2. Writing code against these trait interfaces
//! 3. Enabling the appropriate feature flag for their desired backend

mod core_trait;

#[cfg_attr(docsrs, doc(cfg(feature = "candle")))]
#[cfg(feature = "candle")]
/// Candle tensor backend implementation.
///
/// This module is only available when the `candle` feature flag is enabled.
/// It provides an implementation of the [`Backend`] and [`Unsqueezable`]
/// traits for Candle's `Tensor` type, with logical devices mapped onto
/// `candle_core::Device`.
pub mod candle;

// Re-export the core traits for convenient imports
pub use core_trait::*;


#[cfg(test)]
/// Mock tensor implementation.
///
/// Operates on simple shape/value/device triples.
pub(crate) mod mock_tensor;
