//! # Model Seam
//!
//! Traits for the externally-provided encoder model, its catalog, and the
//! tokenizer. These are consumed, never reimplemented: robata orchestrates
//! inference over whatever encoder the provider loads.
//!
//! ## Key Components
//!
//! * [`Encoder`] - Forward-only image/text encoding and the joint
//!   similarity forward pass
//! * [`ModelProvider`] - Catalog lookup, checkpoint loading, and device
//!   enumeration
//! * [`Tokenizer`] - Fixed-context tokenization of natural-language text

mod core_trait;
mod provider;
mod tokenizer;

pub use core_trait::{Encoder, LOGIT_SCALE};
pub use provider::{LoadedModel, ModelProvider, Preprocess};
pub use tokenizer::{Tokenizer, DEFAULT_CONTEXT_LENGTH};
