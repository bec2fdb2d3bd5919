use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{Backend, Unsqueezable};
use crate::error::ExtractError;
use super::core_trait::Encoder;

/// The preprocessing transform returned alongside a loaded model, applied
/// to each image before it is encoded.
pub type Preprocess<B> = Arc<dyn Fn(B) -> B + Send + Sync>;

/// A loaded model handle paired with its preprocessing transform.
///
/// The model is shared read-only: the pool clones the `Arc` into every
/// worker and nobody mutates the parameters during inference.
pub struct LoadedModel<M, B> {
    /// Shared handle to the loaded encoder
    pub model: Arc<M>,

    /// The transform images must pass through before encoding
    pub preprocess: Preprocess<B>,
}

impl<M, B> Clone for LoadedModel<M, B> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            preprocess: self.preprocess.clone(),
        }
    }
}

/// The external collaborator that owns the model catalog, checkpoint
/// loading, and device enumeration.
///
/// Loading happens exactly once per run, before any worker spawns; an
/// identifier absent from [`available_models`](ModelProvider::available_models)
/// must fail with [`ExtractError::UnknownModel`] at that point.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// The tensor type samples arrive as
    type Tensor: Backend + Unsqueezable;

    /// The tensor type the encoder emits features as
    type Output: Backend;

    /// The encoder model this provider loads
    type Model: Encoder<Self::Tensor, Self::Output> + Send + Sync + 'static;

    /// Returns the identifiers of the models this provider can load.
    fn available_models(&self) -> Vec<String>;

    /// Loads the named model and its preprocessing transform, downloading
    /// or reading the checkpoint as needed.
    async fn load(
        &self,
        identifier: &str,
    ) -> Result<LoadedModel<Self::Model, Self::Tensor>, ExtractError>;

    /// Enumerates the accelerator devices visible to this provider, in
    /// binding order: worker `i` is bound to the `i`th device.
    fn devices(&self) -> Vec<<Self::Tensor as Backend>::Device>;
}
