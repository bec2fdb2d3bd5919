use async_trait::async_trait;

use crate::backend::{Backend, Unsqueezable};

/// The factor applied to cosine similarities in the joint forward pass.
pub const LOGIT_SCALE: f64 = 100.0;

/// A frozen two-tower encoder processed in single forward passes.
///
/// Implementations encode a batch of images or a batch of token sequences
/// into a batch of fixed-length feature vectors, and expose a joint forward
/// pass producing similarity logits between the two modalities. The model
/// is read-only during inference: no gradient tracking, no parameter
/// mutation, so one loaded model can be shared across every worker in a
/// pool.
///
/// # Type Parameters
///
/// * `B` - The input tensor type, implementing [`Backend`] and [`Unsqueezable`]
/// * `O` - The output feature tensor type, implementing [`Backend`]
///
/// # Implementation Notes
///
/// Inputs arrive with the batch as the `0th` dimension (hence the
/// `B::Unsqueezed` parameter types); outputs must preserve that batch
/// structure so per-sample features can be recovered by slicing along it.
///
/// # Example
///
/// ```ignore
/// struct ClipLike { /* towers */ }
///
/// #[async_trait]
/// impl Encoder<Tensor, Tensor> for ClipLike {
///     async fn encode_image(&self, images: Tensor) -> Tensor {
///         self.vision_tower(images)
///     }
///
///     async fn encode_text(&self, tokens: Tensor) -> Tensor {
///         self.text_tower(tokens)
///     }
///
///     async fn forward(&self, images: Tensor, texts: Tensor) -> (Tensor, Tensor) {
///         // normalized features, cosine similarities scaled by LOGIT_SCALE
///     }
/// }
/// ```
#[async_trait]
pub trait Encoder<B, O>
where B: Backend + Unsqueezable, O: Backend
{
    /// Encodes a batch of images into a batch of feature vectors.
    async fn encode_image(&self, images: B::Unsqueezed) -> O;

    /// Encodes a batch of token sequences into a batch of feature vectors.
    async fn encode_text(&self, tokens: B::Unsqueezed) -> O;

    /// Runs the joint forward pass over an image batch and a second batch,
    /// returning `(image_logits, text_logits)`: pairwise cosine
    /// similarities between the encoded batches, scaled by [`LOGIT_SCALE`],
    /// with the second element the transpose of the first.
    async fn forward(&self, images: B::Unsqueezed, texts: B::Unsqueezed) -> (O, O);
}
