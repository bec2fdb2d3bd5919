use crate::backend::Backend;
use crate::error::ExtractError;

/// The default context window for tokenized text.
pub const DEFAULT_CONTEXT_LENGTH: usize = 77;

/// The external tokenizer collaborator.
///
/// Turns natural-language text into fixed-length integer sequence batches:
/// `n` input texts become one `(n, context_length)` tensor, padded to the
/// context window. A text that does not fit the window is an error, not a
/// truncation.
pub trait Tokenizer<B>: Send + Sync
where B: Backend
{
    /// Tokenizes `texts` into one `(texts.len(), context_length)` batch.
    ///
    /// # Errors
    ///
    /// [`ExtractError::ContextOverflow`] when any text tokenizes to more
    /// than `context_length` tokens.
    fn tokenize(&self, texts: &[String], context_length: usize) -> Result<B, ExtractError>;
}
