use crate::backend::{Backend, Unsqueezable};
use super::constant::BATCH_DIM;

/// Stacks individual sample tensors into a single batched tensor.
///
/// Each tensor is unsqueezed along the batch dimension and the results are
/// concatenated in the order supplied, so a slice of `n` tensors of shape
/// `(...dims)` becomes one tensor of shape `(n, ...dims)`.
///
/// # Parameters
///
/// * `items` - Non-empty slice of same-shaped tensors to stack
///
/// # Returns
///
/// A rank+1 tensor with the inputs stacked along [`BATCH_DIM`].
pub(crate) fn stack_samples<B>(items: &[B]) -> B::Unsqueezed
where B: Backend + Unsqueezable
{
    let raised = items.iter()
        .map(|item| item.unsqueeze(BATCH_DIM))
        .collect::<Vec<_>>();
    B::Unsqueezed::cat(&raised, BATCH_DIM)
}

/// Splits a batched tensor into its per-sample slices.
///
/// The inverse of [`stack_samples`]: a tensor of shape `(n, ...dims)` becomes
/// `n` tensors of shape `(...dims)`, in batch order. Used to recover the
/// per-sample feature vectors from an encoder's batched output.
pub(crate) fn split_by_batch<B>(batched: B) -> Vec<B>
where B: Backend
{
    batched.vectorize_dim(BATCH_DIM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock_tensor::MockTensor;

    #[test]
    fn test_stack_samples_adds_batch_dimension() {
        let items = vec![
            MockTensor::new(vec![3, 4], 1),
            MockTensor::new(vec![3, 4], 2),
            MockTensor::new(vec![3, 4], 3),
        ];

        let stacked = stack_samples(&items);

        assert_eq!(stacked.shape(), vec![3, 3, 4]);
    }

    #[test]
    fn test_stack_single_sample() {
        let items = vec![MockTensor::new(vec![5], 9)];

        let stacked = stack_samples(&items);

        assert_eq!(stacked.shape(), vec![1, 5]);
        assert_eq!(stacked.value, 9);
    }

    #[test]
    fn test_split_by_batch_drops_batch_dimension() {
        let batched = MockTensor::new(vec![4, 16], 7);

        let split = split_by_batch(batched);

        assert_eq!(split.len(), 4);
        for slice in &split {
            assert_eq!(slice.shape(), vec![16]);
        }
    }
}
