use std::path::Path;

use async_trait::async_trait;

use crate::backend::Backend;
use crate::error::ExtractError;

/// One paired image sample: the input image and the conditioning image it
/// will be compared against.
#[derive(Debug, Clone)]
pub struct Sample<B> {
    /// The input image tensor
    input: B,

    /// The conditioning image tensor
    conditioning: B,
}

impl<B> Sample<B>
where B: Backend
{
    /// Creates a new sample from an input/conditioning pair.
    pub fn new(input: B, conditioning: B) -> Self {
        Self { input, conditioning }
    }

    /// Returns a reference to the input image.
    pub fn input(&self) -> &B {
        &self.input
    }

    /// Returns a reference to the conditioning image.
    pub fn conditioning(&self) -> &B {
        &self.conditioning
    }

    /// Returns a copy of this sample with both tensors resident on `device`.
    pub fn to_device(&self, device: &B::Device) -> Self {
        Self {
            input: self.input.to_device(device),
            conditioning: self.conditioning.to_device(device),
        }
    }
}

/// A finite ordered sequence of paired samples.
///
/// Constructed once per pool by a [`DatasetProvider`] and immutable
/// thereafter; workers share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dataset<B> {
    samples: Vec<Sample<B>>,
}

impl<B> Dataset<B>
where B: Backend
{
    /// Wraps an ordered sequence of samples.
    pub fn new(samples: Vec<Sample<B>>) -> Self {
        Self { samples }
    }

    /// Returns the samples in enumeration order.
    pub fn samples(&self) -> &[Sample<B>] {
        &self.samples
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when the dataset holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// The external collaborator that enumerates a directory into a dataset.
///
/// Providers are not assumed to be safe to run concurrently (filesystem
/// scans may be order-sensitive), which is why the pool routes every call
/// through an [`super::OnceConstructor`].
///
/// # Example
///
/// ```ignore
/// struct DirectoryPairs;
///
/// #[async_trait]
/// impl DatasetProvider<Tensor> for DirectoryPairs {
///     async fn build(&self, root: &Path) -> Result<Dataset<Tensor>, ExtractError> {
///         let mut samples = vec![];
///         for entry in std::fs::read_dir(root)? {
///             // decode the image pair under this entry ...
///         }
///         Ok(Dataset::new(samples))
///     }
/// }
/// ```
#[async_trait]
pub trait DatasetProvider<B>: Send + Sync
where B: Backend
{
    /// Enumerates the directory at `root` into an ordered dataset of
    /// paired samples.
    async fn build(&self, root: &Path) -> Result<Dataset<B>, ExtractError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock_tensor::MockTensor;

    #[test]
    fn test_sample_accessors() {
        let sample = Sample::new(
            MockTensor::new(vec![3, 4], 1),
            MockTensor::new(vec![3, 4], 2),
        );

        assert_eq!(sample.input().value, 1);
        assert_eq!(sample.conditioning().value, 2);
    }

    #[test]
    fn test_sample_to_device_moves_both_tensors() {
        let sample = Sample::new(
            MockTensor::new(vec![3, 4], 1),
            MockTensor::new(vec![3, 4], 2),
        );

        let moved = sample.to_device(&3);

        assert_eq!(moved.input().device, 3);
        assert_eq!(moved.conditioning().device, 3);
        // The original is untouched
        assert_eq!(sample.input().device, 0);
    }

    #[test]
    fn test_dataset_preserves_order() {
        let samples = (0..5)
            .map(|i| Sample::new(
                MockTensor::new(vec![2], i),
                MockTensor::new(vec![2], i),
            ))
            .collect::<Vec<_>>();

        let dataset = Dataset::new(samples);

        assert_eq!(dataset.len(), 5);
        assert!(!dataset.is_empty());
        let values = dataset.samples().iter().map(|s| s.input().value).collect::<Vec<_>>();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset: Dataset<MockTensor> = Dataset::new(vec![]);
        assert_eq!(dataset.len(), 0);
        assert!(dataset.is_empty());
    }
}
