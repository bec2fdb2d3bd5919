use crate::backend::{Backend, Unsqueezable};
use crate::dataset::{Dataset, Sample};
use crate::tensor::operations::stack_samples;

/// An index-stamped, ordered run of samples cut from a dataset.
///
/// Batches are transient: each one is produced by [`batches`], transferred
/// to a device by the loader, and consumed by exactly one worker. The index
/// records the batch's position in the dataset's batch sequence and is what
/// workers shard on.
#[derive(Debug, Clone)]
pub struct Batch<B> {
    index: usize,
    samples: Vec<Sample<B>>,
}

impl<B> Batch<B>
where B: Backend
{
    /// Returns this batch's position in the dataset's batch sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of samples in this batch.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when the batch holds no samples. Never the case for
    /// batches produced by [`batches`].
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the samples in dataset order.
    pub fn samples(&self) -> &[Sample<B>] {
        &self.samples
    }

    /// Returns a copy of this batch with every sample resident on `device`.
    pub fn to_device(&self, device: &B::Device) -> Self {
        Self {
            index: self.index,
            samples: self.samples.iter().map(|s| s.to_device(device)).collect(),
        }
    }

    /// Returns a batch with the given transform applied to every image,
    /// such as a model's preprocessing transform.
    pub fn map(&self, transform: &(dyn Fn(B) -> B + Send + Sync)) -> Self {
        Self {
            index: self.index,
            samples: self.samples.iter()
                .map(|s| Sample::new(
                    transform(s.input().clone()),
                    transform(s.conditioning().clone()),
                ))
                .collect(),
        }
    }
}

impl<B> Batch<B>
where B: Backend + Unsqueezable
{
    /// Stacks the input images into one `(len, ...dims)` tensor.
    pub fn input_batch(&self) -> B::Unsqueezed {
        let inputs = self.samples.iter()
            .map(|s| s.input().clone())
            .collect::<Vec<_>>();
        stack_samples(&inputs)
    }

    /// Stacks the conditioning images into one `(len, ...dims)` tensor.
    pub fn conditioning_batch(&self) -> B::Unsqueezed {
        let conditionings = self.samples.iter()
            .map(|s| s.conditioning().clone())
            .collect::<Vec<_>>();
        stack_samples(&conditionings)
    }
}

/// Cuts a dataset of `L` samples into `ceil(L / batch_size)` index-stamped
/// batches in dataset order.
///
/// Every batch except possibly the last holds exactly `batch_size` samples;
/// the last holds the remainder. `batch_size` must be positive; the pool
/// validates this before any worker starts.
pub fn batches<B>(dataset: &Dataset<B>, batch_size: usize) -> Vec<Batch<B>>
where B: Backend
{
    dataset.samples()
        .chunks(batch_size)
        .enumerate()
        .map(|(index, chunk)| Batch {
            index,
            samples: chunk.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock_tensor::MockTensor;

    fn dataset_of(len: usize) -> Dataset<MockTensor> {
        let samples = (0..len)
            .map(|i| Sample::new(
                MockTensor::new(vec![3, 4], i as i32),
                MockTensor::new(vec![3, 4], i as i32),
            ))
            .collect();
        Dataset::new(samples)
    }

    #[test]
    fn test_exact_division() {
        let batches = batches(&dataset_of(20), 5);

        assert_eq!(batches.len(), 4);
        for (i, batch) in batches.iter().enumerate() {
            assert_eq!(batch.index(), i);
            assert_eq!(batch.len(), 5);
        }
    }

    #[test]
    fn test_remainder_goes_to_last_batch() {
        let batches = batches(&dataset_of(25), 10);

        let sizes = batches.iter().map(|b| b.len()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![10, 10, 5]);
    }

    #[test]
    fn test_batch_smaller_than_dataset() {
        let batches = batches(&dataset_of(3), 10);

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 3);
    }

    #[test]
    fn test_empty_dataset_yields_no_batches() {
        let batches = batches(&dataset_of(0), 10);
        assert!(batches.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let batches = batches(&dataset_of(7), 3);

        let values = batches.iter()
            .flat_map(|b| b.samples().iter().map(|s| s.input().value))
            .collect::<Vec<_>>();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_stacking_adds_batch_dimension() {
        let batches = batches(&dataset_of(4), 4);

        let stacked = batches[0].input_batch();
        assert_eq!(stacked.shape(), vec![4, 3, 4]);

        let stacked = batches[0].conditioning_batch();
        assert_eq!(stacked.shape(), vec![4, 3, 4]);
    }

    #[test]
    fn test_to_device_moves_every_sample() {
        let batches = batches(&dataset_of(4), 2);

        let moved = batches[1].to_device(&2);

        assert_eq!(moved.index(), 1);
        for sample in moved.samples() {
            assert_eq!(sample.input().device, 2);
            assert_eq!(sample.conditioning().device, 2);
        }
    }

    #[test]
    fn test_map_applies_transform() {
        let batches = batches(&dataset_of(2), 2);

        let mapped = batches[0].map(&|t: MockTensor| {
            MockTensor::new(t.shape(), t.value + 100)
        });

        assert_eq!(mapped.samples()[0].input().value, 100);
        assert_eq!(mapped.samples()[1].conditioning().value, 101);
    }
}
