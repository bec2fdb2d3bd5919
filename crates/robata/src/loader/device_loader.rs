use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::backend::Backend;
use super::batch::Batch;

/// # DeviceLoader
///
/// A lazy stream of batches pre-transferred to one device.
///
/// A background task transfers batches onto the target device and feeds
/// them through a capacity-1 channel, so while the consumer computes on
/// batch `i` the transfer of batch `i+1` is already in flight. The bounded
/// channel keeps the look-ahead at one batch rather than queueing the whole
/// dataset on-device.
///
/// ## Ordering
///
/// Batches are delivered in exactly the order of the underlying sequence;
/// the channel is FIFO and there is a single producer.
///
/// ## Usage Context
///
/// Each worker constructs its own loader over its own shard, bound to its
/// own device. Dropping the loader aborts the transfer task.
pub struct DeviceLoader<B>
where B: Backend
{
    /// The receiving end of the transfer channel
    receiver: mpsc::Receiver<Batch<B>>,

    /// Handle to the background transfer task
    transfer: JoinHandle<()>,
}

impl<B> DeviceLoader<B>
where B: Backend
{
    /// Spawns a transfer task moving `batches` onto `device` one look-ahead
    /// batch at a time, and returns the stream of transferred batches.
    pub fn new(batches: Vec<Batch<B>>, device: B::Device) -> Self {
        let (sender, receiver) = mpsc::channel(1);

        let transfer = tokio::spawn(async move {
            for batch in batches {
                let transferred = batch.to_device(&device);
                // The consumer hung up; nothing left to transfer for
                if sender.send(transferred).await.is_err() {
                    break;
                }
            }
        });

        Self { receiver, transfer }
    }
}

impl<B> Stream for DeviceLoader<B>
where B: Backend
{
    type Item = Batch<B>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl<B> Drop for DeviceLoader<B>
where B: Backend
{
    /// Ensures the transfer task is terminated when the loader is dropped.
    fn drop(&mut self) {
        self.transfer.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use crate::backend::mock_tensor::MockTensor;
    use crate::dataset::{Dataset, Sample};
    use crate::loader::batches;

    fn dataset_of(len: usize) -> Dataset<MockTensor> {
        let samples = (0..len)
            .map(|i| Sample::new(
                MockTensor::new(vec![2, 2], i as i32),
                MockTensor::new(vec![2, 2], i as i32),
            ))
            .collect();
        Dataset::new(samples)
    }

    #[tokio::test]
    async fn test_yields_all_batches_in_order() {
        let batch_seq = batches(&dataset_of(25), 10);
        let mut loader = DeviceLoader::new(batch_seq, 1);

        let mut sizes = vec![];
        let mut values = vec![];
        while let Some(batch) = loader.next().await {
            sizes.push(batch.len());
            values.extend(batch.samples().iter().map(|s| s.input().value));
        }

        assert_eq!(sizes, vec![10, 10, 5]);
        assert_eq!(values, (0..25).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_batches_arrive_on_target_device() {
        let batch_seq = batches(&dataset_of(4), 2);
        let mut loader = DeviceLoader::new(batch_seq, 7);

        while let Some(batch) = loader.next().await {
            for sample in batch.samples() {
                assert_eq!(sample.input().device, 7);
                assert_eq!(sample.conditioning().device, 7);
            }
        }
    }

    #[tokio::test]
    async fn test_empty_sequence_ends_immediately() {
        let mut loader: DeviceLoader<MockTensor> = DeviceLoader::new(vec![], 0);
        assert!(loader.next().await.is_none());
    }

    #[tokio::test]
    async fn test_dropping_loader_stops_transfer() {
        let batch_seq = batches(&dataset_of(100), 1);
        let mut loader = DeviceLoader::new(batch_seq, 0);

        // Consume a couple of batches, then hang up
        assert!(loader.next().await.is_some());
        assert!(loader.next().await.is_some());
        drop(loader);

        // Nothing to assert beyond not hanging: the transfer task observes
        // the closed channel (or the abort) and exits.
    }
}
