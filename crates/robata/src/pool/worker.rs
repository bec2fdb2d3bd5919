use std::marker::PhantomData;
use std::sync::Arc;

use futures::StreamExt;

use crate::backend::{Backend, Unsqueezable};
use crate::config::ExtractionConfig;
use crate::dataset::{Dataset, DatasetProvider, OnceConstructor};
use crate::error::ExtractError;
use crate::loader::{batches, DeviceLoader};
use crate::model::{Encoder, Preprocess};
use crate::tensor::operations::split_by_batch;

/// Everything one worker needs, passed explicitly at spawn time.
///
/// No worker relies on inherited state: the configuration is this worker's
/// own clone, the device binding is fixed for the worker's lifetime, and
/// the model handle is shared read-only.
pub(crate) struct WorkerContext<M, B, O>
where B: Backend + Unsqueezable, O: Backend
{
    /// This worker's unique index in `[0, num_workers)`
    pub index: usize,

    /// This worker's copy of the run configuration
    pub config: ExtractionConfig,

    /// The device this worker is bound to
    pub device: B::Device,

    /// Shared read-only handle to the loaded encoder
    pub model: Arc<M>,

    /// The model's preprocessing transform
    pub preprocess: Preprocess<B>,

    /// The pool-wide serialized dataset constructor
    pub constructor: Arc<OnceConstructor<Dataset<B>>>,

    /// The dataset provider the first caller builds through
    pub dataset_provider: Arc<dyn DatasetProvider<B>>,

    /// Phantom data for tracking the feature tensor type at compile time
    pub _marker: PhantomData<O>,
}

/// What one worker accomplished.
#[derive(Debug, Clone)]
pub struct WorkerReport {
    /// The worker's index
    pub index: usize,

    /// The device the worker was bound to, rendered for reporting
    pub device: String,

    /// Batches fully encoded (batches past the iteration cutoff excluded)
    pub batches: usize,

    /// Samples fully encoded
    pub samples: usize,
}

/// One worker's inference loop.
///
/// Resolves the dataset through the serialized constructor, takes the
/// disjoint shard of batches stamped with this worker's index modulo the
/// worker count, and drives that shard through a prefetching device loader
/// into forward-only encoding. Stops at the configured iteration cutoff if
/// one is set; that is normal termination.
pub(crate) async fn run_worker<M, B, O>(
    ctx: WorkerContext<M, B, O>,
) -> Result<WorkerReport, ExtractError>
where
    B: Backend + Unsqueezable,
    O: Backend,
    M: Encoder<B, O> + Send + Sync + 'static,
{
    let dataset = ctx.constructor
        .get_or_build(|| {
            let provider = ctx.dataset_provider.clone();
            let root = ctx.config.data_dir.clone();
            async move { provider.build(&root).await }
        })
        .await?;

    let shard = batches(&dataset, ctx.config.batch_size)
        .into_iter()
        .filter(|batch| batch.index() % ctx.config.num_workers == ctx.index)
        .collect::<Vec<_>>();

    tracing::debug!(
        worker = ctx.index,
        device = ?ctx.device,
        samples = dataset.len(),
        shard_batches = shard.len(),
        "worker starting"
    );

    let mut loader = DeviceLoader::new(shard, ctx.device.clone());

    let mut report = WorkerReport {
        index: ctx.index,
        device: format!("{:?}", ctx.device),
        batches: 0,
        samples: 0,
    };

    while let Some(batch) = loader.next().await {
        if let Some(limit) = ctx.config.max_batches {
            if report.batches >= limit {
                tracing::debug!(worker = ctx.index, limit, "iteration cutoff reached");
                break;
            }
        }

        let batch = batch.map(ctx.preprocess.as_ref());

        if ctx.config.compute_similarity {
            let (image_logits, _) = ctx.model
                .forward(batch.input_batch(), batch.conditioning_batch())
                .await;
            tracing::debug!(
                worker = ctx.index,
                batch = batch.index(),
                logits_shape = ?image_logits.shape(),
                "similarity logits"
            );
        }

        let features = ctx.model.encode_image(batch.conditioning_batch()).await;
        let per_sample = split_by_batch(features);

        report.batches += 1;
        report.samples += per_sample.len();
        tracing::debug!(
            worker = ctx.index,
            batch = batch.index(),
            size = per_sample.len(),
            "encoded batch"
        );
    }

    tracing::info!(
        worker = ctx.index,
        batches = report.batches,
        samples = report.samples,
        "worker finished"
    );
    Ok(report)
}
