use std::marker::PhantomData;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::AbortHandle;
use uuid::Uuid;

use crate::config::{ExtractionConfig, StartMethod};
use crate::dataset::{DatasetProvider, OnceConstructor};
use crate::error::ExtractError;
use crate::model::ModelProvider;
use super::worker::{run_worker, WorkerContext, WorkerReport};

/// Accounting for one completed pool run.
#[derive(Debug, Clone)]
pub struct PoolReport {
    /// Identifier stamped on this run's log events
    pub run_id: Uuid,

    /// Batches encoded across all workers
    pub total_batches: usize,

    /// Samples encoded across all workers
    pub total_samples: usize,

    /// Per-worker reports, ordered by worker index
    pub workers: Vec<WorkerReport>,
}

/// The pool dispatcher: launches one worker per device and joins them with
/// all-or-nothing semantics.
///
/// # Type Parameters
///
/// * `P` - The model provider (catalog, checkpoint loading, devices)
/// * `D` - The dataset provider routed through the serialized constructor
///
/// # Launch Order
///
/// [`run`](WorkerPool::run) performs its fatal checks before any worker
/// spawns, in order: configuration validation, catalog lookup and model
/// load, device binding. Only then are workers launched, each with an
/// explicit context carrying its unique index, its device, its own clone
/// of the configuration, and shared handles to the model and the dataset
/// constructor.
///
/// # Failure Semantics
///
/// The first worker error or panic aborts every sibling and surfaces as
/// [`ExtractError::Worker`] or [`ExtractError::WorkerPanic`]. A pool never
/// silently completes partially. Under [`StartMethod::Spawn`] the abort is
/// best-effort: a worker thread that has already started runs to its next
/// natural stopping point, since blocking tasks cannot be cancelled
/// mid-flight. The pool still reports the original failure either way.
pub struct WorkerPool<P, D> {
    model_provider: Arc<P>,
    dataset_provider: Arc<D>,
}

impl<P, D> WorkerPool<P, D>
where
    P: ModelProvider + 'static,
    D: DatasetProvider<P::Tensor> + 'static,
{
    /// Creates a pool dispatcher over the given providers.
    pub fn new(model_provider: P, dataset_provider: D) -> Self {
        Self {
            model_provider: Arc::new(model_provider),
            dataset_provider: Arc::new(dataset_provider),
        }
    }

    /// Runs one extraction pass: spawns `config.num_workers` workers, each
    /// bound to one device, and joins them.
    ///
    /// # Errors
    ///
    /// Pre-spawn: [`ExtractError::Config`], [`ExtractError::UnknownModel`],
    /// [`ExtractError::Checkpoint`], [`ExtractError::DeviceBinding`].
    /// Post-spawn: [`ExtractError::Worker`] (which wraps dataset-build
    /// failures among others) and [`ExtractError::WorkerPanic`].
    pub async fn run(&self, config: ExtractionConfig) -> Result<PoolReport, ExtractError> {
        config.validate()?;

        let available = self.model_provider.available_models();
        if !available.iter().any(|name| name == &config.model_name) {
            return Err(ExtractError::UnknownModel {
                identifier: config.model_name.clone(),
                available,
            });
        }
        let loaded = self.model_provider.load(&config.model_name).await?;

        let devices = self.model_provider.devices();
        if devices.len() < config.num_workers {
            return Err(ExtractError::DeviceBinding {
                requested: config.num_workers,
                available: devices.len(),
            });
        }

        let run_id = Uuid::new_v4();
        tracing::info!(
            %run_id,
            model = %config.model_name,
            workers = config.num_workers,
            batch_size = config.batch_size,
            start_method = ?config.start_method,
            "launching worker pool"
        );

        let constructor = Arc::new(OnceConstructor::new());
        let mut inflight = FuturesUnordered::new();
        let mut abort_handles = Vec::with_capacity(config.num_workers);

        for index in 0..config.num_workers {
            let dataset_provider: Arc<dyn DatasetProvider<P::Tensor>> =
                self.dataset_provider.clone();
            let ctx = WorkerContext {
                index,
                config: config.clone(),
                device: devices[index].clone(),
                model: loaded.model.clone(),
                preprocess: loaded.preprocess.clone(),
                constructor: constructor.clone(),
                dataset_provider,
                _marker: PhantomData,
            };

            let handle = match config.start_method {
                StartMethod::Fork => tokio::spawn(run_worker(ctx)),
                StartMethod::Spawn => tokio::task::spawn_blocking(move || {
                    let runtime = tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                        .map_err(|err| ExtractError::Runtime(err.to_string()))?;
                    runtime.block_on(run_worker(ctx))
                }),
            };

            abort_handles.push(handle.abort_handle());
            inflight.push(async move { (index, handle.await) });
        }

        let mut failure: Option<ExtractError> = None;
        let mut reports = Vec::with_capacity(config.num_workers);

        while let Some((index, joined)) = inflight.next().await {
            match joined {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(err)) => {
                    if failure.is_none() {
                        tracing::error!(worker = index, error = %err, "worker failed; aborting pool");
                        abort_pool(&abort_handles);
                        failure = Some(ExtractError::Worker {
                            index,
                            source: Box::new(err),
                        });
                    }
                }
                Err(join_err) if join_err.is_panic() => {
                    if failure.is_none() {
                        tracing::error!(worker = index, "worker panicked; aborting pool");
                        abort_pool(&abort_handles);
                        failure = Some(ExtractError::WorkerPanic { index });
                    }
                }
                // Cancelled by the abort above; already accounted for
                Err(_) => {}
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }

        reports.sort_by_key(|r| r.index);
        let total_batches = reports.iter().map(|r| r.batches).sum();
        let total_samples = reports.iter().map(|r| r.samples).sum();
        tracing::info!(%run_id, total_batches, total_samples, "worker pool complete");

        Ok(PoolReport {
            run_id,
            total_batches,
            total_samples,
            workers: reports,
        })
    }
}

fn abort_pool(handles: &[AbortHandle]) {
    for handle in handles {
        handle.abort();
    }
}
