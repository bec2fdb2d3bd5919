use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;

use crate::error::ExtractError;

/// # OnceConstructor
///
/// A one-shot broadcast around a fallible build operation.
///
/// ## Purpose
///
/// Across all workers in a pool, the wrapped build operation executes
/// exactly once: the first caller runs it, every other caller blocks until
/// the result is available and then receives the same `Arc` handle.
/// Dataset enumeration may involve order-sensitive filesystem scans, so
/// running it N times concurrently both wastes work and risks workers
/// disagreeing about sample order.
///
/// ## Failure Semantics
///
/// If the build fails, every waiter, current and future, observes the
/// failure as [`ExtractError::DatasetBuild`]. The build is never retried;
/// nobody receives a partial or empty result in its place. If the building
/// task is cancelled or panics mid-build, a guard marks the constructor
/// failed so waiters error out instead of blocking forever.
///
/// ## Usage Pattern
///
/// Every worker calls [`get_or_build`](OnceConstructor::get_or_build) with
/// its own copy of the build closure; only the first caller's closure runs.
pub struct OnceConstructor<T> {
    /// Current build state. Guarded by a std mutex: every critical section
    /// is lock-check-unlock with no await inside.
    state: Mutex<BuildState<T>>,

    /// Wakes waiters when the build resolves.
    notify: Notify,
}

enum BuildState<T> {
    /// Nobody has called yet.
    Idle,

    /// The first caller is running the build operation.
    Building,

    /// The build succeeded; all callers receive this handle.
    Ready(Arc<T>),

    /// The build failed; all callers receive this message.
    Failed(String),
}

/// Marks the constructor failed if the building task unwinds or is
/// cancelled before recording an outcome, so waiters are released.
struct BuildGuard<'a, T> {
    constructor: &'a OnceConstructor<T>,
    complete: bool,
}

impl<T> Drop for BuildGuard<'_, T> {
    fn drop(&mut self) {
        if !self.complete {
            let mut state = self.constructor.lock_state();
            *state = BuildState::Failed("dataset builder dropped before completing".to_string());
            drop(state);
            self.constructor.notify.notify_waiters();
        }
    }
}

impl<T> OnceConstructor<T>
where T: Send + Sync + 'static
{
    /// Creates an empty constructor.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BuildState::Idle),
            notify: Notify::new(),
        }
    }

    /// Returns the constructed value, building it if this is the first call.
    ///
    /// The first caller runs `build`; concurrent and later callers never
    /// invoke their closure and instead wait for (and share) the first
    /// caller's outcome.
    pub async fn get_or_build<F, Fut>(&self, build: F) -> Result<Arc<T>, ExtractError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ExtractError>>,
    {
        let is_builder = {
            let mut state = self.lock_state();
            match &*state {
                BuildState::Idle => {
                    *state = BuildState::Building;
                    true
                }
                _ => false,
            }
        };

        if is_builder {
            self.run_build(build()).await
        } else {
            self.wait_for_outcome().await
        }
    }

    async fn run_build(
        &self,
        build: impl Future<Output = Result<T, ExtractError>>,
    ) -> Result<Arc<T>, ExtractError> {
        let mut guard = BuildGuard { constructor: self, complete: false };
        let outcome = build.await;

        let result = {
            let mut state = self.lock_state();
            match outcome {
                Ok(value) => {
                    let value = Arc::new(value);
                    *state = BuildState::Ready(value.clone());
                    Ok(value)
                }
                Err(err) => {
                    let message = err.to_string();
                    *state = BuildState::Failed(message.clone());
                    Err(ExtractError::DatasetBuild(message))
                }
            }
        };
        guard.complete = true;
        drop(guard);

        self.notify.notify_waiters();
        result
    }

    async fn wait_for_outcome(&self) -> Result<Arc<T>, ExtractError> {
        loop {
            {
                let state = self.lock_state();
                match &*state {
                    BuildState::Ready(value) => return Ok(value.clone()),
                    BuildState::Failed(message) => {
                        return Err(ExtractError::DatasetBuild(message.clone()));
                    }
                    BuildState::Idle | BuildState::Building => {}
                }
            }
            // A notify_waiters fired between the check above and this await
            // would be missed, so wait with a timeout and re-check.
            let _ = tokio::time::timeout(
                Duration::from_millis(50),
                self.notify.notified(),
            ).await;
        }
    }
}

impl<T> OnceConstructor<T> {
    fn lock_state(&self) -> MutexGuard<'_, BuildState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for OnceConstructor<T>
where T: Send + Sync + 'static
{
    fn default() -> Self {
        Self::new()
    }
}
