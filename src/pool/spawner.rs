use super::job::{self, RunBox};
use super::ThreadPool;
use crate::handle::TaskHandle;
use crate::Result;
use std::thread;
use tracing::error;

/// Baseline pool that spawns one fresh thread per submitted task.
///
/// There is no queue and no thread reuse, so the worker count passed
/// to `new` is ignored and there is nothing to tear down: every task
/// runs on its own short-lived thread and reports through its handle.
/// Kept as the comparison baseline for [`FixedThreadPool`] in the
/// benchmarks.
///
/// [`FixedThreadPool`]: crate::FixedThreadPool
#[derive(Clone)]
pub struct ThreadPerTaskPool {}

impl ThreadPool for ThreadPerTaskPool {
    fn new(_workers: usize) -> Result<Self> {
        Ok(Self {})
    }

    fn submit<F, T>(&self, body: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (job, handle) = job::seal(body);
        thread::spawn(move || {
            if let Err(error) = job.run_from_box() {
                error!("Spawned task failed: {}", error);
            }
        });
        Ok(handle)
    }
}
