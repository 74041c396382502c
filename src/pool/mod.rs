//! This module contains the crate's ThreadPool trait
//! and its implementations.

use crate::handle::TaskHandle;
use crate::Result;

/// ThreadPool trait that describes the functionality of a pool
/// capable of running submitted tasks on its threads and handing
/// back a handle to each task's eventual result
pub trait ThreadPool: Sized {
    /// create a new pool with the given number of execution threads
    fn new(workers: usize) -> Result<Self>;

    /// hand a task to the pool and return the handle to its result
    fn submit<F, T>(&self, body: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static;
}

mod fixed;
mod job;
mod spawner;

pub use fixed::FixedThreadPool;
pub use spawner::ThreadPerTaskPool;
