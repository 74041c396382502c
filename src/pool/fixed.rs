use super::job::{self, Job, RunBox};
use super::ThreadPool;
use crate::handle::TaskHandle;
use crate::{PoolErrorKind, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use tracing::{error, trace};

/// Everything guarded by the queue lock: the pending jobs and the
/// stopping flag. The flag never goes back to false once set.
struct QueueInner {
    jobs: VecDeque<Job>,
    stopping: bool,
}

/// FIFO hand-off between submitting threads and the workers. One
/// mutex, one condition variable; the condition doubles as the
/// shutdown announcement.
struct TaskQueue {
    inner: Mutex<QueueInner>,
    ready: Condvar,
}

impl TaskQueue {
    fn new() -> Self {
        Self {
            inner: Mutex::new(QueueInner {
                jobs: VecDeque::new(),
                stopping: false,
            }),
            ready: Condvar::new(),
        }
    }

    fn push(&self, job: Job) -> Result<()> {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.stopping {
                return Err(PoolErrorKind::Stopped.into());
            }
            inner.jobs.push_back(job);
        }
        // wake one worker per accepted job
        self.ready.notify_one();
        Ok(())
    }

    /// Block until a job is available or the pool is draining dry.
    /// Pending jobs win over the stopping flag: workers keep
    /// consuming until the queue is empty even after `close`.
    fn pop_blocking(&self) -> Option<Job> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if let Some(next) = inner.jobs.pop_front() {
                return Some(next);
            }
            if inner.stopping {
                return None;
            }
            inner = self.ready.wait(inner).unwrap();
        }
    }

    fn close(&self) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.stopping = true;
        }
        self.ready.notify_all();
    }
}

struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn new(id: usize, queue: Arc<TaskQueue>) -> Self {
        let handle = thread::spawn(move || loop {
            let job = match queue.pop_blocking() {
                Some(job) => job,
                None => break,
            };
            // the queue lock is released here; the job runs unserialized
            if let Err(error) = job.run_from_box() {
                error!("Worker: {}, Error: {}", id, error);
            }
        });

        Self {
            id,
            handle: Some(handle),
        }
    }
}

/// Fixed-size worker thread pool backed by a single shared queue.
/// It spawns all of its workers at construction and joins them at
/// teardown; tasks accepted before teardown all run to completion
/// before any worker exits.
///
/// # Note:
/// Dropping the pool waits for its workers to terminate, and hence
/// care must be given to not let a task run an infinite loop.
/// Otherwise the pool will also block forever when dropping.
///
/// # Example:
///
/// ```
/// use taskpool::{FixedThreadPool, ThreadPool};
///
/// let pool = FixedThreadPool::new(4).unwrap();
///
/// let handles: Vec<_> = (0..8u64)
///     .map(|i| pool.submit(move || i * i).unwrap())
///     .collect();
///
/// // dropping the pool drains the queue and joins all its workers
/// drop(pool);
///
/// let squares: Vec<u64> = handles
///     .into_iter()
///     .map(|handle| handle.take().unwrap())
///     .collect();
/// assert_eq!(vec![0, 1, 4, 9, 16, 25, 36, 49], squares);
/// ```
pub struct FixedThreadPool {
    queue: Arc<TaskQueue>,
    workers: Vec<Worker>,
}

impl FixedThreadPool {
    /// Stop accepting new tasks, let the workers finish everything
    /// already queued and join them. Runs automatically when the pool
    /// is dropped; calling it twice is harmless.
    pub fn shutdown(&mut self) {
        self.queue.close();

        for worker in &mut self.workers {
            trace!("Joining worker {}", worker.id);
            if let Some(handle) = worker.handle.take() {
                handle.join().unwrap();
            }
        }
    }
}

impl ThreadPool for FixedThreadPool {
    fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(PoolErrorKind::NoWorkers.into());
        }

        let queue = Arc::new(TaskQueue::new());
        let mut pool_workers = Vec::with_capacity(workers);
        for id in 0..workers {
            pool_workers.push(Worker::new(id, Arc::clone(&queue)));
        }

        Ok(Self {
            queue,
            workers: pool_workers,
        })
    }

    fn submit<F, T>(&self, body: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (job, handle) = job::seal(body);
        self.queue.push(job)?;
        Ok(handle)
    }
}

impl Drop for FixedThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
