use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use rand::Rng;
use taskpool::{
    FixedThreadPool, PoolErrorKind, Result, TaskHandle, ThreadPerTaskPool, ThreadPool,
};

// Eight squaring tasks on four workers: every handle yields exactly i*i,
// no duplicates and no omissions
#[test]
fn squares_on_four_workers() -> Result<()> {
    let pool = FixedThreadPool::new(4)?;

    let handles: Vec<TaskHandle<u64>> = (0..8u64)
        .map(|i| pool.submit(move || i * i))
        .collect::<Result<Vec<_>>>()?;

    drop(pool);

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!((i * i) as u64, handle.take()?);
    }

    Ok(())
}

// A single worker observes tasks in submission order
#[test]
fn fifo_on_single_worker() -> Result<()> {
    let pool = FixedThreadPool::new(1)?;
    let order: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));

    for i in 0..32 {
        let order = Arc::clone(&order);
        pool.submit(move || order.lock().unwrap().push(i))?;
    }

    drop(pool);

    let order = order.lock().unwrap();
    assert_eq!((0..32).collect::<Vec<_>>(), *order);
    Ok(())
}

// Polls before completion all observe "not ready", even from several
// threads at once; the value only comes out after the task finished
#[test]
fn poll_before_completion_is_not_ready() -> Result<()> {
    let pool = FixedThreadPool::new(2)?;
    let (release, gate) = mpsc::channel::<()>();

    let handle = pool.submit(move || {
        gate.recv().unwrap();
        7
    })?;

    let handle = Arc::new(handle);
    let mut pollers = Vec::new();
    for _ in 0..4 {
        let handle = Arc::clone(&handle);
        pollers.push(thread::spawn(move || handle.is_ready()));
    }
    for poller in pollers {
        assert!(!poller.join().unwrap());
    }

    release.send(()).unwrap();
    handle.wait();
    assert!(handle.is_ready());

    let handle = Arc::try_unwrap(handle)
        .ok()
        .expect("pollers still hold the handle");
    assert_eq!(7, handle.take()?);
    Ok(())
}

// Teardown with a backlog drains every queued task before the workers exit
#[test]
fn drop_drains_queued_tasks() -> Result<()> {
    let executed = Arc::new(AtomicUsize::new(0));

    let handles = {
        let pool = FixedThreadPool::new(2)?;
        let mut handles = Vec::new();
        for _ in 0..16 {
            let executed = Arc::clone(&executed);
            handles.push(pool.submit(move || {
                thread::sleep(Duration::from_millis(10));
                executed.fetch_add(1, Ordering::SeqCst);
            })?);
        }
        handles
        // pool dropped here with most of the tasks still queued
    };

    assert_eq!(16, executed.load(Ordering::SeqCst));
    for handle in handles {
        assert!(handle.is_ready());
        handle.take()?;
    }
    Ok(())
}

// submit after shutdown fails synchronously and enqueues nothing
#[test]
fn reject_after_shutdown() -> Result<()> {
    let mut pool = FixedThreadPool::new(2)?;
    pool.submit(|| ())?.take()?;

    pool.shutdown();

    match pool.submit(|| 1) {
        Err(error) => assert_eq!(PoolErrorKind::Stopped, error.kind()),
        Ok(_) => panic!("submit succeeded on a stopped pool"),
    }
    Ok(())
}

// A panicking task surfaces through its own handle only; the workers
// keep servicing tasks submitted before and after it
#[test]
fn panic_is_contained() -> Result<()> {
    let pool = FixedThreadPool::new(2)?;

    let bad: TaskHandle<()> = pool.submit(|| panic!("task exploded"))?;
    let good = pool.submit(|| 3 + 4)?;

    match bad.take() {
        Err(error) => assert_eq!(PoolErrorKind::TaskPanic, error.kind()),
        Ok(_) => panic!("panicking task produced a value"),
    }

    let after = pool.submit(|| "still alive")?;
    assert_eq!(7, good.take()?);
    assert_eq!("still alive", after.take()?);
    Ok(())
}

// Creating a pool and dropping it without any work terminates promptly
#[test]
fn empty_shutdown() -> Result<()> {
    let pool = FixedThreadPool::new(4)?;
    drop(pool);
    Ok(())
}

// A pool with no workers could never drain its queue
#[test]
fn zero_workers_rejected() {
    match FixedThreadPool::new(0) {
        Err(error) => assert_eq!(PoolErrorKind::NoWorkers, error.kind()),
        Ok(_) => panic!("zero-worker pool constructed"),
    }
}

// Concurrent submitters racing on one pool all get their results back
#[test]
fn concurrent_submitters() -> Result<()> {
    let pool = FixedThreadPool::new(4)?;

    crossbeam_utils::thread::scope(|s| {
        for base in 0..4u64 {
            let pool = &pool;
            s.spawn(move |_| {
                let handles: Vec<_> = (0..25u64)
                    .map(|i| pool.submit(move || base * 100 + i).unwrap())
                    .collect();
                for (i, handle) in handles.into_iter().enumerate() {
                    assert_eq!(base * 100 + i as u64, handle.take().unwrap());
                }
            });
        }
    })
    .unwrap();

    Ok(())
}

// Load: tasks of jittered duration all complete with the right values
#[test]
fn jittered_load() -> Result<()> {
    let pool = FixedThreadPool::new(8)?;

    let handles: Vec<TaskHandle<u64>> = (0..200u64)
        .map(|i| {
            pool.submit(move || {
                let millis = rand::thread_rng().gen_range(0, 3);
                thread::sleep(Duration::from_millis(millis));
                i
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(i as u64, handle.take()?);
    }
    Ok(())
}

// The thread-per-task baseline honors the same handle contract
#[test]
fn thread_per_task_baseline() -> Result<()> {
    let pool = ThreadPerTaskPool::new(4)?;

    let handle = pool.submit(|| 21 * 2)?;
    assert_eq!(42, handle.take()?);

    let bad: TaskHandle<()> = pool.submit(|| panic!("boom"))?;
    match bad.take() {
        Err(error) => assert_eq!(PoolErrorKind::TaskPanic, error.kind()),
        Ok(_) => panic!("panicking task produced a value"),
    }
    Ok(())
}
