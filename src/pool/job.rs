use crate::handle::{self, SlotWriter, TaskHandle};
use crate::{PoolErrorKind, Result};
use std::panic::{catch_unwind, AssertUnwindSafe};

pub(crate) trait RunBox {
    fn run_from_box(self: Box<Self>) -> Result<()>;
}

/// A type-erased unit of work. The queue only ever sees this: run
/// once, consuming the box, no arguments, no return value.
pub(crate) type Job = Box<dyn RunBox + Send + 'static>;

/// A submitted closure sealed together with the writing half of its
/// result slot. This is the erasure boundary: the closure's return
/// type disappears from the queue's point of view here.
struct Sealed<F, T> {
    body: F,
    outcome: SlotWriter<T>,
}

impl<F, T> RunBox for Sealed<F, T>
where
    F: FnOnce() -> T,
{
    fn run_from_box(self: Box<Self>) -> Result<()> {
        let Sealed { body, outcome } = *self;
        // here we catch panic so that the worker can continue running other tasks
        match catch_unwind(AssertUnwindSafe(body)) {
            Ok(value) => {
                outcome.fulfill(Ok(value));
                Ok(())
            }
            Err(_payload) => {
                outcome.fulfill(Err(PoolErrorKind::TaskPanic.into()));
                Err(PoolErrorKind::TaskPanic.into())
            }
        }
    }
}

/// Wrap a closure into a queueable job plus the handle to its result.
pub(crate) fn seal<F, T>(body: F) -> (Job, TaskHandle<T>)
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (outcome, handle) = handle::slot_pair();
    let job = Box::new(Sealed { body, outcome });
    (job, handle)
}
