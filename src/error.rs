use failure::{Backtrace, Context, Fail};
use std::fmt;

/// Error Type for the thread pool crate
#[derive(Debug)]
pub struct PoolError {
    inner: Context<PoolErrorKind>,
}

/// Kinds of possible Errors when using a thread pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum PoolErrorKind {
    /// Try to submit a task after teardown has begun
    #[fail(display = "Pool is stopped")]
    Stopped,
    /// A task panicked while running on a worker
    #[fail(display = "Task panicked")]
    TaskPanic,
    /// The result of a task was extracted more than once
    #[fail(display = "Task result already taken")]
    ResultTaken,
    /// A fixed pool was asked for with no workers at all
    #[fail(display = "Pool needs at least one worker")]
    NoWorkers,
}

impl PoolError {
    /// get the kind of the error
    pub fn kind(&self) -> PoolErrorKind {
        *self.inner.get_context()
    }
}

impl Fail for PoolError {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<PoolErrorKind> for PoolError {
    fn from(kind: PoolErrorKind) -> PoolError {
        PoolError {
            inner: Context::new(kind),
        }
    }
}

impl From<Context<PoolErrorKind>> for PoolError {
    fn from(context: Context<PoolErrorKind>) -> PoolError {
        PoolError { inner: context }
    }
}
