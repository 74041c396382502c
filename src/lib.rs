#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

//! This crate provides fixed-size worker thread pools
//! that hand back a result handle for every submitted task.

mod error;
mod handle;
pub mod pool;

#[macro_use]
extern crate failure;
pub use error::PoolError;
pub use error::PoolErrorKind;
pub use handle::TaskHandle;
pub use pool::{FixedThreadPool, ThreadPerTaskPool, ThreadPool};

/// Result type used by this crate
pub type Result<T> = core::result::Result<T, PoolError>;
