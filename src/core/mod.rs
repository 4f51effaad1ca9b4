//! Core types and traits for the worker pool

pub mod error;
pub mod task;

pub use error::{PoolError, Result};
pub use task::{BoxedTask, NamedTask, Task};
