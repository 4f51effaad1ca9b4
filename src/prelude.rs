//! Convenient re-exports for common types and traits

pub use crate::core::{BoxedTask, NamedTask, PoolError, Result, Task};
pub use crate::pool::{PoolConfig, WorkerPool};
