//! Worker pool and worker implementations

mod worker;
pub mod worker_pool;

pub use worker_pool::{PoolConfig, WorkerPool};
