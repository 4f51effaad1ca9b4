//! # warmpool
//!
//! A bounded worker pool that reuses warm threads and applies backpressure by
//! blocking submitters instead of queueing tasks.
//!
//! ## Features
//!
//! - **Bounded concurrency**: at most the configured capacity of workers is ever alive
//! - **Warm reuse**: finished workers park in an idle list and serve later submissions,
//!   most recently parked first
//! - **Blocking backpressure**: when every worker is busy, [`WorkerPool::submit`] blocks
//!   the caller until one is recycled; there is no unbounded task queue
//! - **Lazy spawning**: construction creates no threads; workers appear as load demands
//! - **Panic containment**: a panicking task retires only its own worker, and the pool
//!   replaces the lost capacity on a later submission
//!
//! ## Quick Start
//!
//! ```rust
//! use warmpool::prelude::*;
//! use std::sync::mpsc;
//!
//! # fn main() -> Result<()> {
//! let pool = WorkerPool::with_capacity(4)?;
//!
//! let (tx, rx) = mpsc::channel();
//! for i in 0..8 {
//!     let tx = tx.clone();
//!     pool.submit(move || {
//!         tx.send(i * i).unwrap();
//!     })?;
//! }
//! drop(tx);
//!
//! let mut squares: Vec<i32> = rx.iter().collect();
//! squares.sort_unstable();
//! assert_eq!(squares, vec![0, 1, 4, 9, 16, 25, 36, 49]);
//!
//! pool.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use warmpool::prelude::*;
//!
//! let config = PoolConfig::new(8).with_thread_name_prefix("ingest");
//! let pool = WorkerPool::with_config(config);
//!
//! assert_eq!(pool.capacity(), 8);
//! assert_eq!(pool.running(), 0);
//! ```
//!
//! ## Custom Tasks
//!
//! Implement [`Task`] for anything that should carry its own state and label:
//!
//! ```rust
//! use warmpool::prelude::*;
//!
//! struct Rollup {
//!     series: Vec<u64>,
//! }
//!
//! impl Task for Rollup {
//!     fn run(self: Box<Self>) {
//!         let total: u64 = self.series.iter().sum();
//!         println!("rolled {} points into {}", self.series.len(), total);
//!     }
//!
//!     fn label(&self) -> &str {
//!         "rollup"
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let pool = WorkerPool::with_capacity(2)?;
//! pool.submit(Rollup { series: vec![1, 2, 3] })?;
//! # pool.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! ## Introspection
//!
//! ```rust
//! use warmpool::prelude::*;
//! use std::sync::mpsc;
//!
//! # fn main() -> Result<()> {
//! let pool = WorkerPool::with_capacity(2)?;
//!
//! let (tx, rx) = mpsc::channel();
//! for _ in 0..6 {
//!     let tx = tx.clone();
//!     pool.submit(move || {
//!         let _ = tx.send(());
//!     })?;
//! }
//! drop(tx);
//! let finished = rx.iter().count();
//!
//! assert_eq!(finished, 6);
//! assert_eq!(pool.tasks_submitted(), 6);
//! assert!(pool.running() <= pool.capacity());
//! # pool.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! ## Shutdown
//!
//! [`WorkerPool::shutdown`] closes the intake, fails submitters blocked on a
//! saturated pool with [`PoolError::PoolClosed`], and drains the idle
//! workers. A worker busy with a task finishes it and then retires on its
//! own. Dropping the pool performs the same shutdown.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pool;
pub mod prelude;

pub use crate::core::{BoxedTask, NamedTask, PoolError, Result, Task};
pub use crate::pool::{PoolConfig, WorkerPool};
