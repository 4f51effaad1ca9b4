//! Worker pool implementation

use crate::core::{BoxedTask, PoolError, Result, Task};
use crate::pool::worker::Worker;
use log::debug;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Configuration for a worker pool
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Upper bound on concurrently live workers.
    ///
    /// Zero is legal: such a pool never spawns a worker and every submission
    /// blocks until the pool is shut down.
    pub capacity: usize,
    /// Thread name prefix; worker threads are named `{prefix}-{id}`
    pub thread_name_prefix: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: num_cpus::get(),
            thread_name_prefix: "worker".to_string(),
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with the given capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Set the thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }
}

/// State shared between the pool handle and its worker threads.
///
/// The idle list, live-worker count, and closed flag live under a single
/// mutex so that a spawn decision and its bookkeeping form one atomic step:
/// the live count can never drift past capacity between the check and the
/// spawn.
pub(crate) struct PoolCore {
    capacity: usize,
    thread_name_prefix: String,
    state: Mutex<PoolState>,
    /// Signaled when a worker idles, a worker retires, or the pool closes.
    idle_available: Condvar,
    next_worker_id: AtomicUsize,
    tasks_submitted: AtomicU64,
    tasks_completed: AtomicU64,
    tasks_panicked: AtomicU64,
}

struct PoolState {
    /// Workers available for reuse; the most recently idled sits at the back.
    idle: Vec<Worker>,
    /// Workers currently alive, idle or executing.
    running: usize,
    closed: bool,
}

impl PoolCore {
    pub(crate) fn thread_name_prefix(&self) -> &str {
        &self.thread_name_prefix
    }

    /// Take a worker for one task.
    ///
    /// Prefers the most recently idled worker, spawns a fresh one while the
    /// live count is under capacity, and otherwise blocks on the condvar
    /// until a worker idles or capacity frees up. Fails with `PoolClosed`
    /// once shutdown has begun, including for callers already waiting.
    fn checkout(core: &Arc<Self>) -> Result<Worker> {
        let mut state = core.state.lock();
        loop {
            if state.closed {
                return Err(PoolError::closed(&core.thread_name_prefix));
            }
            if let Some(worker) = state.idle.pop() {
                return Ok(worker);
            }
            if state.running < core.capacity {
                let id = core.next_worker_id.fetch_add(1, Ordering::Relaxed);
                let worker = Worker::spawn(id, Arc::clone(core))?;
                state.running += 1;
                return Ok(worker);
            }
            core.idle_available.wait(&mut state);
        }
    }

    /// Return a worker to the idle list and wake one blocked submitter.
    ///
    /// Refuses once the pool is closed; the worker must retire instead of
    /// idling forever in a pool that will never hand out tasks again.
    pub(crate) fn recycle(&self, worker: Worker) -> bool {
        let mut state = self.state.lock();
        if state.closed {
            return false;
        }
        state.idle.push(worker);
        drop(state);
        self.idle_available.notify_one();
        true
    }

    /// Drop a terminated worker from the live count.
    ///
    /// Also wakes one blocked submitter: the freed capacity lets it spawn a
    /// replacement worker.
    pub(crate) fn worker_retired(&self, id: usize) {
        let mut state = self.state.lock();
        state.running -= 1;
        drop(state);
        self.idle_available.notify_one();
        debug!("worker {} retired", id);
    }

    pub(crate) fn note_task_completed(&self) {
        self.tasks_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn note_task_panicked(&self) {
        self.tasks_panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Close the pool and drain the idle workers, at most once.
    ///
    /// Wakes every blocked submitter so none is left waiting on a pool that
    /// cannot produce a worker anymore. Workers busy with a task are not
    /// signaled; they retire on their own when their recycle is refused.
    fn shutdown_workers(&self) {
        let drained = {
            let mut state = self.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            std::mem::take(&mut state.idle)
        };
        self.idle_available.notify_all();

        debug!("shutdown: draining {} idle workers", drained.len());
        for worker in drained {
            debug!("retiring idle worker {}", worker.id());
            worker.retire();
        }
    }
}

/// A bounded pool of reusable worker threads.
///
/// Workers are spawned lazily, one per concurrent task, never more than the
/// configured capacity. A worker that finishes a task parks in an idle list
/// and is handed the next submission instead of a fresh thread; the most
/// recently parked worker is reused first. When every worker is busy and
/// capacity is exhausted, [`WorkerPool::submit`] blocks the caller until a
/// worker is recycled. There is no task queue: backpressure is the queue.
///
/// A task that panics is contained by the worker that ran it. The worker
/// retires, the panic is logged, and the lost capacity is restored by the
/// next submission that needs it.
///
/// Dropping the pool triggers [`WorkerPool::shutdown`].
pub struct WorkerPool {
    core: Arc<PoolCore>,
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.core.state.lock();
        f.debug_struct("WorkerPool")
            .field("capacity", &self.core.capacity)
            .field("running", &state.running)
            .field("idle", &state.idle.len())
            .field("closed", &state.closed)
            .finish()
    }
}

impl WorkerPool {
    /// Create a pool with the default configuration.
    ///
    /// The default capacity is the number of logical CPUs.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create a pool with the given capacity.
    ///
    /// Accepts any integer type for the capacity so callers working with
    /// signed sizes do not have to convert first.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidCapacity`] if the value is negative or
    /// does not fit in `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use warmpool::WorkerPool;
    ///
    /// let pool = WorkerPool::with_capacity(4)?;
    /// assert_eq!(pool.capacity(), 4);
    ///
    /// assert!(WorkerPool::with_capacity(-1).is_err());
    /// # Ok::<(), warmpool::PoolError>(())
    /// ```
    pub fn with_capacity<C>(capacity: C) -> Result<Self>
    where
        C: TryInto<usize>,
    {
        let capacity = capacity
            .try_into()
            .map_err(|_| PoolError::InvalidCapacity)?;
        Ok(Self::with_config(PoolConfig::new(capacity)))
    }

    /// Create a pool from an explicit configuration
    pub fn with_config(config: PoolConfig) -> Self {
        let PoolConfig {
            capacity,
            thread_name_prefix,
        } = config;

        Self {
            core: Arc::new(PoolCore {
                capacity,
                thread_name_prefix,
                state: Mutex::new(PoolState {
                    idle: Vec::new(),
                    running: 0,
                    closed: false,
                }),
                idle_available: Condvar::new(),
                next_worker_id: AtomicUsize::new(0),
                tasks_submitted: AtomicU64::new(0),
                tasks_completed: AtomicU64::new(0),
                tasks_panicked: AtomicU64::new(0),
            }),
        }
    }

    /// Submit a task for execution.
    ///
    /// Returns as soon as a worker has taken the task; it does not wait for
    /// the task to finish. When the pool is saturated the call blocks until
    /// a worker becomes available, which is the pool's only form of
    /// backpressure.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::PoolClosed`] if the pool has been shut down,
    /// including when shutdown happens while this call is blocked waiting
    /// for a worker. Returns [`PoolError::SpawnWorker`] if the OS refuses
    /// to create a worker thread.
    ///
    /// # Examples
    ///
    /// ```
    /// use warmpool::prelude::*;
    /// use std::sync::mpsc;
    ///
    /// # fn main() -> Result<()> {
    /// let pool = WorkerPool::with_capacity(2)?;
    /// let (tx, rx) = mpsc::channel();
    ///
    /// pool.submit(move || {
    ///     tx.send(21 * 2).unwrap();
    /// })?;
    ///
    /// assert_eq!(rx.recv().unwrap(), 42);
    /// # pool.shutdown();
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit<T: Task + 'static>(&self, task: T) -> Result<()> {
        self.submit_boxed(Box::new(task))
    }

    fn submit_boxed(&self, task: BoxedTask) -> Result<()> {
        let worker = PoolCore::checkout(&self.core)?;
        worker.assign(task);
        self.core.tasks_submitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Configured upper bound on concurrently live workers
    pub fn capacity(&self) -> usize {
        self.core.capacity
    }

    /// Number of live workers, idle and executing combined.
    ///
    /// The value is a snapshot and may be stale by the time it is read.
    pub fn running(&self) -> usize {
        self.core.state.lock().running
    }

    /// Number of workers currently parked in the idle list
    pub fn idle_workers(&self) -> usize {
        self.core.state.lock().idle.len()
    }

    /// Whether shutdown has begun
    pub fn is_closed(&self) -> bool {
        self.core.state.lock().closed
    }

    /// Total tasks accepted by [`WorkerPool::submit`]
    pub fn tasks_submitted(&self) -> u64 {
        self.core.tasks_submitted.load(Ordering::Relaxed)
    }

    /// Total tasks that ran to completion
    pub fn tasks_completed(&self) -> u64 {
        self.core.tasks_completed.load(Ordering::Relaxed)
    }

    /// Total tasks that panicked and retired their worker
    pub fn tasks_panicked(&self) -> u64 {
        self.core.tasks_panicked.load(Ordering::Relaxed)
    }

    /// Shut the pool down.
    ///
    /// Marks the pool closed, wakes every submitter blocked in
    /// [`WorkerPool::submit`] (they fail with `PoolClosed`), and tells each
    /// idle worker to exit. Workers busy with a task finish it first and
    /// retire right after, so the live count drains to zero once in-flight
    /// work completes. The call itself does not wait for that drain.
    ///
    /// Idempotent: concurrent and repeated calls drain the pool at most
    /// once.
    pub fn shutdown(&self) {
        self.core.shutdown_workers();
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.core.shutdown_workers();
    }
}
