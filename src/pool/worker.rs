//! Worker threads and the task handoff protocol

use crate::core::{BoxedTask, PoolError, Result};
use crate::pool::worker_pool::PoolCore;
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

/// A directive delivered to a worker through its handoff channel
enum Directive {
    /// Execute the task, then rejoin the idle list
    Run(BoxedTask),
    /// Exit the execution loop permanently
    Retire,
}

/// Outcome of running a single task inside the panic boundary
enum TaskOutcome {
    Completed,
    Panicked(String),
}

/// Handle to a live worker: the pool-side end of the handoff channel.
///
/// The execution loop runs on a detached thread. Between tasks this handle
/// sits in the pool's idle list; taking it out and calling [`Worker::assign`]
/// is how a task reaches the thread.
pub(crate) struct Worker {
    id: usize,
    directives: Sender<Directive>,
}

impl Worker {
    /// Spawn a worker thread and return the handle for it.
    ///
    /// The handoff channel is a rendezvous channel, so every directive sent
    /// through the returned handle is taken by the execution loop before the
    /// send completes. A directive is never dropped or buffered.
    pub(crate) fn spawn(id: usize, core: Arc<PoolCore>) -> Result<Self> {
        let (directives, inbox) = bounded(0);
        let loop_directives = directives.clone();

        thread::Builder::new()
            .name(format!("{}-{}", core.thread_name_prefix(), id))
            .spawn(move || run_loop(id, loop_directives, inbox, core))
            .map_err(|source| PoolError::spawn(id, source))?;

        debug!("worker {} spawned", id);
        Ok(Self { id, directives })
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    /// Hand a task to the worker, blocking until its loop takes it.
    pub(crate) fn assign(self, task: BoxedTask) {
        self.directives
            .send(Directive::Run(task))
            .expect("worker execution loop terminated while its handle was live");
    }

    /// Tell the worker to exit its execution loop.
    pub(crate) fn retire(self) {
        let _ = self.directives.send(Directive::Retire);
    }
}

/// A worker's whole life: receive a directive, act on it, repeat.
///
/// The loop keeps its own sender clone so it can rebuild a [`Worker`] handle
/// and return itself to the idle list after each completed task. Every exit
/// path reports retirement so the pool's live count stays accurate.
fn run_loop(
    id: usize,
    directives: Sender<Directive>,
    inbox: Receiver<Directive>,
    core: Arc<PoolCore>,
) {
    loop {
        match inbox.recv() {
            Ok(Directive::Run(task)) => match execute(id, task) {
                TaskOutcome::Completed => {
                    core.note_task_completed();
                    let handle = Worker {
                        id,
                        directives: directives.clone(),
                    };
                    if !core.recycle(handle) {
                        // pool closed while the task ran
                        debug!("worker {} retiring after shutdown", id);
                        core.worker_retired(id);
                        break;
                    }
                }
                TaskOutcome::Panicked(reason) => {
                    error!("worker {} task panicked: {}", id, reason);
                    core.note_task_panicked();
                    core.worker_retired(id);
                    break;
                }
            },
            Ok(Directive::Retire) => {
                core.worker_retired(id);
                break;
            }
            Err(_) => {
                // every handle dropped without a retirement directive
                core.worker_retired(id);
                break;
            }
        }
    }
}

/// Run one task inside a panic boundary and tag what happened.
fn execute(id: usize, task: BoxedTask) -> TaskOutcome {
    debug!("worker {} executing {:?}", id, task);

    match catch_unwind(AssertUnwindSafe(|| task.run())) {
        Ok(()) => TaskOutcome::Completed,
        Err(payload) => TaskOutcome::Panicked(describe_panic(payload.as_ref())),
    }
}

/// Render a panic payload into something loggable.
fn describe_panic(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
