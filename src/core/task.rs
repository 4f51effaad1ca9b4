//! Task trait and related types

use std::fmt;

/// A trait representing a unit of work executed once on a pool worker
///
/// Tasks carry no return channel; anything a task produces must be
/// reported through its own captured state (a channel, an atomic, a lock).
pub trait Task: Send {
    /// Run the task, consuming it
    fn run(self: Box<Self>);

    /// Get the task's label for diagnostics and logging
    fn label(&self) -> &str {
        "task"
    }
}

impl fmt::Debug for dyn Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({})", self.label())
    }
}

/// A boxed task that can be sent across threads
pub type BoxedTask = Box<dyn Task>;

impl<F> Task for F
where
    F: FnOnce() + Send,
{
    fn run(self: Box<Self>) {
        (*self)()
    }
}

/// Helper that attaches a custom label to a closure
pub struct NamedTask<F>
where
    F: FnOnce() + Send,
{
    closure: F,
    label: String,
}

impl<F> NamedTask<F>
where
    F: FnOnce() + Send,
{
    /// Create a labeled task from a closure
    pub fn new<S: Into<String>>(label: S, closure: F) -> Self {
        Self {
            closure,
            label: label.into(),
        }
    }
}

impl<F> Task for NamedTask<F>
where
    F: FnOnce() + Send,
{
    fn run(self: Box<Self>) {
        (self.closure)()
    }

    fn label(&self) -> &str {
        &self.label
    }
}
