//! Error types for the worker pool

/// Result type for worker pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors that can occur in the worker pool
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PoolError {
    /// Requested capacity cannot be represented as a worker count
    #[error("Invalid pool capacity: negative or out of range")]
    InvalidCapacity,

    /// Pool has been shut down and no longer accepts tasks
    #[error("Worker pool '{pool_name}' is closed")]
    PoolClosed {
        /// Name of the worker pool
        pool_name: String,
    },

    /// Failed to spawn a worker thread
    #[error("Failed to spawn worker thread #{worker_id}")]
    SpawnWorker {
        /// ID of the worker that failed to spawn
        worker_id: usize,
        /// Source IO error
        #[source]
        source: std::io::Error,
    },
}

impl PoolError {
    /// Create a pool closed error
    pub fn closed(pool_name: impl Into<String>) -> Self {
        PoolError::PoolClosed {
            pool_name: pool_name.into(),
        }
    }

    /// Create a spawn error
    pub fn spawn(worker_id: usize, source: std::io::Error) -> Self {
        PoolError::SpawnWorker { worker_id, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PoolError::closed("primary");
        assert!(matches!(err, PoolError::PoolClosed { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = PoolError::spawn(5, io_err);
        assert!(matches!(err, PoolError::SpawnWorker { worker_id: 5, .. }));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PoolError::InvalidCapacity.to_string(),
            "Invalid pool capacity: negative or out of range"
        );

        let err = PoolError::closed("crawler");
        assert_eq!(err.to_string(), "Worker pool 'crawler' is closed");
    }

    #[test]
    fn test_spawn_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::WouldBlock, "out of threads");
        let err = PoolError::spawn(3, io_err);

        assert!(err.to_string().contains("worker thread #3"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
