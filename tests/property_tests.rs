//! Property-based tests for warmpool using proptest

use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use warmpool::prelude::*;

/// Poll a condition until it holds or a generous deadline elapses.
fn holds_within<F: Fn() -> bool>(condition: F) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}

// ============================================================================
// PoolConfig Properties
// ============================================================================

proptest! {
    /// Any capacity, including zero, round-trips through the config
    #[test]
    fn config_capacity_round_trips(capacity in 0usize..64) {
        let config = PoolConfig::new(capacity);
        prop_assert_eq!(config.capacity, capacity);

        let pool = WorkerPool::with_config(config);
        prop_assert_eq!(pool.capacity(), capacity);
        prop_assert_eq!(pool.running(), 0);
    }

    /// Thread name prefixes are stored as given
    #[test]
    fn config_prefix_round_trips(prefix in "[a-z]{3,10}") {
        let config = PoolConfig::new(2).with_thread_name_prefix(&prefix);
        prop_assert_eq!(config.thread_name_prefix, prefix);
    }
}

// ============================================================================
// Construction Properties
// ============================================================================

proptest! {
    /// Non-negative capacities are always accepted
    #[test]
    fn non_negative_capacities_are_accepted(capacity in 0i64..1024) {
        let result = WorkerPool::with_capacity(capacity);
        prop_assert!(result.is_ok());
    }

    /// Negative capacities are always rejected
    #[test]
    fn negative_capacities_are_rejected(capacity in i64::MIN..0) {
        let result = WorkerPool::with_capacity(capacity);
        prop_assert!(matches!(result, Err(PoolError::InvalidCapacity)));
    }
}

// ============================================================================
// Task Execution Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every accepted task runs exactly once, whatever the capacity
    #[test]
    fn every_submitted_task_runs_exactly_once(
        capacity in 1usize..6,
        task_count in 1usize..40,
    ) {
        let pool = WorkerPool::with_capacity(capacity).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..task_count {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }).unwrap();
        }

        prop_assert!(
            holds_within(|| counter.load(Ordering::SeqCst) == task_count),
            "only {} of {} tasks ran",
            counter.load(Ordering::SeqCst),
            task_count
        );
        prop_assert_eq!(pool.tasks_submitted(), task_count as u64);
        prop_assert!(holds_within(|| pool.tasks_completed() == task_count as u64));

        pool.shutdown();
    }

    /// The live worker count never exceeds the configured capacity
    #[test]
    fn live_workers_never_exceed_capacity(
        capacity in 1usize..4,
        task_count in 1usize..24,
    ) {
        let pool = WorkerPool::with_capacity(capacity).unwrap();

        for _ in 0..task_count {
            pool.submit(|| thread::sleep(Duration::from_micros(50))).unwrap();
            prop_assert!(
                pool.running() <= capacity,
                "{} live workers in a pool of capacity {}",
                pool.running(),
                capacity
            );
        }

        pool.shutdown();
    }
}

// ============================================================================
// Shutdown Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Shutdown never panics, repeated shutdown included, and the pool
    /// refuses tasks afterwards
    #[test]
    fn shutdown_is_always_safe(capacity in 0usize..8) {
        let pool = WorkerPool::with_capacity(capacity).unwrap();

        // a saturated zero-capacity pool would block, so stay within bounds
        for _ in 0..capacity.min(4) {
            pool.submit(|| {}).unwrap();
        }

        pool.shutdown();
        pool.shutdown();

        prop_assert!(pool.is_closed());
        prop_assert!(
            matches!(pool.submit(|| {}), Err(PoolError::PoolClosed { .. })),
            "submit after shutdown must return PoolClosed"
        );
    }
}
