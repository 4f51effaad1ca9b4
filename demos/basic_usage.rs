//! Basic worker pool usage example
//!
//! Demonstrates pool creation, task submission, warm worker reuse, and the
//! pool counters.
//!
//! Run with: cargo run --example basic_usage

use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use warmpool::prelude::*;

fn main() -> Result<()> {
    // RUST_LOG=debug shows the worker lifecycle events
    env_logger::init();

    println!("=== Warmpool - Basic Usage Example ===\n");

    let pool = WorkerPool::with_capacity(4)?;

    println!("1. Created a pool with capacity {}", pool.capacity());
    println!("   Live workers before any work: {}", pool.running());

    println!("\n2. Submitting simple tasks:");

    // Worker threads spawn on demand as these come in
    let (tx, rx) = mpsc::channel();
    for i in 0..10 {
        let tx = tx.clone();
        pool.submit(move || {
            let worker = thread::current();
            println!(
                "  Task {} running on {}",
                i,
                worker.name().unwrap_or("unnamed")
            );
            thread::sleep(Duration::from_millis(20));
            let _ = tx.send(i);
        })?;
    }
    drop(tx);

    println!("   Submitted 10 tasks");

    let finished: Vec<i32> = rx.iter().collect();
    println!("   All {} tasks finished", finished.len());

    // Give the workers a moment to check back in
    thread::sleep(Duration::from_millis(50));

    println!("\n3. Pool state after the burst:");
    println!("   Capacity:     {}", pool.capacity());
    println!("   Live workers: {}", pool.running());
    println!("   Idle workers: {}", pool.idle_workers());

    println!("\n4. Task counters:");
    println!("   Submitted: {}", pool.tasks_submitted());
    println!("   Completed: {}", pool.tasks_completed());
    println!("   Panicked:  {}", pool.tasks_panicked());

    println!("\n5. Submitting one more task, which reuses an idle worker:");
    let (tx, rx) = mpsc::channel();
    pool.submit(move || {
        let worker = thread::current();
        let _ = tx.send(worker.name().map(str::to_owned));
    })?;
    if let Ok(Some(name)) = rx.recv() {
        println!("   Task ran on already-warm worker {}", name);
    }

    println!("\n6. Shutting down the pool...");
    pool.shutdown();
    match pool.submit(|| {}) {
        Err(err) => println!("   Submitting afterwards fails: {}", err),
        Ok(()) => println!("   Submitting afterwards unexpectedly succeeded"),
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
