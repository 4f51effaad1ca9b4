//! Backpressure example
//!
//! Shows that `submit` blocks the calling thread while every worker is busy,
//! and returns as soon as one frees up.
//!
//! Run with: cargo run --example backpressure

use crossbeam_channel::bounded;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use warmpool::prelude::*;

fn main() -> Result<()> {
    println!("=== Warmpool - Backpressure Example ===\n");

    let pool = WorkerPool::with_capacity(2)?;
    println!("1. Created a pool with capacity {}", pool.capacity());

    println!("\n2. Occupying both workers with long-running tasks");

    let (release_tx, release_rx) = bounded::<()>(0);
    let (started_tx, started_rx) = mpsc::channel();
    for i in 0..2 {
        let release_rx = release_rx.clone();
        let started_tx = started_tx.clone();
        pool.submit(move || {
            let _ = started_tx.send(());
            println!("  Blocker {} holding a worker until released", i);
            let _ = release_rx.recv();
            println!("  Blocker {} released", i);
        })?;
    }
    for _ in 0..2 {
        let _ = started_rx.recv();
    }
    println!("   Both workers are now busy ({} running)", pool.running());

    println!("\n3. Submitting a third task; the call blocks until a worker frees up");

    // Release one blocker from the side so the blocked submit can proceed
    let unblocker = thread::spawn(move || {
        thread::sleep(Duration::from_millis(300));
        println!("  [side thread] releasing one worker");
        let _ = release_tx.send(());
        release_tx
    });

    let (done_tx, done_rx) = mpsc::channel();
    let begin = Instant::now();
    pool.submit(move || {
        let _ = done_tx.send(());
    })?;
    println!("   Submit returned after {:?}", begin.elapsed());

    let _ = done_rx.recv();
    println!("   Third task finished");

    println!("\n4. Releasing the remaining worker");
    let release_tx = unblocker.join().expect("releasing thread panicked");
    let _ = release_tx.send(());

    // Give the workers a moment to check back in
    thread::sleep(Duration::from_millis(50));
    println!("   Live workers: {}", pool.running());
    println!("   Idle workers: {}", pool.idle_workers());

    println!("\n5. Shutting down the pool...");
    pool.shutdown();

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
