use anyhow::{Context, bail};
use clap::Parser;
use ringbyte::config::StressConfig;
use ringbyte::ring::{RingBuffer, RingError};
use ringbyte::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

const PATTERN_LEN: u64 = 251;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[inline]
fn pattern(n: u64) -> u8 {
    (n % PATTERN_LEN) as u8
}

fn run() -> anyhow::Result<()> {
    let config = StressConfig::parse();
    telemetry::init_tracing(&config.log);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    let mut storage = vec![0u8; config.capacity()];
    let ring = Mutex::new(RingBuffer::new(&mut storage));
    let producer_done = AtomicBool::new(false);
    let started = Instant::now();

    tracing::info!(
        capacity = config.capacity(),
        seconds = config.seconds,
        "mutex-guarded ring stress run"
    );

    let (written, full_retries, read) = std::thread::scope(|scope| {
        let producer = scope.spawn(|| -> anyhow::Result<(u64, u64)> {
            let mut count = 0u64;
            let mut retries = 0u64;

            while running.load(Ordering::Relaxed) && started.elapsed() < config.duration() {
                let result = ring
                    .lock()
                    .map_err(|_| anyhow::anyhow!("ring mutex poisoned"))?
                    .enqueue(pattern(count));
                match result {
                    Ok(()) => count += 1,
                    Err(RingError::Full) => {
                        retries += 1;
                        std::thread::yield_now();
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            Ok((count, retries))
        });

        let consumer = scope.spawn(|| -> anyhow::Result<u64> {
            let mut chunk = [0u8; 512];
            let mut count = 0u64;

            loop {
                let done = producer_done.load(Ordering::Acquire);
                let n = match ring.lock() {
                    Ok(mut ring) => ring.dequeue_into(&mut chunk),
                    Err(_) => bail!("ring mutex poisoned"),
                };

                for &byte in &chunk[..n] {
                    if byte != pattern(count) {
                        bail!(
                            "FIFO order broken at byte {}: expected {}, got {}",
                            count,
                            pattern(count),
                            byte
                        );
                    }
                    count += 1;
                }

                if n == 0 {
                    if done {
                        break;
                    }
                    std::thread::yield_now();
                }
            }

            Ok(count)
        });

        let produced = producer
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"));
        producer_done.store(true, Ordering::Release);
        let (written, retries) = produced??;
        let read = consumer
            .join()
            .map_err(|_| anyhow::anyhow!("consumer thread panicked"))??;
        anyhow::Ok((written, retries, read))
    })?;

    let elapsed = started.elapsed().as_secs_f64();
    if written != read {
        bail!("lost bytes: wrote {}, read {}", written, read);
    }

    tracing::info!(
        written,
        read,
        full_retries,
        throughput_mb_s = written as f64 / elapsed / 1_000_000.0,
        "stress run finished, FIFO order verified"
    );
    Ok(())
}
