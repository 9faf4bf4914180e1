use anyhow::Context;
use clap::Parser;
use ringbyte::config::DemoConfig;
use ringbyte::consumer::{ByteDispatcher, DrainStats, LineConsumer};
use ringbyte::ring::RingBuffer;
use ringbyte::storage::MmapRegion;
use ringbyte::telemetry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(10);
const MAX_COMMAND_LEN: usize = 64;

/// Stands in for a serial peripheral: an endless stream of short commands.
struct SimulatedUart {
    seq: u64,
    line: Vec<u8>,
    pos: usize,
}

impl SimulatedUart {
    fn new() -> Self {
        Self {
            seq: 0,
            line: Vec::new(),
            pos: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        if self.pos == self.line.len() {
            self.line.clear();
            self.line
                .extend_from_slice(format!("ping {}\r\n", self.seq).as_bytes());
            self.seq += 1;
            self.pos = 0;
        }
        let byte = self.line[self.pos];
        self.pos += 1;
        byte
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = DemoConfig::parse();
    telemetry::init_tracing(&config.log);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        tracing::info!("shutting down");
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    let mut region = match &config.storage {
        Some(path) => MmapRegion::create(path, config.capacity())
            .with_context(|| format!("failed to map {}", path.display()))?,
        None => MmapRegion::anonymous(config.capacity()).context("failed to map ring storage")?,
    };

    let commands = Arc::new(AtomicU64::new(0));
    let seen = commands.clone();
    let mut dispatcher = ByteDispatcher::new();
    dispatcher.add_consumer(LineConsumer::new(MAX_COMMAND_LEN, move |line: &[u8]| {
        tracing::trace!(command = %String::from_utf8_lossy(line), "parsed command");
        seen.fetch_add(1, Ordering::Relaxed);
    }));

    let file_backed = region.is_file_backed();
    let mut ring = RingBuffer::uninit();
    ring.init(config.capacity(), region.as_mut_slice())?;

    let mut uart = SimulatedUart::new();
    let mut received = 0u64;
    let mut overwritten = 0u64;
    let mut totals = DrainStats::default();
    let mut last_report = Instant::now();

    tracing::info!(
        capacity = ring.capacity(),
        rate = config.rate,
        file_backed,
        "service running, press Ctrl+C to stop"
    );

    while running.load(Ordering::SeqCst) {
        for _ in 0..config.rate {
            if ring.enqueue_overwrite(uart.next_byte())?.is_some() {
                overwritten += 1;
            }
            received += 1;
        }

        totals.merge(dispatcher.drain(&mut ring));

        if last_report.elapsed() >= config.report_interval() {
            tracing::info!(
                received,
                overwritten,
                drained = totals.bytes_read,
                commands = commands.load(Ordering::Relaxed),
                success_rate = totals.success_rate(),
                ring_used = ring.len(),
                ring_free = ring.free(),
                "status"
            );
            last_report = Instant::now();
        }

        std::thread::sleep(TICK);
    }

    drop(ring);
    region.flush().context("failed to flush ring storage")?;

    tracing::info!(
        received,
        overwritten,
        commands = commands.load(Ordering::Relaxed),
        "stopped"
    );
    Ok(())
}
