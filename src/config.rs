use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Simulated UART receive path: bytes arrive on a timer, land in a ring with
/// the overwrite policy and are drained into a line parser.
#[derive(Debug, Clone, Parser)]
#[command(name = "ringbyte", version)]
pub struct DemoConfig {
    /// Ring capacity in bytes
    #[arg(long, env = "RINGBYTE_CAPACITY", default_value_t = 256, value_parser = clap::value_parser!(u32).range(1..))]
    pub capacity: u32,

    /// Bytes "received" per 10ms tick
    #[arg(long, env = "RINGBYTE_RATE", default_value_t = 64)]
    pub rate: usize,

    /// Seconds between status reports
    #[arg(long, env = "RINGBYTE_REPORT_SECS", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub report_secs: u64,

    /// Back the ring with this file instead of anonymous memory
    #[arg(long, env = "RINGBYTE_STORAGE")]
    pub storage: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log: String,
}

impl DemoConfig {
    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_secs)
    }
}

/// Two threads sharing one mutex-guarded ring under the reject policy.
#[derive(Debug, Clone, Parser)]
#[command(name = "stress", version)]
pub struct StressConfig {
    /// Ring capacity in bytes
    #[arg(long, env = "RINGBYTE_CAPACITY", default_value_t = 4096, value_parser = clap::value_parser!(u32).range(1..))]
    pub capacity: u32,

    /// How long to run before stopping on its own
    #[arg(long, default_value_t = 5)]
    pub seconds: u64,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log: String,
}

impl StressConfig {
    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.seconds)
    }
}
