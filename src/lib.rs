pub mod config;
pub mod consumer;
pub mod ring;
pub mod storage;
pub mod telemetry;
