use thiserror::Error;

/// Everything that can end a benchmark run.
/// Only `FileOpen` is recovered from, by the driver that writes results.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid partition: {workers} workers over rows [{low}, {high})")]
    InvalidPartition {
        low: usize,
        high: usize,
        workers: usize,
    },

    #[error("Failed to allocate a {n}x{n} grid: {reason}")]
    Allocation { n: usize, reason: String },

    #[error("Failed to read clock: {0}")]
    Clock(std::io::Error),

    #[error("Failed to spawn worker {index}: {reason}")]
    WorkerSpawn { index: usize, reason: String },

    #[error("Worker for rows {rows} failed: {reason}")]
    WorkerJoin { rows: String, reason: String },

    #[error("Failed to open results file {path:?}: {source}")]
    FileOpen {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, BenchError>;
