use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("failed to read workload {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid workload json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected end of input while reading {what}")]
    UnexpectedEof { what: &'static str },
    #[error("invalid {what}: {token:?} is not a non-negative integer")]
    InvalidNumber { what: &'static str, token: String },
    #[error("process {id} has no CPU bursts")]
    NoCpuBursts { id: u32 },
    #[error("process {id} has {cpu} CPU bursts but {io} I/O bursts (expected {})", cpu.saturating_sub(1))]
    BurstCountMismatch { id: u32, cpu: usize, io: usize },
    #[error("duplicate process id {id}")]
    DuplicateId { id: u32 },
}
