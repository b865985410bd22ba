use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open image {path}: {source}")]
    ImageOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("image truncated: needed {needed} bytes at offset {offset:#x}, only {available} available")]
    TruncatedImage {
        offset: u64,
        needed: usize,
        available: usize,
    },

    #[error("short read: wanted {wanted} bytes at offset {offset:#x}, got {got}")]
    ShortRead {
        offset: u64,
        wanted: usize,
        got: usize,
    },

    #[error("corrupt cluster chain starting at cluster {start_cluster}: gave up after {steps} links")]
    CorruptChain { start_cluster: u16, steps: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
