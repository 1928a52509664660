use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for blobpack operations
#[derive(Error, Debug)]
pub enum BlobpackError {
    /// IO error when reading files or directories
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input path is missing or has the wrong kind (file vs directory)
    #[error("Invalid input: {path}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    /// Output file or directory could not be created or written
    #[error("Failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Regex compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// `WalkDir` error when traversing directories
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, BlobpackError>;
