use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for atinclude operations
#[derive(Error, Debug)]
pub enum IncludeError {
    /// IO error when reading files or walking directories
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A referenced include could not be read
    #[error("File not found: {path}")]
    MissingInclude { path: PathBuf },

    /// A discovered candidate could not be read as a file (e.g. it is a directory)
    #[error("Unreadable source: {path}")]
    UnreadableSource { path: PathBuf },

    /// The include chain re-entered a file or went deeper than the configured limit
    #[error("Cyclic include: {path} (depth {depth})")]
    CyclicInclude { path: PathBuf, depth: usize },

    /// Destination file or its parent directory could not be created
    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid include or exclude glob
    #[error("Glob error: {0}")]
    Glob(#[from] globset::Error),

    /// Error raised while walking a source directory
    #[error("Directory traversal error: {0}")]
    Walk(#[from] ignore::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IncludeError>;
