use std::path::PathBuf;

/// Errors that can occur on the underlying OS file handle.
#[derive(Debug, thiserror::Error)]
pub enum HandleError {
    /// Failed to open an existing file.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create a file.
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An I/O error occurred on the open handle (seek, read, write,
    /// stat, truncate, or sync).
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HandleError>;
