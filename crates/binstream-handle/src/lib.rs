//! Seekable OS file handle abstraction.
//!
//! Provides a unified, error-contextual wrapper over one OS file handle:
//! - Open mode flags (READ / WRITE / READWRITE bitmask)
//! - Seek, stat, truncate, and sync with typed failures
//! - Raw `Read`/`Write` delegation to the underlying handle
//!
//! This is the lowest layer of binstream. Everything else builds on top of
//! the [`FileHandle`] type provided here.

pub mod error;
pub mod file;
pub mod mode;

pub use error::{HandleError, Result};
pub use file::FileHandle;
pub use mode::OpenMode;
