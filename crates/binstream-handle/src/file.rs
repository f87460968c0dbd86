use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HandleError, Result};
use crate::mode::OpenMode;

/// One exclusively owned OS file handle.
///
/// Wraps `std::fs::File` with the path retained for error context. All
/// operations map directly to blocking OS calls; the handle is released
/// when the value is dropped.
pub struct FileHandle {
    file: File,
    path: PathBuf,
}

impl FileHandle {
    /// Default permission mode for created files (before umask).
    pub const DEFAULT_FILE_MODE: u32 = 0o666;

    /// Open an existing file with the given access mode.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = Self::options(mode)
            .open(&path)
            .map_err(|e| HandleError::Open {
                path: path.clone(),
                source: e,
            })?;

        debug!(?path, mode = mode.bits(), "opened file");
        Ok(Self { file, path })
    }

    /// Create a file (or open it if it already exists) with the given
    /// access mode and permissive default permissions.
    pub fn create(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut options = Self::options(mode);
        options.create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(Self::DEFAULT_FILE_MODE);
        }

        let file = options.open(&path).map_err(|e| HandleError::Create {
            path: path.clone(),
            source: e,
        })?;

        debug!(?path, mode = mode.bits(), "created file");
        Ok(Self { file, path })
    }

    fn options(mode: OpenMode) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(mode.readable()).write(mode.writable());
        options
    }

    /// Current file size, queried from the OS.
    pub fn len(&self) -> Result<u64> {
        let metadata = self.file.metadata()?;
        Ok(metadata.len())
    }

    /// Returns true if the file is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Seek the handle, returning the new absolute offset.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        Ok(self.file.seek(pos)?)
    }

    /// Truncate or extend the file to exactly `len` bytes. Extension
    /// zero-fills; the handle position is left untouched by the OS.
    pub fn set_len(&self, len: u64) -> Result<()> {
        debug!(path = ?self.path, len, "truncating file");
        self.file.set_len(len)?;
        Ok(())
    }

    /// Flush OS-level buffers to durable storage (fsync).
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// The path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for FileHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl std::fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("path", &self.path)
            .finish()
    }
}
