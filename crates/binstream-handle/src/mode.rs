//! File access mode flags.
//!
//! A small bitmask matching the classic READ=1 / WRITE=2 triple. READ and
//! WRITE combine with `|` into READWRITE; the mapping to OS open flags is
//! read-only / write-only / read-write respectively.

use std::ops::BitOr;

/// Access mode bitmask for opening a file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpenMode(u32);

impl OpenMode {
    /// Read access.
    pub const READ: OpenMode = OpenMode(1);
    /// Write access.
    pub const WRITE: OpenMode = OpenMode(1 << 1);
    /// Read and write access.
    pub const READWRITE: OpenMode = OpenMode(Self::READ.0 | Self::WRITE.0);

    /// Raw bitmask value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every flag in `other` is set in `self`.
    pub const fn contains(self, other: OpenMode) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the OS handle should be opened with read access.
    ///
    /// READWRITE takes precedence over the individual flags.
    pub const fn readable(self) -> bool {
        self.contains(Self::READWRITE) || self.contains(Self::READ)
    }

    /// Whether the OS handle should be opened with write access.
    pub const fn writable(self) -> bool {
        self.contains(Self::READWRITE) || self.contains(Self::WRITE)
    }
}

impl BitOr for OpenMode {
    type Output = OpenMode;

    fn bitor(self, rhs: OpenMode) -> OpenMode {
        OpenMode(self.0 | rhs.0)
    }
}

impl Default for OpenMode {
    fn default() -> Self {
        Self::READ
    }
}
