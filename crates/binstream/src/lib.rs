//! Typed binary file streams with configurable byte order.
//!
//! binstream reads and writes primitive scalars, null-terminated text, and
//! fixed-size plain-data records over one seekable OS file handle. Every
//! multi-byte value is packed per the stream's byte order (little-endian
//! default, switchable per stream).
//!
//! # Crate Structure
//!
//! - [`handle`] — OS file handle layer (open modes, seek, stat, truncate, sync)
//! - [`codec`] — Byte-order-aware scalar, text, and record codecs
//! - [`TypedStream`] — The combined stream facade

pub mod error;
pub mod stream;

/// Re-export handle types.
pub mod handle {
    pub use binstream_handle::*;
}

/// Re-export codec types.
pub mod codec {
    pub use binstream_codec::*;
}

pub use binstream_codec::{ByteOrder, Codepage, Field, FieldKind, FieldValue, Record, RecordLayout};
pub use binstream_handle::OpenMode;
pub use error::{Result, StreamError};
pub use stream::{TypedStream, CHUNK_SIZE, END_OF_FILE};
