//! Byte-order-aware encode/decode for binstream.
//!
//! Pure, I/O-free codecs. Every multi-byte scalar is packed or unpacked
//! under an explicit [`ByteOrder`]; decoding a slice shorter than the
//! scalar's width is a typed `ShortRead` error, never an out-of-range
//! index. Text encode/decode is selected by [`Codepage`] identifier, and
//! fixed-size plain-data records are described by a [`RecordLayout`] and
//! decoded field by field — no raw memory reinterpretation anywhere.

pub mod error;
pub mod order;
pub mod record;
pub mod text;

pub use error::{CodecError, Result};
pub use order::ByteOrder;
pub use record::{Field, FieldKind, FieldValue, Record, RecordLayout};
pub use text::Codepage;
