use std::io::{ErrorKind, Read, SeekFrom, Write};
use std::path::Path;

use bytes::{Bytes, BytesMut};
use tracing::debug;

use binstream_codec::{text, ByteOrder, Codepage, CodecError, FieldValue, Record, RecordLayout};
use binstream_handle::{FileHandle, HandleError, OpenMode};

use crate::error::Result;

/// Fixed chunk size for raw reads.
pub const CHUNK_SIZE: usize = 1024;

/// Sentinel offset for [`TypedStream::set_position`]: seek to end of file.
pub const END_OF_FILE: i64 = -1;

/// A typed binary stream over one seekable OS file handle.
///
/// Combines position/length management, chunked raw I/O, byte-order-aware
/// scalar codecs, and codepage text delegation behind one surface. The
/// byte order is a per-stream field (little-endian default), set at
/// construction and changed only through [`set_byte_order`](Self::set_byte_order).
///
/// Every operation maps to a blocking OS call; one handle is owned
/// exclusively by one stream, and `&mut self` on every read/write/seek
/// leaves serialization to the caller.
pub struct TypedStream {
    handle: FileHandle,
    order: ByteOrder,
}

impl TypedStream {
    /// Open an existing file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_mode(path, OpenMode::READ)
    }

    /// Create (or open) a file read-write with permissive default
    /// permissions.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let handle = FileHandle::create(path, OpenMode::READWRITE)?;
        Ok(Self::from_handle(handle))
    }

    /// Open an existing file with an explicit access mode.
    pub fn open_with_mode(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let handle = FileHandle::open(path, mode)?;
        Ok(Self::from_handle(handle))
    }

    /// Wrap an already-open handle.
    pub fn from_handle(handle: FileHandle) -> Self {
        Self {
            handle,
            order: ByteOrder::default(),
        }
    }

    /// Release the handle. Subsequent use is unrepresentable — the stream
    /// is consumed.
    pub fn close(self) {
        debug!(path = ?self.handle.path(), "closing stream");
        drop(self.handle);
    }

    /// The active byte order.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Switch the byte order for subsequent multi-byte operations.
    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Borrow the underlying handle.
    pub fn get_ref(&self) -> &FileHandle {
        &self.handle
    }

    /// Consume the stream and return the underlying handle.
    pub fn into_inner(self) -> FileHandle {
        self.handle
    }

    // ------------------------------------------------------------------
    // Length & position
    // ------------------------------------------------------------------

    /// Current file size, queried from the OS.
    pub fn len(&self) -> Result<u64> {
        Ok(self.handle.len()?)
    }

    /// Returns true if the file is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Truncate or extend the file to exactly `len` bytes.
    ///
    /// Growing the file while the position sits beyond the new accessible
    /// range first forces extension by writing a single zero byte at
    /// `len`. The final position is `min(original position, len)`;
    /// extension zero-fills.
    pub fn set_len(&mut self, len: u64) -> Result<()> {
        let pos = self.position()?;
        let current = self.len()?;

        if len > current && pos > len {
            self.handle.seek(SeekFrom::Start(len))?;
            self.write_raw(&[0])?;
        }

        self.handle.set_len(len)?;
        self.handle.seek(SeekFrom::Start(pos.min(len)))?;
        Ok(())
    }

    /// Current offset from the start of the file.
    pub fn position(&mut self) -> Result<u64> {
        self.seek(SeekFrom::Current(0))
    }

    /// Seek to `offset` from the start; the sentinel [`END_OF_FILE`]
    /// (−1) seeks to the end instead.
    pub fn set_position(&mut self, offset: i64) -> Result<u64> {
        if offset == END_OF_FILE {
            return self.seek(SeekFrom::End(0));
        }

        let offset = u64::try_from(offset).map_err(|_| {
            HandleError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("negative offset {offset} is not a valid position"),
            ))
        })?;
        self.seek(SeekFrom::Start(offset))
    }

    /// Seek the stream, returning the new absolute offset.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        Ok(self.handle.seek(pos)?)
    }

    /// Bytes between the current position and the end of the file.
    pub fn remaining(&mut self) -> Result<u64> {
        let len = self.len()?;
        let pos = self.position()?;
        Ok(len.saturating_sub(pos))
    }

    /// Whether the position has reached the end of the file.
    pub fn is_eof(&mut self) -> Result<bool> {
        let len = self.len()?;
        let pos = self.position()?;
        Ok(pos >= len)
    }

    // ------------------------------------------------------------------
    // Raw byte transfer
    // ------------------------------------------------------------------

    /// Read up to `n` bytes from the current position.
    ///
    /// Loops over a fixed [`CHUNK_SIZE`] buffer until `n` bytes are
    /// collected or the handle reports end-of-stream. End-of-stream is
    /// not an error: the accumulated bytes are returned, possibly fewer
    /// than `n`, possibly none.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        let mut data = BytesMut::with_capacity(n.min(CHUNK_SIZE));
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut left = n;

        while left > 0 {
            let want = left.min(CHUNK_SIZE);
            let read = match self.handle.read(&mut chunk[..want]) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(HandleError::Io(err).into()),
            };

            if read == 0 {
                break;
            }

            data.extend_from_slice(&chunk[..read]);
            left -= read;
        }

        Ok(data.freeze())
    }

    /// Read everything from the current position to the end of the file.
    ///
    /// The remaining length is computed once at entry; chunked reads are
    /// repeated until no further bytes come back.
    pub fn read_all(&mut self) -> Result<Bytes> {
        let mut left = self.remaining()?;
        let mut data = BytesMut::new();

        while left > 0 {
            let chunk = self.read_bytes(left as usize)?;
            if chunk.is_empty() {
                break;
            }
            left -= chunk.len() as u64;
            data.extend_from_slice(&chunk);
        }

        Ok(data.freeze())
    }

    /// Read exactly `n` bytes or fail with an insufficient-data error.
    fn read_exact_bytes(&mut self, n: usize) -> Result<Bytes> {
        let data = self.read_bytes(n)?;
        if data.len() < n {
            return Err(CodecError::ShortRead {
                needed: n,
                available: data.len(),
            }
            .into());
        }
        Ok(data)
    }

    /// Write a byte slice verbatim, retrying interrupted writes.
    fn write_raw(&mut self, data: &[u8]) -> Result<usize> {
        let mut offset = 0usize;
        while offset < data.len() {
            match self.handle.write(&data[offset..]) {
                Ok(0) => {
                    return Err(HandleError::Io(std::io::Error::new(
                        ErrorKind::WriteZero,
                        "file handle accepted no bytes",
                    ))
                    .into())
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(HandleError::Io(err).into()),
            }
        }
        Ok(data.len())
    }

    /// Flush OS-level buffers to durable storage.
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.handle.sync()?)
    }

    // ------------------------------------------------------------------
    // Typed writers
    // ------------------------------------------------------------------

    /// Write a boolean as one byte (1 or 0).
    pub fn write_bool(&mut self, value: bool) -> Result<usize> {
        self.write_u8(value as u8)
    }

    pub fn write_i8(&mut self, value: i8) -> Result<usize> {
        self.write_raw(&[value as u8])
    }

    pub fn write_u8(&mut self, value: u8) -> Result<usize> {
        self.write_raw(&[value])
    }

    pub fn write_i16(&mut self, value: i16) -> Result<usize> {
        let mut buf = BytesMut::with_capacity(2);
        self.order.put_i16(&mut buf, value);
        self.write_raw(&buf)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<usize> {
        let mut buf = BytesMut::with_capacity(2);
        self.order.put_u16(&mut buf, value);
        self.write_raw(&buf)
    }

    pub fn write_i32(&mut self, value: i32) -> Result<usize> {
        let mut buf = BytesMut::with_capacity(4);
        self.order.put_i32(&mut buf, value);
        self.write_raw(&buf)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<usize> {
        let mut buf = BytesMut::with_capacity(4);
        self.order.put_u32(&mut buf, value);
        self.write_raw(&buf)
    }

    pub fn write_i64(&mut self, value: i64) -> Result<usize> {
        let mut buf = BytesMut::with_capacity(8);
        self.order.put_i64(&mut buf, value);
        self.write_raw(&buf)
    }

    pub fn write_u64(&mut self, value: u64) -> Result<usize> {
        let mut buf = BytesMut::with_capacity(8);
        self.order.put_u64(&mut buf, value);
        self.write_raw(&buf)
    }

    pub fn write_f32(&mut self, value: f32) -> Result<usize> {
        let mut buf = BytesMut::with_capacity(4);
        self.order.put_f32(&mut buf, value);
        self.write_raw(&buf)
    }

    pub fn write_f64(&mut self, value: f64) -> Result<usize> {
        let mut buf = BytesMut::with_capacity(8);
        self.order.put_f64(&mut buf, value);
        self.write_raw(&buf)
    }

    /// Write a byte sequence verbatim.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<usize> {
        self.write_raw(data)
    }

    /// Encode and write text under a codepage (no terminator is
    /// appended).
    pub fn write_text(&mut self, value: &str, codepage: Codepage) -> Result<usize> {
        let encoded = text::encode(value, codepage);
        self.write_raw(&encoded)
    }

    /// Encode and write one record's values per the layout.
    pub fn write_record(&mut self, layout: &RecordLayout, values: &[FieldValue]) -> Result<usize> {
        let encoded = layout.encode(values, self.order)?;
        self.write_raw(&encoded)
    }

    // ------------------------------------------------------------------
    // Typed readers
    // ------------------------------------------------------------------

    /// Read one byte; nonzero is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let raw = self.read_exact_bytes(1)?;
        Ok(raw[0])
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let raw = self.read_exact_bytes(2)?;
        Ok(self.order.read_i16(&raw)?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let raw = self.read_exact_bytes(2)?;
        Ok(self.order.read_u16(&raw)?)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let raw = self.read_exact_bytes(4)?;
        Ok(self.order.read_i32(&raw)?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let raw = self.read_exact_bytes(4)?;
        Ok(self.order.read_u32(&raw)?)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let raw = self.read_exact_bytes(8)?;
        Ok(self.order.read_i64(&raw)?)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let raw = self.read_exact_bytes(8)?;
        Ok(self.order.read_u64(&raw)?)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let raw = self.read_exact_bytes(4)?;
        Ok(self.order.read_f32(&raw)?)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let raw = self.read_exact_bytes(8)?;
        Ok(self.order.read_f64(&raw)?)
    }

    // ------------------------------------------------------------------
    // Text readers
    // ------------------------------------------------------------------

    /// Read single bytes to a zero terminator (excluded) and decode under
    /// the given codepage.
    ///
    /// End-of-file before the terminator is an insufficient-data error.
    pub fn read_text(&mut self, codepage: Codepage) -> Result<String> {
        let mut bytes = Vec::new();
        loop {
            let byte = self.read_u8()?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        Ok(text::decode(&bytes, codepage)?)
    }

    /// Read a UTF-8 null-terminated string.
    pub fn read_text_utf8(&mut self) -> Result<String> {
        self.read_text(Codepage::Utf8)
    }

    /// Read 16-bit units per the active byte order to a zero unit
    /// (excluded) and decode as UTF-16 of the matching endianness.
    pub fn read_utf16(&mut self) -> Result<String> {
        let codepage = Codepage::utf16_for(self.order);
        let mut bytes = Vec::new();
        loop {
            let unit = self.read_u16()?;
            if unit == 0 {
                break;
            }
            match self.order {
                ByteOrder::Little => bytes.extend_from_slice(&unit.to_le_bytes()),
                ByteOrder::Big => bytes.extend_from_slice(&unit.to_be_bytes()),
            }
        }
        Ok(text::decode(&bytes, codepage)?)
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    /// Read exactly one record's worth of bytes and decode it field by
    /// field per the layout and the active byte order.
    pub fn read_record(&mut self, layout: &RecordLayout) -> Result<Record> {
        let raw = self.read_exact_bytes(layout.byte_len())?;
        Ok(layout.decode(&raw, self.order)?)
    }
}

impl std::fmt::Debug for TypedStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedStream")
            .field("path", &self.handle.path())
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamError;

    fn scratch(name: &str) -> (tempfile::TempDir, TypedStream) {
        let dir = tempfile::tempdir().unwrap();
        let stream = TypedStream::create(dir.path().join(name)).unwrap();
        (dir, stream)
    }

    #[test]
    fn open_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.bin");
        std::fs::write(&path, b"data").unwrap();

        let mut stream = TypedStream::open(&path).unwrap();
        assert_eq!(stream.read_all().unwrap().as_ref(), b"data");
        assert!(stream.write_u8(1).is_err());
    }

    #[test]
    fn write_advances_position_by_encoded_width() {
        let (_dir, mut stream) = scratch("advance.bin");

        stream.write_bool(true).unwrap();
        assert_eq!(stream.position().unwrap(), 1);
        stream.write_u16(7).unwrap();
        assert_eq!(stream.position().unwrap(), 3);
        stream.write_u32(7).unwrap();
        assert_eq!(stream.position().unwrap(), 7);
        stream.write_f64(7.0).unwrap();
        assert_eq!(stream.position().unwrap(), 15);
    }

    #[test]
    fn endianness_cross_read_example() {
        let (_dir, mut stream) = scratch("endian.bin");

        stream.write_u32(0x1234_5678).unwrap();
        stream.set_position(0).unwrap();
        assert_eq!(stream.read_u32().unwrap(), 0x1234_5678);

        stream.set_byte_order(ByteOrder::Big);
        stream.set_position(0).unwrap();
        assert_eq!(stream.read_u32().unwrap(), 0x7856_3412);
    }

    #[test]
    fn set_position_sentinel_seeks_to_end() {
        let (_dir, mut stream) = scratch("sentinel.bin");
        stream.write_bytes(b"0123456789").unwrap();

        stream.set_position(2).unwrap();
        assert_eq!(stream.position().unwrap(), 2);

        assert_eq!(stream.set_position(END_OF_FILE).unwrap(), 10);
        assert!(stream.is_eof().unwrap());
    }

    #[test]
    fn negative_position_other_than_sentinel_rejected() {
        let (_dir, mut stream) = scratch("negative.bin");
        assert!(stream.set_position(-2).is_err());
    }

    #[test]
    fn truncate_clamps_position() {
        let (_dir, mut stream) = scratch("truncate.bin");
        stream.write_bytes(b"0123456789").unwrap();
        assert_eq!(stream.position().unwrap(), 10);

        stream.set_len(4).unwrap();
        assert_eq!(stream.len().unwrap(), 4);
        assert_eq!(stream.position().unwrap(), 4);
    }

    #[test]
    fn extend_zero_fills_and_restores_position() {
        let (_dir, mut stream) = scratch("extend.bin");
        stream.write_bytes(b"abcd").unwrap();
        stream.set_position(2).unwrap();

        stream.set_len(8).unwrap();
        assert_eq!(stream.len().unwrap(), 8);
        assert_eq!(stream.position().unwrap(), 2);

        stream.set_position(0).unwrap();
        assert_eq!(stream.read_all().unwrap().as_ref(), b"abcd\0\0\0\0");
    }

    #[test]
    fn extend_with_position_beyond_new_length() {
        let (_dir, mut stream) = scratch("extend-far.bin");
        stream.write_bytes(b"ab").unwrap();
        stream.seek(SeekFrom::Start(32)).unwrap();

        stream.set_len(8).unwrap();
        assert_eq!(stream.len().unwrap(), 8);
        assert_eq!(stream.position().unwrap(), 8);
    }

    #[test]
    fn eof_read_returns_short_not_error() {
        let (_dir, mut stream) = scratch("eof.bin");
        stream.write_bytes(b"abc").unwrap();
        stream.set_position(1).unwrap();

        let data = stream.read_bytes(100).unwrap();
        assert_eq!(data.as_ref(), b"bc");

        let empty = stream.read_bytes(10).unwrap();
        assert!(empty.is_empty());
        assert!(stream.is_eof().unwrap());
    }

    #[test]
    fn read_spanning_multiple_chunks() {
        let (_dir, mut stream) = scratch("chunks.bin");
        let payload: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| i as u8).collect();
        stream.write_bytes(&payload).unwrap();

        stream.set_position(0).unwrap();
        assert_eq!(stream.read_bytes(payload.len()).unwrap(), payload);
    }

    #[test]
    fn read_all_from_mid_file() {
        let (_dir, mut stream) = scratch("tail.bin");
        stream.write_bytes(b"0123456789").unwrap();
        stream.set_position(6).unwrap();

        assert_eq!(stream.read_all().unwrap().as_ref(), b"6789");
        assert_eq!(stream.remaining().unwrap(), 0);
    }

    #[test]
    fn scalar_short_read_is_insufficient_data() {
        let (_dir, mut stream) = scratch("short.bin");
        stream.write_bytes(b"\x01\x02").unwrap();
        stream.set_position(0).unwrap();

        let err = stream.read_u32().unwrap_err();
        assert!(matches!(
            err,
            StreamError::Codec(CodecError::ShortRead {
                needed: 4,
                available: 2
            })
        ));
    }

    #[test]
    fn scalar_roundtrip_both_orders() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let (_dir, mut stream) = scratch("scalars.bin");
            stream.set_byte_order(order);

            stream.write_bool(true).unwrap();
            stream.write_i8(-5).unwrap();
            stream.write_u16(0xBEEF).unwrap();
            stream.write_i32(-123_456).unwrap();
            stream.write_u64(u64::MAX - 1).unwrap();
            stream.write_f32(3.25).unwrap();
            stream.write_f64(-0.125).unwrap();

            stream.set_position(0).unwrap();
            assert!(stream.read_bool().unwrap());
            assert_eq!(stream.read_i8().unwrap(), -5);
            assert_eq!(stream.read_u16().unwrap(), 0xBEEF);
            assert_eq!(stream.read_i32().unwrap(), -123_456);
            assert_eq!(stream.read_u64().unwrap(), u64::MAX - 1);
            assert_eq!(stream.read_f32().unwrap(), 3.25);
            assert_eq!(stream.read_f64().unwrap(), -0.125);
            assert!(stream.is_eof().unwrap());
        }
    }

    #[test]
    fn text_roundtrip_null_terminated() {
        let (_dir, mut stream) = scratch("text.bin");

        stream.write_text("héllo", Codepage::Utf8).unwrap();
        stream.write_u8(0).unwrap();
        stream.write_text("wörld", Codepage::Utf8).unwrap();
        stream.write_u8(0).unwrap();

        stream.set_position(0).unwrap();
        assert_eq!(stream.read_text_utf8().unwrap(), "héllo");
        assert_eq!(stream.read_text(Codepage::Utf8).unwrap(), "wörld");
    }

    #[test]
    fn utf16_roundtrip_both_orders() {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let (_dir, mut stream) = scratch("utf16.bin");
            stream.set_byte_order(order);

            let codepage = Codepage::utf16_for(order);
            stream.write_text("snow☃man", codepage).unwrap();
            stream.write_u16(0).unwrap();

            stream.set_position(0).unwrap();
            assert_eq!(stream.read_utf16().unwrap(), "snow☃man");
        }
    }

    #[test]
    fn unterminated_text_is_insufficient_data() {
        let (_dir, mut stream) = scratch("unterminated.bin");
        stream.write_bytes(b"abc").unwrap();
        stream.set_position(0).unwrap();

        let err = stream.read_text_utf8().unwrap_err();
        assert!(matches!(
            err,
            StreamError::Codec(CodecError::ShortRead { .. })
        ));
    }

    #[test]
    fn record_roundtrip() {
        use binstream_codec::{Field, FieldKind};

        let layout = RecordLayout::new(vec![
            Field::new("id", FieldKind::U32),
            Field::new("ratio", FieldKind::F32),
            Field::new("live", FieldKind::Bool),
        ])
        .unwrap();

        let (_dir, mut stream) = scratch("record.bin");
        stream.set_byte_order(ByteOrder::Big);
        stream
            .write_record(
                &layout,
                &[
                    FieldValue::U32(42),
                    FieldValue::F32(0.75),
                    FieldValue::Bool(true),
                ],
            )
            .unwrap();

        stream.set_position(0).unwrap();
        let record = stream.read_record(&layout).unwrap();
        assert_eq!(record.get("id"), Some(&FieldValue::U32(42)));
        assert_eq!(record.get("ratio"), Some(&FieldValue::F32(0.75)));
        assert_eq!(record.get("live"), Some(&FieldValue::Bool(true)));
        assert_eq!(stream.position().unwrap(), layout.byte_len() as u64);
    }

    #[test]
    fn record_short_read_is_insufficient_data() {
        use binstream_codec::{Field, FieldKind};

        let layout = RecordLayout::new(vec![Field::new("big", FieldKind::U64)]).unwrap();

        let (_dir, mut stream) = scratch("record-short.bin");
        stream.write_bytes(b"\x01\x02\x03").unwrap();
        stream.set_position(0).unwrap();

        let err = stream.read_record(&layout).unwrap_err();
        assert!(matches!(
            err,
            StreamError::Codec(CodecError::ShortRead {
                needed: 8,
                available: 3
            })
        ));
    }

    #[test]
    fn flush_and_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("close.bin");

        let mut stream = TypedStream::create(&path).unwrap();
        stream.write_u32(1).unwrap();
        stream.flush().unwrap();
        stream.close();

        assert_eq!(std::fs::read(&path).unwrap().len(), 4);
    }
}
