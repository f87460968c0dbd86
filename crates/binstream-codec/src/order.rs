//! Byte order selection and scalar packing.
//!
//! Little-endian is the default. The order is an explicit value carried by
//! the caller (a stream holds one as a field), never ambient state.

use bytes::{BufMut, BytesMut};

use crate::error::{CodecError, Result};

/// The ordering used to pack/unpack multi-byte integers and floats.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// Copy exactly `N` bytes from the front of `src`, or fail with a typed
/// short-read error. This is the single length check every scalar decode
/// goes through.
fn take<const N: usize>(src: &[u8]) -> Result<[u8; N]> {
    if src.len() < N {
        return Err(CodecError::ShortRead {
            needed: N,
            available: src.len(),
        });
    }
    let mut raw = [0u8; N];
    raw.copy_from_slice(&src[..N]);
    Ok(raw)
}

impl ByteOrder {
    /// Append an unsigned 16-bit value in this order.
    pub fn put_u16(self, dst: &mut BytesMut, value: u16) {
        match self {
            ByteOrder::Little => dst.put_u16_le(value),
            ByteOrder::Big => dst.put_u16(value),
        }
    }

    /// Append an unsigned 32-bit value in this order.
    pub fn put_u32(self, dst: &mut BytesMut, value: u32) {
        match self {
            ByteOrder::Little => dst.put_u32_le(value),
            ByteOrder::Big => dst.put_u32(value),
        }
    }

    /// Append an unsigned 64-bit value in this order.
    pub fn put_u64(self, dst: &mut BytesMut, value: u64) {
        match self {
            ByteOrder::Little => dst.put_u64_le(value),
            ByteOrder::Big => dst.put_u64(value),
        }
    }

    /// Append a signed 16-bit value in this order.
    pub fn put_i16(self, dst: &mut BytesMut, value: i16) {
        self.put_u16(dst, value as u16);
    }

    /// Append a signed 32-bit value in this order.
    pub fn put_i32(self, dst: &mut BytesMut, value: i32) {
        self.put_u32(dst, value as u32);
    }

    /// Append a signed 64-bit value in this order.
    pub fn put_i64(self, dst: &mut BytesMut, value: i64) {
        self.put_u64(dst, value as u64);
    }

    /// Append an IEEE-754 single-precision float in this order.
    pub fn put_f32(self, dst: &mut BytesMut, value: f32) {
        self.put_u32(dst, value.to_bits());
    }

    /// Append an IEEE-754 double-precision float in this order.
    pub fn put_f64(self, dst: &mut BytesMut, value: f64) {
        self.put_u64(dst, value.to_bits());
    }

    /// Decode an unsigned 16-bit value from the front of `src`.
    pub fn read_u16(self, src: &[u8]) -> Result<u16> {
        let raw = take::<2>(src)?;
        Ok(match self {
            ByteOrder::Little => u16::from_le_bytes(raw),
            ByteOrder::Big => u16::from_be_bytes(raw),
        })
    }

    /// Decode an unsigned 32-bit value from the front of `src`.
    pub fn read_u32(self, src: &[u8]) -> Result<u32> {
        let raw = take::<4>(src)?;
        Ok(match self {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        })
    }

    /// Decode an unsigned 64-bit value from the front of `src`.
    pub fn read_u64(self, src: &[u8]) -> Result<u64> {
        let raw = take::<8>(src)?;
        Ok(match self {
            ByteOrder::Little => u64::from_le_bytes(raw),
            ByteOrder::Big => u64::from_be_bytes(raw),
        })
    }

    /// Decode a signed 16-bit value from the front of `src`.
    pub fn read_i16(self, src: &[u8]) -> Result<i16> {
        Ok(self.read_u16(src)? as i16)
    }

    /// Decode a signed 32-bit value from the front of `src`.
    pub fn read_i32(self, src: &[u8]) -> Result<i32> {
        Ok(self.read_u32(src)? as i32)
    }

    /// Decode a signed 64-bit value from the front of `src`.
    pub fn read_i64(self, src: &[u8]) -> Result<i64> {
        Ok(self.read_u64(src)? as i64)
    }

    /// Decode an IEEE-754 single-precision float from the front of `src`.
    pub fn read_f32(self, src: &[u8]) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32(src)?))
    }

    /// Decode an IEEE-754 double-precision float from the front of `src`.
    pub fn read_f64(self, src: &[u8]) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64(src)?))
    }
}
