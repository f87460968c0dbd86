//! Fixed-size plain-data record layouts.
//!
//! A [`RecordLayout`] describes an ordered sequence of named fixed-width
//! fields. Decoding walks the layout field by field under an explicit
//! byte order; there is no reinterpretation of raw bytes as typed memory.
//! Variable-length or reference-bearing fields are unrepresentable: the
//! closed [`FieldKind`] set only contains fixed-width scalars.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{CodecError, Result};
use crate::order::ByteOrder;

/// The kind of one fixed-width record field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl FieldKind {
    /// Encoded width of this field in bytes.
    pub const fn byte_len(self) -> usize {
        match self {
            FieldKind::Bool | FieldKind::I8 | FieldKind::U8 => 1,
            FieldKind::I16 | FieldKind::U16 => 2,
            FieldKind::I32 | FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::I64 | FieldKind::U64 | FieldKind::F64 => 8,
        }
    }
}

/// One named field in a record layout.
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

/// A decoded field value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl FieldValue {
    /// The kind this value decodes from / encodes to.
    pub const fn kind(self) -> FieldKind {
        match self {
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::I8(_) => FieldKind::I8,
            FieldValue::U8(_) => FieldKind::U8,
            FieldValue::I16(_) => FieldKind::I16,
            FieldValue::U16(_) => FieldKind::U16,
            FieldValue::I32(_) => FieldKind::I32,
            FieldValue::U32(_) => FieldKind::U32,
            FieldValue::I64(_) => FieldKind::I64,
            FieldValue::U64(_) => FieldKind::U64,
            FieldValue::F32(_) => FieldKind::F32,
            FieldValue::F64(_) => FieldKind::F64,
        }
    }
}

/// An ordered, fixed-size plain-data layout.
#[derive(Clone, Debug)]
pub struct RecordLayout {
    fields: Vec<Field>,
    byte_len: usize,
}

impl RecordLayout {
    /// Build a layout from an ordered field list.
    ///
    /// An empty layout is rejected at construction.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        if fields.is_empty() {
            return Err(CodecError::EmptyLayout);
        }
        let byte_len = fields.iter().map(|f| f.kind.byte_len()).sum();
        Ok(Self { fields, byte_len })
    }

    /// Total encoded width of one record.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// The ordered field list.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Decode one record from the front of `src` under `order`.
    ///
    /// Fails with a short-read error if `src` holds fewer than
    /// [`byte_len`](Self::byte_len) bytes.
    pub fn decode(&self, src: &[u8], order: ByteOrder) -> Result<Record> {
        if src.len() < self.byte_len {
            return Err(CodecError::ShortRead {
                needed: self.byte_len,
                available: src.len(),
            });
        }

        let mut cursor = src;
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = match field.kind {
                FieldKind::Bool => FieldValue::Bool(cursor[0] != 0),
                FieldKind::I8 => FieldValue::I8(cursor[0] as i8),
                FieldKind::U8 => FieldValue::U8(cursor[0]),
                FieldKind::I16 => FieldValue::I16(order.read_i16(cursor)?),
                FieldKind::U16 => FieldValue::U16(order.read_u16(cursor)?),
                FieldKind::I32 => FieldValue::I32(order.read_i32(cursor)?),
                FieldKind::U32 => FieldValue::U32(order.read_u32(cursor)?),
                FieldKind::I64 => FieldValue::I64(order.read_i64(cursor)?),
                FieldKind::U64 => FieldValue::U64(order.read_u64(cursor)?),
                FieldKind::F32 => FieldValue::F32(order.read_f32(cursor)?),
                FieldKind::F64 => FieldValue::F64(order.read_f64(cursor)?),
            };
            values.push((field.name.clone(), value));
            cursor.advance(field.kind.byte_len());
        }

        Ok(Record { values })
    }

    /// Encode one record's values under `order`.
    ///
    /// The values must match the layout in count and kind, position by
    /// position.
    pub fn encode(&self, values: &[FieldValue], order: ByteOrder) -> Result<Bytes> {
        if values.len() != self.fields.len() {
            return Err(CodecError::ArityMismatch {
                expected: self.fields.len(),
                found: values.len(),
            });
        }

        let mut dst = BytesMut::with_capacity(self.byte_len);
        for (index, (field, value)) in self.fields.iter().zip(values).enumerate() {
            if value.kind() != field.kind {
                return Err(CodecError::FieldMismatch {
                    index,
                    expected: field.kind,
                    found: value.kind(),
                });
            }
            match *value {
                FieldValue::Bool(v) => dst.put_u8(v as u8),
                FieldValue::I8(v) => dst.put_i8(v),
                FieldValue::U8(v) => dst.put_u8(v),
                FieldValue::I16(v) => order.put_i16(&mut dst, v),
                FieldValue::U16(v) => order.put_u16(&mut dst, v),
                FieldValue::I32(v) => order.put_i32(&mut dst, v),
                FieldValue::U32(v) => order.put_u32(&mut dst, v),
                FieldValue::I64(v) => order.put_i64(&mut dst, v),
                FieldValue::U64(v) => order.put_u64(&mut dst, v),
                FieldValue::F32(v) => order.put_f32(&mut dst, v),
                FieldValue::F64(v) => order.put_f64(&mut dst, v),
            }
        }

        Ok(dst.freeze())
    }
}

/// One decoded record: field name/value pairs in layout order.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    values: Vec<(String, FieldValue)>,
}

impl Record {
    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field values in layout order.
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.values.iter().map(|(_, value)| value)
    }

    /// Name/value pairs in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
