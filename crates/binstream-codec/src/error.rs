use crate::record::FieldKind;
use crate::text::Codepage;

/// Errors that can occur during encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Fewer bytes were available than the decoded type requires.
    #[error("insufficient data ({needed} bytes needed, {available} available)")]
    ShortRead { needed: usize, available: usize },

    /// The byte sequence is not valid text under the given codepage.
    #[error("invalid {codepage} text")]
    InvalidText { codepage: Codepage },

    /// A record layout must contain at least one field.
    #[error("record layout has no fields")]
    EmptyLayout,

    /// A value of the wrong kind was supplied for a layout field.
    #[error("field {index} expects {expected:?}, got {found:?}")]
    FieldMismatch {
        index: usize,
        expected: FieldKind,
        found: FieldKind,
    },

    /// The number of values does not match the layout's field count.
    #[error("layout has {expected} fields, got {found} values")]
    ArityMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
