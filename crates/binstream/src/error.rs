use binstream_codec::CodecError;
use binstream_handle::HandleError;

/// Errors that can occur on a typed stream.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A failure on the underlying OS file handle.
    #[error(transparent)]
    Handle(#[from] HandleError),

    /// An encode/decode failure (short read, invalid text, bad layout).
    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, StreamError>;
