//! Error types for container decoding.

use thiserror::Error;

/// Errors that can occur while decoding a container.
#[derive(Error, Debug)]
pub enum FormatError {
    /// A read ran past the end of the buffer or binary segment.
    #[error("truncated container: read of {len} bytes at offset {offset} exceeds {available} available")]
    Truncated {
        offset: usize,
        len: usize,
        available: usize,
    },

    /// The header region is not valid JSON.
    #[error("malformed header JSON: {0}")]
    HeaderJson(#[from] serde_json::Error),

    /// The header region is not valid UTF-8.
    #[error("malformed header: not UTF-8")]
    HeaderUtf8(#[from] std::str::Utf8Error),
}

/// Result type alias for container decoding.
pub type Result<T> = std::result::Result<T, FormatError>;
