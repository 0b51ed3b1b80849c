//! Error types for derivation and the driver.

use thiserror::Error;

/// Errors raised while deriving views from a container or writing output.
///
/// Decode and derivation errors are fatal for the container (route) that
/// raised them only; the driver reports the route and moves on.
#[derive(Error, Debug)]
pub enum Error {
    /// Container decode failure (bad length prefix, header JSON, or a CSR
    /// table running past the binary segment).
    #[error("malformed container: {0}")]
    Format(#[from] ba_format::FormatError),

    /// A source's parent chain loops back on itself.
    #[error("cyclic parent reference while resolving path of source {source_id}")]
    CyclicPath { source_id: u32 },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for derivation operations.
pub type Result<T> = std::result::Result<T, Error>;
