//! Cache Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, following the same shape as the other crates in this
//! workspace.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Only *writes* can fail loudly here. A stored entry that cannot be read
/// back is deliberately not an error: corruption is treated as a cache
/// miss by [`Store::get`](crate::Store::get).
#[derive(Debug, Display, Error, Clone)]
pub enum ErrorKind {
    /// The cache directory could not be created or written to.
    #[display("cache I/O failure at {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// The entry could not be serialized for storage.
    #[display("failed to serialize cache entry")]
    Serialize,
    /// No platform cache directory could be determined.
    #[display("no usable cache directory on this platform")]
    NoCacheDir,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
