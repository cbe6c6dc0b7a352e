//! Top-level Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Child-crate errors are re-raised here with their
//! original kind preserved as a child frame.

use derive_more::{Display, Error};
use docdex_archive::error::{Error as ArchiveError, ErrorKind as ArchiveErrorKind};
use docdex_cache::error::{Error as CacheError, ErrorKind as CacheErrorKind};

/// A top-level error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for top-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Per the recovery policy, very little actually surfaces here: transport
/// failures degrade to cached or empty data, per-file parse failures are
/// absorbed by extraction, and cache corruption reads as a miss. What
/// remains is configuration problems and archive-integrity failures.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The configuration could not be loaded or is invalid.
    #[display("configuration error")]
    Config,
    /// An archive-level failure that is fatal to the refresh attempt.
    #[display("archive error: {_0}")]
    Archive(ArchiveErrorKind),
    /// A cache write failure.
    #[display("cache error: {_0}")]
    Cache(CacheErrorKind),
}

impl ErrorKind {
    /// Re-raise an archive error, preserving its `Exn` frame as a child
    /// in the error tree.
    #[track_caller]
    pub fn archive(err: ArchiveError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Archive(inner))
    }

    /// Re-raise a cache error, preserving its `Exn` frame as a child in
    /// the error tree.
    #[track_caller]
    pub fn cache(err: CacheError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Cache(inner))
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Config => false,
            Self::Archive(kind) => kind.is_retryable(),
            Self::Cache(kind) => kind.is_retryable(),
        }
    }
}
