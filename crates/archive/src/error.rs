//! Archive Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, following the same shape as the other crates in this
//! workspace.

use derive_more::{Display, Error};

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong
/// internally. Transport-level failures are recoverable (fall back to
/// cached data); [`Integrity`](ErrorKind::Integrity) is fatal to the
/// current refresh attempt.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not complete (DNS, connection, TLS, ...).
    #[display("transport failure: {_0}")]
    Transport(#[error(not(source))] String),
    /// The request exceeded its timeout and was aborted.
    #[display("request timed out: {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },
    /// The server answered with a non-success status.
    #[display("unexpected HTTP status {status} from {url}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },
    /// The downloaded bytes cannot be opened as a valid package.
    #[display("archive integrity failure: {_0}")]
    Integrity(#[error(not(source))] String),
    /// The named entry does not exist in the package.
    #[display("no such archive entry: {_0}")]
    EntryNotFound(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. } | Self::HttpStatus { .. })
    }
}
