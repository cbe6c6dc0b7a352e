//! Extraction Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, following the same shape as the other crates in this
//! workspace.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong
/// internally. None of these are fatal to a run: the top-level
/// [`extract_file`](crate::extract_file) entry point absorbs them and
/// degrades to a fallback (or empty) record set for the offending file.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The leading front-matter block is present but not valid YAML.
    #[display("malformed front matter: {_0}")]
    FrontMatter(#[error(not(source))] String),
    /// The definition document is not valid YAML, or is missing its
    /// required structure.
    #[display("malformed definition document: {_0}")]
    Definition(#[error(not(source))] String),
    /// The definition document has no entity name.
    #[display("definition document has no name")]
    MissingName,
    /// The source path has no usable file stem to derive a title from.
    #[display("unusable source path: {_0}")]
    UnusablePath(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A source file is either parseable or it isn't; retrying the
        // same bytes never helps.
        false
    }
}
