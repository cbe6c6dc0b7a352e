//! Archive transport, package reading and batched record extraction.
//!
//! This crate owns the two capability interfaces the pipeline consumes -
//! [`Transport`] for fetching raw bytes with a bounded timeout, and
//! [`DocPackage`] for enumerating/reading entries of a downloaded ZIP -
//! plus the [`collect_records`] processor that walks a package in bounded
//! batches.

pub mod error;
mod package;
mod processor;
mod transport;

pub use crate::package::DocPackage;
pub use crate::processor::{BATCH_PAUSE, BATCH_SIZE, collect_records};
#[cfg(feature = "mock")]
pub use crate::transport::MockTransport;
pub use crate::transport::{HttpTransport, Transport};
