//! Local documentation index.
//!
//! Fetches a remote documentation corpus as a ZIP archive, extracts one
//! search record per documented thing, caches the full record set locally
//! and answers ranked lexical queries over it. The pipeline is split
//! across the workspace crates:
//!
//! - `docdex-archive`: transport, package reading, batched extraction
//! - `docdex-extract`: per-file record extraction
//! - `docdex-cache`: single-slot persistent cache with expiry
//! - `docdex-search`: the tiered ranking function
//!
//! This crate ties them together: [`Config`] says where the corpus lives,
//! [`Docs`] runs the refresh control flow (cache first, staleness checks
//! in the background, graceful degradation on network failure) and hands
//! back a [`Refresh`] holding the in-memory record set queries run over.

pub mod config;
pub mod error;
mod refresh;
mod version;

pub use crate::config::Config;
pub use crate::refresh::{Docs, Refresh};
pub use crate::version::{VERSION_CHECK_TIMEOUT, VersionCheck, is_stale, should_background_refresh};

pub use docdex_archive::{DocPackage, HttpTransport, Transport, collect_records};
pub use docdex_cache::Store;
pub use docdex_extract::{Category, Record, RecordKind};
pub use docdex_search::rank;
