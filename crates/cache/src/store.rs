//! The single-slot cache store and its update-check marker.

use crate::error::{ErrorKind, Result};
use docdex_extract::Record;
use exn::{OptionExt, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::UtcDateTime;
use tracing::instrument;

/// Hard expiry for a cache entry. Expiry is the fallback freshness
/// signal; the primary one is the content-version comparison done by the
/// refresh orchestration, not by the store.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Minimum spacing between outbound version checks, preventing check
/// storms on rapid repeated opens.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60 * 60);

const ENTRY_FILE: &str = "records.json";
const MARKER_FILE: &str = "last_check.json";

/// One cached fetch cycle: the full record set plus version metadata.
///
/// Created on a successful fresh fetch, read-only thereafter until
/// superseded wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The full record set of the fetch cycle.
    pub data: Vec<Record>,
    /// Content version identifier the set was derived from, when known.
    pub sha: Option<String>,
    /// Unix timestamp of the fetch.
    pub timestamp: i64,
    /// Version of the application that produced the entry. A mismatch on
    /// read treats the entry as absent, forcing re-derivation after an
    /// upgrade changes extractor output shape.
    pub app_version: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Marker {
    last_check: i64,
}

/// Persistent store for one cache slot plus the update-check marker.
///
/// The store is not the source of truth - the remote corpus is. Deleting
/// the cache directory only costs the next refresh a full refetch.
///
/// The read/write path is not safely concurrent with itself; callers
/// serialize refresh operations.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
    app_version: String,
    ttl: Duration,
}

impl Store {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>, app_version: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).or_raise(|| ErrorKind::Io(dir.clone()))?;
        Ok(Self { dir, app_version: app_version.into(), ttl: CACHE_TTL })
    }

    /// Open a store in the platform cache directory.
    pub fn open_default(app_version: impl Into<String>) -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "docdex").ok_or_raise(|| ErrorKind::NoCacheDir)?;
        Self::open(dirs.cache_dir(), app_version)
    }

    /// Override the entry TTL (tests mostly).
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn entry_path(&self) -> PathBuf {
        self.dir.join(ENTRY_FILE)
    }

    fn marker_path(&self) -> PathBuf {
        self.dir.join(MARKER_FILE)
    }

    /// Read the cache slot.
    ///
    /// Returns `None` when no entry exists, when the stored bytes fail to
    /// deserialize (corruption is a miss, never fatal), when the entry was
    /// written by a different application version, or when it has passed
    /// its TTL.
    #[instrument(skip(self))]
    pub fn get(&self) -> Option<CacheEntry> {
        let path = self.entry_path();
        let bytes = std::fs::read(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "corrupt cache entry treated as miss");
                return None;
            },
        };
        if entry.app_version != self.app_version {
            tracing::debug!(
                stored = entry.app_version,
                running = self.app_version,
                "cache entry from another app version treated as miss"
            );
            return None;
        }
        let age = UtcDateTime::now().unix_timestamp() - entry.timestamp;
        if age > self.ttl.as_secs() as i64 {
            tracing::debug!(age_secs = age, "cache entry expired");
            return None;
        }
        Some(entry)
    }

    /// Overwrite the cache slot with a fresh fetch cycle.
    ///
    /// The write goes through a temp file in the same directory and is
    /// renamed into place, so readers never observe a partial entry.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn set(&self, records: Vec<Record>, sha: Option<String>) -> Result<CacheEntry> {
        let entry = CacheEntry {
            data: records,
            sha,
            timestamp: UtcDateTime::now().unix_timestamp(),
            app_version: self.app_version.clone(),
        };
        let json = serde_json::to_vec(&entry).or_raise(|| ErrorKind::Serialize)?;
        self.write_atomic(&self.entry_path(), &json)?;
        Ok(entry)
    }

    /// Remove the cache slot and the update-check marker. Idempotent.
    pub fn clear(&self) -> Result<()> {
        for path in [self.entry_path(), self.marker_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => {},
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {},
                Err(_) => exn::bail!(ErrorKind::Io(path)),
            }
        }
        Ok(())
    }

    /// Unix timestamp of the last recorded version check, if any.
    pub fn last_check(&self) -> Option<i64> {
        let bytes = std::fs::read(self.marker_path()).ok()?;
        let marker: Marker = serde_json::from_slice(&bytes).ok()?;
        Some(marker.last_check)
    }

    /// Record that a version check happened now.
    pub fn mark_checked(&self) -> Result<()> {
        let marker = Marker { last_check: UtcDateTime::now().unix_timestamp() };
        let json = serde_json::to_vec(&marker).or_raise(|| ErrorKind::Serialize)?;
        self.write_atomic(&self.marker_path(), &json)
    }

    /// `true` when no version check has run within `interval`.
    pub fn should_check(&self, interval: Duration) -> bool {
        match self.last_check() {
            None => true,
            Some(last) => UtcDateTime::now().unix_timestamp() - last > interval.as_secs() as i64,
        }
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = tempfile::NamedTempFile::new_in(&self.dir).or_raise(|| ErrorKind::Io(self.dir.clone()))?;
        std::fs::write(tmp.path(), bytes).or_raise(|| ErrorKind::Io(tmp.path().to_path_buf()))?;
        tmp.persist(path).or_raise(|| ErrorKind::Io(path.to_path_buf()))?;
        Ok(())
    }
}
