//! Refresh orchestration: the fetch/cache/invalidate control flow.

use crate::config::Config;
use crate::error::{ErrorKind, Result};
use crate::version::{VersionCheck, should_background_refresh};
use docdex_archive::{DocPackage, HttpTransport, Transport, collect_records};
use docdex_cache::Store;
use docdex_extract::Record;
use std::sync::Arc;
use tracing::instrument;

/// Outcome of one refresh request.
#[derive(Debug)]
pub struct Refresh {
    /// The full record set now current, in extraction order.
    pub records: Vec<Record>,
    /// Content version the set was derived from, when known.
    pub sha: Option<String>,
    /// `true` when the set came from the cache rather than a fresh fetch.
    pub from_cache: bool,
}

impl Refresh {
    /// Number of records loaded, for "N pages loaded" style feedback.
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// The documentation index service.
///
/// Owns the transport, the cache store and the configuration; queries run
/// over the record set returned by [`refresh`](Self::refresh), which the
/// caller keeps in memory. Callers serialize refresh operations: at most
/// one refresh is assumed in flight at a time.
pub struct Docs {
    transport: Arc<dyn Transport>,
    store: Store,
    config: Config,
}

impl Docs {
    /// Build the production service from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new().map_err(ErrorKind::archive)?);
        let app_version = env!("CARGO_PKG_VERSION");
        let store = match &config.cache_dir {
            Some(dir) => Store::open(dir, app_version),
            None => Store::open_default(app_version),
        }
        .map_err(ErrorKind::cache)?
        .with_ttl(config.ttl());
        Ok(Self::with_parts(transport, store, config))
    }

    /// Assemble a service from explicit parts (tests, embedding).
    pub fn with_parts(transport: Arc<dyn Transport>, store: Store, config: Config) -> Self {
        Self { transport, store, config }
    }

    /// Refresh the record set.
    ///
    /// With a usable (unexpired, version-matched) cache entry and no
    /// `force`, the cached set is returned immediately and a detached
    /// background staleness check is scheduled at most once per check
    /// interval. Otherwise the archive and the latest content version are
    /// fetched concurrently, the package is walked in bounded batches, and
    /// the cache slot is overwritten wholesale.
    ///
    /// Failure ladder: a transport failure degrades to cached data when
    /// any is usable, else to an empty set - "no data", not an error. An
    /// archive-integrity failure is an error, and leaves any cached data
    /// untouched.
    #[instrument(skip(self))]
    pub async fn refresh(&self, force: bool) -> Result<Refresh> {
        if !force && let Some(entry) = self.store.get() {
            if self.store.should_check(self.config.check_interval()) {
                self.spawn_background_check(entry.sha.clone());
            }
            tracing::debug!(records = entry.data.len(), "serving cached records");
            return Ok(Refresh { records: entry.data, sha: entry.sha, from_cache: true });
        }
        self.fetch_fresh().await
    }

    /// Rank `records` against `query`. Convenience passthrough to
    /// [`docdex_search::rank`].
    pub fn search<'a>(&self, query: &str, records: &'a [Record], limit: usize) -> Vec<&'a Record> {
        docdex_search::rank(query, records, limit)
    }

    /// Drop the cache slot and the update-check marker. Idempotent.
    pub fn clear_cache(&self) -> Result<()> {
        self.store.clear().map_err(ErrorKind::cache)
    }

    async fn fetch_fresh(&self) -> Result<Refresh> {
        let version = VersionCheck::new(Arc::clone(&self.transport), self.config.version_url.clone());
        // Independent reads; let them overlap.
        let (latest, download) = tokio::join!(
            version.latest(),
            self.transport.fetch(&self.config.archive_url, self.config.archive_timeout()),
        );
        if let Err(error) = self.store.mark_checked() {
            tracing::warn!(%error, "failed to record version check time");
        }
        let bytes = match download {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!(%error, "archive download failed; falling back");
                return Ok(match self.store.get() {
                    Some(entry) => Refresh { records: entry.data, sha: entry.sha, from_cache: true },
                    None => Refresh { records: Vec::new(), sha: None, from_cache: false },
                });
            },
        };
        let mut package = DocPackage::open(bytes).map_err(ErrorKind::archive)?;
        let records = collect_records(&mut package).await;
        let sha = latest.clone();
        match self.store.set(records.clone(), latest) {
            Ok(entry) => {
                tracing::info!(records = entry.data.len(), sha = ?entry.sha, "cache refreshed");
                Ok(Refresh { records: entry.data, sha: entry.sha, from_cache: false })
            },
            Err(error) => {
                // The records are already in hand; a failed write costs
                // the next start a refetch, not this call its data.
                tracing::warn!(%error, "cache write failed; serving uncached records");
                Ok(Refresh { records, sha, from_cache: false })
            },
        }
    }

    /// Schedule the fire-and-forget staleness check.
    ///
    /// The task is never awaited and has no cancellation; every failure
    /// inside it is swallowed at this boundary. An unknown probe result is
    /// a silent no-op - the refetch is deferred to the next cold start.
    fn spawn_background_check(&self, cached_sha: Option<String>) {
        let transport = Arc::clone(&self.transport);
        let store = self.store.clone();
        let config = self.config.clone();
        tokio::spawn(async move {
            if let Err(error) = store.mark_checked() {
                tracing::debug!(%error, "failed to record version check time");
            }
            let version = VersionCheck::new(Arc::clone(&transport), config.version_url.clone());
            let latest = version.latest().await;
            if !should_background_refresh(cached_sha.as_deref(), latest.as_deref()) {
                tracing::debug!(?latest, "background check: cache still current");
                return;
            }
            tracing::info!(?latest, "remote content changed; refreshing cache in background");
            let bytes = match transport.fetch(&config.archive_url, config.archive_timeout()).await {
                Ok(bytes) => bytes,
                Err(error) => {
                    tracing::warn!(%error, "background refresh download failed");
                    return;
                },
            };
            let mut package = match DocPackage::open(bytes) {
                Ok(package) => package,
                Err(error) => {
                    tracing::warn!(%error, "background refresh got an unreadable archive");
                    return;
                },
            };
            let records = collect_records(&mut package).await;
            if let Err(error) = store.set(records, latest) {
                tracing::warn!(%error, "background cache write failed");
            }
        });
    }
}
