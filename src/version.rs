//! Version Check: remote content identifier probing and staleness policy.

use docdex_archive::Transport;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Bounded timeout for the lightweight version probe. Deliberately much
/// shorter than the archive download timeout: this request exists to
/// *skip* work, so it must never become the slow part.
pub const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Probes an external version-identifier source for the latest content
/// version of the tracked corpus.
#[derive(Clone)]
pub struct VersionCheck {
    transport: Arc<dyn Transport>,
    url: String,
}

impl VersionCheck {
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>) -> Self {
        Self { transport, url: url.into() }
    }

    /// The latest content version identifier, or `None` when it cannot be
    /// determined.
    ///
    /// Any network, timeout or payload failure yields `None` ("unknown"),
    /// never an error: callers must not block or fail the pipeline on
    /// this probe, only skip the staleness optimization.
    #[instrument(skip(self))]
    pub async fn latest(&self) -> Option<String> {
        let bytes = match self.transport.fetch(&self.url, VERSION_CHECK_TIMEOUT).await {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::debug!(%error, "version check failed; treating as unknown");
                return None;
            },
        };
        let payload: serde_json::Value = match serde_json::from_slice(&bytes) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::debug!(%error, "version payload unparsable; treating as unknown");
                return None;
            },
        };
        payload.get("sha").and_then(|sha| sha.as_str()).map(str::to_string)
    }
}

/// Cold-path staleness: `true` when a refetch should proceed.
///
/// Conservative by design: an unknown latest version cannot confirm
/// freshness, so the fetch goes ahead. This policy applies only when no
/// usable cache exists; with a warm cache the background path below
/// applies instead.
pub fn is_stale(cached: Option<&str>, latest: Option<&str>) -> bool {
    match latest {
        None => true,
        Some(latest) => cached.is_some_and(|cached| cached != latest),
    }
}

/// Background staleness: `true` when a detached refetch is worth it.
///
/// The inverse bias of [`is_stale`]: with a warm cache already served,
/// an unknown result is a silent no-op rather than a refetch, so
/// transient probe failures never cause churn. The asymmetry between the
/// two policies is deliberate; do not unify them.
pub fn should_background_refresh(cached: Option<&str>, latest: Option<&str>) -> bool {
    matches!((cached, latest), (Some(cached), Some(latest)) if cached != latest)
}
