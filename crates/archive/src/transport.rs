//! Transport capability: fetching raw bytes for a known URL.

use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use std::time::Duration;

/// Capability interface for fetching raw bytes over the network.
///
/// The core never talks HTTP directly; it calls this trait with a
/// caller-specified timeout that aborts the operation past its bound. A
/// transport failure is signalled distinctly from an HTTP-level
/// non-success status so callers can decide how to degrade.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the complete response body for `url`, aborting past `timeout`.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>>;
}

/// The production transport, backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with a fresh connection pool.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .or_raise(|| ErrorKind::Transport("failed to build HTTP client".to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(source) => exn::bail!(classify(source, url)),
        };
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::HttpStatus { status: status.as_u16(), url: url.to_string() });
        }
        match response.bytes().await {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(source) => exn::bail!(classify(source, url)),
        }
    }
}

fn classify(source: reqwest::Error, url: &str) -> ErrorKind {
    if source.is_timeout() {
        ErrorKind::Timeout { url: url.to_string() }
    } else {
        ErrorKind::Transport(source.to_string())
    }
}

#[cfg(feature = "mock")]
pub use self::mock::MockTransport;

#[cfg(feature = "mock")]
mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Response {
        Bytes(Vec<u8>),
        Status(u16),
        Failure,
        /// Never answers within any timeout; the fetch resolves to
        /// [`ErrorKind::Timeout`] once the deadline passes.
        Hang,
    }

    /// In-memory transport for testing.
    ///
    /// URLs are matched exactly. Requesting an unregistered URL is a
    /// transport failure, which doubles as the "network unreachable"
    /// case in tests.
    #[derive(Default)]
    pub struct MockTransport {
        responses: HashMap<String, Response>,
        requests: AtomicUsize,
    }

    impl MockTransport {
        /// Serve `bytes` for `url`.
        pub fn with_bytes(mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
            self.responses.insert(url.into(), Response::Bytes(bytes.into()));
            self
        }

        /// Answer `url` with a bare HTTP status.
        pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
            self.responses.insert(url.into(), Response::Status(status));
            self
        }

        /// Fail `url` at the transport level.
        pub fn with_failure(mut self, url: impl Into<String>) -> Self {
            self.responses.insert(url.into(), Response::Failure);
            self
        }

        /// Make `url` hang until the caller's timeout aborts it.
        pub fn with_hang(mut self, url: impl Into<String>) -> Self {
            self.responses.insert(url.into(), Response::Hang);
            self
        }

        /// Number of fetches performed so far.
        pub fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            match self.responses.get(url) {
                Some(Response::Bytes(bytes)) => Ok(bytes.clone()),
                Some(Response::Status(status)) => {
                    exn::bail!(ErrorKind::HttpStatus { status: *status, url: url.to_string() })
                },
                Some(Response::Failure) | None => {
                    exn::bail!(ErrorKind::Transport(format!("connection refused: {url}")))
                },
                Some(Response::Hang) => {
                    tokio::time::sleep(timeout).await;
                    exn::bail!(ErrorKind::Timeout { url: url.to_string() })
                },
            }
        }
    }
}
