//! End-to-end pipeline tests over a mock transport and an in-memory
//! archive: fetch, cache, degrade, background refresh.

use docdex::{Config, Docs, Store, Transport};
use docdex_archive::MockTransport;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

const ARCHIVE_URL: &str = "https://example.invalid/docs.zip";
const VERSION_URL: &str = "https://example.invalid/commits/main";
const APP_VERSION: &str = "1.0.0";

fn build_zip(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

// Entry names mirror a GitHub zipball: everything under a `repo-branch/`
// wrapper directory.
fn corpus_zip() -> Vec<u8> {
    build_zip(&[
        (
            "creator-docs-main/content/en-us/guides/getting-started.md",
            "---\ntitle: Getting Started\ndescription: First steps with the platform.\n---\nBody.\n",
        ),
        (
            "creator-docs-main/content/en-us/reference/engine/classes/Instance.yaml",
            "name: Instance\ntype: class\nsummary: The base class.\nproperties:\n  - name: Archivable\n    summary: Saved with the place.\n",
        ),
        ("creator-docs-main/content/en-us/assets/diagram.png", "not a doc"),
        ("creator-docs-main/README.md", "not under the content root"),
    ])
}

fn config() -> Config {
    Config {
        archive_url: ARCHIVE_URL.to_string(),
        version_url: VERSION_URL.to_string(),
        cache_dir: None,
        ttl_hours: 24,
        check_interval_minutes: 60,
        archive_timeout_secs: 60,
    }
}

fn docs_with(transport: Arc<MockTransport>, dir: &std::path::Path) -> Docs {
    let store = Store::open(dir, APP_VERSION).unwrap();
    Docs::with_parts(transport, store, config())
}

#[tokio::test]
async fn cold_fetch_populates_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(
        MockTransport::default()
            .with_bytes(ARCHIVE_URL, corpus_zip())
            .with_bytes(VERSION_URL, br#"{"sha":"abc123"}"#.to_vec()),
    );
    let docs = docs_with(Arc::clone(&transport), dir.path());

    let refresh = docs.refresh(false).await.unwrap();
    assert!(!refresh.from_cache);
    assert_eq!(refresh.sha.as_deref(), Some("abc123"));
    // One prose record, the Instance parent and its one property.
    assert_eq!(refresh.count(), 3);

    let entry = Store::open(dir.path(), APP_VERSION).unwrap().get().unwrap();
    assert_eq!(entry.data, refresh.records);
    assert_eq!(entry.sha.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn warm_refresh_serves_the_cache_without_network() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(
        MockTransport::default()
            .with_bytes(ARCHIVE_URL, corpus_zip())
            .with_bytes(VERSION_URL, br#"{"sha":"abc123"}"#.to_vec()),
    );
    let docs = docs_with(Arc::clone(&transport), dir.path());

    docs.refresh(false).await.unwrap();
    let after_cold = transport.request_count();

    let warm = docs.refresh(false).await.unwrap();
    assert!(warm.from_cache);
    assert_eq!(warm.count(), 3);
    // The cold fetch marked a version check, so the warm path schedules no
    // background probe within the check interval.
    assert_eq!(transport.request_count(), after_cold);
}

#[tokio::test]
async fn force_bypasses_a_warm_cache() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(
        MockTransport::default()
            .with_bytes(ARCHIVE_URL, corpus_zip())
            .with_bytes(VERSION_URL, br#"{"sha":"abc123"}"#.to_vec()),
    );
    let docs = docs_with(Arc::clone(&transport), dir.path());

    docs.refresh(false).await.unwrap();
    let after_cold = transport.request_count();

    let forced = docs.refresh(true).await.unwrap();
    assert!(!forced.from_cache);
    assert!(transport.request_count() > after_cold);
}

#[tokio::test(start_paused = true)]
async fn hanging_version_check_does_not_block_the_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let transport =
        Arc::new(MockTransport::default().with_bytes(ARCHIVE_URL, corpus_zip()).with_hang(VERSION_URL));
    let docs = docs_with(Arc::clone(&transport), dir.path());

    let refresh = docs.refresh(false).await.unwrap();
    assert!(!refresh.from_cache);
    assert_eq!(refresh.count(), 3);
    // The probe timed out; version is unknown, not an error.
    assert_eq!(refresh.sha, None);
}

#[tokio::test]
async fn transport_failure_falls_back_to_cached_data() {
    let dir = tempfile::tempdir().unwrap();
    let seed = Arc::new(
        MockTransport::default()
            .with_bytes(ARCHIVE_URL, corpus_zip())
            .with_bytes(VERSION_URL, br#"{"sha":"abc123"}"#.to_vec()),
    );
    docs_with(seed, dir.path()).refresh(false).await.unwrap();

    // Network gone; force would otherwise refetch.
    let offline = Arc::new(MockTransport::default());
    let docs = docs_with(offline, dir.path());
    let refresh = docs.refresh(true).await.unwrap();
    assert!(refresh.from_cache);
    assert_eq!(refresh.count(), 3);
    assert_eq!(refresh.sha.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn transport_failure_without_cache_yields_no_data_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let docs = docs_with(Arc::new(MockTransport::default()), dir.path());
    let refresh = docs.refresh(false).await.unwrap();
    assert_eq!(refresh.count(), 0);
    assert_eq!(refresh.sha, None);
}

#[tokio::test]
async fn unreadable_archive_is_fatal_but_preserves_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let seed = Arc::new(
        MockTransport::default()
            .with_bytes(ARCHIVE_URL, corpus_zip())
            .with_bytes(VERSION_URL, br#"{"sha":"abc123"}"#.to_vec()),
    );
    docs_with(seed, dir.path()).refresh(false).await.unwrap();

    let garbage = Arc::new(
        MockTransport::default()
            .with_bytes(ARCHIVE_URL, b"definitely not a zip".to_vec())
            .with_bytes(VERSION_URL, br#"{"sha":"def456"}"#.to_vec()),
    );
    let docs = docs_with(garbage, dir.path());
    assert!(docs.refresh(true).await.is_err());

    // Last known good data survives the failed attempt.
    let entry = Store::open(dir.path(), APP_VERSION).unwrap().get().unwrap();
    assert_eq!(entry.sha.as_deref(), Some("abc123"));
    assert_eq!(entry.data.len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn background_refresh_runs_when_the_remote_version_changes() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path(), APP_VERSION).unwrap();
    // Warm cache tagged with an old version, and no check marker so the
    // warm path schedules the probe immediately.
    store.set(Vec::new(), Some("old".to_string())).unwrap();

    let transport = Arc::new(
        MockTransport::default()
            .with_bytes(ARCHIVE_URL, corpus_zip())
            .with_bytes(VERSION_URL, br#"{"sha":"new"}"#.to_vec()),
    );
    let docs = Docs::with_parts(Arc::clone(&transport) as Arc<dyn Transport>, store.clone(), config());

    let refresh = docs.refresh(false).await.unwrap();
    assert!(refresh.from_cache);
    assert_eq!(refresh.count(), 0);

    // The detached task rewrites the slot; poll until it lands.
    let mut updated = None;
    for _ in 0..100 {
        if let Some(entry) = store.get()
            && entry.sha.as_deref() == Some("new")
        {
            updated = Some(entry);
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    let entry = updated.expect("background refresh never landed");
    assert_eq!(entry.data.len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn background_check_is_a_noop_when_the_version_is_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path(), APP_VERSION).unwrap();
    store.set(Vec::new(), Some("old".to_string())).unwrap();

    // Version probe fails; archive deliberately available so a wrongly
    // triggered refetch would be visible in the request count.
    let transport = Arc::new(
        MockTransport::default().with_bytes(ARCHIVE_URL, corpus_zip()).with_failure(VERSION_URL),
    );
    let docs = Docs::with_parts(Arc::clone(&transport) as Arc<dyn Transport>, store.clone(), config());

    docs.refresh(false).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(store.get().unwrap().sha.as_deref(), Some("old"));
    // Exactly the one probe request, no archive download.
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn search_runs_over_the_refreshed_set() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(
        MockTransport::default()
            .with_bytes(ARCHIVE_URL, corpus_zip())
            .with_bytes(VERSION_URL, br#"{"sha":"abc123"}"#.to_vec()),
    );
    let docs = docs_with(transport, dir.path());
    let refresh = docs.refresh(false).await.unwrap();

    let results = docs.search("instance", &refresh.records, 10);
    assert_eq!(results[0].title, "Instance");

    let results = docs.search("archivable", &refresh.records, 10);
    assert_eq!(results[0].title, "Instance.Archivable");
}

#[tokio::test]
async fn clear_cache_forces_the_next_refresh_to_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let transport = Arc::new(
        MockTransport::default()
            .with_bytes(ARCHIVE_URL, corpus_zip())
            .with_bytes(VERSION_URL, br#"{"sha":"abc123"}"#.to_vec()),
    );
    let docs = docs_with(Arc::clone(&transport), dir.path());

    docs.refresh(false).await.unwrap();
    docs.clear_cache().unwrap();
    let after_clear = transport.request_count();

    let refresh = docs.refresh(false).await.unwrap();
    assert!(!refresh.from_cache);
    assert!(transport.request_count() > after_clear);
}
