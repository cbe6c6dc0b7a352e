//! Batched record extraction over a whole documentation package.

use crate::package::DocPackage;
use docdex_extract::{Record, extract_file, is_source_path};
use futures::future::join_all;
use std::time::Duration;
use tracing::instrument;

/// Files extracted per batch. Batches run strictly sequentially, so peak
/// decoded text held in memory is bounded to one batch's worth.
pub const BATCH_SIZE: usize = 25;

/// Pause between batches, keeping the host process responsive during a
/// large walk. Not a correctness requirement.
pub const BATCH_PAUSE: Duration = Duration::from_millis(10);

/// Walk the package and extract the full record set.
///
/// Target files are selected up front (content-root paths with a
/// recognized extension, directory entries excluded), then processed in
/// fixed-size batches: each batch's entries are decoded, extracted
/// concurrently, and appended to the accumulator before the next batch
/// starts. Per-entry failures are isolated and logged; nothing here rolls
/// an earlier batch back. The package-open failure mode lives in
/// [`DocPackage::open`], not here.
#[instrument(skip(package))]
pub async fn collect_records(package: &mut DocPackage) -> Vec<Record> {
    let names: Vec<String> = package.file_names().into_iter().filter(|name| is_source_path(name)).collect();
    let mut records = Vec::new();
    for (index, batch) in names.chunks(BATCH_SIZE).enumerate() {
        if index > 0 {
            tokio::time::sleep(BATCH_PAUSE).await;
        }
        // Decode this batch's entries before fanning out; the package
        // reader needs exclusive access, extraction does not.
        let mut texts = Vec::with_capacity(batch.len());
        for name in batch {
            match package.read_to_string(name) {
                Ok(text) => texts.push((name.clone(), text)),
                Err(error) => tracing::warn!(name, %error, "skipping unreadable archive entry"),
            }
        }
        let tasks = texts
            .into_iter()
            .map(|(name, text)| tokio::task::spawn_blocking(move || extract_file(&name, &text)));
        for outcome in join_all(tasks).await {
            match outcome {
                Ok(extracted) => records.extend(extracted),
                Err(error) => tracing::warn!(%error, "extraction task aborted"),
            }
        }
    }
    tracing::debug!(files = names.len(), records = records.len(), "package walk complete");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::testutil::build_zip;

    fn guide(name: &str) -> (String, String) {
        (
            format!("content/en-us/guides/{name}.md"),
            format!("---\ntitle: {name}\ndescription: Guide {name}.\n---\n"),
        )
    }

    #[tokio::test]
    async fn extracts_all_target_files() {
        let bytes = build_zip(&[
            ("content/en-us/guides/one.md", "---\ntitle: One\n---\n"),
            ("content/en-us/assets/pic.png", "not docs"),
            ("tools/build.md", "outside the content root"),
            (
                "content/en-us/reference/engine/classes/Instance.yaml",
                "name: Instance\ntype: class\nproperties:\n  - name: Archivable\n",
            ),
        ]);
        let mut package = DocPackage::open(bytes).unwrap();
        let records = collect_records(&mut package).await;
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert!(titles.contains(&"One"));
        assert!(titles.contains(&"Instance"));
        assert!(titles.contains(&"Instance.Archivable"));
        // Non-target entries contribute nothing.
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn zipball_wrapper_directory_is_transparent() {
        // GitHub zipballs nest every entry under `repo-branch/`.
        let bytes = build_zip(&[
            ("creator-docs-main/content/en-us/guides/one.md", "---\ntitle: One\n---\n"),
            (
                "creator-docs-main/content/en-us/reference/engine/classes/Instance.yaml",
                "name: Instance\ntype: class\nproperties:\n  - name: Archivable\n",
            ),
        ]);
        let mut package = DocPackage::open(bytes).unwrap();
        let records = collect_records(&mut package).await;
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(records.len(), 3);
        assert!(titles.contains(&"One"));
        assert!(titles.contains(&"Instance.Archivable"));
        // Ids and URLs are relative to the content root, not the wrapper.
        assert!(records.iter().all(|r| !r.id.contains("creator-docs-main")));
    }

    #[tokio::test]
    async fn spans_multiple_batches() {
        let entries: Vec<(String, String)> = (0..(BATCH_SIZE * 2 + 3)).map(|i| guide(&format!("g{i:03}"))).collect();
        let borrowed: Vec<(&str, &str)> = entries.iter().map(|(n, t)| (n.as_str(), t.as_str())).collect();
        let mut package = DocPackage::open(build_zip(&borrowed)).unwrap();
        let records = collect_records(&mut package).await;
        assert_eq!(records.len(), BATCH_SIZE * 2 + 3);
    }

    #[tokio::test]
    async fn one_bad_file_does_not_poison_the_batch() {
        let bytes = build_zip(&[
            ("content/en-us/reference/engine/classes/Bad.yaml", "name: [unclosed"),
            ("content/en-us/guides/good.md", "---\ntitle: Good\n---\n"),
        ]);
        let mut package = DocPackage::open(bytes).unwrap();
        let records = collect_records(&mut package).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Good");
    }

    #[tokio::test]
    async fn rederiving_is_idempotent_up_to_ordering() {
        let bytes = build_zip(&[
            ("content/en-us/guides/one.md", "---\ntitle: One\n---\n"),
            ("content/en-us/guides/two.md", "---\ntitle: Two\n---\n"),
        ]);
        let mut first_package = DocPackage::open(bytes.clone()).unwrap();
        let mut second_package = DocPackage::open(bytes).unwrap();
        let mut first = collect_records(&mut first_package).await;
        let mut second = collect_records(&mut second_package).await;
        first.sort_by(|a, b| a.id.cmp(&b.id));
        second.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(first, second);
    }
}
