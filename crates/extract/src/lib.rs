//! Record extraction from documentation source files.
//!
//! One source file produces zero, one or many [`Record`]s depending on its
//! shape:
//! - **Prose documents** (`.md`) yield a single record from their
//!   front-matter header, or a minimal path-derived record when the header
//!   is absent or broken.
//! - **Definition documents** (`.yaml`/`.yml`) yield one record for the
//!   named entity plus one per non-deprecated member.
//!
//! Extraction is total: a malformed file degrades to a fallback (or empty)
//! record set and is logged, it never aborts the pipeline.

mod consts;
mod definition;
pub mod error;
mod frontmatter;
mod keywords;
pub mod models;
mod source;
mod truncate;

use crate::source::Source;
use tracing::instrument;

pub use crate::consts::{CONTENT_ROOT, DESCRIPTION_MAX_CHARS, DOCS_BASE_URL, MAX_KEYWORDS};
pub use crate::keywords::keywords;
pub use crate::models::{Category, Record, RecordKind};
pub use crate::truncate::{cap_description, truncate_description};

/// Returns `true` if the path points at a file this crate knows how to
/// extract: under the content root, with a recognized extension. The
/// content root may sit below a wrapper directory, as in GitHub zipballs
/// where every entry lives under a `repo-branch/` prefix.
pub fn is_source_path(path: &str) -> bool {
    if !path.contains(CONTENT_ROOT) {
        return false;
    }
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".md") || lower.ends_with(".yaml") || lower.ends_with(".yml")
}

/// Top-level entry point: extract all records from one file's content.
///
/// This function never fails. A parse error inside a definition document
/// yields zero records for that file; one inside a prose header yields the
/// path-derived fallback record. Either way the failure is logged and the
/// rest of the archive is unaffected.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn extract_file(path: &str, text: &str) -> Vec<Record> {
    let source = Source::new(path);
    if source.is_definition() {
        match definition::extract(&source, text) {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(path, %error, "skipping unparsable definition document");
                Vec::new()
            },
        }
    } else {
        match frontmatter::extract(&source, text) {
            Ok(record) => vec![record],
            Err(error) => {
                tracing::warn!(path, %error, "falling back to path-derived record");
                frontmatter::fallback(&source).map(|record| vec![record]).unwrap_or_default()
            },
        }
    }
}
