//! Extraction of prose documents with an optional leading front-matter
//! block.

use crate::error::{ErrorKind, Result};
use crate::keywords::keywords;
use crate::models::{Category, Record, RecordKind};
use crate::source::Source;
use crate::truncate::cap_description;
use serde::Deserialize;

/// The structured header block at the top of a prose document. Only the
/// fields the record model needs are deserialized; everything else in the
/// block is ignored.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Extract the single record for a prose document.
///
/// A missing front-matter block degrades to the path-derived fallback; a
/// present but malformed block is an error the caller absorbs (and then
/// falls back anyway).
pub(crate) fn extract(source: &Source, text: &str) -> Result<Record> {
    match parse_block(text)? {
        Some(FrontMatter { title: Some(title), description }) if !title.trim().is_empty() => {
            let title = title.trim().to_string();
            let description = description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(cap_description);
            let category = source.category();
            Ok(Record {
                id: source.id(),
                keywords: keywords(&title, description.as_deref(), source.slug()),
                title,
                description,
                content: None,
                category,
                kind: prose_kind(category),
                url: source.url(),
            })
        },
        _ => fallback(source),
    }
}

/// The minimal record derived solely from the file path, used when the
/// header block is absent or unparsable. Extraction never fails a whole
/// file over a bad header.
pub(crate) fn fallback(source: &Source) -> Result<Record> {
    let title = source.humanized_name()?;
    let category = source.category();
    Ok(Record {
        id: source.id(),
        keywords: keywords(&title, None, source.slug()),
        title,
        description: None,
        content: None,
        category,
        kind: prose_kind(category),
        url: source.url(),
    })
}

fn prose_kind(category: Category) -> RecordKind {
    match category {
        Category::Tutorials => RecordKind::Tutorial,
        Category::Guides => RecordKind::Guide,
        _ => RecordKind::Reference,
    }
}

/// Parse the leading `---` delimited YAML block, if any.
///
/// Returns `Ok(None)` when the document has no block at all, and an error
/// only when a block is present but not valid YAML.
fn parse_block(text: &str) -> Result<Option<FrontMatter>> {
    let text = text.trim_start_matches('\u{feff}');
    let Some(rest) = text.strip_prefix("---") else {
        return Ok(None);
    };
    let Some(end) = rest.find("\n---") else {
        return Ok(None);
    };
    let block = &rest[..end];
    match serde_yaml::from_str::<FrontMatter>(block) {
        Ok(front) => Ok(Some(front)),
        Err(source) => exn::bail!(ErrorKind::FrontMatter(source.to_string())),
    }
}
