//! Heuristic lexical ranking over extracted records.
//!
//! This is intentionally not a statistical relevance model: no term
//! frequency, no inverse document frequency, no query tokenization. The
//! query is matched as one literal case-insensitive substring, fields are
//! checked in a fixed priority order, and scores come from a small tier
//! table. It ranks a few thousand records well and predictably, which is
//! all a documentation index needs.

use docdex_extract::Record;
use tracing::instrument;

/// Base score for an exact title match: the whole title equals the query,
/// or the segment after the final `:`/`.` separator does.
const TITLE_EXACT: i64 = 1000;
/// Base score for a title prefix match.
const TITLE_PREFIX: i64 = 500;
/// Base score for a title substring match.
const TITLE_SUBSTRING: i64 = 250;
/// Base score when only the description matches.
const FIELD_DESCRIPTION: i64 = 100;
/// Base score when only a keyword matches.
const FIELD_KEYWORD: i64 = 75;
/// Base score when only the category or type name matches.
const FIELD_CATEGORY_TYPE: i64 = 50;

/// Weight for a top-level class definition in the primary category.
const WEIGHT_PRIMARY_TOP_LEVEL: i64 = 10;
/// Weight for any other record in the primary category.
const WEIGHT_PRIMARY: i64 = 8;

/// Rank `records` against `query`, returning at most `limit` matches in
/// descending score order.
///
/// Pure and deterministic in its inputs. An empty or whitespace-only
/// query yields an empty result - search is query-driven, there is no
/// browse-all mode. Records that do not match at all are excluded, not
/// kept at score zero. Tie order between equal scores is unspecified.
#[instrument(skip(records), fields(records = records.len()))]
pub fn rank<'a>(query: &str, records: &'a [Record], limit: usize) -> Vec<&'a Record> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let mut scored: Vec<(i64, &Record)> =
        records.iter().filter_map(|record| score(&query, record).map(|s| (s, record))).collect();
    scored.sort_by(|(a, _), (b, _)| b.cmp(a));
    scored.truncate(limit);
    scored.into_iter().map(|(_, record)| record).collect()
}

/// Score one record against an already-lowercased query, or `None` when
/// nothing matches.
fn score(query: &str, record: &Record) -> Option<i64> {
    let title = record.title.to_lowercase();
    if title.contains(query) {
        let tier = if title == query || final_segment(&title) == query {
            TITLE_EXACT
        } else if title.starts_with(query) {
            TITLE_PREFIX
        } else {
            TITLE_SUBSTRING
        };
        let weight = if record.category.is_primary() {
            if record.kind.is_top_level_definition() { WEIGHT_PRIMARY_TOP_LEVEL } else { WEIGHT_PRIMARY }
        } else {
            1
        };
        // Shorter titles of equal tier rank higher.
        return Some(tier * weight - record.title.chars().count() as i64);
    }

    let base = if record
        .description
        .as_deref()
        .is_some_and(|description| description.to_lowercase().contains(query))
    {
        FIELD_DESCRIPTION
    } else if record.keywords.iter().any(|keyword| keyword.contains(query)) {
        // Keywords are stored lowercased already.
        FIELD_KEYWORD
    } else if record.category.as_str().to_lowercase().contains(query)
        || record.kind.as_str().contains(query)
    {
        FIELD_CATEGORY_TYPE
    } else {
        return None;
    };
    let weight = if record.category.is_primary() { WEIGHT_PRIMARY } else { 1 };
    Some(base * weight)
}

/// The segment of a qualified title after its final `:` or `.`, so a
/// query for `Archivable` is an exact hit on `Instance.Archivable`.
fn final_segment(title: &str) -> &str {
    title.rsplit([':', '.']).next().unwrap_or(title)
}
