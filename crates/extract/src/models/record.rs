use super::{Category, RecordKind};
use serde::{Deserialize, Serialize};

/// The atomic searchable unit: one documentation page, or one member of a
/// definition page, flattened into an independent entry.
///
/// Member-level records reference their owning entity only through shared
/// derivations (qualified title, URL base, category); there is no runtime
/// parent pointer. Records are immutable once constructed - a refresh
/// produces an entirely new set, never patches an old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable id derived from the source path, plus `#member` for
    /// member-level entries. Unique within one fetch cycle.
    pub id: String,
    /// Display name. Members carry the owner-qualified form, e.g.
    /// `Instance.Archivable` or `Instance:FindFirstChild`.
    pub title: String,
    /// Short prose, capped at 200 characters plus an ellipsis marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional longer body, independent of `description`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Structural category derived from the source path shape.
    pub category: Category,
    /// Lowercase match tokens; auxiliary surface only, never a ranking
    /// weight source.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Parent- or member-level kind of this record.
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Externally resolvable link; members carry a fragment anchor into
    /// the owner's page.
    pub url: String,
}
