//! Extraction of structured definition documents: one named entity plus
//! its categorized members, each flattened into an independent record.

use crate::consts::{DEPRECATED_TAG, MAX_MEMBERS_PER_CATEGORY};
use crate::error::{ErrorKind, Result};
use crate::keywords::keywords;
use crate::models::{Record, RecordKind};
use crate::source::Source;
use crate::truncate::cap_description;
use exn::OptionExt;
use serde::Deserialize;

/// The subset of a definition document the record model needs. Member
/// lists live under fixed category keys; anything else is ignored.
#[derive(Debug, Deserialize)]
struct DefinitionDoc {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    entity_type: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    properties: Vec<MemberDoc>,
    #[serde(default)]
    methods: Vec<MemberDoc>,
    #[serde(default)]
    events: Vec<MemberDoc>,
    #[serde(default)]
    callbacks: Vec<MemberDoc>,
    #[serde(default)]
    items: Vec<MemberDoc>,
    #[serde(default)]
    functions: Vec<MemberDoc>,
}

#[derive(Debug, Deserialize)]
struct MemberDoc {
    name: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

impl MemberDoc {
    fn is_deprecated(&self) -> bool {
        self.tags.iter().any(|tag| tag.eq_ignore_ascii_case(DEPRECATED_TAG))
    }

    /// The bare member name, with any pre-qualified owner prefix removed.
    /// Some corpora ship member names already qualified (`Owner.Member`);
    /// reducing to the final segment keeps ids deterministic either way.
    fn bare_name(&self) -> &str {
        self.name.rsplit([':', '.']).next().unwrap_or(&self.name).trim()
    }
}

/// Extract the parent record and all member records from one definition
/// document. Deprecated members are dropped entirely; each member category
/// is capped at [`MAX_MEMBERS_PER_CATEGORY`] entries.
pub(crate) fn extract(source: &Source, text: &str) -> Result<Vec<Record>> {
    let doc: DefinitionDoc = match serde_yaml::from_str(text) {
        Ok(doc) => doc,
        Err(source) => exn::bail!(ErrorKind::Definition(source.to_string())),
    };
    let owner = doc
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_raise(|| ErrorKind::MissingName)?
        .to_string();
    let category = source.category();
    let owner_kind = match doc.entity_type.as_deref() {
        Some(value) => RecordKind::from_definition_type(value),
        None => default_kind(category),
    };

    let description = doc
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(cap_description);
    let content = doc.description.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

    let mut records = Vec::with_capacity(1 + doc.member_count());
    records.push(Record {
        id: source.id(),
        keywords: keywords(&owner, description.as_deref(), source.slug()),
        title: owner.clone(),
        description,
        content,
        category,
        kind: owner_kind,
        url: source.url(),
    });

    let groups: [(&[MemberDoc], RecordKind); 6] = [
        (&doc.properties, RecordKind::Property),
        (&doc.methods, RecordKind::Method),
        (&doc.events, RecordKind::Event),
        (&doc.callbacks, RecordKind::Callback),
        (&doc.items, RecordKind::EnumItem),
        (&doc.functions, RecordKind::Function),
    ];
    for (members, member_kind) in groups {
        // Deprecated members are dropped before the cap applies, so they
        // never consume slots.
        let kept = members.iter().filter(|member| !member.is_deprecated());
        for member in kept.take(MAX_MEMBERS_PER_CATEGORY) {
            let bare = member.bare_name();
            if bare.is_empty() {
                tracing::warn!(owner = %owner, "definition member with empty name skipped");
                continue;
            }
            let description = member
                .summary
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(cap_description);
            let title = qualified_title(&owner, owner_kind, member_kind, bare);
            records.push(Record {
                id: source.member_id(bare),
                keywords: keywords(&title, description.as_deref(), source.slug()),
                title,
                description,
                content: None,
                category,
                kind: member_kind,
                url: source.member_url(bare),
            });
        }
    }
    Ok(records)
}

impl DefinitionDoc {
    fn member_count(&self) -> usize {
        self.properties.len()
            + self.methods.len()
            + self.events.len()
            + self.callbacks.len()
            + self.items.len()
            + self.functions.len()
    }
}

fn default_kind(category: crate::models::Category) -> RecordKind {
    use crate::models::Category;
    match category {
        Category::Classes => RecordKind::Class,
        Category::Enums => RecordKind::Enum,
        Category::DataTypes => RecordKind::DataType,
        _ => RecordKind::Reference,
    }
}

/// Owner-qualified member title. Enumeration owners always use the dotted
/// `Owner.Member` convention; otherwise methods and callbacks use the
/// colon call convention and everything else the dot.
fn qualified_title(owner: &str, owner_kind: RecordKind, member_kind: RecordKind, bare: &str) -> String {
    let separator = if owner_kind == RecordKind::Enum || !member_kind.uses_colon_qualifier() {
        '.'
    } else {
        ':'
    };
    format!("{owner}{separator}{bare}")
}
