//! Source path handling: derivations shared by every record extracted
//! from one file (id, URL base, category, fallback title).

use crate::consts::{CONTENT_ROOT, DOCS_BASE_URL};
use crate::error::{ErrorKind, Result};
use crate::models::Category;
use exn::OptionExt;

/// A source file path inside the documentation archive, normalized to be
/// relative to the content root.
#[derive(Debug, Clone)]
pub(crate) struct Source {
    rel: String,
}

impl Source {
    pub fn new(path: &str) -> Self {
        // Anchor on the content root rather than the path start: archive
        // entries are usually wrapped in a top-level directory (GitHub
        // zipballs use `repo-branch/`).
        let rel = match path.find(CONTENT_ROOT) {
            Some(start) => &path[start + CONTENT_ROOT.len()..],
            None => path,
        };
        Self { rel: rel.trim_start_matches('/').to_string() }
    }

    /// The relative path without its file extension; the basis for record
    /// ids and page URLs.
    pub fn slug(&self) -> &str {
        match self.rel.rfind('.') {
            // A dot inside the final segment is an extension separator;
            // one in an earlier segment is just part of a directory name.
            Some(dot) if !self.rel[dot..].contains('/') => &self.rel[..dot],
            _ => &self.rel,
        }
    }

    pub fn id(&self) -> String {
        self.slug().to_string()
    }

    pub fn member_id(&self, member: &str) -> String {
        format!("{}#{member}", self.slug())
    }

    pub fn url(&self) -> String {
        format!("{DOCS_BASE_URL}/{}", self.slug())
    }

    pub fn member_url(&self, member: &str) -> String {
        format!("{}#{member}", self.url())
    }

    pub fn category(&self) -> Category {
        Category::from_path(&self.rel)
    }

    /// `true` for structured definition documents, `false` for prose.
    pub fn is_definition(&self) -> bool {
        let lower = self.rel.to_ascii_lowercase();
        lower.ends_with(".yaml") || lower.ends_with(".yml")
    }

    /// Humanized file name used when a prose document carries no usable
    /// front matter: `working-with-parts` becomes `Working With Parts`.
    pub fn humanized_name(&self) -> Result<String> {
        let stem = self
            .slug()
            .rsplit('/')
            .next()
            .filter(|stem| !stem.is_empty())
            .ok_or_raise(|| ErrorKind::UnusablePath(self.rel.clone()))?;
        let name = stem
            .split(['-', '_'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn strips_content_root() {
        let source = Source::new("content/en-us/reference/engine/classes/Instance.yaml");
        assert_eq!(source.slug(), "reference/engine/classes/Instance");
        assert_eq!(source.category(), Category::Classes);
        assert!(source.is_definition());
    }

    #[test]
    fn strips_a_zipball_wrapper_directory() {
        let source = Source::new("creator-docs-main/content/en-us/reference/engine/classes/Instance.yaml");
        assert_eq!(source.slug(), "reference/engine/classes/Instance");
        assert_eq!(source.url(), "https://create.roblox.com/docs/reference/engine/classes/Instance");
    }

    #[test]
    fn member_derivations_share_the_base() {
        let source = Source::new("content/en-us/reference/engine/classes/Instance.yaml");
        assert_eq!(source.member_id("Archivable"), "reference/engine/classes/Instance#Archivable");
        assert_eq!(
            source.member_url("Archivable"),
            "https://create.roblox.com/docs/reference/engine/classes/Instance#Archivable"
        );
    }

    #[test]
    fn dot_in_directory_is_not_an_extension() {
        let source = Source::new("guides/v2.0/intro");
        assert_eq!(source.slug(), "guides/v2.0/intro");
    }

    #[rstest]
    #[case("tutorials/core/building-your-first-game.md", "Building Your First Game")]
    #[case("scripting/under_the_hood.md", "Under The Hood")]
    #[case("one-word.md", "One Word")]
    fn humanizes_file_names(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(Source::new(path).humanized_name().unwrap(), expected);
    }
}
