use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Structural category a record belongs to, derived from the shape of its
/// source path. The closed set mirrors the layout of the documentation
/// corpus itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Engine class and service reference pages.
    Classes,
    /// Enumeration reference pages.
    Enums,
    /// Data type reference pages.
    DataTypes,
    /// Global function/variable reference pages.
    Globals,
    /// Built-in library reference pages.
    Libraries,
    /// Step-by-step tutorial pages.
    Tutorials,
    /// Everything else: long-form prose guides.
    Guides,
}

impl Category {
    /// Derive the category from a source path relative to the content root.
    pub fn from_path(path: &str) -> Self {
        let path = path.to_ascii_lowercase();
        if path.contains("/classes/") {
            Self::Classes
        } else if path.contains("/enums/") {
            Self::Enums
        } else if path.contains("/datatypes/") {
            Self::DataTypes
        } else if path.contains("/globals/") {
            Self::Globals
        } else if path.contains("/libraries/") {
            Self::Libraries
        } else if path.starts_with("tutorials/") || path.contains("/tutorials/") {
            Self::Tutorials
        } else {
            Self::Guides
        }
    }

    /// Returns the display string for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Classes => "Classes",
            Category::Enums => "Enums",
            Category::DataTypes => "DataTypes",
            Category::Globals => "Globals",
            Category::Libraries => "Libraries",
            Category::Tutorials => "Tutorials",
            Category::Guides => "Guides",
        }
    }

    /// The primary structural category: the one holding class/service
    /// top-level entities, given ranking priority over the others.
    pub fn is_primary(&self) -> bool {
        matches!(self, Category::Classes)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("reference/engine/classes/Instance.yaml", Category::Classes)]
    #[case("reference/engine/enums/Material.yaml", Category::Enums)]
    #[case("reference/engine/datatypes/CFrame.yaml", Category::DataTypes)]
    #[case("reference/engine/globals/RobloxGlobals.yaml", Category::Globals)]
    #[case("reference/engine/libraries/string.yaml", Category::Libraries)]
    #[case("tutorials/first-experience/index.md", Category::Tutorials)]
    #[case("scripting/events/deferred.md", Category::Guides)]
    fn derives_from_path(#[case] path: &str, #[case] expected: Category) {
        assert_eq!(Category::from_path(path), expected);
    }

    #[test]
    fn classes_is_primary() {
        assert!(Category::Classes.is_primary());
        assert!(!Category::Guides.is_primary());
    }
}
