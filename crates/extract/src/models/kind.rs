use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// What a record describes: either a whole parent-level entity (a page) or
/// a single member of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// An engine class or service.
    Class,
    /// An enumeration.
    Enum,
    /// A data type.
    DataType,
    /// A tutorial page.
    Tutorial,
    /// A prose guide page.
    Guide,
    /// Any other reference page (globals, libraries, ...).
    Reference,
    /// A property member.
    Property,
    /// A method member.
    Method,
    /// An event member.
    Event,
    /// A callback member.
    Callback,
    /// An enumeration item.
    EnumItem,
    /// A free function member.
    Function,
}

impl RecordKind {
    /// Parse the `type` field of a definition document. Unknown entity
    /// types fall back to [`Reference`](Self::Reference) rather than
    /// failing the file.
    pub fn from_definition_type(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "class" => Self::Class,
            "enum" => Self::Enum,
            "datatype" => Self::DataType,
            _ => Self::Reference,
        }
    }

    /// Returns the display string for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Class => "class",
            RecordKind::Enum => "enum",
            RecordKind::DataType => "datatype",
            RecordKind::Tutorial => "tutorial",
            RecordKind::Guide => "guide",
            RecordKind::Reference => "reference",
            RecordKind::Property => "property",
            RecordKind::Method => "method",
            RecordKind::Event => "event",
            RecordKind::Callback => "callback",
            RecordKind::EnumItem => "enumitem",
            RecordKind::Function => "function",
        }
    }

    /// `true` for parent-level entries (whole pages), `false` for
    /// member-level entries extracted out of a definition document.
    pub fn is_parent(&self) -> bool {
        matches!(
            self,
            RecordKind::Class
                | RecordKind::Enum
                | RecordKind::DataType
                | RecordKind::Tutorial
                | RecordKind::Guide
                | RecordKind::Reference
        )
    }

    /// `true` for the class/service-equivalent top-level definitions that
    /// receive the highest ranking weight.
    pub fn is_top_level_definition(&self) -> bool {
        matches!(self, RecordKind::Class)
    }

    /// Member kinds qualified with a colon (`Owner:Member`) instead of a
    /// dot, following the scripting call convention.
    pub fn uses_colon_qualifier(&self) -> bool {
        matches!(self, RecordKind::Method | RecordKind::Callback)
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_definition_type_is_reference() {
        assert_eq!(RecordKind::from_definition_type("widget"), RecordKind::Reference);
        assert_eq!(RecordKind::from_definition_type("Class"), RecordKind::Class);
    }

    #[test]
    fn parent_and_member_split() {
        assert!(RecordKind::Class.is_parent());
        assert!(RecordKind::Guide.is_parent());
        assert!(!RecordKind::Property.is_parent());
        assert!(!RecordKind::EnumItem.is_parent());
    }

    #[test]
    fn only_classes_are_top_level_definitions() {
        assert!(RecordKind::Class.is_top_level_definition());
        assert!(!RecordKind::Enum.is_top_level_definition());
        assert!(!RecordKind::Method.is_top_level_definition());
    }
}
