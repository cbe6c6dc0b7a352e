use regex::Regex;
use std::sync::LazyLock;

/// Base URL of the rendered documentation site. Record URLs are this plus
/// the source path relative to [`CONTENT_ROOT`], minus the file extension.
pub const DOCS_BASE_URL: &str = "https://create.roblox.com/docs";

/// Directory inside the archive under which documentation sources live,
/// possibly below a wrapper directory (GitHub zipballs nest everything
/// under `repo-branch/`). Anything outside it (assets, tooling, licences)
/// is not extracted.
pub const CONTENT_ROOT: &str = "content/en-us/";

/// Hard cap on stored description length, in characters. Descriptions
/// longer than this are truncated and marked with an ellipsis.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Maximum number of keywords kept per record.
pub const MAX_KEYWORDS: usize = 10;

/// Minimum token length for a keyword. Anything this short matches too
/// much to be a useful match surface.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Cap on members extracted per category of a definition document,
/// bounding output size per file regardless of source size.
pub const MAX_MEMBERS_PER_CATEGORY: usize = 50;

/// Tag marking a member as deprecated; tagged members are dropped
/// entirely at extraction.
pub const DEPRECATED_TAG: &str = "Deprecated";

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Keyword tokenization splits on anything that isn't alphanumeric.
regex!(TOKEN_SPLIT_REGEX, r"[^A-Za-z0-9]+");
