//! Keyword generation for the auxiliary match surface.

use crate::consts::{MAX_KEYWORDS, MIN_KEYWORD_LEN, TOKEN_SPLIT_REGEX};

/// Builds the keyword set for a record from its title, description and
/// source path segments.
///
/// Tokens are lowercased, split on non-alphanumeric boundaries, kept only
/// when longer than two characters, deduplicated in first-seen order and
/// capped at [`MAX_KEYWORDS`]. Keywords are a match surface only; they
/// never contribute a ranking weight of their own.
pub fn keywords(title: &str, description: Option<&str>, path: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
    let sources = [Some(title), description, Some(path)];
    for source in sources.into_iter().flatten() {
        for token in TOKEN_SPLIT_REGEX.split(source) {
            if token.len() < MIN_KEYWORD_LEN {
                continue;
            }
            let token = token.to_lowercase();
            if !out.contains(&token) {
                out.push(token);
            }
            if out.len() == MAX_KEYWORDS {
                return out;
            }
        }
    }
    out
}
