//! Utilities for capping description length before records are stored.

use crate::consts::DESCRIPTION_MAX_CHARS;

/// Truncates a description to at most `max_chars` characters, appending an
/// ellipsis when anything was cut. Operates on `char` boundaries, so
/// multi-byte text is never split mid-codepoint.
///
/// Surrounding whitespace is trimmed first; truncation also trims trailing
/// whitespace at the cut point so the ellipsis never follows a space.
///
/// # Examples
///
/// ```rust
/// use docdex_extract::truncate_description;
/// assert_eq!(truncate_description("short", 10), "short");
/// assert_eq!(truncate_description("hello world", 5), "hello…");
/// ```
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    let mut indices = text.char_indices();
    match indices.nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut truncated = text[..cut].trim_end().to_string();
            truncated.push('…');
            truncated
        },
    }
}

/// [`truncate_description`] with the standard cap applied.
pub fn cap_description(text: &str) -> String {
    truncate_description(text, DESCRIPTION_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_truncation_needed() {
        assert_eq!(truncate_description("hello", 200), "hello");
    }

    #[test]
    fn exact_length_is_untouched() {
        assert_eq!(truncate_description("abcde", 5), "abcde");
    }

    #[test]
    fn truncates_and_marks() {
        let result = truncate_description("abcdefghij", 4);
        assert_eq!(result, "abcd…");
    }

    #[test]
    fn never_splits_multibyte() {
        // Each 'é' is two bytes; a byte-indexed cut would panic.
        let result = truncate_description("ééééééé", 3);
        assert_eq!(result, "ééé…");
    }

    #[test]
    fn trims_whitespace_at_cut() {
        let result = truncate_description("word and more", 5);
        assert_eq!(result, "word…");
    }

    #[test]
    fn empty_input() {
        assert_eq!(truncate_description("", 10), "");
    }
}
