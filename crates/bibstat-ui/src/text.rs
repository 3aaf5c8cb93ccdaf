//! Table cell text helpers

use crate::config::DEFAULT_ELLIPSIS_CHARS;

/// Shorten `text` to `max_chars` characters followed by `" ..."`.
///
/// A `max_chars` of zero means the default limit. Text within the limit is
/// returned unchanged.
pub fn ellipsis(text: &str, max_chars: usize) -> String {
    let max_chars = if max_chars == 0 { DEFAULT_ELLIPSIS_CHARS } else { max_chars };
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{} ...", &text[..cut]),
        None => text.to_string(),
    }
}
