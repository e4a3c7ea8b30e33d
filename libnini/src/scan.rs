//! Phase 1: Lexical primitives
//!
//! Slice-level helpers applied to every raw line before any classifier sees
//! it: whitespace trimming, inline-comment stripping, and the character
//! class defining what may appear in section names, keys, values, and list
//! items. Classifiers and the tokenizer only ever operate on the output of
//! [`normalize`]; none of them re-implement whitespace or comment handling.

/// Comment characters. Everything from the first occurrence of either,
/// through end of line, is comment text.
const COMMENT_CHARS: [char; 2] = [';', '#'];

/// True if `c` opens a comment.
pub fn is_comment(c: char) -> bool {
    COMMENT_CHARS.contains(&c)
}

/// Return the suffix of `s` starting at the first non-whitespace character.
pub fn strip_leading_ws(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_ascii_whitespace())
}

/// Return the prefix of `s` ending before the last run of whitespace.
/// An empty input stays empty.
pub fn strip_trailing_ws(s: &str) -> &str {
    s.trim_end_matches(|c: char| c.is_ascii_whitespace())
}

/// Truncate `s` at the first comment character. An empty result means the
/// whole line was a comment.
pub fn strip_comment(s: &str) -> &str {
    match s.find(|c: char| is_comment(c)) {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Normalize a raw line: leading trim, then comment strip, then trailing
/// trim, in that order. The result is what every classifier operates on.
pub fn normalize(s: &str) -> &str {
    strip_trailing_ws(strip_comment(strip_leading_ws(s)))
}

/// True if the normalized line carries no content.
pub fn is_blank(normalized: &str) -> bool {
    normalized.is_empty()
}

/// True if `c` may appear in a section name, key, value, or list item.
///
/// Whitespace counts as allowed only when `ws_allowed` is set; that is the
/// case solely for record values. Section names, keys, and list items are
/// contiguous whitespace-free tokens.
pub fn is_allowed(c: char, ws_allowed: bool) -> bool {
    match c {
        '.' | '-' | '_' | '@' | '/' | '*' | '?' | '%' | '&' => true,
        c if c.is_ascii_alphanumeric() => true,
        c if c.is_ascii_whitespace() => ws_allowed,
        _ => false,
    }
}

/// Byte offset just past the leading run of `is_allowed(_, false)` chars.
pub fn allowed_run(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !is_allowed(c, false))
        .map_or(s.len(), |(idx, _)| idx)
}
