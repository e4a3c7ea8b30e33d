//! Phase 2: Line classifiers
//!
//! One recognizer per grammar production. Each takes an already-normalized
//! line (see [`crate::scan::normalize`]) and returns `None` for no-match or
//! the extracted substrings on match. All of them are pure functions; the
//! driver decides what a match means in context.
//!
//! The single-token productions (`is_list_open`, `is_list_close`,
//! [`list_entry`], [`list_head`]) are also applied to the sub-tokens
//! produced by the list tokenizer, which is why they must tolerate internal
//! whitespace (`"key ="`) but never leading or trailing whitespace.

use crate::scan;

/// Extract the section name from a section header line.
///
/// Grammar: `"[" ws* NAME ws* "]"` with nothing after the closing bracket.
/// NAME is one or more identifier characters.
pub fn section_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let rest = scan::strip_leading_ws(rest);

    let name_len = scan::allowed_run(rest);
    if name_len == 0 {
        return None;
    }
    let name = &rest[..name_len];

    // Whitespace between the name and the closing bracket is allowed;
    // anything else is not, and the line must end at the bracket.
    let after = scan::strip_leading_ws(&rest[name_len..]);
    let after = after.strip_prefix(']')?;
    if !after.is_empty() {
        return None;
    }

    Some(name)
}

/// Extract (key, value) from a record line.
///
/// Grammar: `KEY ws* "=" ws* VALUE` consuming to end of line. The key is a
/// contiguous run of identifier characters; the value may contain internal
/// whitespace but must start with a non-whitespace identifier character.
/// `=` may not appear in either.
pub fn record(line: &str) -> Option<(&str, &str)> {
    let key_len = scan::allowed_run(line);
    if key_len == 0 {
        return None;
    }
    let key = &line[..key_len];

    let rest = scan::strip_leading_ws(&line[key_len..]);
    let rest = rest.strip_prefix('=')?;
    let value = scan::strip_leading_ws(rest);

    match value.chars().next() {
        Some(c) if scan::is_allowed(c, false) => {}
        _ => return None,
    }
    // The line is already right-trimmed, so the value runs to end of line.
    if !value.chars().all(|c| scan::is_allowed(c, true)) {
        return None;
    }

    Some((key, value))
}

/// Extract the list name from a list head.
///
/// Grammar: `KEY ws* "="` with nothing after the equals sign. The opening
/// bracket is a separate token, whether it sits on the same physical line
/// or the next one.
pub fn list_head(line: &str) -> Option<&str> {
    let key_len = scan::allowed_run(line);
    if key_len == 0 {
        return None;
    }
    let key = &line[..key_len];

    let rest = scan::strip_leading_ws(&line[key_len..]);
    let rest = rest.strip_prefix('=')?;
    if !rest.is_empty() {
        return None;
    }

    Some(key)
}

/// True iff the line/token is exactly the opening bracket.
pub fn is_list_open(line: &str, open: char) -> bool {
    let mut chars = line.chars();
    chars.next() == Some(open) && chars.next().is_none()
}

/// True iff the line/token is exactly the closing bracket.
pub fn is_list_close(line: &str, close: char) -> bool {
    let mut chars = line.chars();
    chars.next() == Some(close) && chars.next().is_none()
}

/// Extract (item, is_last) from a list entry.
///
/// An item is a contiguous run of identifier characters, optionally
/// followed by whitespace and a single comma. No comma means this is the
/// final item of its list.
pub fn list_entry(line: &str) -> Option<(&str, bool)> {
    let item_len = scan::allowed_run(line);
    if item_len == 0 {
        return None;
    }
    let item = &line[..item_len];

    let rest = scan::strip_leading_ws(&line[item_len..]);
    if rest.is_empty() {
        return Some((item, true));
    }
    match rest.strip_prefix(',') {
        // At most one comma, and nothing after it within this token.
        Some("") => Some((item, false)),
        _ => None,
    }
}
