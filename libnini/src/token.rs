//! Phase 2b: List tokenizer
//!
//! List heads, brackets, and items can share one physical line
//! (`nums = [1, 2, 3]`) or be spread over several. The tokenizer splits a
//! normalized line into atomic list tokens, one call at a time, returning
//! the token and the unconsumed remainder. It locates boundaries only;
//! every token is re-examined by the single-token classifiers and the
//! verdict is then validated by the state machine.
//!
//! Boundary markers are the bracket characters, `=`, `,`, and the edges of
//! identifier-character runs. Head tokens keep their trailing `=` and
//! non-final items keep their trailing comma, so the classifiers can tell
//! the roles apart without any further context.

use crate::scan;

/// Extract the next list token from `rest`.
///
/// Returns `(token, remainder)`, or `None` once `rest` is exhausted. Meant
/// to be called in a loop, feeding each remainder back in.
pub fn next_token(rest: &str, brackets: (char, char)) -> Option<(&str, &str)> {
    let (open, close) = brackets;
    let rest = scan::normalize(rest);
    if rest.is_empty() {
        return None;
    }

    // Leading identifier run; empty when the token is a bare bracket,
    // comma, or equals sign.
    let run = scan::allowed_run(rest);
    let after = scan::strip_leading_ws(&rest[run..]);
    // Byte offset of the boundary character within rest.
    let boundary = rest.len() - after.len();

    match after.chars().next() {
        // Equals sign, opening bracket, or comma: the token runs through
        // it, keeping the marker so the classifiers see the role.
        Some(c) if c == '=' || c == open || c == ',' => {
            let end = boundary + c.len_utf8();
            Some((&rest[..end], &rest[end..]))
        }
        // Another identifier character starts the next token; the run by
        // itself is this one.
        Some(c) if scan::is_allowed(c, false) => Some((&rest[..run], &rest[boundary..])),
        // Closing bracket: the preceding item if there is one, otherwise
        // the bracket itself.
        Some(c) if c == close => {
            if run > 0 {
                Some((&rest[..run], &rest[boundary..]))
            } else {
                let end = boundary + c.len_utf8();
                Some((&rest[..end], &rest[end..]))
            }
        }
        // Exhausted: the run is the final token. Unrecognized boundary:
        // hand the whole remainder to the classifiers, which reject it
        // with a precise error.
        _ => Some((rest, "")),
    }
}

/// Collect every token on a line. Test helper.
#[cfg(test)]
fn tokens(line: &str, brackets: (char, char)) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = line;
    while let Some((token, next)) = next_token(rest, brackets) {
        out.push(token.to_string());
        rest = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: (char, char) = ('[', ']');

    #[test]
    fn test_single_line_list() {
        assert_eq!(
            tokens("nums = [1, 2, 3]", SQUARE),
            vec!["nums =", "[", "1,", "2,", "3", "]"]
        );
    }

    #[test]
    fn test_no_spaces() {
        assert_eq!(tokens("nums=[1,2]", SQUARE), vec!["nums=", "[", "1,", "2", "]"]);
    }

    #[test]
    fn test_ragged_spacing() {
        assert_eq!(
            tokens("mylist = [ one, two , three   , four  ] ", SQUARE),
            vec!["mylist =", "[", "one,", "two ,", "three   ,", "four", "]"]
        );
    }

    #[test]
    fn test_partial_lines() {
        assert_eq!(tokens("mylist = [", SQUARE), vec!["mylist =", "["]);
        assert_eq!(tokens("one,", SQUARE), vec!["one,"]);
        assert_eq!(tokens("two", SQUARE), vec!["two"]);
        assert_eq!(tokens("]", SQUARE), vec!["]"]);
        assert_eq!(tokens("three]", SQUARE), vec!["three", "]"]);
    }

    #[test]
    fn test_comment_and_blank() {
        assert_eq!(tokens("", SQUARE), Vec::<String>::new());
        assert_eq!(tokens("   ; just a comment", SQUARE), Vec::<String>::new());
        assert_eq!(tokens("one, two ; three, four", SQUARE), vec!["one,", "two"]);
    }

    #[test]
    fn test_empty_list_on_one_line() {
        assert_eq!(tokens("x = []", SQUARE), vec!["x =", "[", "]"]);
    }

    #[test]
    fn test_bare_comma_token() {
        // A stray comma becomes its own token and is left for the
        // classifiers to reject.
        assert_eq!(tokens(", one", SQUARE), vec![",", "one"]);
        assert_eq!(tokens("one,,", SQUARE), vec!["one,", ","]);
    }

    #[test]
    fn test_unrecognized_tail() {
        // An unknown boundary character swallows the remainder into one
        // token for the classifiers to reject.
        assert_eq!(tokens("one, {bad}", SQUARE), vec!["one,", "{bad}"]);
    }

    #[test]
    fn test_custom_brackets() {
        const CURLY: (char, char) = ('{', '}');
        assert_eq!(tokens("xs = {a, b}", CURLY), vec!["xs =", "{", "a,", "b", "}"]);
        // Square brackets are nothing special under curly configuration.
        assert_eq!(tokens("xs = [a", CURLY), vec!["xs =", "[a"]);
    }
}
