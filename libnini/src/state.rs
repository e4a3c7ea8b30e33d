//! Phase 3a: List state machine
//!
//! The parser is line-oriented and never looks ahead, so everything it
//! knows about an in-progress list lives in a single [`ListState`] value:
//! the head sets `Head`, the opening bracket sets `Open`, every item but
//! the last sets `Ongoing`, the last item sets `Last`, and the closing
//! bracket resets to `NoList`. Lists cannot nest, so exactly one state is
//! live at a time.
//!
//! [`advance`] is the one place transition legality is decided; the driver
//! consults it before committing any state change, and a rejection aborts
//! the parse at the current line.

use crate::error::ErrorKind;
use std::fmt;

/// Where the parser currently is within a list construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// Not inside any list.
    NoList,
    /// Just consumed a list head (`name =`).
    Head,
    /// Just consumed the opening bracket.
    Open,
    /// Mid-list; more items expected.
    Ongoing,
    /// Consumed the final (comma-less) item; closing bracket expected.
    Last,
}

impl fmt::Display for ListState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListState::NoList => "nolist",
            ListState::Head => "head",
            ListState::Open => "open",
            ListState::Ongoing => "ongoing",
            ListState::Last => "last",
        };
        f.write_str(s)
    }
}

/// Validate a proposed transition from `prev` to `next`.
///
/// Returns the specific structural error for every illegal adjacency pair.
/// `Open -> NoList` (a list that opens and immediately closes) is legal
/// only when `allow_empty_lists` is set.
pub fn advance(
    prev: ListState,
    next: ListState,
    allow_empty_lists: bool,
) -> Result<(), ErrorKind> {
    use ListState::*;

    match (prev, next) {
        (NoList, Head) => Ok(()),
        (NoList, NoList) => Err(ErrorKind::RedundantBracket),
        (NoList, Open) => Err(ErrorKind::OutsideList),
        (NoList, _) => Err(ErrorKind::NoList),

        (Head, Open) => Ok(()),
        (Head, Head) => Err(ErrorKind::MalformedList),
        (Head, _) => Err(ErrorKind::ListNotStarted),

        (Open, Ongoing) | (Open, Last) => Ok(()),
        (Open, Head) => Err(ErrorKind::Nested),
        (Open, Open) => Err(ErrorKind::RedundantBracket),
        (Open, NoList) if allow_empty_lists => Ok(()),
        (Open, NoList) => Err(ErrorKind::EmptyList),

        (Ongoing, Ongoing) | (Ongoing, Last) => Ok(()),
        (Ongoing, NoList) => Err(ErrorKind::RedundantComma),
        (Ongoing, _) => Err(ErrorKind::ListNotEnded),

        (Last, NoList) => Ok(()),
        (Last, Head) => Err(ErrorKind::Nested),
        (Last, Open) => Err(ErrorKind::MalformedList),
        (Last, _) => Err(ErrorKind::MissingComma),
    }
}

#[cfg(test)]
mod tests {
    use super::ListState::*;
    use super::*;

    fn check(prev: ListState, next: ListState, expected: Result<(), ErrorKind>) {
        assert_eq!(advance(prev, next, false), expected, "{prev} -> {next}");
    }

    #[test]
    fn test_legal_transitions() {
        check(NoList, Head, Ok(()));
        check(Head, Open, Ok(()));
        check(Open, Ongoing, Ok(()));
        check(Open, Last, Ok(()));
        check(Ongoing, Ongoing, Ok(()));
        check(Ongoing, Last, Ok(()));
        check(Last, NoList, Ok(()));
    }

    #[test]
    fn test_from_nolist() {
        check(NoList, NoList, Err(ErrorKind::RedundantBracket));
        check(NoList, Open, Err(ErrorKind::OutsideList));
        check(NoList, Ongoing, Err(ErrorKind::NoList));
        check(NoList, Last, Err(ErrorKind::NoList));
    }

    #[test]
    fn test_from_head() {
        check(Head, Head, Err(ErrorKind::MalformedList));
        check(Head, Ongoing, Err(ErrorKind::ListNotStarted));
        check(Head, Last, Err(ErrorKind::ListNotStarted));
        check(Head, NoList, Err(ErrorKind::ListNotStarted));
    }

    #[test]
    fn test_from_open() {
        check(Open, Head, Err(ErrorKind::Nested));
        check(Open, Open, Err(ErrorKind::RedundantBracket));
        check(Open, NoList, Err(ErrorKind::EmptyList));
        assert_eq!(advance(Open, NoList, true), Ok(()), "empty list allowed");
    }

    #[test]
    fn test_from_ongoing() {
        check(Ongoing, NoList, Err(ErrorKind::RedundantComma));
        check(Ongoing, Head, Err(ErrorKind::ListNotEnded));
        check(Ongoing, Open, Err(ErrorKind::ListNotEnded));
    }

    #[test]
    fn test_from_last() {
        check(Last, Head, Err(ErrorKind::Nested));
        check(Last, Open, Err(ErrorKind::MalformedList));
        check(Last, Ongoing, Err(ErrorKind::MissingComma));
        check(Last, Last, Err(ErrorKind::MissingComma));
    }
}
