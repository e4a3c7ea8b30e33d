//! Error types for nini parsing.

use thiserror::Error;

/// Result type for nini parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Reason a line (or a token within a line) was rejected.
///
/// Every kind is fatal to the parse in progress; none are recovered from.
/// The diagnostic strings are phrased from the config author's point of
/// view, hinting at the most likely fix.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A physical line exceeds the configured maximum length.
    #[error("line exceeds maximum acceptable length")]
    TooLong,

    /// A record or list appeared before any section header while global
    /// records are disallowed.
    #[error("entry without section")]
    NoSection,

    /// The line/token matches none of the recognized grammars.
    #[error("malformed/syntactically incorrect")]
    Malformed,

    /// A list token sequence violates list grammar beyond simple nesting.
    #[error("malformed/syntactically incorrect list")]
    MalformedList,

    /// A section header or record interrupted an open list.
    #[error("illegal nesting (unterminated list?)")]
    Nested,

    /// A list item appeared with no list currently open.
    #[error("list item without list")]
    NoList,

    /// A list opened and closed with zero items while empty lists are
    /// disallowed.
    #[error("malformed list (empty list?)")]
    EmptyList,

    /// An opening bracket appeared with no preceding list head.
    #[error("list token outside any list")]
    OutsideList,

    /// A new item arrived directly after the flagged-last item, without an
    /// intervening closing bracket.
    #[error("malformed list entry (previous item missing comma?)")]
    MissingComma,

    /// A comma with no following item before the list closed.
    #[error("malformed list entry (redundant comma?)")]
    RedundantComma,

    /// A bracket where no counterpart state transition allows one.
    #[error("malformed list (redundant bracket?)")]
    RedundantBracket,

    /// A list head was not followed by an opening bracket.
    #[error("malformed list (missing opening bracket?)")]
    ListNotStarted,

    /// A list was never closed before the surrounding context changed or
    /// the input ended.
    #[error("malformed list (unterminated list?)")]
    ListNotEnded,
}

/// Error type for nini parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A grammar violation, located at a 1-based line number.
    #[error("failed to parse line {line}: {kind}")]
    Syntax {
        /// What was wrong.
        kind: ErrorKind,
        /// 1-based line number at which the violation was detected.
        line: u32,
    },

    /// The underlying reader failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Shorthand constructor used throughout the driver.
    pub(crate) fn syntax(kind: ErrorKind, line: u32) -> Self {
        ParseError::Syntax { kind, line }
    }

    /// The grammar-violation kind, if this is a syntax error.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ParseError::Syntax { kind, .. } => Some(*kind),
            ParseError::Io(_) => None,
        }
    }

    /// The 1-based line number, if this is a syntax error.
    pub fn line(&self) -> Option<u32> {
        match self {
            ParseError::Syntax { line, .. } => Some(*line),
            ParseError::Io(_) => None,
        }
    }
}

/// Error type for rejected parser configurations.
///
/// Raised by [`Options::validate`](crate::Options::validate) and
/// [`Parser::new`](crate::Parser::new), never during a parse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsError {
    /// The opening and closing bracket are the same character.
    #[error("opening and closing list brackets must differ")]
    BracketsEqual,

    /// A bracket character that would make tokenization ambiguous: an
    /// identifier/value character, whitespace, a comment character, `=`,
    /// or `,`.
    #[error("invalid list bracket {0:?}: collides with a token boundary or identifier character")]
    BadBracket(char),

    /// A namespace delimiter that can never appear in a section name.
    #[error("invalid namespace delimiter {0:?}")]
    BadDelimiter(char),
}
