//! Parser configuration.
//!
//! All customization points are gathered into one [`Options`] value handed
//! to the parser at construction. Nothing is process-wide: two parsers
//! with different options can run concurrently without interfering.

use crate::error::OptionsError;
use crate::scan;

/// Default maximum physical line length in bytes.
pub const DEFAULT_MAX_LINE_LEN: usize = 1024;

/// Configuration for a parse run. Read-only once the parser is built.
#[derive(Debug, Clone)]
pub struct Options {
    /// Accept records and lists that precede any section header. Such
    /// entries are reported with an empty section name. Off by default.
    pub allow_globals: bool,

    /// Accept lists that open and close with zero items. Off by default.
    pub allow_empty_lists: bool,

    /// Character splitting a dotted section name into namespace levels,
    /// consumed by the tree-building layer. `.` by default.
    pub section_delimiter: char,

    /// (opening, closing) list bracket pair. `('[', ']')` by default.
    pub brackets: (char, char),

    /// Maximum physical line length in bytes; longer lines are fatal.
    pub max_line_len: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allow_globals: false,
            allow_empty_lists: false,
            section_delimiter: '.',
            brackets: ('[', ']'),
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl Options {
    /// Reject configurations that would make tokenization ambiguous.
    ///
    /// The brackets are token boundary markers, so neither may be an
    /// identifier/value character, whitespace, a comment character, `=`,
    /// or `,` -- and they must differ from each other. The namespace
    /// delimiter may not be whitespace or a comment character, since those
    /// can never appear in a parsed section name.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let (open, close) = self.brackets;
        if open == close {
            return Err(OptionsError::BracketsEqual);
        }
        for c in [open, close] {
            if scan::is_allowed(c, true) || scan::is_comment(c) || c == '=' || c == ',' {
                return Err(OptionsError::BadBracket(c));
            }
        }

        let d = self.section_delimiter;
        if d.is_ascii_whitespace() || scan::is_comment(d) {
            return Err(OptionsError::BadDelimiter(d));
        }

        Ok(())
    }
}
