//! nini ("nested INI") parser implementation.
//!
//! nini is an INI-style configuration format with two extensions: section
//! names form dotted namespaces (`[net.tls.ciphers]`), and values can be
//! lists, written inline or across lines:
//!
//! ```text
//! ; comments run to end of line, inline allowed
//! [section.sub]
//! key = value with spaces        # a record
//! nums = [1, 2, 3]               # a single-line list
//! names = [
//!     anne,
//!     bob
//! ]
//! ```
//!
//! The parser is streaming and line-oriented: it reads one line at a time,
//! never looks ahead, and calls a caller-supplied sink closure once per
//! record and once per list item. Malformed input is fatal -- every
//! grammar violation aborts the parse with an [`ErrorKind`] and the
//! offending line number, and nothing is recovered or retried.
//!
//! # Parsing Pipeline
//!
//! The parser operates in three phases, applied per line:
//!
//! 1. **Lexical primitives** (`scan`): trim whitespace and strip the
//!    trailing comment, producing the normalized line every later phase
//!    operates on.
//!
//! 2. **Classifiers and tokenizer** (`classify`, `token`): match the
//!    normalized line against one grammar production each; lines in list
//!    position are split into atomic tokens first, since a head, brackets,
//!    and several items may share one physical line.
//!
//! 3. **State machine and driver** (`state`, `parser`): validate every
//!    token's role against the list-state transition table and dispatch
//!    records and items to the sink.
//!
//! # Example
//!
//! ```
//! use libnini::{Entry, Flow, Options, Parser};
//!
//! let parser = Parser::new(Options::default()).unwrap();
//! let mut count = 0u32;
//! parser
//!     .parse_str("[s]\nk = v\n", |_: &Entry<'_>| {
//!         count += 1;
//!         Flow::Continue
//!     })
//!     .unwrap();
//! assert_eq!(count, 1);
//! ```

mod classify;
mod error;
mod options;
mod parser;
mod scan;
mod state;
mod token;
mod tree;

pub use error::{ErrorKind, OptionsError, ParseError, Result};
pub use options::{Options, DEFAULT_MAX_LINE_LEN};
pub use parser::{Entry, Flow, Outcome, Parser};
pub use state::ListState;
pub use tree::{Table, TreeSink, Value};

use std::path::Path;

/// Parse a complete input string with default options.
pub fn parse<F>(input: &str, sink: F) -> Result<Outcome>
where
    F: FnMut(&Entry<'_>) -> Flow,
{
    Parser::default().parse_str(input, sink)
}

/// Parse the config file at `path` with default options.
pub fn parse_file<P, F>(path: P, sink: F) -> Result<Outcome>
where
    P: AsRef<Path>,
    F: FnMut(&Entry<'_>) -> Flow,
{
    Parser::default().parse_file(path, sink)
}
