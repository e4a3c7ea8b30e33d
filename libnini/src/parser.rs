//! Phase 3b: Parse driver
//!
//! The driver sequences the phases into a full-stream parse. For each
//! line: enforce the length bound, normalize, skip blanks, try the section
//! and record classifiers, and otherwise run the list tokenizer over the
//! line, validating every token's role against the state machine. Records
//! and list items are forwarded to the sink; section headers, list heads,
//! and brackets only update driver state.
//!
//! Parsing is strictly sequential and fail-fast: the section name and list
//! state carry forward from line to line, every grammar violation aborts
//! with the offending line number, and nothing is ever retried.

use crate::classify;
use crate::error::{ErrorKind, ParseError, Result};
use crate::options::Options;
use crate::scan;
use crate::state::{self, ListState};
use crate::token;
use log::trace;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One parsed record or list item, as handed to the sink.
///
/// For a record, `state` is [`ListState::NoList`] and `key`/`value` are the
/// record's own. For a list item, `state` is `Ongoing` or `Last`, `key` is
/// the list's name, and `value` is the item text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// 1-based line number the entry was parsed from.
    pub line: u32,
    /// List context for this entry.
    pub state: ListState,
    /// Current section name; empty in the global namespace.
    pub section: &'a str,
    /// Record key or list name.
    pub key: &'a str,
    /// Record value or list item text.
    pub value: &'a str,
}

/// Sink verdict: keep parsing, or stop cleanly.
///
/// The sink is any `FnMut(&Entry) -> Flow`. It only ever sees entries that
/// passed every grammar check; it is called exactly once per record and
/// once per list item, and never for section headers, list heads, or
/// brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Continue with the next entry.
    Continue,
    /// Halt the parse; the driver reports [`Outcome::Stopped`].
    Stop,
}

/// How a parse run ended when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The whole input was consumed.
    Finished,
    /// The sink requested an early stop.
    Stopped,
}

/// A configured parser. Cheap to construct; reusable across inputs.
#[derive(Debug, Clone)]
pub struct Parser {
    opts: Options,
}

impl Default for Parser {
    fn default() -> Self {
        // Default options always pass validation.
        Parser {
            opts: Options::default(),
        }
    }
}

impl Parser {
    /// Build a parser, rejecting invalid configurations up front.
    pub fn new(opts: Options) -> std::result::Result<Self, crate::error::OptionsError> {
        opts.validate()?;
        Ok(Parser { opts })
    }

    /// The configuration this parser runs with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Parse a complete input string, dispatching entries to `sink`.
    pub fn parse_str<F>(&self, input: &str, mut sink: F) -> Result<Outcome>
    where
        F: FnMut(&Entry<'_>) -> Flow,
    {
        let mut driver = Driver::new(&self.opts);
        for raw in input.lines() {
            if driver.line(raw, &mut sink)? == Flow::Stop {
                return Ok(Outcome::Stopped);
            }
        }
        driver.finish()?;
        Ok(Outcome::Finished)
    }

    /// Parse from a buffered reader, line by line.
    pub fn parse_reader<R, F>(&self, mut reader: R, mut sink: F) -> Result<Outcome>
    where
        R: BufRead,
        F: FnMut(&Entry<'_>) -> Flow,
    {
        let mut driver = Driver::new(&self.opts);
        let mut buf = String::new();
        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                break;
            }
            let raw = buf.strip_suffix('\n').unwrap_or(&buf);
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            if driver.line(raw, &mut sink)? == Flow::Stop {
                return Ok(Outcome::Stopped);
            }
        }
        driver.finish()?;
        Ok(Outcome::Finished)
    }

    /// Parse the config file at `path`.
    pub fn parse_file<P, F>(&self, path: P, sink: F) -> Result<Outcome>
    where
        P: AsRef<Path>,
        F: FnMut(&Entry<'_>) -> Flow,
    {
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file), sink)
    }
}

/// Per-run mutable state: current section, current list name, list state,
/// and the line counter.
struct Driver<'o> {
    opts: &'o Options,
    section: String,
    key: String,
    list: ListState,
    ln: u32,
}

impl<'o> Driver<'o> {
    fn new(opts: &'o Options) -> Self {
        Driver {
            opts,
            section: String::new(),
            key: String::new(),
            list: ListState::NoList,
            ln: 0,
        }
    }

    /// Process one raw physical line.
    fn line<F>(&mut self, raw: &str, sink: &mut F) -> Result<Flow>
    where
        F: FnMut(&Entry<'_>) -> Flow,
    {
        self.ln += 1;

        // Length bound applies to the raw line, before any classification.
        if raw.len() > self.opts.max_line_len {
            return Err(ParseError::syntax(ErrorKind::TooLong, self.ln));
        }

        let line = scan::normalize(raw);
        if scan::is_blank(line) {
            return Ok(Flow::Continue);
        }

        // Section header.
        if let Some(name) = classify::section_name(line) {
            trace!("line {}: section header [{}]", self.ln, name);
            if self.list != ListState::NoList {
                return Err(ParseError::syntax(ErrorKind::Nested, self.ln));
            }
            self.section.clear();
            self.section.push_str(name);
            return Ok(Flow::Continue);
        }

        // Record.
        if let Some((key, value)) = classify::record(line) {
            trace!("line {}: record {}={}", self.ln, key, value);
            if self.section.is_empty() && !self.opts.allow_globals {
                return Err(ParseError::syntax(ErrorKind::NoSection, self.ln));
            }
            if self.list != ListState::NoList {
                return Err(ParseError::syntax(ErrorKind::Nested, self.ln));
            }
            let entry = Entry {
                line: self.ln,
                state: ListState::NoList,
                section: &self.section,
                key,
                value,
            };
            return Ok(sink(&entry));
        }

        // Anything else must tokenize as list grammar.
        self.list_line(line, sink)
    }

    /// Run the tokenizer over a list line, classifying and validating each
    /// token and dispatching items to the sink.
    fn list_line<F>(&mut self, line: &str, sink: &mut F) -> Result<Flow>
    where
        F: FnMut(&Entry<'_>) -> Flow,
    {
        let (open, close) = self.opts.brackets;
        let mut rest = line;

        while let Some((tok, next)) = token::next_token(rest, self.opts.brackets) {
            rest = next;
            trace!("line {}: list token {:?}", self.ln, tok);

            if let Some(name) = classify::list_head(tok) {
                if self.section.is_empty() && !self.opts.allow_globals {
                    return Err(ParseError::syntax(ErrorKind::NoSection, self.ln));
                }
                self.advance(ListState::Head)?;
                self.key.clear();
                self.key.push_str(name);
            } else if classify::is_list_open(tok, open) {
                self.advance(ListState::Open)?;
            } else if let Some((item, is_last)) = classify::list_entry(tok) {
                let next_state = if is_last {
                    ListState::Last
                } else {
                    ListState::Ongoing
                };
                self.advance(next_state)?;
                let entry = Entry {
                    line: self.ln,
                    state: self.list,
                    section: &self.section,
                    key: &self.key,
                    value: item,
                };
                if sink(&entry) == Flow::Stop {
                    return Ok(Flow::Stop);
                }
            } else if classify::is_list_close(tok, close) {
                self.advance(ListState::NoList)?;
            } else {
                return Err(ParseError::syntax(ErrorKind::Malformed, self.ln));
            }
        }

        Ok(Flow::Continue)
    }

    /// Consult the transition table; commit the new state only on success.
    fn advance(&mut self, next: ListState) -> Result<()> {
        trace!("line {}: list state {} -> {}", self.ln, self.list, next);
        state::advance(self.list, next, self.opts.allow_empty_lists)
            .map_err(|kind| ParseError::syntax(kind, self.ln))?;
        self.list = next;
        Ok(())
    }

    /// End-of-input check: an open list at EOF is unrecoverable.
    fn finish(&self) -> Result<()> {
        if self.list != ListState::NoList {
            return Err(ParseError::syntax(ErrorKind::ListNotEnded, self.ln));
        }
        Ok(())
    }
}
