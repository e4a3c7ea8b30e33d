//! Nested config tree.
//!
//! The core parser reports flat entries with dotted section names; this
//! consuming layer assembles them into a tree, one table per namespace
//! level. `[a.b.c]` becomes a table `"a"` holding a table `"b"` holding a
//! table `"c"`, with the section's records and lists inside the innermost
//! one. Global entries land directly in the root table.

use crate::parser::{Entry, Flow};
use crate::state::ListState;
use std::collections::HashMap;

/// A table mapping keys to values; one per namespace level.
pub type Table = HashMap<String, Value>;

/// A value in the config tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A record's value text.
    Scalar(String),
    /// A list's items, in input order.
    List(Vec<String>),
    /// A nested namespace.
    Table(Table),
}

impl Value {
    /// Returns the text if this is a `Scalar`.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is a `List`.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested table if this is a `Table`.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// Builds a [`Table`] tree out of the parsed entries.
///
/// Bridge it into a parse with a closure:
///
/// ```
/// use libnini::{Parser, TreeSink};
///
/// let mut tree = TreeSink::new('.');
/// Parser::default()
///     .parse_str("[a.b]\nk = v\n", |entry| tree.entry(entry))
///     .unwrap();
/// let root = tree.into_table();
/// assert!(root["a"].as_table().unwrap()["b"].as_table().is_some());
/// ```
///
/// Records assign scalars; list items append to a list created when the
/// first item for that key arrives. Assigning through a key that already
/// holds a non-table where a namespace level is needed replaces it with a
/// fresh table, so later entries win over earlier shadowed ones.
#[derive(Debug)]
pub struct TreeSink {
    root: Table,
    delimiter: char,
}

impl TreeSink {
    /// Create a sink splitting section names on `delimiter`.
    pub fn new(delimiter: char) -> Self {
        TreeSink {
            root: Table::new(),
            delimiter,
        }
    }

    /// Consume the sink, yielding the assembled tree.
    pub fn into_table(self) -> Table {
        self.root
    }

    /// The tree assembled so far.
    pub fn table(&self) -> &Table {
        &self.root
    }

    /// Place one parsed entry into the tree. Always continues.
    pub fn entry(&mut self, entry: &Entry<'_>) -> Flow {
        let table = self.descend(entry.section);
        match entry.state {
            ListState::NoList => {
                table.insert(entry.key.to_string(), Value::Scalar(entry.value.to_string()));
            }
            ListState::Ongoing | ListState::Last => match table.get_mut(entry.key) {
                Some(Value::List(items)) => items.push(entry.value.to_string()),
                _ => {
                    table.insert(entry.key.to_string(), Value::List(vec![entry.value.to_string()]));
                }
            },
            // The driver never dispatches head or bracket tokens.
            ListState::Head | ListState::Open => {}
        }
        Flow::Continue
    }

    /// Walk to the table for `section`, creating levels as needed.
    fn descend(&mut self, section: &str) -> &mut Table {
        let delimiter = self.delimiter;
        let mut table = &mut self.root;
        for part in section.split(delimiter).filter(|p| !p.is_empty()) {
            let slot = table
                .entry(part.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            if !matches!(slot, Value::Table(_)) {
                *slot = Value::Table(Table::new());
            }
            table = match slot {
                Value::Table(t) => t,
                _ => unreachable!("slot was just made a table"),
            };
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::parser::Parser;

    fn tree(input: &str) -> Table {
        let parser = Parser::new(Options {
            allow_globals: true,
            allow_empty_lists: true,
            ..Options::default()
        })
        .unwrap();
        let mut sink = TreeSink::new('.');
        parser.parse_str(input, |entry| sink.entry(entry)).unwrap();
        sink.into_table()
    }

    #[test]
    fn test_flat_section() {
        let t = tree("[server]\nhost = example.net\nport = 8080\n");
        let server = t["server"].as_table().unwrap();
        assert_eq!(server["host"].as_scalar(), Some("example.net"));
        assert_eq!(server["port"].as_scalar(), Some("8080"));
    }

    #[test]
    fn test_nested_sections() {
        let t = tree("[a.b.c]\nk = v\n[a.b]\nother = w\n");
        let a = t["a"].as_table().unwrap();
        let b = a["b"].as_table().unwrap();
        let c = b["c"].as_table().unwrap();
        assert_eq!(c["k"].as_scalar(), Some("v"));
        assert_eq!(b["other"].as_scalar(), Some("w"));
    }

    #[test]
    fn test_globals_in_root() {
        let t = tree("k = v\n[s]\nk2 = v2\n");
        assert_eq!(t["k"].as_scalar(), Some("v"));
        assert!(t["s"].as_table().is_some());
    }

    #[test]
    fn test_list_assembly() {
        let t = tree("[s]\nnums = [1, 2, 3]\n");
        let s = t["s"].as_table().unwrap();
        assert_eq!(
            s["nums"].as_list(),
            Some(["1".to_string(), "2".to_string(), "3".to_string()].as_slice())
        );
    }

    #[test]
    fn test_empty_list_never_materializes() {
        let t = tree("[s]\nxs = []\n");
        let s = t["s"].as_table().unwrap();
        assert!(!s.contains_key("xs"));
    }

    #[test]
    fn test_scalar_shadowed_by_namespace() {
        // "a" is first a record key, then a namespace level; the namespace
        // wins.
        let t = tree("a = v\n[a.b]\nk = w\n");
        let a = t["a"].as_table().unwrap();
        let b = a["b"].as_table().unwrap();
        assert_eq!(b["k"].as_scalar(), Some("w"));
    }

    #[test]
    fn test_later_record_overwrites() {
        let t = tree("[s]\nk = one\nk = two\n");
        let s = t["s"].as_table().unwrap();
        assert_eq!(s["k"].as_scalar(), Some("two"));
    }

    #[test]
    fn test_empty_path_segments_skipped() {
        // "[x..y]" nests two levels, not three.
        let t = tree("[x..y]\nk = v\n");
        let x = t["x"].as_table().unwrap();
        let y = x["y"].as_table().unwrap();
        assert_eq!(y["k"].as_scalar(), Some("v"));
    }
}
