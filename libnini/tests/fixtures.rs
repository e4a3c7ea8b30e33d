//! Test harness driving the parser against fixture files.
//!
//! `test/good/*.ini` must parse, and the flat dump of every sink call must
//! match the sibling `.entries` file (`line|state|section|key|value`, one
//! entry per line). `test/bad/*.ini` must fail, with an error message
//! matching the sibling `.error` file.
//!
//! A fixture whose first line is `; options: <flags>` is parsed with those
//! options switched on; the directive line is an ordinary comment as far
//! as the parser is concerned.

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use libnini::{Entry, Flow, Options, Parser, TreeSink};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// All .ini fixtures in a subdirectory of test/, sorted.
fn fixture_paths(subdir: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(subdir).join("*.ini");
    let mut paths: Vec<PathBuf> = glob(pattern.to_str().unwrap())
        .expect("bad glob pattern")
        .filter_map(|p| p.ok())
        .collect();
    paths.sort();
    paths
}

/// Read a sibling expectation file with the given extension.
fn read_sibling(ini_path: &Path, ext: &str) -> String {
    let path = ini_path.with_extension(ext);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing expectation file {}: {e}", path.display()))
}

/// Extract parse options from a leading `; options:` directive.
fn fixture_options(source: &str) -> Options {
    let mut opts = Options::default();
    if let Some(flags) = source
        .lines()
        .next()
        .and_then(|l| l.trim().strip_prefix("; options:"))
    {
        for flag in flags.split_whitespace() {
            match flag {
                "allow_globals" => opts.allow_globals = true,
                "allow_empty_lists" => opts.allow_empty_lists = true,
                other => panic!("unknown fixture option {other:?}"),
            }
        }
    }
    opts
}

/// Parse `source` and render every sink call as one dump line.
fn dump_entries(source: &str) -> Result<String, libnini::ParseError> {
    let parser = Parser::new(fixture_options(source)).expect("fixture options must be valid");
    let mut lines = Vec::new();
    parser.parse_str(source, |e: &Entry<'_>| {
        lines.push(format!(
            "{}|{}|{}|{}|{}",
            e.line, e.state, e.section, e.key, e.value
        ));
        Flow::Continue
    })?;
    Ok(lines.join("\n"))
}

#[test]
fn good_fixtures() {
    let paths = fixture_paths("good");
    assert!(!paths.is_empty(), "no fixtures found under test/good/");

    for path in paths {
        let source = fs::read_to_string(&path).unwrap();
        let expected = read_sibling(&path, "entries");
        match dump_entries(&source) {
            Ok(dump) => assert_eq!(
                dump.trim(),
                expected.trim(),
                "entry dump mismatch for {}",
                path.display()
            ),
            Err(e) => panic!("{} failed to parse: {e}", path.display()),
        }
    }
}

#[test]
fn tree_from_fixture() {
    // End-to-end through the default entry point and the tree sink.
    let path = test_root().join("good").join("basic.ini");
    let mut sink = TreeSink::new('.');
    libnini::parse_file(&path, |e| sink.entry(e)).unwrap();

    let root = sink.into_table();
    let server = root["server"].as_table().unwrap();
    assert_eq!(server["host"].as_scalar(), Some("example.net"));
    let limits = server["limits"].as_table().unwrap();
    assert_eq!(limits["max-conn"].as_scalar(), Some("64"));
}

#[test]
fn bad_fixtures() {
    let paths = fixture_paths("bad");
    assert!(!paths.is_empty(), "no fixtures found under test/bad/");

    for path in paths {
        let source = fs::read_to_string(&path).unwrap();
        let expected = read_sibling(&path, "error");
        match dump_entries(&source) {
            Ok(dump) => panic!(
                "{} parsed but should have failed; entries:\n{dump}",
                path.display()
            ),
            Err(e) => assert_eq!(
                e.to_string(),
                expected.trim(),
                "error mismatch for {}",
                path.display()
            ),
        }
    }
}
