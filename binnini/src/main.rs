//! nini command-line tool for validating and dumping nini config files.
//!
//! Usage: nini [OPTIONS] [FILE]
//!
//! Options:
//!   -e, --entries          Print one line per parsed entry (default)
//!   -t, --to <FORMAT>      Dump the nested config tree (yaml, json)
//!       --check            Validate only (exit 0 if valid, 1 if invalid)
//!       --allow-globals    Accept entries before any section header
//!       --allow-empty-lists  Accept lists with zero items
//!       --delim <CHAR>     Section namespace delimiter [default: .]
//!       --brackets <PAIR>  Two characters, opening and closing list
//!                          bracket [default: []]
//!   -h, --help             Print help
//!   -V, --version          Print version
//!
//! FILE defaults to stdin ("-" also means stdin).

use libnini::{Entry, Flow, Options, Parser, Table, TreeSink, Value};
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

/// What to do with the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Entries,
    Check,
    Yaml,
    Json,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut mode = Mode::Entries;
    let mut opts = Options::default();
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("nini {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-e" | "--entries" => {
                mode = Mode::Entries;
            }
            "--check" => {
                mode = Mode::Check;
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                mode = match args[i].as_str() {
                    "yaml" | "yml" => Mode::Yaml,
                    "json" => Mode::Json,
                    other => {
                        eprintln!("Error: Unknown format: {other}");
                        process::exit(1);
                    }
                };
            }
            "--allow-globals" => {
                opts.allow_globals = true;
            }
            "--allow-empty-lists" => {
                opts.allow_empty_lists = true;
            }
            "--delim" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --delim requires an argument");
                    process::exit(1);
                }
                opts.section_delimiter = match single_char(&args[i]) {
                    Some(c) => c,
                    None => {
                        eprintln!("Error: --delim must be a single character");
                        process::exit(1);
                    }
                };
            }
            "--brackets" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --brackets requires an argument");
                    process::exit(1);
                }
                opts.brackets = match char_pair(&args[i]) {
                    Some(pair) => pair,
                    None => {
                        eprintln!("Error: --brackets must be exactly two characters");
                        process::exit(1);
                    }
                };
            }
            "-" => {
                // Explicit stdin; input_path stays None.
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {arg}");
                process::exit(1);
            }
            arg => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input files given");
                    process::exit(1);
                }
                input_path = Some(arg);
            }
        }
        i += 1;
    }

    let parser = match Parser::new(opts) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("nini: {e}");
            process::exit(1);
        }
    };

    let result = match input_path {
        Some(path) => match File::open(path) {
            Ok(file) => run(&parser, BufReader::new(file), mode),
            Err(e) => {
                eprintln!("nini: cannot open {path}: {e}");
                process::exit(1);
            }
        },
        None => {
            let stdin = io::stdin();
            run(&parser, stdin.lock(), mode)
        }
    };

    if let Err(e) = result {
        eprintln!("nini: {e}");
        process::exit(1);
    }
}

/// Parse from `reader` and produce the requested output.
fn run<R: io::BufRead>(parser: &Parser, reader: R, mode: Mode) -> libnini::Result<()> {
    match mode {
        Mode::Entries => {
            parser.parse_reader(reader, |e: &Entry<'_>| {
                match e.state {
                    libnini::ListState::NoList => {
                        println!("{}: [{}] {} = {}", e.line, e.section, e.key, e.value);
                    }
                    _ => {
                        println!("{}: [{}] {} += {}", e.line, e.section, e.key, e.value);
                    }
                }
                Flow::Continue
            })?;
        }
        Mode::Check => {
            parser.parse_reader(reader, |_: &Entry<'_>| Flow::Continue)?;
        }
        Mode::Yaml | Mode::Json => {
            let mut sink = TreeSink::new(parser.options().section_delimiter);
            parser.parse_reader(reader, |e| sink.entry(e))?;
            let table = sink.into_table();
            if mode == Mode::Yaml {
                match serde_yaml::to_string(&table_to_yaml(&table)) {
                    Ok(text) => print!("{text}"),
                    Err(e) => {
                        eprintln!("nini: YAML encode error: {e}");
                        process::exit(1);
                    }
                }
            } else {
                println!("{}", encode_json_table(&table, 0));
            }
        }
    }
    Ok(())
}

/// The argument as a char, if it is exactly one.
fn single_char(arg: &str) -> Option<char> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// The argument as an (open, close) pair, if it is exactly two chars.
fn char_pair(arg: &str) -> Option<(char, char)> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(open), Some(close), None) => Some((open, close)),
        _ => None,
    }
}

// ============================================================================
// YAML output
// ============================================================================

/// Convert a config table to a YAML mapping with sorted keys.
fn table_to_yaml(table: &Table) -> serde_yaml::Value {
    let mut keys: Vec<&String> = table.keys().collect();
    keys.sort();

    let mut map = serde_yaml::Mapping::new();
    for key in keys {
        map.insert(
            serde_yaml::Value::String(key.clone()),
            value_to_yaml(&table[key]),
        );
    }
    serde_yaml::Value::Mapping(map)
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Scalar(s) => serde_yaml::Value::String(s.clone()),
        Value::List(items) => serde_yaml::Value::Sequence(
            items
                .iter()
                .map(|item| serde_yaml::Value::String(item.clone()))
                .collect(),
        ),
        Value::Table(t) => table_to_yaml(t),
    }
}

// ============================================================================
// JSON output
// ============================================================================

fn encode_json_table(table: &Table, indent: usize) -> String {
    if table.is_empty() {
        return "{}".to_string();
    }

    let pad = "  ".repeat(indent);
    let inner_pad = "  ".repeat(indent + 1);

    let mut keys: Vec<&String> = table.keys().collect();
    keys.sort();

    let fields: Vec<String> = keys
        .iter()
        .map(|key| {
            format!(
                "{inner_pad}{}: {}",
                encode_json_string(key),
                encode_json_value(&table[*key], indent + 1)
            )
        })
        .collect();

    format!("{{\n{}\n{pad}}}", fields.join(",\n"))
}

fn encode_json_value(value: &Value, indent: usize) -> String {
    match value {
        Value::Scalar(s) => encode_json_string(s),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(|i| encode_json_string(i)).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Table(t) => encode_json_table(t, indent),
    }
}

fn encode_json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn print_help() {
    println!(
        "nini - validate and dump nini (nested INI) config files

Usage: nini [OPTIONS] [FILE]

Options:
  -e, --entries          Print one line per parsed entry (default)
  -t, --to <FORMAT>      Dump the nested config tree (yaml, json)
      --check            Validate only (exit 0 if valid, 1 if invalid)
      --allow-globals    Accept entries before any section header
      --allow-empty-lists  Accept lists with zero items
      --delim <CHAR>     Section namespace delimiter [default: .]
      --brackets <PAIR>  Opening and closing list bracket [default: []]
  -h, --help             Print help
  -V, --version          Print version

FILE defaults to stdin (\"-\" also means stdin)."
    );
}
