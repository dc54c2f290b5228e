//! The `check` command: report lexical errors in a file.

use serde::Serialize;
use tsc_lexer::{lex, validate, LexError, LineIndex};

use super::{read_file, FileArgs};

#[derive(Serialize)]
struct ErrorRecord<'a> {
    file: &'a str,
    line: u32,
    col: u32,
    start: u32,
    end: u32,
    message: String,
    help: Vec<&'a str>,
}

/// Validate a file, print every error, and exit 1 if there were any.
pub fn check_file(args: &FileArgs) {
    let source = read_file(&args.path);
    let output = lex(&source, &args.options);
    let errors = validate(&output);
    tracing::debug!(errors = errors.len(), "validated");

    if args.json {
        let index = LineIndex::build(&source);
        let records: Vec<ErrorRecord<'_>> = errors
            .iter()
            .map(|e| {
                let (line, col) = index.line_col(&source, e.span.start);
                ErrorRecord {
                    file: &args.path,
                    line,
                    col,
                    start: e.span.start,
                    end: e.span.end,
                    message: e.message(),
                    help: e.suggestions.iter().map(|s| s.message.as_str()).collect(),
                }
            })
            .collect();
        match serde_json::to_string_pretty(&records) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: cannot serialize errors: {e}");
                std::process::exit(1);
            }
        }
    } else {
        eprint!("{}", render_errors(&args.path, &source, &errors));
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }
}

/// `file:line:col: error: message`, each followed by its `help:` lines.
pub fn render_errors(path: &str, source: &str, errors: &[LexError]) -> String {
    use std::fmt::Write;

    let index = LineIndex::build(source);
    let mut out = String::new();
    for error in errors {
        let (line, col) = index.line_col(source, error.span.start);
        let _ = writeln!(out, "{path}:{line}:{col}: error: {}", error.message());
        for suggestion in &error.suggestions {
            let _ = writeln!(out, "  help: {}", suggestion.message);
        }
    }
    if !errors.is_empty() {
        let plural = if errors.len() == 1 { "" } else { "s" };
        let _ = writeln!(out, "{} error{plural} in '{path}'", errors.len());
    }
    out
}
