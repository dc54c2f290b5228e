//! Command handlers for the tscc CLI.
//!
//! `lex` and `check` share one option set, parsed by [`FileArgs::parse`].
//! Rendering returns strings; printing and exit codes stay in the handlers.

use std::path::Path;

use tsc_lexer::{dialect_from_name, Dialect, Flavor, LexOptions};

mod check;
mod lex;

pub use check::{check_file, render_errors};
pub use lex::{lex_file, render_json, render_tokens};

/// Options shared by every file command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileArgs {
    pub path: String,
    pub options: LexOptions,
    pub json: bool,
}

impl FileArgs {
    /// Parse `<file> [--dialect=..] [--flavor=..] [-t|--template] [--json]`.
    ///
    /// Without `--flavor` the flavor is inferred from the file name, falling
    /// back to template text.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut path = None;
        let mut dialect = Dialect::default();
        let mut flavor = None;
        let mut json = false;

        for arg in args {
            if let Some(name) = arg.strip_prefix("--dialect=") {
                dialect = dialect_from_name(name).ok_or_else(|| {
                    format!("unknown dialect '{name}' (expected minimal or rich)")
                })?;
            } else if let Some(name) = arg.strip_prefix("--flavor=") {
                flavor = Some(Flavor::from_name(name).ok_or_else(|| {
                    format!("unknown flavor '{name}' (expected script, template or document)")
                })?);
            } else if arg == "-t" || arg == "--template" {
                flavor = Some(Flavor::Template);
            } else if arg == "--json" {
                json = true;
            } else if arg.starts_with('-') {
                return Err(format!("unknown option '{arg}'"));
            } else if path.is_none() {
                path = Some(arg.clone());
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
        }

        let path = path.ok_or_else(|| "missing file path".to_string())?;
        let flavor = flavor
            .or_else(|| Flavor::from_path(Path::new(&path)))
            .unwrap_or_default();
        Ok(FileArgs {
            path,
            options: LexOptions::new(dialect, flavor),
            json,
        })
    }
}

/// Read a source file, exiting with a readable message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
