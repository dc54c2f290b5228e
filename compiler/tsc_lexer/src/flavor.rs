//! Source flavors and lexing options.

use std::path::Path;

use tsc_lexer_core::{Dialect, ScanConfig};

/// How a source file is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Code from the first byte (`*.tss`).
    Script,
    /// Literal text with `{ ... }` code blocks (`*.txt.tss` and any other
    /// `*.<ext>.tss`).
    #[default]
    Template,
    /// Host markup with embedded code regions (`*.html.tss`). Host text is
    /// passed through as foreign spans.
    Document,
}

impl Flavor {
    /// Infer the flavor from a file name.
    ///
    /// Returns `None` for files that do not end in `.tss`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let stem = name.strip_suffix(".tss")?;
        if stem.ends_with(".html") || stem.ends_with(".htm") {
            Some(Flavor::Document)
        } else if stem.contains('.') {
            Some(Flavor::Template)
        } else {
            Some(Flavor::Script)
        }
    }

    /// Parse a flavor name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "script" => Some(Flavor::Script),
            "template" => Some(Flavor::Template),
            "document" => Some(Flavor::Document),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Flavor::Script => "script",
            Flavor::Template => "template",
            Flavor::Document => "document",
        }
    }
}

/// Options for [`lex`](crate::lex).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LexOptions {
    pub dialect: Dialect,
    pub flavor: Flavor,
}

impl LexOptions {
    pub const fn new(dialect: Dialect, flavor: Flavor) -> Self {
        Self { dialect, flavor }
    }

    /// Scan config for the top-level scan. Documents scan their delegated
    /// regions as code.
    pub const fn scan_config(self) -> ScanConfig {
        match self.flavor {
            Flavor::Template => ScanConfig::template(self.dialect),
            Flavor::Script | Flavor::Document => ScanConfig::code(self.dialect),
        }
    }
}

/// Parse a dialect name as accepted on the command line.
pub fn dialect_from_name(name: &str) -> Option<Dialect> {
    match name {
        "minimal" => Some(Dialect::Minimal),
        "rich" => Some(Dialect::Rich),
        _ => None,
    }
}
