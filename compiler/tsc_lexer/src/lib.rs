//! Lexer for the tsc template language.
//!
//! Wraps the mode-stack scanner from `tsc_lexer_core` into borrowed
//! [`Token`]s with spans and text, and adds what a tool needs on top:
//!
//! - [`lex`]: one call from source text to a [`LexOutput`], for scripts,
//!   templates, and composite documents (see [`Flavor`]).
//! - [`validate`]: the strict pass that turns unclassified input, frames
//!   left open, and bad literals into [`LexError`]s.
//! - [`cook_token`]: string and number values on demand.
//! - [`LineIndex`]: line/column lookup for diagnostics.
//!
//! The lexer itself is total: any input produces a token list whose texts
//! concatenate to the source. Errors only exist if a caller asks for them.

use tracing::debug;
use tsc_lexer_core::{ModalScanner, ScanConfig, SourceBuffer};

mod composite;
mod cook_escape;
mod cook_number;
mod cooker;
mod flavor;
mod lex_error;
mod line_index;
mod span;
mod token;
mod validate;

pub use composite::lex_document;
pub use cook_escape::{cook_single_quoted, cook_string_text};
pub use cook_number::{cook_number, NumberValue};
pub use cooker::{cook_token, LiteralValue};
pub use flavor::{dialect_from_name, Flavor, LexOptions};
pub use lex_error::{LexError, LexErrorContext, LexErrorKind, LexReplacement, LexSuggestion};
pub use line_index::LineIndex;
pub use span::Span;
pub use token::{Token, TokenList};
pub use tsc_lexer_core::{Dialect, Frame, Mode, Tag};
pub use validate::validate;

/// Lazy token iterator over a caller-owned [`SourceBuffer`].
///
/// `buf` and `source` must hold the same text; the buffer drives the scan
/// and `source` supplies the token slices.
pub struct Lexer<'buf, 'src> {
    scanner: ModalScanner<'buf>,
    source: &'src str,
}

impl<'buf, 'src> Lexer<'buf, 'src> {
    pub fn new(buf: &'buf SourceBuffer, source: &'src str, config: ScanConfig) -> Self {
        debug_assert_eq!(buf.as_bytes(), source.as_bytes());
        Lexer {
            scanner: ModalScanner::new(buf.cursor(), config),
            source,
        }
    }

    /// Mode the next token will be scanned in.
    pub fn mode(&self) -> Mode {
        self.scanner.mode()
    }

    /// Constructs still open at this point, bottom first.
    ///
    /// Call after the iterator is exhausted to get what the input never
    /// closed.
    pub fn into_frames(self) -> Vec<Frame> {
        self.scanner.unclosed().to_vec()
    }
}

impl<'src> Iterator for Lexer<'_, 'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        let mode = self.scanner.mode();
        let start = self.scanner.pos();
        let raw = self.scanner.next_token();
        if raw.tag == Tag::Eof {
            return None;
        }
        let span = Span::at(start, raw.len);
        Some(Token {
            kind: raw.tag,
            span,
            text: self.source.get(span.to_range()).unwrap_or_default(),
            mode,
        })
    }
}

impl std::iter::FusedIterator for Lexer<'_, '_> {}

/// Result of lexing one source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexOutput<'src> {
    pub tokens: TokenList<'src>,
    /// Constructs the input opened and never closed, ordered by opener.
    pub unclosed: Vec<Frame>,
    pub options: LexOptions,
}

impl LexOutput<'_> {
    /// Whether every construct the input opened was closed.
    pub fn is_balanced(&self) -> bool {
        self.unclosed.is_empty()
    }

    /// Whether the scanner hit input no rule accepted.
    pub fn has_unclassified(&self) -> bool {
        self.tokens.kinds().any(|k| k == Tag::Unclassified)
    }
}

/// Lex `source` according to `options`.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(len = source.len(), dialect = ?options.dialect, flavor = options.flavor.name())
)]
pub fn lex<'src>(source: &'src str, options: &LexOptions) -> LexOutput<'src> {
    let (tokens, unclosed) = match options.flavor {
        Flavor::Document => lex_document(source, options.dialect),
        Flavor::Script | Flavor::Template => lex_region(source, options.scan_config()),
    };
    debug!(
        tokens = tokens.len(),
        unclosed = unclosed.len(),
        "lexed source"
    );
    LexOutput {
        tokens,
        unclosed,
        options: *options,
    }
}

/// Scan all of `source` with one scanner.
pub(crate) fn lex_region(source: &str, config: ScanConfig) -> (TokenList<'_>, Vec<Frame>) {
    let buf = SourceBuffer::new(source);
    let mut lexer = Lexer::new(&buf, source, config);
    let tokens = lexer.by_ref().collect();
    (tokens, lexer.into_frames())
}
