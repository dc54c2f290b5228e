//! Strict well-formedness pass over a finished scan.
//!
//! The scanner accepts everything. This pass reports what a compiler would
//! reject: characters no rule accepted, constructs the input never closed,
//! and literals whose values cannot be decoded.

use tsc_lexer_core::{Dialect, Frame, Mode, Tag};

use crate::cooker::cook_token;
use crate::lex_error::{LexError, LexSuggestion};
use crate::{LexOutput, Span, Token};

/// Operators that only exist in the rich dialect.
const RICH_ONLY_OPERATORS: &[&str] = &["?", "%", "!"];

/// Collect every error in `output`, ordered by position.
pub fn validate(output: &LexOutput<'_>) -> Vec<LexError> {
    let mut errors = Vec::new();

    for token in &output.tokens {
        if token.kind == Tag::Unclassified {
            errors.push(unexpected(token.text, token.span, token.mode, output.options.dialect));
        } else {
            cook_token(token, &mut errors);
        }
    }

    for frame in &output.unclosed {
        let opener = opener_mode(output.tokens.as_slice(), frame.opened_at);
        if let Some(error) = unclosed(*frame, opener) {
            errors.push(error);
        }
    }

    errors.sort_by_key(|e| e.span);
    errors
}

fn unexpected(text: &str, span: Span, mode: Mode, dialect: Dialect) -> LexError {
    let found = text.chars().next().unwrap_or('\u{FFFD}');
    let mut error = LexError::unexpected_character(span, found, mode);
    if dialect == Dialect::Minimal && RICH_ONLY_OPERATORS.contains(&text) {
        error.suggestions.push(LexSuggestion::text(format!(
            "`{text}` is an operator in the rich dialect only"
        )));
    }
    error
}

/// Mode the token at `offset` was scanned in.
///
/// A frame's opener token carries the mode that pushed it. This stays
/// correct for documents, whose unclosed frames come from several
/// independent region scans.
fn opener_mode(tokens: &[Token<'_>], offset: u32) -> Option<Mode> {
    let idx = tokens.partition_point(|t| t.span.end <= offset);
    tokens
        .get(idx)
        .filter(|t| t.span.contains(offset))
        .map(|t| t.mode)
}

/// Error for one frame left open, given the mode its opener was scanned in.
fn unclosed(frame: Frame, opener: Option<Mode>) -> Option<LexError> {
    let at = frame.opened_at;
    let error = match frame.mode {
        Mode::Template => return None,
        Mode::Code => LexError::unterminated_code_block(Span::at(at, 1)),
        Mode::QuotedString => LexError::unterminated_string(Span::at(at, 1)),
        Mode::Verbatim => LexError::unterminated_verbatim(Span::at(at, 3)),
        Mode::Statements if opener == Some(Mode::QuotedString) => {
            LexError::unterminated_interpolation(Span::at(at, 1))
        }
        Mode::Statements | Mode::Object => {
            LexError::unclosed_delimiter(Span::at(at, 1), '{', '}', frame.mode)
        }
        Mode::Array => LexError::unclosed_delimiter(Span::at(at, 1), '[', ']', frame.mode),
        Mode::Expression => LexError::unclosed_delimiter(Span::at(at, 1), '(', ')', frame.mode),
    };
    Some(error)
}
