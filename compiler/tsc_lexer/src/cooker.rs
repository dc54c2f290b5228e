//! On-demand literal values for tokens.
//!
//! The lexer keeps every token as a borrowed slice. A consumer that needs a
//! string's or number's value asks for it here; escape and range errors go
//! into the caller's accumulator.

use std::borrow::Cow;

use tsc_lexer_core::{Mode, Tag};

use crate::cook_escape::{cook_single_quoted, cook_string_text};
use crate::cook_number::{cook_number, NumberValue};
use crate::lex_error::LexError;
use crate::Token;

/// Value carried by a literal token.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue<'src> {
    /// A `'...'` literal, a piece of `"..."` text, or a verbatim body.
    Str(Cow<'src, str>),
    Number(NumberValue),
}

/// Value of `token`, or `None` for tokens without one (including string
/// delimiters).
pub fn cook_token<'src>(
    token: &Token<'src>,
    errors: &mut Vec<LexError>,
) -> Option<LiteralValue<'src>> {
    let text = token.text;
    let start = token.span.start;
    match token.kind {
        Tag::Number => Some(LiteralValue::Number(cook_number(text, token.span, errors))),
        Tag::StringLiteral => match token.mode {
            Mode::QuotedString if text != "\"" => Some(LiteralValue::Str(cook_string_text(
                text, start, errors,
            ))),
            mode if mode.is_code_family() && text.starts_with('\'') => Some(LiteralValue::Str(
                Cow::Owned(cook_single_quoted(text, start, errors)),
            )),
            _ => None,
        },
        Tag::VerbatimString if token.mode == Mode::Verbatim && text != "\"\"\"" => {
            Some(LiteralValue::Str(Cow::Borrowed(text)))
        }
        _ => None,
    }
}
