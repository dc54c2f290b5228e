//! Escape processing for string literal values.
//!
//! Both quoted forms share one escape set:
//! `\"` `\'` `\\` `\/` `\b` `\f` `\n` `\r` `\t` `\xHH` `\uHHHH` `\UHHHHHHHH`.
//! Text inside double quotes also accepts `\{` and `\}`, which is how a
//! literal brace is written where `{` would open an interpolation.
//! Verbatim strings are never unescaped.
//!
//! Invalid escapes push errors into the accumulator and decode to U+FFFD, so
//! a caller always gets a value.

use std::borrow::Cow;

use crate::lex_error::LexError;
use crate::Span;

/// Decode a `'...'` token, quotes included.
pub fn cook_single_quoted(text: &str, base_offset: u32, errors: &mut Vec<LexError>) -> String {
    let content = text
        .strip_prefix('\'')
        .map_or(text, |t| t.strip_suffix('\'').unwrap_or(t));
    match unescape(content, base_offset + 1, false, errors) {
        Some(cooked) => cooked,
        None => content.to_owned(),
    }
}

/// Decode one text piece of a double-quoted string.
///
/// Fast path: text without backslashes is borrowed unchanged.
pub fn cook_string_text<'a>(
    text: &'a str,
    base_offset: u32,
    errors: &mut Vec<LexError>,
) -> Cow<'a, str> {
    match unescape(text, base_offset, true, errors) {
        Some(cooked) => Cow::Owned(cooked),
        None => Cow::Borrowed(text),
    }
}

/// Resolve a single-character escape shared by every quoted form.
#[inline]
fn resolve_simple_escape(c: char) -> Option<char> {
    match c {
        '"' | '\'' | '\\' | '/' => Some(c),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        _ => None,
    }
}

/// Hex digit count of `\x`, `\u` and `\U`.
#[inline]
fn hex_width(c: char) -> Option<usize> {
    match c {
        'x' => Some(2),
        'u' => Some(4),
        'U' => Some(8),
        _ => None,
    }
}

/// Unescape `content`, which starts at `base_offset` in the source.
///
/// Returns `None` when there is nothing to unescape.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets bounded by u32, the scanner's size limit"
)]
fn unescape(
    content: &str,
    base_offset: u32,
    braces: bool,
    errors: &mut Vec<LexError>,
) -> Option<String> {
    if !content.contains('\\') {
        return None;
    }

    let span_at = |at: usize, len: usize| Span::at(base_offset + at as u32, len as u32);
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find('\\') {
        result.push_str(&rest[..pos]);
        let at = content.len() - rest.len() + pos;
        let after = &rest[pos + 1..];

        let Some(esc) = after.chars().next() else {
            errors.push(LexError::trailing_backslash(span_at(at, 1)));
            result.push('\\');
            return Some(result);
        };
        let mut len = esc.len_utf8();

        if braces && matches!(esc, '{' | '}') {
            result.push(esc);
        } else if let Some(resolved) = resolve_simple_escape(esc) {
            result.push(resolved);
        } else if let Some(width) = hex_width(esc) {
            let digits = after[1..]
                .bytes()
                .take(width)
                .take_while(u8::is_ascii_hexdigit)
                .count();
            len += digits;
            let span = span_at(at, 1 + len);
            if digits < width {
                errors.push(LexError::invalid_hex_escape(span, width as u8));
                result.push('\u{FFFD}');
            } else {
                let value = u32::from_str_radix(&after[1..len], 16).unwrap_or(u32::MAX);
                match char::from_u32(value) {
                    Some(c) => result.push(c),
                    None => {
                        errors.push(LexError::invalid_code_point(span, value));
                        result.push('\u{FFFD}');
                    }
                }
            }
        } else {
            errors.push(LexError::invalid_escape(span_at(at, 1 + len), esc));
            result.push('\u{FFFD}');
        }

        rest = &after[len..];
    }

    result.push_str(rest);
    Some(result)
}
