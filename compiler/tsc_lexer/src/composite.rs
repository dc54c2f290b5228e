//! Delegating scan for host documents (`*.html.tss`).
//!
//! A document is host markup with embedded code regions. The host pass here
//! only finds region boundaries; the markup between regions is kept as
//! opaque [`Tag::Foreign`] spans for an outer highlighter to handle.
//!
//! ```text
//! <p>{ name }</p>{# note #}
//! ```
//!
//! scans as `Foreign("<p>")`, `Punctuation("{")`, the delegated tokens of
//! ` name `, `Punctuation("}")`, `Foreign("</p>")`, `BlockComment("{# note #}")`.
//!
//! Each delegated region is scanned independently in `Code` mode and its
//! tokens are shifted into document offsets. The two streams are then merged
//! by start offset.
//!
//! A region ends at the first `}` byte after its `{`, even one inside a
//! string or object literal: in `{"{x}"}` the region is `"{x` and the
//! string is left unterminated.

use tracing::trace;
use tsc_lexer_core::{Dialect, Frame, Mode, ScanConfig, SourceBuffer, Tag};

use crate::{lex_region, Span, Token, TokenList};

/// Tokenize a host document.
///
/// Returns the merged tokens and the frames left open. A region with no
/// closing `}` runs to the end of the document and reports a `Code` frame at
/// its `{`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex_document(source: &str, dialect: Dialect) -> (TokenList<'_>, Vec<Frame>) {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    let mut host: Vec<Token<'_>> = Vec::new();
    let mut embedded: Vec<Token<'_>> = Vec::new();
    let mut unclosed = Vec::new();

    while !cursor.is_eof() {
        let start = cursor.pos();
        let foreign = cursor.eat_until_byte(b'{');
        push_host(&mut host, source, Tag::Foreign, Span::at(start, foreign));
        if cursor.is_eof() {
            break;
        }

        let open = cursor.pos();
        if cursor.starts_with(b"{#") {
            // `#}` must follow the opener, so `{#}` is not a comment.
            let mut body = cursor;
            body.advance_n(2);
            if let Some(end) = body.find(b"#}") {
                body.advance_n(end + 2);
                cursor = body;
                push_host(&mut host, source, Tag::BlockComment, Span::new(open, cursor.pos()));
                continue;
            }
        }

        push_host(&mut host, source, Tag::Punctuation, Span::at(open, 1));
        cursor.advance();
        let region_start = cursor.pos();
        let region_end = match cursor.find(b"}") {
            Some(len) => region_start + len,
            None => cursor.source_len(),
        };

        let region = Span::new(region_start, region_end);
        let (tokens, frames) = lex_region(
            source.get(region.to_range()).unwrap_or_default(),
            ScanConfig::code(dialect),
        );
        trace!(
            start = region_start,
            end = region_end,
            tokens = tokens.len(),
            "delegated region"
        );
        embedded.extend(tokens.into_iter().map(|t| Token {
            span: t.span.shift(region_start),
            ..t
        }));
        unclosed.extend(frames.into_iter().map(|f| Frame {
            opened_at: f.opened_at + region_start,
            ..f
        }));

        cursor.advance_n(region_end - region_start);
        if cursor.is_eof() {
            unclosed.push(Frame {
                mode: Mode::Code,
                opened_at: open,
            });
            break;
        }
        push_host(&mut host, source, Tag::Punctuation, Span::at(region_end, 1));
        cursor.advance();
    }

    unclosed.sort_by_key(|f| f.opened_at);
    (merge_by_start(host, embedded), unclosed)
}

fn push_host<'src>(host: &mut Vec<Token<'src>>, source: &'src str, kind: Tag, span: Span) {
    if !span.is_empty() {
        host.push(Token {
            kind,
            span,
            text: source.get(span.to_range()).unwrap_or_default(),
            mode: Mode::Template,
        });
    }
}

/// Merge two streams that are each sorted by start offset and cover
/// disjoint byte ranges.
fn merge_by_start<'src>(a: Vec<Token<'src>>, b: Vec<Token<'src>>) -> TokenList<'src> {
    let mut merged = TokenList::with_capacity(a.len() + b.len());
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();
    loop {
        let take_a = match (a.peek(), b.peek()) {
            (Some(x), Some(y)) => x.span.start <= y.span.start,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_a { a.next() } else { b.next() };
        if let Some(token) = next {
            merged.push(token);
        }
    }
    merged
}
