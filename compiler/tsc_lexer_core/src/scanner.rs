//! Mode-stack scanner producing `(Tag, len)` pairs.
//!
//! The scanner keeps a stack of [`Frame`]s. At each position it tries the
//! rules of the top frame's mode in order, anchored at the cursor, and the
//! first rule that consumes at least one byte wins. The winning rule's tag is
//! emitted and its [`Action`] applied to the stack.
//!
//! When no rule matches, exactly one UTF-8 scalar is emitted as
//! [`Tag::Unclassified`] and scanning continues. Every call therefore either
//! consumes input or returns [`Tag::Eof`], and the lengths of all emitted
//! tokens sum to the source length.
//!
//! Frames still open at end of input are not an error. They are exposed
//! through [`ModalScanner::unclosed`] for callers that want strict checking.

use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::mode::{Action, Mode, ModeTable, Pattern, ScanConfig};
use crate::tag::{RawToken, Tag};

/// One level of the mode stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Active mode of this level.
    pub mode: Mode,
    /// Byte offset of the token that opened this level.
    pub opened_at: u32,
}

/// Frames stored inline before spilling to the heap. Real templates rarely
/// nest deeper than this.
const INLINE_FRAMES: usize = 8;

/// Scanner over one input with one [`ScanConfig`].
///
/// Owns its mode stack; the rule table is shared and read-only.
pub struct ModalScanner<'a> {
    cursor: Cursor<'a>,
    table: &'static ModeTable,
    entry: Mode,
    /// Never empty. The bottom frame is never popped.
    frames: SmallVec<[Frame; INLINE_FRAMES]>,
    seeded: usize,
}

impl<'a> ModalScanner<'a> {
    /// Create a scanner at the cursor's position.
    ///
    /// A `Template` entry seeds `[Code, Template]`: template text's `{` pops
    /// into the code frame below it and the code's `}` pushes template text
    /// again. Every other entry seeds the single entry mode.
    pub fn new(cursor: Cursor<'a>, config: ScanConfig) -> Self {
        let start = cursor.pos();
        let mut frames = SmallVec::new();
        if config.entry == Mode::Template {
            frames.push(Frame {
                mode: Mode::Code,
                opened_at: start,
            });
        }
        frames.push(Frame {
            mode: config.entry,
            opened_at: start,
        });
        let seeded = frames.len();
        Self {
            cursor,
            table: ModeTable::for_dialect(config.dialect),
            entry: config.entry,
            frames,
            seeded,
        }
    }

    /// Produce the next token.
    ///
    /// Returns [`Tag::Eof`] with `len == 0` once the source is exhausted, and
    /// keeps returning it on later calls.
    pub fn next_token(&mut self) -> RawToken {
        if self.cursor.is_eof() {
            return RawToken {
                tag: Tag::Eof,
                len: 0,
            };
        }

        let start = self.cursor.pos();
        let table = self.table;
        for rule in table.rules(self.mode()) {
            let mut probe = self.cursor;
            if try_match(rule.pattern, &mut probe) && probe.pos() > start {
                self.cursor = probe;
                self.apply(rule.action, start);
                return RawToken {
                    tag: rule.tag,
                    len: probe.pos() - start,
                };
            }
        }

        self.cursor.advance_char();
        RawToken {
            tag: Tag::Unclassified,
            len: self.cursor.pos() - start,
        }
    }

    fn apply(&mut self, action: Action, start: u32) {
        match action {
            Action::Stay => {}
            Action::Push(mode) => self.frames.push(Frame {
                mode,
                opened_at: start,
            }),
            Action::Pop => {
                if self.frames.len() == 1 {
                    return;
                }
                let popped = self.frames.pop();
                // Leaving template text for the base frame starts a new code
                // block at this `{`.
                if popped.is_some_and(|f| f.mode == Mode::Template) && self.frames.len() == 1 {
                    if let Some(base) = self.frames.first_mut() {
                        base.opened_at = start;
                    }
                }
            }
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Mode on top of the stack.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.frames.last().map_or(self.entry, |f| f.mode)
    }

    /// Stack depth, at least 1.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Stack frames, bottom first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Stack modes, bottom first.
    pub fn modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.frames.iter().map(|f| f.mode)
    }

    /// Whether the stack is back at its seeded state.
    pub fn is_balanced(&self) -> bool {
        self.frames.len() == self.seeded && self.mode() == self.entry
    }

    /// Frames opened by the input and not closed by it, bottom first.
    ///
    /// For a `Template` entry, a base code frame that is not covered by a
    /// template frame means a `{` whose `}` never came; its `opened_at` is
    /// that `{`.
    pub fn unclosed(&self) -> &[Frame] {
        let frames = self.frames.as_slice();
        match self.entry {
            Mode::Template if frames.get(1).is_some_and(|f| f.mode == Mode::Template) => {
                &frames[2..]
            }
            Mode::Template => frames,
            _ => &frames[1..],
        }
    }
}

impl Iterator for ModalScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let token = self.next_token();
        (token.tag != Tag::Eof).then_some(token)
    }
}

impl std::iter::FusedIterator for ModalScanner<'_> {}

impl std::fmt::Debug for ModalScanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalScanner")
            .field("pos", &self.cursor.pos())
            .field("dialect", &self.table.dialect())
            .field("frames", &self.frames)
            .finish()
    }
}

// ─── Pattern matching ───────────────────────────────────────────────

/// Try `pattern` at the cursor. On success the cursor is past the match;
/// on failure its position is unspecified and the caller discards it.
fn try_match(pattern: Pattern, cursor: &mut Cursor<'_>) -> bool {
    match pattern {
        Pattern::BlockComment => block_comment(cursor),
        Pattern::LineComment => line_comment(cursor),
        Pattern::Word(words) => word(cursor, words),
        Pattern::SingleQuoted => single_quoted(cursor),
        Pattern::Integer => integer(cursor),
        Pattern::Decimal => decimal(cursor),
        Pattern::Identifier => identifier(cursor),
        Pattern::OneOf(options) => one_of(cursor, options),
        Pattern::Whitespace => {
            cursor.eat_while(is_whitespace);
            true
        }
        Pattern::Byte(b) => {
            if cursor.is_eof() || cursor.current() != b {
                return false;
            }
            cursor.advance();
            true
        }
        Pattern::TemplateText => {
            cursor.eat_until_byte(b'{');
            true
        }
        Pattern::QuotedText => quoted_text(cursor),
        Pattern::VerbatimDelimiter => {
            if !cursor.starts_with(b"\"\"\"") {
                return false;
            }
            cursor.advance_n(3);
            true
        }
        Pattern::VerbatimBody => {
            match cursor.find(b"\"\"\"") {
                Some(offset) => cursor.advance_n(offset),
                None => cursor.advance_n(remaining_len(cursor)),
            }
            true
        }
    }
}

fn block_comment(cursor: &mut Cursor<'_>) -> bool {
    if !cursor.starts_with(b"{#") {
        return false;
    }
    cursor.advance_n(2);
    match cursor.find(b"#}") {
        Some(offset) => {
            cursor.advance_n(offset + 2);
            true
        }
        None => false,
    }
}

fn line_comment(cursor: &mut Cursor<'_>) -> bool {
    if cursor.is_eof() || cursor.current() != b'#' {
        return false;
    }
    cursor.eat_until_newline_or_eof();
    if !cursor.is_eof() {
        cursor.advance(); // the newline
    }
    true
}

/// A whole identifier-shaped word that appears in `words`.
fn word(cursor: &mut Cursor<'_>, words: &[&str]) -> bool {
    let rest = cursor.remaining();
    let len = ident_len(rest);
    if len == 0 {
        return false;
    }
    let candidate = &rest[..len];
    if words.iter().any(|w| w.as_bytes() == candidate) {
        cursor.advance_n(len_u32(len));
        true
    } else {
        false
    }
}

fn single_quoted(cursor: &mut Cursor<'_>) -> bool {
    if cursor.is_eof() || cursor.current() != b'\'' {
        return false;
    }
    cursor.advance();
    while !cursor.is_eof() {
        match cursor.current() {
            b'\'' => {
                cursor.advance();
                return true;
            }
            b'\\' => {
                cursor.advance();
                if !cursor.is_eof() {
                    cursor.advance_char();
                }
            }
            _ => cursor.advance_char(),
        }
    }
    false
}

fn eat_digits(cursor: &mut Cursor<'_>) -> bool {
    let start = cursor.pos();
    cursor.eat_while(|b| b.is_ascii_digit());
    cursor.pos() > start
}

/// Numbers end on a word boundary: `12ab` is not a number.
fn at_word_boundary(cursor: &Cursor<'_>) -> bool {
    cursor.is_eof() || !is_ident_continue(cursor.current())
}

fn integer(cursor: &mut Cursor<'_>) -> bool {
    eat_digits(cursor) && at_word_boundary(cursor)
}

fn decimal(cursor: &mut Cursor<'_>) -> bool {
    if !eat_digits(cursor) {
        return false;
    }
    if cursor.current() == b'.' && cursor.peek().is_ascii_digit() {
        cursor.advance();
        eat_digits(cursor);
    }
    if matches!(cursor.current(), b'e' | b'E') {
        let signed = matches!(cursor.peek(), b'+' | b'-');
        let digit = if signed { cursor.peek2() } else { cursor.peek() };
        if digit.is_ascii_digit() {
            cursor.advance_n(if signed { 2 } else { 1 });
            eat_digits(cursor);
        }
    }
    at_word_boundary(cursor)
}

fn identifier(cursor: &mut Cursor<'_>) -> bool {
    let len = ident_len(cursor.remaining());
    cursor.advance_n(len_u32(len));
    len > 0
}

fn one_of(cursor: &mut Cursor<'_>, options: &[&str]) -> bool {
    match options.iter().find(|o| cursor.starts_with(o.as_bytes())) {
        Some(option) => {
            cursor.advance_n(len_u32(option.len()));
            true
        }
        None => false,
    }
}

/// Text up to an unescaped `"` or a `{`. A backslash always takes the
/// character after it along.
fn quoted_text(cursor: &mut Cursor<'_>) -> bool {
    loop {
        if cursor.skip_to_quoted_delim() != b'\\' {
            return true;
        }
        cursor.advance();
        if !cursor.is_eof() {
            cursor.advance_char();
        }
    }
}

// ─── Byte classes ───────────────────────────────────────────────────

/// Lookup table for identifier continuation bytes: `[a-zA-Z0-9_]`.
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'
        );
        i += 1;
    }
    table
};

#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Length of the identifier at the start of `bytes`, 0 if there is none.
fn ident_len(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(&b) if is_ident_start(b) => {
            1 + bytes[1..]
                .iter()
                .take_while(|&&b| is_ident_continue(b))
                .count()
        }
        _ => 0,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "lengths are bounded by the u32 source length"
)]
#[inline]
fn len_u32(len: usize) -> u32 {
    len as u32
}

fn remaining_len(cursor: &Cursor<'_>) -> u32 {
    cursor.source_len() - cursor.pos()
}

/// Convenience function: scan a source string and collect all raw tokens.
///
/// Returns every token except the final `Eof`. For streaming access or to
/// inspect the stack afterwards, build a [`SourceBuffer`](crate::SourceBuffer)
/// and a [`ModalScanner`] directly.
pub fn tokenize(source: &str, config: ScanConfig) -> Vec<RawToken> {
    let buf = crate::SourceBuffer::new(source);
    ModalScanner::new(buf.cursor(), config).collect()
}

#[cfg(test)]
mod tests;
