//! Byte cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. EOF is the
//! position reaching the source length; the sentinel (`0x00`) only exists
//! so byte loops stop there without a bounds check. A NUL at
//! `pos < source_len` is ordinary template content.
//!
//! The cursor is [`Copy`]: the scanner tries a rule on a copy and only
//! writes the copy back when the rule matched, so a failed rule leaves no
//! trace.

/// Byte cursor over a sentinel-terminated buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and every byte after it is `0x00` (padding).
/// This is guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position (`0x00` at EOF).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current (`0x00` past the end).
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf
            .get(self.pos as usize + 1)
            .copied()
            .unwrap_or_default()
    }

    /// Returns the byte two positions ahead of current (`0x00` past the end).
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf
            .get(self.pos as usize + 2)
            .copied()
            .unwrap_or_default()
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` once every source byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Source bytes from the current position to the end of the content.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        let pos = (self.pos.min(self.source_len)) as usize;
        &self.buf[pos..self.source_len as usize]
    }

    /// Returns `true` if the remaining source starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false` so the sentinel stops the loop. Interior
    /// NUL bytes stop it too, which is what every scanner predicate wants.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character, never past the end of the source.
    ///
    /// Must not be called at EOF.
    #[inline]
    pub fn advance_char(&mut self) {
        debug_assert!(!self.is_eof(), "advance_char called at EOF");
        let width = Self::utf8_char_width(self.current());
        self.pos = (self.pos + width).min(self.source_len);
    }

    /// Advance to the next `\n` byte or EOF.
    ///
    /// The newline itself is not consumed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within remaining() fit in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr(b'\n', self.remaining()) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Advance to the next occurrence of `needle` or EOF.
    ///
    /// Returns the number of bytes consumed. Used for template text, which
    /// runs until the next `{`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within remaining() fit in u32"
    )]
    pub fn eat_until_byte(&mut self, needle: u8) -> u32 {
        let start = self.pos;
        match memchr::memchr(needle, self.remaining()) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
        self.pos - start
    }

    /// Advance past quoted-string text to the next interesting byte.
    /// Returns the byte found, or 0 for EOF.
    ///
    /// Interesting bytes: `"` (closes the string), `{` (opens an
    /// interpolation) and `\` (escapes the next character).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within remaining() fit in u32"
    )]
    pub fn skip_to_quoted_delim(&mut self) -> u8 {
        match memchr::memchr3(b'"', b'{', b'\\', self.remaining()) {
            Some(offset) => {
                self.pos += offset as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Offset of the first occurrence of `needle` at or after the current
    /// position, relative to the current position.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets within remaining() fit in u32"
    )]
    pub fn find(&self, needle: &[u8]) -> Option<u32> {
        memchr::memmem::find(self.remaining(), needle).map(|offset| offset as u32)
    }
}
