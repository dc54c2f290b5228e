//! Borrowed tokens and the token list.

use tsc_lexer_core::{Mode, Tag};

use crate::Span;

/// A classified span of the source.
///
/// `text` borrows the source, so a token list never copies input text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token<'src> {
    pub kind: Tag,
    pub span: Span,
    /// Exactly `&source[span]`.
    pub text: &'src str,
    /// Mode the token was scanned in. Tells a string delimiter `"` from a
    /// `'...'` literal or a piece of string text.
    pub mode: Mode,
}

impl Token<'_> {
    /// Whitespace or comment.
    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

/// Ordered, lossless sequence of tokens.
///
/// Concatenating the `text` of every token reproduces the source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList<'src> {
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenList<'src> {
    /// Create a new empty token list.
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Create a new token list with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token<'src>) {
        self.tokens.push(token);
    }

    /// Get the number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get token at index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<'src>> {
        self.tokens.get(index)
    }

    /// Get a slice of all tokens.
    #[inline]
    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    /// Iterate over tokens.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.tokens.iter()
    }

    /// Tags in order.
    pub fn kinds(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tokens.iter().map(|t| t.kind)
    }

    /// Tokens a parser would look at: everything except whitespace and
    /// comments.
    pub fn significant(&self) -> impl Iterator<Item = &Token<'src>> + '_ {
        self.tokens.iter().filter(|t| !t.is_trivia())
    }

    /// Concatenated token text. Equal to the source for any list produced
    /// by [`lex`](crate::lex).
    pub fn source_text(&self) -> String {
        self.tokens.iter().map(|t| t.text).collect()
    }
}

impl<'a, 'src> IntoIterator for &'a TokenList<'src> {
    type Item = &'a Token<'src>;
    type IntoIter = std::slice::Iter<'a, Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl<'src> IntoIterator for TokenList<'src> {
    type Item = Token<'src>;
    type IntoIter = std::vec::IntoIter<Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'src> FromIterator<Token<'src>> for TokenList<'src> {
    fn from_iter<I: IntoIterator<Item = Token<'src>>>(iter: I) -> Self {
        TokenList {
            tokens: iter.into_iter().collect(),
        }
    }
}
