//! Token classification vocabulary.
//!
//! [`Tag`] is the closed set of categories a consumer can switch on. The
//! discriminants are grouped in semantic ranges so related tags stay
//! adjacent:
//!
//! | Range   | Group                 |
//! |---------|-----------------------|
//! | 0-15    | Trivia and comments   |
//! | 16-31   | Words                 |
//! | 32-47   | Literals and text     |
//! | 48-63   | Symbols               |
//! | 64-79   | Host document content |
//! | 240-254 | Errors                |
//! | 255     | Control               |

/// Category of a scanned span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Tag {
    // === Trivia ===
    /// Run of whitespace (spaces, tabs, newlines), one token per run.
    Whitespace = 0,
    /// `{# ... #}` comment, in code, template text, or string text.
    BlockComment = 1,
    /// `# ...` comment up to and including the end of the line.
    LineComment = 2,

    // === Words ===
    /// Reserved word such as `if`, `for`, or `end`.
    Keyword = 16,
    /// `true`, `false` or `nil`.
    Constant = 17,
    /// Name that is not a keyword or constant.
    Identifier = 18,

    // === Literals ===
    /// Integer, or decimal with optional exponent in the rich dialect.
    Number = 32,
    /// Single-quoted string, or a piece of a double-quoted string: the
    /// opening quote, a run of text, or the closing quote.
    StringLiteral = 33,
    /// `"""` delimiter or the uninterpreted body of a verbatim string.
    VerbatimString = 34,
    /// Literal template output between code blocks.
    LiteralText = 35,

    // === Symbols ===
    /// Arithmetic, comparison, equality, assignment, or conditional operator.
    Operator = 48,
    /// Structural punctuation and brackets: `. , : | [ ] ( ) { }`.
    Punctuation = 49,

    // === Host document ===
    /// Span owned by the host markup format of a composite document.
    Foreign = 64,

    // === Errors ===
    /// One UTF-8 scalar that no rule of the active mode accepted.
    Unclassified = 240,

    // === Control ===
    /// End of input. Zero length, never yielded by iterators.
    Eof = 255,
}

/// One byte: tags are stored per token and should stay compact.
const _: () = assert!(std::mem::size_of::<Tag>() == 1);

impl Tag {
    /// Stable lowercase name, used in CLI listings and JSON dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Whitespace => "whitespace",
            Tag::BlockComment => "comment.block",
            Tag::LineComment => "comment.line",
            Tag::Keyword => "keyword",
            Tag::Constant => "constant",
            Tag::Identifier => "identifier",
            Tag::Number => "number",
            Tag::StringLiteral => "string",
            Tag::VerbatimString => "string.verbatim",
            Tag::LiteralText => "text",
            Tag::Operator => "operator",
            Tag::Punctuation => "punctuation",
            Tag::Foreign => "foreign",
            Tag::Unclassified => "error",
            Tag::Eof => "eof",
        }
    }

    /// Whitespace and comments: spans a parser would skip.
    pub const fn is_trivia(self) -> bool {
        matches!(self, Tag::Whitespace | Tag::BlockComment | Tag::LineComment)
    }

    /// Either comment form.
    pub const fn is_comment(self) -> bool {
        matches!(self, Tag::BlockComment | Tag::LineComment)
    }

    /// Tags in the error range.
    pub const fn is_error(self) -> bool {
        (self as u8) >= 240 && (self as u8) < 255
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output unit of the scanner: a tag and a byte length.
///
/// Positions are implicit: the lengths of consecutive tokens sum to the
/// offset of the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawToken {
    /// Category of the span.
    pub tag: Tag,
    /// Span length in bytes. Zero only for [`Tag::Eof`].
    pub len: u32,
}
