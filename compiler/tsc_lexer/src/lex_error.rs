//! Lexer error types.
//!
//! The scanner itself never fails. These errors come from the strict
//! passes layered on top of it: validation and literal cooking.
//!
//! Errors follow the WHERE+WHAT+WHY+HOW shape:
//! - WHERE: `span` locating the error in source
//! - WHAT: `kind` describing what went wrong
//! - WHY: `context` naming the construct the error is inside
//! - HOW: `suggestions` providing actionable fixes

use tsc_lexer_core::Mode;

use crate::Span;

/// A lexer error with full context for diagnostic rendering.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// WHERE the error occurred.
    pub span: Span,
    /// WHAT went wrong.
    pub kind: LexErrorKind,
    /// WHY: the construct being scanned.
    pub context: LexErrorContext,
    /// HOW to fix.
    pub suggestions: Vec<LexSuggestion>,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    // === Unmatched input ===
    /// No rule of the active mode accepted this character.
    #[error("unexpected character {found:?}")]
    UnexpectedCharacter { found: char },

    // === Unterminated constructs ===
    /// `"` string without its closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// `"""` string without its closing `"""`.
    #[error("unterminated verbatim string")]
    UnterminatedVerbatim,
    /// `{` inside a string without its closing `}`.
    #[error("unterminated string interpolation")]
    UnterminatedInterpolation,
    /// Template `{` without the `}` that returns to text.
    #[error("unterminated code block")]
    UnterminatedCodeBlock,
    /// `[`, `(` or `{` without its closer.
    #[error("unclosed `{open}`")]
    UnclosedDelimiter { open: char, close: char },

    // === Escapes ===
    /// Backslash followed by a character with no meaning.
    #[error("undefined escape sequence `\\{escape}`")]
    InvalidEscape { escape: char },
    /// `\x`, `\u` or `\U` without enough hex digits.
    #[error("invalid hexadecimal escape sequence: expected {expected} hex digits")]
    InvalidHexEscape { expected: u8 },
    /// Hex escape naming a surrogate or a value above U+10FFFF.
    #[error("{value:#X} is not a valid unicode scalar value")]
    InvalidCodePoint { value: u32 },
    /// Backslash at the very end of a literal.
    #[error("unexpected end of input in escape sequence")]
    TrailingBackslash,

    // === Numbers ===
    /// Integer literal does not fit in `i64`.
    #[error("integer literal is too large")]
    IntOverflow,
    /// Decimal literal is out of `f64` range.
    #[error("number literal is out of range")]
    FloatOverflow,
}

/// The construct the lexer was inside when the error occurred.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexErrorContext {
    /// Top-level code or template text.
    #[default]
    TopLevel,
    /// Inside a nested mode.
    Inside(Mode),
    /// Cooking a string literal's value.
    StringLiteral,
    /// Cooking a numeric literal's value.
    NumberLiteral,
}

/// Suggestion for fixing a lexical error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexSuggestion {
    /// Human-readable message describing the fix.
    pub message: String,
    /// Concrete text replacement for auto-fix, if applicable.
    pub replacement: Option<LexReplacement>,
}

/// A concrete text replacement for an auto-fix.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexReplacement {
    /// The span to replace.
    pub span: Span,
    /// The replacement text.
    pub text: String,
}

impl LexSuggestion {
    /// Create a text-only suggestion (no code replacement).
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    /// Create a suggestion with a replacement.
    pub fn replace(message: impl Into<String>, span: Span, text: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: Some(LexReplacement {
                span,
                text: text.into(),
            }),
        }
    }
}

impl LexError {
    /// Rendered message: the kind's text.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Create an unexpected character error.
    #[cold]
    pub fn unexpected_character(span: Span, found: char, mode: Mode) -> Self {
        let context = if mode.is_code_family() && mode != Mode::Code {
            LexErrorContext::Inside(mode)
        } else {
            LexErrorContext::TopLevel
        };
        let mut suggestions = Vec::new();
        if let (LexErrorContext::Inside(_), Some(closer)) = (context, mode.closer()) {
            suggestions.push(LexSuggestion::text(format!(
                "expected `{closer}` to close the {}",
                mode.describe()
            )));
        }
        Self {
            span,
            kind: LexErrorKind::UnexpectedCharacter { found },
            context,
            suggestions,
        }
    }

    /// Create an unterminated string error. `span` covers the opening quote.
    #[cold]
    pub fn unterminated_string(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedString,
            context: LexErrorContext::Inside(Mode::QuotedString),
            suggestions: vec![LexSuggestion::text("add closing `\"`")],
        }
    }

    /// Create an unterminated verbatim string error.
    #[cold]
    pub fn unterminated_verbatim(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedVerbatim,
            context: LexErrorContext::Inside(Mode::Verbatim),
            suggestions: vec![LexSuggestion::text("add closing `\"\"\"`")],
        }
    }

    /// Create an unterminated interpolation error.
    #[cold]
    pub fn unterminated_interpolation(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedInterpolation,
            context: LexErrorContext::Inside(Mode::QuotedString),
            suggestions: vec![
                LexSuggestion::text("add `}` to end the interpolation"),
                LexSuggestion::replace("or escape the brace", span, "\\{"),
            ],
        }
    }

    /// Create an unterminated code block error.
    #[cold]
    pub fn unterminated_code_block(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedCodeBlock,
            context: LexErrorContext::TopLevel,
            suggestions: vec![LexSuggestion::text(
                "add `}` to return to template text",
            )],
        }
    }

    /// Create an unclosed delimiter error for a bracket-family mode.
    #[cold]
    pub fn unclosed_delimiter(span: Span, open: char, close: char, mode: Mode) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnclosedDelimiter { open, close },
            context: LexErrorContext::Inside(mode),
            suggestions: vec![LexSuggestion::text(format!("add closing `{close}`"))],
        }
    }

    /// Create an invalid escape error.
    #[cold]
    pub fn invalid_escape(span: Span, escape: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::InvalidEscape { escape },
            context: LexErrorContext::StringLiteral,
            suggestions: vec![LexSuggestion::text(
                r#"valid escapes are: \", \', \\, \/, \b, \f, \n, \r, \t, \xHH, \uHHHH, \UHHHHHHHH"#,
            )],
        }
    }

    /// Create an invalid hex escape error.
    #[cold]
    pub fn invalid_hex_escape(span: Span, expected: u8) -> Self {
        Self {
            span,
            kind: LexErrorKind::InvalidHexEscape { expected },
            context: LexErrorContext::StringLiteral,
            suggestions: Vec::new(),
        }
    }

    /// Create an invalid code point error.
    #[cold]
    pub fn invalid_code_point(span: Span, value: u32) -> Self {
        Self {
            span,
            kind: LexErrorKind::InvalidCodePoint { value },
            context: LexErrorContext::StringLiteral,
            suggestions: Vec::new(),
        }
    }

    /// Create a trailing backslash error.
    #[cold]
    pub fn trailing_backslash(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::TrailingBackslash,
            context: LexErrorContext::StringLiteral,
            suggestions: vec![LexSuggestion::replace(
                "escape the backslash",
                span,
                "\\\\",
            )],
        }
    }

    /// Create an integer overflow error.
    #[cold]
    pub fn int_overflow(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::IntOverflow,
            context: LexErrorContext::NumberLiteral,
            suggestions: vec![LexSuggestion::text(format!(
                "use a smaller value (maximum is {})",
                i64::MAX
            ))],
        }
    }

    /// Create a float overflow error.
    #[cold]
    pub fn float_overflow(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::FloatOverflow,
            context: LexErrorContext::NumberLiteral,
            suggestions: Vec::new(),
        }
    }
}
