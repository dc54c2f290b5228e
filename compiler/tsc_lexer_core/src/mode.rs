//! Lexical modes and the declarative rule table.
//!
//! Each [`Mode`] owns an ordered list of [`Rule`]s. A rule pairs an anchored
//! [`Pattern`] with the [`Tag`] to emit and an [`Action`] on the mode stack.
//! The scanner tries the rules of the active mode in order and the first
//! match wins, so order encodes priority: keywords come before identifiers,
//! a mode's own closer comes before the shared code rules, and so on.
//!
//! The code rules are shared by every code-family mode. They are written
//! once ([`code_rules`]) and copied by value into each mode's flat list when
//! the table is built, so scanning never follows an indirection.
//!
//! Tables are built once per [`Dialect`] and shared read-only between any
//! number of concurrent scans.

use std::sync::OnceLock;

use crate::tag::Tag;

/// Lexical mode: which rule list is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Top-level code (command mode).
    #[default]
    Code,
    /// Literal template text between code blocks.
    Template,
    /// Text of a double-quoted string, which may interpolate code.
    QuotedString,
    /// Body of a `"""` string: no escapes, no interpolation.
    Verbatim,
    /// Code inside `{ ... }`, from a string interpolation or a nested block.
    Statements,
    /// Code inside `[ ... ]`.
    Array,
    /// Code inside `( ... )`.
    Expression,
    /// Code inside a `{ ... }` object literal (rich dialect).
    Object,
}

impl Mode {
    /// Number of modes.
    pub const COUNT: usize = 8;

    /// Every mode, in discriminant order.
    pub const ALL: [Mode; Mode::COUNT] = [
        Mode::Code,
        Mode::Template,
        Mode::QuotedString,
        Mode::Verbatim,
        Mode::Statements,
        Mode::Array,
        Mode::Expression,
        Mode::Object,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Modes whose rule list is the full code grammar.
    pub const fn is_code_family(self) -> bool {
        matches!(
            self,
            Mode::Code | Mode::Statements | Mode::Array | Mode::Expression | Mode::Object
        )
    }

    /// Text that closes this mode, if it has a closer of its own.
    ///
    /// `Code` has none; `Template` is left through `{`.
    pub const fn closer(self) -> Option<&'static str> {
        match self {
            Mode::Code => None,
            Mode::Template => Some("{"),
            Mode::QuotedString => Some("\""),
            Mode::Verbatim => Some("\"\"\""),
            Mode::Statements | Mode::Object => Some("}"),
            Mode::Array => Some("]"),
            Mode::Expression => Some(")"),
        }
    }

    /// Human-readable description for diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            Mode::Code => "code",
            Mode::Template => "template text",
            Mode::QuotedString => "string",
            Mode::Verbatim => "verbatim string",
            Mode::Statements => "code block",
            Mode::Array => "array",
            Mode::Expression => "parenthesized expression",
            Mode::Object => "object literal",
        }
    }
}

/// Language dialect: selects which rules exist, never how scanning works.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Integers only, no `?`, `{` opens a nested block, no `"""` strings.
    #[default]
    Minimal,
    /// Adds decimals with exponents, `?` and friends, `{}` object literals,
    /// and `"""` verbatim strings.
    Rich,
}

/// Scan variant: the dialect plus the mode the scan starts in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScanConfig {
    /// Rule set to use.
    pub dialect: Dialect,
    /// Initial mode. `Code` for scripts and delegated regions, `Template`
    /// for whole template files.
    pub entry: Mode,
}

impl ScanConfig {
    /// Create a config with an explicit entry mode.
    pub const fn new(dialect: Dialect, entry: Mode) -> Self {
        Self { dialect, entry }
    }

    /// Start in code mode.
    pub const fn code(dialect: Dialect) -> Self {
        Self::new(dialect, Mode::Code)
    }

    /// Start in template text mode.
    pub const fn template(dialect: Dialect) -> Self {
        Self::new(dialect, Mode::Template)
    }
}

/// Anchored matcher. Each variant matches only at the cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// `{#` ... first `#}`, across lines. No match without the closer.
    BlockComment,
    /// `#` to end of line, including the newline when present.
    LineComment,
    /// A whole identifier-shaped word from the list (`if` but not `iffy`).
    Word(&'static [&'static str]),
    /// `'...'` with backslash escapes. No match without the closing quote.
    SingleQuoted,
    /// `[0-9]+` not followed by an identifier character.
    Integer,
    /// `[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?` not followed by an identifier
    /// character.
    Decimal,
    /// `[a-zA-Z_][a-zA-Z0-9_]*`.
    Identifier,
    /// First entry of the list that the input starts with.
    OneOf(&'static [&'static str]),
    /// Run of ASCII whitespace.
    Whitespace,
    /// Exactly this byte.
    Byte(u8),
    /// Template text: everything up to the next `{`.
    TemplateText,
    /// Quoted-string text up to an unescaped `"` or `{`.
    QuotedText,
    /// `"""`.
    VerbatimDelimiter,
    /// Everything up to the next `"""` (or end of input).
    VerbatimBody,
}

/// What a matched rule does to the mode stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Emit and stay in the current mode.
    Stay,
    /// Emit and enter a nested mode.
    Push(Mode),
    /// Emit and return to the enclosing mode.
    Pop,
}

/// One ordered alternative of a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    /// Anchored matcher.
    pub pattern: Pattern,
    /// Tag of the emitted token.
    pub tag: Tag,
    /// Mode stack effect.
    pub action: Action,
}

impl Rule {
    const fn stay(pattern: Pattern, tag: Tag) -> Self {
        Self {
            pattern,
            tag,
            action: Action::Stay,
        }
    }

    const fn push(pattern: Pattern, tag: Tag, mode: Mode) -> Self {
        Self {
            pattern,
            tag,
            action: Action::Push(mode),
        }
    }

    const fn pop(pattern: Pattern, tag: Tag) -> Self {
        Self {
            pattern,
            tag,
            action: Action::Pop,
        }
    }
}

/// Reserved words in both dialects.
pub(crate) const KEYWORDS: &[&str] = &[
    "if", "then", "else", "for", "in", "switch", "case", "default", "end", "and", "or", "not",
    "do", "export", "return", "break", "continue",
];

/// Rich dialect reserves `fn` on top of the shared set.
pub(crate) const RICH_KEYWORDS: &[&str] = &[
    "if", "then", "else", "for", "in", "switch", "case", "default", "end", "and", "or", "not",
    "do", "export", "return", "break", "continue", "fn",
];

pub(crate) const CONSTANTS: &[&str] = &["true", "false", "nil"];

/// Longest operators first so `<=` wins over `<`.
pub(crate) const OPERATORS: &[&str] = &["<=", ">=", "==", "!=", "+", "-", "*", "/", "<", ">", "="];

pub(crate) const RICH_OPERATORS: &[&str] = &[
    "->", "+=", "-=", "*=", "/=", "<=", ">=", "==", "!=", "+", "-", "*", "/", "%", "<", ">", "=",
    "?", "!",
];

pub(crate) const STRUCTURAL: &[&str] = &[".", ",", ":", "|"];

/// The code grammar shared by every code-family mode.
fn code_rules(dialect: Dialect) -> Vec<Rule> {
    let rich = dialect == Dialect::Rich;
    let mut rules = vec![
        Rule::stay(Pattern::BlockComment, Tag::BlockComment),
        Rule::stay(Pattern::LineComment, Tag::LineComment),
        Rule::stay(
            Pattern::Word(if rich { RICH_KEYWORDS } else { KEYWORDS }),
            Tag::Keyword,
        ),
        Rule::stay(Pattern::Word(CONSTANTS), Tag::Constant),
        Rule::stay(Pattern::SingleQuoted, Tag::StringLiteral),
        Rule::stay(
            if rich {
                Pattern::Decimal
            } else {
                Pattern::Integer
            },
            Tag::Number,
        ),
        Rule::stay(Pattern::Identifier, Tag::Identifier),
        Rule::stay(
            Pattern::OneOf(if rich { RICH_OPERATORS } else { OPERATORS }),
            Tag::Operator,
        ),
        Rule::stay(Pattern::OneOf(STRUCTURAL), Tag::Punctuation),
        Rule::push(Pattern::Byte(b'['), Tag::Punctuation, Mode::Array),
        Rule::push(Pattern::Byte(b'('), Tag::Punctuation, Mode::Expression),
        Rule::push(
            Pattern::Byte(b'{'),
            Tag::Punctuation,
            if rich { Mode::Object } else { Mode::Statements },
        ),
        // `}` leaves code and resumes template text.
        Rule::push(Pattern::Byte(b'}'), Tag::Punctuation, Mode::Template),
    ];
    if rich {
        rules.push(Rule::push(
            Pattern::VerbatimDelimiter,
            Tag::VerbatimString,
            Mode::Verbatim,
        ));
    }
    rules.push(Rule::push(
        Pattern::Byte(b'"'),
        Tag::StringLiteral,
        Mode::QuotedString,
    ));
    rules.push(Rule::stay(Pattern::Whitespace, Tag::Whitespace));
    rules
}

/// A code-family mode: its own closer first, then the shared code rules.
fn closed_by(closer: u8, dialect: Dialect) -> Vec<Rule> {
    let mut rules = vec![Rule::pop(Pattern::Byte(closer), Tag::Punctuation)];
    rules.extend(code_rules(dialect));
    rules
}

fn template_rules() -> Vec<Rule> {
    vec![
        Rule::stay(Pattern::TemplateText, Tag::LiteralText),
        Rule::stay(Pattern::BlockComment, Tag::BlockComment),
        Rule::pop(Pattern::Byte(b'{'), Tag::Punctuation),
    ]
}

fn quoted_string_rules() -> Vec<Rule> {
    vec![
        Rule::stay(Pattern::QuotedText, Tag::StringLiteral),
        Rule::stay(Pattern::BlockComment, Tag::BlockComment),
        Rule::push(Pattern::Byte(b'{'), Tag::Punctuation, Mode::Statements),
        Rule::pop(Pattern::Byte(b'"'), Tag::StringLiteral),
    ]
}

fn verbatim_rules() -> Vec<Rule> {
    vec![
        Rule::pop(Pattern::VerbatimDelimiter, Tag::VerbatimString),
        Rule::stay(Pattern::VerbatimBody, Tag::VerbatimString),
    ]
}

/// Immutable rule lists for every mode of one dialect.
#[derive(Clone, Debug)]
pub struct ModeTable {
    dialect: Dialect,
    rules: [Vec<Rule>; Mode::COUNT],
}

impl ModeTable {
    /// Build the table for `dialect`.
    ///
    /// Prefer [`for_dialect`](Self::for_dialect), which builds each table
    /// once per process.
    pub fn build(dialect: Dialect) -> Self {
        let rules = Mode::ALL.map(|mode| match mode {
            Mode::Code => code_rules(dialect),
            Mode::Template => template_rules(),
            Mode::QuotedString => quoted_string_rules(),
            Mode::Verbatim => verbatim_rules(),
            Mode::Statements | Mode::Object => closed_by(b'}', dialect),
            Mode::Array => closed_by(b']', dialect),
            Mode::Expression => closed_by(b')', dialect),
        });
        Self { dialect, rules }
    }

    /// Shared table for `dialect`.
    pub fn for_dialect(dialect: Dialect) -> &'static ModeTable {
        static MINIMAL: OnceLock<ModeTable> = OnceLock::new();
        static RICH: OnceLock<ModeTable> = OnceLock::new();
        match dialect {
            Dialect::Minimal => MINIMAL.get_or_init(|| ModeTable::build(Dialect::Minimal)),
            Dialect::Rich => RICH.get_or_init(|| ModeTable::build(Dialect::Rich)),
        }
    }

    /// Dialect this table was built for.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Ordered rules of `mode`.
    #[inline]
    pub fn rules(&self, mode: Mode) -> &[Rule] {
        &self.rules[mode.index()]
    }
}
