use super::*;
use crate::mode::Dialect;
use crate::SourceBuffer;
use pretty_assertions::assert_eq;

const MINIMAL_CODE: ScanConfig = ScanConfig::code(Dialect::Minimal);
const RICH_CODE: ScanConfig = ScanConfig::code(Dialect::Rich);
const MINIMAL_TEMPLATE: ScanConfig = ScanConfig::template(Dialect::Minimal);

/// Helper: scan and pair every tag with the text it covers.
fn scan(source: &str, config: ScanConfig) -> Vec<(Tag, &str)> {
    let mut pos = 0usize;
    tokenize(source, config)
        .into_iter()
        .map(|t| {
            let end = pos + t.len as usize;
            let text = &source[pos..end];
            pos = end;
            (t.tag, text)
        })
        .collect()
}

fn tags(source: &str, config: ScanConfig) -> Vec<Tag> {
    tokenize(source, config).iter().map(|t| t.tag).collect()
}

/// Helper: run a scanner to the end and hand it back for stack inspection.
fn run(buf: &SourceBuffer, config: ScanConfig) -> ModalScanner<'_> {
    let mut scanner = ModalScanner::new(buf.cursor(), config);
    while scanner.next_token().tag != Tag::Eof {}
    scanner
}

// === Priority ===

#[test]
fn keyword_wins_over_identifier() {
    for config in [MINIMAL_CODE, RICH_CODE] {
        assert_eq!(scan("if", config), vec![(Tag::Keyword, "if")]);
    }
}

#[test]
fn keyword_prefix_is_one_identifier() {
    for config in [MINIMAL_CODE, RICH_CODE] {
        assert_eq!(scan("iffy", config), vec![(Tag::Identifier, "iffy")]);
        assert_eq!(scan("end_", config), vec![(Tag::Identifier, "end_")]);
    }
}

#[test]
fn constants() {
    assert_eq!(
        tags("true false nil nils", MINIMAL_CODE),
        vec![
            Tag::Constant,
            Tag::Whitespace,
            Tag::Constant,
            Tag::Whitespace,
            Tag::Constant,
            Tag::Whitespace,
            Tag::Identifier,
        ]
    );
}

#[test]
fn fn_is_reserved_only_in_rich() {
    assert_eq!(scan("fn", MINIMAL_CODE), vec![(Tag::Identifier, "fn")]);
    assert_eq!(scan("fn", RICH_CODE), vec![(Tag::Keyword, "fn")]);
}

// === Template resumption ===

#[test]
fn close_brace_resumes_template_text() {
    let source = r#"prefix{if true then "x" else "y" end}suffix"#;
    assert_eq!(
        scan(source, MINIMAL_TEMPLATE),
        vec![
            (Tag::LiteralText, "prefix"),
            (Tag::Punctuation, "{"),
            (Tag::Keyword, "if"),
            (Tag::Whitespace, " "),
            (Tag::Constant, "true"),
            (Tag::Whitespace, " "),
            (Tag::Keyword, "then"),
            (Tag::Whitespace, " "),
            (Tag::StringLiteral, "\""),
            (Tag::StringLiteral, "x"),
            (Tag::StringLiteral, "\""),
            (Tag::Whitespace, " "),
            (Tag::Keyword, "else"),
            (Tag::Whitespace, " "),
            (Tag::StringLiteral, "\""),
            (Tag::StringLiteral, "y"),
            (Tag::StringLiteral, "\""),
            (Tag::Whitespace, " "),
            (Tag::Keyword, "end"),
            (Tag::Punctuation, "}"),
            (Tag::LiteralText, "suffix"),
        ]
    );

    let buf = SourceBuffer::new(source);
    let scanner = run(&buf, MINIMAL_TEMPLATE);
    assert!(scanner.is_balanced());
    assert_eq!(scanner.mode(), Mode::Template);
}

#[test]
fn close_brace_in_code_entry_switches_to_text() {
    let source = "a } text {b";
    assert_eq!(
        scan(source, MINIMAL_CODE),
        vec![
            (Tag::Identifier, "a"),
            (Tag::Whitespace, " "),
            (Tag::Punctuation, "}"),
            (Tag::LiteralText, " text "),
            (Tag::Punctuation, "{"),
            (Tag::Identifier, "b"),
        ]
    );
    let buf = SourceBuffer::new(source);
    assert!(run(&buf, MINIMAL_CODE).is_balanced());
}

#[test]
fn several_blocks_in_one_template() {
    assert_eq!(
        tags("<p>{x}</p>{y}", MINIMAL_TEMPLATE),
        vec![
            Tag::LiteralText,
            Tag::Punctuation,
            Tag::Identifier,
            Tag::Punctuation,
            Tag::LiteralText,
            Tag::Punctuation,
            Tag::Identifier,
            Tag::Punctuation,
        ]
    );
}

// === Strings ===

#[test]
fn string_interpolation() {
    let source = r#""a{1+2}b""#;
    assert_eq!(
        scan(source, MINIMAL_CODE),
        vec![
            (Tag::StringLiteral, "\""),
            (Tag::StringLiteral, "a"),
            (Tag::Punctuation, "{"),
            (Tag::Number, "1"),
            (Tag::Operator, "+"),
            (Tag::Number, "2"),
            (Tag::Punctuation, "}"),
            (Tag::StringLiteral, "b"),
            (Tag::StringLiteral, "\""),
        ]
    );
    let buf = SourceBuffer::new(source);
    assert!(run(&buf, MINIMAL_CODE).is_balanced());
}

#[test]
fn interpolation_pushes_statements() {
    let buf = SourceBuffer::new(r#""a{1"#);
    let scanner = run(&buf, MINIMAL_CODE);
    assert_eq!(
        scanner.modes().collect::<Vec<_>>(),
        vec![Mode::Code, Mode::QuotedString, Mode::Statements]
    );
}

#[test]
fn escaped_quote_and_brace_stay_in_text() {
    assert_eq!(
        scan(r#""a\"b\{c""#, MINIMAL_CODE),
        vec![
            (Tag::StringLiteral, "\""),
            (Tag::StringLiteral, r#"a\"b\{c"#),
            (Tag::StringLiteral, "\""),
        ]
    );
}

#[test]
fn single_quoted_string_with_escapes() {
    assert_eq!(
        scan(r"'it\'s' 'a\\'", MINIMAL_CODE),
        vec![
            (Tag::StringLiteral, r"'it\'s'"),
            (Tag::Whitespace, " "),
            (Tag::StringLiteral, r"'a\\'"),
        ]
    );
}

#[test]
fn unterminated_single_quote_is_one_error_unit() {
    assert_eq!(
        scan("'abc", MINIMAL_CODE),
        vec![(Tag::Unclassified, "'"), (Tag::Identifier, "abc")]
    );
}

#[test]
fn verbatim_ignores_interpolation() {
    let source = r#""""a{b}c""""#;
    assert_eq!(
        scan(source, RICH_CODE),
        vec![
            (Tag::VerbatimString, "\"\"\""),
            (Tag::VerbatimString, "a{b}c"),
            (Tag::VerbatimString, "\"\"\""),
        ]
    );
    let buf = SourceBuffer::new(source);
    assert!(run(&buf, RICH_CODE).is_balanced());
}

#[test]
fn verbatim_allows_lone_quotes_and_backslashes() {
    assert_eq!(
        scan(r#""""say "hi" \n""""#, RICH_CODE),
        vec![
            (Tag::VerbatimString, "\"\"\""),
            (Tag::VerbatimString, r#"say "hi" \n"#),
            (Tag::VerbatimString, "\"\"\""),
        ]
    );
}

#[test]
fn empty_verbatim() {
    assert_eq!(
        tags(r#""""""""#, RICH_CODE),
        vec![Tag::VerbatimString, Tag::VerbatimString]
    );
}

#[test]
fn minimal_dialect_has_no_verbatim() {
    assert!(!tags(r#""""a""""#, MINIMAL_CODE).contains(&Tag::VerbatimString));
}

// === Comments ===

#[test]
fn comment_splits_template_text() {
    assert_eq!(
        scan("a{# note #}b", MINIMAL_TEMPLATE),
        vec![
            (Tag::LiteralText, "a"),
            (Tag::BlockComment, "{# note #}"),
            (Tag::LiteralText, "b"),
        ]
    );
}

#[test]
fn comment_at_end_of_template_emits_no_empty_text() {
    assert_eq!(
        scan("a{##}", MINIMAL_TEMPLATE),
        vec![(Tag::LiteralText, "a"), (Tag::BlockComment, "{##}")]
    );
}

#[test]
fn block_comment_spans_lines() {
    assert_eq!(
        scan("{# one\ntwo #}x", MINIMAL_CODE),
        vec![(Tag::BlockComment, "{# one\ntwo #}"), (Tag::Identifier, "x")]
    );
}

#[test]
fn unterminated_block_comment_opens_code() {
    assert_eq!(
        scan("a{# x", MINIMAL_TEMPLATE),
        vec![
            (Tag::LiteralText, "a"),
            (Tag::Punctuation, "{"),
            (Tag::LineComment, "# x"),
        ]
    );
}

#[test]
fn line_comment_takes_its_newline() {
    assert_eq!(
        scan("# hi\nx", MINIMAL_CODE),
        vec![(Tag::LineComment, "# hi\n"), (Tag::Identifier, "x")]
    );
}

#[test]
fn comment_inside_string_text() {
    assert_eq!(
        tags(r#""a{# c #}b""#, MINIMAL_CODE),
        vec![
            Tag::StringLiteral,
            Tag::StringLiteral,
            Tag::BlockComment,
            Tag::StringLiteral,
            Tag::StringLiteral,
        ]
    );
}

// === Numbers ===

#[test]
fn minimal_numbers_are_integers() {
    assert_eq!(
        scan("1.5", MINIMAL_CODE),
        vec![
            (Tag::Number, "1"),
            (Tag::Punctuation, "."),
            (Tag::Number, "5"),
        ]
    );
}

#[test]
fn rich_decimals_and_exponents() {
    for source in ["1.5", "1.5e-3", "2E10", "7e+1", "10"] {
        assert_eq!(scan(source, RICH_CODE), vec![(Tag::Number, source)]);
    }
}

#[test]
fn rich_dot_without_digit_is_member_access() {
    assert_eq!(
        tags("1.x", RICH_CODE),
        vec![Tag::Number, Tag::Punctuation, Tag::Identifier]
    );
}

#[test]
fn number_needs_word_boundary() {
    assert_eq!(
        scan("12ab", MINIMAL_CODE),
        vec![
            (Tag::Unclassified, "1"),
            (Tag::Unclassified, "2"),
            (Tag::Identifier, "ab"),
        ]
    );
}

// === Operators and brackets ===

#[test]
fn compound_operators_depend_on_dialect() {
    assert_eq!(
        scan("+=", MINIMAL_CODE),
        vec![(Tag::Operator, "+"), (Tag::Operator, "=")]
    );
    assert_eq!(scan("+=", RICH_CODE), vec![(Tag::Operator, "+=")]);
    assert_eq!(scan("->", RICH_CODE), vec![(Tag::Operator, "->")]);
    assert_eq!(scan("<=", MINIMAL_CODE), vec![(Tag::Operator, "<=")]);
}

#[test]
fn conditional_operator() {
    assert_eq!(
        tags("a ? b : c", RICH_CODE),
        vec![
            Tag::Identifier,
            Tag::Whitespace,
            Tag::Operator,
            Tag::Whitespace,
            Tag::Identifier,
            Tag::Whitespace,
            Tag::Punctuation,
            Tag::Whitespace,
            Tag::Identifier,
        ]
    );
    assert_eq!(scan("?", MINIMAL_CODE), vec![(Tag::Unclassified, "?")]);
}

#[test]
fn brackets_pair_with_their_own_closer() {
    let source = "(1 + [2, 3])";
    assert_eq!(
        tags(source, MINIMAL_CODE),
        vec![
            Tag::Punctuation,
            Tag::Number,
            Tag::Whitespace,
            Tag::Operator,
            Tag::Whitespace,
            Tag::Punctuation,
            Tag::Number,
            Tag::Punctuation,
            Tag::Whitespace,
            Tag::Number,
            Tag::Punctuation,
            Tag::Punctuation,
        ]
    );
    let buf = SourceBuffer::new(source);
    assert!(run(&buf, MINIMAL_CODE).is_balanced());
}

#[test]
fn rich_object_literal() {
    let source = "{a: 1}";
    let buf = SourceBuffer::new(source);
    let mut scanner = ModalScanner::new(buf.cursor(), RICH_CODE);
    assert_eq!(scanner.next_token().tag, Tag::Punctuation);
    assert_eq!(scanner.mode(), Mode::Object);
    let rest: Vec<_> = scanner.by_ref().map(|t| t.tag).collect();
    assert_eq!(
        rest,
        vec![
            Tag::Identifier,
            Tag::Punctuation,
            Tag::Whitespace,
            Tag::Number,
            Tag::Punctuation,
        ]
    );
    assert!(scanner.is_balanced());
}

#[test]
fn minimal_brace_opens_statements() {
    let buf = SourceBuffer::new("{");
    assert_eq!(run(&buf, MINIMAL_CODE).mode(), Mode::Statements);
}

#[test]
fn bottom_frame_is_never_popped() {
    let config = ScanConfig::new(Dialect::Minimal, Mode::Array);
    let buf = SourceBuffer::new("]]");
    let scanner = run(&buf, config);
    assert_eq!(scanner.depth(), 1);
    assert_eq!(scanner.mode(), Mode::Array);
    assert_eq!(tags("]]", config), vec![Tag::Punctuation, Tag::Punctuation]);
}

// === Error units ===

#[test]
fn error_unit_is_one_scalar() {
    assert_eq!(
        scan("\u{e9}\u{1f600}x", MINIMAL_CODE),
        vec![
            (Tag::Unclassified, "\u{e9}"),
            (Tag::Unclassified, "\u{1f600}"),
            (Tag::Identifier, "x"),
        ]
    );
}

#[test]
fn interior_nul_is_an_error_unit() {
    assert_eq!(
        scan("a\0b", MINIMAL_CODE),
        vec![
            (Tag::Identifier, "a"),
            (Tag::Unclassified, "\0"),
            (Tag::Identifier, "b"),
        ]
    );
}

#[test]
fn non_ascii_template_text_is_literal() {
    assert_eq!(
        scan("caf\u{e9} \u{2603}", MINIMAL_TEMPLATE),
        vec![(Tag::LiteralText, "caf\u{e9} \u{2603}")]
    );
}

// === Unterminated input ===

#[test]
fn unterminated_block_is_not_a_failure() {
    let source = "{if true";
    assert!(!tokenize(source, MINIMAL_TEMPLATE).is_empty());

    let buf = SourceBuffer::new(source);
    let scanner = run(&buf, MINIMAL_TEMPLATE);
    assert!(!scanner.is_balanced());
    assert_eq!(
        scanner.unclosed(),
        &[Frame {
            mode: Mode::Code,
            opened_at: 0
        }]
    );
}

#[test]
fn unclosed_records_openers() {
    let buf = SourceBuffer::new("x = (a, [b");
    let scanner = run(&buf, MINIMAL_CODE);
    assert_eq!(
        scanner.unclosed(),
        &[
            Frame {
                mode: Mode::Expression,
                opened_at: 4
            },
            Frame {
                mode: Mode::Array,
                opened_at: 8
            },
        ]
    );
}

#[test]
fn unclosed_code_block_points_at_latest_brace() {
    let buf = SourceBuffer::new("a{x}b{(y");
    let scanner = run(&buf, MINIMAL_TEMPLATE);
    assert_eq!(
        scanner.unclosed(),
        &[
            Frame {
                mode: Mode::Code,
                opened_at: 5
            },
            Frame {
                mode: Mode::Expression,
                opened_at: 6
            },
        ]
    );
}

#[test]
fn balanced_template_has_nothing_unclosed() {
    let buf = SourceBuffer::new("a{x}b");
    assert!(run(&buf, MINIMAL_TEMPLATE).unclosed().is_empty());
}

// === Iteration ===

#[test]
fn eof_repeats() {
    let buf = SourceBuffer::new("x");
    let mut scanner = ModalScanner::new(buf.cursor(), MINIMAL_CODE);
    assert_eq!(scanner.next_token().tag, Tag::Identifier);
    for _ in 0..3 {
        assert_eq!(
            scanner.next_token(),
            RawToken {
                tag: Tag::Eof,
                len: 0
            }
        );
    }
}

#[test]
fn empty_input() {
    assert!(tokenize("", MINIMAL_TEMPLATE).is_empty());
    let buf = SourceBuffer::new("");
    assert!(run(&buf, MINIMAL_TEMPLATE).is_balanced());
}

#[test]
fn scanning_twice_is_identical() {
    let source = r#"<b>{for x in [1, 2] do "v{x}" end}</b>"#;
    assert_eq!(
        tokenize(source, MINIMAL_TEMPLATE),
        tokenize(source, MINIMAL_TEMPLATE)
    );
}

// === Property tests ===

mod properties {
    use super::*;
    use proptest::prelude::*;

    const CONFIGS: [ScanConfig; 4] = [
        ScanConfig::code(Dialect::Minimal),
        ScanConfig::code(Dialect::Rich),
        ScanConfig::template(Dialect::Minimal),
        ScanConfig::template(Dialect::Rich),
    ];

    /// Well-nested code: brackets, strings and interpolations all closed.
    fn code() -> impl Strategy<Value = String> {
        let atom = prop_oneof![
            Just("x"),
            Just("42"),
            Just("if"),
            Just(" "),
            Just("+"),
            Just("'s'"),
            Just("true"),
            Just(","),
        ]
        .prop_map(String::from);
        atom.prop_recursive(4, 64, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 1..4).prop_map(|v| v.concat()),
                inner.clone().prop_map(|c| format!("({c})")),
                inner.clone().prop_map(|c| format!("[{c}]")),
                inner.prop_map(|c| format!("\"a{{{c}}}b\"")),
            ]
        })
    }

    /// Template text interleaved with closed code blocks.
    fn template() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                "[a-z <>/=]{0,8}".prop_map(String::from),
                code().prop_map(|c| format!("{{{c}}}")),
            ],
            0..6,
        )
        .prop_map(|v| v.concat())
    }

    /// Scan with every config and check the token lengths tile the source.
    fn assert_lossless(source: &str) -> Result<(), TestCaseError> {
        for config in CONFIGS {
            let mut pos = 0usize;
            for token in tokenize(source, config) {
                prop_assert!(token.len > 0, "empty {:?} token", token.tag);
                pos += token.len as usize;
                prop_assert!(source.is_char_boundary(pos));
            }
            prop_assert_eq!(pos, source.len());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn lossless_on_arbitrary_text(source in any::<String>()) {
            assert_lossless(&source)?;
        }

        #[test]
        fn lossless_on_brace_heavy_text(source in r#"[{}()\[\]"'#a1 \\.e?]{0,64}"#) {
            assert_lossless(&source)?;
        }

        #[test]
        fn deterministic(source in r#"[{}()\[\]"'#a1 \\]{0,64}"#) {
            for config in CONFIGS {
                prop_assert_eq!(tokenize(&source, config), tokenize(&source, config));
            }
        }

        #[test]
        fn well_nested_code_is_balanced(source in code()) {
            let buf = SourceBuffer::new(&source);
            let scanner = run(&buf, MINIMAL_CODE);
            prop_assert!(scanner.is_balanced(), "stack {:?}", scanner.frames());
        }

        #[test]
        fn well_nested_template_is_balanced(source in template()) {
            for dialect in [Dialect::Minimal, Dialect::Rich] {
                let buf = SourceBuffer::new(&source);
                let scanner = run(&buf, ScanConfig::template(dialect));
                prop_assert!(scanner.is_balanced(), "stack {:?}", scanner.frames());
            }
        }
    }
}
