//! The `lex` command: print the token stream of a file.

use serde::Serialize;
use tsc_lexer::{lex, LexOutput, LineIndex};

use super::{read_file, FileArgs};

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: &'static str,
    text: &'a str,
    mode: String,
    start: u32,
    end: u32,
    line: u32,
    col: u32,
}

#[derive(Serialize)]
struct FrameRecord {
    mode: String,
    opened_at: u32,
}

#[derive(Serialize)]
struct LexDump<'a> {
    file: &'a str,
    dialect: String,
    flavor: &'static str,
    tokens: Vec<TokenRecord<'a>>,
    unclosed: Vec<FrameRecord>,
}

/// Lex a file and print its tokens, as text or JSON.
pub fn lex_file(args: &FileArgs) {
    let source = read_file(&args.path);
    let output = lex(&source, &args.options);

    if args.json {
        match render_json(&args.path, &source, &output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: cannot serialize tokens: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render_tokens(&args.path, &source, &output));
    }
}

/// One line per token: `Kind "text" @ line:col (start..end)`.
pub fn render_tokens(path: &str, source: &str, output: &LexOutput<'_>) -> String {
    use std::fmt::Write;

    let index = LineIndex::build(source);
    let mut out = format!("Tokens for '{path}' ({} tokens):\n", output.tokens.len());
    for token in &output.tokens {
        let (line, col) = index.line_col(source, token.span.start);
        let _ = writeln!(
            out,
            "  {:<14} {:?} @ {line}:{col} ({})",
            token.kind.name(),
            token.text,
            token.span
        );
    }
    for frame in &output.unclosed {
        let (line, col) = index.line_col(source, frame.opened_at);
        let _ = writeln!(
            out,
            "  unclosed {} opened at {line}:{col}",
            frame.mode.describe()
        );
    }
    out
}

/// The token stream as pretty-printed JSON.
pub fn render_json(
    path: &str,
    source: &str,
    output: &LexOutput<'_>,
) -> Result<String, serde_json::Error> {
    let index = LineIndex::build(source);
    let dump = LexDump {
        file: path,
        dialect: format!("{:?}", output.options.dialect).to_lowercase(),
        flavor: output.options.flavor.name(),
        tokens: output
            .tokens
            .iter()
            .map(|t| {
                let (line, col) = index.line_col(source, t.span.start);
                TokenRecord {
                    kind: t.kind.name(),
                    text: t.text,
                    mode: format!("{:?}", t.mode),
                    start: t.span.start,
                    end: t.span.end,
                    line,
                    col,
                }
            })
            .collect(),
        unclosed: output
            .unclosed
            .iter()
            .map(|f| FrameRecord {
                mode: format!("{:?}", f.mode),
                opened_at: f.opened_at,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&dump)
}
