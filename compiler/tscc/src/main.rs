//! tsc lexer CLI

use tscc::commands::{check_file, lex_file, FileArgs};

fn main() {
    tscc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" | "check" => {
            let file_args = match FileArgs::parse(&args[2..]) {
                Ok(file_args) => file_args,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: tscc {command} <file> [options]");
                    eprintln!();
                    eprintln!("Run `tscc help` for the option list.");
                    std::process::exit(1);
                }
            };
            if command == "lex" {
                lex_file(&file_args);
            } else {
                check_file(&file_args);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("tscc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("tsc lexer");
    println!();
    println!("Usage: tscc <command> <file> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>           Tokenize and display tokens");
    println!("  check <file>         Report lexical errors (exit 1 if any)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --dialect=<name>     minimal (default) or rich");
    println!("  --flavor=<name>      script, template or document");
    println!("                       (default: from the file name, *.tss is a script,");
    println!("                       *.html.tss a document, other *.<ext>.tss a template)");
    println!("  -t, --template       Same as --flavor=template");
    println!("  --json               Print JSON instead of text");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=debug       Trace lexing to stderr");
    println!();
    println!("Examples:");
    println!("  tscc lex page.html.tss");
    println!("  tscc lex main.tss --dialect=rich --json");
    println!("  tscc check notes.txt.tss");
}
