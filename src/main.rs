//! Quill Language CLI
//!
//! Command-line driver for the Quill front end. This is a thin wrapper: it
//! loads source text, calls the lexer and parser, and reports the resulting
//! AST or diagnostic. No parsing logic lives here.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use quill_lang::error::Diagnostic;
use quill_lang::{Lexer, VERSION};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() == 1 {
        // No arguments: start REPL
        println!("Quill v{} - Language Front End", VERSION);
        println!("Type 'exit' to quit\n");
        repl();
        return;
    }

    // Check for flags
    let mut show_tokens = false;
    let mut show_help = false;
    let mut filename: Option<&String> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--tokens" | "-t" => show_tokens = true,
            "--help" | "-h" => show_help = true,
            _ if arg.starts_with('-') => {
                eprintln!("Unknown flag: {}", arg);
                print_usage();
                process::exit(1);
            }
            _ => filename = Some(arg),
        }
    }

    if show_help {
        print_help();
        return;
    }

    if let Some(file) = filename {
        let result = if show_tokens {
            show_file_tokens(file)
        } else {
            parse_file(file)
        };

        if let Err(e) = result {
            eprintln!("{}", e);
            process::exit(1);
        }
    } else {
        eprintln!("Error: No input file specified");
        print_usage();
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: quill [OPTIONS] [script]");
    eprintln!("       quill --help");
}

fn print_help() {
    println!("Quill v{} - A curly-brace scripting language front end", VERSION);
    println!();
    println!("USAGE:");
    println!("    quill [OPTIONS] [script]");
    println!();
    println!("OPTIONS:");
    println!("    -t, --tokens    Show tokenization output (lexer only)");
    println!("    -h, --help      Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    quill script.ql           Parse a Quill script and print its AST");
    println!("    quill --tokens script.ql  Show tokens from the lexer");
    println!("    quill                     Start interactive REPL");
}

/// Parse a Quill script from a file and print its AST
fn parse_file(filename: &str) -> Result<(), String> {
    let source = fs::read_to_string(filename)
        .map_err(|e| format!("Failed to read file '{}': {}", filename, e))?;

    match quill_lang::parse(&source, Some(filename)) {
        Ok(program) => {
            println!("{:#?}", program);
            Ok(())
        }
        Err(e) => Err(Diagnostic::with_source(e, &source).format()),
    }
}

/// Show tokens from lexing a file
fn show_file_tokens(filename: &str) -> Result<(), String> {
    let source = fs::read_to_string(filename)
        .map_err(|e| format!("Failed to read file '{}': {}", filename, e))?;

    let mut lexer = Lexer::new(&source, Some(filename));
    let tokens = lexer
        .tokenize()
        .map_err(|e| Diagnostic::with_source(e, &source).format())?;

    println!("Tokens for '{}':", filename);
    println!("{}", "=".repeat(60));

    for (i, token) in tokens.iter().enumerate() {
        println!(
            "{:4}: {:24} | {:?}",
            i,
            format!("{:?}", token.token_type),
            token.lexeme
        );
    }

    println!("{}", "=".repeat(60));
    println!("Total tokens: {}", tokens.len());

    Ok(())
}

/// Start an interactive REPL (read-parse-print loop)
fn repl() {
    let mut line_number = 1;

    loop {
        print!("quill:{} > ", line_number);
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {
                let input = input.trim();

                if input == "exit" || input == "quit" {
                    break;
                }

                if input.is_empty() {
                    continue;
                }

                match quill_lang::parse(input, Some("<repl>")) {
                    Ok(program) => println!("{:#?}", program),
                    Err(e) => eprintln!("{}", Diagnostic::with_source(e, input).format()),
                }

                line_number += 1;
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }

    println!("\nGoodbye!");
}
