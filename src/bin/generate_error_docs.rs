//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ParseError` and `CorpusError` implementations via their
//! `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;
use std::io;
use std::path::PathBuf;

use cercaparole::corpus::CorpusError;
use cercaparole::errors::ParseError;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($out:expr, $errors:expr) => {
        for error in $errors {
            let _ = writeln!($out, "### {}: {}\n", error.code(), error.description());
            let _ = writeln!($out, "**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                let _ = writeln!($out, "**How to fix:**");
                let _ = writeln!($out, "```");
                let _ = writeln!($out, "{}", help_text);
                let _ = writeln!($out, "```\n");
            }

            let _ = writeln!($out, "**Example error message:**");
            let _ = writeln!($out, "```");
            let _ = writeln!($out, "{}", error);
            let _ = writeln!($out, "```\n");

            let _ = writeln!($out, "**Detailed format:**");
            let _ = writeln!($out, "```");
            let _ = writeln!($out, "{}", error.display_detailed());
            let _ = writeln!($out, "```\n");

            let _ = writeln!($out, "---\n");
        }
    };
}

/// One example of every `ParseError` variant
fn all_parse_error_variants() -> Vec<ParseError> {
    vec![
        ParseError::MissingColon { item: "0c".to_string() },
        ParseError::InvalidPosition { item: "x:c".to_string() },
        ParseError::InvalidPositionLetter { item: "0:ca".to_string() },
        ParseError::EmptyItem,
        ParseError::InvalidLength { input: "cinque".to_string() },
        ParseError::NomError(nom::error::ErrorKind::Digit),
    ]
}

/// One example of every `CorpusError` variant
fn all_corpus_error_variants() -> Vec<CorpusError> {
    vec![
        CorpusError::FileAccess {
            path: PathBuf::from("./paroleitaliane/"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        },
        CorpusError::Decoding { path: PathBuf::from("./paroleitaliane/latin1.txt"), offset: 1042 },
    ]
}

/// Build the whole Markdown document.
fn render_docs() -> String {
    // NB: writing to a String never fails, so results are ignored with `let _ =`
    let mut out = String::new();

    let _ = writeln!(out, "# Error Code Reference\n");
    let _ = writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    let _ = writeln!(out, "## Table of Contents\n");
    let _ = writeln!(out, "- [Corpus Errors (C001–C002)](#corpus-errors)");
    let _ = writeln!(out, "- [Validation Errors (E001–E006)](#validation-errors)");
    let _ = writeln!(out, "- [How to Use Error Codes](#how-to-use-error-codes)\n");

    let _ = writeln!(out, "## Corpus Errors\n");
    let _ = writeln!(out, "Errors raised while reading the word lists. The first failing file aborts the load.\n");
    generate_error_docs!(out, all_corpus_error_variants());

    let _ = writeln!(out, "## Validation Errors\n");
    let _ = writeln!(out, "Errors in the search fields, mostly in the `pos:letter` position shorthand.\n");
    generate_error_docs!(out, all_parse_error_variants());

    let _ = writeln!(out, "\n## How to Use Error Codes\n");
    let _ = writeln!(out, "When you see an error like:\n");
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "Error: {}", ParseError::MissingColon { item: "0c".to_string() }.display_detailed());
    let _ = writeln!(out, "```\n");
    let _ = writeln!(out, "1. Note the error code (e.g., `E001`)");
    let _ = writeln!(out, "2. Look it up in this document for detailed explanation");
    let _ = writeln!(out, "3. Follow the suggested resolution steps");

    out
}

fn main() {
    print!("{}", render_docs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_documented() {
        let docs = render_docs();
        for err in all_parse_error_variants() {
            assert!(docs.contains(&format!("### {}:", err.code())), "missing {}", err.code());
        }
        for err in all_corpus_error_variants() {
            assert!(docs.contains(&format!("### {}:", err.code())), "missing {}", err.code());
        }
    }

    #[test]
    fn test_variant_lists_are_complete() {
        // one entry per code, no duplicates
        let mut codes: Vec<&str> = all_parse_error_variants().iter().map(ParseError::code).collect();
        codes.extend(all_corpus_error_variants().iter().map(CorpusError::code));
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert_eq!(total, 8);
    }
}
