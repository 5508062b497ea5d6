//! Error types for query validation, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E006) for documentation lookup:
//!
//! - E001: `MissingColon` (Position item without a ':' separator)
//! - E002: `InvalidPosition` (Position is not a non-negative integer)
//! - E003: `InvalidPositionLetter` (Pinned letter is not exactly one character)
//! - E004: `EmptyItem` (Empty item in the position list)
//! - E005: `InvalidLength` (Length is not a non-negative integer)
//! - E006: `NomError` (Low-level nom parser error)
//!
//! Corpus loading has its own error type, [`crate::corpus::CorpusError`] (codes C001-C002).
//!
//! # Examples
//!
//! ```
//! use cercaparole::errors::ParseError;
//! use cercaparole::parser::parse_letters_at_positions;
//!
//! match parse_letters_at_positions("0c,2:t") {
//!     Err(e) => {
//!         assert_eq!(e.code(), "E001");
//!         println!("Error: {}", e);
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!     }
//!     Ok(_) => unreachable!(),
//! }
//!
//! let err = ParseError::InvalidLength { input: "five".to_string() };
//! assert!(err.display_detailed().contains("E005"));
//! ```

use nom::error::{ErrorKind, ParseError as NomParseError};
use std::io;

/// Validation error for user-supplied query fields.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseError {
    #[error("Missing ':' in position item \"{item}\"")]
    MissingColon { item: String },

    #[error("Invalid position in item \"{item}\" (expected a non-negative integer)")]
    InvalidPosition { item: String },

    #[error("Invalid letter in item \"{item}\" (expected exactly one character)")]
    InvalidPositionLetter { item: String },

    #[error("Empty item in position list")]
    EmptyItem,

    #[error("Invalid length: \"{input}\"")]
    InvalidLength { input: String },

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl From<ParseError> for io::Error {
    fn from(pe: ParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, pe.to_string())
    }
}

impl<'a> NomParseError<&'a str> for Box<ParseError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(ParseError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::MissingColon { .. } => "E001",
            ParseError::InvalidPosition { .. } => "E002",
            ParseError::InvalidPositionLetter { .. } => "E003",
            ParseError::EmptyItem => "E004",
            ParseError::InvalidLength { .. } => "E005",
            ParseError::NomError(_) => "E006",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::MissingColon { .. } => "Position item without a ':' separator",
            ParseError::InvalidPosition { .. } => "Position is not a non-negative integer",
            ParseError::InvalidPositionLetter { .. } => "Pinned letter is not exactly one character",
            ParseError::EmptyItem => "Empty item in the position list",
            ParseError::InvalidLength { .. } => "Length is not a non-negative integer",
            ParseError::NomError(_) => "Low-level parser error",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::MissingColon { .. } => "Each item of the position list must have the form `position:letter`. An item was found with no ':' between the position and the letter.",
            ParseError::InvalidPosition { .. } => "The part before ':' must be a zero-based index written as a non-negative integer. Negative numbers, letters and empty positions are rejected.",
            ParseError::InvalidPositionLetter { .. } => "The part after ':' must be a single character. Empty letters and multi-character strings can never match a single position.",
            ParseError::EmptyItem => "The position list contains an empty item, usually from a doubled or trailing comma.",
            ParseError::InvalidLength { .. } => "The length field must be an exact character count written as a non-negative integer.",
            ParseError::NomError(_) => "The low-level parser rejected the input. This usually accompanies another, more specific error.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::MissingColon { .. } => Some("Write positions as 'pos:letter', e.g. '0:c,2:t'"),
            ParseError::InvalidPosition { .. } => Some("Positions are zero-based integers, e.g. '0:c' pins the first letter"),
            ParseError::InvalidPositionLetter { .. } => Some("Pin exactly one letter per position, e.g. '3:a'"),
            ParseError::EmptyItem => Some("Remove the extra comma, e.g. '0:c,2:t' instead of '0:c,,2:t'"),
            ParseError::InvalidLength { .. } => Some("Enter a whole number such as '5', or leave the field empty"),
            ParseError::NomError(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<ParseError> {
        vec![
            ParseError::MissingColon { item: "0c".to_string() },
            ParseError::InvalidPosition { item: "x:c".to_string() },
            ParseError::InvalidPositionLetter { item: "0:ab".to_string() },
            ParseError::EmptyItem,
            ParseError::InvalidLength { input: "five".to_string() },
            ParseError::NomError(ErrorKind::Digit),
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = ParseError::MissingColon { item: "0c".to_string() };
        assert_eq!(err.code(), "E001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E001"));
        assert!(detailed.contains("pos:letter"));
    }

    /// Test that all `ParseError` variants have unique error codes
    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in all_variants() {
            let code = err.code();
            assert!(code.starts_with('E'), "Error code '{}' should start with 'E'", code);
            assert!(codes.insert(code), "Duplicate error code found: {}", code);
        }
        assert_eq!(codes.len(), 6);
    }

    /// Test that all error codes follow the format E0XX
    #[test]
    fn test_error_code_format() {
        for err in all_variants() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{}' should be 4 characters (E0XX)", code);
            assert!(code.starts_with("E0"));
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{}' should end with a number", code);
        }
    }

    #[test]
    fn test_help_text_adds_information() {
        for err in all_variants() {
            if let Some(help_text) = err.help() {
                assert!(help_text.len() > 10, "Help text for {:?} should be substantial", err);
                assert_ne!(help_text, err.to_string());
            }
        }
    }

    #[test]
    fn test_display_detailed_includes_code_and_help() {
        let err = ParseError::InvalidLength { input: "abc".to_string() };
        let detailed = err.display_detailed();
        assert!(detailed.contains(err.code()));
        assert!(detailed.contains(&err.to_string()));
        assert!(detailed.contains(err.help().unwrap()));
    }

    #[test]
    fn test_display_detailed_without_help() {
        let err = ParseError::NomError(ErrorKind::Tag);
        assert_eq!(err.display_detailed(), format!("{} (E006)", err));
    }

    #[test]
    fn test_into_io_error() {
        let io_err: io::Error = ParseError::EmptyItem.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(io_err.to_string(), "Empty item in position list");
    }
}
