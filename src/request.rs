//! The search form as a front end collects it: every field is raw, optional text.
//!
//! [`SearchRequest::to_constraints`] is the one place where user input becomes
//! a [`ConstraintSet`]. Fields are trimmed, and empty input means "not set".
//! This matters because an empty-but-set field is not a no-op (see
//! [`ConstraintSet`]).

use serde::Deserialize;

use crate::constraints::ConstraintSet;
use crate::errors::ParseError;
use crate::parser::parse_letters_at_positions;

/// Raw text of each search field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchRequest {
    pub length: Option<String>,
    pub include_letters: Option<String>,
    pub exclude_letters: Option<String>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    pub first_letters: Option<String>,
    /// `pos:letter,pos:letter` shorthand, e.g. `0:c,2:t`.
    pub letters_at_positions: Option<String>,
}

// trimmed text, or None if there is nothing left
fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

impl SearchRequest {
    /// Validate the request and build the constraint set.
    ///
    /// # Errors
    ///
    /// - `ParseError::InvalidLength` if `length` is not a non-negative integer.
    /// - Any error from [`parse_letters_at_positions`].
    pub fn to_constraints(&self) -> Result<ConstraintSet, Box<ParseError>> {
        let length = non_empty(self.length.as_deref())
            .map(|s| {
                s.parse::<usize>()
                    .map_err(|_| Box::new(ParseError::InvalidLength { input: s.to_string() }))
            })
            .transpose()?;

        let letters_at_positions = non_empty(self.letters_at_positions.as_deref())
            .map(parse_letters_at_positions)
            .transpose()?;

        let text = |field: &Option<String>| non_empty(field.as_deref()).map(str::to_string);

        Ok(ConstraintSet {
            length,
            include_letters: text(&self.include_letters),
            exclude_letters: text(&self.exclude_letters),
            letters_at_positions,
            starts_with: text(&self.starts_with),
            ends_with: text(&self.ends_with),
            first_letters: text(&self.first_letters),
        })
    }
}
