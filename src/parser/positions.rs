//! Parser for the `pos:letter,pos:letter,...` shorthand that pins letters at positions.
//!
//! `0:c,2:t` means position 0 must be `c` and position 2 must be `t`. Spaces
//! around either side of the colon are ignored. Positions are zero-based and
//! may carry a leading `+`. When a position appears twice the later letter wins.

use crate::constraints::LettersAtPositions;
use crate::errors::ParseError;
use nom::{
    character::complete::{char, digit1, satisfy, space0},
    combinator::{all_consuming, opt},
    sequence::{delimited, preceded, separated_pair},
    IResult,
    Parser,
};

/// Parser result type: input, output, with our custom `ParseError`
pub type PResult<'a, O> = IResult<&'a str, O, Box<ParseError>>;

const ITEM_SEPARATOR: char = ',';
const POSITION_SEPARATOR: char = ':';

/// Parse the full shorthand into a [`LettersAtPositions`] map.
///
/// # Errors
///
/// - `ParseError::EmptyItem` for an empty item (doubled or trailing comma, or empty input).
/// - `ParseError::MissingColon` if an item has no `:`.
/// - `ParseError::InvalidPosition` if the position is not a non-negative integer.
/// - `ParseError::InvalidPositionLetter` if the letter is not exactly one character.
pub fn parse_letters_at_positions(text: &str) -> Result<LettersAtPositions, Box<ParseError>> {
    let mut positions = LettersAtPositions::new();
    for item in text.split(ITEM_SEPARATOR) {
        let (position, letter) = parse_item(item)?;
        if let Some(older) = positions.pin(position, letter).filter(|&older| older != letter) {
            log::warn!("Position {position} pinned twice ('{older}' then '{letter}'); keeping '{letter}'");
        }
    }
    Ok(positions)
}

/// Parse a single `pos:letter` item.
fn parse_item(item: &str) -> Result<(usize, char), Box<ParseError>> {
    if item.trim().is_empty() {
        return Err(Box::new(ParseError::EmptyItem));
    }

    match all_consuming(position_item).parse(item) {
        Ok((_, pair)) => Ok(pair),
        Err(nom::Err::Failure(e)) => Err(e),
        // nom only tells us *where* it stopped; work out which half was wrong
        Err(_) => Err(classify_item_error(item)),
    }
}

fn position_item(input: &'_ str) -> PResult<'_, (usize, char)> {
    separated_pair(position, char(POSITION_SEPARATOR), letter).parse(input)
}

fn position(input: &'_ str) -> PResult<'_, usize> {
    let (rest, digits) = delimited(space0, preceded(opt(char('+')), digit1), space0).parse(input)?;
    // digit1 guarantees ASCII digits, so the only failure left is overflow
    let pos = digits.parse::<usize>().map_err(|_| {
        nom::Err::Failure(Box::new(ParseError::InvalidPosition { item: input.trim().to_string() }))
    })?;
    Ok((rest, pos))
}

fn letter(input: &'_ str) -> PResult<'_, char> {
    delimited(
        space0,
        satisfy(|c| !c.is_whitespace() && c != ITEM_SEPARATOR && c != POSITION_SEPARATOR),
        space0,
    )
    .parse(input)
}

/// Blame the half of a rejected item that the item grammar itself rejects.
fn classify_item_error(item: &str) -> Box<ParseError> {
    let item_str = item.trim().to_string();
    match item.split_once(POSITION_SEPARATOR) {
        None => Box::new(ParseError::MissingColon { item: item_str }),
        Some((pos, _)) if all_consuming(position).parse(pos).is_err() => {
            Box::new(ParseError::InvalidPosition { item: item_str })
        }
        Some(_) => Box::new(ParseError::InvalidPositionLetter { item: item_str }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<(usize, char)>, ParseError> {
        parse_letters_at_positions(text)
            .map(|p| p.iter().collect())
            .map_err(|e| *e)
    }

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse("0:c,2:t").unwrap(), vec![(0, 'c'), (2, 't')]);
    }

    #[test]
    fn test_parse_single_item() {
        assert_eq!(parse("4:o").unwrap(), vec![(4, 'o')]);
    }

    #[test]
    fn test_parse_sorts_positions() {
        assert_eq!(parse("3:a,1:a").unwrap(), vec![(1, 'a'), (3, 'a')]);
    }

    #[test]
    fn test_parse_ignores_spaces() {
        assert_eq!(parse(" 0 : c , 2:t ").unwrap(), vec![(0, 'c'), (2, 't')]);
    }

    #[test]
    fn test_parse_accented_letter() {
        assert_eq!(parse("4:à").unwrap(), vec![(4, 'à')]);
    }

    #[test]
    fn test_parse_large_position() {
        assert_eq!(parse("120:z").unwrap(), vec![(120, 'z')]);
    }

    #[test]
    fn test_parse_plus_signed_position() {
        assert_eq!(parse("+1:a").unwrap(), vec![(1, 'a')]);
        assert_eq!(parse(" +0 : c,2:t").unwrap(), vec![(0, 'c'), (2, 't')]);
    }

    #[test]
    fn test_bad_sign_is_a_position_error() {
        for item in ["++1:a", "+:a", "+ 1:a", "1+:a"] {
            assert_eq!(
                parse(item).unwrap_err(),
                ParseError::InvalidPosition { item: item.to_string() },
                "{item}"
            );
        }
    }

    #[test]
    fn test_bad_position_never_blamed_on_letter() {
        for item in ["x:ab", "-1:", ":", "+:cd", "1.5:a", "++2:ab"] {
            let err = parse(item).unwrap_err();
            assert_eq!(err.code(), "E002", "{item} gave {err:?}");
        }
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(parse("0c").unwrap_err(), ParseError::MissingColon { item: "0c".to_string() });
        assert_eq!(parse("0:c,2t").unwrap_err(), ParseError::MissingColon { item: "2t".to_string() });
    }

    #[test]
    fn test_non_numeric_position() {
        assert_eq!(parse("x:c").unwrap_err(), ParseError::InvalidPosition { item: "x:c".to_string() });
        assert_eq!(parse(":c").unwrap_err(), ParseError::InvalidPosition { item: ":c".to_string() });
    }

    #[test]
    fn test_negative_position() {
        assert_eq!(parse("-1:a").unwrap_err(), ParseError::InvalidPosition { item: "-1:a".to_string() });
    }

    #[test]
    fn test_overflowing_position() {
        let item = "99999999999999999999999999:a";
        assert_eq!(parse(item).unwrap_err(), ParseError::InvalidPosition { item: item.to_string() });
    }

    #[test]
    fn test_bad_letter() {
        assert_eq!(parse("0:").unwrap_err(), ParseError::InvalidPositionLetter { item: "0:".to_string() });
        assert_eq!(parse("0:ab").unwrap_err(), ParseError::InvalidPositionLetter { item: "0:ab".to_string() });
        assert_eq!(parse("0:c:d").unwrap_err(), ParseError::InvalidPositionLetter { item: "0:c:d".to_string() });
        assert_eq!(parse("+1:").unwrap_err(), ParseError::InvalidPositionLetter { item: "+1:".to_string() });
    }

    #[test]
    fn test_empty_items() {
        assert_eq!(parse("").unwrap_err(), ParseError::EmptyItem);
        assert_eq!(parse("0:c,,2:t").unwrap_err(), ParseError::EmptyItem);
        assert_eq!(parse("0:c,").unwrap_err(), ParseError::EmptyItem);
    }

    #[test]
    fn test_repeated_position_later_wins() {
        assert_eq!(parse("1:a,1:e").unwrap(), vec![(1, 'e')]);
        assert_eq!(parse("1:a,0:c,+1:o").unwrap(), vec![(0, 'c'), (1, 'o')]);
        assert_eq!(parse("1:a,1:a").unwrap(), vec![(1, 'a')]);
    }

    #[test]
    fn test_first_error_wins() {
        assert!(matches!(parse("x:c,0c").unwrap_err(), ParseError::InvalidPosition { .. }));
    }
}
