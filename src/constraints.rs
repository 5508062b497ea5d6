// constraints.rs
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

use crate::errors::ParseError;

/// Letters pinned at zero-based character positions.
///
/// Backed by a `BTreeMap` so positions are always visited in ascending order,
/// which lets [`LettersAtPositions::matches`] walk a word's characters once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LettersAtPositions {
    inner: BTreeMap<usize, char>,
}

impl LettersAtPositions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `letter` at `position`, replacing any letter already there.
    ///
    /// Returns the replaced letter, if any.
    pub fn pin(&mut self, position: usize, letter: char) -> Option<char> {
        self.inner.insert(position, letter)
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<char> {
        self.inner.get(&position).copied()
    }

    /// Iterate over `(position, letter)` pairs in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.inner.iter().map(|(&pos, &letter)| (pos, letter))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// True if every pinned position exists in `word` and holds its letter.
    ///
    /// An empty map matches every word.
    #[must_use]
    pub fn matches(&self, word: &str) -> bool {
        let mut chars = word.chars().enumerate();
        self.inner.iter().all(|(&pos, &letter)| {
            chars
                .find(|&(i, _)| i == pos)
                .is_some_and(|(_, c)| c == letter)
        })
    }
}

/// Later pairs overwrite earlier ones, as with [`LettersAtPositions::pin`].
impl FromIterator<(usize, char)> for LettersAtPositions {
    fn from_iter<T: IntoIterator<Item = (usize, char)>>(iter: T) -> Self {
        LettersAtPositions { inner: iter.into_iter().collect() }
    }
}

impl FromStr for LettersAtPositions {
    type Err = Box<ParseError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_letters_at_positions(s)
    }
}

/// Renders back into the `pos:letter,pos:letter` shorthand.
impl Display for LettersAtPositions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (pos, letter)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{pos}:{letter}")?;
        }
        Ok(())
    }
}

/// The one positional check applied to every word of a query.
///
/// Positions, prefix, suffix and first letters are not combined: the most
/// specific field that is set wins and the others are ignored. Priority is
/// positions > prefix > suffix > first letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionalRule<'a> {
    Positions(&'a LettersAtPositions),
    Prefix(&'a str),
    Suffix(&'a str),
    FirstLetters(&'a str),
    Unconstrained,
}

impl PositionalRule<'_> {
    #[must_use]
    pub fn matches(&self, word: &str) -> bool {
        match self {
            PositionalRule::Positions(positions) => positions.matches(word),
            PositionalRule::Prefix(prefix) => word.starts_with(prefix),
            PositionalRule::Suffix(suffix) => word.ends_with(suffix),
            PositionalRule::FirstLetters(first) => {
                let mut chars = word.chars();
                first.chars().all(|expected| chars.next() == Some(expected))
            }
            PositionalRule::Unconstrained => true,
        }
    }

    /// Short name, used in log output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PositionalRule::Positions(_) => "positions",
            PositionalRule::Prefix(_) => "prefix",
            PositionalRule::Suffix(_) => "suffix",
            PositionalRule::FirstLetters(_) => "first-letters",
            PositionalRule::Unconstrained => "unconstrained",
        }
    }
}

/// All the filters a single search may specify.
///
/// Every field is optional; `None` means unconstrained. Note that
/// `Some(String::new())` is *not* the same as `None`: an empty prefix, for
/// example, still wins the positional priority and suppresses a suffix. Front
/// ends should go through [`crate::request::SearchRequest`], which maps empty
/// input to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    pub length: Option<usize>,
    pub include_letters: Option<String>,
    pub exclude_letters: Option<String>,
    pub letters_at_positions: Option<LettersAtPositions>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    pub first_letters: Option<String>,
}

impl ConstraintSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    #[must_use]
    pub fn with_include_letters(mut self, letters: impl Into<String>) -> Self {
        self.include_letters = Some(letters.into());
        self
    }

    #[must_use]
    pub fn with_exclude_letters(mut self, letters: impl Into<String>) -> Self {
        self.exclude_letters = Some(letters.into());
        self
    }

    #[must_use]
    pub fn with_letters_at_positions(mut self, positions: LettersAtPositions) -> Self {
        self.letters_at_positions = Some(positions);
        self
    }

    #[must_use]
    pub fn with_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_ends_with(mut self, suffix: impl Into<String>) -> Self {
        self.ends_with = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn with_first_letters(mut self, letters: impl Into<String>) -> Self {
        self.first_letters = Some(letters.into());
        self
    }

    /// Resolve which positional field applies to this query.
    #[must_use]
    pub fn positional_rule(&self) -> PositionalRule<'_> {
        if let Some(positions) = &self.letters_at_positions {
            PositionalRule::Positions(positions)
        } else if let Some(prefix) = &self.starts_with {
            PositionalRule::Prefix(prefix)
        } else if let Some(suffix) = &self.ends_with {
            PositionalRule::Suffix(suffix)
        } else if let Some(first) = &self.first_letters {
            PositionalRule::FirstLetters(first)
        } else {
            PositionalRule::Unconstrained
        }
    }

    /// True if no field is set, so every word matches.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        *self == ConstraintSet::default()
    }

    /// True if `word` satisfies every active constraint.
    ///
    /// This resolves the positional rule on every call; to filter many words
    /// use [`crate::filter::WordFilter`] or [`crate::filter::filter_words`].
    #[must_use]
    pub fn matches(&self, word: &str) -> bool {
        crate::filter::WordFilter::new(self).accepts(word)
    }
}

/// Deterministic one-line summary like
/// `length=5, include="ae", positions=0:c,2:t`
impl Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(length) = self.length {
            parts.push(format!("length={length}"));
        }
        if let Some(s) = &self.include_letters {
            parts.push(format!("include={s:?}"));
        }
        if let Some(s) = &self.exclude_letters {
            parts.push(format!("exclude={s:?}"));
        }
        if let Some(p) = &self.letters_at_positions {
            parts.push(format!("positions={p}"));
        }
        if let Some(s) = &self.starts_with {
            parts.push(format!("starts_with={s:?}"));
        }
        if let Some(s) = &self.ends_with {
            parts.push(format!("ends_with={s:?}"));
        }
        if let Some(s) = &self.first_letters {
            parts.push(format!("first_letters={s:?}"));
        }
        if parts.is_empty() {
            write!(f, "(no constraints)")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}
