//! Apply a [`ConstraintSet`] to a word list.
//!
//! A word is kept if and only if it passes:
//! 1. the exact `length` (counted in characters), when set;
//! 2. `include_letters`: every listed letter occurs at least once;
//! 3. `exclude_letters`: no listed letter occurs;
//! 4. the single [`PositionalRule`] chosen for the query (pinned positions,
//!    else prefix, else suffix, else first letters).
//!
//! Filtering is order-preserving, so the result is a subsequence of the input,
//! and idempotent.

use log::debug;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use crate::constraints::{ConstraintSet, PositionalRule};
use crate::corpus::Corpus;
#[cfg(not(target_arch = "wasm32"))]
use crate::corpus::CorpusError;

/// A constraint set with its positional rule resolved once, ready to test many words.
#[derive(Debug, Clone, Copy)]
pub struct WordFilter<'a> {
    constraints: &'a ConstraintSet,
    rule: PositionalRule<'a>,
}

impl<'a> WordFilter<'a> {
    #[must_use]
    pub fn new(constraints: &'a ConstraintSet) -> Self {
        WordFilter { constraints, rule: constraints.positional_rule() }
    }

    #[must_use]
    pub fn rule(&self) -> PositionalRule<'a> {
        self.rule
    }

    /// True if `word` satisfies every active constraint.
    #[must_use]
    pub fn accepts(&self, word: &str) -> bool {
        let c = self.constraints;

        if c.length.is_some_and(|len| word.chars().count() != len) {
            return false;
        }
        if c.include_letters.as_deref().is_some_and(|letters| !letters.chars().all(|l| word.contains(l))) {
            return false;
        }
        if c.exclude_letters.as_deref().is_some_and(|letters| letters.chars().any(|l| word.contains(l))) {
            return false;
        }

        self.rule.matches(word)
    }
}

/// Return the words satisfying `constraints`, in input order.
pub fn filter_words<'w, S>(words: &'w [S], constraints: &ConstraintSet) -> Vec<&'w str>
where
    S: AsRef<str>,
{
    let word_filter = WordFilter::new(constraints);
    debug!("Filtering {} words ({constraints}; rule: {})", words.len(), word_filter.rule().name());

    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|word| word_filter.accepts(word))
        .collect()
}

/// The outcome of a search: matching words in corpus order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub words: Vec<String>,
}

impl SearchResult {
    /// Number of matching words.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Filter an already-loaded corpus.
#[must_use]
pub fn search_corpus(corpus: &Corpus, constraints: &ConstraintSet) -> SearchResult {
    let words = filter_words(&corpus.words, constraints)
        .into_iter()
        .map(str::to_string)
        .collect();
    SearchResult { words }
}

/// Load the corpus in `dir` and filter it, in one blocking call.
///
/// # Errors
///
/// Any [`CorpusError`] raised while loading; filtering itself cannot fail.
#[cfg(not(target_arch = "wasm32"))]
pub fn search<P: AsRef<Path>>(dir: P, constraints: &ConstraintSet) -> Result<SearchResult, CorpusError> {
    let corpus = Corpus::load_from_dir(dir)?;
    Ok(search_corpus(&corpus, constraints))
}
