//! `corpus` — load the Italian word lists that every search runs against
//!
//! A corpus directory holds any number of plain-text files ending in `.txt`.
//! Their content is free-form: it is split on whitespace and every token made
//! only of letters becomes a word. Anything else (`123`, `l'acqua`, `ciao!`)
//! is dropped without complaint.
//!
//! The output is a `Corpus` struct containing a flat `Vec<String>` of unique
//! words in ascending code-point order. Case is preserved: `Roma` and `roma`
//! are two different words.
//!
//! As with the rest of the crate, parsing is separated from file I/O so it can
//! run where there is no filesystem:
//! - `parse_from_str(...)` / `from_texts(...)` — work everywhere, including WASM.
//! - `load_from_dir(...)` — **native-only**, reads every word list in a directory.
//! - `CorpusCache` — **native-only**, remembers loaded directories until their files change.
//!
//! Loading is all-or-nothing: the first unreadable or non-UTF-8 file aborts the
//! load with a [`CorpusError`].

use std::collections::BTreeSet;
#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::collections::hash_map::Entry;
#[cfg(not(target_arch = "wasm32"))]
use std::ffi::OsStr;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
use std::io;
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;
#[cfg(not(target_arch = "wasm32"))]
use std::time::SystemTime;

#[cfg(not(target_arch = "wasm32"))]
use log::{debug, info};

/// Only files whose name ends with this are read.
pub const WORD_LIST_EXTENSION: &str = ".txt";

/// Default corpus directory, relative to the working directory.
pub const DEFAULT_CORPUS_DIR: &str = "./paroleitaliane/";

/// Errors raised while loading a corpus from disk.
///
/// # Error Codes
///
/// - C001: `FileAccess` (Directory or file could not be read)
/// - C002: `Decoding` (File is not valid UTF-8)
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Cannot read '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not valid UTF-8 (first invalid byte at offset {offset})", path.display())]
    Decoding { path: PathBuf, offset: usize },
}

impl CorpusError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CorpusError::FileAccess { .. } => "C001",
            CorpusError::Decoding { .. } => "C002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            CorpusError::FileAccess { .. } => "Directory or file could not be read",
            CorpusError::Decoding { .. } => "Word list is not valid UTF-8",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            CorpusError::FileAccess { .. } => "The corpus directory does not exist or could not be listed, or one of its word lists could not be opened or read. Loading stops at the first such failure.",
            CorpusError::Decoding { .. } => "Every word list must be UTF-8 encoded. One file contains bytes that are not valid UTF-8, so the whole load was abandoned.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            CorpusError::FileAccess { .. } => Some("Check the path passed with --dir (default './paroleitaliane/') and its permissions"),
            CorpusError::Decoding { .. } => Some("Re-save the file as UTF-8, e.g. `iconv -f latin1 -t utf-8 old.txt > new.txt`"),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// True if `token` is non-empty and made only of alphabetic characters.
///
/// "Alphabetic" is the Unicode Alphabetic property, so letter-numbers such as
/// `Ⅻ` count as letters too.
#[must_use]
pub fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// A loaded, ready-to-search word list.
///
/// `words` holds every accepted word exactly once, sorted ascending by code
/// point (which is also byte order for UTF-8).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Example: `["cane", "casa", "mela", ...]`
    pub words: Vec<String>,
}

impl Corpus {
    /// Build a corpus from a single text.
    ///
    /// This is **WASM-safe**: no filesystem access.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> Corpus {
        Self::from_texts([contents])
    }

    /// Build a corpus from several texts, deduplicating across all of them.
    pub fn from_texts<'a, I>(texts: I) -> Corpus
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut words = BTreeSet::new();
        for text in texts {
            collect_words(text, &mut words);
        }
        Corpus { words: words.into_iter().collect() }
    }

    /// Read every `.txt` file in `dir` (not recursively) and build the corpus.
    ///
    /// Files are visited in file-name order. Subdirectories and files with
    /// other extensions are skipped.
    ///
    /// # Errors
    ///
    /// - `CorpusError::FileAccess` if `dir` cannot be listed or a word list cannot be read.
    /// - `CorpusError::Decoding` if a word list is not valid UTF-8.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Corpus, CorpusError> {
        let dir = dir.as_ref();
        let files = word_list_files(dir)?;

        let mut words = BTreeSet::new();
        for path in &files {
            let text = read_word_list(path)?;
            let (num_tokens, num_accepted) = collect_words(&text, &mut words);
            debug!(
                "Read '{}': {num_tokens} tokens, {num_accepted} words",
                path.display()
            );
        }

        info!(
            "Loaded {} unique words from {} word lists in '{}'",
            words.len(),
            files.len(),
            dir.display()
        );
        Ok(Corpus { words: words.into_iter().collect() })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Return an iterator over the words
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }

    /// Binary search; `words` is sorted.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.binary_search_by(|w| w.as_str().cmp(word)).is_ok()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;
    fn into_iter(self) -> Self::IntoIter { self.words.iter() }
}

/// Add the words of `text` to `words`; returns `(tokens seen, tokens accepted)`.
fn collect_words(text: &str, words: &mut BTreeSet<String>) -> (usize, usize) {
    let mut num_tokens = 0;
    let mut num_accepted = 0;
    for token in text.split_whitespace() {
        num_tokens += 1;
        if is_word(token) {
            num_accepted += 1;
            // avoid reallocating tokens we already have
            if !words.contains(token) {
                words.insert(token.to_string());
            }
        }
    }
    (num_tokens, num_accepted)
}

#[cfg(not(target_arch = "wasm32"))]
fn is_word_list_name(file_name: &OsStr) -> bool {
    file_name.to_string_lossy().ends_with(WORD_LIST_EXTENSION)
}

/// List the word lists of `dir`, sorted by path.
#[cfg(not(target_arch = "wasm32"))]
fn word_list_files(dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let access_err = |source: io::Error| CorpusError::FileAccess { path: dir.to_path_buf(), source };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(access_err)? {
        let entry = entry.map_err(access_err)?;
        let path = entry.path();
        // `is_file` follows symlinks, so a link to a word list counts
        if is_word_list_name(&entry.file_name()) && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read one word list fully and decode it as UTF-8.
#[cfg(not(target_arch = "wasm32"))]
fn read_word_list(path: &Path) -> Result<String, CorpusError> {
    // `fs::read` opens, reads and closes the handle before returning, on every path
    let bytes = fs::read(path).map_err(|source| CorpusError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|e| CorpusError::Decoding {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })
}

/// Modification stamp of a single word list.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
}

/// What a corpus directory looked like when it was loaded.
///
/// The directory's own mtime catches files being added or removed; the
/// per-file stamps catch edits in place.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint {
    dir_modified: Option<SystemTime>,
    files: Vec<FileStamp>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Fingerprint {
    fn of(dir: &Path) -> Result<Fingerprint, CorpusError> {
        let stat = |path: &Path| {
            fs::metadata(path).map_err(|source| CorpusError::FileAccess { path: path.to_path_buf(), source })
        };

        let dir_modified = stat(dir)?.modified().ok();
        let files = word_list_files(dir)?
            .into_iter()
            .map(|path| -> Result<FileStamp, CorpusError> {
                let meta = stat(&path)?;
                Ok(FileStamp { modified: meta.modified().ok(), len: meta.len(), path })
            })
            .collect::<Result<Vec<_>, CorpusError>>()?;

        Ok(Fingerprint { dir_modified, files })
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
struct CachedCorpus {
    fingerprint: Fingerprint,
    corpus: Corpus,
}

/// Keeps loaded corpora keyed by directory, reloading a directory only when
/// its word lists change.
///
/// Useful for front ends that run many searches against the same directory.
/// Changes are detected from file metadata, so an edit that keeps both the
/// size and the modification time of a file is not noticed.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct CorpusCache {
    entries: HashMap<PathBuf, CachedCorpus>,
}

#[cfg(not(target_arch = "wasm32"))]
impl CorpusCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the corpus for `dir`, loading it on first use or when it changed.
    ///
    /// # Errors
    ///
    /// Same as [`Corpus::load_from_dir`]. On error the stale entry (if any) is kept.
    pub fn get_or_load<P: AsRef<Path>>(&mut self, dir: P) -> Result<&Corpus, CorpusError> {
        let dir = dir.as_ref();
        let fingerprint = Fingerprint::of(dir)?;

        match self.entries.entry(dir.to_path_buf()) {
            Entry::Occupied(mut slot) => {
                if slot.get().fingerprint == fingerprint {
                    debug!("Corpus cache hit for '{}'", dir.display());
                } else {
                    debug!("Corpus in '{}' changed; reloading", dir.display());
                    let corpus = Corpus::load_from_dir(dir)?;
                    slot.insert(CachedCorpus { fingerprint, corpus });
                }
                Ok(&slot.into_mut().corpus)
            }
            Entry::Vacant(slot) => {
                debug!("Corpus cache miss for '{}'", dir.display());
                let corpus = Corpus::load_from_dir(dir)?;
                Ok(&slot.insert(CachedCorpus { fingerprint, corpus }).corpus)
            }
        }
    }

    /// Forget `dir`; returns whether it was cached.
    pub fn invalidate<P: AsRef<Path>>(&mut self, dir: P) -> bool {
        self.entries.remove(dir.as_ref()).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn contains<P: AsRef<Path>>(&self, dir: P) -> bool {
        self.entries.contains_key(dir.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
